use std::sync::Arc;

use super::ScrapeEvent;
use crate::config::{EngineConfig, SCRAPE_SAMPLES_PER_CHUNK};
use crate::material::{ImpactMaterialData, MaterialCatalog, ScrapeMaterialData};
use crate::object::{
    ImpactMaterial, ImpactMaterialCategory, ObjectDescriptor, ScrapeMaterial,
};

fn metal() -> ImpactMaterialData {
    ImpactMaterialData {
        cf: (0..10).map(|i| 300.0 + i as f64 * 400.0).collect(),
        op: vec![9.0; 10],
        rt: vec![0.2; 10],
    }
}

fn wood() -> ImpactMaterialData {
    ImpactMaterialData {
        cf: (0..10).map(|i| 250.0 + i as f64 * 350.0).collect(),
        op: vec![7.0; 10],
        rt: vec![0.18; 10],
    }
}

fn long_surface(len: usize) -> Vec<f64> {
    (0..len).map(|i| (i as f64 * 0.01).sin()).collect()
}

fn make_scrape(config: EngineConfig) -> ScrapeEvent {
    let catalog = MaterialCatalog::new();
    let primary_mat = ImpactMaterial::new(ImpactMaterialCategory::Metal, 2);
    let secondary_mat = ImpactMaterial::new(ImpactMaterialCategory::WoodMedium, 1);
    catalog.load_impact(primary_mat, metal());
    catalog.load_impact(secondary_mat, wood());
    catalog.load_scrape(
        ScrapeMaterial::RoughWood,
        ScrapeMaterialData::from_surface(&long_surface(5000), 1.2),
    );

    let primary = ObjectDescriptor::new(1, primary_mat, 0.6, 0.8, 3.0, None);
    let secondary = ObjectDescriptor::new(
        2,
        secondary_mat,
        0.4,
        0.6,
        1.0,
        Some(ScrapeMaterial::RoughWood),
    );

    ScrapeEvent::new(primary, secondary, &catalog, Arc::new(config), 5).unwrap()
}

#[test]
fn construction_fails_without_a_secondary_scrape_material() {
    let catalog = MaterialCatalog::new();
    let primary_mat = ImpactMaterial::new(ImpactMaterialCategory::Metal, 2);
    let secondary_mat = ImpactMaterial::new(ImpactMaterialCategory::WoodMedium, 1);
    catalog.load_impact(primary_mat, metal());
    catalog.load_impact(secondary_mat, wood());
    let primary = ObjectDescriptor::new(1, primary_mat, 0.6, 0.8, 3.0, None);
    let secondary = ObjectDescriptor::new(2, secondary_mat, 0.4, 0.6, 1.0, None);
    assert!(ScrapeEvent::new(primary, secondary, &catalog, Arc::new(EngineConfig::default()), 1).is_err());
}

#[test]
fn get_audio_emits_a_full_chunk_and_advances_the_index() {
    let mut scrape = make_scrape(EngineConfig::default());
    assert!(scrape.get_audio(0.001));
    assert_eq!(scrape.samples().len(), SCRAPE_SAMPLES_PER_CHUNK);
    let idx_after_first = scrape.scrape_idx;
    assert!(idx_after_first > 0);
    assert!(scrape.get_audio(0.001));
    assert!(scrape.scrape_idx >= idx_after_first);
}

#[test]
fn impulse_response_is_cached_across_calls() {
    let mut scrape = make_scrape(EngineConfig::default());
    assert!(scrape.get_audio(0.001));
    assert!(scrape.ir_cached);
    let ir_after_first: Vec<f64> = scrape.event.ir().to_vec();
    assert!(scrape.get_audio(0.001));
    assert_eq!(scrape.event.ir().to_vec(), ir_after_first);
}

#[test]
fn zero_speed_yields_too_few_points_and_fails() {
    let mut scrape = make_scrape(EngineConfig::default());
    assert!(!scrape.get_audio(0.0));
}

#[test]
fn scrape_id_is_stable_for_the_life_of_the_event() {
    let mut scrape = make_scrape(EngineConfig::default());
    let id = scrape.scrape_id();
    let _ = scrape.get_audio(0.001);
    assert_eq!(scrape.scrape_id(), id);
}
