use std::sync::Arc;

use super::AudioEvent;
use crate::config::EngineConfig;
use crate::material::{ImpactMaterialData, MaterialCatalog};
use crate::object::{ImpactMaterial, ImpactMaterialCategory, ObjectDescriptor};

fn metal() -> ImpactMaterialData {
    ImpactMaterialData {
        cf: (0..10).map(|i| 200.0 + i as f64 * 500.0).collect(),
        op: vec![10.0; 10],
        rt: vec![0.3; 10],
    }
}

fn glass() -> ImpactMaterialData {
    ImpactMaterialData {
        cf: (0..10).map(|i| 800.0 + i as f64 * 900.0).collect(),
        op: vec![12.0; 10],
        rt: vec![0.15; 10],
    }
}

fn make_event() -> AudioEvent {
    let catalog = MaterialCatalog::new();
    let primary_mat = ImpactMaterial::new(ImpactMaterialCategory::Metal, 2);
    let secondary_mat = ImpactMaterial::new(ImpactMaterialCategory::Glass, 1);
    catalog.load_impact(primary_mat, metal());
    catalog.load_impact(secondary_mat, glass());

    let primary = ObjectDescriptor::new(1, primary_mat, 0.5, 0.8, 1.0, None);
    let secondary = ObjectDescriptor::new(2, secondary_mat, 0.3, 0.6, 0.2, None);

    let (modes_a, modes_b) = AudioEvent::build_modes(&primary, &secondary, &catalog, 7).unwrap();
    AudioEvent::new(
        primary,
        secondary,
        modes_a,
        modes_b,
        Arc::new(EngineConfig::default()),
        4410,
        11,
    )
}

#[test]
fn first_adjust_modes_applies_decay_shift_and_returns_initial_amp() {
    let mut event = make_event();
    let expected_amp = event.primary.amp * event.config.simulation_amp;
    let shift = 20.0 * (event.secondary.amp / event.primary.amp).log10();
    let before: Vec<f64> = event.modes_b.decay_times.to_vec();

    let amp = event.adjust_modes(1.5);

    assert_eq!(amp, expected_amp);
    assert_eq!(event.initial_speed, 1.5);
    for (b, a) in before.iter().zip(event.modes_b.decay_times.iter()) {
        assert!((a - (b + shift)).abs() < 1e-9);
    }
}

#[test]
fn first_adjust_modes_applies_shift_exactly_once_across_repeated_calls() {
    let mut event = make_event();
    let _ = event.adjust_modes(1.0);
    let after_first: Vec<f64> = event.modes_b.decay_times.to_vec();

    // collision_count is still 0 (caller hasn't recorded a synthesis yet),
    // so a second call before record_successful_synthesis must not
    // re-apply the shift.
    let _ = event.adjust_modes(1.0);
    assert_eq!(event.modes_b.decay_times.to_vec(), after_first);
}

#[test]
fn subsequent_adjust_modes_scales_by_speed_ratio() {
    let mut event = make_event();
    let initial_amp = event.adjust_modes(2.0);
    event.record_successful_synthesis();

    let amp = event.adjust_modes(4.0);
    assert!((amp - initial_amp * 2.0).abs() < 1e-9);
}

#[test]
fn impulse_response_is_empty_for_nonpositive_amplitude() {
    let mut event = make_event();
    assert_eq!(event.impulse_response(0.0), 0);
    assert_eq!(event.impulse_response(-1.0), 0);
    assert!(event.ir().is_empty());
}

#[test]
fn impulse_response_combines_both_modes() {
    let mut event = make_event();
    let amp = event.adjust_modes(1.0);
    let len = event.impulse_response(amp);
    assert!(len > 0);
    assert_eq!(event.ir().len(), len);
    assert_eq!(event.ir_len(), len);
}

#[test]
fn samples_i16_le_matches_buffer_length() {
    let mut event = make_event();
    let buf = event.sample_buffer_mut();
    buf[0] = 1.0;
    buf[1] = -1.0;
    event.set_sample_len(2);
    assert_eq!(event.samples_i16_le().len(), 4);
    assert_eq!(event.samples_f32().len(), 2);
}

#[test]
fn new_events_start_in_the_start_state() {
    let event = make_event();
    assert_eq!(event.state(), super::AudioEventState::Start);
}
