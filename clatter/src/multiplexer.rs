//! Per-tick ingestion of collision events, pair-keyed impact/scrape state,
//! thread-per-event dispatch, and listener emission.


use std::sync::{Arc, Mutex};
use std::time::Instant;

use fxhash::FxHashMap;
use rand::Rng;

use clatter_util::GaussianSampler;

use crate::collision::{CollisionEvent, CollisionKind, Position};
use crate::config::EngineConfig;
use crate::event::AudioEventState;
use crate::impact::ImpactEvent;
use crate::material::MaterialCatalog;
use crate::scrape::ScrapeEvent;

/// Diagnostic error from [`Multiplexer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickError {
    /// The dispatched workers collectively took longer than
    /// `EngineConfig::join_timeout` to join. The tick still completed (all
    /// workers are always joined before `tick` returns) — this only flags
    /// that the join took unexpectedly long.
    WorkerTimeout,
}

impl std::fmt::Display for TickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TickError::WorkerTimeout => write!(f, "worker join exceeded the configured timeout"),
        }
    }
}

impl std::error::Error for TickError {}

type ImpactListener = Box<dyn FnMut(&[f64], Position, u64)>;
type ScrapeStartListener = Box<dyn FnMut(u64, Position)>;
type ScrapeOngoingListener = Box<dyn FnMut(&[f64], Position, u64)>;
type ScrapeEndListener = Box<dyn FnMut(u64)>;

/// Routes per-tick collision events to per-pair impact/scrape state
/// machines and notifies registered listeners of completed audio.
pub struct Multiplexer {
    config: Arc<EngineConfig>,
    catalog: Arc<MaterialCatalog>,

    impacts: FxHashMap<u64, ImpactEvent>,
    scrapes: FxHashMap<u64, ScrapeEvent>,
    impact_positions: FxHashMap<u64, Position>,
    scrape_positions: FxHashMap<u64, Position>,

    pending: Vec<CollisionEvent>,
    source_id_rng: GaussianSampler,
    next_event_seed: u64,
    ending: bool,

    on_impact: Vec<ImpactListener>,
    on_scrape_start: Vec<ScrapeStartListener>,
    on_scrape_ongoing: Vec<ScrapeOngoingListener>,
    on_scrape_end: Vec<ScrapeEndListener>,
}

impl Multiplexer {
    #[must_use]
    pub fn new(config: Arc<EngineConfig>, catalog: Arc<MaterialCatalog>, rng_seed: u64) -> Self {
        Self {
            config,
            catalog,
            impacts: FxHashMap::default(),
            scrapes: FxHashMap::default(),
            impact_positions: FxHashMap::default(),
            scrape_positions: FxHashMap::default(),
            pending: Vec::new(),
            source_id_rng: GaussianSampler::new(rng_seed),
            next_event_seed: rng_seed.wrapping_add(1),
            ending: false,
            on_impact: Vec::new(),
            on_scrape_start: Vec::new(),
            on_scrape_ongoing: Vec::new(),
            on_scrape_end: Vec::new(),
        }
    }

    pub fn on_impact(&mut self, listener: impl FnMut(&[f64], Position, u64) + 'static) {
        self.on_impact.push(Box::new(listener));
    }

    pub fn on_scrape_start(&mut self, listener: impl FnMut(u64, Position) + 'static) {
        self.on_scrape_start.push(Box::new(listener));
    }

    pub fn on_scrape_ongoing(&mut self, listener: impl FnMut(&[f64], Position, u64) + 'static) {
        self.on_scrape_ongoing.push(Box::new(listener));
    }

    pub fn on_scrape_end(&mut self, listener: impl FnMut(u64) + 'static) {
        self.on_scrape_end.push(Box::new(listener));
    }

    /// Queues a collision event for the next [`Self::tick`]. A no-op once
    /// [`Self::end`] has been called.
    pub fn add_collision(&mut self, event: CollisionEvent) {
        if self.ending {
            return;
        }
        self.pending.push(event);
    }

    /// Signals termination: the next `tick()` disposes of all impact and
    /// scrape state without emitting any further listener callbacks.
    pub fn end(&mut self) {
        self.ending = true;
    }

    fn next_seed(&mut self) -> u64 {
        self.next_event_seed = self.next_event_seed.wrapping_add(1);
        self.next_event_seed
    }

    /// Drains the per-tick buffer, dispatches synthesis for every queued
    /// pair, waits for completion, emits listener callbacks in input
    /// order, then removes ended events.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::WorkerTimeout`] if the join took longer than
    /// `EngineConfig::join_timeout`; the tick's work is still complete.
    pub fn tick(&mut self) -> Result<(), TickError> {
        let start = Instant::now();
        let pending = std::mem::take(&mut self.pending);

        let mut impact_order: Vec<u64> = Vec::new();
        let mut impact_speed: FxHashMap<u64, f64> = FxHashMap::default();
        let mut scrape_order: Vec<u64> = Vec::new();
        let mut scrape_speed: FxHashMap<u64, f64> = FxHashMap::default();

        for ev in &pending {
            match ev.kind {
                CollisionKind::Impact => {
                    self.impact_positions.insert(ev.pair_id, ev.position);
                    if !self.impacts.contains_key(&ev.pair_id) {
                        let seed = self.next_seed();
                        match ImpactEvent::new(
                            ev.primary,
                            ev.secondary,
                            &self.catalog,
                            Arc::clone(&self.config),
                            seed,
                        ) {
                            Ok(impact) => {
                                self.impacts.insert(ev.pair_id, impact);
                            }
                            Err(e) => {
                                log::warn!("dropping impact for pair {}: {e}", ev.pair_id);
                                continue;
                            }
                        }
                    }
                    impact_speed.insert(ev.pair_id, ev.speed);
                    if !impact_order.contains(&ev.pair_id) {
                        impact_order.push(ev.pair_id);
                    }
                }
                CollisionKind::Scrape if ev.secondary.scrape_material.is_some() => {
                    self.scrape_positions.insert(ev.pair_id, ev.position);
                    if !self.scrapes.contains_key(&ev.pair_id) {
                        let seed = self.next_seed();
                        match ScrapeEvent::new(
                            ev.primary,
                            ev.secondary,
                            &self.catalog,
                            Arc::clone(&self.config),
                            seed,
                        ) {
                            Ok(scrape) => {
                                self.scrapes.insert(ev.pair_id, scrape);
                            }
                            Err(e) => {
                                log::warn!("dropping scrape for pair {}: {e}", ev.pair_id);
                                continue;
                            }
                        }
                    }
                    scrape_speed.insert(ev.pair_id, ev.speed);
                    if !scrape_order.contains(&ev.pair_id) {
                        scrape_order.push(ev.pair_id);
                    }
                }
                CollisionKind::Scrape | CollisionKind::Roll | CollisionKind::None => {}
            }
        }

        let mut impact_results: FxHashMap<u64, bool> = FxHashMap::default();
        {
            let impact_results = Mutex::new(&mut impact_results);
            std::thread::scope(|scope| {
                for (id, event) in self
                    .impacts
                    .iter_mut()
                    .filter(|(k, _)| impact_order.contains(k))
                {
                    let speed = impact_speed[id];
                    let id = *id;
                    let impact_results = &impact_results;
                    scope.spawn(move || {
                        let ok = event.get_audio(speed);
                        impact_results.lock().unwrap().insert(id, ok);
                    });
                }
                for (id, event) in self
                    .scrapes
                    .iter_mut()
                    .filter(|(k, _)| scrape_order.contains(k))
                {
                    let speed = scrape_speed[id];
                    scope.spawn(move || {
                        event.get_audio(speed);
                    });
                }
            });
        }

        if !self.ending {
            for id in &impact_order {
                if impact_results.get(id).copied().unwrap_or(false) {
                    if let Some(impact) = self.impacts.get(id) {
                        if impact.state() != AudioEventState::End {
                            let source_id: u64 = self.source_id_rng.rng().gen();
                            let position = self.impact_positions.get(id).copied().unwrap_or_default();
                            let samples = impact.samples();
                            for cb in &mut self.on_impact {
                                cb(samples, position, source_id);
                            }
                        }
                    }
                }
            }

            for id in &scrape_order {
                let state = self.scrapes.get(id).map(ScrapeEvent::state);
                match state {
                    Some(AudioEventState::Start) => {
                        let scrape_id = self.scrapes[id].scrape_id();
                        let position = self.scrape_positions.get(id).copied().unwrap_or_default();
                        for cb in &mut self.on_scrape_start {
                            cb(scrape_id, position);
                        }
                        if let Some(scrape) = self.scrapes.get_mut(id) {
                            scrape.mark_ongoing();
                        }
                    }
                    Some(AudioEventState::Ongoing) => {
                        let scrape = &self.scrapes[id];
                        let scrape_id = scrape.scrape_id();
                        let position = self.scrape_positions.get(id).copied().unwrap_or_default();
                        let samples = scrape.samples();
                        for cb in &mut self.on_scrape_ongoing {
                            cb(samples, position, scrape_id);
                        }
                    }
                    Some(AudioEventState::End) | None => {}
                }
            }
        }

        self.impacts.retain(|_, e| e.state() != AudioEventState::End);

        let ended_scrapes: Vec<u64> = self
            .scrapes
            .iter()
            .filter(|(_, s)| s.state() == AudioEventState::End)
            .map(|(id, _)| *id)
            .collect();
        for id in ended_scrapes {
            if !self.ending {
                let scrape_id = self.scrapes[&id].scrape_id();
                for cb in &mut self.on_scrape_end {
                    cb(scrape_id);
                }
            }
            self.scrapes.remove(&id);
        }

        if self.ending {
            self.impacts.clear();
            self.scrapes.clear();
        }

        if start.elapsed() > self.config.join_timeout {
            return Err(TickError::WorkerTimeout);
        }
        Ok(())
    }
}
