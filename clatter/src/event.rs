//! Shared state for one collision-event series: collision count, the two
//! participants' modal responses, the owned sample/impulse-response
//! buffers, and the series' lifecycle state.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use clatter_util::numeric::add_padded;
use clatter_util::GaussianSampler;

use crate::config::EngineConfig;
use crate::material::MaterialCatalog;
use crate::modes::Modes;
use crate::object::ObjectDescriptor;

/// Lifecycle state of an impact or scrape series.
///
/// Impacts never observe `Start`/`Ongoing` distinctly — they only ever
/// check "is this series still alive" (`!= End`). Scrapes use the full
/// three-state machine: they emit `on_scrape_start` the first time
/// [`crate::scrape::ScrapeEvent::get_audio`] succeeds and transition to
/// `Ongoing` immediately after that emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEventState {
    Start,
    Ongoing,
    End,
}

/// Setup-time error building an [`AudioEvent`]: the catalog has no record
/// for one of the two participants' materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventError {
    MissingImpactMaterial,
    MissingScrapeMaterial,
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventError::MissingImpactMaterial => write!(f, "no impact material data loaded"),
            EventError::MissingScrapeMaterial => write!(f, "no scrape material data loaded"),
        }
    }
}

impl std::error::Error for EventError {}

/// Shared state underlying both impact and scrape generators.
#[derive(Debug)]
pub struct AudioEvent {
    pub primary: ObjectDescriptor,
    pub secondary: ObjectDescriptor,
    pub(crate) config: Arc<EngineConfig>,

    /// Modal response built from the *secondary* object's material.
    modes_a: Modes,
    /// Modal response built from the *primary* object's material, with the
    /// one-time log-amplitude decay-time shift applied on first synthesis.
    modes_b: Modes,

    collision_count: u32,
    initial_amp: f64,
    initial_speed: f64,
    decay_shift_applied: bool,

    pub(crate) state: AudioEventState,
    rng: GaussianSampler,

    samples: Vec<f64>,
    sample_len: usize,
    ir: Vec<f64>,
    ir_len: usize,
}

impl AudioEvent {
    pub(crate) fn new(
        primary: ObjectDescriptor,
        secondary: ObjectDescriptor,
        modes_a: Modes,
        modes_b: Modes,
        config: Arc<EngineConfig>,
        default_buffer_len: usize,
        seed: u64,
    ) -> Self {
        Self {
            initial_amp: primary.amp * config.simulation_amp,
            primary,
            secondary,
            config,
            modes_a,
            modes_b,
            collision_count: 0,
            initial_speed: 0.0,
            decay_shift_applied: false,
            state: AudioEventState::Start,
            rng: GaussianSampler::new(seed),
            samples: vec![0.0; default_buffer_len],
            sample_len: 0,
            ir: Vec::new(),
            ir_len: 0,
        }
    }

    /// Looks up both participants' modal material data and constructs the
    /// paired `Modes` (secondary -> `modes_a`, primary -> `modes_b`),
    /// drawing their randomized parameters from `rng_seed`.
    pub(crate) fn build_modes(
        primary: &ObjectDescriptor,
        secondary: &ObjectDescriptor,
        catalog: &MaterialCatalog,
        rng_seed: u64,
    ) -> Result<(Modes, Modes), EventError> {
        let secondary_data = catalog
            .get_impact(secondary.impact_material)
            .ok_or(EventError::MissingImpactMaterial)?;
        let primary_data = catalog
            .get_impact(primary.impact_material)
            .ok_or(EventError::MissingImpactMaterial)?;
        let mut rng = GaussianSampler::new(rng_seed);
        let modes_a = Modes::new(&secondary_data, &mut rng);
        let modes_b = Modes::new(&primary_data, &mut rng);
        Ok((modes_a, modes_b))
    }

    pub fn collision_count(&self) -> u32 {
        self.collision_count
    }

    pub fn state(&self) -> AudioEventState {
        self.state
    }

    pub fn rng(&mut self) -> &mut GaussianSampler {
        &mut self.rng
    }

    /// Samples written by the most recent successful synthesis, as `f64`.
    pub fn samples_f64(&self) -> &[f64] {
        &self.samples[..self.sample_len]
    }

    /// The same samples narrowed to `f32`, for hosts that requested that
    /// view.
    pub fn samples_f32(&self) -> Vec<f32> {
        self.samples_f64().iter().map(|&s| s as f32).collect()
    }

    /// The same samples packed as little-endian 16-bit PCM.
    pub fn samples_i16_le(&self) -> Vec<u8> {
        clatter_util::pcm::pack_i16_le(&self.samples, self.sample_len)
    }

    pub(crate) fn sample_buffer_mut(&mut self) -> &mut Vec<f64> {
        &mut self.samples
    }

    pub(crate) fn set_sample_len(&mut self, len: usize) {
        self.sample_len = len;
    }

    /// First call (`collision_count == 0`): applies the one-time
    /// `20*log10(secondary.amp/primary.amp)` shift to `modes_b`'s decay
    /// times, sets `initial_amp`/`initial_speed`, and returns
    /// `initial_amp`. Subsequent calls perturb both modes' powers and
    /// return `initial_amp * speed / initial_speed`.
    pub(crate) fn adjust_modes(&mut self, speed: f64) -> f64 {
        if self.collision_count == 0 {
            if !self.decay_shift_applied {
                let shift = 20.0 * (self.secondary.amp / self.primary.amp).log10();
                for d in &mut self.modes_b.decay_times {
                    *d += shift;
                }
                self.decay_shift_applied = true;
            }
            self.initial_amp = self.primary.amp * self.config.simulation_amp;
            self.initial_speed = speed;
            self.initial_amp
        } else {
            self.modes_a.adjust_powers(&mut self.rng);
            self.modes_b.adjust_powers(&mut self.rng);
            self.initial_amp * speed / self.initial_speed
        }
    }

    /// Synthesizes the combined impulse response for `amp` into the
    /// event's owned `ir` buffer and returns its length, or `0` (without
    /// synthesizing anything) if `amp <= 0`.
    pub(crate) fn impulse_response(&mut self, amp: f64) -> usize {
        if amp <= 0.0 {
            self.ir_len = 0;
            return 0;
        }
        let len_a = self.modes_a.sum(self.primary.resonance);
        let len_b = self.modes_b.sum(self.secondary.resonance);
        let combined = add_padded(
            self.modes_a.synth_sound(),
            len_a,
            self.modes_b.synth_sound(),
            len_b,
            &mut self.ir,
        );
        self.ir_len = combined;
        combined
    }

    pub(crate) fn ir(&self) -> &[f64] {
        &self.ir[..self.ir_len]
    }

    pub(crate) fn ir_len(&self) -> usize {
        self.ir_len
    }

    pub(crate) fn record_successful_synthesis(&mut self) {
        self.collision_count += 1;
    }

    pub(crate) fn mark_ended(&mut self) {
        self.state = AudioEventState::End;
    }
}
