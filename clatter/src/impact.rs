//! One-shot impact hit synthesis: impulse response convolved with a
//! half-sine contact force, two-pass normalization, amplitude clamp, and
//! inter-hit rate limiting.


use std::sync::Arc;
use std::time::{Duration, Instant};

use clatter_util::numeric::{convolve, ensure_len, linspace};

use crate::config::EngineConfig;
use crate::event::{AudioEvent, AudioEventState};
use crate::material::MaterialCatalog;
use crate::object::ObjectDescriptor;

/// One impact series between a fixed pair of objects.
pub struct ImpactEvent {
    event: AudioEvent,
    last_hit: Option<Instant>,
    force: Vec<f64>,
}

impl ImpactEvent {
    /// Default sample-buffer size: one second at the engine framerate,
    /// comfortably larger than any single hit's convolved length.
    pub const DEFAULT_BUFFER_LEN: usize = 44_100;

    pub fn new(
        primary: ObjectDescriptor,
        secondary: ObjectDescriptor,
        catalog: &MaterialCatalog,
        config: Arc<EngineConfig>,
        rng_seed: u64,
    ) -> Result<Self, crate::event::EventError> {
        let (modes_a, modes_b) = AudioEvent::build_modes(&primary, &secondary, catalog, rng_seed)?;
        let event = AudioEvent::new(
            primary,
            secondary,
            modes_a,
            modes_b,
            config,
            Self::DEFAULT_BUFFER_LEN,
            rng_seed.wrapping_add(1),
        );
        Ok(Self {
            event,
            last_hit: None,
            force: Vec::new(),
        })
    }

    #[must_use]
    pub fn state(&self) -> AudioEventState {
        self.event.state()
    }

    #[must_use]
    pub fn samples(&self) -> &[f64] {
        self.event.samples_f64()
    }

    /// Synthesizes one hit for the given contact speed. Returns `false` if
    /// rate-gated, if the series has timed out (which also transitions the
    /// event to `End`), or if the resulting impulse response is empty
    ///.
    pub fn get_audio(&mut self, speed: f64) -> bool {
        if self.event.collision_count() > 0 {
            let elapsed = self.last_hit.map_or(Duration::ZERO, |t| t.elapsed());
            if elapsed < self.event.config.min_time_between_impacts {
                return false;
            }
            if elapsed > self.event.config.max_time_between_impacts {
                self.event.mark_ended();
                return false;
            }
        }

        let mut amp = self.event.adjust_modes(speed);
        let ir_len = self.event.impulse_response(amp);
        if ir_len == 0 {
            return false;
        }

        let mut tau = 0.001 * self.event.primary.mass.min(self.event.secondary.mass);
        if self.event.config.clamp_contact_time {
            tau = tau.min(2e-3);
        }
        let n = ((tau * crate::config::FRAMERATE).ceil() as usize).max(2);
        ensure_len(&mut self.force, n);
        linspace(0.0, std::f64::consts::PI, n, &mut self.force)
            .expect("n is clamped to at least 2");
        for v in &mut self.force[..n] {
            *v = v.sin();
        }

        if self.event.config.prevent_distortion && amp > 0.99 {
            amp = 0.99;
        }

        {
            let ir = self.event.ir().to_vec();
            let samples = self.event.sample_buffer_mut();
            convolve(&ir, &self.force[..n], ir_len, samples);
        }

        normalize_in_place(self.event.sample_buffer_mut(), ir_len, amp);

        self.event.set_sample_len(ir_len);
        self.last_hit = Some(Instant::now());
        self.event.record_successful_synthesis();
        true
    }
}

/// Two-pass normalization: first divide by the signed maximum (not its
/// absolute value), so the loudest sample lands at exactly `+1` and the
/// whole buffer flips sign if that extremum was negative, then rescale by
/// the post-division absolute maximum so the result peaks at `amp`.
/// Either pass is skipped (leaving the samples untouched) if its divisor
/// is effectively zero, so silence never turns into NaN.
fn normalize_in_place(samples: &mut [f64], len: usize, amp: f64) {
    let region = &mut samples[..len];
    let signed_max = region.iter().copied().fold(f64::MIN, f64::max);
    if signed_max.abs() > f64::EPSILON {
        for s in region.iter_mut() {
            *s /= signed_max;
        }
    }
    let abs_max = region.iter().fold(0.0_f64, |m, &s| m.max(s.abs()));
    if abs_max > f64::EPSILON {
        for s in region.iter_mut() {
            *s = amp * *s / abs_max;
        }
    }
}
