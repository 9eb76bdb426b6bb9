//! Continuous, chunked scrape synthesis: interpolated surface-derivative
//! force terms, median-filtered vertical component, convolution with a
//! cached impulse response, and roughness scaling.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use rand::Rng;

use clatter_util::numeric::{convolve, linspace};
use clatter_util::{InterpHint, MedianFilter};

use crate::config::{EngineConfig, SCRAPE_SAMPLES_PER_CHUNK, SCRAPE_SURFACE_PITCH_M};
use crate::event::{AudioEvent, AudioEventState};
use crate::material::{MaterialCatalog, ScrapeMaterialData};
use crate::object::ObjectDescriptor;

/// Setup-time error constructing a [`ScrapeEvent`]: the catalog has no
/// impact data for either participant, or the secondary object carries no
/// scrape material at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeSetupError {
    NoScrapeMaterial,
    MissingImpactMaterial,
}

impl std::fmt::Display for ScrapeSetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeSetupError::NoScrapeMaterial => {
                write!(f, "secondary object has no scrape material")
            }
            ScrapeSetupError::MissingImpactMaterial => write!(f, "no impact material data loaded"),
        }
    }
}

impl std::error::Error for ScrapeSetupError {}

/// One continuous-scrape series between a fixed pair of objects.
pub struct ScrapeEvent {
    event: AudioEvent,
    surface: Arc<ScrapeMaterialData>,
    scrape_id: u64,
    scrape_idx: usize,
    ir_cached: bool,
    aux_linspace: Vec<f64>,
    chunk_linspace: Vec<f64>,
    median: MedianFilter,
}

impl ScrapeEvent {
    const MEDIAN_WINDOW: usize = 5;

    pub fn new(
        primary: ObjectDescriptor,
        secondary: ObjectDescriptor,
        catalog: &MaterialCatalog,
        config: Arc<EngineConfig>,
        rng_seed: u64,
    ) -> Result<Self, ScrapeSetupError> {
        let scrape_material = secondary
            .scrape_material
            .ok_or(ScrapeSetupError::NoScrapeMaterial)?;
        let surface = catalog
            .get_scrape(scrape_material)
            .ok_or(ScrapeSetupError::NoScrapeMaterial)?;

        let (modes_a, modes_b) = AudioEvent::build_modes(&primary, &secondary, catalog, rng_seed)
            .map_err(|_| ScrapeSetupError::MissingImpactMaterial)?;
        let mut event = AudioEvent::new(
            primary,
            secondary,
            modes_a,
            modes_b,
            config,
            SCRAPE_SAMPLES_PER_CHUNK,
            rng_seed.wrapping_add(1),
        );
        let scrape_id = event.rng().rng().gen();

        let mut chunk_linspace = Vec::new();
        linspace(0.0, 1.0, SCRAPE_SAMPLES_PER_CHUNK, &mut chunk_linspace)
            .expect("chunk length is a compile-time constant >= 2");

        Ok(Self {
            event,
            surface,
            scrape_id,
            scrape_idx: 0,
            ir_cached: false,
            aux_linspace: Vec::new(),
            chunk_linspace,
            median: MedianFilter::new(Self::MEDIAN_WINDOW),
        })
    }

    #[must_use]
    pub fn scrape_id(&self) -> u64 {
        self.scrape_id
    }

    #[must_use]
    pub fn state(&self) -> AudioEventState {
        self.event.state()
    }

    #[must_use]
    pub fn samples(&self) -> &[f64] {
        self.event.samples_f64()
    }

    /// Transitions out of `Start` once the multiplexer has emitted the
    /// series' `scrape-start` callback.
    pub(crate) fn mark_ongoing(&mut self) {
        self.event.state = AudioEventState::Ongoing;
    }

    /// Synthesizes one `SCRAPE_SAMPLES_PER_CHUNK`-sample chunk for the
    /// given scrape speed, or returns `false` if the speed maps to too few
    /// or too many surface points, or the cached impulse response turns
    /// out empty on the first call.
    pub fn get_audio(&mut self, speed: f64) -> bool {
        let scrape_max_speed = self.event.config.scrape_max_speed;
        let v = speed.min(scrape_max_speed);
        let num_pts = (v / 10.0 / SCRAPE_SURFACE_PITCH_M).floor() as i64 + 1;
        if num_pts <= 1 || num_pts as usize >= self.surface.d2sdx2.len() {
            // A speed mapping to too few or too many surface points ends
            // the series rather than just skipping a chunk.
            self.event.mark_ended();
            return false;
        }
        let num_pts = num_pts as usize;

        if !self.ir_cached {
            let amp = self.event.adjust_modes(speed);
            let ir_len = self.event.impulse_response(amp);
            if ir_len == 0 {
                self.event.mark_ended();
                return false;
            }
            self.ir_cached = true;
        }

        let mut final_idx = self.scrape_idx + num_pts;
        linspace(0.0, 1.0, num_pts, &mut self.aux_linspace)
            .expect("num_pts > 1 checked above");

        if final_idx >= self.surface.dsdx.len() {
            self.scrape_idx = 0;
            final_idx = num_pts;
        }

        let vertical_k = 0.5 * (v / scrape_max_speed).powi(2);
        let horizontal_k = 0.05 * (v / scrape_max_speed);
        let curve_mass = 10.0 * self.event.primary.mass;

        let mut h_hint = InterpHint::new();
        let mut v_hint = InterpHint::new();
        self.median.reset();

        let mut force = vec![0.0; SCRAPE_SAMPLES_PER_CHUNK];
        let dsdx = &self.surface.dsdx;
        let d2sdx2 = &self.surface.d2sdx2;
        let aux = &self.aux_linspace[..num_pts];
        // d2sdx2 is one element shorter than dsdx, so scrape_idx/final_idx
        // (bounded against dsdx) can land one past its last valid index;
        // clamp rather than let that edge panic.
        let d2_idx = self.scrape_idx.min(d2sdx2.len() - 1);
        let d2_final = final_idx.min(d2sdx2.len() - 1);
        for i in 0..SCRAPE_SAMPLES_PER_CHUNK {
            let x = self.chunk_linspace[i];
            let h = horizontal_k
                * h_hint.query(
                    x,
                    aux,
                    dsdx,
                    dsdx[self.scrape_idx],
                    dsdx[final_idx],
                    self.scrape_idx,
                    num_pts,
                );
            let raw_v = v_hint.query(
                x,
                aux,
                d2sdx2,
                d2sdx2[d2_idx],
                d2sdx2[d2_final],
                d2_idx,
                num_pts,
            );
            let vertical = vertical_k * self.median.push((raw_v / curve_mass).tanh());
            force[i] = h + vertical;
        }

        {
            let ir = self.event.ir().to_vec();
            let samples = self.event.sample_buffer_mut();
            convolve(&ir, &force, SCRAPE_SAMPLES_PER_CHUNK, samples);
        }
        let roughness = self.surface.roughness_ratio;
        for s in &mut self.event.sample_buffer_mut()[..SCRAPE_SAMPLES_PER_CHUNK] {
            *s *= roughness;
        }

        self.scrape_idx = final_idx;
        self.event.set_sample_len(SCRAPE_SAMPLES_PER_CHUNK);
        true
    }
}
