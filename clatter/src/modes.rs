//! Per-object randomized modal parameters and additive sinusoidal
//! synthesis into a reusable buffer.


use clatter_util::numeric::{add_padded, ensure_len};
use clatter_util::GaussianSampler;

use crate::config::{DEFAULT_MODE_COUNT, FRAMERATE};
use crate::material::ImpactMaterialData;

/// One object's randomized modal response: ten frequency/power/decay
/// triples plus the scratch buffers additive synthesis writes into.
#[derive(Debug, Clone)]
pub struct Modes {
    pub frequencies: [f64; DEFAULT_MODE_COUNT],
    pub powers: [f64; DEFAULT_MODE_COUNT],
    /// RT60 decay times, in **milliseconds**.
    pub decay_times: [f64; DEFAULT_MODE_COUNT],
    synth_sound: Vec<f64>,
    synth_len: usize,
    accum_scratch: Vec<f64>,
    mode_scratch: Vec<f64>,
}

impl Modes {
    /// Draws randomized modal parameters from `data`'s center
    /// frequencies/onset powers/RT60 times.
    ///
    /// For each of the ten modes:
    ///  - frequency is `cf + N(0, cf/10)`, resampled until `>= 20` Hz,
    ///  - power is `op + N(0, 10)` dB,
    ///  - decay is `rt + N(0, rt/10)`, resampled until `>= 0.001` s, then
    ///    stored in milliseconds.
    #[must_use]
    pub fn new(data: &ImpactMaterialData, rng: &mut GaussianSampler) -> Self {
        let mut frequencies = [0.0; DEFAULT_MODE_COUNT];
        let mut powers = [0.0; DEFAULT_MODE_COUNT];
        let mut decay_times = [0.0; DEFAULT_MODE_COUNT];
        for m in 0..DEFAULT_MODE_COUNT {
            let cf = data.cf.get(m).copied().unwrap_or(0.0);
            let op = data.op.get(m).copied().unwrap_or(0.0);
            let rt = data.rt.get(m).copied().unwrap_or(0.0);

            frequencies[m] = rng.sample_while(cf, (cf / 10.0).abs(), |f| f < 20.0);
            powers[m] = rng.sample(op, 10.0);
            let decay_s = rng.sample_while(rt, (rt / 10.0).abs(), |t| t < 0.001);
            decay_times[m] = decay_s * 1000.0;
        }
        Self {
            frequencies,
            powers,
            decay_times,
            synth_sound: Vec::new(),
            synth_len: 0,
            accum_scratch: Vec::new(),
            mode_scratch: Vec::new(),
        }
    }

    /// Length of the buffer last written by [`Self::sum`].
    #[must_use]
    pub fn synth_len(&self) -> usize {
        self.synth_len
    }

    /// Borrows the buffer last written by [`Self::sum`], truncated to its
    /// logical length.
    #[must_use]
    pub fn synth_sound(&self) -> &[f64] {
        &self.synth_sound[..self.synth_len]
    }

    fn mode_length(power: f64, decay_ms: f64) -> usize {
        (decay_ms * (80.0 + power) / 60.0 / 1000.0 * FRAMERATE)
            .ceil()
            .max(0.0) as usize
    }

    fn synthesize_mode(&mut self, m: usize, resonance: f64, n: usize) {
        let power = self.powers[m];
        let decay_ms = self.decay_times[m];
        let frequency = self.frequencies[m];
        ensure_len(&mut self.mode_scratch, n);
        let decay_rate_per_sample = if resonance > 0.0 {
            -60.0 / (decay_ms * resonance / 1000.0) / 20.0 / FRAMERATE
        } else {
            f64::NEG_INFINITY
        };
        for j in 0..n {
            let envelope = if decay_rate_per_sample.is_finite() {
                10f64.powf(decay_rate_per_sample * j as f64)
            } else if j == 0 {
                1.0
            } else {
                0.0
            };
            let phase = j as f64 / FRAMERATE * std::f64::consts::TAU * frequency;
            self.mode_scratch[j] = phase.cos() * 10f64.powf(power / 20.0) * envelope;
        }
    }

    /// Synthesizes the additive sum of all ten modes, scaled by
    /// `resonance`, into the instance's own `synth_sound` buffer. Returns
    /// the combined length, which is the max over all (nonzero-length)
    /// individual modes.
    ///
    /// `resonance <= 0` would divide by zero in the decay term; objects
    /// carry `resonance` in `(0, 1]`, but zero is treated as
    /// "decays after the first sample" rather than propagating a NaN.
    pub fn sum(&mut self, resonance: f64) -> usize {
        let mut out_len = 0usize;
        for m in 0..DEFAULT_MODE_COUNT {
            let n = Self::mode_length(self.powers[m], self.decay_times[m]);
            if n == 0 {
                continue;
            }
            self.synthesize_mode(m, resonance, n);
            if out_len == 0 {
                ensure_len(&mut self.synth_sound, n);
                self.synth_sound[..n].copy_from_slice(&self.mode_scratch[..n]);
                out_len = n;
            } else {
                let combined_len =
                    add_padded(&self.synth_sound, out_len, &self.mode_scratch, n, &mut self.accum_scratch);
                std::mem::swap(&mut self.synth_sound, &mut self.accum_scratch);
                out_len = combined_len;
            }
        }
        self.synth_len = out_len;
        out_len
    }

    /// Perturbs every mode's power by `N(0, 2)` dB, so that a repeated
    /// event in a series doesn't synthesize identically.
    pub fn adjust_powers(&mut self, rng: &mut GaussianSampler) {
        for p in &mut self.powers {
            *p += rng.sample(0.0, 2.0);
        }
    }
}
