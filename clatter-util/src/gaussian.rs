//! Gaussian sampling via the Marsaglia polar (Box-Muller) method.

#[cfg(test)]
mod tests;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Owns a seeded RNG plus the cached second draw of the polar method, so
/// that each caller (an `AudioEvent`, the multiplexer's source-id
/// generator, ...) gets an independent, never-shared stream of samples.
#[derive(Debug, Clone)]
pub struct GaussianSampler {
    rng: Xoshiro256PlusPlus,
    cached: Option<f64>,
}

impl GaussianSampler {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            cached: None,
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_entropy(),
            cached: None,
        }
    }

    /// Exposes the underlying RNG for uniform draws (audio-source ids,
    /// scrape ids) drawn from the same per-owner stream.
    pub fn rng(&mut self) -> &mut Xoshiro256PlusPlus {
        &mut self.rng
    }

    /// Draws one sample from `N(mean, std)`.
    ///
    /// Two uniforms in `(-1, 1)` are drawn until `w = x1^2 + x2^2 < 1`; one
    /// of the two resulting normal deviates is returned immediately and the
    /// other is cached for the very next call.
    pub fn sample(&mut self, mean: f64, std: f64) -> f64 {
        if let Some(cached) = self.cached.take() {
            return mean + std * cached;
        }
        loop {
            let x1: f64 = self.rng.gen_range(-1.0..1.0);
            let x2: f64 = self.rng.gen_range(-1.0..1.0);
            let w = x1 * x1 + x2 * x2;
            if w < 1.0 && w > 0.0 {
                let factor = (-2.0 * w.ln() / w).sqrt();
                self.cached = Some(x2 * factor);
                return mean + std * (x1 * factor);
            }
        }
    }

    /// Draws from `N(mean, std)`, resampling while `pred` rejects the
    /// value. Used for mode-frequency/decay-time floors.
    pub fn sample_while(&mut self, mean: f64, std: f64, mut reject: impl FnMut(f64) -> bool) -> f64 {
        loop {
            let v = self.sample(mean, std);
            if !reject(v) {
                return v;
            }
        }
    }
}
