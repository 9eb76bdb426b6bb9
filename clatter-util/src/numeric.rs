//! Evenly spaced ramps, bounded convolution, and additive combination.

#[cfg(test)]
mod tests;

/// Grows `buf` to at least `len` elements, doubling its current length to
/// amortize the cost of repeated growth in the steady state (the same
/// discipline every hot-path buffer in the engine follows).
pub fn ensure_len(buf: &mut Vec<f64>, len: usize) {
    if buf.len() < len {
        let grown = (buf.len() * 2).max(len);
        buf.resize(grown, 0.0);
    }
}

/// Error returned by [`linspace`] when fewer than two steps are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooFewSteps(pub usize);

impl std::fmt::Display for TooFewSteps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "linspace requires at least 2 steps, got {}", self.0)
    }
}

impl std::error::Error for TooFewSteps {}

/// Writes `steps` evenly spaced values from `a` to `b` (inclusive) into
/// `out`, growing `out` in place if it's too short. `out[steps..]` is left
/// untouched and must not be read by the caller.
///
/// # Errors
///
/// Returns [`TooFewSteps`] if `steps < 2`, leaving `out` unchanged.
pub fn linspace(a: f64, b: f64, steps: usize, out: &mut Vec<f64>) -> Result<(), TooFewSteps> {
    if steps < 2 {
        return Err(TooFewSteps(steps));
    }
    ensure_len(out, steps);
    let step = (b - a) / (steps - 1) as f64;
    for (i, slot) in out[..steps].iter_mut().enumerate() {
        *slot = a + step * i as f64;
    }
    out[steps - 1] = b;
    Ok(())
}

/// Computes the truncated/extended discrete convolution of `signal` and
/// `kernel`, writing exactly `out_len` samples into `out` (growing it if
/// needed). `out[i] = sum_j signal[i - j] * kernel[j]` over the valid index
/// range; there is no circular wrap-around, so `out_len` may be shorter or
/// longer than the natural `len(signal) + len(kernel) - 1`.
pub fn convolve(signal: &[f64], kernel: &[f64], out_len: usize, out: &mut Vec<f64>) {
    ensure_len(out, out_len);
    if signal.is_empty() || kernel.is_empty() {
        out[..out_len].fill(0.0);
        return;
    }
    for i in 0..out_len {
        let mut acc = 0.0;
        // j must satisfy 0 <= j < kernel.len() and 0 <= i - j < signal.len().
        let j_lo = i.saturating_sub(signal.len() - 1);
        let j_hi = (i + 1).min(kernel.len());
        for j in j_lo..j_hi {
            acc += signal[i - j] * kernel[j];
        }
        out[i] = acc;
    }
}

/// Additively combines two (possibly different-length) signals: the result
/// length is `max(a_len, b_len)`, and each sample is the sum of both inputs
/// where both are defined, or just the longer signal's sample elsewhere.
/// Returns the combined length. `out` is grown in place if needed.
pub fn add_padded(a: &[f64], a_len: usize, b: &[f64], b_len: usize, out: &mut Vec<f64>) -> usize {
    let out_len = a_len.max(b_len);
    ensure_len(out, out_len);
    for i in 0..out_len {
        let av = a.get(i).copied().filter(|_| i < a_len).unwrap_or(0.0);
        let bv = b.get(i).copied().filter(|_| i < b_len).unwrap_or(0.0);
        out[i] = av + bv;
    }
    out_len
}
