//! A streaming median filter over a fixed-size circular window.


/// Streaming median filter over the last `window` samples.
///
/// Until the window fills, the median is taken over the partial prefix
/// seen so far. The median is always computed from a scratch copy, never
/// by sorting the circular buffer in place — doing the latter would
/// corrupt the window's contents for subsequent samples.
#[derive(Debug, Clone)]
pub struct MedianFilter {
    window: usize,
    buf: Vec<f64>,
    filled: usize,
    next: usize,
    scratch: Vec<f64>,
}

impl MedianFilter {
    #[must_use]
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "median filter window must be non-zero");
        Self {
            window,
            buf: vec![0.0; window],
            filled: 0,
            next: 0,
            scratch: Vec::with_capacity(window),
        }
    }

    pub fn reset(&mut self) {
        self.filled = 0;
        self.next = 0;
    }

    /// Pushes `sample` into the window and returns the median of the
    /// window's current contents (the partial prefix if not yet full).
    pub fn push(&mut self, sample: f64) -> f64 {
        self.buf[self.next] = sample;
        self.next = (self.next + 1) % self.window;
        self.filled = (self.filled + 1).min(self.window);

        self.scratch.clear();
        self.scratch.extend_from_slice(&self.buf[..self.filled]);
        self.scratch.sort_by(f64::total_cmp);

        let mid = self.filled / 2;
        if self.filled % 2 == 1 {
            self.scratch[mid]
        } else {
            (self.scratch[mid - 1] + self.scratch[mid]) / 2.0
        }
    }
}
