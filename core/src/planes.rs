//! Bulk half-precision buffers.
//!
//! Signals and spectra live in planar layout: one contiguous real plane
//! and one imaginary plane, each `[batch, channels, n]` (or `[channels, n]`
//! for per-channel spectra) in row-major order. Planar storage lets the
//! tile kernels stage either plane with a single striped copy.

use half::f16;
use num_complex::Complex64;

/// A batch of complex signals, `[batch, channels, n]` per plane.
#[derive(Debug, Clone)]
pub struct SignalPlanes {
    pub batch: usize,
    pub channels: usize,
    pub n: usize,
    pub re: Vec<f16>,
    pub im: Vec<f16>,
}

impl SignalPlanes {
    /// Zero-initialized planes.
    #[must_use]
    pub fn zeros(batch: usize, channels: usize, n: usize) -> Self {
        let len = batch * channels * n;
        Self {
            batch,
            channels,
            n,
            re: vec![f16::ZERO; len],
            im: vec![f16::ZERO; len],
        }
    }

    /// Total complex elements across all sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.re.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    /// Start of the sequence for batch element `b`, channel `h`.
    #[must_use]
    pub fn offset(&self, b: usize, h: usize) -> usize {
        debug_assert!(b < self.batch && h < self.channels);
        (b * self.channels + h) * self.n
    }

    /// Borrow one sequence as `(re, im)` slices.
    #[must_use]
    pub fn seq(&self, b: usize, h: usize) -> (&[f16], &[f16]) {
        let start = self.offset(b, h);
        (
            &self.re[start..start + self.n],
            &self.im[start..start + self.n],
        )
    }

    /// Mutably borrow one sequence as `(re, im)` slices.
    pub fn seq_mut(&mut self, b: usize, h: usize) -> (&mut [f16], &mut [f16]) {
        let start = self.offset(b, h);
        (
            &mut self.re[start..start + self.n],
            &mut self.im[start..start + self.n],
        )
    }

    /// Overwrite one sequence from f64 complex values, narrowing once.
    pub fn set_seq(&mut self, b: usize, h: usize, values: &[Complex64]) {
        assert_eq!(values.len(), self.n);
        let start = self.offset(b, h);
        for (i, v) in values.iter().enumerate() {
            self.re[start + i] = f16::from_f64(v.re);
            self.im[start + i] = f16::from_f64(v.im);
        }
    }

    /// Widen one sequence to f64 complex values.
    #[must_use]
    pub fn seq_complex(&self, b: usize, h: usize) -> Vec<Complex64> {
        let (re, im) = self.seq(b, h);
        re.iter()
            .zip(im)
            .map(|(r, i)| Complex64::new(r.to_f64(), i.to_f64()))
            .collect()
    }
}

/// Per-channel complex spectra, `[channels, n]` per plane.
///
/// Holds the precomputed filter spectrum on the way into the kernels and
/// the accumulated filter gradient on the way out.
#[derive(Debug, Clone)]
pub struct ChannelSpectra {
    pub channels: usize,
    pub n: usize,
    pub re: Vec<f16>,
    pub im: Vec<f16>,
}

impl ChannelSpectra {
    #[must_use]
    pub fn zeros(channels: usize, n: usize) -> Self {
        let len = channels * n;
        Self {
            channels,
            n,
            re: vec![f16::ZERO; len],
            im: vec![f16::ZERO; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.re.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    /// Borrow one channel as `(re, im)` slices.
    #[must_use]
    pub fn channel(&self, h: usize) -> (&[f16], &[f16]) {
        debug_assert!(h < self.channels);
        let start = h * self.n;
        (
            &self.re[start..start + self.n],
            &self.im[start..start + self.n],
        )
    }

    /// Mutably borrow one channel as `(re, im)` slices.
    pub fn channel_mut(&mut self, h: usize) -> (&mut [f16], &mut [f16]) {
        debug_assert!(h < self.channels);
        let start = h * self.n;
        (
            &mut self.re[start..start + self.n],
            &mut self.im[start..start + self.n],
        )
    }

    /// Overwrite one channel from f64 complex values, narrowing once.
    pub fn set_channel(&mut self, h: usize, values: &[Complex64]) {
        assert_eq!(values.len(), self.n);
        let start = h * self.n;
        for (i, v) in values.iter().enumerate() {
            self.re[start + i] = f16::from_f64(v.re);
            self.im[start + i] = f16::from_f64(v.im);
        }
    }

    /// Widen one channel to f64 complex values.
    #[must_use]
    pub fn channel_complex(&self, h: usize) -> Vec<Complex64> {
        let (re, im) = self.channel(h);
        re.iter()
            .zip(im)
            .map(|(r, i)| Complex64::new(r.to_f64(), i.to_f64()))
            .collect()
    }
}
