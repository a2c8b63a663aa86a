//! Named complex scratch planes.

use half::f16;

/// A complex scratch buffer as two named half-precision planes.
///
/// Each staged quantity (sequence, matrix, twiddle table, spectrum) gets
/// its own typed pair of planes rather than an offset into one flat
/// allocation.
#[derive(Debug, Clone)]
pub struct ScratchPlanes {
    pub re: Vec<f16>,
    pub im: Vec<f16>,
}

impl ScratchPlanes {
    /// Zero-initialized planes holding `len` complex elements.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
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

    /// Read one complex element, widened to f32.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize) -> (f32, f32) {
        (self.re[i].to_f32(), self.im[i].to_f32())
    }

    /// Store one complex element, narrowed to f16.
    #[inline]
    pub fn set(&mut self, i: usize, re: f32, im: f32) {
        self.re[i] = f16::from_f32(re);
        self.im[i] = f16::from_f32(im);
    }

    /// Overwrite every element with zero.
    pub fn clear(&mut self) {
        self.re.fill(f16::ZERO);
        self.im.fill(f16::ZERO);
    }

    /// Build planes from f64 complex values, narrowing once.
    #[must_use]
    pub fn from_f64(values: &[(f64, f64)]) -> Self {
        Self {
            re: values.iter().map(|&(re, _)| f16::from_f64(re)).collect(),
            im: values.iter().map(|&(_, im)| f16::from_f64(im)).collect(),
        }
    }

    /// Widen the whole buffer to f32 pairs (test and staging helper).
    #[must_use]
    pub fn to_f32_pairs(&self) -> Vec<(f32, f32)> {
        self.re
            .iter()
            .zip(&self.im)
            .map(|(re, im)| (re.to_f32(), im.to_f32()))
            .collect()
    }
}
