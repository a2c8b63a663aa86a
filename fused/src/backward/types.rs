//! Backward output types.

use fftconv_core::{ChannelSpectra, SignalPlanes};

/// Gradients produced by one backward launch.
#[derive(Debug, Clone)]
pub struct BackwardOutput {
    /// Signal gradient, same shape as the input signal.
    pub dx: SignalPlanes,
    /// Filter spectrum gradient, summed over the batch.
    pub dk_f: ChannelSpectra,
}

/// One batch tile's contribution to dk_f, `[channels, n]` per plane.
///
/// Partials stay in f32 until the launch has reduced them all; the sum
/// narrows to f16 exactly once.
pub(crate) struct DkfPartial {
    pub re: Vec<f32>,
    pub im: Vec<f32>,
}

impl DkfPartial {
    pub fn zeros(len: usize) -> Self {
        Self {
            re: vec![0.0; len],
            im: vec![0.0; len],
        }
    }
}
