#![warn(clippy::pedantic)]
#![allow(
    clippy::similar_names,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::doc_markdown,
    //
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    //
    clippy::too_many_lines,
)]

//! Fused FFT convolution kernels.
//!
//! Forward: `y = ifft(fft(x) ∘ k_f)` per (batch, channel) sequence, with
//! the whole pipeline (forward transform, spectrum multiply, inverse
//! transform) fused inside one tile group so intermediates never leave
//! tile scratch. Backward produces the signal gradient and the filter
//! spectrum gradient in the same fused fashion.
//!
//! The (batch, channel) space is partitioned into a 2-D tile grid; batch
//! tiles run in parallel, each owning a disjoint contiguous slice of the
//! output planes.

pub mod backward;
mod checks;
pub mod engine;
pub mod forward;
pub mod scratch;


pub use backward::{BackwardOutput, backward};
pub use forward::forward;
pub use scratch::TileScratch;
