//! Fused backward convolution.

pub mod kernel;
pub mod launch;
pub mod types;

pub use launch::backward;
pub use types::BackwardOutput;
