//! Fused forward convolution.

pub mod kernel;
pub mod launch;

pub use launch::forward;
