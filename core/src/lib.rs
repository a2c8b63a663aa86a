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

//! FFT Convolution Core
//!
//! This crate provides:
//! - `MonarchPlan` - precomputed stage matrices and twiddle tables
//! - `SignalPlanes`, `ChannelSpectra` - bulk half-precision buffers
//! - `reference` - f64 reference transforms and gradients for validation

pub mod plan;
pub mod planes;
pub mod reference;
pub mod test_utils;

pub use fftconv_config::{ConfigError, Factorization, FftConvConfig};
pub use plan::{LevelTables, MonarchPlan};
pub use planes::{ChannelSpectra, SignalPlanes};
