//! Lanecube - scratch-tile primitives for cooperative transform kernels.
//!
//! This crate provides the building blocks the fused Monarch kernels run on:
//! named complex scratch planes, a deterministic lane-striped bulk-copy
//! contract, and the dense complex small-matrix multiply that realizes one
//! radix stage of the decomposition.
//!
//! # Core abstractions
//!
//! - [`ScratchPlanes`] - a complex buffer as two named half-precision planes
//!   (real, imaginary), the unit of per-tile scratch memory
//! - [`coop`] - cooperative bulk copies: K elements over P lanes, each lane
//!   owning a disjoint fixed-stride slice, coverage complete by construction
//! - [`cmatmul`] - radix-sized complex matrix multiply with f32 accumulation,
//!   operands and results in half precision
//! - [`pointwise`] - elementwise complex multiplies (twiddle application,
//!   spectrum multiply, conjugated gradient accumulation)
//!
//! # Memory model
//!
//! ```text
//! bulk planes ──coop::copy_in──▸ ScratchPlanes ──cmatmul / pointwise──▸ ScratchPlanes
//!      ▲                                                                    │
//!      └───────────────────────coop::copy_out────────────────────────────────┘
//! ```
//!
//! Scratch planes live for one tile's processing window. All arithmetic
//! widens to f32 and narrows back to f16 on store; the matrix multiply
//! accumulates in f32 throughout.

pub mod cmatmul;
pub mod coop;
pub mod planes;
pub mod pointwise;

pub use planes::ScratchPlanes;

pub mod prelude {
    pub use crate::{cmatmul, coop, planes::ScratchPlanes, pointwise};
}
