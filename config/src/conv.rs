//! Kernel configuration and validation.
//!
//! All shape and tiling errors are caught here, once, before any kernel
//! runs. The kernels themselves trust the configuration and perform no
//! per-element checks.

use serde::{Deserialize, Serialize};

use crate::types::Factorization;

/// Scratch budget per tile group, in complex elements.
///
/// Caps the staged state of one tile group the way on-chip shared memory
/// would on an accelerator: a tile whose staged state does not fit is
/// rejected at configuration time, never mid-computation.
pub const SCRATCH_BUDGET_ELEMS: usize = 128 * 1024;

/// Default lane count of a tile group.
pub const DEFAULT_LANES: usize = 128;

/// Configuration for one forward/backward invocation.
///
/// `batch_tile` and `channel_tile` partition the (batch, channel) space
/// into the 2-D tile grid; each tile is processed by one isolated group.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FftConvConfig {
    pub factorization: Factorization,
    /// Batch count B.
    pub batch: usize,
    /// Channel count H.
    pub channels: usize,
    /// Signal length. The complex kernels require this to equal N.
    pub signal_size: usize,
    /// Batch elements per tile.
    pub batch_tile: usize,
    /// Channels per tile.
    pub channel_tile: usize,
    /// Cooperative lanes per tile group.
    pub lanes: usize,
}

impl FftConvConfig {
    /// Build a configuration with tile sizes chosen to divide the workload.
    #[must_use]
    pub fn new(factorization: Factorization, batch: usize, channels: usize) -> Self {
        Self {
            factorization,
            batch,
            channels,
            signal_size: factorization.transform_size(),
            batch_tile: largest_divisor_up_to(batch, 4),
            channel_tile: largest_divisor_up_to(channels, 2),
            lanes: DEFAULT_LANES.min(factorization.transform_size()),
        }
    }

    /// Build a configuration from a raw transform length.
    pub fn for_transform_size(
        n: usize,
        batch: usize,
        channels: usize,
    ) -> Result<Self, ConfigError> {
        let factorization = Factorization::for_transform_size(n)
            .ok_or(ConfigError::UnsupportedTransformSize { n })?;
        Ok(Self::new(factorization, batch, channels))
    }

    /// Override the tile sizes.
    #[must_use]
    pub fn with_tiles(mut self, batch_tile: usize, channel_tile: usize) -> Self {
        self.batch_tile = batch_tile;
        self.channel_tile = channel_tile;
        self
    }

    /// Override the lane count.
    #[must_use]
    pub fn with_lanes(mut self, lanes: usize) -> Self {
        self.lanes = lanes;
        self
    }

    /// Transform length N.
    #[must_use]
    pub fn transform_size(&self) -> usize {
        self.factorization.transform_size()
    }

    /// Tile grid dimensions: (batch tiles, channel tiles).
    #[must_use]
    pub fn grid(&self) -> (usize, usize) {
        (self.batch / self.batch_tile, self.channels / self.channel_tile)
    }

    /// Complex elements of scratch one tile group needs in the worst case
    /// (the backward kernel, which stages two sequences plus the gradient
    /// accumulator alongside the tables).
    #[must_use]
    pub fn scratch_complex_elems(&self) -> usize {
        let n = self.transform_size();
        let radices = self.factorization.radices();

        // dout, x, k_f, dk_f accumulator.
        let sequences = 4 * n;
        // Forward and inverse stage matrices.
        let matrices = 2 * radices.iter().map(|r| r * r).sum::<usize>();
        // Forward and inverse coarse twiddle tables, one per non-leaf level,
        // sized to that level's sub-transform length.
        let mut twiddles = 0;
        let mut level_len = n;
        for &r in &radices[..radices.len() - 1] {
            twiddles += 2 * level_len;
            level_len /= r;
        }
        // Engine ping buffers, one per level.
        let mut work = 0;
        let mut len = n;
        for &r in radices {
            work += len;
            len /= r;
        }
        sequences + matrices + twiddles + work
    }

    /// Reject invalid configurations before any computation runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.transform_size();

        for (dim, size) in [
            ("batch", self.batch),
            ("channels", self.channels),
            ("batch_tile", self.batch_tile),
            ("channel_tile", self.channel_tile),
            ("lanes", self.lanes),
        ] {
            if size == 0 {
                return Err(ConfigError::ZeroDim { dim });
            }
        }

        if self.signal_size != n {
            return Err(ConfigError::SignalSizeMismatch {
                signal_size: self.signal_size,
                n,
            });
        }
        if self.batch % self.batch_tile != 0 {
            return Err(ConfigError::TileIndivisible {
                dim: "batch",
                size: self.batch,
                tile: self.batch_tile,
            });
        }
        if self.channels % self.channel_tile != 0 {
            return Err(ConfigError::TileIndivisible {
                dim: "channels",
                size: self.channels,
                tile: self.channel_tile,
            });
        }
        if self.lanes > n || n % self.lanes != 0 {
            return Err(ConfigError::LaneIndivisible {
                n,
                lanes: self.lanes,
            });
        }

        let required = self.scratch_complex_elems();
        if required > SCRATCH_BUDGET_ELEMS {
            return Err(ConfigError::ScratchBudgetExceeded {
                required,
                budget: SCRATCH_BUDGET_ELEMS,
            });
        }

        Ok(())
    }
}

fn largest_divisor_up_to(size: usize, cap: usize) -> usize {
    (1..=cap.min(size)).rev().find(|d| size % d == 0).unwrap_or(1)
}

/// Configuration-time failures. There is no in-kernel error taxonomy;
/// every invalid invocation is rejected here or in the launch layer's
/// buffer checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("transform size {n} is not a supported radix product (256, 4096, 16384)")]
    UnsupportedTransformSize { n: usize },

    #[error("{dim} must be non-zero")]
    ZeroDim { dim: &'static str },

    #[error("signal_size {signal_size} must equal the transform size {n} for the complex kernels")]
    SignalSizeMismatch { signal_size: usize, n: usize },

    #[error("{dim} ({size}) is not divisible by its tile size ({tile})")]
    TileIndivisible {
        dim: &'static str,
        size: usize,
        tile: usize,
    },

    #[error("lane count {lanes} must divide the transform size {n}")]
    LaneIndivisible { n: usize, lanes: usize },

    #[error("tile scratch needs {required} complex elements, budget is {budget}")]
    ScratchBudgetExceeded { required: usize, budget: usize },

    #[error("buffer '{buffer}' has {actual} elements, expected {expected}")]
    BufferSizeMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
}
