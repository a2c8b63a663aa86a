//! Per-tile scratch state.
//!
//! Each tile group owns one `TileScratch`: the staged decomposition
//! tables, per-level work buffers for the recursion, and the sequence
//! buffers the kernels transform in place. Everything is staged through
//! the cooperative lane copies, so a tile's scratch is populated the same
//! way regardless of how its lanes are driven.

use lanecube::ScratchPlanes;
use lanecube::coop;

use fftconv_core::{LevelTables, MonarchPlan};

/// Tables and work buffers for one recursion level, staged into the tile.
pub struct StagedLevel {
    pub radix: usize,
    pub len: usize,
    pub fwd_matrix: ScratchPlanes,
    pub inv_matrix: ScratchPlanes,
    pub fwd_twiddle: Option<ScratchPlanes>,
    pub inv_twiddle: Option<ScratchPlanes>,
    /// Gathered column for the sub-transform, `len / radix` elements.
    pub col: ScratchPlanes,
    /// Stage matmul output, `len` elements.
    pub out: ScratchPlanes,
}

impl StagedLevel {
    fn stage(tables: &LevelTables, lanes: usize) -> Self {
        let r = tables.radix;
        let mut fwd_matrix = ScratchPlanes::new(r * r);
        let mut inv_matrix = ScratchPlanes::new(r * r);
        coop::copy_in(&mut fwd_matrix, &tables.fwd_matrix.re, &tables.fwd_matrix.im, lanes);
        coop::copy_in(&mut inv_matrix, &tables.inv_matrix.re, &tables.inv_matrix.im, lanes);

        let stage_twiddle = |t: &Option<ScratchPlanes>| {
            t.as_ref().map(|t| {
                let mut staged = ScratchPlanes::new(t.len());
                coop::copy_in(&mut staged, &t.re, &t.im, lanes);
                staged
            })
        };

        Self {
            radix: r,
            len: tables.len,
            fwd_matrix,
            inv_matrix,
            fwd_twiddle: stage_twiddle(&tables.fwd_twiddle),
            inv_twiddle: stage_twiddle(&tables.inv_twiddle),
            col: ScratchPlanes::new(tables.tail()),
            out: ScratchPlanes::new(tables.len),
        }
    }
}

/// All scratch one tile group needs.
pub struct TileScratch {
    /// The sequence being transformed (x on the forward path, dout on the
    /// backward path).
    pub signal: ScratchPlanes,
    /// The staged filter spectrum for the current channel (conjugated on
    /// the backward path).
    pub spectrum: ScratchPlanes,
    /// Second sequence buffer; the backward path stages and transforms
    /// the signal here while `signal` carries the output gradient.
    pub aux: ScratchPlanes,
    /// Staged tables and work buffers, outermost level first.
    pub levels: Vec<StagedLevel>,
    lanes: usize,
}

impl TileScratch {
    /// Stage the plan's tables for one tile group.
    #[must_use]
    pub fn new(plan: &MonarchPlan) -> Self {
        let n = plan.transform_size();
        let lanes = plan.config().lanes;
        Self {
            signal: ScratchPlanes::new(n),
            spectrum: ScratchPlanes::new(n),
            aux: ScratchPlanes::new(n),
            levels: plan
                .levels()
                .iter()
                .map(|tables| StagedLevel::stage(tables, lanes))
                .collect(),
            lanes,
        }
    }

    #[must_use]
    pub fn lanes(&self) -> usize {
        self.lanes
    }
}
