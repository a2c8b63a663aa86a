//! Forward tile kernel.
//!
//! One batch-tile row at a time: for each channel tile, a fresh tile
//! group stages the tables once, then re-stages the filter spectrum per
//! channel and runs the fused pipeline (forward transform, spectrum
//! multiply, inverse transform) per batch element. Output sequences go
//! straight from tile scratch to this row's slice of the output planes.

use half::f16;

use fftconv_core::{ChannelSpectra, MonarchPlan, SignalPlanes};
use lanecube::coop;
use lanecube::pointwise::mul_assign;

use crate::engine;
use crate::scratch::TileScratch;

pub fn run_batch_tile(
    plan: &MonarchPlan,
    x: &SignalPlanes,
    k_f: &ChannelSpectra,
    batch_tile_idx: usize,
    out_re: &mut [f16],
    out_im: &mut [f16],
) {
    let config = plan.config();
    let n = config.transform_size();
    let channel_tiles = config.channels / config.channel_tile;
    let b0 = batch_tile_idx * config.batch_tile;

    for ct in 0..channel_tiles {
        let mut scratch = TileScratch::new(plan);
        let lanes = scratch.lanes();

        for h_local in 0..config.channel_tile {
            let h = ct * config.channel_tile + h_local;
            let (k_re, k_im) = k_f.channel(h);
            coop::copy_in(&mut scratch.spectrum, k_re, k_im, lanes);

            for b_local in 0..config.batch_tile {
                let b = b0 + b_local;
                let (x_re, x_im) = x.seq(b, h);
                coop::copy_in(&mut scratch.signal, x_re, x_im, lanes);

                engine::forward_transform(&mut scratch.levels, &mut scratch.signal, lanes);
                mul_assign(&mut scratch.signal, &scratch.spectrum);
                engine::inverse_transform(&mut scratch.levels, &mut scratch.signal, lanes);

                let start = (b_local * config.channels + h) * n;
                coop::copy_out(
                    &mut out_re[start..start + n],
                    &mut out_im[start..start + n],
                    &scratch.signal,
                    lanes,
                );
            }
        }
    }
}
