//! Backward tile kernel.
//!
//! Both gradients come out of one fused pass over each sequence. With
//! `W = fft(dout)` and `X = fft(x)`:
//!
//!   dk_f[h] += (1/N) · W ∘ conj(X)        (summed over the batch)
//!   dx      = ifft(conj(k_f[h]) ∘ W)
//!
//! The dk_f contribution is accumulated in f32 before the spectrum
//! multiply overwrites W in place. The conjugated filter spectrum is
//! staged per channel, mirroring the forward path's staging.

use half::f16;

use fftconv_core::{ChannelSpectra, MonarchPlan, SignalPlanes};
use lanecube::coop;
use lanecube::pointwise::{accumulate_conj_product, mul_assign};

use crate::backward::types::DkfPartial;
use crate::engine;
use crate::scratch::TileScratch;

pub(crate) fn run_batch_tile(
    plan: &MonarchPlan,
    x: &SignalPlanes,
    k_f: &ChannelSpectra,
    dout: &SignalPlanes,
    batch_tile_idx: usize,
    dx_re: &mut [f16],
    dx_im: &mut [f16],
) -> DkfPartial {
    let config = plan.config();
    let n = config.transform_size();
    let inv_n = 1.0 / n as f32;
    let channel_tiles = config.channels / config.channel_tile;
    let b0 = batch_tile_idx * config.batch_tile;

    let mut partial = DkfPartial::zeros(config.channels * n);

    for ct in 0..channel_tiles {
        let mut scratch = TileScratch::new(plan);
        let lanes = scratch.lanes();

        for h_local in 0..config.channel_tile {
            let h = ct * config.channel_tile + h_local;
            let (k_re, k_im) = k_f.channel(h);
            coop::copy_in_conj(&mut scratch.spectrum, k_re, k_im, lanes);
            let acc_re = &mut partial.re[h * n..(h + 1) * n];
            let acc_im = &mut partial.im[h * n..(h + 1) * n];

            for b_local in 0..config.batch_tile {
                let b = b0 + b_local;

                let (x_re, x_im) = x.seq(b, h);
                coop::copy_in(&mut scratch.aux, x_re, x_im, lanes);
                engine::forward_transform(&mut scratch.levels, &mut scratch.aux, lanes);

                let (g_re, g_im) = dout.seq(b, h);
                coop::copy_in(&mut scratch.signal, g_re, g_im, lanes);
                engine::forward_transform(&mut scratch.levels, &mut scratch.signal, lanes);

                // dk_f first: the spectrum multiply clobbers W in place.
                accumulate_conj_product(acc_re, acc_im, &scratch.signal, &scratch.aux, inv_n);

                mul_assign(&mut scratch.signal, &scratch.spectrum);
                engine::inverse_transform(&mut scratch.levels, &mut scratch.signal, lanes);

                let start = (b_local * config.channels + h) * n;
                coop::copy_out(
                    &mut dx_re[start..start + n],
                    &mut dx_im[start..start + n],
                    &scratch.signal,
                    lanes,
                );
            }
        }
    }
    partial
}
