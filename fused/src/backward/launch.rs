//! Backward launch: buffer checks, parallel dispatch, dk_f reduction.

use half::f16;
use rayon::prelude::*;

use fftconv_config::ConfigError;
use fftconv_core::{ChannelSpectra, MonarchPlan, SignalPlanes};

use crate::backward::kernel;
use crate::backward::types::{BackwardOutput, DkfPartial};
use crate::checks;

/// Compute both gradients of the forward pass.
///
/// Batch tiles run in parallel; each produces its slice of `dx` and an
/// f32 dk_f partial. Partials are reduced in ascending batch-tile order
/// and narrowed to f16 once, so the result is deterministic across runs
/// and thread counts.
pub fn backward(
    plan: &MonarchPlan,
    x: &SignalPlanes,
    k_f: &ChannelSpectra,
    dout: &SignalPlanes,
) -> Result<BackwardOutput, ConfigError> {
    let config = plan.config();
    checks::check_signal("x", x, config)?;
    checks::check_spectra("k_f", k_f, config)?;
    checks::check_signal("dout", dout, config)?;

    let n = config.transform_size();
    let (batch_tiles, channel_tiles) = config.grid();
    tracing::debug!(batch_tiles, channel_tiles, n, "backward launch");

    let mut dx = SignalPlanes::zeros(config.batch, config.channels, n);
    let chunk = config.batch_tile * config.channels * n;
    let partials: Vec<DkfPartial> = dx
        .re
        .par_chunks_mut(chunk)
        .zip(dx.im.par_chunks_mut(chunk))
        .enumerate()
        .map(|(bt, (re, im))| kernel::run_batch_tile(plan, x, k_f, dout, bt, re, im))
        .collect();

    let mut acc = DkfPartial::zeros(config.channels * n);
    for partial in &partials {
        for i in 0..acc.re.len() {
            acc.re[i] += partial.re[i];
            acc.im[i] += partial.im[i];
        }
    }

    let mut dk_f = ChannelSpectra::zeros(config.channels, n);
    for i in 0..acc.re.len() {
        dk_f.re[i] = f16::from_f32(acc.re[i]);
        dk_f.im[i] = f16::from_f32(acc.im[i]);
    }
    Ok(BackwardOutput { dx, dk_f })
}
