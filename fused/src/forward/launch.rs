//! Forward launch: buffer checks, grid setup, parallel dispatch.

use rayon::prelude::*;

use fftconv_config::ConfigError;
use fftconv_core::{ChannelSpectra, MonarchPlan, SignalPlanes};

use crate::checks;
use crate::forward::kernel;

/// `y[b, h] = ifft(fft(x[b, h]) ∘ k_f[h])` for every sequence.
///
/// `k_f` is the precomputed filter spectrum (see
/// [`MonarchPlan::filter_spectrum`]). Batch tiles run in parallel, each
/// writing a disjoint contiguous slice of the output planes.
pub fn forward(
    plan: &MonarchPlan,
    x: &SignalPlanes,
    k_f: &ChannelSpectra,
) -> Result<SignalPlanes, ConfigError> {
    let config = plan.config();
    checks::check_signal("x", x, config)?;
    checks::check_spectra("k_f", k_f, config)?;

    let n = config.transform_size();
    let (batch_tiles, channel_tiles) = config.grid();
    tracing::debug!(batch_tiles, channel_tiles, n, "forward launch");

    let mut out = SignalPlanes::zeros(config.batch, config.channels, n);
    let chunk = config.batch_tile * config.channels * n;
    out.re
        .par_chunks_mut(chunk)
        .zip(out.im.par_chunks_mut(chunk))
        .enumerate()
        .for_each(|(bt, (re, im))| kernel::run_batch_tile(plan, x, k_f, bt, re, im));
    Ok(out)
}
