//! Launch-time buffer shape checks.
//!
//! The kernels index without bounds reasoning of their own, so every
//! buffer is checked against the configuration here, once per launch.

use fftconv_config::{ConfigError, FftConvConfig};
use fftconv_core::{ChannelSpectra, SignalPlanes};

pub(crate) fn check_signal(
    buffer: &'static str,
    planes: &SignalPlanes,
    config: &FftConvConfig,
) -> Result<(), ConfigError> {
    let expected = config.batch * config.channels * config.transform_size();
    if planes.batch != config.batch
        || planes.channels != config.channels
        || planes.n != config.transform_size()
        || planes.len() != expected
    {
        return Err(ConfigError::BufferSizeMismatch {
            buffer,
            expected,
            actual: planes.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_spectra(
    buffer: &'static str,
    spectra: &ChannelSpectra,
    config: &FftConvConfig,
) -> Result<(), ConfigError> {
    let expected = config.channels * config.transform_size();
    if spectra.channels != config.channels
        || spectra.n != config.transform_size()
        || spectra.len() != expected
    {
        return Err(ConfigError::BufferSizeMismatch {
            buffer,
            expected,
            actual: spectra.len(),
        });
    }
    Ok(())
}
