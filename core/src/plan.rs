//! Precomputed decomposition tables.
//!
//! A plan fixes one configuration and carries, per recursion level, the
//! dense radix stage matrices and the coarse twiddle tables, built once
//! in f64 and narrowed once to f16. The kernels stage these planes into
//! tile scratch and never recompute a root of unity.

use std::f64::consts::PI;

use fftconv_config::{ConfigError, FftConvConfig};
use lanecube::ScratchPlanes;
use num_complex::Complex64;

use crate::planes::ChannelSpectra;
use crate::reference;

/// Tables for one recursion level of length `len` and radix `radix`.
///
/// The forward stage matrix is `F[k][n] = ω_r^{nk}` with `ω_r =
/// e^{-2πi/r}`; the inverse matrix is its conjugate scaled by `1/r`, so
/// the product of the inverse stages carries the whole `1/N` and a
/// forward/inverse round trip needs no further normalization.
///
/// The twiddle tables hold `t[r·k2 + n1] = ω_len^{±n1·k2}`, matching the
/// in-place column layout the engine produces after its sub-transforms.
/// The leaf level is a bare matrix multiply and has no twiddles.
#[derive(Debug, Clone)]
pub struct LevelTables {
    pub radix: usize,
    pub len: usize,
    pub fwd_matrix: ScratchPlanes,
    pub inv_matrix: ScratchPlanes,
    pub fwd_twiddle: Option<ScratchPlanes>,
    pub inv_twiddle: Option<ScratchPlanes>,
}

impl LevelTables {
    fn build(radix: usize, len: usize) -> Self {
        debug_assert_eq!(len % radix, 0);
        let scale = 1.0 / radix as f64;

        let mut fwd = vec![(0.0, 0.0); radix * radix];
        let mut inv = vec![(0.0, 0.0); radix * radix];
        for k in 0..radix {
            for n in 0..radix {
                let ang = -2.0 * PI * (k * n) as f64 / radix as f64;
                let w = Complex64::from_polar(1.0, ang);
                fwd[k * radix + n] = (w.re, w.im);
                inv[k * radix + n] = (scale * w.re, -scale * w.im);
            }
        }

        let (fwd_twiddle, inv_twiddle) = if len > radix {
            let tail = len / radix;
            let mut fwd_t = vec![(0.0, 0.0); len];
            let mut inv_t = vec![(0.0, 0.0); len];
            for k2 in 0..tail {
                for n1 in 0..radix {
                    let ang = -2.0 * PI * (n1 * k2) as f64 / len as f64;
                    let w = Complex64::from_polar(1.0, ang);
                    fwd_t[k2 * radix + n1] = (w.re, w.im);
                    inv_t[k2 * radix + n1] = (w.re, -w.im);
                }
            }
            (
                Some(ScratchPlanes::from_f64(&fwd_t)),
                Some(ScratchPlanes::from_f64(&inv_t)),
            )
        } else {
            (None, None)
        };

        Self {
            radix,
            len,
            fwd_matrix: ScratchPlanes::from_f64(&fwd),
            inv_matrix: ScratchPlanes::from_f64(&inv),
            fwd_twiddle,
            inv_twiddle,
        }
    }

    /// Tail length `len / radix` (1 at the leaf).
    #[must_use]
    pub fn tail(&self) -> usize {
        self.len / self.radix
    }
}

/// A validated configuration plus the tables for every recursion level,
/// outermost first.
#[derive(Debug, Clone)]
pub struct MonarchPlan {
    config: FftConvConfig,
    levels: Vec<LevelTables>,
}

impl MonarchPlan {
    /// Validate the configuration and build all level tables.
    pub fn new(config: FftConvConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut levels = Vec::new();
        let mut len = config.transform_size();
        for &radix in config.factorization.radices() {
            levels.push(LevelTables::build(radix, len));
            len /= radix;
        }
        tracing::debug!(
            %config.factorization,
            n = config.transform_size(),
            stages = levels.len(),
            "plan built"
        );
        Ok(Self { config, levels })
    }

    #[must_use]
    pub fn config(&self) -> &FftConvConfig {
        &self.config
    }

    /// Level tables, outermost first. The last entry is the leaf.
    #[must_use]
    pub fn levels(&self) -> &[LevelTables] {
        &self.levels
    }

    #[must_use]
    pub fn transform_size(&self) -> usize {
        self.config.transform_size()
    }

    /// Precompute the filter spectrum: an exact f64 forward FFT of each
    /// channel's time-domain filter, narrowed once to f16.
    ///
    /// The spectrum is unnormalized, matching the forward transform the
    /// kernels run on the signal.
    #[must_use]
    pub fn filter_spectrum(&self, filter: &ChannelSpectra) -> ChannelSpectra {
        assert_eq!(filter.n, self.transform_size());
        let mut out = ChannelSpectra::zeros(filter.channels, filter.n);
        for h in 0..filter.channels {
            let k_f = reference::fft(&filter.channel_complex(h));
            out.set_channel(h, &k_f);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use fftconv_config::Factorization;
    use test_case::test_case;

    use super::*;

    #[test_case(Factorization::N256, &[256, 16] ; "two_level")]
    #[test_case(Factorization::N4096, &[4096, 256, 16] ; "three_level")]
    #[test_case(Factorization::N16384, &[16384, 1024, 32] ; "mixed_radix")]
    fn test_level_lengths(factorization: Factorization, expected: &[usize]) {
        let plan = MonarchPlan::new(FftConvConfig::new(factorization, 1, 1)).unwrap();
        let lens: Vec<usize> = plan.levels().iter().map(|l| l.len).collect();
        assert_eq!(lens, expected);

        let (leaf, rest) = plan.levels().split_last().unwrap();
        assert_eq!(leaf.len, leaf.radix);
        assert!(leaf.fwd_twiddle.is_none() && leaf.inv_twiddle.is_none());
        for level in rest {
            let t = level.fwd_twiddle.as_ref().unwrap();
            assert_eq!(t.len(), level.len);
        }
    }

    #[test]
    fn test_forward_matrix_is_dft_matrix() {
        let plan = MonarchPlan::new(FftConvConfig::new(Factorization::N256, 1, 1)).unwrap();
        let leaf = plan.levels().last().unwrap();
        let r = leaf.radix;
        for k in 0..r {
            for n in 0..r {
                let ang = -2.0 * PI * (k * n) as f64 / r as f64;
                let w = Complex64::from_polar(1.0, ang);
                let (re, im) = leaf.fwd_matrix.get(k * r + n);
                assert!((f64::from(re) - w.re).abs() < 1e-3);
                assert!((f64::from(im) - w.im).abs() < 1e-3);
            }
        }
    }

    /// inv_matrix · fwd_matrix ≈ I in f64, so a stage round trip is the
    /// identity up to f16 table rounding.
    #[test]
    fn test_stage_matrices_invert_each_other() {
        let plan = MonarchPlan::new(FftConvConfig::new(Factorization::N16384, 1, 1)).unwrap();
        for level in plan.levels() {
            let r = level.radix;
            for i in 0..r {
                for j in 0..r {
                    let mut acc = Complex64::new(0.0, 0.0);
                    for n in 0..r {
                        let (ar, ai) = level.inv_matrix.get(i * r + n);
                        let (br, bi) = level.fwd_matrix.get(n * r + j);
                        acc += Complex64::new(f64::from(ar), f64::from(ai))
                            * Complex64::new(f64::from(br), f64::from(bi));
                    }
                    let expected = f64::from(u8::from(i == j));
                    assert!(
                        (acc.re - expected).abs() < 2e-2 && acc.im.abs() < 2e-2,
                        "radix {r} entry ({i},{j}) = {acc}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_twiddle_entries_are_conjugate_pairs() {
        let plan = MonarchPlan::new(FftConvConfig::new(Factorization::N4096, 1, 1)).unwrap();
        let level = &plan.levels()[0];
        let fwd = level.fwd_twiddle.as_ref().unwrap();
        let inv = level.inv_twiddle.as_ref().unwrap();
        for i in 0..fwd.len() {
            let (fr, fi) = fwd.get(i);
            let (ir, ii) = inv.get(i);
            assert_eq!(fr, ir);
            assert_eq!(fi, -ii);
        }
    }

    #[test]
    fn test_filter_spectrum_matches_reference_fft() {
        let config = FftConvConfig::new(Factorization::N256, 1, 2);
        let plan = MonarchPlan::new(config).unwrap();
        let n = plan.transform_size();

        let mut filter = ChannelSpectra::zeros(2, n);
        let taps: Vec<Complex64> = (0..n)
            .map(|i| {
                if i < 8 {
                    Complex64::new(0.1 * (i + 1) as f64, -0.05 * i as f64)
                } else {
                    Complex64::new(0.0, 0.0)
                }
            })
            .collect();
        filter.set_channel(1, &taps);

        let spectrum = plan.filter_spectrum(&filter);
        let expected = reference::fft(&taps);
        let actual = spectrum.channel_complex(1);
        for (a, e) in actual.iter().zip(&expected) {
            assert!((a - e).norm() < 1e-2);
        }
        // Channel 0 held the zero filter.
        assert!(spectrum.channel_complex(0).iter().all(|v| v.norm() == 0.0));
    }

    #[test]
    fn test_plan_rejects_invalid_config() {
        let mut config = FftConvConfig::new(Factorization::N256, 2, 2);
        config.signal_size = 128;
        assert!(matches!(
            MonarchPlan::new(config),
            Err(ConfigError::SignalSizeMismatch { .. })
        ));
    }
}
