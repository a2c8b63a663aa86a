//! Shared test utilities for the convolution kernels.

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fftconv_config::{Factorization, FftConvConfig};

use crate::planes::{ChannelSpectra, SignalPlanes};

/// Dimensions for kernel tests.
#[derive(Debug, Clone, Copy)]
pub struct TestGeometry {
    pub factorization: Factorization,
    pub batch: usize,
    pub channels: usize,
    /// Nonzero taps at the front of each time-domain filter.
    pub taps: usize,
}

impl TestGeometry {
    #[must_use]
    pub fn new(factorization: Factorization, batch: usize, channels: usize) -> Self {
        Self {
            factorization,
            batch,
            channels,
            taps: 8,
        }
    }

    #[must_use]
    pub fn with_taps(mut self, taps: usize) -> Self {
        self.taps = taps;
        self
    }

    #[must_use]
    pub fn config(&self) -> FftConvConfig {
        FftConvConfig::new(self.factorization, self.batch, self.channels)
    }

    #[must_use]
    pub fn n(&self) -> usize {
        self.factorization.transform_size()
    }
}

fn random_complex(rng: &mut StdRng) -> Complex64 {
    Complex64::new(rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5))
}

/// Seeded random signals, values in roughly [-0.5, 0.5] so every
/// intermediate of the transform stays well inside f16 range.
#[must_use]
pub fn random_signals(geo: TestGeometry, seed: u64) -> SignalPlanes {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = geo.n();
    let mut planes = SignalPlanes::zeros(geo.batch, geo.channels, n);
    for b in 0..geo.batch {
        for h in 0..geo.channels {
            let values: Vec<Complex64> = (0..n).map(|_| random_complex(&mut rng)).collect();
            planes.set_seq(b, h, &values);
        }
    }
    planes
}

/// Seeded random short filters: `taps` leading complex taps per channel,
/// zero-padded to the transform length.
#[must_use]
pub fn random_filter(geo: TestGeometry, seed: u64) -> ChannelSpectra {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = geo.n();
    let mut filter = ChannelSpectra::zeros(geo.channels, n);
    for h in 0..geo.channels {
        let values: Vec<Complex64> = (0..n)
            .map(|i| {
                if i < geo.taps {
                    random_complex(&mut rng)
                } else {
                    Complex64::new(0.0, 0.0)
                }
            })
            .collect();
        filter.set_channel(h, &values);
    }
    filter
}

/// Assert two complex sequences agree within `|a - e| <= atol + rtol·|e|`,
/// reporting the worst offender.
pub fn assert_complex_close(
    actual: &[Complex64],
    expected: &[Complex64],
    atol: f64,
    rtol: f64,
    what: &str,
) {
    assert_eq!(actual.len(), expected.len(), "{what}: length mismatch");
    let mut worst = 0.0f64;
    let mut worst_idx = 0;
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        let excess = (a - e).norm() - (atol + rtol * e.norm());
        if excess > worst {
            worst = excess;
            worst_idx = i;
        }
    }
    assert!(
        worst <= 0.0,
        "{what}: index {worst_idx} off by {:.3e} beyond tolerance \
         (actual {}, expected {})",
        worst,
        actual[worst_idx],
        expected[worst_idx],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_are_deterministic() {
        let geo = TestGeometry::new(Factorization::N256, 2, 2);
        let a = random_signals(geo, 42);
        let b = random_signals(geo, 42);
        assert_eq!(a.seq_complex(1, 1), b.seq_complex(1, 1));

        let c = random_signals(geo, 43);
        assert_ne!(a.seq_complex(0, 0), c.seq_complex(0, 0));
    }

    #[test]
    fn test_filter_is_zero_padded() {
        let geo = TestGeometry::new(Factorization::N256, 1, 1).with_taps(4);
        let filter = random_filter(geo, 7);
        let taps = filter.channel_complex(0);
        assert!(taps[..4].iter().any(|v| v.norm() > 0.0));
        assert!(taps[4..].iter().all(|v| v.norm() == 0.0));
    }

    #[test]
    #[should_panic(expected = "beyond tolerance")]
    fn test_assert_complex_close_flags_outlier() {
        let a = vec![Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)];
        let mut e = a.clone();
        e[1].re = 2.5;
        assert_complex_close(&a, &e, 1e-3, 1e-2, "outlier");
    }
}
