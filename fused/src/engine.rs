//! The recursive decomposition engine.
//!
//! One level of length `L = r · M` transforms its input in three steps:
//! gather each of the `r` stride-`r` columns, run the next level on it
//! (length `M`), and scatter it back; multiply elementwise by the coarse
//! twiddle table; then apply the dense `r × r` stage matrix as a matmul
//! over all `M` columns at once, written transposed so the result lands
//! in natural order. The leaf level is the bare matmul. No digit
//! reversal is ever needed.
//!
//! Forward and inverse share this code; the direction only selects which
//! staged matrix and twiddle table each level uses, and the inverse
//! matrices carry the `1/N` normalization.

use lanecube::cmatmul::radix_matmul;
use lanecube::coop;
use lanecube::pointwise::mul_assign;
use lanecube::ScratchPlanes;

use crate::scratch::StagedLevel;

/// Unnormalized forward transform of `data` in place.
pub fn forward_transform(levels: &mut [StagedLevel], data: &mut ScratchPlanes, lanes: usize) {
    transform(levels, data, false, lanes);
}

/// Inverse transform of `data` in place, including the `1/N`.
pub fn inverse_transform(levels: &mut [StagedLevel], data: &mut ScratchPlanes, lanes: usize) {
    transform(levels, data, true, lanes);
}

fn transform(levels: &mut [StagedLevel], data: &mut ScratchPlanes, inverse: bool, lanes: usize) {
    let Some((level, rest)) = levels.split_first_mut() else {
        return;
    };
    let r = level.radix;
    let m = level.len / r;
    debug_assert_eq!(data.len(), level.len);

    if m > 1 {
        for n1 in 0..r {
            coop::gather_strided(&mut level.col, data, n1, r, m, lanes);
            transform(rest, &mut level.col, inverse, lanes);
            coop::scatter_strided(data, &level.col, n1, r, m, lanes);
        }
        let twiddle = if inverse {
            level.inv_twiddle.as_ref()
        } else {
            level.fwd_twiddle.as_ref()
        };
        if let Some(twiddle) = twiddle {
            mul_assign(data, twiddle);
        }
    }

    let matrix = if inverse {
        &level.inv_matrix
    } else {
        &level.fwd_matrix
    };
    radix_matmul(&mut level.out, data, matrix, r, m);
    coop::copy_in(data, &level.out.re, &level.out.im, lanes);
}

#[cfg(test)]
mod tests {
    use fftconv_config::{Factorization, FftConvConfig};
    use fftconv_core::{reference, test_utils, MonarchPlan};
    use num_complex::Complex64;

    use crate::scratch::TileScratch;

    use super::*;

    fn planes_to_complex(planes: &ScratchPlanes) -> Vec<Complex64> {
        planes
            .to_f32_pairs()
            .iter()
            .map(|&(re, im)| Complex64::new(f64::from(re), f64::from(im)))
            .collect()
    }

    #[test]
    fn test_forward_of_impulse_is_flat() {
        let plan =
            MonarchPlan::new(FftConvConfig::new(Factorization::N256, 1, 1)).unwrap();
        let mut scratch = TileScratch::new(&plan);
        scratch.signal.set(0, 1.0, 0.0);

        let lanes = scratch.lanes();
        forward_transform(&mut scratch.levels, &mut scratch.signal, lanes);
        for i in 0..256 {
            let (re, im) = scratch.signal.get(i);
            assert!((re - 1.0).abs() < 1e-2 && im.abs() < 1e-2, "bin {i}: ({re}, {im})");
        }
    }

    #[test]
    fn test_forward_matches_reference_fft() {
        let geo = test_utils::TestGeometry::new(Factorization::N256, 1, 1);
        let plan = MonarchPlan::new(geo.config()).unwrap();
        let signals = test_utils::random_signals(geo, 17);
        let x = signals.seq_complex(0, 0);

        let mut scratch = TileScratch::new(&plan);
        let lanes = scratch.lanes();
        let (re, im) = signals.seq(0, 0);
        coop::copy_in(&mut scratch.signal, re, im, lanes);
        forward_transform(&mut scratch.levels, &mut scratch.signal, lanes);

        test_utils::assert_complex_close(
            &planes_to_complex(&scratch.signal),
            &reference::fft(&x),
            0.15,
            0.02,
            "forward transform",
        );
    }

    #[test_case::test_case(Factorization::N256 ; "n256")]
    #[test_case::test_case(Factorization::N4096 ; "n4096")]
    #[test_case::test_case(Factorization::N16384 ; "n16384")]
    fn test_inverse_undoes_forward(factorization: Factorization) {
        let geo = test_utils::TestGeometry::new(factorization, 1, 1);
        let plan = MonarchPlan::new(geo.config()).unwrap();
        let signals = test_utils::random_signals(geo, 23);
        let x = signals.seq_complex(0, 0);

        let mut scratch = TileScratch::new(&plan);
        let lanes = scratch.lanes();
        let (re, im) = signals.seq(0, 0);
        coop::copy_in(&mut scratch.signal, re, im, lanes);
        forward_transform(&mut scratch.levels, &mut scratch.signal, lanes);
        inverse_transform(&mut scratch.levels, &mut scratch.signal, lanes);

        test_utils::assert_complex_close(
            &planes_to_complex(&scratch.signal),
            &x,
            0.05,
            0.05,
            "round trip",
        );
    }

    /// Lane count changes the copy striping, never the result.
    #[test]
    fn test_result_is_lane_count_independent() {
        let geo = test_utils::TestGeometry::new(Factorization::N256, 1, 1);
        let signals = test_utils::random_signals(geo, 31);
        let (re, im) = signals.seq(0, 0);

        let mut runs = Vec::new();
        for lanes in [1, 32, 128] {
            let plan = MonarchPlan::new(geo.config().with_lanes(lanes)).unwrap();
            let mut scratch = TileScratch::new(&plan);
            coop::copy_in(&mut scratch.signal, re, im, lanes);
            forward_transform(&mut scratch.levels, &mut scratch.signal, lanes);
            runs.push((scratch.signal.re.clone(), scratch.signal.im.clone()));
        }
        assert_eq!(runs[0], runs[1]);
        assert_eq!(runs[0], runs[2]);
    }
}
