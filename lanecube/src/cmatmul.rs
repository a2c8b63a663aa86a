//! Dense complex radix matrix multiply.
//!
//! One radix stage of the decomposition is `out = F · Zᵀ` for a small r×r
//! stage matrix F and an m×r operand Z, written transposed so consecutive
//! stages see their input in natural order. Half-precision operands, f32
//! accumulation, results narrowed on store.

use crate::planes::ScratchPlanes;

/// `out[k*m + j] = Σ_n f[k*r + n] · z[j*r + n]` over complex values.
///
/// `f` is the r×r stage matrix (row-major), `z` holds m rows of length r
/// (row-major), `out` holds r rows of length m. `out` must not alias `z`.
pub fn radix_matmul(
    out: &mut ScratchPlanes,
    z: &ScratchPlanes,
    f: &ScratchPlanes,
    r: usize,
    m: usize,
) {
    debug_assert_eq!(f.len(), r * r);
    debug_assert!(z.len() >= r * m);
    debug_assert!(out.len() >= r * m);

    for k in 0..r {
        let f_row = k * r;
        for j in 0..m {
            let z_row = j * r;
            let mut acc_re = 0.0f32;
            let mut acc_im = 0.0f32;
            for n in 0..r {
                let (fr, fi) = f.get(f_row + n);
                let (zr, zi) = z.get(z_row + n);
                acc_re += fr * zr - fi * zi;
                acc_im += fr * zi + fi * zr;
            }
            out.set(k * m + j, acc_re, acc_im);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(
        f: &[(f64, f64)],
        z: &[(f64, f64)],
        r: usize,
        m: usize,
    ) -> Vec<(f64, f64)> {
        let mut out = vec![(0.0, 0.0); r * m];
        for k in 0..r {
            for j in 0..m {
                let mut acc = (0.0, 0.0);
                for n in 0..r {
                    let (fr, fi) = f[k * r + n];
                    let (zr, zi) = z[j * r + n];
                    acc.0 += fr * zr - fi * zi;
                    acc.1 += fr * zi + fi * zr;
                }
                out[k * m + j] = acc;
            }
        }
        out
    }

    #[test]
    fn test_matches_naive_complex_matmul() {
        use rand::Rng;
        let mut rng = rand::rng();
        let (r, m) = (8, 5);

        let f: Vec<(f64, f64)> = (0..r * r)
            .map(|_| (rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
            .collect();
        let z: Vec<(f64, f64)> = (0..r * m)
            .map(|_| (rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
            .collect();

        let f_planes = ScratchPlanes::from_f64(&f);
        let z_planes = ScratchPlanes::from_f64(&z);
        let mut out = ScratchPlanes::new(r * m);
        radix_matmul(&mut out, &z_planes, &f_planes, r, m);

        let expected = naive(&f, &z, r, m);
        for (i, &(er, ei)) in expected.iter().enumerate() {
            let (or, oi) = out.get(i);
            // f16 operands: ~1e-2 absolute for O(1) values over an 8-term sum.
            assert!((or - er as f32).abs() < 5e-2, "re at {i}: {or} vs {er}");
            assert!((oi - ei as f32).abs() < 5e-2, "im at {i}: {oi} vs {ei}");
        }
    }

    #[test]
    fn test_identity_matrix_passes_through() {
        let r = 4;
        let m = 3;
        let mut eye = vec![(0.0, 0.0); r * r];
        for k in 0..r {
            eye[k * r + k] = (1.0, 0.0);
        }
        let f = ScratchPlanes::from_f64(&eye);

        let mut z = ScratchPlanes::new(r * m);
        for i in 0..r * m {
            z.set(i, i as f32, -(i as f32));
        }
        let mut out = ScratchPlanes::new(r * m);
        radix_matmul(&mut out, &z, &f, r, m);

        // out is the transpose of z's row layout.
        for k in 0..r {
            for j in 0..m {
                assert_eq!(out.get(k * m + j), z.get(j * r + k));
            }
        }
    }
}
