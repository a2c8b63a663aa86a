//! f64 reference transforms, convolution, and gradients.
//!
//! Everything here is straight-line double precision with no tiling or
//! half-precision narrowing. The kernels are validated against these,
//! which are in turn validated against the O(N²) definitions.

use std::f64::consts::PI;

use num_complex::Complex64;

/// O(N²) DFT straight from the definition. Small-N ground truth.
#[must_use]
pub fn naive_dft(x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    (0..n)
        .map(|k| {
            (0..n)
                .map(|j| {
                    let ang = -2.0 * PI * (k * j) as f64 / n as f64;
                    x[j] * Complex64::from_polar(1.0, ang)
                })
                .sum()
        })
        .collect()
}

/// Unnormalized forward FFT, iterative radix-2. `x.len()` must be a
/// power of two.
#[must_use]
pub fn fft(x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    assert!(n.is_power_of_two(), "fft length {n} is not a power of two");
    let mut a = x.to_vec();

    let mut j = 0;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            a.swap(i, j);
        }
    }

    let mut len = 2;
    while len <= n {
        let step = Complex64::from_polar(1.0, -2.0 * PI / len as f64);
        for chunk in a.chunks_mut(len) {
            let mut w = Complex64::new(1.0, 0.0);
            for i in 0..len / 2 {
                let u = chunk[i];
                let v = chunk[i + len / 2] * w;
                chunk[i] = u + v;
                chunk[i + len / 2] = u - v;
                w *= step;
            }
        }
        len <<= 1;
    }
    a
}

/// Inverse FFT carrying the full 1/N, so `ifft(fft(x)) == x`.
#[must_use]
pub fn ifft(x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len() as f64;
    let conj: Vec<Complex64> = x.iter().map(Complex64::conj).collect();
    fft(&conj).iter().map(|v| v.conj() / n).collect()
}

/// Direct circular convolution, `y[i] = Σ_j x[j] · k[(i - j) mod N]`.
#[must_use]
pub fn circular_convolution(x: &[Complex64], k: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    assert_eq!(k.len(), n);
    (0..n)
        .map(|i| (0..n).map(|j| x[j] * k[(n + i - j) % n]).sum())
        .collect()
}

/// Reference forward pass for one sequence: `y = ifft(fft(x) ∘ k_f)`.
#[must_use]
pub fn forward(x: &[Complex64], k_f: &[Complex64]) -> Vec<Complex64> {
    let x_f = fft(x);
    let y_f: Vec<Complex64> = x_f.iter().zip(k_f).map(|(a, b)| a * b).collect();
    ifft(&y_f)
}

/// Reference signal gradient for one sequence:
/// `dx = ifft(conj(k_f) ∘ fft(dout))`.
#[must_use]
pub fn backward_dx(dout: &[Complex64], k_f: &[Complex64]) -> Vec<Complex64> {
    let dout_f = fft(dout);
    let dx_f: Vec<Complex64> = dout_f
        .iter()
        .zip(k_f)
        .map(|(d, k)| d * k.conj())
        .collect();
    ifft(&dx_f)
}

/// Reference filter-spectrum gradient contribution of one sequence:
/// `dk_f = (1/N) · fft(dout) ∘ conj(fft(x))`.
///
/// The 1/N comes from the inverse transform in the forward pass; the
/// per-batch contributions sum.
#[must_use]
pub fn backward_dkf(dout: &[Complex64], x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len() as f64;
    let dout_f = fft(dout);
    let x_f = fft(x);
    dout_f
        .iter()
        .zip(&x_f)
        .map(|(d, xf)| d * xf.conj() / n)
        .collect()
}
