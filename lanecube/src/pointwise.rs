//! Elementwise complex operations over scratch planes.

use crate::planes::ScratchPlanes;

/// `a[i] *= b[i]` (complex). Twiddle correction and spectrum multiply.
pub fn mul_assign(a: &mut ScratchPlanes, b: &ScratchPlanes) {
    debug_assert_eq!(a.len(), b.len());
    for i in 0..a.len() {
        let (ar, ai) = a.get(i);
        let (br, bi) = b.get(i);
        a.set(i, ar * br - ai * bi, ar * bi + ai * br);
    }
}

/// `acc[i] += scale · a[i] · conj(b[i])`, accumulated in f32.
///
/// The dk_f accumulation of the backward kernel: `a` is the transformed
/// output gradient, `b` the transformed signal, `scale` the normalization
/// carried on the x branch.
pub fn accumulate_conj_product(
    acc_re: &mut [f32],
    acc_im: &mut [f32],
    a: &ScratchPlanes,
    b: &ScratchPlanes,
    scale: f32,
) {
    debug_assert_eq!(acc_re.len(), a.len());
    debug_assert_eq!(acc_im.len(), a.len());
    debug_assert_eq!(a.len(), b.len());
    for i in 0..a.len() {
        let (ar, ai) = a.get(i);
        let (br, bi) = b.get(i);
        acc_re[i] += scale * (ar * br + ai * bi);
        acc_im[i] += scale * (ai * br - ar * bi);
    }
}
