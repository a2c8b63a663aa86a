//! Cooperative lane-striped bulk copies.
//!
//! `len` elements are divided over `lanes` workers, lane `l` owning indices
//! `l, l + lanes, l + 2*lanes, ...`. The assignment is deterministic,
//! disjoint, and complete, so any execution model (sequential lanes, SIMD,
//! a thread per lane) produces the same result. The tile group here drives
//! the lanes in a fixed order.

use half::f16;

use crate::planes::ScratchPlanes;

/// Indices owned by one lane of a striped copy.
#[inline]
pub fn lane_indices(len: usize, lanes: usize, lane: usize) -> impl Iterator<Item = usize> {
    (lane..len).step_by(lanes.max(1))
}

/// Stage bulk planes into scratch.
pub fn copy_in(dst: &mut ScratchPlanes, src_re: &[f16], src_im: &[f16], lanes: usize) {
    let len = dst.len();
    debug_assert_eq!(src_re.len(), len);
    debug_assert_eq!(src_im.len(), len);
    for lane in 0..lanes {
        for i in lane_indices(len, lanes, lane) {
            dst.re[i] = src_re[i];
            dst.im[i] = src_im[i];
        }
    }
}

/// Stage bulk planes into scratch, conjugating on the way in.
pub fn copy_in_conj(dst: &mut ScratchPlanes, src_re: &[f16], src_im: &[f16], lanes: usize) {
    let len = dst.len();
    debug_assert_eq!(src_re.len(), len);
    debug_assert_eq!(src_im.len(), len);
    for lane in 0..lanes {
        for i in lane_indices(len, lanes, lane) {
            dst.re[i] = src_re[i];
            dst.im[i] = -src_im[i];
        }
    }
}

/// Write scratch back to bulk planes.
pub fn copy_out(dst_re: &mut [f16], dst_im: &mut [f16], src: &ScratchPlanes, lanes: usize) {
    let len = src.len();
    debug_assert_eq!(dst_re.len(), len);
    debug_assert_eq!(dst_im.len(), len);
    for lane in 0..lanes {
        for i in lane_indices(len, lanes, lane) {
            dst_re[i] = src.re[i];
            dst_im[i] = src.im[i];
        }
    }
}

/// Gather a strided column of `count` elements starting at `offset` into
/// the front of `dst`.
pub fn gather_strided(
    dst: &mut ScratchPlanes,
    src: &ScratchPlanes,
    offset: usize,
    stride: usize,
    count: usize,
    lanes: usize,
) {
    debug_assert!(dst.len() >= count);
    debug_assert!(offset + (count - 1) * stride < src.len());
    for lane in 0..lanes {
        for i in lane_indices(count, lanes, lane) {
            let s = offset + i * stride;
            dst.re[i] = src.re[s];
            dst.im[i] = src.im[s];
        }
    }
}

/// Scatter the front `count` elements of `src` back to a strided column.
pub fn scatter_strided(
    dst: &mut ScratchPlanes,
    src: &ScratchPlanes,
    offset: usize,
    stride: usize,
    count: usize,
    lanes: usize,
) {
    debug_assert!(src.len() >= count);
    debug_assert!(offset + (count - 1) * stride < dst.len());
    for lane in 0..lanes {
        for i in lane_indices(count, lanes, lane) {
            let d = offset + i * stride;
            dst.re[d] = src.re[i];
            dst.im[d] = src.im[i];
        }
    }
}
