//! Lane-packed kernel body (4 input bytes per step, 2 rows per tile).
//!
//! Models a 32-bit SIMD-within-register unit: each 4-byte group is unpacked
//! into two 16-bit lane pairs (bytes 0/2 and bytes 1/3), the pairs are
//! pre-biased with `lhs_offset`, and a dual multiply-accumulate folds both
//! pairs of each weight row into its 32-bit accumulator.

use crate::kernels::requant::requantize;
use crate::kernels::{KernelStatus, VecMatParams};

/// Unpacks 4 bytes into the (even, odd) 16-bit lane pairs, adding `offset`
/// to each lane. `offset` fits in 9 bits so the lanes cannot overflow i16.
#[inline]
fn unpack_s8x4(v: &[i8], offset: i16) -> ([i16; 2], [i16; 2]) {
    let even = [v[0] as i16 + offset, v[2] as i16 + offset];
    let odd = [v[1] as i16 + offset, v[3] as i16 + offset];
    (even, odd)
}

/// Dual lane multiply-accumulate: acc + a0*b0 + a1*b1.
#[inline]
fn mla2(acc: i32, a: [i16; 2], b: [i16; 2]) -> i32 {
    acc + a[0] as i32 * b[0] as i32 + a[1] as i32 * b[1] as i32
}

pub fn vec_mat_mult_t_s8(
    lhs: &[i8],
    rhs: &[i8],
    bias: Option<&[i32]>,
    dst: &mut [i8],
    p: &VecMatParams,
) -> KernelStatus {
    let cols = p.rhs_cols;
    let lane_cols = cols - cols % 4;
    let row_tiles = p.rhs_rows / 2;
    let lhs_off = p.lhs_offset as i16;

    for tile in 0..row_tiles {
        let r0 = tile * 2;
        let row0 = &rhs[r0 * cols..(r0 + 1) * cols];
        let row1 = &rhs[(r0 + 1) * cols..(r0 + 2) * cols];

        let (mut acc0, mut acc1) = match bias {
            Some(b) => (b[r0], b[r0 + 1]),
            None => (0, 0),
        };

        for c in (0..lane_cols).step_by(4) {
            let (vec_even, vec_odd) = unpack_s8x4(&lhs[c..c + 4], lhs_off);

            let (ker_even, ker_odd) = unpack_s8x4(&row0[c..c + 4], 0);
            acc0 = mla2(acc0, vec_odd, ker_odd);
            acc0 = mla2(acc0, vec_even, ker_even);

            let (ker_even, ker_odd) = unpack_s8x4(&row1[c..c + 4], 0);
            acc1 = mla2(acc1, vec_odd, ker_odd);
            acc1 = mla2(acc1, vec_even, ker_even);
        }

        // Scalar cleanup for the cols % 4 tail
        for c in lane_cols..cols {
            let lhs_value = lhs[c] as i32 + p.lhs_offset;
            acc0 += lhs_value * row0[c] as i32;
            acc1 += lhs_value * row1[c] as i32;
        }

        for (k, acc) in [acc0, acc1].into_iter().enumerate() {
            let mut out = requantize(acc, p.dst_multiplier, p.dst_shift);
            out += p.dst_offset;
            out = out.clamp(p.activation_min, p.activation_max);
            dst[(r0 + k) * p.address_offset] = out as i8;
        }
    }

    if p.rhs_rows % 2 != 0 {
        let r = p.rhs_rows - 1;
        let row = &rhs[r * cols..(r + 1) * cols];
        let mut acc = match bias {
            Some(b) => b[r],
            None => 0,
        };

        for c in (0..lane_cols).step_by(4) {
            let (vec_even, vec_odd) = unpack_s8x4(&lhs[c..c + 4], lhs_off);
            let (ker_even, ker_odd) = unpack_s8x4(&row[c..c + 4], 0);
            acc = mla2(acc, vec_odd, ker_odd);
            acc = mla2(acc, vec_even, ker_even);
        }
        for c in lane_cols..cols {
            acc += (lhs[c] as i32 + p.lhs_offset) * row[c] as i32;
        }

        let mut out = requantize(acc, p.dst_multiplier, p.dst_shift);
        out += p.dst_offset;
        out = out.clamp(p.activation_min, p.activation_max);
        dst[r * p.address_offset] = out as i8;
    }

    KernelStatus::Success
}
