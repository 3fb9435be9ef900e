//! Portable scalar kernel body.
//!
//! Reference semantics for the other two bodies: rows in tiles of 3, one
//! column at a time, `lhs_offset` applied per element before the multiply.

use crate::kernels::requant::requantize;
use crate::kernels::{KernelStatus, VecMatParams};

pub fn vec_mat_mult_t_s8(
    lhs: &[i8],
    rhs: &[i8],
    bias: Option<&[i32]>,
    dst: &mut [i8],
    p: &VecMatParams,
) -> KernelStatus {
    let cols = p.rhs_cols;
    let row_tiles = p.rhs_rows / 3;
    let mut bias_iter = bias.map(|b| b.iter());
    let mut next_bias = move || -> i32 {
        match bias_iter.as_mut() {
            Some(it) => *it.next().unwrap_or(&0),
            None => 0,
        }
    };

    for tile in 0..row_tiles {
        let r0 = tile * 3;
        let row0 = &rhs[r0 * cols..(r0 + 1) * cols];
        let row1 = &rhs[(r0 + 1) * cols..(r0 + 2) * cols];
        let row2 = &rhs[(r0 + 2) * cols..(r0 + 3) * cols];

        let mut acc0 = next_bias();
        let mut acc1 = next_bias();
        let mut acc2 = next_bias();

        for i in 0..cols {
            let lhs_value = lhs[i] as i32 + p.lhs_offset;
            acc0 += lhs_value * row0[i] as i32;
            acc1 += lhs_value * row1[i] as i32;
            acc2 += lhs_value * row2[i] as i32;
        }

        for (k, acc) in [acc0, acc1, acc2].into_iter().enumerate() {
            let mut out = requantize(acc, p.dst_multiplier, p.dst_shift);
            out += p.dst_offset;
            out = out.clamp(p.activation_min, p.activation_max);
            dst[(r0 + k) * p.address_offset] = out as i8;
        }
    }

    // Leftover rows, one at a time
    for r in row_tiles * 3..p.rhs_rows {
        let row = &rhs[r * cols..(r + 1) * cols];
        let mut acc = next_bias();
        for i in 0..cols {
            acc += (lhs[i] as i32 + p.lhs_offset) * row[i] as i32;
        }
        let mut out = requantize(acc, p.dst_multiplier, p.dst_shift);
        out += p.dst_offset;
        out = out.clamp(p.activation_min, p.activation_max);
        dst[r * p.address_offset] = out as i8;
    }

    KernelStatus::Success
}
