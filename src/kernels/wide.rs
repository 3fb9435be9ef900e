//! Wide-vector kernel body (16 input bytes per chunk, 3 rows per tile).
//!
//! Models a predicated 16-lane vector unit. The tail predicate becomes a
//! bounded subslice: the final chunk is narrowed to the remaining column
//! count, so no separate scalar tail loop exists. `lhs_offset` is not applied
//! per element; each row keeps a running sum of its raw weight bytes and the
//! correction `lhs_offset * weight_sum` is added once after the column walk.
//! Algebraically identical to the per-element form:
//!   sum((x + off) * w) == sum(x * w) + off * sum(w)

use crate::kernels::requant::requantize;
use crate::kernels::{KernelStatus, VecMatParams};

const LANES: usize = 16;

/// Masked dot product and weight-byte sum over one chunk of up to 16 lanes.
#[inline]
fn chunk_mac(input: &[i8], weights: &[i8], acc: &mut i32, weight_sum: &mut i32) {
    for (x, w) in input.iter().zip(weights) {
        *weight_sum += *w as i32;
        *acc += *x as i32 * *w as i32;
    }
}

pub fn vec_mat_mult_t_s8(
    lhs: &[i8],
    rhs: &[i8],
    bias: Option<&[i32]>,
    dst: &mut [i8],
    p: &VecMatParams,
) -> KernelStatus {
    let cols = p.rhs_cols;
    let row_tiles = p.rhs_rows / 3;

    for tile in 0..row_tiles {
        let r0 = tile * 3;
        let row0 = &rhs[r0 * cols..(r0 + 1) * cols];
        let row1 = &rhs[(r0 + 1) * cols..(r0 + 2) * cols];
        let row2 = &rhs[(r0 + 2) * cols..(r0 + 3) * cols];

        let mut acc = [0i32; 3];
        let mut weight_sum = [0i32; 3];

        let mut c = 0;
        while c < cols {
            // Predicate: lanes past the column count are inactive
            let active = LANES.min(cols - c);
            let input = &lhs[c..c + active];
            chunk_mac(input, &row0[c..c + active], &mut acc[0], &mut weight_sum[0]);
            chunk_mac(input, &row1[c..c + active], &mut acc[1], &mut weight_sum[1]);
            chunk_mac(input, &row2[c..c + active], &mut acc[2], &mut weight_sum[2]);
            c += active;
        }

        if let Some(b) = bias {
            for k in 0..3 {
                acc[k] += b[r0 + k];
            }
        }

        let mut out = [0i32; 3];
        for k in 0..3 {
            acc[k] += p.lhs_offset * weight_sum[k];
            out[k] = requantize(acc[k], p.dst_multiplier, p.dst_shift);
            out[k] += p.dst_offset;
            out[k] = out[k].max(p.activation_min);
            out[k] = out[k].min(p.activation_max);
        }

        if p.address_offset > 1 {
            // Strided scatter into an interleaved destination
            for k in 0..3 {
                dst[(r0 + k) * p.address_offset] = out[k] as i8;
            }
        } else {
            // Contiguous predicated store
            for k in 0..3 {
                dst[r0 + k] = out[k] as i8;
            }
        }
    }

    for r in row_tiles * 3..p.rhs_rows {
        let row = &rhs[r * cols..(r + 1) * cols];
        let mut acc = 0i32;
        let mut weight_sum = 0i32;

        let mut c = 0;
        while c < cols {
            let active = LANES.min(cols - c);
            chunk_mac(&lhs[c..c + active], &row[c..c + active], &mut acc, &mut weight_sum);
            c += active;
        }

        if let Some(b) = bias {
            acc += b[r];
        }
        acc += weight_sum * p.lhs_offset;

        let mut out = requantize(acc, p.dst_multiplier, p.dst_shift);
        out += p.dst_offset;
        out = out.max(p.activation_min);
        out = out.min(p.activation_max);
        dst[r * p.address_offset] = out as i8;
    }

    KernelStatus::Success
}
