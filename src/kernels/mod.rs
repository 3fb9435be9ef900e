//! s8 vector times transposed-matrix kernels with fused requantization.
//!
//! One logical operation, three bodies: a portable scalar path, a 4-wide
//! lane-packed path and a 16-lane masked-chunk path. The entry point picks
//! exactly one at compile time via cargo features; all three stay compiled
//! so the test suite can compare them bit for bit in a single binary.

pub mod packed;
pub mod requant;
pub mod scalar;
pub mod wide;

pub use requant::requantize;

use serde::{Deserialize, Serialize};

/// Outcome of a kernel call. Valid inputs cannot fail at runtime; malformed
/// shapes are caught by debug assertions only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelStatus {
    Success,
}

/// Per-call quantization and shape parameters, shared by all rows.
///
/// `dst_shift` follows the sign convention: non-negative is a rounding right
/// shift, negative is a left shift applied before the fixed-point multiply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VecMatParams {
    /// Added to every input element before multiplication (input zero-point).
    pub lhs_offset: i32,
    /// Added to every output after requantization (output zero-point).
    pub dst_offset: i32,
    /// Fixed-point scale numerator, Q0.31 against a doubling high multiply.
    pub dst_multiplier: i32,
    pub dst_shift: i32,
    /// Shared/reduction dimension; length of `lhs` and of each `rhs` row.
    pub rhs_cols: usize,
    /// Number of output channels; rows of the transposed weight matrix.
    pub rhs_rows: usize,
    pub activation_min: i32,
    pub activation_max: i32,
    /// Output stride in elements; 1 is packed, larger values interleave.
    pub address_offset: usize,
}

impl VecMatParams {
    /// Identity scale (1.0), zero offsets, full s8 activation range.
    pub fn unit(rhs_cols: usize, rhs_rows: usize) -> Self {
        Self {
            lhs_offset: 0,
            dst_offset: 0,
            dst_multiplier: i32::MAX,
            dst_shift: 0,
            rhs_cols,
            rhs_rows,
            activation_min: i8::MIN as i32,
            activation_max: i8::MAX as i32,
            address_offset: 1,
        }
    }
}

pub(crate) fn debug_check_shapes(
    lhs: &[i8],
    rhs: &[i8],
    bias: Option<&[i32]>,
    dst: &[i8],
    p: &VecMatParams,
) {
    debug_assert!(p.rhs_cols >= 1, "rhs_cols must be at least 1");
    debug_assert!(p.address_offset >= 1, "address_offset must be at least 1");
    debug_assert!(lhs.len() >= p.rhs_cols, "lhs shorter than rhs_cols");
    debug_assert!(rhs.len() >= p.rhs_rows * p.rhs_cols, "rhs shorter than rows*cols");
    if let Some(b) = bias {
        debug_assert!(b.len() >= p.rhs_rows, "bias shorter than rhs_rows");
    }
    if p.rhs_rows > 0 {
        debug_assert!(
            dst.len() >= (p.rhs_rows - 1) * p.address_offset + 1,
            "dst too short for rows at address_offset stride"
        );
    }
    debug_assert!(p.activation_min <= p.activation_max);
    debug_assert!(p.activation_min >= i8::MIN as i32 && p.activation_max <= i8::MAX as i32);
}

/// Multiplies vector `lhs` by the transposed row-major matrix `rhs` and writes
/// `rhs_rows` requantized s8 results into `dst` at `address_offset` stride.
///
/// The executing body is fixed at build time: `simd-wide` selects the 16-lane
/// path, otherwise `simd-packed` selects the 4-wide path, otherwise the scalar
/// path runs. All three produce byte-identical output.
pub fn vec_mat_mult_t_s8(
    lhs: &[i8],
    rhs: &[i8],
    bias: Option<&[i32]>,
    dst: &mut [i8],
    params: &VecMatParams,
) -> KernelStatus {
    debug_check_shapes(lhs, rhs, bias, dst, params);

    #[cfg(feature = "simd-wide")]
    {
        return wide::vec_mat_mult_t_s8(lhs, rhs, bias, dst, params);
    }

    #[cfg(all(feature = "simd-packed", not(feature = "simd-wide")))]
    {
        return packed::vec_mat_mult_t_s8(lhs, rhs, bias, dst, params);
    }

    #[cfg(not(any(feature = "simd-wide", feature = "simd-packed")))]
    {
        scalar::vec_mat_mult_t_s8(lhs, rhs, bias, dst, params)
    }
}
