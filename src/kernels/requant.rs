//! Shared fixed-point requantization primitive.
//!
//! All three kernel bodies funnel their accumulators through [`requantize`];
//! the rounding behavior here is the bit-exactness contract between them and
//! must never fork per strategy. Two stages with two distinct rounding rules:
//! the doubling high multiply rounds half up, the power-of-two divide rounds
//! half away from zero.

/// High 32 bits of `2 * val * multiplier`, rounded half up.
#[inline]
pub fn doubling_high_mult(val: i32, multiplier: i32) -> i32 {
    (((val as i64) * (multiplier as i64) + (1i64 << 30)) >> 31) as i32
}

/// Arithmetic right shift by `exponent`, rounding half away from zero.
#[inline]
pub fn divide_by_power_of_two(dividend: i32, exponent: u32) -> i32 {
    if exponent == 0 {
        return dividend;
    }
    let remainder_mask = (1i32 << exponent) - 1;
    let remainder = dividend & remainder_mask;
    let mut result = dividend >> exponent;
    // Half-way values round away from zero: for negative results the
    // truncating shift already moved toward -inf, so the carry threshold
    // sits one higher.
    let mut threshold = remainder_mask >> 1;
    if result < 0 {
        threshold += 1;
    }
    if remainder > threshold {
        result += 1;
    }
    result
}

/// Scales a raw accumulator by `multiplier * 2^-shift` in fixed point.
///
/// Non-negative `shift` is a rounding right shift applied after the multiply;
/// negative `shift` is a plain left shift applied before it. Total over the
/// documented domain; the 64-bit intermediate cannot overflow for in-range
/// accumulators.
#[inline]
pub fn requantize(val: i32, multiplier: i32, shift: i32) -> i32 {
    let left = if shift < 0 { (-shift) as u32 } else { 0 };
    let right = if shift > 0 { shift as u32 } else { 0 };
    divide_by_power_of_two(doubling_high_mult(val << left, multiplier), right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_scale_is_identity() {
        for v in [-1000, -1, 0, 1, 7, 1000, 65535] {
            assert_eq!(requantize(v, i32::MAX, 0), v);
        }
    }

    #[test]
    fn high_mult_rounds_half_up() {
        // 3 * 2^30 / 2^31 = 1.5 exactly; half up gives 2.
        assert_eq!(doubling_high_mult(3, 1 << 30), 2);
        // -3 * 2^30 / 2^31 = -1.5 exactly; half up gives -1.
        assert_eq!(doubling_high_mult(-3, 1 << 30), -1);
    }

    #[test]
    fn shift_rounds_half_away_from_zero() {
        assert_eq!(divide_by_power_of_two(3, 1), 2);
        assert_eq!(divide_by_power_of_two(-3, 1), -2);
        assert_eq!(divide_by_power_of_two(5, 2), 1);
        assert_eq!(divide_by_power_of_two(6, 2), 2);
        assert_eq!(divide_by_power_of_two(-5, 2), -1);
        assert_eq!(divide_by_power_of_two(-6, 2), -2);
    }

    #[test]
    fn negative_shift_is_left_shift() {
        // scale 1.0 as multiplier 2^30 with one left shift
        for v in [-50, 0, 13, 127] {
            assert_eq!(requantize(v, 1 << 30, -1), v);
        }
    }

    #[test]
    fn right_shift_halves() {
        // scale 0.5 as unit multiplier with one right shift
        assert_eq!(requantize(10, i32::MAX, 1), 5);
        assert_eq!(requantize(11, i32::MAX, 1), 6);
        assert_eq!(requantize(-11, i32::MAX, 1), -6);
    }
}
