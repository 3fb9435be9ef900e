// The wide body corrects for the input zero-point after the column walk
// (lhs_offset * sum of weight bytes) instead of biasing every element before
// the multiply. The two formulations must agree exactly in i32.
use qgemv::kernels::{scalar, wide, VecMatParams};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[test]
fn per_element_and_sum_then_correct_agree() {
    let mut rng = SmallRng::seed_from_u64(42);
    // Offsets over the full 9-bit range the corrections assume
    for lhs_offset in [-256, -255, -128, -17, -1, 0, 1, 29, 127, 128, 255] {
        let cols = 19;
        let rows = 4;
        let lhs: Vec<i8> = (0..cols).map(|_| rng.gen()).collect();
        let rhs: Vec<i8> = (0..rows * cols).map(|_| rng.gen()).collect();

        let mut p = VecMatParams::unit(cols, rows);
        p.lhs_offset = lhs_offset;
        let mut a = vec![0i8; rows];
        let mut b = vec![0i8; rows];
        scalar::vec_mat_mult_t_s8(&lhs, &rhs, None, &mut a, &p);
        wide::vec_mat_mult_t_s8(&lhs, &rhs, None, &mut b, &p);
        assert_eq!(a, b, "lhs_offset={}", lhs_offset);
    }
}

#[test]
fn correction_matches_direct_integer_sum() {
    // Independent of the kernels: check the identity itself on raw i32 math.
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..100 {
        let n = rng.gen_range(1..64);
        let xs: Vec<i8> = (0..n).map(|_| rng.gen()).collect();
        let ws: Vec<i8> = (0..n).map(|_| rng.gen()).collect();
        let off: i32 = rng.gen_range(-256..=255);

        let per_element: i32 = xs
            .iter()
            .zip(&ws)
            .map(|(x, w)| (*x as i32 + off) * *w as i32)
            .sum();
        let dot: i32 = xs.iter().zip(&ws).map(|(x, w)| *x as i32 * *w as i32).sum();
        let wsum: i32 = ws.iter().map(|w| *w as i32).sum();
        assert_eq!(per_element, dot + off * wsum);
    }
}
