use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qgemv::kernels::{packed, scalar, wide, VecMatParams};

fn make_random_operands(rows: usize, cols: usize) -> (Vec<i8>, Vec<i8>, Vec<i32>) {
    let mut seed = 0x1234_5678_9abc_def0u64;
    let mut next_i8 = || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((seed >> 32) as i32 % 128) as i8
    };
    let lhs: Vec<i8> = (0..cols).map(|_| next_i8()).collect();
    let rhs: Vec<i8> = (0..rows * cols).map(|_| next_i8()).collect();
    let bias: Vec<i32> = (0..rows).map(|_| next_i8() as i32 * 4).collect();
    (lhs, rhs, bias)
}

fn bench_vec_mat_bodies(c: &mut Criterion) {
    // One dense-layer-sized call; adjust as needed
    let (rows, cols) = (64, 256);
    let (lhs, rhs, bias) = make_random_operands(rows, cols);
    let mut p = VecMatParams::unit(cols, rows);
    p.lhs_offset = 4;
    p.dst_offset = -2;
    p.dst_multiplier = 0x4000_0000;
    p.dst_shift = 8;
    let mut dst = vec![0i8; rows];

    c.bench_function("vec_mat_scalar_64x256", |b| {
        b.iter(|| {
            scalar::vec_mat_mult_t_s8(
                black_box(&lhs),
                black_box(&rhs),
                Some(&bias),
                &mut dst,
                &p,
            )
        })
    });
    c.bench_function("vec_mat_packed_64x256", |b| {
        b.iter(|| {
            packed::vec_mat_mult_t_s8(
                black_box(&lhs),
                black_box(&rhs),
                Some(&bias),
                &mut dst,
                &p,
            )
        })
    });
    c.bench_function("vec_mat_wide_64x256", |b| {
        b.iter(|| {
            wide::vec_mat_mult_t_s8(
                black_box(&lhs),
                black_box(&rhs),
                Some(&bias),
                &mut dst,
                &p,
            )
        })
    });
}

criterion_group!(benches, bench_vec_mat_bodies);
criterion_main!(benches);
