use anyhow::Result;
use clap::Parser;
use log::info;
use qgemv::io::{save_fixtures, Fixture};
use qgemv::kernels::{scalar, VecMatParams};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qgemv-gen-vectors", version, about = "Generate golden test vectors from the scalar reference kernel")]
struct Args {
    /// Output fixture file (JSON)
    #[arg(long, default_value = "vectors.json")]
    out: PathBuf,

    /// Comma-separated row counts to cover
    #[arg(long, default_value = "0,1,2,3,4,5,7,8")]
    rows: String,

    /// Comma-separated column counts to cover
    #[arg(long, default_value = "1,3,4,5,15,16,17,32")]
    cols: String,

    /// Output stride in elements
    #[arg(long, default_value_t = 1)]
    address_offset: usize,

    /// Generate bias vectors (omitted otherwise)
    #[arg(long, default_value_t = false)]
    with_bias: bool,

    /// Input zero-point correction
    #[arg(long, default_value_t = 3)]
    lhs_offset: i32,

    /// Output zero-point
    #[arg(long, default_value_t = -1)]
    dst_offset: i32,

    /// RNG seed
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
}

fn parse_list(s: &str) -> Result<Vec<usize>> {
    s.split(',')
        .map(|t| t.trim().parse::<usize>().map_err(|e| anyhow::anyhow!("bad dimension '{}': {}", t, e)))
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let rows_list = parse_list(&args.rows)?;
    let cols_list = parse_list(&args.cols)?;

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut fixtures = Vec::new();

    for &rows in &rows_list {
        for &cols in &cols_list {
            let lhs: Vec<i8> = (0..cols).map(|_| rng.gen()).collect();
            let rhs: Vec<i8> = (0..rows * cols).map(|_| rng.gen()).collect();
            let bias = args
                .with_bias
                .then(|| (0..rows).map(|_| rng.gen_range(-512..=512)).collect::<Vec<i32>>());

            // Roughly 1/2^5 scale keeps most outputs inside s8 without
            // saturating everything.
            let params = VecMatParams {
                lhs_offset: args.lhs_offset,
                dst_offset: args.dst_offset,
                dst_multiplier: 0x4000_0000,
                dst_shift: 4,
                rhs_cols: cols,
                rhs_rows: rows,
                activation_min: -128,
                activation_max: 127,
                address_offset: args.address_offset,
            };

            let mut fx = Fixture {
                name: format!("r{}c{}s{}", rows, cols, args.address_offset),
                params,
                lhs,
                rhs,
                bias,
                expected: Vec::new(),
            };
            fx.expected = fx.run(scalar::vec_mat_mult_t_s8);
            fixtures.push(fx);
        }
    }

    info!("generated {} fixtures", fixtures.len());
    save_fixtures(&args.out, &fixtures)?;
    println!("wrote {} fixtures to {}", fixtures.len(), args.out.display());
    Ok(())
}
