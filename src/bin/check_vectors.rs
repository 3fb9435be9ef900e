use anyhow::{bail, Result};
use clap::Parser;
use log::{info, warn};
use qgemv::io::{load_fixtures, KernelFn};
use qgemv::kernels::{packed, scalar, wide};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qgemv-check-vectors", version, about = "Replay fixture files through every kernel body and report mismatches")]
struct Args {
    /// Fixture files (JSON) to check
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let bodies: [(&str, KernelFn); 3] = [
        ("scalar", scalar::vec_mat_mult_t_s8),
        ("packed", packed::vec_mat_mult_t_s8),
        ("wide", wide::vec_mat_mult_t_s8),
    ];

    let mut failures = 0usize;
    let mut checked = 0usize;
    for file in &args.files {
        let fixtures = load_fixtures(file)?;
        info!("{}: {} fixtures", file.display(), fixtures.len());
        for fx in &fixtures {
            for (label, body) in bodies {
                let got = fx.run(body);
                checked += 1;
                if got != fx.expected {
                    warn!(
                        "{} / {} [{}]: got {:?}, expected {:?}",
                        file.display(),
                        fx.name,
                        label,
                        got,
                        fx.expected
                    );
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} checks failed", failures, checked);
    }
    println!("ok: {} checks", checked);
    Ok(())
}
