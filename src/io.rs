//! JSON test-vector fixtures for the kernels.
//!
//! A fixture bundles one complete kernel call: parameters, operands and the
//! expected destination bytes. Files hold a list of fixtures and are produced
//! by the `gen_vectors` bin and replayed by `check_vectors` and the tests.

use crate::kernels::{KernelStatus, VecMatParams};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

/// Kernel body signature; lets fixtures replay any of the three strategies.
pub type KernelFn = fn(&[i8], &[i8], Option<&[i32]>, &mut [i8], &VecMatParams) -> KernelStatus;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("fixture '{name}': lhs length {got}, expected rhs_cols = {want}")]
    LhsLength { name: String, got: usize, want: usize },
    #[error("fixture '{name}': rhs length {got}, expected rows*cols = {want}")]
    RhsLength { name: String, got: usize, want: usize },
    #[error("fixture '{name}': bias length {got}, expected rhs_rows = {want}")]
    BiasLength { name: String, got: usize, want: usize },
    #[error("fixture '{name}': expected-output length {got}, needs at least {want}")]
    DstLength { name: String, got: usize, want: usize },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub params: VecMatParams,
    pub lhs: Vec<i8>,
    pub rhs: Vec<i8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias: Option<Vec<i32>>,
    pub expected: Vec<i8>,
}

impl Fixture {
    /// Destination length implied by the params (rows at address_offset stride).
    pub fn dst_len(&self) -> usize {
        let p = &self.params;
        if p.rhs_rows == 0 {
            0
        } else {
            (p.rhs_rows - 1) * p.address_offset + 1
        }
    }

    pub fn validate(&self) -> std::result::Result<(), FixtureError> {
        let p = &self.params;
        if self.lhs.len() != p.rhs_cols {
            return Err(FixtureError::LhsLength {
                name: self.name.clone(),
                got: self.lhs.len(),
                want: p.rhs_cols,
            });
        }
        if self.rhs.len() != p.rhs_rows * p.rhs_cols {
            return Err(FixtureError::RhsLength {
                name: self.name.clone(),
                got: self.rhs.len(),
                want: p.rhs_rows * p.rhs_cols,
            });
        }
        if let Some(b) = &self.bias {
            if b.len() != p.rhs_rows {
                return Err(FixtureError::BiasLength {
                    name: self.name.clone(),
                    got: b.len(),
                    want: p.rhs_rows,
                });
            }
        }
        if self.expected.len() < self.dst_len() {
            return Err(FixtureError::DstLength {
                name: self.name.clone(),
                got: self.expected.len(),
                want: self.dst_len(),
            });
        }
        Ok(())
    }

    /// Runs one kernel body over this fixture and returns the destination.
    /// Untouched stride gaps keep the sentinel value so tests can see them.
    pub fn run(&self, kernel: KernelFn) -> Vec<i8> {
        let mut dst = vec![0x55u8 as i8; self.dst_len()];
        kernel(
            &self.lhs,
            &self.rhs,
            self.bias.as_deref(),
            &mut dst,
            &self.params,
        );
        dst
    }
}

pub fn load_fixtures<P: AsRef<Path>>(path: P) -> Result<Vec<Fixture>> {
    let f = File::open(&path)
        .with_context(|| format!("open fixture file: {}", path.as_ref().display()))?;
    let fixtures: Vec<Fixture> =
        serde_json::from_reader(BufReader::new(f)).context("parse fixture json")?;
    for fx in &fixtures {
        fx.validate()?;
    }
    Ok(fixtures)
}

pub fn save_fixtures<P: AsRef<Path>>(path: P, fixtures: &[Fixture]) -> Result<()> {
    let f = File::create(&path)
        .with_context(|| format!("create fixture file: {}", path.as_ref().display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), fixtures).context("write fixture json")?;
    Ok(())
}
