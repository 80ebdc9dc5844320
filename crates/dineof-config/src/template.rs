//! DINEOF init file template.
//!
//! The init file is a flat list of `key = value` directives. List values
//! are written as `['a','b']`, strings are single-quoted, and a `path#var`
//! string addresses variable `var` inside a NetCDF file.

use std::fmt::Write;
use std::path::Path;

use gapfill_common::{DineofFiles, GlobalConfig};

use crate::layout::ExperimentPaths;
use crate::record::ParameterRecord;

/// Directives that do not vary per experiment.
pub mod constants {
    /// Number of EOF modes to start the search from
    pub const NEINI: i64 = 1;
    /// Extra Krylov vectors on top of `nev`
    pub const KRYLOV_MARGIN: i64 = 5;
    /// Lanczos convergence tolerance
    pub const TOL: f64 = 1.0e-8;
    /// Maximum iterations of the reconstruction loop
    pub const NITEMAX: i64 = 300;
    /// Stop when successive reconstructions differ by less than this
    pub const TOLITER: f64 = 1.0e-3;
    /// Write EOFs to disk
    pub const EOF: i64 = 1;
    /// Seed of the cross-validation point selection
    pub const SEED: u64 = 243435;
}

/// Variables handed to DINEOF: the PFTs, plus SST when the record asks for it.
pub fn selected_variables(config: &GlobalConfig, record: &ParameterRecord) -> Vec<String> {
    let mut variables = config.pft.clone();
    if record.sst {
        variables.push(config.dineof.sst_variable.clone());
    }
    variables
}

/// Fully resolved content of one init file.
#[derive(Debug, Clone, PartialEq)]
pub struct InitFile {
    pub data: Vec<String>,
    pub mask: Vec<String>,
    pub time: String,
    pub alpha: f64,
    pub numit: i64,
    pub nev: i64,
    pub neini: i64,
    pub ncv: i64,
    pub tol: f64,
    pub nitemax: i64,
    pub toliter: f64,
    pub rec: i64,
    pub eof: i64,
    pub norm: i64,
    pub output: String,
    pub results: Vec<String>,
    pub seed: u64,
    pub eof_u: Vec<String>,
    pub eof_v: String,
    pub eof_sigma: String,
    pub clouds: String,
}

impl InitFile {
    /// Assemble the directives for `variables`.
    ///
    /// Every per-variable list (`data`, `mask`, `results`, `EOF.U`) gets
    /// exactly one entry per variable.
    pub fn build(
        variables: &[String],
        record: &ParameterRecord,
        paths: &ExperimentPaths,
        files: &DineofFiles,
    ) -> Self {
        Self {
            data: per_variable(variables, &paths.data_file, |v| v.to_string()),
            mask: per_variable(variables, &paths.data_file, |_| files.mask_variable.clone()),
            time: nc_ref(&paths.data_file, &files.time_variable),
            alpha: record.alpha,
            numit: record.numit,
            nev: record.nev,
            neini: constants::NEINI,
            ncv: record.nev.saturating_add(constants::KRYLOV_MARGIN),
            tol: constants::TOL,
            nitemax: constants::NITEMAX,
            toliter: constants::TOLITER,
            rec: record.rec,
            eof: constants::EOF,
            norm: record.norm,
            output: format!("{}/", paths.reconstruction_dir.display()),
            results: per_variable(variables, &paths.results_file, |v| format!("{}_filled", v)),
            seed: constants::SEED,
            eof_u: per_variable(variables, &paths.eof_file, |v| format!("U_{}", v)),
            eof_v: nc_ref(&paths.eof_file, "V"),
            eof_sigma: nc_ref(&paths.eof_file, "Sigma"),
            clouds: nc_ref(&paths.clouds_file, &files.clouds_variable),
        }
    }

    /// Build straight from the global configuration.
    pub fn from_config(
        config: &GlobalConfig,
        record: &ParameterRecord,
        paths: &ExperimentPaths,
    ) -> Self {
        let variables = selected_variables(config, record);
        Self::build(&variables, record, paths, &config.dineof)
    }

    /// Render the init file text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "data = {}", list(&self.data))?;
        writeln!(out, "mask = {}", list(&self.mask))?;
        writeln!(out, "time = {}", quote(&self.time))?;
        writeln!(out, "alpha = {}", self.alpha)?;
        writeln!(out, "numit = {}", self.numit)?;
        writeln!(out, "nev = {}", self.nev)?;
        writeln!(out, "neini = {}", self.neini)?;
        writeln!(out, "ncv = {}", self.ncv)?;
        writeln!(out, "tol = {:.1e}", self.tol)?;
        writeln!(out, "nitemax = {}", self.nitemax)?;
        writeln!(out, "toliter = {:.1e}", self.toliter)?;
        writeln!(out, "rec = {}", self.rec)?;
        writeln!(out, "eof = {}", self.eof)?;
        writeln!(out, "norm = {}", self.norm)?;
        writeln!(out, "Output = {}", quote(&self.output))?;
        writeln!(out, "results = {}", list(&self.results))?;
        writeln!(out, "seed = {}", self.seed)?;
        writeln!(out, "EOF.U = {}", list(&self.eof_u))?;
        writeln!(out, "EOF.V = {}", quote(&self.eof_v))?;
        writeln!(out, "EOF.Sigma = {}", quote(&self.eof_sigma))?;
        writeln!(out, "clouds = {}", quote(&self.clouds))?;
        Ok(())
    }
}

/// One `path#name` entry per variable.
fn per_variable<F>(variables: &[String], path: &Path, name: F) -> Vec<String>
where
    F: Fn(&str) -> String,
{
    variables.iter().map(|v| nc_ref(path, &name(v))).collect()
}

/// `path#variable`
fn nc_ref(path: &Path, variable: &str) -> String {
    format!("{}#{}", path.display(), variable)
}

/// Single-quoted string, embedded quotes doubled.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn list(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| quote(v)).collect();
    format!("[{}]", quoted.join(","))
}
