//! The global parameter store.
//!
//! Every field has a default matching the production Atlantic setup, so a
//! YAML file only needs to override what differs. `#[serde(default)]` is set
//! on each section for that reason.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bbox::GeoBounds;
use crate::error::{ConfigError, Result};
use crate::time::{DateRange, ExpeditionWindow};

/// Top-level configuration of the gap-filling pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Input and output directories
    pub paths: PathsConfig,

    /// Period considered for gap filling
    pub period: DateRange,

    /// General boundary used to crop the input dataset
    pub boundaries: GeoBounds,

    /// Validation window; these dates are always reconstructed
    pub expedition: ExpeditionWindow,

    /// Unit label of the reconstructed dataset (used on figures)
    pub units: String,

    /// PFT variables extracted from the satellite product
    pub pft: Vec<String>,

    /// Name of the flag dataset
    pub flags: String,

    /// Long name of each PFT
    pub pft_longname: BTreeMap<String, String>,

    /// HPLC pigment name -> satellite abbreviation
    pub pft_hplc: BTreeMap<String, String>,

    /// Uncertainty variables extracted from the satellite product
    pub unc: Vec<String>,

    /// Uncertainty variable -> PFT abbreviation
    pub unc_rename: BTreeMap<String, String>,

    /// SST dimension/variable renaming to the satellite convention
    pub sst_rename: BTreeMap<String, String>,

    /// DINCAE error variable -> PFT abbreviation
    pub dincae_error_rename: BTreeMap<String, String>,

    /// Tick values for plotting log-transformed concentrations
    pub plot_labels: Vec<f64>,

    /// File and variable names of the DINEOF working layout
    pub dineof: DineofFiles,
}

/// Directory layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub work_dir: PathBuf,
    pub data_dir: PathBuf,
    pub sst_file: PathBuf,
    /// Parent of the per-region working directories
    pub output_dir: PathBuf,
    pub fig_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let work_dir = PathBuf::from("/albedo/work/projects/p_phytooptics/emehdipo/PS113/CMEMS/");
        Self {
            data_dir: work_dir.join("data"),
            output_dir: work_dir.join("regions"),
            sst_file: PathBuf::from(
                "/albedo/work/projects/p_phytooptics/emehdipo/PS113/GHRSST/METOFFICE-GLO-SST-L4-NRT-OBS-SST-V2_2016_2019.nc",
            ),
            fig_dir: PathBuf::from("fig"),
            work_dir,
        }
    }
}

/// Names used when laying out DINEOF inputs and outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DineofFiles {
    /// Directory receiving generated `.init` files and record copies
    pub random_dir: PathBuf,
    /// Stored parameter record; `{random_dir}/params.json` when unset
    pub record_file: Option<PathBuf>,
    /// Subdirectory of a region holding per-experiment reconstructions
    pub reconstruction_dir: String,
    /// Gap-filled-ready dataset inside each region directory
    pub data_file: String,
    /// Cloud index file inside each region directory
    pub clouds_file: String,
    /// Reconstruction file written by DINEOF
    pub results_file: String,
    /// EOF decomposition file written by DINEOF
    pub eof_file: String,
    pub mask_variable: String,
    pub time_variable: String,
    pub clouds_variable: String,
    /// Variable appended to the PFT list when a record enables SST
    pub sst_variable: String,
}

impl Default for DineofFiles {
    fn default() -> Self {
        Self {
            random_dir: PathBuf::from("random"),
            record_file: None,
            reconstruction_dir: "dineof".to_string(),
            data_file: "dineof_input.nc".to_string(),
            clouds_file: "clouds_index.nc".to_string(),
            results_file: "dineof_output.nc".to_string(),
            eof_file: "eof.nc".to_string(),
            mask_variable: "mask".to_string(),
            time_variable: "time".to_string(),
            clouds_variable: "clouds".to_string(),
            sst_variable: "sst".to_string(),
        }
    }
}

impl DineofFiles {
    /// Location of the stored parameter record.
    pub fn record_path(&self) -> PathBuf {
        self.record_file
            .clone()
            .unwrap_or_else(|| self.random_dir.join("params.json"))
    }

    /// Directory receiving the JSON record copies.
    pub fn json_dir(&self) -> PathBuf {
        self.random_dir.join("json")
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn string_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        let pft = string_vec(&["CHL", "DIATO", "DINO", "HAPTO", "GREEN", "PROKAR"]);
        let unc = pft.iter().map(|p| format!("{}_uncertainty", p)).collect();
        let unc_rename = pft
            .iter()
            .map(|p| (format!("{}_uncertainty", p), p.clone()))
            .collect();
        let dincae_error_rename = pft
            .iter()
            .map(|p| (format!("{}_error", p), p.clone()))
            .collect();

        Self {
            paths: PathsConfig::default(),
            period: DateRange::new(ymd(2016, 4, 25), ymd(2019, 4, 25)),
            boundaries: GeoBounds::new(-64.0, 3.0, -50.0, 52.0),
            expedition: ExpeditionWindow {
                start: ymd(2018, 5, 10),
                end: ymd(2018, 6, 9),
                delta_days: 3,
            },
            units: r"$\frac{mg}{m^{3}}$".to_string(),
            flags: "flags".to_string(),
            pft_longname: string_map(&[
                ("CHL", "Total Chlorophyll-a"),
                ("DIATO", "Diatoms"),
                ("DINO", "Dinoflagellates"),
                ("HAPTO", "Haptophyte"),
                ("GREEN", "Green algae"),
                ("PROKAR", "Prokaryotes"),
            ]),
            pft_hplc: string_map(&[
                ("Diatoms", "DIATO"),
                ("Dinoflagelllates", "DINO"),
                ("Chlorophytes", "GREEN"),
                ("Haptophytes", "HAPTO"),
                ("Prochl", "PROCHLO"),
                ("Cyano_noProchl", "PROKAR"),
                ("TChla", "CHL"),
            ]),
            unc,
            unc_rename,
            sst_rename: string_map(&[
                ("latitude", "lat"),
                ("longitude", "lon"),
                ("analysed_sst", "sst"),
            ]),
            dincae_error_rename,
            plot_labels: vec![
                0.001, 0.003, 0.006, 0.01, 0.03, 0.06, 0.1, 0.3, 0.6, 1.0, 3.0, 6.0, 10.0, 30.0,
                60.0, 100.0,
            ],
            dineof: DineofFiles::default(),
            pft,
        }
    }
}

impl GlobalConfig {
    /// Every dataset extracted from the satellite product: PFTs, their
    /// uncertainties and the flag dataset.
    pub fn all_data(&self) -> Vec<String> {
        self.pft
            .iter()
            .chain(self.unc.iter())
            .cloned()
            .chain(std::iter::once(self.flags.clone()))
            .collect()
    }

    /// Working directory of a region.
    pub fn region_dir(&self, region: u32) -> PathBuf {
        self.paths.output_dir.join(region.to_string())
    }

    /// Long name of a PFT, falling back to the abbreviation.
    pub fn longname<'a>(&'a self, pft: &'a str) -> &'a str {
        self.pft_longname.get(pft).map(String::as_str).unwrap_or(pft)
    }

    /// Override the directory receiving init files and record copies.
    pub fn with_random_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dineof.random_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.pft.is_empty() {
            return Err(ConfigError::invalid("pft list must not be empty"));
        }
        if self.pft.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid("pft names must not be blank"));
        }
        if self.pft.contains(&self.dineof.sst_variable) {
            return Err(ConfigError::invalid(format!(
                "sst variable '{}' collides with a pft name",
                self.dineof.sst_variable
            )));
        }

        self.period
            .validate()
            .map_err(|e| ConfigError::invalid(format!("period: {}", e)))?;
        self.expedition
            .validate()
            .map_err(|e| ConfigError::invalid(format!("expedition: {}", e)))?;
        self.boundaries
            .validate()
            .map_err(|e| ConfigError::invalid(format!("boundaries: {}", e)))?;

        let names = [
            ("data_file", &self.dineof.data_file),
            ("clouds_file", &self.dineof.clouds_file),
            ("results_file", &self.dineof.results_file),
            ("eof_file", &self.dineof.eof_file),
            ("reconstruction_dir", &self.dineof.reconstruction_dir),
            ("mask_variable", &self.dineof.mask_variable),
            ("time_variable", &self.dineof.time_variable),
            ("clouds_variable", &self.dineof.clouds_variable),
            ("sst_variable", &self.dineof.sst_variable),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(format!("dineof.{} must not be empty", field)));
            }
        }

        Ok(())
    }
}
