//! SLURM batch scripts and the scheduler interface.
//!
//! Workloads are submitted as job arrays: one array task per command, with
//! the `%N` throttle bounding how many run at once.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClusterError, Result};

// ============================================================================
// Options
// ============================================================================

/// Resources requested for every array task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlurmClusterOptions {
    /// Partition
    pub queue: String,
    /// Cores per job
    pub cores: u32,
    /// Concurrent workers to start with
    pub scale: Option<usize>,
    /// Memory per job, e.g. `60GB`
    pub memory: String,
    /// `HH:MM:SS`
    pub walltime: String,
    pub account: Option<String>,
    /// Tasks per job; cores are split evenly between them
    pub processes: u32,
    /// Node-local scratch directory
    pub local_directory: PathBuf,
    /// Batch scripts, command lists and job logs
    pub log_dir: PathBuf,
    pub job_name: String,
    /// Raw `#SBATCH` arguments appended to the header
    pub job_extra_directives: Vec<String>,
    /// Additional options rendered as `--key=value`
    pub extra: BTreeMap<String, String>,
}

impl Default for SlurmClusterOptions {
    fn default() -> Self {
        Self {
            queue: "smp".to_string(),
            cores: 32,
            scale: Some(40),
            memory: "60GB".to_string(),
            walltime: "00:30:00".to_string(),
            account: None,
            processes: 1,
            local_directory: PathBuf::from("/tmp/"),
            log_dir: PathBuf::from("./log"),
            job_name: "gapfill-worker".to_string(),
            job_extra_directives: vec![
                "--qos=30min".to_string(),
                "--export=OMP_NUM_THREADS=1".to_string(),
            ],
            extra: BTreeMap::new(),
        }
    }
}

impl SlurmClusterOptions {
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(ClusterError::InvalidOptions(msg.to_string()));
        if self.queue.trim().is_empty() {
            return invalid("queue must not be empty");
        }
        if self.cores == 0 {
            return invalid("cores must be at least 1");
        }
        if self.processes == 0 || self.processes > self.cores {
            return invalid("processes must be between 1 and cores");
        }
        if self.memory.trim().is_empty() {
            return invalid("memory must not be empty");
        }
        if !is_walltime(&self.walltime) {
            return invalid("walltime must look like HH:MM:SS");
        }
        if self.job_name.trim().is_empty() {
            return invalid("job_name must not be empty");
        }
        Ok(())
    }

    /// `#SBATCH` arguments shared by every job of the cluster.
    pub fn directives(&self) -> Vec<String> {
        let mut directives = vec![
            format!("--partition={}", self.queue),
            format!("--ntasks={}", self.processes),
            format!("--cpus-per-task={}", (self.cores / self.processes).max(1)),
            format!("--mem={}", slurm_memory(&self.memory)),
            format!("--time={}", self.walltime),
        ];
        if let Some(account) = &self.account {
            directives.push(format!("--account={}", account));
        }
        directives.push(format!(
            "--output={}",
            self.log_dir.join("%x-%A_%a.out").display()
        ));
        directives.push(format!(
            "--error={}",
            self.log_dir.join("%x-%A_%a.err").display()
        ));
        directives.extend(self.job_extra_directives.iter().cloned());
        directives.extend(self.extra.iter().map(|(k, v)| format!("--{}={}", k, v)));
        directives
    }
}

fn is_walltime(value: &str) -> bool {
    let parts: Vec<&str> = value.split(':').collect();
    !parts.is_empty()
        && parts.len() <= 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Convert `60GB` style sizes to the `60G` form sbatch expects.
pub fn slurm_memory(memory: &str) -> String {
    let memory = memory.trim();
    let upper = memory.to_ascii_uppercase();
    match upper.strip_suffix('B') {
        Some(rest) if rest.ends_with(['K', 'M', 'G', 'T']) => rest.to_string(),
        _ => upper,
    }
}

// ============================================================================
// Batch script
// ============================================================================

/// A job-array batch script running one line of a command file per task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchScript {
    pub job_name: String,
    pub directives: Vec<String>,
    pub commands_file: PathBuf,
    pub task_count: usize,
    pub max_concurrent: usize,
    pub local_directory: PathBuf,
}

impl BatchScript {
    pub fn array_spec(&self) -> String {
        format!(
            "0-{}%{}",
            self.task_count.saturating_sub(1),
            self.max_concurrent
        )
    }

    pub fn render(&self) -> String {
        let mut out = String::from("#!/bin/bash\n");
        let mut directive = |arg: &str| {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "#SBATCH {}", arg);
        };
        directive(&format!("--job-name={}", self.job_name));
        for arg in &self.directives {
            directive(arg);
        }
        directive(&format!("--array={}", self.array_spec()));

        out.push('\n');
        let _ = writeln!(
            out,
            "export TMPDIR={}",
            shell_quote(&self.local_directory.display().to_string())
        );
        let _ = writeln!(
            out,
            "CMD=$(sed -n \"$((SLURM_ARRAY_TASK_ID + 1))p\" {})",
            shell_quote(&self.commands_file.display().to_string())
        );
        out.push_str("eval \"$CMD\"\n");
        out
    }
}

/// Single-quote a word for `sh`.
pub fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', "'\\''"))
}

// ============================================================================
// Scheduler
// ============================================================================

/// Submits and cancels batch jobs.
pub trait JobQueue: Send + Sync {
    /// Submit a batch script and return the job id.
    fn submit(&self, script: &Path) -> Result<String>;

    fn cancel(&self, job_id: &str) -> Result<()>;
}

/// Talks to SLURM through `sbatch` and `scancel`.
#[derive(Debug, Clone, Default)]
pub struct SbatchQueue;

impl JobQueue for SbatchQueue {
    fn submit(&self, script: &Path) -> Result<String> {
        let output = Command::new("sbatch")
            .arg("--parsable")
            .arg(script)
            .output()
            .map_err(|e| ClusterError::Command(format!("Failed to run sbatch: {}", e)))?;

        if !output.status.success() {
            return Err(ClusterError::Submission(format!(
                "sbatch failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let job_id = parse_job_id(&String::from_utf8_lossy(&output.stdout))?;
        debug!(%job_id, script = %script.display(), "Submitted batch script");
        Ok(job_id)
    }

    fn cancel(&self, job_id: &str) -> Result<()> {
        let output = Command::new("scancel")
            .arg(job_id)
            .output()
            .map_err(|e| ClusterError::Command(format!("Failed to run scancel: {}", e)))?;

        if !output.status.success() {
            return Err(ClusterError::Cancel(format!(
                "scancel {}: {}",
                job_id,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

/// Parse `sbatch --parsable` output: `jobid` or `jobid;cluster`.
pub fn parse_job_id(stdout: &str) -> Result<String> {
    let line = stdout.lines().map(str::trim).find(|l| !l.is_empty());
    match line.and_then(|l| l.split(';').next()) {
        Some(id) if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) => {
            Ok(id.to_string())
        }
        _ => Err(ClusterError::Submission(format!(
            "unexpected sbatch output: '{}'",
            stdout.trim()
        ))),
    }
}
