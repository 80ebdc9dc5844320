//! SLURM-backed cluster and its client.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use crate::error::{ClusterError, Result};
use crate::slurm::{BatchScript, JobQueue, SlurmClusterOptions};

/// Handle controlling the worker count of a cluster.
#[derive(Debug, Clone)]
pub struct SlurmCluster {
    options: SlurmClusterOptions,
    workers: Arc<AtomicUsize>,
}

impl SlurmCluster {
    /// Set the number of array tasks allowed to run at once.
    pub fn scale(&self, workers: usize) {
        info!(workers, "Scaling cluster");
        self.workers.store(workers, Ordering::SeqCst);
    }

    pub fn workers(&self) -> usize {
        self.workers.load(Ordering::SeqCst)
    }

    pub fn options(&self) -> &SlurmClusterOptions {
        &self.options
    }
}

/// Submits work to the cluster.
pub struct ClusterClient {
    options: SlurmClusterOptions,
    directives: Vec<String>,
    workers: Arc<AtomicUsize>,
    queue: Arc<dyn JobQueue>,
    submitted: Mutex<Vec<String>>,
}

impl std::fmt::Debug for ClusterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterClient")
            .field("job_name", &self.options.job_name)
            .field("log_dir", &self.options.log_dir)
            .field("workers", &self.workers.load(Ordering::SeqCst))
            .finish()
    }
}

/// Set up a SLURM cluster and a client connected to it.
///
/// Creates the log directory and scales to `options.scale` when set.
pub fn slurm_cluster(
    options: SlurmClusterOptions,
    queue: Arc<dyn JobQueue>,
) -> Result<(SlurmCluster, ClusterClient)> {
    options.validate()?;
    fs::create_dir_all(&options.log_dir).map_err(|e| ClusterError::io(&options.log_dir, e))?;

    let directives = options.directives();
    let workers = Arc::new(AtomicUsize::new(0));
    let cluster = SlurmCluster {
        options: options.clone(),
        workers: Arc::clone(&workers),
    };
    if let Some(n) = options.scale {
        cluster.scale(n);
    }

    info!(
        queue = %options.queue,
        cores = options.cores,
        memory = %options.memory,
        walltime = %options.walltime,
        log_dir = %options.log_dir.display(),
        "Started SLURM cluster"
    );

    let client = ClusterClient {
        options,
        directives,
        workers,
        queue,
        submitted: Mutex::new(Vec::new()),
    };
    Ok((cluster, client))
}

impl ClusterClient {
    /// `#SBATCH` arguments every job carries.
    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    /// Ids of jobs submitted and not yet cancelled.
    pub fn job_ids(&self) -> Vec<String> {
        self.job_list().clone()
    }

    /// Paths of the command list and batch script for job `name`.
    pub fn job_files(&self, name: &str) -> (PathBuf, PathBuf) {
        let dir = &self.options.log_dir;
        (
            dir.join(format!("{}.commands", name)),
            dir.join(format!("{}.sbatch", name)),
        )
    }

    /// Submit `commands` as one job array and return its id.
    ///
    /// `name` becomes a file name inside the log directory and must not
    /// contain path separators.
    pub fn submit_commands(&self, name: &str, commands: &[String]) -> Result<String> {
        validate_job_name(name)?;
        if commands.is_empty() {
            return Err(ClusterError::EmptyJob(name.to_string()));
        }
        if let Some(bad) = commands.iter().find(|c| c.contains('\n')) {
            return Err(ClusterError::InvalidOptions(format!(
                "command spans several lines: {:?}",
                bad
            )));
        }
        let workers = self.workers.load(Ordering::SeqCst);
        if workers == 0 {
            return Err(ClusterError::InvalidOptions(
                "cluster has no workers; call scale first".to_string(),
            ));
        }

        let (commands_file, script_file) = self.job_files(name);
        let mut listing = commands.join("\n");
        listing.push('\n');
        fs::write(&commands_file, listing).map_err(|e| ClusterError::io(&commands_file, e))?;

        let script = BatchScript {
            job_name: format!("{}-{}", self.options.job_name, name),
            directives: self.directives.clone(),
            commands_file,
            task_count: commands.len(),
            max_concurrent: workers,
            local_directory: self.options.local_directory.clone(),
        };
        fs::write(&script_file, script.render()).map_err(|e| ClusterError::io(&script_file, e))?;

        let job_id = self.queue.submit(&script_file)?;
        self.job_list().push(job_id.clone());

        info!(
            %job_id,
            job = name,
            tasks = commands.len(),
            max_concurrent = workers,
            "Submitted job array"
        );
        Ok(job_id)
    }

    /// Submitted ids. A panic elsewhere while holding the lock leaves the
    /// list intact, so it is recovered rather than dropped.
    fn job_list(&self) -> MutexGuard<'_, Vec<String>> {
        self.submitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cancel every job this client submitted.
    pub fn close(&self) -> Result<()> {
        let ids = std::mem::take(&mut *self.job_list());

        let mut failures = Vec::new();
        for job_id in &ids {
            if let Err(e) = self.queue.cancel(job_id) {
                warn!(%job_id, error = %e, "Failed to cancel job");
                failures.push(job_id.clone());
            }
        }

        info!(cancelled = ids.len() - failures.len(), "Closed cluster client");
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ClusterError::Cancel(failures.join(", ")))
        }
    }
}

fn validate_job_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ClusterError::InvalidOptions(format!(
            "job name '{}' is not a valid file name",
            name
        )));
    }
    Ok(())
}
