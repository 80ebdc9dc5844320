//! In-process execution on a rayon thread pool.

use std::process::Command;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ClusterError, Result};

/// Sizing of the local pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalClientOptions {
    /// Number of logical workers
    pub worker_count: usize,
    /// Threads per worker; derived from the CPU count when unset
    pub threads_per_worker: Option<usize>,
}

impl Default for LocalClientOptions {
    fn default() -> Self {
        Self {
            worker_count: 8,
            threads_per_worker: None,
        }
    }
}

impl LocalClientOptions {
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count,
            ..Default::default()
        }
    }

    pub fn with_threads_per_worker(mut self, threads: usize) -> Self {
        self.threads_per_worker = Some(threads);
        self
    }

    /// Threads per worker after defaulting.
    pub fn resolved_threads_per_worker(&self, available_cpus: usize) -> usize {
        self.threads_per_worker
            .unwrap_or_else(|| available_cpus / self.worker_count.max(1))
            .max(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(ClusterError::InvalidOptions(
                "worker_count must be at least 1".to_string(),
            ));
        }
        if self.threads_per_worker == Some(0) {
            return Err(ClusterError::InvalidOptions(
                "threads_per_worker must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Exit status of one shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub command: String,
    /// Process exit code; `None` when killed by a signal or never started
    pub exit_code: Option<i32>,
    /// Spawn failure, if any
    pub error: Option<String>,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Client backed by a dedicated thread pool.
pub struct LocalClient {
    pool: ThreadPool,
    worker_count: usize,
    threads_per_worker: usize,
}

impl std::fmt::Debug for LocalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalClient")
            .field("worker_count", &self.worker_count)
            .field("threads_per_worker", &self.threads_per_worker)
            .finish()
    }
}

/// Start a local client.
pub fn local_client(options: LocalClientOptions) -> Result<LocalClient> {
    options.validate()?;

    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads_per_worker = options.resolved_threads_per_worker(available);
    let total = options
        .worker_count
        .checked_mul(threads_per_worker)
        .ok_or_else(|| {
            ClusterError::InvalidOptions(format!(
                "{} workers x {} threads overflows the thread count",
                options.worker_count, threads_per_worker
            ))
        })?;

    let pool = ThreadPoolBuilder::new()
        .num_threads(total)
        .thread_name(|i| format!("gapfill-worker-{}", i))
        .build()?;

    info!(
        workers = options.worker_count,
        threads_per_worker,
        total_threads = total,
        "Started local client"
    );

    Ok(LocalClient {
        pool,
        worker_count: options.worker_count,
        threads_per_worker,
    })
}

impl LocalClient {
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn threads_per_worker(&self) -> usize {
        self.threads_per_worker
    }

    pub fn total_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Apply `f` to every item on the pool. Output order follows input order.
    pub fn map<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync + Send,
    {
        self.pool.install(|| items.into_par_iter().map(f).collect())
    }

    /// Run shell commands concurrently and collect their exit status.
    pub fn run_commands(&self, commands: &[String]) -> Vec<CommandOutcome> {
        let outcomes = self.map(commands.to_vec(), |command| run_shell(&command));
        let failed = outcomes.iter().filter(|o| !o.success()).count();
        if failed > 0 {
            warn!(failed, total = outcomes.len(), "Some commands failed");
        } else {
            debug!(total = outcomes.len(), "All commands succeeded");
        }
        outcomes
    }
}

fn run_shell(command: &str) -> CommandOutcome {
    debug!(%command, "Running command");
    match Command::new("sh").arg("-c").arg(command).status() {
        Ok(status) => CommandOutcome {
            command: command.to_string(),
            exit_code: status.code(),
            error: None,
        },
        Err(e) => CommandOutcome {
            command: command.to_string(),
            exit_code: None,
            error: Some(format!("Failed to run sh: {}", e)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LocalClientOptions::default();
        assert_eq!(options.worker_count, 8);
        assert_eq!(options.threads_per_worker, None);
    }

    #[test]
    fn test_resolved_threads() {
        let options = LocalClientOptions::new(4);
        assert_eq!(options.resolved_threads_per_worker(16), 4);
        assert_eq!(options.resolved_threads_per_worker(2), 1);
        assert_eq!(options.with_threads_per_worker(3).resolved_threads_per_worker(16), 3);
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            local_client(LocalClientOptions::new(0)),
            Err(ClusterError::InvalidOptions(_))
        ));
        assert!(LocalClientOptions::new(1)
            .with_threads_per_worker(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_thread_count_overflow_rejected() {
        let options = LocalClientOptions::new(2).with_threads_per_worker(usize::MAX);
        assert!(matches!(
            local_client(options),
            Err(ClusterError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_pool_size() {
        let client = local_client(LocalClientOptions::new(2).with_threads_per_worker(3)).unwrap();
        assert_eq!(client.total_threads(), 6);
        assert_eq!(client.worker_count(), 2);
    }
}
