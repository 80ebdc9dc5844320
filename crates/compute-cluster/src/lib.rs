//! Execution backends for gap-filling workloads.
//!
//! Two ways to run work:
//! - [`local_client`]: a rayon thread pool inside the current process
//! - [`slurm_cluster`]: SLURM job arrays, one array task per command
//!
//! The scheduler is reached through the [`JobQueue`] trait; [`SbatchQueue`]
//! shells out to `sbatch` and `scancel`.

pub mod cluster;
pub mod error;
pub mod local;
pub mod slurm;

pub use cluster::{slurm_cluster, ClusterClient, SlurmCluster};
pub use error::{ClusterError, Result};
pub use local::{local_client, CommandOutcome, LocalClient, LocalClientOptions};
pub use slurm::{parse_job_id, slurm_memory, BatchScript, JobQueue, SbatchQueue, SlurmClusterOptions};
