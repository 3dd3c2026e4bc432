use std::fmt;

use ontap_snap_library::{Job, JobLink, JobState, SnapshotRequest, VolumeRecord};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::library::{
    config::PollConfig,
    error::{ApiError, LookupError},
    ontap::StorageApi,
    progress::create_job_spinner,
};

/// How a snapshot request ended, once the volume was found.
#[derive(Debug)]
pub enum SnapshotOutcome {
    Created { name: String },
    Failed { name: String, error: ApiError },
}

impl SnapshotOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, SnapshotOutcome::Created { .. })
    }
}

impl fmt::Display for SnapshotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotOutcome::Created { name } => {
                write!(f, "Snapshot {} created successfully", name)
            }
            SnapshotOutcome::Failed { error, .. } => {
                write!(f, "Error: Snapshot was not created: {}", error)
            }
        }
    }
}

/// Find the one volume called `volume_name` in `svm_name`.
pub async fn resolve_volume(
    api: &impl StorageApi,
    svm_name: &str,
    volume_name: &str,
) -> Result<VolumeRecord, LookupError> {
    let mut volumes = api.find_volumes(svm_name, volume_name).await?;

    match volumes.len() {
        0 => Err(LookupError::NotFound {
            svm: svm_name.to_string(),
            volume: volume_name.to_string(),
        }),
        1 => Ok(volumes.remove(0)),
        count => Err(LookupError::Ambiguous {
            svm: svm_name.to_string(),
            volume: volume_name.to_string(),
            count,
        }),
    }
}

/// Poll a job until it succeeds, fails, or `poll.timeout` runs out.
pub async fn wait_for_job(
    api: &impl StorageApi,
    link: &JobLink,
    poll: &PollConfig,
) -> Result<Job, ApiError> {
    let started = Instant::now();

    loop {
        let job = api.get_job(&link.uuid).await?;
        debug!(job = %job.uuid, state = ?job.state, "Polled job");

        if job.state.is_terminal() {
            if job.state == JobState::Success {
                return Ok(job);
            }

            return Err(ApiError::JobFailed {
                message: job
                    .message
                    .unwrap_or_else(|| "no message from cluster".to_string()),
                uuid: job.uuid,
            });
        }

        if started.elapsed() >= poll.timeout {
            return Err(ApiError::JobTimeout {
                uuid: link.uuid.clone(),
                timeout: poll.timeout,
            });
        }

        tokio::time::sleep(poll.interval).await;
    }
}

/// Create a snapshot with default settings on an already resolved volume.
pub async fn create_snapshot(
    api: &impl StorageApi,
    volume: &VolumeRecord,
    snapshot_name: &str,
    poll: &PollConfig,
) -> Result<(), ApiError> {
    let request = SnapshotRequest::new(snapshot_name);

    let Some(link) = api.post_snapshot(&volume.uuid, &request).await? else {
        return Ok(());
    };

    info!(job = %link.uuid, "Snapshot request accepted, waiting for job");

    let spinner = create_job_spinner(snapshot_name);
    let result = wait_for_job(api, &link, poll).await;
    spinner.finish_and_clear();

    let job = result?;
    info!(job = %job.uuid, "Job finished");

    Ok(())
}

/// Resolve the volume and snapshot it.
///
/// Lookup problems are errors. A rejected snapshot is an outcome, so the caller
/// decides what it means for the exit status.
pub async fn make_snapshot(
    api: &impl StorageApi,
    svm_name: &str,
    volume_name: &str,
    snapshot_name: &str,
    poll: &PollConfig,
) -> Result<SnapshotOutcome, LookupError> {
    let volume = resolve_volume(api, svm_name, volume_name).await?;
    info!(volume = volume_name, uuid = %volume.uuid, "Resolved volume");

    let name = snapshot_name.to_string();

    Ok(match create_snapshot(api, &volume, snapshot_name, poll).await {
        Ok(()) => SnapshotOutcome::Created { name },
        Err(error) => {
            warn!(code = error.code().unwrap_or("none"), "Snapshot request rejected");
            SnapshotOutcome::Failed { name, error }
        }
    })
}
