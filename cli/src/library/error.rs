use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Anything that went wrong between us and the cluster.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach the cluster: {0}")]
    Transport(reqwest::Error),

    #[error("{status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
        code: Option<String>,
    },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("job {uuid} failed: {message}")]
    JobFailed { uuid: String, message: String },

    #[error("job {uuid} did not finish within {}s", .timeout.as_secs())]
    JobTimeout { uuid: String, timeout: Duration },
}

impl ApiError {
    /// The cluster's numeric error code, when it sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Status { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Failure to pin a (svm, volume) pair to exactly one volume.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Volume {volume} was not found in SVM {svm}")]
    NotFound { svm: String, volume: String },

    #[error("Found {count} volumes named {volume} in SVM {svm}, expected exactly one")]
    Ambiguous {
        svm: String,
        volume: String,
        count: usize,
    },

    #[error("Volume lookup failed")]
    Api(#[from] ApiError),
}
