use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

pub static VERSION: LazyLock<String> = LazyLock::new(|| env!("CARGO_PKG_VERSION").to_string());

/// A page of records returned by an ONTAP collection endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    #[serde(default)]
    pub records: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_records: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SvmReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// A volume as returned by `GET /api/storage/volumes`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VolumeRecord {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svm: Option<SvmReference>,
}

/// Body of `POST /api/storage/volumes/{uuid}/snapshots`.
///
/// Only the name is sent; label, expiry and comment stay at the cluster's defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRequest {
    pub name: String,
}

impl SnapshotRequest {
    pub fn new(name: impl Into<String>) -> Self {
        SnapshotRequest { name: name.into() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Href {
    pub href: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SelfLink {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Href>,
}

/// Reference to an asynchronous job, handed back by mutating requests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobLink {
    pub uuid: String,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLink>,
}

impl JobLink {
    pub fn new(uuid: impl Into<String>) -> Self {
        let uuid = uuid.into();
        let href = format!("/api/cluster/jobs/{uuid}");

        JobLink {
            uuid,
            links: Some(SelfLink {
                self_link: Some(Href { href }),
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct JobResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<JobLink>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Queued,
    Running,
    Paused,
    Success,
    Failure,
    #[serde(other)]
    Unknown,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Success | JobState::Failure)
    }
}

/// A job as returned by `GET /api/cluster/jobs/{uuid}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub uuid: String,
    pub state: JobState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Body of every non-2xx response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: ErrorDetail,
}
