use async_trait::async_trait;
use ontap_snap_library::{
    Collection, ErrorResponse, Job, JobLink, JobResponse, SnapshotRequest, VolumeRecord,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::library::{
    config::ConnectionConfig,
    constant::{CONNECT_TIMEOUT, JOBS_PATH, REQUEST_TIMEOUT, USER_AGENT, VOLUMES_PATH},
    error::ApiError,
};

/// The slice of the ONTAP REST API the snapshot workflow needs.
#[async_trait]
pub trait StorageApi: Send + Sync {
    /// Volumes named `volume_name` owned by the SVM `svm_name`.
    async fn find_volumes(
        &self,
        svm_name: &str,
        volume_name: &str,
    ) -> Result<Vec<VolumeRecord>, ApiError>;

    /// Submit a snapshot for the volume. Returns the job to wait on, if the
    /// cluster handed one back.
    async fn post_snapshot(
        &self,
        volume_uuid: &str,
        request: &SnapshotRequest,
    ) -> Result<Option<JobLink>, ApiError>;

    async fn get_job(&self, job_uuid: &str) -> Result<Job, ApiError>;
}

pub struct OntapClient {
    client: Client,
    base_url: String,
    config: ConnectionConfig,
}

impl OntapClient {
    pub fn new(config: &ConnectionConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!config.verify_ssl)
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(USER_AGENT.as_str())
            .build()
            .map_err(ApiError::Transport)?;

        Ok(OntapClient {
            client,
            base_url: config.base_url(),
            config: config.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request
            .basic_auth(&self.config.username, Some(self.config.password()))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        debug!(url = %response.url(), %status, "Cluster responded");

        if status.is_success() {
            let body = response.bytes().await.map_err(ApiError::Transport)?;
            return Ok(body.to_vec());
        }

        Err(status_error(response).await)
    }
}

async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let detail = response
        .json::<ErrorResponse>()
        .await
        .map(|body| body.error)
        .unwrap_or_default();

    let message = detail.message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });

    ApiError::Status {
        status,
        message,
        code: detail.code,
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

#[async_trait]
impl StorageApi for OntapClient {
    async fn find_volumes(
        &self,
        svm_name: &str,
        volume_name: &str,
    ) -> Result<Vec<VolumeRecord>, ApiError> {
        let url = self.url(VOLUMES_PATH);
        debug!(%url, svm = svm_name, volume = volume_name, "Looking up volume");

        let request = self.client.get(&url).query(&[
            ("svm.name", svm_name),
            ("name", volume_name),
            ("fields", "uuid,name,svm"),
        ]);
        let body = self.execute(request).await?;

        Ok(decode::<Collection<VolumeRecord>>(&url, &body)?.records)
    }

    async fn post_snapshot(
        &self,
        volume_uuid: &str,
        request: &SnapshotRequest,
    ) -> Result<Option<JobLink>, ApiError> {
        let url = self.url(&format!("{}/{}/snapshots", VOLUMES_PATH, volume_uuid));
        debug!(%url, snapshot = %request.name, "Posting snapshot");

        let body = self.execute(self.client.post(&url).json(request)).await?;

        // 201 Created comes back without a job.
        if body.is_empty() {
            return Ok(None);
        }

        Ok(decode::<JobResponse>(&url, &body)?.job)
    }

    async fn get_job(&self, job_uuid: &str) -> Result<Job, ApiError> {
        let url = self.url(&format!("{}/{}", JOBS_PATH, job_uuid));

        let request = self
            .client
            .get(&url)
            .query(&[("fields", "uuid,state,message,code")]);
        let body = self.execute(request).await?;

        decode(&url, &body)
    }
}
