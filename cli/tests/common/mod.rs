//! Fake ONTAP cluster served over loopback HTTP.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use ontap_snap_library::{
    Collection, ErrorDetail, ErrorResponse, Job, JobLink, JobResponse, JobState, SnapshotRequest,
    SvmReference, VolumeRecord,
};

// base64("admin:secret")
pub const EXPECTED_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

#[derive(Default)]
pub struct ClusterState {
    pub snapshots: Vec<String>,
    pub requests: Vec<String>,
}

pub type Shared = Arc<Mutex<ClusterState>>;

fn unauthorized(headers: &HeaderMap) -> Option<Response> {
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == EXPECTED_AUTH);

    if authorized {
        return None;
    }

    Some(
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: ErrorDetail {
                    message: Some("not authorized for that command".to_string()),
                    code: Some("6".to_string()),
                    target: None,
                },
            }),
        )
            .into_response(),
    )
}

async fn list_volumes(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Some(response) = unauthorized(&headers) {
        return response;
    }

    state.lock().unwrap().requests.push("GET volumes".to_string());

    let svm = query.get("svm.name").cloned().unwrap_or_default();
    let name = query.get("name").cloned().unwrap_or_default();

    let mut records = Vec::new();

    if svm == "svm1" && name == "vol1" {
        records.push(VolumeRecord {
            uuid: "028baa66-41bd-11e9-81d5-00a0986138f7".to_string(),
            name: Some(name),
            svm: Some(SvmReference {
                name: Some(svm),
                uuid: None,
            }),
        });
    }

    Json(Collection {
        num_records: Some(records.len() as u64),
        records,
    })
    .into_response()
}

async fn create_snapshot(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(volume_uuid): Path<String>,
    Json(request): Json<SnapshotRequest>,
) -> Response {
    if let Some(response) = unauthorized(&headers) {
        return response;
    }

    let mut state = state.lock().unwrap();
    state.requests.push(format!("POST {}", volume_uuid));

    if state.snapshots.contains(&request.name) {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: ErrorDetail {
                    message: Some(format!(
                        "Snapshot copy \"{}\" already exists.",
                        request.name
                    )),
                    code: Some("1638418".to_string()),
                    target: Some("name".to_string()),
                },
            }),
        )
            .into_response();
    }

    state.snapshots.push(request.name);

    (
        StatusCode::ACCEPTED,
        Json(JobResponse {
            job: Some(JobLink::new("e2bd4e4a-6e5c-11ea-8a1a-005056bb0f4d")),
        }),
    )
        .into_response()
}

async fn get_job(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(job_uuid): Path<String>,
) -> Response {
    if let Some(response) = unauthorized(&headers) {
        return response;
    }

    state
        .lock()
        .unwrap()
        .requests
        .push(format!("GET job {}", job_uuid));

    Json(Job {
        uuid: job_uuid,
        state: JobState::Success,
        message: Some("success".to_string()),
        code: Some(0),
    })
    .into_response()
}

pub async fn start_cluster() -> Result<(SocketAddr, Shared)> {
    let state = Shared::default();

    let app = Router::new()
        .route("/api/storage/volumes", get(list_volumes))
        .route("/api/storage/volumes/:uuid/snapshots", post(create_snapshot))
        .route("/api/cluster/jobs/:uuid", get(get_job))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok((addr, state))
}

