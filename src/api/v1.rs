//! `/v1/file` endpoints: list, content and read, plus the `/files` byte
//! route the access URLs point at.
//!
//! Not-found and read failures are reported inside the envelope (application
//! codes 404/500 riding an HTTP 200); only `/files` answers with plain HTTP
//! statuses, since it is fetched by download clients rather than the
//! connector protocol.

use axum::{
    body::Body,
    extract::{Path as UrlPath, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{AppState, Envelope};
use crate::sandbox::{FileEntry, SandboxError};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/file/list", post(file_list))
        .route("/v1/file/content", get(file_content))
        .route("/v1/file/read", get(file_read))
}

/// Body of `POST /v1/file/list`. An absent or empty `parentId` lists the
/// sandbox root.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListRequest {
    pub parent_id: Option<String>,
    pub search_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: String,
}

/// Payload of a successful `/v1/file/content` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPayload {
    pub content: Option<String>,
    pub preview_url: Option<String>,
}

/// Payload of a successful `/v1/file/read` response.
#[derive(Debug, Serialize)]
pub struct ReadPayload {
    pub url: String,
}

async fn file_list(
    State(state): State<Arc<AppState>>,
    body: Option<Json<ListRequest>>,
) -> Response {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let parent_id = request.parent_id.filter(|id| !id.is_empty());
    let search_key = request.search_key.unwrap_or_default();

    let sandbox = state.sandbox.clone();
    let parent = parent_id.clone();
    let result = run_blocking(move || sandbox.list(parent.as_deref(), &search_key)).await;

    match result {
        Ok(entries) => Json(Envelope::ok(entries)).into_response(),
        Err(err) if err.is_not_found() => Json(Envelope::not_found(
            "directory does not exist",
            Vec::<FileEntry>::new(),
        ))
        .into_response(),
        Err(err) => {
            Json(Envelope::server_error(err.to_string(), Vec::<FileEntry>::new())).into_response()
        }
    }
}

async fn file_content(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Response {
    let sandbox = state.sandbox.clone();
    let id = query.id.clone();
    let result = run_blocking(move || sandbox.read_file(&id)).await;

    match result {
        Ok(content) => Json(Envelope::ok(ContentPayload {
            content: Some(content),
            preview_url: None,
        }))
        .into_response(),
        Err(err) if err.is_not_found() => Json(Envelope::not_found(
            "file does not exist or is a directory",
            empty_object(),
        ))
        .into_response(),
        Err(err) => Json(Envelope::server_error(
            format!("failed to read file: {}", err),
            empty_object(),
        ))
        .into_response(),
    }
}

async fn file_read(State(state): State<Arc<AppState>>, Query(query): Query<IdQuery>) -> Response {
    let sandbox = state.sandbox.clone();
    let id = query.id.clone();
    let result = run_blocking(move || sandbox.resolve_file(&id).map(|_| ())).await;

    match result {
        Ok(()) => {
            let url = format!(
                "{}/files/{}",
                state.config.public_url.trim_end_matches('/'),
                query.id
            );
            Json(Envelope::ok(ReadPayload { url })).into_response()
        }
        Err(err) if err.is_not_found() => Json(Envelope::not_found(
            "file does not exist or is a directory",
            empty_object(),
        ))
        .into_response(),
        Err(err) => {
            Json(Envelope::server_error(err.to_string(), empty_object())).into_response()
        }
    }
}

/// `GET /files/{id}` — serves the bytes behind an access URL returned by
/// `/v1/file/read`.
pub(super) async fn serve_file(
    State(state): State<Arc<AppState>>,
    UrlPath(id): UrlPath<String>,
) -> Response {
    let sandbox = state.sandbox.clone();
    let file_id = id.clone();
    let result = run_blocking(move || sandbox.read_bytes(&file_id)).await;

    match result {
        Ok(bytes) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(Body::from(bytes))
            .unwrap(),
        Err(err) if err.is_not_found() => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            tracing::error!(id, error = %err, "failed to serve file");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Run a blocking filesystem closure off the async worker threads.
async fn run_blocking<T>(
    work: impl FnOnce() -> Result<T, SandboxError> + Send + 'static,
) -> Result<T, SandboxError>
where
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| SandboxError::Internal(e.to_string()))?
}

fn empty_object() -> serde_json::Value {
    serde_json::json!({})
}
