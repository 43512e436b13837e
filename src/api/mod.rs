//! HTTP shell: router assembly, the bearer-token gate and the response
//! envelope. All filesystem semantics live in [`crate::sandbox`]; handlers
//! only translate between the wire and that component.

mod v1;

pub use v1::{ContentPayload, ListRequest, ReadPayload};

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::sandbox::Sandbox;

/// Shared state behind every handler.
pub struct AppState {
    pub sandbox: Sandbox,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let sandbox = Sandbox::new(&config.root);
        Self { sandbox, config }
    }
}

/// Uniform application-level response wrapper.
///
/// `code`/`success` carry the application status; the transport status stays
/// 200 for everything except failed authentication.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 200,
            success: true,
            message: String::new(),
            data,
        }
    }

    pub fn not_found(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 404,
            success: false,
            message: message.into(),
            data,
        }
    }

    pub fn server_error(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 500,
            success: false,
            message: message.into(),
            data,
        }
    }
}

/// Build the full application router.
///
/// The `/v1` routes sit behind the bearer gate; the liveness route and the
/// `/files` byte route (fetched by browsers following access URLs) do not.
pub fn router(state: Arc<AppState>) -> Router {
    let guarded = v1::router().layer(middleware::from_fn_with_state(
        state.clone(),
        require_bearer,
    ));

    Router::new()
        .merge(guarded)
        .route("/", get(liveness))
        .route("/files/*id", get(v1::serve_file))
        .with_state(state)
}

async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "file API service is running" }))
}

/// Rejects any request whose bearer token does not match the configured one,
/// before the handler touches the filesystem.
async fn require_bearer(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match presented {
        Some(token) if token_matches(token, &state.config.token) => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            "invalid authentication credentials",
        )
            .into_response(),
    }
}

/// Compare tokens through SHA-256 digests so the equality check does not
/// depend on where the strings first differ.
fn token_matches(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(expected.as_bytes())
}
