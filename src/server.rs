//! HTTP transport for the signing and key-set endpoints.
//!
//! Routes:
//! - `POST /generate-jwt`: body is a JSON object of claims, response is
//!   `{"token": "..."}`.
//! - `GET /.well-known/jwks.json`: the public key set.
//! - `GET /healthz`: liveness probe.
//!
//! Failures are logged here and translated once into the
//! `{"message": ..., "error": ...}` wire shape; [`MockError`] never reaches
//! the wire directly.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use jsonwebtoken::jwk::JwkSet;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::core::{KeyStore, TokenBuilder, parse_claims};
use crate::error::MockError;

/// Path of the token signing endpoint.
pub const JWT_PATH: &str = "/generate-jwt";

/// Path of the published key set.
pub const JWKS_PATH: &str = "/.well-known/jwks.json";

/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/healthz";

/// Shared state handed to every request handler.
#[derive(Debug)]
pub struct AppState {
    key_store: KeyStore,
    builder: TokenBuilder,
}

impl AppState {
    /// Bundle an initialized key store with the token builder to sign with.
    pub fn new(key_store: KeyStore, builder: TokenBuilder) -> Self {
        Self { key_store, builder }
    }

    /// The key store backing this server.
    pub fn key_store(&self) -> &KeyStore {
        &self.key_store
    }
}

/// Successful response of the signing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed compact JWT.
    pub token: String,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short human-readable summary.
    pub message: String,
    /// Detail of the underlying failure.
    pub error: String,
}

/// Transport-level failures, each mapped to a status code and message.
#[derive(Debug)]
enum ApiError {
    ReadClaims(MockError),
    GenerateJwt(MockError),
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            Self::ReadClaims(e) => (StatusCode::BAD_REQUEST, "Failed to read claims", e.to_string()),
            Self::GenerateJwt(e) => (StatusCode::BAD_REQUEST, "Failed to generate JWT", e.to_string()),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                "Not found",
                "no such route or method".to_string(),
            ),
        };

        let body = ErrorResponse {
            message: message.to_string(),
            error: detail,
        };
        (status, Json(body)).into_response()
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(JWT_PATH, post(generate_jwt).fallback(not_found))
        .route(JWKS_PATH, get(jwks).fallback(not_found))
        .route(HEALTH_PATH, get(|| async { "ok" }))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        kid = state.key_store().current_key_id(),
        "jwt-mock listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C; shutting down");
        return;
    }
    info!("shutdown signal received");
}

/// Handle `POST /generate-jwt`.
async fn generate_jwt(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TokenResponse>, ApiError> {
    let claims = parse_claims(&body).map_err(|e| {
        error!(error = %e, "failed to read claims");
        ApiError::ReadClaims(e)
    })?;

    let key = state.key_store.signing_key();
    let token = state.builder.sign(&claims, &key).map_err(|e| {
        error!(error = %e, kid = key.id(), "failed to generate JWT");
        ApiError::GenerateJwt(e)
    })?;

    Ok(Json(TokenResponse { token }))
}

/// Handle `GET /.well-known/jwks.json`.
async fn jwks(State(state): State<Arc<AppState>>) -> Json<JwkSet> {
    Json(state.key_store.public_key_set())
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{KeyOptions, SigningAlgorithm};

    #[test]
    fn test_api_error_status_codes() {
        let decode = ApiError::ReadClaims(MockError::ClaimDecoding {
            reason: "bad".to_string(),
        });
        assert_eq!(decode.into_response().status(), StatusCode::BAD_REQUEST);

        let sign = ApiError::GenerateJwt(MockError::Signing {
            reason: "bad".to_string(),
        });
        assert_eq!(sign.into_response().status(), StatusCode::BAD_REQUEST);

        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_error_is_json() {
        let response = ApiError::NotFound.into_response();
        let content_type = response.headers()[axum::http::header::CONTENT_TYPE]
            .to_str()
            .unwrap();
        assert_eq!(content_type, "application/json");
    }

    #[test]
    fn test_app_state_exposes_key_store() {
        let store = KeyStore::initialize(&KeyOptions {
            algorithm: SigningAlgorithm::Es256,
            ..KeyOptions::default()
        })
        .unwrap();
        let kid = store.current_key_id().to_string();
        let state = AppState::new(store, TokenBuilder::default());
        assert_eq!(state.key_store().current_key_id(), kid);
    }
}
