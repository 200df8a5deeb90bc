//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests for session
//! provisioning. It uses `utoipa` doc comments to generate OpenAPI
//! documentation.

use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::error;

use crate::{
    models::{ConnectionDetails, ErrorResponse, SessionRequest},
    provision,
    state::AppState,
};

/// Any provisioning failure (missing secret, malformed body, or signing
/// failure) surfaces as a 500 carrying the triggering message. Nothing is
/// created issuer-side, so there is no partial state to report or roll back.
pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Provisioning request failed: {:?}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Provision a realtime session: a fresh room, a participant identity, and a
/// scoped 15-minute token with the agent dispatch directive embedded.
#[utoipa::path(
    post,
    path = "/api/connection-details",
    request_body(content = SessionRequest, description = "Optional agent selection hint"),
    responses(
        (status = 200, description = "Connection details for the new session", body = ConnectionDetails),
        (status = 500, description = "Provisioning failed", body = ErrorResponse)
    )
)]
pub async fn connection_details(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    // The body is optional; an empty one selects the default agent.
    let request: SessionRequest = if body.is_empty() {
        SessionRequest::default()
    } else {
        serde_json::from_slice(&body)?
    };

    let details = provision::issue_connection_details(&state.config, &request)?;

    // Grants are single-use credentials; intermediaries must never serve a
    // cached one to another client.
    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-store")],
        Json(details),
    ))
}
