//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the provisioning endpoint and OpenAPI documentation.

use crate::{
    handlers,
    models::{AgentHint, ConnectionDetails, ErrorResponse, RoomConfigHint, SessionRequest},
    state::AppState,
};

use axum::{Router, routing::post};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::connection_details),
    components(
        schemas(SessionRequest, RoomConfigHint, AgentHint, ConnectionDetails, ErrorResponse)
    ),
    tags(
        (name = "Parlor API", description = "Session provisioning for Parlor voice-agent rooms")
    )
)]
pub struct ApiDoc;

/// Writes the pretty-printed OpenAPI document for this service to `path`,
/// for clients that consume the schema outside a running server.
pub fn write_openapi(path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
    let spec_json = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(path, spec_json)?;
    Ok(())
}

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route(
            "/api/connection-details",
            post(handlers::connection_details),
        )
        .with_state(app_state);

    // Merge the stateful routes with the stateless ones (like Swagger UI).
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
