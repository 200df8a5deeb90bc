//! API Models
//!
//! This module defines the wire-level data structures for the provisioning
//! endpoint, shared between the handlers and the OpenAPI documentation
//! generated with `utoipa`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Optional provisioning request body.
///
/// Mirrors the transport's room-configuration shape so clients can send the
/// same structure they would hand to the realtime SDK. Only the first agent
/// entry is consulted; everything else is ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SessionRequest {
    #[serde(default)]
    pub room_config: Option<RoomConfigHint>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RoomConfigHint {
    #[serde(default)]
    pub agents: Vec<AgentHint>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AgentHint {
    #[serde(default)]
    pub agent_name: Option<String>,
}

impl SessionRequest {
    /// The requested agent name, if the body carries one.
    pub fn agent_name(&self) -> Option<&str> {
        self.room_config
            .as_ref()?
            .agents
            .first()?
            .agent_name
            .as_deref()
    }
}

/// Everything a client needs to join its freshly provisioned room.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    #[schema(example = "wss://example.livekit.cloud")]
    pub server_url: String,
    #[schema(example = "voice_room_48291")]
    pub room_name: String,
    #[schema(example = "user_7310")]
    pub participant_name: String,
    pub participant_token: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
