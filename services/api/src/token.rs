//! Signed, capability-scoped room access credentials.
//!
//! The realtime service accepts HS256 JWTs carrying the API key as issuer,
//! the participant identity as subject, a `video` grant scoping the
//! credential to a single room, and an optional room configuration naming
//! the agent to dispatch when the room is created.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Room credentials expire this long after issuance.
const TOKEN_TTL_MINUTES: i64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("credential signing failed: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

/// JWT claim set for a room access credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// API key identifier.
    pub iss: String,
    /// Participant identity.
    pub sub: String,
    /// Display name shown to other participants.
    pub name: String,
    pub nbf: i64,
    pub exp: i64,
    pub video: VideoGrant,
    #[serde(rename = "roomConfig", skip_serializing_if = "Option::is_none")]
    pub room_config: Option<RoomConfiguration>,
}

/// Capabilities granted to the participant, scoped to one room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    pub room: String,
    pub room_join: bool,
    pub can_publish: bool,
    pub can_publish_data: bool,
    pub can_subscribe: bool,
}

impl VideoGrant {
    /// Join, publish-media, publish-data, and subscribe rights for a single
    /// room. Nothing broader: no admin, no recording control.
    pub fn for_room(room: &str) -> Self {
        Self {
            room: room.to_string(),
            room_join: true,
            can_publish: true,
            can_publish_data: true,
            can_subscribe: true,
        }
    }
}

/// Directive telling the transport what to set up when the room is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfiguration {
    pub agents: Vec<RoomAgentDispatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAgentDispatch {
    pub agent_name: String,
}

/// Builder for signed room credentials.
pub struct AccessToken {
    api_key: String,
    api_secret: String,
    identity: String,
    ttl: Duration,
    grant: VideoGrant,
    room_config: Option<RoomConfiguration>,
}

impl AccessToken {
    pub fn new(api_key: &str, api_secret: &str, identity: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            identity: identity.to_string(),
            ttl: Duration::minutes(TOKEN_TTL_MINUTES),
            grant: VideoGrant::default(),
            room_config: None,
        }
    }

    pub fn with_grant(mut self, grant: VideoGrant) -> Self {
        self.grant = grant;
        self
    }

    /// Instructs the transport to dispatch the named agent into the room.
    pub fn with_agent(mut self, agent_name: &str) -> Self {
        self.room_config = Some(RoomConfiguration {
            agents: vec![RoomAgentDispatch {
                agent_name: agent_name.to_string(),
            }],
        });
        self
    }

    /// Signs the credential to its compact textual form.
    pub fn to_jwt(&self) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            iss: self.api_key.clone(),
            sub: self.identity.clone(),
            name: self.identity.clone(),
            nbf: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            video: self.grant.clone(),
            room_config: self.room_config.clone(),
        };

        let header = Header::new(Algorithm::HS256);
        let key = EncodingKey::from_secret(self.api_secret.as_bytes());
        Ok(jsonwebtoken::encode(&header, &claims, &key)?)
    }
}
