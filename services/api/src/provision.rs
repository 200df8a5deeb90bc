//! The credential issuer: turns a join request into connection details.

use crate::{
    config::{Config, ConfigError},
    models::{ConnectionDetails, SessionRequest},
    token::{AccessToken, TokenError, VideoGrant},
};
use rand::Rng;

const ROOM_PREFIX: &str = "voice_room_";
const IDENTITY_PREFIX: &str = "user_";
/// Exclusive upper bound for the random identifier suffixes. Rooms are
/// single-use and expire with the credential, so this small space is enough
/// to make collisions rare without a registry of open rooms.
const SUFFIX_RANGE: u32 = 100_000;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Mints connection details for one session join attempt.
///
/// Stateless: a fresh room name and participant identity are drawn per call,
/// and nothing is created on the issuer side. The transport creates the room
/// (and dispatches the named agent into it) when the first participant
/// joins with the returned token.
pub fn issue_connection_details(
    config: &Config,
    request: &SessionRequest,
) -> Result<ConnectionDetails, ProvisionError> {
    let server_url = config.livekit_url()?;
    let api_key = config.livekit_api_key()?;
    let api_secret = config.livekit_api_secret()?;

    let agent_name = request
        .agent_name()
        .unwrap_or(&config.default_agent_name);

    // Two independent draws; no uniqueness check against existing rooms.
    let mut rng = rand::rng();
    let room_name = format!("{ROOM_PREFIX}{}", rng.random_range(0..SUFFIX_RANGE));
    let identity = format!("{IDENTITY_PREFIX}{}", rng.random_range(0..SUFFIX_RANGE));

    let participant_token = AccessToken::new(api_key, api_secret, &identity)
        .with_grant(VideoGrant::for_room(&room_name))
        .with_agent(agent_name)
        .to_jwt()?;

    Ok(ConnectionDetails {
        server_url: server_url.to_string(),
        room_name,
        participant_name: identity,
        participant_token,
    })
}
