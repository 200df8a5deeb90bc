//! The data-channel wire format for structured state pushes.
//!
//! An update is a UTF-8 JSON object tagged by `type`, with the payload under
//! a tag-specific key: `{"type": "order_update", "order": {...}}` or
//! `{"type": "checkin_update", "checkin": {...}}`. The asymmetric payload
//! key is part of the wire contract with the agent backends. Messages carry
//! no sequence numbers or acknowledgements; each one is a full snapshot and
//! delivery order is whatever the transport provides.

use crate::{checkin::CheckInState, order::OrderState};
use serde::{Deserialize, Serialize};

/// Why a raw data-channel frame could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("frame is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("frame is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame is not a JSON object")]
    NotAnObject,
    #[error("frame has no string `type` field")]
    MissingType,
}

/// Why an update could not be encoded for publishing.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("cannot encode an update of unknown kind `{0}`")]
    UnknownKind(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A decoded data-channel update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateEnvelope {
    Order(OrderState),
    CheckIn(CheckInState),
    /// A well-formed envelope whose `type` this build does not know about.
    /// Projectors ignore these; they are not decode errors.
    Unknown(String),
}

/// Serde mirror of the wire layout for the known update kinds.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum WireUpdate {
    #[serde(rename = "order_update")]
    Order {
        #[serde(default)]
        order: OrderState,
    },
    #[serde(rename = "checkin_update")]
    CheckIn {
        #[serde(default)]
        checkin: CheckInState,
    },
}

impl UpdateEnvelope {
    /// The wire `type` tag for this update.
    pub fn kind(&self) -> &str {
        match self {
            UpdateEnvelope::Order(_) => "order_update",
            UpdateEnvelope::CheckIn(_) => "checkin_update",
            UpdateEnvelope::Unknown(kind) => kind,
        }
    }

    /// Decodes one raw data-channel frame.
    ///
    /// The frame must be UTF-8 JSON, must be an object, and must carry a
    /// string `type` tag. A known tag deserializes its typed payload, with
    /// omitted payload fields falling back to their null/empty defaults. An
    /// unrecognized tag yields [`UpdateEnvelope::Unknown`] so callers can
    /// tell "not for me" apart from "garbage".
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(raw)?;
        let value: serde_json::Value = serde_json::from_str(text)?;

        let kind = value
            .as_object()
            .ok_or(DecodeError::NotAnObject)?
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or(DecodeError::MissingType)?
            .to_owned();

        match kind.as_str() {
            "order_update" | "checkin_update" => {
                let update = match serde_json::from_value(value)? {
                    WireUpdate::Order { order } => UpdateEnvelope::Order(order),
                    WireUpdate::CheckIn { checkin } => UpdateEnvelope::CheckIn(checkin),
                };
                Ok(update)
            }
            _ => Ok(UpdateEnvelope::Unknown(kind)),
        }
    }

    /// Encodes this update to its wire form, the publisher side of
    /// [`UpdateEnvelope::decode`]. Agent backends call this before handing
    /// the bytes to the transport's data-publish primitive.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let wire = match self {
            UpdateEnvelope::Order(order) => WireUpdate::Order {
                order: order.clone(),
            },
            UpdateEnvelope::CheckIn(checkin) => WireUpdate::CheckIn {
                checkin: checkin.clone(),
            },
            UpdateEnvelope::Unknown(kind) => {
                return Err(EncodeError::UnknownKind(kind.clone()));
            }
        };
        Ok(serde_json::to_vec(&wire)?)
    }
}
