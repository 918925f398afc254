use thiserror::Error;

/// Reasons a signaling frame could not be decoded.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message is not a JSON object")]
    NotAnObject,

    #[error("message has no `type` field")]
    MissingType,

    #[error("`{0}` message has no `target` field")]
    MissingTarget(String),

    #[error("invalid peer id `{0}`")]
    InvalidPeerId(String),

    #[error("room id must not be empty")]
    EmptyRoom,
}
