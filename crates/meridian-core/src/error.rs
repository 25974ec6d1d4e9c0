use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown body part: {0}")]
    UnknownBodyPart(String),

    #[error("unknown severity band: {0}")]
    UnknownSeverity(String),

    #[error("unknown frequency level: {0}")]
    UnknownFrequency(String),

    #[error("unknown chronicity: {0}")]
    UnknownChronicity(String),
}
