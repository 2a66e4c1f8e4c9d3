use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("imagery service unreachable: {0}")]
    Unreachable(String),

    #[error("imagery service rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("imagery service response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("imagery service response could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("tile URL template `{0}` lacks a {{z}}/{{x}}/{{y}} placeholder")]
    InvalidTileUrl(String),

    #[error("histogram response is missing band `{0}`")]
    MissingBand(String),

    #[error("histogram for band `{band}` is malformed: {reason}")]
    MalformedHistogram { band: String, reason: String },
}
