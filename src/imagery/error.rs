use crate::model::ModelError;
use crate::recipe::RecipeError;
use crate::service::ServiceError;
use thiserror::Error;

use super::RebuildTicket;

pub type Result<T> = std::result::Result<T, ImageryError>;

#[derive(Debug, Error)]
pub enum ImageryError {
    #[error("imagery parameters rejected: {0}")]
    Model(#[from] ModelError),

    #[error("composition recipe rejected: {0}")]
    Recipe(#[from] RecipeError),

    #[error("imagery service error: {0}")]
    Service(#[from] ServiceError),

    #[error("no scenes match the current filters; keeping the previous composite")]
    NoScenes,

    #[error("no composite has been built yet")]
    NotComposited,

    #[error("rebuild {ticket:?} was superseded by {latest:?}; result discarded")]
    Superseded {
        ticket: RebuildTicket,
        latest: Option<RebuildTicket>,
    },

    #[error("unknown band preset: {0}")]
    UnknownPreset(String),

    #[error("invalid band preset `{name}`: {reason}")]
    InvalidPreset { name: String, reason: String },

    #[error("{bands} active bands but {ranges} ranges")]
    RangeCountMismatch { bands: usize, ranges: usize },
}
