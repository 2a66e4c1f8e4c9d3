use crate::imagery::ImageryError;
use crate::layers::LayerError;
use crate::map::MapError;
use crate::model::ModelError;
use crate::service::ServiceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ControlError>;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("control is not bound to a layer")]
    Unbound,

    #[error("slot {slot} does not exist; {count} slots are active")]
    InvalidSlot { slot: usize, count: usize },

    #[error("histogram is closed")]
    HistogramClosed,

    #[error("histogram figure for slot {slot} still shows band `{band}`")]
    StaleFigure { slot: usize, band: String },

    #[error("invalid input: {0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Imagery(#[from] ImageryError),

    #[error("{0}")]
    Layer(#[from] LayerError),

    #[error("{0}")]
    Map(#[from] MapError),

    #[error("{0}")]
    Service(#[from] ServiceError),
}
