use crate::imagery::ImageryError;
use crate::map::MapError;
use thiserror::Error;

use super::LayerId;

pub type Result<T> = std::result::Result<T, LayerError>;

#[derive(Debug, Error)]
pub enum LayerError {
    #[error("unknown layer: {0}")]
    UnknownLayer(LayerId),

    #[error("no layer is selected")]
    NoSelection,

    #[error("layer name must not be empty")]
    EmptyName,

    #[error("layer {0} has no tile URL to draw")]
    NothingToDraw(LayerId),

    #[error("layer imagery error: {0}")]
    Imagery(#[from] ImageryError),

    #[error("map error: {0}")]
    Map(#[from] MapError),
}
