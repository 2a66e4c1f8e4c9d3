use crate::model::ModelError;
use thiserror::Error;

use super::{PanelHandle, TileLayerHandle};

pub type Result<T> = std::result::Result<T, MapError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    #[error("tile layer {0:?} is not on the map")]
    UnknownTileLayer(TileLayerHandle),

    #[error("panel {0:?} is not on the map")]
    UnknownPanel(PanelHandle),

    #[error("invalid viewport: {0}")]
    Viewport(#[from] ModelError),
}
