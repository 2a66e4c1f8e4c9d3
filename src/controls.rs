mod error;
mod histogram;
mod imagery_pane;
mod layer_pane;
mod visualize;


pub use error::{ControlError, Result};
pub use histogram::{HistogramController, HistogramLink};
pub use imagery_pane::{ImageryForm, ImageryPaneController};
pub use layer_pane::{LayerInput, LayerPaneController};
pub use visualize::{BandSlot, VisualizationController, VizInput};
