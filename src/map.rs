mod error;
mod event;
mod headless;
mod view;


pub use error::{MapError, Result};
pub use event::{MapEvent, Viewport};
pub use headless::{HeadlessMap, MapSnapshot, PanelEntry, TileLayerEntry};
pub use view::{HistogramFigure, MapView, Panel, PanelHandle, PanelPosition, TileLayerHandle};
