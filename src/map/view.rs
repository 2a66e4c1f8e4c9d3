use serde::{Deserialize, Serialize};

use crate::model::{Basemap, ImageParams};
use crate::service::TileUrl;

use super::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileLayerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PanelHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramFigure {
    pub band: String,
    pub color: String,
    pub bucket_centers: Vec<f64>,
    pub counts: Vec<f64>,
    pub interval: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Panel {
    ImageryParams {
        params: ImageParams,
    },
    Visualization {
        presets: Vec<String>,
        bands: Vec<String>,
        ranges: Vec<(f64, f64)>,
        limits: Vec<(f64, f64)>,
    },
    Layers {
        basemap: Basemap,
        layers: Vec<String>,
    },
    Histogram {
        figures: Vec<HistogramFigure>,
    },
}

impl Panel {
    pub fn kind(&self) -> &'static str {
        match self {
            Panel::ImageryParams { .. } => "imagery_params",
            Panel::Visualization { .. } => "visualization",
            Panel::Layers { .. } => "layers",
            Panel::Histogram { .. } => "histogram",
        }
    }
}

/// The interactive map widget and its panel layout.
///
/// Handles are only valid until released; releasing a handle twice is an
/// error.
pub trait MapView {
    fn add_tile_layer(&mut self, url: &TileUrl, name: &str) -> Result<TileLayerHandle>;

    fn update_tile_layer(&mut self, handle: TileLayerHandle, url: &TileUrl) -> Result<()>;

    fn remove_tile_layer(&mut self, handle: TileLayerHandle) -> Result<()>;

    fn add_panel(&mut self, panel: Panel, position: PanelPosition) -> Result<PanelHandle>;

    fn remove_panel(&mut self, handle: PanelHandle) -> Result<()>;

    fn set_basemap(&mut self, basemap: Basemap) -> Result<()>;
}
