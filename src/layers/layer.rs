use std::fmt;

use serde::{Deserialize, Serialize};

use crate::imagery::ImagerySource;
use crate::map::TileLayerHandle;
use crate::service::TileUrl;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(u64);

impl LayerId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// A named imagery source drawn as one tile layer.
///
/// `render_handle` is held exactly while the layer is visible.
#[derive(Debug)]
pub struct Layer {
    pub(super) id: LayerId,
    pub(super) name: String,
    pub(super) source: ImagerySource,
    pub(super) visible: bool,
    pub(super) selected: bool,
    pub(super) render_handle: Option<TileLayerHandle>,
}

impl Layer {
    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &ImagerySource {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut ImagerySource {
        &mut self.source
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn render_handle(&self) -> Option<TileLayerHandle> {
        self.render_handle
    }

    pub fn tile_url(&self) -> Option<&TileUrl> {
        self.source.tile_url()
    }

    pub fn summary(&self) -> LayerSummary {
        let viz = self.source.visualization();
        LayerSummary {
            id: self.id,
            name: self.name.clone(),
            visible: self.visible,
            selected: self.selected,
            state: format!("{:?}", self.source.state()).to_lowercase(),
            composite_id: self.source.composite().map(|composite| composite.id.clone()),
            composite_revision: self.source.composite_revision(),
            scene_count: self
                .source
                .composite()
                .map(|composite| composite.scene_count),
            bands: self.source.active_bands().to_vec(),
            ranges: viz
                .map(|viz| viz.ranges().map(|(_, range)| range).collect())
                .unwrap_or_default(),
            tile_url: self.source.tile_url().cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSummary {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    pub selected: bool,
    pub state: String,
    pub composite_id: Option<String>,
    pub composite_revision: u64,
    pub scene_count: Option<usize>,
    pub bands: Vec<String>,
    pub ranges: Vec<(f64, f64)>,
    pub tile_url: Option<TileUrl>,
}
