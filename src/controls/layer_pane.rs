use serde::{Deserialize, Serialize};

use crate::imagery::ImagerySource;
use crate::layers::{LayerId, LayerManager};
use crate::map::MapView;
use crate::model::{Basemap, ImageParams};
use crate::service::ImageryService;

use super::Result;

const DEFAULT_LAYER_NAME: &str = "Sentinel-2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerInput {
    Basemap { name: String },
    Add {
        #[serde(default)]
        name: Option<String>,
    },
    Remove { layer: LayerId },
    Rename { layer: LayerId, name: String },
    Select { layer: LayerId },
    Visible { layer: LayerId, visible: bool },
}

#[derive(Debug, Clone)]
pub struct LayerPaneController {
    basemap: Basemap,
    defaults: ImageParams,
    preset: String,
    added: u64,
}

impl LayerPaneController {
    pub fn new(basemap: Basemap, defaults: ImageParams, preset: impl Into<String>) -> Self {
        Self {
            basemap,
            defaults,
            preset: preset.into(),
            added: 0,
        }
    }

    pub fn basemap(&self) -> Basemap {
        self.basemap
    }

    pub fn defaults(&self) -> &ImageParams {
        &self.defaults
    }

    pub fn new_source(&self) -> Result<ImagerySource> {
        Ok(ImagerySource::sentinel2_with_preset(
            self.defaults.clone(),
            &self.preset,
        )?)
    }

    pub fn handle(
        &mut self,
        input: LayerInput,
        layers: &mut LayerManager,
        map: &mut dyn MapView,
        service: &dyn ImageryService,
    ) -> Result<Option<LayerId>> {
        match input {
            LayerInput::Basemap { name } => {
                let basemap = name.parse::<Basemap>()?;
                map.set_basemap(basemap)?;
                self.basemap = basemap;
                log::info!("basemap set to {basemap}");
                Ok(None)
            }
            LayerInput::Add { name } => {
                let name = name.unwrap_or_else(|| self.default_name());
                let id = layers.add(map, service, &name, self.new_source()?)?;
                self.added += 1;
                Ok(Some(id))
            }
            LayerInput::Remove { layer } => {
                layers.remove(map, layer)?;
                Ok(Some(layer))
            }
            LayerInput::Rename { layer, name } => {
                layers.rename(layer, &name)?;
                Ok(Some(layer))
            }
            LayerInput::Select { layer } => {
                layers.select(layer)?;
                Ok(Some(layer))
            }
            LayerInput::Visible { layer, visible } => {
                layers.set_visible(map, layer, visible)?;
                Ok(Some(layer))
            }
        }
    }

    fn default_name(&self) -> String {
        if self.added == 0 {
            DEFAULT_LAYER_NAME.to_string()
        } else {
            format!("{DEFAULT_LAYER_NAME} ({})", self.added + 1)
        }
    }
}
