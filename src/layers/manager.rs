use crate::imagery::ImagerySource;
use crate::map::MapView;
use crate::service::{ImageryService, TileUrl};

use super::{Layer, LayerError, LayerId, LayerSummary, Result};

// Oldest first. Ids are never reused.
#[derive(Debug, Default)]
pub struct LayerManager {
    layers: Vec<Layer>,
    next_id: u64,
}

impl LayerManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> LayerId {
        self.next_id = self.next_id.saturating_add(1);
        LayerId::new(self.next_id)
    }

    pub fn add(
        &mut self,
        map: &mut dyn MapView,
        service: &dyn ImageryService,
        name: &str,
        mut source: ImagerySource,
    ) -> Result<LayerId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LayerError::EmptyName);
        }
        if source.composite().is_none() {
            source.rebuild_composite(service)?;
        }
        let url = source.get_tile_url(service)?;
        let handle = map.add_tile_layer(&url, name)?;

        let id = self.next_id();
        for layer in &mut self.layers {
            layer.selected = false;
        }
        self.layers.push(Layer {
            id,
            name: name.to_string(),
            source,
            visible: true,
            selected: true,
            render_handle: Some(handle),
        });
        log::info!("added layer {id} `{name}`");
        Ok(id)
    }

    pub fn remove(&mut self, map: &mut dyn MapView, id: LayerId) -> Result<Layer> {
        let index = self.index_of(id)?;
        if let Some(handle) = self.layers[index].render_handle {
            map.remove_tile_layer(handle)?;
        }
        let mut layer = self.layers.remove(index);
        layer.render_handle = None;
        if layer.selected {
            layer.selected = false;
            if let Some(last) = self.layers.last_mut() {
                last.selected = true;
                log::debug!("selection moved to layer {}", last.id);
            }
        }
        log::info!("removed layer {id} `{}`", layer.name);
        Ok(layer)
    }

    pub fn set_visible(&mut self, map: &mut dyn MapView, id: LayerId, visible: bool) -> Result<()> {
        let layer = self.layer_mut(id)?;
        if layer.visible == visible {
            return Ok(());
        }
        if visible {
            let url = layer
                .source
                .tile_url()
                .cloned()
                .ok_or(LayerError::NothingToDraw(id))?;
            layer.render_handle = Some(map.add_tile_layer(&url, &layer.name)?);
        } else if let Some(handle) = layer.render_handle {
            map.remove_tile_layer(handle)?;
            layer.render_handle = None;
        }
        layer.visible = visible;
        Ok(())
    }

    pub fn select(&mut self, id: LayerId) -> Result<()> {
        self.index_of(id)?;
        for layer in &mut self.layers {
            layer.selected = layer.id == id;
        }
        Ok(())
    }

    pub fn rename(&mut self, id: LayerId, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LayerError::EmptyName);
        }
        self.layer_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// Rebuilds the layer's composite and redraws it. On failure the layer
    /// keeps showing its last good tiles.
    pub fn refresh(
        &mut self,
        map: &mut dyn MapView,
        service: &dyn ImageryService,
        id: LayerId,
    ) -> Result<TileUrl> {
        let layer = self.layer_mut(id)?;
        layer.source.rebuild_composite(service)?;
        let url = layer.source.get_tile_url(service)?;
        if let Some(handle) = layer.render_handle {
            map.update_tile_layer(handle, &url)?;
        }
        Ok(url)
    }

    pub fn redraw(
        &mut self,
        map: &mut dyn MapView,
        service: &dyn ImageryService,
        id: LayerId,
    ) -> Result<TileUrl> {
        let layer = self.layer_mut(id)?;
        layer.source.recompute_visualization()?;
        let url = layer.source.get_tile_url(service)?;
        if let Some(handle) = layer.render_handle {
            map.update_tile_layer(handle, &url)?;
        }
        Ok(url)
    }

    pub fn get(&self, id: LayerId) -> Result<&Layer> {
        self.layers
            .iter()
            .find(|layer| layer.id == id)
            .ok_or(LayerError::UnknownLayer(id))
    }

    pub fn get_mut(&mut self, id: LayerId) -> Result<&mut Layer> {
        self.layer_mut(id)
    }

    pub fn get_selected(&self) -> Result<&Layer> {
        self.layers
            .iter()
            .find(|layer| layer.selected)
            .ok_or(LayerError::NoSelection)
    }

    pub fn get_selected_mut(&mut self) -> Result<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|layer| layer.selected)
            .ok_or(LayerError::NoSelection)
    }

    pub fn selected_id(&self) -> Option<LayerId> {
        self.get_selected().ok().map(Layer::id)
    }

    pub fn ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(Layer::id).collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.layers.iter().map(|layer| layer.name.clone()).collect()
    }

    pub fn summaries(&self) -> Vec<LayerSummary> {
        self.layers.iter().map(Layer::summary).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn index_of(&self, id: LayerId) -> Result<usize> {
        self.layers
            .iter()
            .position(|layer| layer.id == id)
            .ok_or(LayerError::UnknownLayer(id))
    }

    fn layer_mut(&mut self, id: LayerId) -> Result<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|layer| layer.id == id)
            .ok_or(LayerError::UnknownLayer(id))
    }
}
