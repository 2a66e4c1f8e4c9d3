use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::Basemap;
use crate::service::TileUrl;

use super::{MapError, MapView, Panel, PanelHandle, PanelPosition, Result, TileLayerHandle};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayerEntry {
    pub handle: TileLayerHandle,
    pub name: String,
    pub url: TileUrl,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelEntry {
    pub handle: PanelHandle,
    pub position: PanelPosition,
    pub panel: Panel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSnapshot {
    pub basemap: Basemap,
    pub basemap_url: String,
    pub tile_layers: Vec<TileLayerEntry>,
    pub panels: Vec<PanelEntry>,
}

#[derive(Debug, Default)]
pub struct HeadlessMap {
    basemap: Basemap,
    tile_layers: BTreeMap<TileLayerHandle, (String, TileUrl)>,
    panels: BTreeMap<PanelHandle, (PanelPosition, Panel)>,
    next_handle: u64,
}

impl HeadlessMap {
    pub fn new(basemap: Basemap) -> Self {
        Self {
            basemap,
            ..Self::default()
        }
    }

    pub fn basemap(&self) -> Basemap {
        self.basemap
    }

    pub fn tile_layer(&self, handle: TileLayerHandle) -> Option<(&str, &TileUrl)> {
        self.tile_layers
            .get(&handle)
            .map(|(name, url)| (name.as_str(), url))
    }

    pub fn tile_layer_count(&self) -> usize {
        self.tile_layers.len()
    }

    pub fn panel(&self, handle: PanelHandle) -> Option<&Panel> {
        self.panels.get(&handle).map(|(_, panel)| panel)
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels.values().map(|(_, panel)| panel)
    }

    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            basemap: self.basemap,
            basemap_url: self.basemap.tile_url().to_string(),
            tile_layers: self
                .tile_layers
                .iter()
                .map(|(handle, (name, url))| TileLayerEntry {
                    handle: *handle,
                    name: name.clone(),
                    url: url.clone(),
                })
                .collect(),
            panels: self
                .panels
                .iter()
                .map(|(handle, (position, panel))| PanelEntry {
                    handle: *handle,
                    position: *position,
                    panel: panel.clone(),
                })
                .collect(),
        }
    }

    fn allocate(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl MapView for HeadlessMap {
    fn add_tile_layer(&mut self, url: &TileUrl, name: &str) -> Result<TileLayerHandle> {
        let handle = TileLayerHandle(self.allocate());
        log::debug!("map: add tile layer {handle:?} `{name}`");
        self.tile_layers
            .insert(handle, (name.to_string(), url.clone()));
        Ok(handle)
    }

    fn update_tile_layer(&mut self, handle: TileLayerHandle, url: &TileUrl) -> Result<()> {
        let (_, current) = self
            .tile_layers
            .get_mut(&handle)
            .ok_or(MapError::UnknownTileLayer(handle))?;
        *current = url.clone();
        Ok(())
    }

    fn remove_tile_layer(&mut self, handle: TileLayerHandle) -> Result<()> {
        self.tile_layers
            .remove(&handle)
            .ok_or(MapError::UnknownTileLayer(handle))?;
        log::debug!("map: removed tile layer {handle:?}");
        Ok(())
    }

    fn add_panel(&mut self, panel: Panel, position: PanelPosition) -> Result<PanelHandle> {
        let handle = PanelHandle(self.allocate());
        log::debug!("map: add {} panel {handle:?}", panel.kind());
        self.panels.insert(handle, (position, panel));
        Ok(handle)
    }

    fn remove_panel(&mut self, handle: PanelHandle) -> Result<()> {
        self.panels
            .remove(&handle)
            .ok_or(MapError::UnknownPanel(handle))?;
        Ok(())
    }

    fn set_basemap(&mut self, basemap: Basemap) -> Result<()> {
        log::debug!("map: basemap {basemap}");
        self.basemap = basemap;
        Ok(())
    }
}
