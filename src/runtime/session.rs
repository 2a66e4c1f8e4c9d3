use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::controls::{
    HistogramController, HistogramLink, ImageryForm, ImageryPaneController, LayerInput,
    LayerPaneController, VisualizationController, VizInput,
};
use crate::layers::{LayerId, LayerManager, LayerSummary};
use crate::map::{MapEvent, MapView, Panel, PanelHandle, PanelPosition, Viewport};
use crate::model::Bounds;
use crate::service::ImageryService;

use super::{Result, SessionConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pane {
    Imagery,
    Visualization,
    Layers,
}

impl Pane {
    fn position(&self) -> PanelPosition {
        match self {
            Pane::Imagery | Pane::Visualization => PanelPosition::TopLeft,
            Pane::Layers => PanelPosition::TopRight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionInput {
    Pan { bounds: Bounds },
    Zoom { zoom: u8 },
    Imagery { form: ImageryForm },
    Visualize { change: VizInput },
    Layers { change: LayerInput },
    ToggleHistogram,
    HistogramInterval { slot: usize, lo: f64, hi: f64 },
    TogglePane { pane: Pane },
}

impl SessionInput {
    pub fn action(&self) -> &'static str {
        match self {
            SessionInput::Pan { .. } => "pan",
            SessionInput::Zoom { .. } => "zoom",
            SessionInput::Imagery { .. } => "imagery",
            SessionInput::Visualize { .. } => "visualize",
            SessionInput::Layers { .. } => "layers",
            SessionInput::ToggleHistogram => "toggle_histogram",
            SessionInput::HistogramInterval { .. } => "histogram_interval",
            SessionInput::TogglePane { .. } => "toggle_pane",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub viewport: Viewport,
    pub selected: Option<LayerId>,
    pub layers: Vec<LayerSummary>,
    pub histogram: Vec<HistogramLink>,
    pub open_panes: Vec<Pane>,
}

/// Wires the map, the imagery service, the layers and every controller.
///
/// Controllers always target the selected layer: whenever the selection
/// changes they are rebound, and an open histogram is closed.
#[derive(Debug)]
pub struct Session<M, S> {
    map: M,
    service: S,
    layers: LayerManager,
    viewport: Viewport,
    visualization: VisualizationController,
    histogram: HistogramController,
    imagery_pane: ImageryPaneController,
    layer_pane: LayerPaneController,
    panes: BTreeMap<Pane, PanelHandle>,
}

impl<M: MapView, S: ImageryService> Session<M, S> {
    pub fn start(mut map: M, service: S, config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let viewport = Viewport::centered(config.map.center, config.map.zoom, config.map.size)?;
        map.set_basemap(config.map.basemap)?;
        let layer_pane = LayerPaneController::new(
            config.map.basemap,
            config.imagery.params()?,
            config.imagery.preset.clone(),
        );

        let mut session = Self {
            map,
            service,
            layers: LayerManager::new(),
            viewport,
            visualization: VisualizationController::new(),
            histogram: HistogramController::new(),
            imagery_pane: ImageryPaneController::new(),
            layer_pane,
            panes: BTreeMap::new(),
        };
        session.handle(SessionInput::Layers {
            change: LayerInput::Add {
                name: Some(config.imagery.layer_name.clone()),
            },
        })?;
        log::info!(
            "session started at ({}, {}) zoom {}",
            config.map.center.0,
            config.map.center.1,
            session.viewport.zoom()
        );
        Ok(session)
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn visualization(&self) -> &VisualizationController {
        &self.visualization
    }

    pub fn histogram(&self) -> &HistogramController {
        &self.histogram
    }

    pub fn imagery_pane(&self) -> &ImageryPaneController {
        &self.imagery_pane
    }

    pub fn layer_pane(&self) -> &LayerPaneController {
        &self.layer_pane
    }

    pub fn is_pane_open(&self, pane: Pane) -> bool {
        self.panes.contains_key(&pane)
    }

    pub fn handle_map_event(&mut self, event: MapEvent) -> Result<()> {
        self.viewport.apply(event)?;
        Ok(())
    }

    /// Applies one input. Controllers are rebound afterwards if the
    /// selection moved, even when the input itself failed.
    pub fn handle(&mut self, input: SessionInput) -> Result<()> {
        let before = self.layers.selected_id();
        let action = input.action();
        let outcome = self.dispatch(input);
        if let Err(error) = &outcome {
            log::warn!("{action} failed ({}): {error}", error.kind());
        }
        if self.layers.selected_id() != before {
            self.rebind()?;
        }
        outcome
    }

    fn dispatch(&mut self, input: SessionInput) -> Result<()> {
        match input {
            SessionInput::Pan { bounds } => {
                self.handle_map_event(MapEvent::BoundsChanged { bounds })?;
            }
            SessionInput::Zoom { zoom } => {
                self.handle_map_event(MapEvent::ZoomChanged { zoom })?;
            }
            SessionInput::Imagery { form } => {
                self.imagery_pane
                    .submit(form, &mut self.layers, &mut self.map, &self.service)?;
                self.refresh_pane(Pane::Imagery)?;
            }
            SessionInput::Visualize { change } => {
                self.visualize(change)?;
            }
            SessionInput::Layers { change } => {
                self.layer_pane
                    .handle(change, &mut self.layers, &mut self.map, &self.service)?;
                self.refresh_pane(Pane::Layers)?;
            }
            SessionInput::ToggleHistogram => {
                self.histogram.toggle(
                    &self.layers,
                    &mut self.map,
                    &self.service,
                    &self.viewport,
                )?;
            }
            SessionInput::HistogramInterval { slot, lo, hi } => {
                let change = self.histogram.select_interval(slot, lo, hi)?;
                self.visualize(change)?;
            }
            SessionInput::TogglePane { pane } => {
                self.toggle_pane(pane)?;
            }
        }
        Ok(())
    }

    fn visualize(&mut self, change: VizInput) -> Result<()> {
        self.visualization
            .handle(change, &mut self.layers, &mut self.map, &self.service)?;
        self.histogram
            .sync_intervals(&mut self.map, self.visualization.slots())?;
        self.refresh_pane(Pane::Visualization)?;
        Ok(())
    }

    fn rebind(&mut self) -> Result<()> {
        match self.layers.selected_id() {
            Some(id) => {
                self.visualization.bind(&self.layers, id)?;
                self.imagery_pane.bind(&self.layers, id)?;
                self.histogram.bind(&mut self.map, id)?;
                log::debug!("controllers bound to layer {id}");
            }
            None => {
                self.visualization.unbind();
                self.imagery_pane.unbind();
                self.histogram.unbind(&mut self.map)?;
                log::debug!("no layer left; controllers unbound");
            }
        }
        for pane in [Pane::Imagery, Pane::Visualization, Pane::Layers] {
            self.refresh_pane(pane)?;
        }
        Ok(())
    }

    pub fn toggle_pane(&mut self, pane: Pane) -> Result<bool> {
        if let Some(handle) = self.panes.remove(&pane) {
            self.map.remove_panel(handle)?;
            return Ok(false);
        }
        let panel = self.panel(pane);
        let handle = self.map.add_panel(panel, pane.position())?;
        self.panes.insert(pane, handle);
        Ok(true)
    }

    fn refresh_pane(&mut self, pane: Pane) -> Result<()> {
        if let Some(handle) = self.panes.remove(&pane) {
            self.map.remove_panel(handle)?;
            let panel = self.panel(pane);
            let handle = self.map.add_panel(panel, pane.position())?;
            self.panes.insert(pane, handle);
        }
        Ok(())
    }

    fn panel(&self, pane: Pane) -> Panel {
        let selected = self.layers.get_selected().ok();
        match pane {
            Pane::Imagery => Panel::ImageryParams {
                params: selected
                    .map(|layer| layer.source().params().clone())
                    .unwrap_or_else(|| self.layer_pane.defaults().clone()),
            },
            Pane::Visualization => Panel::Visualization {
                presets: selected
                    .map(|layer| {
                        layer
                            .source()
                            .presets()
                            .names()
                            .into_iter()
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
                bands: self
                    .visualization
                    .slots()
                    .iter()
                    .map(|slot| slot.band.clone())
                    .collect(),
                ranges: self
                    .visualization
                    .slots()
                    .iter()
                    .map(|slot| (slot.lo, slot.hi))
                    .collect(),
                limits: selected
                    .map(|layer| {
                        self.visualization
                            .slots()
                            .iter()
                            .filter_map(|slot| layer.source().bands().get(&slot.band).ok())
                            .map(|band| (band.min(), band.max()))
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            Pane::Layers => Panel::Layers {
                basemap: self.layer_pane.basemap(),
                layers: self.layers.names(),
            },
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            viewport: self.viewport,
            selected: self.layers.selected_id(),
            layers: self.layers.summaries(),
            histogram: self.histogram.links().to_vec(),
            open_panes: self.panes.keys().copied().collect(),
        }
    }
}
