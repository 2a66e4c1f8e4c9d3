use serde::{Deserialize, Serialize};

use crate::layers::{LayerId, LayerManager};
use crate::map::{HistogramFigure, MapView, Panel, PanelHandle, PanelPosition, Viewport};
use crate::model::VizMode;
use crate::service::ImageryService;

use super::{BandSlot, ControlError, Result, VizInput};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramLink {
    pub slot: usize,
    pub band: String,
    pub interval: (f64, f64),
    #[serde(default)]
    pub detached: bool,
}

/// Computed only on an explicit toggle, never on pan or zoom.
#[derive(Debug, Default)]
pub struct HistogramController {
    target: Option<LayerId>,
    panel: Option<PanelHandle>,
    figures: Vec<HistogramFigure>,
    links: Vec<HistogramLink>,
}

impl HistogramController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<LayerId> {
        self.target
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_some()
    }

    pub fn links(&self) -> &[HistogramLink] {
        &self.links
    }

    pub fn bind(&mut self, map: &mut dyn MapView, id: LayerId) -> Result<()> {
        if self.target != Some(id) {
            self.close(map)?;
        }
        self.target = Some(id);
        Ok(())
    }

    pub fn unbind(&mut self, map: &mut dyn MapView) -> Result<()> {
        self.close(map)?;
        self.target = None;
        Ok(())
    }

    pub fn toggle(
        &mut self,
        layers: &LayerManager,
        map: &mut dyn MapView,
        service: &dyn ImageryService,
        viewport: &Viewport,
    ) -> Result<bool> {
        if self.is_open() {
            self.close(map)?;
            Ok(false)
        } else {
            self.open(layers, map, service, viewport)?;
            Ok(true)
        }
    }

    pub fn open(
        &mut self,
        layers: &LayerManager,
        map: &mut dyn MapView,
        service: &dyn ImageryService,
        viewport: &Viewport,
    ) -> Result<&[HistogramLink]> {
        let id = self.target.ok_or(ControlError::Unbound)?;
        let source = layers.get(id)?.source();
        let result = source.compute_histogram(service, viewport.bounds(), viewport.zoom())?;
        let mode = VizMode::for_band_count(source.active_bands().len())?;

        let mut figures = Vec::with_capacity(mode.band_count());
        let mut links = Vec::with_capacity(mode.band_count());
        for (slot, (band, color)) in source
            .active_bands()
            .iter()
            .zip(mode.channel_colors())
            .enumerate()
        {
            let histogram = result.band(band)?;
            let interval = source.bands().get(band)?.range();
            figures.push(HistogramFigure {
                band: band.clone(),
                color: color.to_string(),
                bucket_centers: histogram.bucket_centers.clone(),
                counts: histogram.counts.clone(),
                interval,
            });
            links.push(HistogramLink {
                slot,
                band: band.clone(),
                interval,
                detached: false,
            });
        }

        self.close(map)?;
        let handle = map.add_panel(
            Panel::Histogram {
                figures: figures.clone(),
            },
            PanelPosition::BottomLeft,
        )?;
        self.panel = Some(handle);
        self.figures = figures;
        self.links = links;
        log::info!(
            "histogram of layer {id} over {} bands at zoom {}",
            self.links.len(),
            viewport.zoom()
        );
        Ok(&self.links)
    }

    pub fn close(&mut self, map: &mut dyn MapView) -> Result<()> {
        self.links.clear();
        self.figures.clear();
        if let Some(handle) = self.panel.take() {
            map.remove_panel(handle)?;
            log::debug!("histogram closed");
        }
        Ok(())
    }

    pub fn select_interval(&self, slot: usize, lo: f64, hi: f64) -> Result<VizInput> {
        if !self.is_open() {
            log::warn!("ignoring interval on closed histogram");
            return Err(ControlError::HistogramClosed);
        }
        let link = self
            .links
            .iter()
            .find(|link| link.slot == slot)
            .ok_or(ControlError::InvalidSlot {
                slot,
                count: self.links.len(),
            })?;
        if link.detached {
            log::warn!("ignoring interval on outdated {} figure", link.band);
            return Err(ControlError::StaleFigure {
                slot,
                band: link.band.clone(),
            });
        }
        Ok(VizInput::Range { slot, lo, hi })
    }

    /// Follows accepted visualization changes and redraws the panel when a
    /// figure's interval moved. Links whose slot changed band are detached.
    pub fn sync_intervals(&mut self, map: &mut dyn MapView, slots: &[BandSlot]) -> Result<()> {
        let mut changed = false;
        for (link, figure) in self.links.iter_mut().zip(&mut self.figures) {
            match slots.get(link.slot) {
                Some(slot) if slot.band == link.band => {
                    let interval = (slot.lo, slot.hi);
                    if link.detached || link.interval != interval {
                        link.detached = false;
                        link.interval = interval;
                        figure.interval = interval;
                        changed = true;
                    }
                }
                _ if !link.detached => {
                    log::debug!("histogram slot {} no longer shows {}", link.slot, link.band);
                    link.detached = true;
                }
                _ => {}
            }
        }
        if !changed {
            return Ok(());
        }
        if let Some(handle) = self.panel.take() {
            map.remove_panel(handle)?;
            let handle = map.add_panel(
                Panel::Histogram {
                    figures: self.figures.clone(),
                },
                PanelPosition::BottomLeft,
            )?;
            self.panel = Some(handle);
        }
        Ok(())
    }
}
