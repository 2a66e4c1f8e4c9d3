use serde::{Deserialize, Serialize};

use crate::imagery::ImagerySource;
use crate::layers::{LayerId, LayerManager};
use crate::map::MapView;
use crate::model::VizMode;
use crate::service::{ImageryService, TileUrl};

use super::{ControlError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSlot {
    pub band: String,
    pub lo: f64,
    pub hi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VizInput {
    Preset { name: String },
    SingleBand { enabled: bool },
    Band { slot: usize, band: String },
    Range { slot: usize, lo: f64, hi: f64 },
}

/// Band and range selection for the bound layer.
///
/// Every accepted change is written to the layer's imagery source and
/// redrawn before returning. Rejected input changes neither the controller
/// nor the source.
#[derive(Debug, Clone, Default)]
pub struct VisualizationController {
    target: Option<LayerId>,
    slots: Vec<BandSlot>,
    rgb_memory: Vec<BandSlot>,
}

impl VisualizationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<LayerId> {
        self.target
    }

    pub fn slots(&self) -> &[BandSlot] {
        &self.slots
    }

    pub fn mode(&self) -> Option<VizMode> {
        VizMode::for_band_count(self.slots.len()).ok()
    }

    pub fn bind(&mut self, layers: &LayerManager, id: LayerId) -> Result<()> {
        let slots = slots_of(layers.get(id)?.source())?;
        self.remember(&slots);
        self.slots = slots;
        self.target = Some(id);
        log::debug!("visualization bound to layer {id}");
        Ok(())
    }

    pub fn unbind(&mut self) {
        self.target = None;
        self.slots.clear();
    }

    pub fn handle(
        &mut self,
        input: VizInput,
        layers: &mut LayerManager,
        map: &mut dyn MapView,
        service: &dyn ImageryService,
    ) -> Result<TileUrl> {
        let id = self.target.ok_or(ControlError::Unbound)?;
        let source = layers.get_mut(id)?.source_mut();

        let previous = slots_of(source)?;
        let candidate = self.candidate(&input, source)?;
        let touched = candidate
            .iter()
            .filter_map(|slot| source.bands().get(&slot.band).ok())
            .map(|band| (band.name().to_string(), band.range()))
            .collect::<Vec<_>>();
        if let Err(error) = apply(source, &candidate) {
            log::warn!("rejected visualization change {input:?}: {error}");
            return Err(error.into());
        }
        let slots = slots_of(source)?;

        match layers.redraw(map, service, id) {
            Ok(url) => {
                self.remember(&slots);
                self.slots = slots;
                Ok(url)
            }
            Err(error) => {
                log::warn!("redraw failed, restoring previous bands: {error}");
                let source = layers.get_mut(id)?.source_mut();
                for (band, (lo, hi)) in &touched {
                    source.set_band_range(band, *lo, *hi)?;
                }
                apply(source, &previous)?;
                source.recompute_visualization()?;
                Err(error.into())
            }
        }
    }

    fn candidate(&self, input: &VizInput, source: &ImagerySource) -> Result<Vec<BandSlot>> {
        match input {
            VizInput::Preset { name } => {
                let preset = source.presets().get(name)?;
                Ok(preset
                    .bands
                    .iter()
                    .zip(preset.ranges())
                    .map(|(band, (lo, hi))| BandSlot {
                        band: band.clone(),
                        lo,
                        hi,
                    })
                    .collect())
            }
            VizInput::SingleBand { enabled: true } => {
                Ok(self.slots.iter().take(1).cloned().collect())
            }
            VizInput::SingleBand { enabled: false } => {
                if self.slots.len() == 3 {
                    return Ok(self.slots.clone());
                }
                let mut slots = self.slots.iter().take(1).cloned().collect::<Vec<_>>();
                if self.rgb_memory.len() == 3 {
                    slots.extend(self.rgb_memory.iter().skip(1).cloned());
                } else if let Some(preset) = source.presets().default_preset() {
                    for band in preset.bands.iter().skip(1) {
                        let (lo, hi) = source.bands().get(band)?.range();
                        slots.push(BandSlot {
                            band: band.clone(),
                            lo,
                            hi,
                        });
                    }
                }
                Ok(slots)
            }
            VizInput::Band { slot, band } => {
                let mut slots = self.slots.clone();
                let target = slot_mut(&mut slots, *slot)?;
                let definition = source.bands().get(band)?;
                let (lo, hi) = definition.range();
                *target = BandSlot {
                    band: definition.name().to_string(),
                    lo,
                    hi,
                };
                Ok(slots)
            }
            VizInput::Range { slot, lo, hi } => {
                let mut slots = self.slots.clone();
                let band = slot_mut(&mut slots, *slot)?.band.clone();
                // Every slot showing the band follows the edited one.
                for shared in slots.iter_mut().filter(|shared| shared.band == band) {
                    shared.lo = *lo;
                    shared.hi = *hi;
                }
                Ok(slots)
            }
        }
    }

    fn remember(&mut self, slots: &[BandSlot]) {
        if slots.len() == 3 {
            self.rgb_memory = slots.to_vec();
        }
    }
}

fn apply(source: &mut ImagerySource, slots: &[BandSlot]) -> crate::imagery::Result<()> {
    let bands = slots.iter().map(|slot| slot.band.clone()).collect::<Vec<_>>();
    let ranges = slots.iter().map(|slot| (slot.lo, slot.hi)).collect::<Vec<_>>();
    source.set_active_bands(&bands, &ranges)
}

fn slots_of(source: &ImagerySource) -> Result<Vec<BandSlot>> {
    source
        .active_bands()
        .iter()
        .map(|band| -> Result<BandSlot> {
            let (lo, hi) = source.bands().get(band)?.range();
            Ok(BandSlot {
                band: band.clone(),
                lo,
                hi,
            })
        })
        .collect()
}

fn slot_mut(slots: &mut [BandSlot], slot: usize) -> Result<&mut BandSlot> {
    let count = slots.len();
    slots
        .get_mut(slot)
        .ok_or(ControlError::InvalidSlot { slot, count })
}
