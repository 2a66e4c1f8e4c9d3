use crate::model::{BandRegistry, Bounds, ImageParams, VizParams, zoom_to_scale};
use crate::recipe::{ArchiveProfile, CompositeRecipe, build_recipe};
use crate::service::{
    CompositeHandle, HistogramRequest, HistogramResult, ImageryService, ServiceError, TileUrl,
};

use super::{
    BandPreset, ImageryError, PresetCatalog, Result, sentinel2_bands, sentinel2_presets,
    sentinel2_profile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    Uninitialized,
    Composited,
    Visualized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RebuildTicket(u64);

#[derive(Debug, Clone)]
pub struct PendingRebuild {
    pub ticket: RebuildTicket,
    pub recipe: CompositeRecipe,
}

/// Parameter changes need a new composite; band changes only recompute the
/// visualization on top of the existing one.
#[derive(Debug, Clone)]
pub struct ImagerySource {
    profile: ArchiveProfile,
    bands: BandRegistry,
    presets: PresetCatalog,
    params: ImageParams,
    active_bands: Vec<String>,
    state: SourceState,
    composite: Option<CompositeHandle>,
    composite_revision: u64,
    viz: Option<VizParams>,
    tile_url: Option<TileUrl>,
    next_ticket: u64,
    in_flight: Option<RebuildTicket>,
}

impl ImagerySource {
    pub fn new(
        profile: ArchiveProfile,
        bands: BandRegistry,
        presets: PresetCatalog,
        params: ImageParams,
    ) -> Result<Self> {
        let mut source = Self {
            profile,
            bands,
            presets,
            params,
            active_bands: Vec::new(),
            state: SourceState::Uninitialized,
            composite: None,
            composite_revision: 0,
            viz: None,
            tile_url: None,
            next_ticket: 0,
            in_flight: None,
        };
        if let Some(name) = source.presets.default_preset().map(|preset| preset.name.clone()) {
            source.apply_preset(&name)?;
        }
        Ok(source)
    }

    pub fn sentinel2(params: ImageParams) -> Result<Self> {
        Self::new(
            sentinel2_profile(),
            sentinel2_bands()?,
            sentinel2_presets()?,
            params,
        )
    }

    pub fn sentinel2_with_preset(params: ImageParams, preset: &str) -> Result<Self> {
        let mut source = Self::sentinel2(params)?;
        source.apply_preset(preset)?;
        Ok(source)
    }

    pub fn profile(&self) -> &ArchiveProfile {
        &self.profile
    }

    pub fn bands(&self) -> &BandRegistry {
        &self.bands
    }

    pub fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    pub fn params(&self) -> &ImageParams {
        &self.params
    }

    pub fn active_bands(&self) -> &[String] {
        &self.active_bands
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    pub fn composite(&self) -> Option<&CompositeHandle> {
        self.composite.as_ref()
    }

    pub fn composite_revision(&self) -> u64 {
        self.composite_revision
    }

    pub fn visualization(&self) -> Option<&VizParams> {
        self.viz.as_ref()
    }

    pub fn tile_url(&self) -> Option<&TileUrl> {
        self.tile_url.as_ref()
    }

    pub fn rebuild_in_flight(&self) -> Option<RebuildTicket> {
        self.in_flight
    }

    pub fn visualization_is_stale(&self) -> bool {
        match &self.viz {
            None => true,
            Some(viz) => {
                viz.registry_revision() != self.bands.revision()
                    || viz.bands().len() != self.active_bands.len()
                    || viz
                        .bands()
                        .iter()
                        .zip(&self.active_bands)
                        .any(|(current, wanted)| {
                            self.bands
                                .resolve(wanted)
                                .map(|canonical| canonical != current.as_str())
                                .unwrap_or(true)
                        })
            }
        }
    }

    pub fn recipe(&self) -> CompositeRecipe {
        build_recipe(&self.profile, &self.params)
    }

    pub fn set_params(&mut self, params: ImageParams) {
        log::debug!(
            "{}: image parameters {} .. {}, cloudy <= {}%, mask {}, {}",
            self.profile.name,
            params.start(),
            params.end(),
            params.max_cloudy_pixel_pct(),
            params.cloud_mask_enabled(),
            params.temporal_op()
        );
        self.params = params;
    }

    pub fn set_band_range(&mut self, band: &str, lo: f64, hi: f64) -> Result<()> {
        self.bands.set_range(band, lo, hi)?;
        Ok(())
    }

    pub fn set_active_bands(&mut self, bands: &[String], ranges: &[(f64, f64)]) -> Result<()> {
        crate::model::VizMode::for_band_count(bands.len())?;
        if bands.len() != ranges.len() {
            return Err(ImageryError::RangeCountMismatch {
                bands: bands.len(),
                ranges: ranges.len(),
            });
        }
        let mut canonical = Vec::with_capacity(bands.len());
        let mut updates = Vec::with_capacity(bands.len());
        for (band, (lo, hi)) in bands.iter().zip(ranges) {
            let name = self.bands.resolve(band)?.to_string();
            updates.push((name.clone(), *lo, *hi));
            canonical.push(name);
        }
        self.bands.set_ranges(&updates)?;
        self.active_bands = canonical;
        Ok(())
    }

    pub fn apply_preset(&mut self, name: &str) -> Result<BandPreset> {
        let preset = self.presets.get(name)?.clone();
        self.set_active_bands(&preset.bands, &preset.ranges())?;
        log::debug!("{}: applied preset `{}`", self.profile.name, preset.name);
        Ok(preset)
    }

    pub fn begin_rebuild(&mut self) -> Result<PendingRebuild> {
        let recipe = self.recipe();
        recipe.validate()?;
        self.next_ticket += 1;
        let ticket = RebuildTicket(self.next_ticket);
        if let Some(previous) = self.in_flight.replace(ticket) {
            log::debug!("{}: rebuild {previous:?} superseded by {ticket:?}", self.profile.name);
        }
        Ok(PendingRebuild { ticket, recipe })
    }

    // Stale tickets and failed or empty results leave the previous composite.
    pub fn finish_rebuild(
        &mut self,
        ticket: RebuildTicket,
        outcome: std::result::Result<CompositeHandle, ServiceError>,
    ) -> Result<&CompositeHandle> {
        if self.in_flight != Some(ticket) {
            log::debug!(
                "{}: discarding result of superseded rebuild {ticket:?}",
                self.profile.name
            );
            return Err(ImageryError::Superseded {
                ticket,
                latest: self.in_flight,
            });
        }
        self.in_flight = None;

        let handle = outcome?;
        if handle.scene_count == 0 {
            log::info!(
                "{}: no scenes match the current filters, keeping previous composite",
                self.profile.name
            );
            return Err(ImageryError::NoScenes);
        }

        self.composite_revision += 1;
        self.state = SourceState::Composited;
        log::info!(
            "{}: composite {} from {} scenes (revision {})",
            self.profile.name,
            handle.id,
            handle.scene_count,
            self.composite_revision
        );
        Ok(self.composite.insert(handle))
    }

    pub fn rebuild_composite(&mut self, service: &dyn ImageryService) -> Result<&CompositeHandle> {
        let pending = self.begin_rebuild()?;
        let outcome = service.composite(&pending.recipe);
        self.finish_rebuild(pending.ticket, outcome)
    }

    pub fn recompute_visualization(&mut self) -> Result<&VizParams> {
        let viz = VizParams::from_registry(&self.active_bands, &self.bands)?;
        if self.composite.is_some() {
            self.state = SourceState::Visualized;
        }
        Ok(self.viz.insert(viz))
    }

    pub fn get_tile_url(&mut self, service: &dyn ImageryService) -> Result<TileUrl> {
        if self.composite.is_none() {
            return Err(ImageryError::NotComposited);
        }
        if self.visualization_is_stale() {
            self.recompute_visualization()?;
        }
        let composite = self.composite.as_ref().ok_or(ImageryError::NotComposited)?;
        let viz = self.viz.as_ref().ok_or(ImageryError::NotComposited)?;
        let url = service.tile_url(composite, viz)?;
        self.state = SourceState::Visualized;
        self.tile_url = Some(url.clone());
        Ok(url)
    }

    /// Approximate per-band distributions of the composite over `bounds`.
    ///
    /// The reduction runs best-effort at the scale looked up for `zoom`, so
    /// the service may subsample: counts are representative, not exact.
    pub fn compute_histogram(
        &self,
        service: &dyn ImageryService,
        bounds: &Bounds,
        zoom: u8,
    ) -> Result<HistogramResult> {
        bounds.validate()?;
        let composite = self.composite.as_ref().ok_or(ImageryError::NotComposited)?;
        let request = HistogramRequest {
            composite_id: composite.id.clone(),
            bands: self.active_bands.clone(),
            region: bounds.to_geometry(),
            scale: zoom_to_scale(zoom),
            best_effort: true,
        };
        log::debug!(
            "{}: histogram of {:?} at {} m/px",
            self.profile.name,
            request.bands,
            request.scale
        );
        let result = service.histogram(&request)?;
        result.validate(&request.bands)?;
        Ok(result)
    }
}
