use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::model::VizParams;
use crate::recipe::CompositeRecipe;
use crate::service::{
    BandHistogram, CompositeHandle, HistogramRequest, HistogramResult, ImageryService, Result,
    ServiceError, TileUrl,
};

/// In-memory imagery service. Tile URLs encode the composite id and the
/// visualization, so two different styles never share a URL.
#[derive(Debug)]
pub struct FakeImageryService {
    scene_count: Cell<usize>,
    offline: Cell<bool>,
    composites: Cell<u64>,
    recipes: RefCell<Vec<CompositeRecipe>>,
    tile_requests: RefCell<Vec<VizParams>>,
    histogram_requests: RefCell<Vec<HistogramRequest>>,
}

impl Default for FakeImageryService {
    fn default() -> Self {
        Self {
            scene_count: Cell::new(12),
            offline: Cell::new(false),
            composites: Cell::new(0),
            recipes: RefCell::new(Vec::new()),
            tile_requests: RefCell::new(Vec::new()),
            histogram_requests: RefCell::new(Vec::new()),
        }
    }
}

impl FakeImageryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scene_count(&self, count: usize) {
        self.scene_count.set(count);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn recipes(&self) -> Vec<CompositeRecipe> {
        self.recipes.borrow().clone()
    }

    pub fn tile_requests(&self) -> Vec<VizParams> {
        self.tile_requests.borrow().clone()
    }

    pub fn histogram_requests(&self) -> Vec<HistogramRequest> {
        self.histogram_requests.borrow().clone()
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.get() {
            Err(ServiceError::Unreachable("fake service offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ImageryService for FakeImageryService {
    fn composite(&self, recipe: &CompositeRecipe) -> Result<CompositeHandle> {
        self.check_online()?;
        self.recipes.borrow_mut().push(recipe.clone());
        let serial = self.composites.get() + 1;
        self.composites.set(serial);
        Ok(CompositeHandle {
            id: format!("composite-{serial}"),
            scene_count: self.scene_count.get(),
        })
    }

    fn tile_url(&self, composite: &CompositeHandle, viz: &VizParams) -> Result<TileUrl> {
        self.check_online()?;
        self.tile_requests.borrow_mut().push(viz.clone());
        let style = viz
            .ranges()
            .map(|(band, (lo, hi))| format!("{band}:{lo}-{hi}"))
            .collect::<Vec<_>>()
            .join(",");
        TileUrl::new(format!(
            "https://tiles.test/{}/{style}/{{z}}/{{x}}/{{y}}.png",
            composite.id
        ))
    }

    fn histogram(&self, request: &HistogramRequest) -> Result<HistogramResult> {
        self.check_online()?;
        self.histogram_requests.borrow_mut().push(request.clone());
        let histograms = request
            .bands
            .iter()
            .map(|band| {
                let histogram = BandHistogram {
                    bucket_centers: vec![250.0, 750.0, 1250.0, 1750.0],
                    counts: vec![3.0, 10.0, 6.0, 1.0],
                };
                (band.clone(), histogram)
            })
            .collect::<BTreeMap<_, _>>();
        Ok(HistogramResult { histograms })
    }
}
