use crate::model::VizParams;
use crate::recipe::CompositeRecipe;

use super::{CompositeHandle, HistogramRequest, HistogramResult, Result, TileUrl};

/// The remote archive and map/reduce engine.
///
/// Every call blocks until the service answers. None of them retries.
pub trait ImageryService {
    fn composite(&self, recipe: &CompositeRecipe) -> Result<CompositeHandle>;

    fn tile_url(&self, composite: &CompositeHandle, viz: &VizParams) -> Result<TileUrl>;

    fn histogram(&self, request: &HistogramRequest) -> Result<HistogramResult>;
}

impl<S: ImageryService + ?Sized> ImageryService for &S {
    fn composite(&self, recipe: &CompositeRecipe) -> Result<CompositeHandle> {
        (**self).composite(recipe)
    }

    fn tile_url(&self, composite: &CompositeHandle, viz: &VizParams) -> Result<TileUrl> {
        (**self).tile_url(composite, viz)
    }

    fn histogram(&self, request: &HistogramRequest) -> Result<HistogramResult> {
        (**self).histogram(request)
    }
}
