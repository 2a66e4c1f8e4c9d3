mod band;
mod basemap;
mod error;
mod geo;
mod params;
mod temporal;
mod viz;

#[cfg(test)]
mod tests;

pub use band::{Band, BandRegistry};
pub use basemap::Basemap;
pub use error::{ModelError, Result};
pub use geo::{Bounds, Geometry, MAX_ZOOM, zoom_to_scale};
pub use params::ImageParams;
pub use temporal::TemporalOp;
pub use viz::{VizMode, VizParams};
