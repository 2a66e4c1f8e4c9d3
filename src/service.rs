mod api;
mod error;
mod http;
mod types;

#[cfg(test)]
mod tests;

pub use api::ImageryService;
pub use error::{Result, ServiceError};
pub use http::{HttpImageryService, HttpServiceConfig};
pub use types::{BandHistogram, CompositeHandle, HistogramRequest, HistogramResult, TileUrl};
