mod error;
mod layer;
mod manager;

#[cfg(test)]
mod tests;

pub use error::{LayerError, Result};
pub use layer::{Layer, LayerId, LayerSummary};
pub use manager::LayerManager;
