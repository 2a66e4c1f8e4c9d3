mod error;
mod preset;
mod sentinel2;
mod source;


pub use error::{ImageryError, Result};
pub use preset::{BandPreset, PresetCatalog};
pub use sentinel2::{
    SENTINEL2_CLOUD_COLLECTION, SENTINEL2_COLLECTION, SENTINEL2_MAX_CLOUD_PROBABILITY,
    sentinel2_bands, sentinel2_presets, sentinel2_profile,
};
pub use source::{ImagerySource, PendingRebuild, RebuildTicket, SourceState};
