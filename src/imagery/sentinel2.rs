use crate::model::BandRegistry;
use crate::recipe::{ArchiveProfile, CollectionPair};

use super::{BandPreset, PresetCatalog, Result};

pub const SENTINEL2_COLLECTION: &str = "COPERNICUS/S2";
pub const SENTINEL2_CLOUD_COLLECTION: &str = "COPERNICUS/S2_CLOUD_PROBABILITY";

/// Pixels at or above this cloud probability are masked.
pub const SENTINEL2_MAX_CLOUD_PROBABILITY: u8 = 65;

const REFLECTANCE: (f64, f64) = (0.0, 10000.0);

const BAND_DEFS: [(&str, (f64, f64)); 14] = [
    ("B1", REFLECTANCE),
    ("B2", REFLECTANCE),
    ("B3", REFLECTANCE),
    ("B4", REFLECTANCE),
    ("B5", REFLECTANCE),
    ("B6", REFLECTANCE),
    ("B7", REFLECTANCE),
    ("B8", REFLECTANCE),
    ("B8A", REFLECTANCE),
    ("B9", REFLECTANCE),
    ("B10", REFLECTANCE),
    ("B11", REFLECTANCE),
    ("B12", REFLECTANCE),
    ("probability", (0.0, 100.0)),
];

const BAND_ALIASES: [(&str, &str); 13] = [
    ("coastal", "B1"),
    ("blue", "B2"),
    ("green", "B3"),
    ("red", "B4"),
    ("rededge1", "B5"),
    ("rededge2", "B6"),
    ("rededge3", "B7"),
    ("nir", "B8"),
    ("nir08", "B8A"),
    ("watervapor", "B9"),
    ("cirrus", "B10"),
    ("swir16", "B11"),
    ("swir22", "B12"),
];

const DEFAULT_LO: [f64; 3] = [500.0, 500.0, 500.0];
const DEFAULT_HI: [f64; 3] = [3500.0, 3500.0, 3500.0];

pub fn sentinel2_profile() -> ArchiveProfile {
    ArchiveProfile {
        name: "sentinel-2".to_string(),
        collections: CollectionPair {
            primary: SENTINEL2_COLLECTION.to_string(),
            auxiliary: SENTINEL2_CLOUD_COLLECTION.to_string(),
        },
        join_key: "system:index".to_string(),
        join_property: "cloud_mask".to_string(),
        cloudy_pixel_property: "CLOUDY_PIXEL_PERCENTAGE".to_string(),
        edge_bands: vec!["B8A".to_string(), "B9".to_string()],
        probability_band: "probability".to_string(),
        max_cloud_probability: SENTINEL2_MAX_CLOUD_PROBABILITY,
    }
}

pub fn sentinel2_bands() -> Result<BandRegistry> {
    let mut registry = BandRegistry::new();
    for (name, (min, max)) in BAND_DEFS {
        registry.register(name, min, max)?;
    }
    for (alias, name) in BAND_ALIASES {
        registry.alias(alias, name)?;
    }
    Ok(registry)
}

pub fn sentinel2_presets() -> Result<PresetCatalog> {
    PresetCatalog::new(vec![
        BandPreset::new("true color", &["B4", "B3", "B2"], &DEFAULT_LO, &DEFAULT_HI)?,
        BandPreset::new("color infrared", &["B8", "B4", "B3"], &DEFAULT_LO, &DEFAULT_HI)?,
        BandPreset::new(
            "short-wave infrared",
            &["B12", "B8A", "B4"],
            &DEFAULT_LO,
            &[7500.0, 3500.0, 3500.0],
        )?,
        BandPreset::new("agriculture", &["B11", "B8", "B2"], &DEFAULT_LO, &DEFAULT_HI)?,
        BandPreset::new("geology", &["B12", "B11", "B8"], &DEFAULT_LO, &DEFAULT_HI)?,
        BandPreset::new("bathymetric", &["B4", "B3", "B1"], &DEFAULT_LO, &DEFAULT_HI)?,
        BandPreset::new("clouds", &["probability"], &[0.0], &[100.0])?,
    ])
}
