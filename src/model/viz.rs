use serde::{Deserialize, Serialize};

use super::{BandRegistry, ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VizMode {
    Grayscale,
    Rgb,
}

impl VizMode {
    pub fn for_band_count(count: usize) -> Result<Self> {
        match count {
            1 => Ok(VizMode::Grayscale),
            3 => Ok(VizMode::Rgb),
            other => Err(ModelError::InvalidBandCount(other)),
        }
    }

    pub fn band_count(&self) -> usize {
        match self {
            VizMode::Grayscale => 1,
            VizMode::Rgb => 3,
        }
    }

    pub fn channel_colors(&self) -> &'static [&'static str] {
        match self {
            VizMode::Grayscale => &["gray"],
            VizMode::Rgb => &["red", "green", "blue"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizParams {
    bands: Vec<String>,
    min: Vec<f64>,
    max: Vec<f64>,
    #[serde(skip)]
    registry_revision: u64,
}

impl VizParams {
    pub fn from_registry(active_bands: &[String], registry: &BandRegistry) -> Result<Self> {
        VizMode::for_band_count(active_bands.len())?;
        let mut bands = Vec::with_capacity(active_bands.len());
        let mut min = Vec::with_capacity(active_bands.len());
        let mut max = Vec::with_capacity(active_bands.len());
        for name in active_bands {
            let band = registry.get(name)?;
            let (lo, hi) = band.range();
            bands.push(band.name().to_string());
            min.push(lo);
            max.push(hi);
        }
        Ok(Self {
            bands,
            min,
            max,
            registry_revision: registry.revision(),
        })
    }

    pub fn mode(&self) -> VizMode {
        if self.bands.len() == 1 {
            VizMode::Grayscale
        } else {
            VizMode::Rgb
        }
    }

    pub fn bands(&self) -> &[String] {
        &self.bands
    }

    pub fn range(&self, slot: usize) -> Option<(f64, f64)> {
        Some((*self.min.get(slot)?, *self.max.get(slot)?))
    }

    pub fn ranges(&self) -> impl Iterator<Item = (&str, (f64, f64))> {
        self.bands
            .iter()
            .zip(self.min.iter().zip(&self.max))
            .map(|(band, (lo, hi))| (band.as_str(), (*lo, *hi)))
    }

    pub fn registry_revision(&self) -> u64 {
        self.registry_revision
    }
}
