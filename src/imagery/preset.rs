use serde::{Deserialize, Serialize};

use crate::model::VizMode;

use super::{ImageryError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPreset {
    pub name: String,
    pub bands: Vec<String>,
    pub lo: Vec<f64>,
    pub hi: Vec<f64>,
}

impl BandPreset {
    pub fn new(name: &str, bands: &[&str], lo: &[f64], hi: &[f64]) -> Result<Self> {
        let preset = Self {
            name: name.to_string(),
            bands: bands.iter().map(|band| band.to_string()).collect(),
            lo: lo.to_vec(),
            hi: hi.to_vec(),
        };
        preset.validate()?;
        Ok(preset)
    }

    pub fn validate(&self) -> Result<()> {
        VizMode::for_band_count(self.bands.len()).map_err(|error| ImageryError::InvalidPreset {
            name: self.name.clone(),
            reason: error.to_string(),
        })?;
        if self.lo.len() != self.bands.len() || self.hi.len() != self.bands.len() {
            return Err(ImageryError::InvalidPreset {
                name: self.name.clone(),
                reason: format!(
                    "{} bands but {} lows and {} highs",
                    self.bands.len(),
                    self.lo.len(),
                    self.hi.len()
                ),
            });
        }
        Ok(())
    }

    pub fn mode(&self) -> VizMode {
        if self.bands.len() == 1 {
            VizMode::Grayscale
        } else {
            VizMode::Rgb
        }
    }

    pub fn ranges(&self) -> Vec<(f64, f64)> {
        self.lo.iter().copied().zip(self.hi.iter().copied()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PresetCatalog {
    presets: Vec<BandPreset>,
}

impl PresetCatalog {
    pub fn new(presets: Vec<BandPreset>) -> Result<Self> {
        for preset in &presets {
            preset.validate()?;
        }
        Ok(Self { presets })
    }

    pub fn get(&self, name: &str) -> Result<&BandPreset> {
        self.presets
            .iter()
            .find(|preset| preset.name == name)
            .ok_or_else(|| ImageryError::UnknownPreset(name.to_string()))
    }

    pub fn default_preset(&self) -> Option<&BandPreset> {
        self.presets.first()
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|preset| preset.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BandPreset> {
        self.presets.iter()
    }
}
