use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::document::{read_document, write_document};
use crate::imagery::sentinel2_presets;
use crate::model::{Basemap, ImageParams, MAX_ZOOM, TemporalOp};
use crate::service::HttpServiceConfig;

use super::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: (f64, f64),
    pub zoom: u8,
    pub basemap: Basemap,
    pub size: (u32, u32),
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: (35.7004, -105.9136),
            zoom: 9,
            basemap: Basemap::OsmHot,
            size: (1024, 700),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageryConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub max_cloudy_pixel_pct: u8,
    pub cloud_mask_enabled: bool,
    pub temporal_op: TemporalOp,
    pub preset: String,
    pub layer_name: String,
}

impl Default for ImageryConfig {
    fn default() -> Self {
        let params = ImageParams::default();
        Self {
            start: params.start(),
            end: params.end(),
            max_cloudy_pixel_pct: params.max_cloudy_pixel_pct(),
            cloud_mask_enabled: params.cloud_mask_enabled(),
            temporal_op: params.temporal_op(),
            preset: "true color".to_string(),
            layer_name: "Sentinel-2".to_string(),
        }
    }
}

impl ImageryConfig {
    pub fn params(&self) -> Result<ImageParams, ConfigError> {
        Ok(ImageParams::new(
            self.start,
            self.end,
            self.max_cloudy_pixel_pct,
            self.cloud_mask_enabled,
            self.temporal_op,
        )?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub service: HttpServiceConfig,
    pub map: MapConfig,
    pub imagery: ImageryConfig,
    /// Default `env_logger` filter; `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            service: HttpServiceConfig::default(),
            map: MapConfig::default(),
            imagery: ImageryConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.service.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "service endpoint must be an http(s) URL, got `{endpoint}`"
            )));
        }
        if self.service.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "service timeout must be at least one second".to_string(),
            ));
        }

        let (lat, lon) = self.map.center;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(ConfigError::Invalid(format!(
                "map center ({lat}, {lon}) is not a valid latitude/longitude"
            )));
        }
        if self.map.zoom > MAX_ZOOM {
            return Err(ConfigError::Invalid(format!(
                "map zoom {} exceeds {MAX_ZOOM}",
                self.map.zoom
            )));
        }
        if self.map.size.0 == 0 || self.map.size.1 == 0 {
            return Err(ConfigError::Invalid("map size must be non-zero".to_string()));
        }

        self.imagery.params()?;
        let presets =
            sentinel2_presets().map_err(|error| ConfigError::Invalid(error.to_string()))?;
        if presets.get(&self.imagery.preset).is_err() {
            return Err(ConfigError::Invalid(format!(
                "unknown preset `{}`; expected one of {:?}",
                self.imagery.preset,
                presets.names()
            )));
        }
        if self.imagery.layer_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "layer name must not be empty".to_string(),
            ));
        }

        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "unknown log level `{}`",
                self.log_level
            )));
        }
        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<SessionConfig, ConfigError> {
    let config: SessionConfig = read_document::<_, ConfigError>(path.as_ref())?;
    config.validate()?;
    Ok(config)
}

pub fn save_config(path: impl AsRef<Path>, config: &SessionConfig) -> Result<(), ConfigError> {
    config.validate()?;
    write_document::<_, ConfigError>(path.as_ref(), config)
}
