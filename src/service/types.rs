use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Geometry;

use super::{Result, ServiceError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeHandle {
    pub id: String,
    pub scene_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TileUrl(String);

impl TileUrl {
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let complete = ["{z}", "{x}", "{y}"]
            .iter()
            .all(|placeholder| template.contains(placeholder));
        if complete {
            Ok(Self(template))
        } else {
            Err(ServiceError::InvalidTileUrl(template))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn tile(&self, z: u8, x: u32, y: u32) -> String {
        self.0
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

impl TryFrom<String> for TileUrl {
    type Error = ServiceError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TileUrl> for String {
    fn from(url: TileUrl) -> Self {
        url.0
    }
}

impl fmt::Display for TileUrl {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Region reduction over a composite's bands.
///
/// `best_effort` lets the service subsample the region, so the returned
/// counts describe the distribution's shape rather than exact pixel totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramRequest {
    pub composite_id: String,
    pub bands: Vec<String>,
    pub region: Geometry,
    /// Metres per pixel.
    pub scale: f64,
    pub best_effort: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandHistogram {
    #[serde(rename = "bucketMeans")]
    pub bucket_centers: Vec<f64>,
    #[serde(rename = "histogram")]
    pub counts: Vec<f64>,
}

impl BandHistogram {
    pub fn validate(&self, band: &str) -> Result<()> {
        if self.bucket_centers.len() != self.counts.len() {
            return Err(ServiceError::MalformedHistogram {
                band: band.to_string(),
                reason: format!(
                    "{} bucket centers but {} counts",
                    self.bucket_centers.len(),
                    self.counts.len()
                ),
            });
        }
        Ok(())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.bucket_centers
            .iter()
            .copied()
            .zip(self.counts.iter().copied())
    }

    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HistogramResult {
    pub histograms: BTreeMap<String, BandHistogram>,
}

impl HistogramResult {
    pub fn band(&self, name: &str) -> Result<&BandHistogram> {
        self.histograms
            .get(name)
            .ok_or_else(|| ServiceError::MissingBand(name.to_string()))
    }

    pub fn validate(&self, bands: &[String]) -> Result<()> {
        for band in bands {
            self.band(band)?.validate(band)?;
        }
        Ok(())
    }
}
