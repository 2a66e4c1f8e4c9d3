use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemporalOp {
    Mean,
    Min,
    Max,
    #[default]
    Median,
    /// Per-pixel first valid value in archive order. Occlusion compositing,
    /// not a statistic.
    Mosaic,
}

impl TemporalOp {
    pub const ALL: [TemporalOp; 5] = [
        TemporalOp::Mean,
        TemporalOp::Min,
        TemporalOp::Max,
        TemporalOp::Median,
        TemporalOp::Mosaic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalOp::Mean => "mean",
            TemporalOp::Min => "min",
            TemporalOp::Max => "max",
            TemporalOp::Median => "median",
            TemporalOp::Mosaic => "mosaic",
        }
    }

    pub fn is_statistical(&self) -> bool {
        !matches!(self, TemporalOp::Mosaic)
    }
}

impl fmt::Display for TemporalOp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for TemporalOp {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        TemporalOp::ALL
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or_else(|| ModelError::InvalidTemporalOp(value.to_string()))
    }
}
