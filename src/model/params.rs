use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ModelError, Result, TemporalOp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageParams {
    start: NaiveDate,
    end: NaiveDate,
    max_cloudy_pixel_pct: u8,
    cloud_mask_enabled: bool,
    temporal_op: TemporalOp,
}

impl ImageParams {
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        max_cloudy_pixel_pct: u8,
        cloud_mask_enabled: bool,
        temporal_op: TemporalOp,
    ) -> Result<Self> {
        validate(start, end, max_cloudy_pixel_pct)?;
        Ok(Self {
            start,
            end,
            max_cloudy_pixel_pct,
            cloud_mask_enabled,
            temporal_op,
        })
    }

    pub fn set(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        max_cloudy_pixel_pct: u8,
        cloud_mask_enabled: bool,
        temporal_op: TemporalOp,
    ) -> Result<()> {
        *self = Self::new(
            start,
            end,
            max_cloudy_pixel_pct,
            cloud_mask_enabled,
            temporal_op,
        )?;
        Ok(())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn max_cloudy_pixel_pct(&self) -> u8 {
        self.max_cloudy_pixel_pct
    }

    pub fn cloud_mask_enabled(&self) -> bool {
        self.cloud_mask_enabled
    }

    pub fn temporal_op(&self) -> TemporalOp {
        self.temporal_op
    }

    pub fn validate(&self) -> Result<()> {
        validate(self.start, self.end, self.max_cloudy_pixel_pct)
    }
}

impl Default for ImageParams {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2020, 9, 1).unwrap_or_default(),
            max_cloudy_pixel_pct: 20,
            cloud_mask_enabled: false,
            temporal_op: TemporalOp::Median,
        }
    }
}

fn validate(start: NaiveDate, end: NaiveDate, max_cloudy_pixel_pct: u8) -> Result<()> {
    if start > end {
        return Err(ModelError::InvalidDateRange { start, end });
    }
    if max_cloudy_pixel_pct > 100 {
        return Err(ModelError::InvalidCloudyPixelPct(max_cloudy_pixel_pct));
    }
    Ok(())
}
