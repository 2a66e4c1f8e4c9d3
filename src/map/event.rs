use serde::{Deserialize, Serialize};

use crate::model::{Bounds, MAX_ZOOM};

use super::Result;

const TILE_SIZE: f64 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MapEvent {
    BoundsChanged { bounds: Bounds },
    ZoomChanged { zoom: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    bounds: Bounds,
    zoom: u8,
}

impl Viewport {
    pub fn new(bounds: Bounds, zoom: u8) -> Result<Self> {
        bounds.validate()?;
        Ok(Self {
            bounds,
            zoom: zoom.min(MAX_ZOOM),
        })
    }

    /// Web-mercator approximation of a `width` x `height` pixel view around
    /// `center` (latitude, longitude).
    pub fn centered(center: (f64, f64), zoom: u8, size: (u32, u32)) -> Result<Self> {
        let zoom = zoom.min(MAX_ZOOM);
        let degrees_per_pixel = 360.0 / (TILE_SIZE * 2f64.powi(i32::from(zoom)));
        let half_width = f64::from(size.0) / 2.0 * degrees_per_pixel;
        let half_height = f64::from(size.1) / 2.0 * degrees_per_pixel * center.0.to_radians().cos();
        let bounds = Bounds::new(
            (center.0 - half_height).max(-90.0),
            (center.1 - half_width).max(-180.0),
            (center.0 + half_height).min(90.0),
            (center.1 + half_width).min(180.0),
        )?;
        Self::new(bounds, zoom)
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn apply(&mut self, event: MapEvent) -> Result<()> {
        match event {
            MapEvent::BoundsChanged { bounds } => {
                bounds.validate()?;
                self.bounds = bounds;
            }
            MapEvent::ZoomChanged { zoom } => {
                if zoom > MAX_ZOOM {
                    log::warn!("zoom {zoom} is past the finest level, using {MAX_ZOOM}");
                }
                self.zoom = zoom.min(MAX_ZOOM);
            }
        }
        Ok(())
    }
}
