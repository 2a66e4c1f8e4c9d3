use serde::{Deserialize, Serialize};

use super::{ModelError, Result};

pub const MAX_ZOOM: u8 = 20;

const ZOOM_TO_SCALE: [f64; MAX_ZOOM as usize + 1] = [
    156412.0, 78206.0, 39103.0, 19551.0, 9776.0, 4888.0, 2444.0, 1222.0, 611.0, 305.0, 152.0,
    76.0, 38.0, 19.0, 10.0, 5.0, 3.0, 2.0, 1.0, 0.5, 0.1,
];

/// Scale used for region reductions at `zoom`. Depends on the zoom level
/// only, never on the map's pixel dimensions. Zoom levels past
/// [`MAX_ZOOM`] use the finest entry.
pub fn zoom_to_scale(zoom: u8) -> f64 {
    ZOOM_TO_SCALE[usize::from(zoom.min(MAX_ZOOM))]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self> {
        let bounds = Self {
            south,
            west,
            north,
            east,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn from_corners(south_west: (f64, f64), north_east: (f64, f64)) -> Result<Self> {
        Self::new(south_west.0, south_west.1, north_east.0, north_east.1)
    }

    pub fn validate(&self) -> Result<()> {
        let latitudes = [self.south, self.north];
        let longitudes = [self.west, self.east];
        if latitudes.iter().any(|lat| !(-90.0..=90.0).contains(lat)) {
            return Err(ModelError::InvalidBounds(format!(
                "latitudes must lie within [-90, 90], got south {} north {}",
                self.south, self.north
            )));
        }
        if longitudes.iter().any(|lon| !(-180.0..=180.0).contains(lon)) {
            return Err(ModelError::InvalidBounds(format!(
                "longitudes must lie within [-180, 180], got west {} east {}",
                self.west, self.east
            )));
        }
        if self.south > self.north {
            return Err(ModelError::InvalidBounds(format!(
                "south {} is above north {}",
                self.south, self.north
            )));
        }
        Ok(())
    }

    pub fn to_geometry(&self) -> Geometry {
        let ring = vec![
            [self.west, self.south],
            [self.east, self.south],
            [self.east, self.north],
            [self.west, self.north],
            [self.west, self.south],
        ];
        Geometry::Polygon {
            coordinates: vec![ring],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}
