use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Basemap {
    OsmMapnik,
    OsmBlackAndWhite,
    #[default]
    OsmHot,
    OpenTopo,
    CartoDbLight,
    CartoDbDark,
    StamenTerrain,
    StamenToner,
    StamenWatercolor,
}

impl Basemap {
    pub const ALL: [Basemap; 9] = [
        Basemap::OsmMapnik,
        Basemap::OsmBlackAndWhite,
        Basemap::OsmHot,
        Basemap::OpenTopo,
        Basemap::CartoDbLight,
        Basemap::CartoDbDark,
        Basemap::StamenTerrain,
        Basemap::StamenToner,
        Basemap::StamenWatercolor,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Basemap::OsmMapnik => "OSM Mapnik",
            Basemap::OsmBlackAndWhite => "OSM Black & White",
            Basemap::OsmHot => "OSM HOT",
            Basemap::OpenTopo => "Open Topo",
            Basemap::CartoDbLight => "CartoDB Light",
            Basemap::CartoDbDark => "CartoDB Dark",
            Basemap::StamenTerrain => "Stamen Terrain",
            Basemap::StamenToner => "Stamen Toner",
            Basemap::StamenWatercolor => "Stamen Watercolor",
        }
    }

    pub fn tile_url(&self) -> &'static str {
        match self {
            Basemap::OsmMapnik => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            Basemap::OsmBlackAndWhite => "https://tiles.wmflabs.org/bw-mapnik/{z}/{x}/{y}.png",
            Basemap::OsmHot => "https://a.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png",
            Basemap::OpenTopo => "https://a.tile.opentopomap.org/{z}/{x}/{y}.png",
            Basemap::CartoDbLight => "https://a.basemaps.cartocdn.com/light_all/{z}/{x}/{y}.png",
            Basemap::CartoDbDark => "https://a.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}.png",
            Basemap::StamenTerrain => {
                "https://tiles.stadiamaps.com/tiles/stamen_terrain/{z}/{x}/{y}.png"
            }
            Basemap::StamenToner => {
                "https://tiles.stadiamaps.com/tiles/stamen_toner/{z}/{x}/{y}.png"
            }
            Basemap::StamenWatercolor => {
                "https://tiles.stadiamaps.com/tiles/stamen_watercolor/{z}/{x}/{y}.jpg"
            }
        }
    }
}

impl fmt::Display for Basemap {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.display_name())
    }
}

impl FromStr for Basemap {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Basemap::ALL
            .into_iter()
            .find(|basemap| basemap.display_name() == value.trim())
            .ok_or_else(|| ModelError::UnknownBasemap(value.to_string()))
    }
}
