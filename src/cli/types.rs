use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::model::Basemap;

#[derive(Debug, Parser)]
#[command(
    name = "earthsight",
    version,
    about = "Sentinel-2 composite, tile and histogram client"
)]
pub(super) struct Cli {
    /// Session configuration (YAML or JSON). Built-in defaults otherwise.
    #[arg(long, global = true)]
    pub(super) config: Option<PathBuf>,
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Default, Args)]
pub(super) struct ImageryArgs {
    #[arg(long)]
    pub(super) start: Option<NaiveDate>,
    #[arg(long)]
    pub(super) end: Option<NaiveDate>,
    #[arg(long)]
    pub(super) max_cloudy_pixel_pct: Option<u8>,
    #[arg(long)]
    pub(super) cloud_mask: Option<bool>,
    #[arg(long)]
    pub(super) temporal_op: Option<String>,
    #[arg(long)]
    pub(super) preset: Option<String>,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Prints the composite recipe for the imagery parameters.
    Recipe {
        #[command(flatten)]
        imagery: ImageryArgs,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Submits a saved recipe to the imagery service.
    Composite {
        recipe: PathBuf,
    },
    /// Builds the composite and prints its tile URL template.
    Tiles {
        #[command(flatten)]
        imagery: ImageryArgs,
    },
    /// Builds the composite and prints per-band histograms over a region.
    Histogram {
        #[command(flatten)]
        imagery: ImageryArgs,
        #[arg(long, allow_hyphen_values = true)]
        south: f64,
        #[arg(long, allow_hyphen_values = true)]
        west: f64,
        #[arg(long, allow_hyphen_values = true)]
        north: f64,
        #[arg(long, allow_hyphen_values = true)]
        east: f64,
        #[arg(long, default_value_t = 9)]
        zoom: u8,
    },
    Presets,
    Bands,
    Basemaps,
    /// Reduction scale in meters per pixel for a zoom level.
    Scale {
        zoom: u8,
    },
    /// Replays a session script on a headless map.
    Session {
        #[arg(long)]
        script: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
pub(super) struct BandInfo {
    pub(super) name: String,
    pub(super) min: f64,
    pub(super) max: f64,
    pub(super) aliases: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct BasemapInfo {
    pub(super) id: Basemap,
    pub(super) name: &'static str,
    pub(super) tile_url: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct TilesInfo {
    pub(super) composite_id: String,
    pub(super) scene_count: usize,
    pub(super) bands: Vec<String>,
    pub(super) tile_url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ScaleInfo {
    pub(super) zoom: u8,
    pub(super) meters_per_pixel: f64,
}
