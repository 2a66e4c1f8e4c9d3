use clap::Parser;
use serde::Serialize;

use crate::imagery::ImagerySource;
use crate::model::{Basemap, Bounds, TemporalOp, zoom_to_scale};
use crate::recipe::{load_recipe, save_recipe};
use crate::service::ImageryService;
use crate::runtime::{AppContext, SessionConfig, load_config};
use crate::script::{load_script, run_script, save_report};

use super::types::{BandInfo, BasemapInfo, Cli, Commands, ImageryArgs, ScaleInfo, TilesInfo};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path).map_err(|error| error.to_string())?,
        None => SessionConfig::default(),
    };
    init_logging(&config.log_level);

    match cli.command {
        Commands::Recipe { imagery, output } => {
            let app = context(config, &imagery)?;
            let recipe = app
                .new_source()
                .map_err(|error| error.to_string())?
                .recipe();
            if let Some(output) = output {
                save_recipe(&output, &recipe).map_err(|error| error.to_string())?;
            }
            print_json(&recipe)?;
        }
        Commands::Composite { recipe } => {
            let recipe = load_recipe(&recipe).map_err(|error| error.to_string())?;
            let app = AppContext::new(config).map_err(|error| error.to_string())?;
            let handle = app
                .service()
                .composite(&recipe)
                .map_err(|error| error.to_string())?;
            if handle.scene_count == 0 {
                log::warn!("recipe matched no scenes");
            }
            print_json(&handle)?;
        }
        Commands::Tiles { imagery } => {
            let app = context(config, &imagery)?;
            let mut source = composited(&app)?;
            let tile_url = source
                .get_tile_url(app.service())
                .map_err(|error| error.to_string())?;
            let composite = source
                .composite()
                .ok_or_else(|| "composite missing after rebuild".to_string())?;
            print_json(&TilesInfo {
                composite_id: composite.id.clone(),
                scene_count: composite.scene_count,
                bands: source.active_bands().to_vec(),
                tile_url: tile_url.as_str().to_string(),
            })?;
        }
        Commands::Histogram {
            imagery,
            south,
            west,
            north,
            east,
            zoom,
        } => {
            let bounds =
                Bounds::new(south, west, north, east).map_err(|error| error.to_string())?;
            let app = context(config, &imagery)?;
            let source = composited(&app)?;
            let histogram = source
                .compute_histogram(app.service(), &bounds, zoom)
                .map_err(|error| error.to_string())?;
            print_json(&histogram)?;
        }
        Commands::Presets => {
            let app = context(config, &ImageryArgs::default())?;
            let source = app.new_source().map_err(|error| error.to_string())?;
            let presets: Vec<_> = source.presets().iter().collect();
            print_json(&presets)?;
        }
        Commands::Bands => {
            let app = context(config, &ImageryArgs::default())?;
            let source = app.new_source().map_err(|error| error.to_string())?;
            let registry = source.bands();
            let mut bands = Vec::with_capacity(registry.len());
            for name in registry.names() {
                let band = registry.get(name).map_err(|error| error.to_string())?;
                bands.push(BandInfo {
                    name: name.to_string(),
                    min: band.min(),
                    max: band.max(),
                    aliases: registry
                        .aliases()
                        .filter(|(_, target)| *target == name)
                        .map(|(alias, _)| alias.to_string())
                        .collect(),
                });
            }
            print_json(&bands)?;
        }
        Commands::Basemaps => {
            let basemaps: Vec<BasemapInfo> = Basemap::ALL
                .into_iter()
                .map(|basemap| BasemapInfo {
                    id: basemap,
                    name: basemap.display_name(),
                    tile_url: basemap.tile_url(),
                })
                .collect();
            print_json(&basemaps)?;
        }
        Commands::Scale { zoom } => {
            print_json(&ScaleInfo {
                zoom,
                meters_per_pixel: zoom_to_scale(zoom),
            })?;
        }
        Commands::Session { script, report } => {
            let script = load_script(&script).map_err(|error| error.to_string())?;
            let app = AppContext::new(config).map_err(|error| error.to_string())?;
            let mut session = app.start_session().map_err(|error| error.to_string())?;
            let run_report =
                run_script(&mut session, &script).map_err(|error| error.to_string())?;
            if let Some(report_path) = report {
                save_report(&report_path, &run_report).map_err(|error| error.to_string())?;
                log::info!("report written to {}", report_path.display());
            }
            print_json(&run_report)?;
        }
    }

    Ok(())
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // RUST_LOG wins over the configured level.
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).map_err(|error| error.to_string())?
    );
    Ok(())
}

fn context(mut config: SessionConfig, imagery: &ImageryArgs) -> Result<AppContext, String> {
    if let Some(start) = imagery.start {
        config.imagery.start = start;
    }
    if let Some(end) = imagery.end {
        config.imagery.end = end;
    }
    if let Some(pct) = imagery.max_cloudy_pixel_pct {
        config.imagery.max_cloudy_pixel_pct = pct;
    }
    if let Some(enabled) = imagery.cloud_mask {
        config.imagery.cloud_mask_enabled = enabled;
    }
    if let Some(op) = &imagery.temporal_op {
        config.imagery.temporal_op = op
            .parse::<TemporalOp>()
            .map_err(|error| error.to_string())?;
    }
    if let Some(preset) = &imagery.preset {
        config.imagery.preset = preset.clone();
    }
    AppContext::new(config).map_err(|error| error.to_string())
}

fn composited(app: &AppContext) -> Result<ImagerySource, String> {
    let mut source = app.new_source().map_err(|error| error.to_string())?;
    source
        .rebuild_composite(app.service())
        .map_err(|error| error.to_string())?;
    Ok(source)
}
