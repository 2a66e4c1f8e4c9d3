use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::controls::ControlError;
use crate::imagery::ImageryError;
use crate::layers::LayerError;
use crate::map::MapError;
use crate::model::ModelError;
use crate::recipe::RecipeError;
use crate::service::ServiceError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("configuration I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration JSON failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("configuration YAML failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("invalid imagery defaults: {0}")]
    Model(#[from] ModelError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("recipe error: {0}")]
    Recipe(#[from] RecipeError),

    #[error("imagery service error: {0}")]
    Service(#[from] ServiceError),

    #[error("imagery error: {0}")]
    Imagery(#[from] ImageryError),

    #[error("map error: {0}")]
    Map(#[from] MapError),

    #[error("layer error: {0}")]
    Layer(#[from] LayerError),

    #[error("control error: {0}")]
    Control(#[from] ControlError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    NoScenes,
    RemoteService,
    Contract,
    Superseded,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::NoScenes => "no scenes",
            ErrorKind::RemoteService => "remote service",
            ErrorKind::Contract => "contract",
            ErrorKind::Superseded => "superseded",
        };
        formatter.write_str(name)
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Config(_) | AppError::Recipe(_) => ErrorKind::Configuration,
            AppError::Model(error) => model_kind(error),
            AppError::Service(_) => ErrorKind::RemoteService,
            AppError::Imagery(error) => imagery_kind(error),
            AppError::Map(error) => map_kind(error),
            AppError::Layer(error) => layer_kind(error),
            AppError::Control(error) => control_kind(error),
        }
    }
}

fn model_kind(error: &ModelError) -> ErrorKind {
    match error {
        ModelError::DuplicateBand(_) | ModelError::UnknownBand(_) => ErrorKind::Contract,
        _ => ErrorKind::Configuration,
    }
}

fn map_kind(error: &MapError) -> ErrorKind {
    match error {
        MapError::Viewport(_) => ErrorKind::Configuration,
        MapError::UnknownTileLayer(_) | MapError::UnknownPanel(_) => ErrorKind::Contract,
    }
}

fn imagery_kind(error: &ImageryError) -> ErrorKind {
    match error {
        ImageryError::Model(error) => model_kind(error),
        ImageryError::Service(_) => ErrorKind::RemoteService,
        ImageryError::NoScenes => ErrorKind::NoScenes,
        ImageryError::Superseded { .. } => ErrorKind::Superseded,
        ImageryError::NotComposited => ErrorKind::Contract,
        ImageryError::Recipe(_)
        | ImageryError::UnknownPreset(_)
        | ImageryError::InvalidPreset { .. }
        | ImageryError::RangeCountMismatch { .. } => ErrorKind::Configuration,
    }
}

fn layer_kind(error: &LayerError) -> ErrorKind {
    match error {
        LayerError::Imagery(error) => imagery_kind(error),
        LayerError::Map(error) => map_kind(error),
        LayerError::EmptyName => ErrorKind::Configuration,
        LayerError::UnknownLayer(_) | LayerError::NoSelection | LayerError::NothingToDraw(_) => {
            ErrorKind::Contract
        }
    }
}

fn control_kind(error: &ControlError) -> ErrorKind {
    match error {
        ControlError::Model(error) => model_kind(error),
        ControlError::Imagery(error) => imagery_kind(error),
        ControlError::Layer(error) => layer_kind(error),
        ControlError::Map(error) => map_kind(error),
        ControlError::Service(_) => ErrorKind::RemoteService,
        ControlError::InvalidSlot { .. } => ErrorKind::Configuration,
        ControlError::Unbound
        | ControlError::HistogramClosed
        | ControlError::StaleFigure { .. } => ErrorKind::Contract,
    }
}
