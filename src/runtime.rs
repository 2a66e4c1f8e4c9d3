mod config;
mod context;
mod error;
mod session;

#[cfg(test)]
mod tests;

pub use config::{ImageryConfig, MapConfig, SessionConfig, load_config, save_config};
pub use context::AppContext;
pub use error::{AppError, ConfigError, ErrorKind, Result};
pub use session::{Pane, Session, SessionInput, SessionSnapshot};
