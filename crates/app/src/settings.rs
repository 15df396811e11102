//! Settings for the `splitter` binary.
//!
//! Values come from an optional TOML file, then `SPLITTER_*` environment
//! variables, then command-line flags.
use serde::Deserialize;

use crate::{cli::Cli, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/splitter.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level for the `splitter` and `engine` targets.
    pub level: String,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            pretty: false,
        }
    }
}

pub fn load(cli: &Cli) -> Result<Settings> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPLITTER"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(level) = &cli.level {
        settings.level = level.clone();
    }
    if cli.pretty {
        settings.pretty = true;
    }

    Ok(settings)
}
