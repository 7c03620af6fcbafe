//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{AnalysisError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP_, nested with `__`,
///    e.g. `APP_WORKER__BATCH_SIZE=16`)
/// 2. Configuration file (TOML format)
/// 3. Default values
///
/// The loaded configuration is validated before it is returned.
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("validation.allowed_sectors")
            .try_parsing(true),
    );

    let config: AppConfig = builder
        .build()
        .map_err(|e| AnalysisError::Configuration(e.to_string()))?
        .try_deserialize()
        .map_err(|e| AnalysisError::Configuration(e.to_string()))?;

    config.validate()?;
    Ok(config)
}
