use std::path::PathBuf;
use timetrack_core::{default_log_level, init_logging};
use timetrack_server::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use timetrack_server::{serve, ConfigError, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), ConfigError> {
    let config_path = PathBuf::from(
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
    );
    let config = ServerConfig::load(&config_path).await?;

    let level = config
        .logging
        .level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    let log_dir = config.log_dir(&config_path)?;
    let log_dir = log_dir
        .as_deref()
        .map(|dir| {
            dir.to_str().ok_or_else(|| {
                ConfigError::Invalid(format!("log dir is not UTF-8: {}", dir.display()))
            })
        })
        .transpose()?;
    init_logging(&level, log_dir).map_err(ConfigError::Invalid)?;

    log::info!(
        "event=config_load module=server status=ok path={} clockify_key_set={}",
        config_path.display(),
        config.clockify.api_key().is_some()
    );

    serve(config, &config_path).await
}
