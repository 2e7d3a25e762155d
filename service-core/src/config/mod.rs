//! Configuration building blocks shared by every service.
//!
//! Services layer their settings as: serde defaults, then an optional
//! `<service>/config/base.yaml`, then `APP__`-prefixed environment variables.

use config::{ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// OTLP collector endpoint; span export is disabled when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

/// Load `.env` files for a service: the workspace-level one first, then the
/// one inside the service directory. Variables already set are never
/// overwritten, so the first file to define a key wins.
pub fn load_dotenv(service_dir: &str) {
    let Ok(base_path) = std::env::current_dir() else {
        return;
    };

    let (workspace_dir, service_path) = if base_path.ends_with(service_dir) {
        (
            base_path.parent().map(Path::to_path_buf),
            base_path.clone(),
        )
    } else {
        (Some(base_path.clone()), base_path.join(service_dir))
    };

    let candidates = workspace_dir
        .map(|dir| dir.join(".env"))
        .into_iter()
        .chain(std::iter::once(service_path.join(".env")));

    for path in candidates {
        if dotenvy::from_path(&path).is_ok() {
            eprintln!("Loaded environment from {}", path.display());
        }
    }
}

/// Resolve `<service>/config` whether the process runs from the workspace
/// root or from inside the service directory.
pub fn config_directory(service_dir: &str) -> Result<PathBuf, ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;

    Ok(if base_path.ends_with(service_dir) {
        base_path.join("config")
    } else {
        base_path.join(service_dir).join("config")
    })
}

/// File and environment sources common to all services.
///
/// `list_keys` names settings that may be given as comma separated lists in
/// the environment, e.g. `APP__CORS__ALLOWED_ORIGINS=a,b`.
pub fn layered_builder(
    configuration_directory: &Path,
    list_keys: &[&str],
) -> ConfigBuilder<DefaultState> {
    let mut environment = Environment::with_prefix("APP")
        .separator("__")
        .try_parsing(true);

    // Without explicit keys every value containing a comma would be split.
    if !list_keys.is_empty() {
        environment = list_keys
            .iter()
            .fold(environment.list_separator(","), |env, key| {
                env.with_list_parse_key(key)
            });
    }

    config::Config::builder()
        .add_source(File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(environment)
}
