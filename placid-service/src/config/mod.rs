use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config::{config_directory, layered_builder, LoggingSettings, ServerSettings};

/// Environment variable holding the Placid API token.
pub const API_KEY_ENV: &str = "PLACID_API_KEY";

/// Environment variable holding the fallback template id.
pub const TEMPLATE_ID_ENV: &str = "PLACID_TEMPLATE_ID";

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub placid: PlacidSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PlacidSettings {
    /// Bearer token for the Placid REST API. Absent means every upstream
    /// call is refused with a configuration error.
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    /// Template used when a request does not name one.
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.placid.app".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for PlacidSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            template_id: None,
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PlacidSettings {
    /// Treat empty values as unset, the way a blank `PLACID_API_KEY=` line in
    /// a `.env` file is meant.
    pub fn normalized(mut self) -> Self {
        self.api_key = self
            .api_key
            .filter(|key| !key.expose_secret().is_empty());
        self.template_id = self.template_id.filter(|id| !id.is_empty());
        self
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn template_configured(&self) -> bool {
        self.template_id.is_some()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct CorsSettings {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Load settings from `placid-service/config/base.yaml`, `APP__*` variables
/// and the conventional `PLACID_API_KEY` / `PLACID_TEMPLATE_ID` variables,
/// later sources winning.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let configuration_directory = config_directory("placid-service")?;

    let settings = layered_builder(&configuration_directory, &["cors.allowed_origins"])
        .set_override_option("placid.api_key", std::env::var(API_KEY_ENV).ok())?
        .set_override_option("placid.template_id", std::env::var(TEMPLATE_ID_ENV).ok())?
        .build()?;

    let mut settings = settings.try_deserialize::<Settings>()?;
    settings.placid = settings.placid.normalized();

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.placid.api_base_url, "https://api.placid.app");
        assert_eq!(settings.placid.timeout_secs, 30);
        assert_eq!(settings.cors.allowed_origins.len(), 2);
        assert!(!settings.placid.api_key_configured());
        assert!(!settings.placid.template_configured());
    }

    #[test]
    fn test_empty_values_are_unset() {
        let placid = PlacidSettings {
            api_key: Some(Secret::new(String::new())),
            template_id: Some(String::new()),
            ..Default::default()
        }
        .normalized();

        assert!(!placid.api_key_configured());
        assert!(!placid.template_configured());
    }

    #[test]
    fn test_present_values_survive_normalization() {
        let placid = PlacidSettings {
            api_key: Some(Secret::new("pk_live".to_string())),
            template_id: Some("tpl_123".to_string()),
            ..Default::default()
        }
        .normalized();

        assert!(placid.api_key_configured());
        assert_eq!(placid.template_id.as_deref(), Some("tpl_123"));
    }

    #[test]
    fn test_yaml_layer_deserializes() {
        let yaml = r#"
placid:
  api_key: "secret"
  template_id: "tpl"
  timeout_secs: 5
cors:
  allowed_origins: ["https://ads.example.com"]
"#;
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.placid.timeout_secs, 5);
        assert_eq!(settings.placid.api_key.unwrap().expose_secret(), "secret");
        assert_eq!(settings.cors.allowed_origins, vec!["https://ads.example.com"]);
        assert_eq!(settings.server.port, 8000);
    }
}
