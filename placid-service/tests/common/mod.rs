#![allow(dead_code)]

use placid_service::config::{PlacidSettings, Settings};
use placid_service::startup::Application;
use secrecy::Secret;
use service_core::config::ServerSettings;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-placid-key";
pub const DEFAULT_TEMPLATE_ID: &str = "default-template";

pub struct TestApp {
    pub address: String,
    pub placid: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    /// App with an API key and a default template, talking to a mock Placid.
    pub async fn spawn() -> Self {
        Self::spawn_with(Some(TEST_API_KEY), Some(DEFAULT_TEMPLATE_ID), 30).await
    }

    pub async fn spawn_with(
        api_key: Option<&str>,
        template_id: Option<&str>,
        timeout_secs: u64,
    ) -> Self {
        let placid = MockServer::start().await;
        let placid_settings = PlacidSettings {
            api_key: api_key.map(|key| Secret::new(key.to_string())),
            template_id: template_id.map(str::to_string),
            api_base_url: placid.uri(),
            timeout_secs,
        };

        Self::spawn_against(placid, placid_settings).await
    }

    /// App whose upstream base URL points at `api_base_url` instead of the mock.
    pub async fn spawn_with_base_url(api_base_url: &str) -> Self {
        let placid = MockServer::start().await;
        let placid_settings = PlacidSettings {
            api_key: Some(Secret::new(TEST_API_KEY.to_string())),
            template_id: Some(DEFAULT_TEMPLATE_ID.to_string()),
            api_base_url: api_base_url.to_string(),
            timeout_secs: 5,
        };

        Self::spawn_against(placid, placid_settings).await
    }

    async fn spawn_against(placid: MockServer, placid_settings: PlacidSettings) -> Self {
        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            placid: placid_settings.normalized(),
            ..Default::default()
        };

        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address,
            placid,
            client: reqwest::Client::new(),
        }
    }

    pub async fn generate_ad(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/generate-ad", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn template_info(&self, template_id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/api/template-info/{}", self.address, template_id))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
