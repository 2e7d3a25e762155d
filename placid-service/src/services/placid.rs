//! Placid REST API client.
//!
//! Forwards creative generation requests and template lookups to Placid.
//! Responses are relayed untouched; no retries are attempted.

use crate::config::PlacidSettings;
use crate::models::{CreativePayload, CreativeRequest};
use anyhow::Context;
use reqwest::{Client, Response, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Error type for Placid operations.
#[derive(Error, Debug)]
pub enum PlacidError {
    #[error("Placid API key not configured")]
    NotConfigured,

    #[error("Template ID not provided")]
    MissingTemplate,

    #[error("Invalid template ID: {0}")]
    InvalidTemplateId(String),

    #[error("Placid API returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("{0:#}")]
    Internal(anyhow::Error),
}

/// Which upstream endpoint a call went to; used as a metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Render,
    TemplateInfo,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Operation::Render => "render",
            Operation::TemplateInfo => "template_info",
        }
    }
}

/// Client for the Placid REST API.
#[derive(Clone, Debug)]
pub struct PlacidClient {
    client: Client,
    settings: PlacidSettings,
}

impl PlacidClient {
    /// Build a client whose requests are bounded by `settings.timeout_secs`.
    pub fn new(settings: PlacidSettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to create Placid HTTP client")?;

        Ok(Self { client, settings })
    }

    /// Check if the API key is set.
    pub fn is_configured(&self) -> bool {
        self.settings.api_key_configured()
    }

    /// Check if a fallback template is set.
    pub fn template_configured(&self) -> bool {
        self.settings.template_configured()
    }

    fn api_key(&self) -> Result<&Secret<String>, PlacidError> {
        self.settings
            .api_key
            .as_ref()
            .ok_or(PlacidError::NotConfigured)
    }

    /// `{base}/{segments..}/{template_id}` with the id as a single
    /// percent-encoded path segment.
    fn endpoint(&self, segments: &[&str], template_id: &str) -> Result<Url, PlacidError> {
        // `.` and `..` would be dropped by the segment encoder.
        if matches!(template_id, "." | "..") {
            return Err(PlacidError::InvalidTemplateId(template_id.to_string()));
        }

        let mut url = Url::parse(&self.settings.api_base_url)
            .context("Invalid Placid API base URL")
            .map_err(PlacidError::Internal)?;
        url.path_segments_mut()
            .map_err(|_| {
                PlacidError::Internal(anyhow::anyhow!(
                    "Placid API base URL cannot carry a path: {}",
                    self.settings.api_base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments)
            .push(template_id);

        Ok(url)
    }

    pub fn render_url(&self, template_id: &str) -> Result<Url, PlacidError> {
        self.endpoint(&["api", "rest"], template_id)
    }

    pub fn template_url(&self, template_id: &str) -> Result<Url, PlacidError> {
        self.endpoint(&["api", "rest", "templates"], template_id)
    }

    /// Render a creative from `request`.
    ///
    /// The API key is checked before the template id, so an unconfigured
    /// service always reports the configuration problem first.
    pub async fn generate(&self, request: &CreativeRequest) -> Result<Value, PlacidError> {
        let api_key = self.api_key()?;
        let template_id = request
            .effective_template_id(self.settings.template_id.as_deref())
            .ok_or(PlacidError::MissingTemplate)?;

        let url = self.render_url(template_id)?;
        let payload = CreativePayload::from(request);

        tracing::info!(
            url = %url,
            template_id = %template_id,
            create_now = payload.create_now,
            modification_count = payload.modifications.len(),
            "Making request to Placid API"
        );
        for (key, value) in &payload.modifications {
            tracing::info!(key = %key, value = %value, "Modification sent to Placid");
        }

        let result = self
            .client
            .post(url)
            .bearer_auth(api_key.expose_secret())
            .json(&payload)
            .send()
            .await;

        self.relay(Operation::Render, result).await
    }

    /// Fetch template metadata (layers, dimensions) for debugging field names.
    pub async fn template_info(&self, template_id: &str) -> Result<Value, PlacidError> {
        let api_key = self.api_key()?;
        let url = self.template_url(template_id)?;

        tracing::info!(url = %url, template_id = %template_id, "Fetching Placid template info");

        let result = self
            .client
            .get(url)
            .bearer_auth(api_key.expose_secret())
            .send()
            .await;

        self.relay(Operation::TemplateInfo, result).await
    }

    /// Turn the upstream response into the JSON body to return verbatim.
    async fn relay(
        &self,
        operation: Operation,
        result: Result<Response, reqwest::Error>,
    ) -> Result<Value, PlacidError> {
        let outcome = self.read_response(operation, result).await;

        let label = match &outcome {
            Ok(_) => "success",
            Err(PlacidError::Upstream { .. }) => "upstream_error",
            Err(PlacidError::Transport(_)) => "transport_error",
            Err(_) => "internal_error",
        };
        metrics::counter!(
            "placid_upstream_requests_total",
            "operation" => operation.as_str(),
            "outcome" => label
        )
        .increment(1);

        outcome
    }

    async fn read_response(
        &self,
        operation: Operation,
        result: Result<Response, reqwest::Error>,
    ) -> Result<Value, PlacidError> {
        let response = result.map_err(|e| {
            tracing::error!(operation = operation.as_str(), error = %e, "Placid request failed");
            PlacidError::Transport(e)
        })?;

        let status = response.status();
        tracing::info!(operation = operation.as_str(), status = %status, "Placid API response");

        let body = response.text().await.map_err(PlacidError::Transport)?;

        if !status.is_success() {
            tracing::error!(
                operation = operation.as_str(),
                status = %status,
                body = %body,
                "Placid API error"
            );
            return Err(PlacidError::Upstream { status, body });
        }

        serde_json::from_str(&body)
            .context("Placid API returned a non-JSON body")
            .map_err(PlacidError::Internal)
    }
}
