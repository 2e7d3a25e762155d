//! Creative generation and template lookup, proxied to Placid.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;

use crate::{models::CreativeRequest, services::PlacidError, AppState};

/// Render a creative through Placid and return its response body verbatim.
pub async fn generate_ad(
    State(state): State<AppState>,
    payload: Result<Json<CreativeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) =
        payload.map_err(|rejection| AppError::UnprocessableEntity(rejection.body_text()))?;

    let creative = state
        .placid
        .generate(&request)
        .await
        .map_err(generate_error)?;

    Ok(Json(creative))
}

/// Return Placid's metadata for a template, mainly to discover layer names.
pub async fn template_info(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let info = state
        .placid
        .template_info(&template_id)
        .await
        .map_err(template_info_error)?;

    Ok(Json(info))
}

fn generate_error(err: PlacidError) -> AppError {
    match err {
        PlacidError::NotConfigured => AppError::ConfigError(err.to_string()),
        PlacidError::MissingTemplate | PlacidError::InvalidTemplateId(_) => {
            AppError::BadRequest(err.to_string())
        }
        PlacidError::Upstream { status, body } => AppError::Upstream {
            status: status.as_u16(),
            message: format!("Placid API error: {body}"),
        },
        PlacidError::Transport(e) => AppError::InternalError(anyhow::anyhow!("Request failed: {e}")),
        PlacidError::Internal(e) => {
            AppError::InternalError(anyhow::anyhow!("Unexpected error: {e:#}"))
        }
    }
}

fn template_info_error(err: PlacidError) -> AppError {
    match err {
        PlacidError::NotConfigured => AppError::ConfigError(err.to_string()),
        PlacidError::InvalidTemplateId(_) => AppError::BadRequest(err.to_string()),
        PlacidError::Upstream { status, body } => AppError::Upstream {
            status: status.as_u16(),
            message: format!("Failed to get template info: {body}"),
        },
        other => AppError::InternalError(anyhow::anyhow!("Error: {other}")),
    }
}
