use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::Html,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ApiError;
use crate::config::Config;
use crate::services::session::FormContext;
use crate::services::AppState;

const FORM_TEMPLATE: &str = include_str!("../../templates/form.html");

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateFormResponse {
    pub form_url: String,
    pub expires_at: DateTime<Utc>,
}

pub async fn generate_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<GenerateFormResponse>, ApiError> {
    let issued = state.sessions.issue().map_err(|e| {
        warn!(reason = %e, "Form session refused");
        e
    })?;
    let base = base_url(&state.config, &headers);
    info!(expires_at = %issued.expires_at, "Form session issued");

    Ok(Json(GenerateFormResponse {
        form_url: format!("{}/form/{}", base, issued.token),
        expires_at: issued.expires_at,
    }))
}

pub async fn form_page(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Html<String>, ApiError> {
    let ctx = state.sessions.redeem(&token).map_err(|e| {
        warn!(reason = %e, "Form session rejected");
        e
    })?;
    Ok(Html(render_form(&ctx)))
}

fn base_url(config: &Config, headers: &HeaderMap) -> String {
    if let Some(url) = &config.public_base_url {
        return url.trim_end_matches('/').to_string();
    }
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("localhost:{}", config.port));
    format!("http://{}", host)
}

fn render_form(ctx: &FormContext) -> String {
    FORM_TEMPLATE
        .replace("{{ session_id }}", &ctx.token)
        .replace("{{ expires_at }}", &ctx.expires_at.timestamp().to_string())
}
