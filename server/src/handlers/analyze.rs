//! Analysis handlers
//!
//! Thin boundary around the detection core: reject empty input before the
//! core runs, score, append to history. A persistence failure is logged
//! but never blocks or alters the Verdict.

use axum::{extract::State, Json};
use serde::Deserialize;

use phishguard_core::{Modality, Verdict};

use crate::middleware::auth::UserContext;
use crate::models::ScanRecord;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    #[serde(rename = "emailText")]
    pub email_text: String,
}

/// Analyze URL for phishing
pub async fn analyze_url(
    State(state): State<AppState>,
    user: UserContext,
    Json(req): Json<UrlRequest>,
) -> AppResult<Json<Verdict>> {
    if req.url.trim().is_empty() {
        return Err(AppError::ValidationError("No URL provided".to_string()));
    }

    let verdict = state.engine.score_url(&req.url)?;
    record_scan(&state, &user, Modality::Url, &req.url, &verdict).await;

    Ok(Json(verdict))
}

/// Analyze email content for phishing
pub async fn analyze_email(
    State(state): State<AppState>,
    user: UserContext,
    Json(req): Json<EmailRequest>,
) -> AppResult<Json<Verdict>> {
    if req.email_text.trim().is_empty() {
        return Err(AppError::ValidationError("No email text provided".to_string()));
    }

    let verdict = state.engine.score_email(&req.email_text)?;
    record_scan(&state, &user, Modality::Email, &req.email_text, &verdict).await;

    Ok(Json(verdict))
}

async fn record_scan(
    state: &AppState,
    user: &UserContext,
    modality: Modality,
    content: &str,
    verdict: &Verdict,
) {
    if let Err(err) =
        ScanRecord::insert(&state.pool, user.user_id, modality, content, verdict).await
    {
        tracing::warn!("Failed to record {} scan: {}", modality.as_str(), err);
    }
}
