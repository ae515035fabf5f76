use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use caseintake_service::SubmitStep;

use crate::api_error::ApiError;
use crate::api_types::{CaseProgressRequest, CaseProgressResponse};
use crate::AppState;

/// `PUT /case-progress` and its alias: one step submission.
pub async fn submit_case_progress(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CaseProgressRequest>,
) -> Result<Json<CaseProgressResponse>, ApiError> {
    let submit = SubmitStep {
        submission_id: request.submission_id,
        case_id: request.case_id,
        step_key: request.current_step,
        payload: request.step_data,
        source: request.source,
        user_agent: header_text(&headers, header::USER_AGENT.as_str()),
        ip: client_ip(&headers),
    };

    let outcome = state.progress_service.submit_step(submit).await?;
    Ok(Json(CaseProgressResponse {
        success: true,
        case_id: outcome.case_id,
        current_step: outcome.current_step,
        submission_id: outcome.submission_id,
        warning: outcome.warning,
    }))
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(ToOwned::to_owned)
}

/// First hop of X-Forwarded-For, falling back to X-Real-IP. Observability
/// metadata only; nothing trusts it.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    header_text(headers, "x-forwarded-for")
        .and_then(|list| list.split(',').next().map(|ip| ip.trim().to_owned()))
        .filter(|ip| !ip.is_empty())
        .or_else(|| header_text(headers, "x-real-ip"))
}
