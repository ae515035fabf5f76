use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use caseintake_core::is_valid_email;

use crate::api_error::ApiError;
use crate::api_types::{OptInRequest, OptInResponse, TrackRequest, TrackResponse};
use crate::AppState;

/// `POST /track`: forward one marketing event. Forwarding is best-effort;
/// the widget always gets a success so a broken analytics vendor cannot
/// break the form.
pub async fn track(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TrackRequest>,
) -> Json<TrackResponse> {
    let forwarded = match state.analytics.as_ref() {
        None => {
            tracing::debug!(event = %request.event, "analytics not configured, dropping event");
            false
        },
        Some(client) => {
            match client
                .forward(&request.event, &request.properties, request.case_id.as_deref())
                .await
            {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, event = %request.event, "analytics forward failed");
                    false
                },
            }
        },
    };
    Json(TrackResponse { success: true, forwarded })
}

/// `POST /opt-in`: trigger the double-opt-in confirmation email. The email
/// shape is validated here; the provider call itself is best-effort.
pub async fn opt_in(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OptInRequest>,
) -> Result<Json<OptInResponse>, ApiError> {
    let email = request.email.trim();
    if !is_valid_email(email) {
        return Err(ApiError::BadRequest(format!("email '{email}' is not a valid address")));
    }

    let triggered = match state.optin.as_ref() {
        None => {
            tracing::debug!("opt-in email provider not configured");
            false
        },
        Some(client) => match client.trigger_double_opt_in(email, &request.case_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, case_id = %request.case_id, "opt-in trigger failed");
                false
            },
        },
    };
    Ok(Json(OptInResponse { success: true, triggered }))
}
