use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use crate::api_error::ApiError;
use crate::api_types::{HospitalQuery, HospitalsResponse};
use crate::AppState;

/// `GET /hospitals?q=<prefix>`: autocomplete suggestions for the hospital
/// step.
pub async fn autocomplete(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HospitalQuery>,
) -> Result<Json<HospitalsResponse>, ApiError> {
    let hospitals = state.hospital_service.autocomplete(&query.q, query.limit).await?;
    Ok(Json(HospitalsResponse { hospitals }))
}
