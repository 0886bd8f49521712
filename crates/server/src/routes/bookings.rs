//! Direct booking HTTP handlers

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};

use careline_core::{AmbulanceRequest, HomeVisitRequest, PharmacyRequest};

use crate::AppState;
use crate::ai::ClaudeClient;
use crate::error::AppError;
use crate::services;

/// POST /services/ambulance - Dispatch the nearest available ambulance
pub async fn ambulance(
    State(state): State<AppState>,
    Json(body): Json<AmbulanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(city = %body.city, "Ambulance dispatch requested");
    let confirmation = services::ambulance::dispatch(&state.fleet, &body).await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

/// POST /services/pharmacy - Order medicines from a prescription image
pub async fn pharmacy(
    Extension(llm): Extension<Option<ClaudeClient>>,
    Json(body): Json<PharmacyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let client = llm.ok_or_else(|| {
        AppError::ServiceUnavailable(
            "prescription reading requires ANTHROPIC_API_KEY to be configured".to_string(),
        )
    })?;

    tracing::info!("Medicine order requested");
    let confirmation = services::pharmacy::order(&client, &body).await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

/// POST /services/home-visit - Book a professional home visit
pub async fn home_visit(
    Json(body): Json<HomeVisitRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(professional = %body.professional, "Home visit requested");
    let confirmation = services::home_visit::book(&body)?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}
