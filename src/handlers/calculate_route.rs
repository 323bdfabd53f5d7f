use crate::{
    error::AppError,
    models::{CalculateRouteRequest, CalculateRouteResponse},
    pipeline::{CostEstimationPipeline, EstimateRequest},
};
use axum::{extract::State, Json};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<CostEstimationPipeline>,
}

/// Handle `POST /calculate-route/`
pub async fn handle_calculate_route(
    State(state): State<AppState>,
    Json(request): Json<CalculateRouteRequest>,
) -> Result<Json<CalculateRouteResponse>, AppError> {
    tracing::info!(
        start = %request.start_location,
        end = %request.end_location,
        profile = %request.profile,
        fuel_type = %request.fuel_type,
        "Handling calculate-route request"
    );

    let estimate = state
        .pipeline
        .estimate(&EstimateRequest::from(&request))
        .await?;

    Ok(Json(CalculateRouteResponse::from_estimate(
        estimate,
        request.coordinate_order,
    )))
}
