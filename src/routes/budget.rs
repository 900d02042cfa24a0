use actix_web::{web, HttpResponse};

use crate::errors::ApiError;
use crate::models::budget::BudgetRequest;
use crate::services::ai_service::TripPlanner;

/*
    /api/budget/estimate
*/
pub async fn estimate(
    input: web::Json<BudgetRequest>,
    planner: web::Data<TripPlanner>,
) -> Result<HttpResponse, ApiError> {
    let request = input.into_inner();
    if request.destination.trim().is_empty() {
        return Err(ApiError::BadRequest("Destination is required".to_string()));
    }
    if request.days == 0 {
        return Err(ApiError::BadRequest(
            "Trip must last at least one day".to_string(),
        ));
    }

    let estimation = planner.estimate_budget(&request).await;
    Ok(HttpResponse::Ok().json(estimation))
}
