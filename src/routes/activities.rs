use actix_web::{web, HttpResponse};

use crate::errors::ApiError;
use crate::models::activity::{PlanBRequest, PlanBResponse};
use crate::services::ai_service::TripPlanner;

/*
    /api/activities/plan-b
*/
pub async fn plan_b(
    input: web::Json<PlanBRequest>,
    planner: web::Data<TripPlanner>,
) -> Result<HttpResponse, ApiError> {
    let PlanBRequest { activity, reason } = input.into_inner();
    if reason.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Activity and reason are required".to_string(),
        ));
    }

    let suggestions = planner.plan_b_suggestions(&activity, reason.trim()).await;
    Ok(HttpResponse::Ok().json(PlanBResponse { suggestions }))
}
