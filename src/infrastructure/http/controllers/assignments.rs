use axum::{extract::State, http::StatusCode, Json};

use crate::{
    domain::entities::{AssignUsersRequest, PlanProcedure},
    infrastructure::http::middleware::{ApiJson, ApiPath, ApiResult, AppState},
};

// PUT /api/plans/:plan_id/procedures/:procedure_id/assignments - Replace assigned users
pub async fn assign_users(
    State(state): State<AppState>,
    ApiPath((plan_id, procedure_id)): ApiPath<(i64, i64)>,
    ApiJson(req): ApiJson<AssignUsersRequest>,
) -> ApiResult<StatusCode> {
    state
        .assignment_service
        .assign_users(plan_id, procedure_id, &req.user_ids)
        .await?;

    Ok(StatusCode::OK)
}

// GET /api/plans/:plan_id/procedures/:procedure_id/assignments - Current assignments
pub async fn get_assignments(
    State(state): State<AppState>,
    ApiPath((plan_id, procedure_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Json<PlanProcedure>> {
    let plan_procedure = state
        .assignment_service
        .get_plan_procedure(plan_id, procedure_id)
        .await?;

    Ok(Json(plan_procedure))
}
