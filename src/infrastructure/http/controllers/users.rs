use axum::{extract::State, Json};

use crate::{
    domain::entities::User,
    infrastructure::http::middleware::{ApiResult, AppState},
};

// GET /api/users - List assignable users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}
