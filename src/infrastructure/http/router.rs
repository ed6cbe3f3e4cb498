use crate::infrastructure::http::controllers;
use crate::infrastructure::http::middleware::AppState;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/api/plans/:plan_id/procedures/:procedure_id/assignments",
            get(controllers::assignments::get_assignments)
                .put(controllers::assignments::assign_users),
        )
        .route("/api/users", get(controllers::users::list_users));

    Router::new()
        .route("/health", get(health_handler))
        .merge(api)
        // The picker front end is served from a different origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "OK"
}
