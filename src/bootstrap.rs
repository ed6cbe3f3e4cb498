use crate::application::services::{AssignmentService, UserService};
use crate::domain::ports::plan_procedure_repository::PlanProcedureRepository;
use crate::domain::ports::user_repository::UserRepository;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::Database;
use std::sync::Arc;

pub fn build_app_state(db: Database) -> AppState {
    let plan_procedure_repo = Arc::new(db.clone()) as Arc<dyn PlanProcedureRepository>;
    let user_repo = Arc::new(db) as Arc<dyn UserRepository>;

    let assignment_service = AssignmentService::new(plan_procedure_repo, user_repo.clone());
    let user_service = UserService::new(user_repo);
    tracing::info!("Assignment and user services initialized");

    AppState {
        assignment_service,
        user_service,
    }
}
