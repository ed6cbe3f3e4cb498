pub mod error;
pub mod extract;

pub use error::*;
pub use extract::*;

use crate::application::services::{AssignmentService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub assignment_service: AssignmentService,
    pub user_service: UserService,
}
