pub mod assignment_service;
pub mod user_service;

pub use assignment_service::*;
pub use user_service::*;
