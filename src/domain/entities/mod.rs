pub mod plan_procedure;
pub mod user;

pub use plan_procedure::*;
pub use user::*;
