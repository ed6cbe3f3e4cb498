pub mod plan_procedure_repository;
pub mod user_repository;
