pub mod assignments;
pub mod users;
