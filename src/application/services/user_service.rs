use crate::{
    domain::entities::User, domain::ports::user_repository::UserRepository,
    infrastructure::http::middleware::error::ApiResult,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Every user that can be picked for an assignment, ordered by id
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.user_repo.list_users().await
    }
}
