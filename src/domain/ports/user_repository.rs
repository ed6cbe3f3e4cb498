use crate::domain::entities::User;
use crate::infrastructure::http::middleware::error::ApiResult;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Only existing users are returned; unknown ids are silently skipped.
    async fn get_users_by_ids(&self, ids: &[i64]) -> ApiResult<Vec<User>>;
    async fn list_users(&self) -> ApiResult<Vec<User>>;
}
