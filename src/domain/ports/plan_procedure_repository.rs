use crate::domain::entities::{PlanProcedure, PlanProcedureKey, PlanProcedureUser};
use crate::infrastructure::http::middleware::error::ApiResult;
use async_trait::async_trait;

/// Repository for plan procedure associations and their assigned users
#[async_trait]
pub trait PlanProcedureRepository: Send + Sync {
    /// Load the association for `key` together with its assigned users
    async fn get_plan_procedure(&self, key: PlanProcedureKey) -> ApiResult<Option<PlanProcedure>>;

    /// Replace every assignment record of the association in one transaction.
    /// Fails with `NotFound` if the association disappeared before the write.
    async fn replace_assigned_users(
        &self,
        key: PlanProcedureKey,
        records: &[PlanProcedureUser],
        updated_at: &str,
    ) -> ApiResult<()>;
}
