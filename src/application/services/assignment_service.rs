use crate::domain::entities::{
    dedup_user_ids, ensure_users_found, PlanProcedure, PlanProcedureKey, PlanProcedureUser,
};
use crate::domain::ports::{
    plan_procedure_repository::PlanProcedureRepository, user_repository::UserRepository,
};
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::infrastructure::observability::ASSIGNMENT_OUTCOMES_COUNTER;
use std::sync::Arc;

/// Service for assigning users to plan procedures
#[derive(Clone)]
pub struct AssignmentService {
    plan_procedure_repo: Arc<dyn PlanProcedureRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl AssignmentService {
    pub fn new(
        plan_procedure_repo: Arc<dyn PlanProcedureRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            plan_procedure_repo,
            user_repo,
        }
    }

    /// Replace the users assigned to a plan procedure with `user_ids`.
    ///
    /// All-or-nothing: ids are validated, the association and every user
    /// must exist, and only then is the whole set rewritten in a single
    /// transaction. Repeated ids collapse to one assignment. An empty list
    /// clears the association.
    pub async fn assign_users(
        &self,
        plan_id: i64,
        procedure_id: i64,
        user_ids: &[i64],
    ) -> ApiResult<()> {
        let result = self
            .assign_users_internal(plan_id, procedure_id, user_ids)
            .await;

        let outcome = match &result {
            Ok(()) => "success",
            Err(e) => e.kind().as_str(),
        };
        metrics::counter!(ASSIGNMENT_OUTCOMES_COUNTER, "outcome" => outcome).increment(1);

        result
    }

    async fn assign_users_internal(
        &self,
        plan_id: i64,
        procedure_id: i64,
        user_ids: &[i64],
    ) -> ApiResult<()> {
        // 1. Validate ids before touching the store
        let key = PlanProcedureKey::new(plan_id, procedure_id)?;

        // 2. Association must already exist
        let plan_procedure = self.require_plan_procedure(key).await?;

        // 3. Every requested user must exist
        let requested = dedup_user_ids(user_ids);
        let users = self
            .user_repo
            .get_users_by_ids(&requested)
            .await?;

        let found_ids: Vec<i64> = users.iter().map(|u| u.user_id).collect();
        if let Err(e) = ensure_users_found(&requested, &found_ids) {
            tracing::warn!("Rejected assignment for {}: {}", key, e);
            return Err(e.into());
        }

        // 4. Rebuild the full set in memory, one timestamp for the whole call
        let now = chrono::Utc::now().to_rfc3339();
        let records: Vec<PlanProcedureUser> = requested
            .iter()
            .map(|user_id| PlanProcedureUser::new(key, *user_id, &now))
            .collect();

        // 5. Single replace-all write
        self.plan_procedure_repo
            .replace_assigned_users(key, &records, &now)
            .await?;

        tracing::info!(
            "Assigned {} users to {} (previously {})",
            records.len(),
            key,
            plan_procedure.assigned_users.len()
        );

        Ok(())
    }

    /// Association with its current assignments, ordered by user id
    pub async fn get_plan_procedure(
        &self,
        plan_id: i64,
        procedure_id: i64,
    ) -> ApiResult<PlanProcedure> {
        let key = PlanProcedureKey::new(plan_id, procedure_id)?;
        self.require_plan_procedure(key).await
    }

    async fn require_plan_procedure(&self, key: PlanProcedureKey) -> ApiResult<PlanProcedure> {
        self.plan_procedure_repo
            .get_plan_procedure(key)
            .await?
            .ok_or_else(|| {
                tracing::warn!("No association for {}", key);
                ApiError::NotFound("association not found; add procedure to plan first".to_string())
            })
    }
}
