use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Composite key of a plan procedure association.
///
/// Both ids are validated to be positive on construction, so holding a key
/// means the ids are safe to send to the store. The fields are private, so
/// `new` is the only way to get one:
///
/// ```compile_fail
/// let key = planroster::domain::entities::PlanProcedureKey {
///     plan_id: 0,
///     procedure_id: 1,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanProcedureKey {
    plan_id: i64,
    procedure_id: i64,
}

impl PlanProcedureKey {
    pub fn new(plan_id: i64, procedure_id: i64) -> DomainResult<Self> {
        if plan_id < 1 {
            return Err(DomainError::ValidationError("invalid plan id".to_string()));
        }
        if procedure_id < 1 {
            return Err(DomainError::ValidationError(
                "invalid procedure id".to_string(),
            ));
        }

        Ok(Self {
            plan_id,
            procedure_id,
        })
    }

    pub fn plan_id(&self) -> i64 {
        self.plan_id
    }

    pub fn procedure_id(&self) -> i64 {
        self.procedure_id
    }
}

impl std::fmt::Display for PlanProcedureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "plan {} / procedure {}", self.plan_id, self.procedure_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanProcedure {
    pub plan_id: i64,
    pub procedure_id: i64,
    pub create_date: String,
    pub update_date: String,
    pub assigned_users: Vec<PlanProcedureUser>,
}

impl PlanProcedure {
    pub fn assigned_user_ids(&self) -> Vec<i64> {
        self.assigned_users.iter().map(|u| u.user_id).collect()
    }
}

/// One user's assignment to a plan procedure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanProcedureUser {
    pub plan_id: i64,
    pub procedure_id: i64,
    pub user_id: i64,
    pub assigned_date: String,
    pub create_date: String,
    pub update_date: String,
}

impl PlanProcedureUser {
    /// New assignment record with all three dates set to `now`
    pub fn new(key: PlanProcedureKey, user_id: i64, now: &str) -> Self {
        Self {
            plan_id: key.plan_id(),
            procedure_id: key.procedure_id(),
            user_id,
            assigned_date: now.to_string(),
            create_date: now.to_string(),
            update_date: now.to_string(),
        }
    }
}

// Request/Response models

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignUsersRequest {
    pub user_ids: Vec<i64>,
}

/// Collapse repeated ids, keeping the first occurrence order.
pub fn dedup_user_ids(user_ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(user_ids.len());
    user_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Fails with `NotFound` naming every requested id that has no match in
/// `found_ids`, in request order.
pub fn ensure_users_found(requested: &[i64], found_ids: &[i64]) -> DomainResult<()> {
    let found: HashSet<i64> = found_ids.iter().copied().collect();
    let missing: Vec<String> = requested
        .iter()
        .filter(|id| !found.contains(*id))
        .map(|id| id.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::NotFound(format!(
            "user ids not found: {}",
            missing.join(", ")
        )))
    }
}
