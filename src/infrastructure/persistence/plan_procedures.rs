use crate::domain::entities::{PlanProcedure, PlanProcedureKey, PlanProcedureUser};
use crate::domain::ports::plan_procedure_repository::PlanProcedureRepository;
use crate::infrastructure::http::middleware::error::{ApiError, ApiResult};
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::Row;

// Internal helpers
impl Database {
    async fn get_assigned_users_internal<'e, E>(
        &self,
        executor: E,
        key: PlanProcedureKey,
    ) -> ApiResult<Vec<PlanProcedureUser>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Any>,
    {
        let rows = sqlx::query(
            "SELECT plan_id, procedure_id, user_id, assigned_date, create_date, update_date
             FROM plan_procedure_users
             WHERE plan_id = ? AND procedure_id = ?
             ORDER BY user_id",
        )
        .bind(key.plan_id())
        .bind(key.procedure_id())
        .fetch_all(executor)
        .await?;

        let mut assigned = Vec::with_capacity(rows.len());
        for row in rows {
            assigned.push(PlanProcedureUser {
                plan_id: row.try_get("plan_id")?,
                procedure_id: row.try_get("procedure_id")?,
                user_id: row.try_get("user_id")?,
                assigned_date: row.try_get("assigned_date")?,
                create_date: row.try_get("create_date")?,
                update_date: row.try_get("update_date")?,
            });
        }

        Ok(assigned)
    }
}

#[async_trait]
impl PlanProcedureRepository for Database {
    async fn get_plan_procedure(&self, key: PlanProcedureKey) -> ApiResult<Option<PlanProcedure>> {
        let row = sqlx::query(
            "SELECT plan_id, procedure_id, create_date, update_date
             FROM plan_procedures
             WHERE plan_id = ? AND procedure_id = ?",
        )
        .bind(key.plan_id())
        .bind(key.procedure_id())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let assigned_users = self.get_assigned_users_internal(&self.pool, key).await?;

        Ok(Some(PlanProcedure {
            plan_id: row.try_get("plan_id")?,
            procedure_id: row.try_get("procedure_id")?,
            create_date: row.try_get("create_date")?,
            update_date: row.try_get("update_date")?,
            assigned_users,
        }))
    }

    /// Replace all assigned users atomically.
    /// Dropping the future before commit rolls the transaction back.
    async fn replace_assigned_users(
        &self,
        key: PlanProcedureKey,
        records: &[PlanProcedureUser],
        updated_at: &str,
    ) -> ApiResult<()> {
        let mut tx = self.pool.begin().await?;

        // Touching the parent row first takes the write lock, so concurrent
        // replaces for the same key serialize and the last commit wins.
        let touched = sqlx::query(
            "UPDATE plan_procedures SET update_date = ?
             WHERE plan_id = ? AND procedure_id = ?",
        )
        .bind(updated_at)
        .bind(key.plan_id())
        .bind(key.procedure_id())
        .execute(&mut *tx)
        .await?;

        if touched.rows_affected() == 0 {
            return Err(ApiError::NotFound(
                "association not found; add procedure to plan first".to_string(),
            ));
        }

        sqlx::query("DELETE FROM plan_procedure_users WHERE plan_id = ? AND procedure_id = ?")
            .bind(key.plan_id())
            .bind(key.procedure_id())
            .execute(&mut *tx)
            .await?;

        for record in records {
            sqlx::query(
                "INSERT INTO plan_procedure_users
                 (plan_id, procedure_id, user_id, assigned_date, create_date, update_date)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(record.plan_id)
            .bind(record.procedure_id)
            .bind(record.user_id)
            .bind(&record.assigned_date)
            .bind(&record.create_date)
            .bind(&record.update_date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!("Replaced assigned users for {}: {} users", key, records.len());
        Ok(())
    }
}
