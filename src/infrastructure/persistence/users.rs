use crate::domain::entities::User;
use crate::domain::ports::user_repository::UserRepository;
use crate::infrastructure::http::middleware::error::ApiResult;
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::Row;

// SQLite caps bound parameters per statement
const MAX_IN_CLAUSE_IDS: usize = 500;

fn user_from_row(row: &AnyRow) -> Result<User, sqlx::Error> {
    Ok(User {
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
    })
}

#[async_trait]
impl UserRepository for Database {
    async fn get_users_by_ids(&self, ids: &[i64]) -> ApiResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut users = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IN_CLAUSE_IDS) {
            let placeholders = chunk.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
            let query_str = format!(
                "SELECT user_id, name
                 FROM users
                 WHERE user_id IN ({})",
                placeholders
            );

            let mut query = sqlx::query(&query_str);
            for id in chunk {
                query = query.bind(*id);
            }

            let rows = query.fetch_all(&self.pool).await?;
            for row in &rows {
                users.push(user_from_row(row)?);
            }
        }

        users.sort_by_key(|u| u.user_id);
        Ok(users)
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        let rows = sqlx::query("SELECT user_id, name FROM users ORDER BY user_id")
            .fetch_all(&self.pool)
            .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in &rows {
            users.push(user_from_row(row)?);
        }

        Ok(users)
    }
}
