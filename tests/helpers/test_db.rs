use planroster::infrastructure::persistence::Database;
use sqlx::Row;

const SEED_DATE: &str = "2024-01-01T00:00:00+00:00";

pub async fn setup_test_db() -> Database {
    // Unique file per test so tests can run in parallel
    let path = std::env::temp_dir().join(format!("planroster_test_{}.db", uuid::Uuid::new_v4()));
    let db_url = format!("sqlite://{}?mode=rwc", path.display());

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn create_test_user(db: &Database, user_id: i64, name: &str) {
    sqlx::query("INSERT INTO users (user_id, name, create_date, update_date) VALUES (?, ?, ?, ?)")
        .bind(user_id)
        .bind(name)
        .bind(SEED_DATE)
        .bind(SEED_DATE)
        .execute(db.pool())
        .await
        .expect("Failed to create user");
}

pub async fn create_test_users(db: &Database, user_ids: &[i64]) {
    for user_id in user_ids {
        create_test_user(db, *user_id, &format!("Test User {}", user_id)).await;
    }
}

/// Creates the plan, the procedure and the association between them.
pub async fn create_test_plan_procedure(db: &Database, plan_id: i64, procedure_id: i64) {
    let pool = db.pool();

    sqlx::query("INSERT OR IGNORE INTO plans (plan_id, create_date, update_date) VALUES (?, ?, ?)")
        .bind(plan_id)
        .bind(SEED_DATE)
        .bind(SEED_DATE)
        .execute(pool)
        .await
        .expect("Failed to create plan");

    sqlx::query("INSERT OR IGNORE INTO procedures (procedure_id, procedure_title) VALUES (?, ?)")
        .bind(procedure_id)
        .bind("Test Procedure")
        .execute(pool)
        .await
        .expect("Failed to create procedure");

    sqlx::query(
        "INSERT INTO plan_procedures (plan_id, procedure_id, create_date, update_date)
         VALUES (?, ?, ?, ?)",
    )
    .bind(plan_id)
    .bind(procedure_id)
    .bind(SEED_DATE)
    .bind(SEED_DATE)
    .execute(pool)
    .await
    .expect("Failed to create plan procedure");
}

/// Pre-existing assignment, written directly so tests can observe replacement.
pub async fn create_test_assignment(db: &Database, plan_id: i64, procedure_id: i64, user_id: i64) {
    sqlx::query(
        "INSERT INTO plan_procedure_users
         (plan_id, procedure_id, user_id, assigned_date, create_date, update_date)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(plan_id)
    .bind(procedure_id)
    .bind(user_id)
    .bind(SEED_DATE)
    .bind(SEED_DATE)
    .bind(SEED_DATE)
    .execute(db.pool())
    .await
    .expect("Failed to create assignment");
}

pub async fn assigned_user_ids(db: &Database, plan_id: i64, procedure_id: i64) -> Vec<i64> {
    let rows = sqlx::query(
        "SELECT user_id FROM plan_procedure_users
         WHERE plan_id = ? AND procedure_id = ?
         ORDER BY user_id",
    )
    .bind(plan_id)
    .bind(procedure_id)
    .fetch_all(db.pool())
    .await
    .expect("Failed to read assignments");

    rows.iter()
        .map(|row| row.try_get::<i64, _>("user_id").expect("user_id column"))
        .collect()
}

pub async fn count_assignments(db: &Database) -> i64 {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM plan_procedure_users")
        .fetch_one(db.pool())
        .await
        .expect("Failed to count assignments");
    row.try_get("count").expect("count column")
}
