use anyhow::Context;
use sqlx::MySqlPool;

const SCHEMA: &str = include_str!("../../schema/mysql.sql");

/// Creates the `member`, `friendship` and `friendship_outbox` tables when
/// they are missing. Every statement is `CREATE TABLE IF NOT EXISTS`.
pub async fn ensure_schema(pool: &MySqlPool) -> anyhow::Result<()> {
    for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("apply schema statement: {statement}"))?;
    }
    tracing::info!("mysql schema ensured");
    Ok(())
}
