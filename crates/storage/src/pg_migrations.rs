//! PostgreSQL schema for algae-history.

use sqlx::PgConnection;

/// Create the `history` table if it does not exist yet.
pub(crate) async fn run_pg_migrations(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS history (
            id BIGSERIAL PRIMARY KEY,
            analysis_date TIMESTAMP NOT NULL,
            file_name TEXT NOT NULL,
            total_cells BIGINT,
            density_cells_ml DOUBLE PRECISION
        )
        "#,
    )
    .execute(conn)
    .await?;
    Ok(())
}
