//! Integration tests for the infrastructure components
//!
//! These tests verify that PostgreSQL is reachable and that the embedded
//! schema applies cleanly. They need a running database, so they are
//! ignored by default: `DATABASE_URL=... cargo test -- --ignored`.

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    run_migrations(&pool).await?;

    let row = sqlx::query(
        "SELECT COUNT(*) AS table_count FROM information_schema.tables \
         WHERE table_name IN ('users', 'spots', 'comments')",
    )
    .fetch_one(&pool)
    .await?;

    let tables: i64 = row.get("table_count");
    assert_eq!(tables, 3, "schema migration did not create all tables");

    Ok(())
}
