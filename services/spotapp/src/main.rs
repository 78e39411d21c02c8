use anyhow::Result;
use auth::{JwtConfig, JwtService};
use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use tracing::info;

use spotapp::{
    AppState,
    config::{LogFormat, ServerConfig},
    create_router,
};

#[tokio::main]
async fn main() -> Result<()> {
    let server_config = ServerConfig::from_env()?;

    // Initialize logging
    let subscriber = tracing_subscriber::fmt().with_env_filter(server_config.env_filter()?);
    match server_config.log_format {
        LogFormat::Full => subscriber.init(),
        LogFormat::Compact => subscriber.compact().init(),
    }

    info!("Starting Spotapp service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    if server_config.run_migrations {
        run_migrations(&pool).await?;
    }

    // Initialize JWT service
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(jwt_config)?;

    let app = create_router(AppState::new(pool, jwt_service));

    let addr = server_config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Spotapp service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
