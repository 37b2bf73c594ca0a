//! PostgreSQL pool setup, migrations, and the readiness ping
//!
//! Postgres is the only external dependency this service has, so the
//! whole module is: open a pool from the database section of the
//! config, apply migrations, and answer "is the database reachable"
//! for the readiness probe.

use crate::config::DatabaseConfig;
use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Open the connection pool described by `config`
///
/// Connections identify themselves to Postgres as "taskboard" and are
/// verified before being handed out, so a dropped connection is
/// replaced instead of surfacing as a query error.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.url)?.application_name("taskboard");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .test_before_acquire(true)
        .connect_with(options)
        .await?;

    info!(
        max = config.max_connections,
        min = config.min_connections,
        "Database pool ready"
    );

    Ok(pool)
}

/// Apply pending migrations from ./migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Cheap round trip used by the readiness probe
pub async fn ping(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database ping failed: {}", e);
            e.into()
        })
}
