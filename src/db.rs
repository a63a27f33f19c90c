//! Connection pool, database bootstrap and schema migrations.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Versioned SQL scripts under `migrations/`, embedded at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const MAX_CONNECTIONS: u32 = 5;

/// Open the process-wide pool. The caller owns it and closes it on shutdown.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await?;
    tracing::info!(max_connections = MAX_CONNECTIONS, "database pool ready");
    Ok(pool)
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// `postgres` maintenance database to run CREATE DATABASE. Call before [`connect`].
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    let (admin_url, db_name) = split_db_name(database_url)
        .ok_or_else(|| sqlx::Error::Configuration("DATABASE_URL has no database path".into()))?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)?;
    let mut conn = opts.connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Apply all pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!(version = ?current_version(pool).await.ok().flatten(), "migrations applied");
    Ok(())
}

/// Revert every applied migration.
pub async fn revert_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.undo(pool, 0).await?;
    tracing::info!(version = ?current_version(pool).await.ok().flatten(), "migrations reverted");
    Ok(())
}

/// Highest successfully applied migration version, or `None` if nothing has been applied yet.
pub async fn current_version(pool: &PgPool) -> Result<Option<i64>, sqlx::Error> {
    let (has_table,): (bool,) = sqlx::query_as("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
        .fetch_one(pool)
        .await?;
    if !has_table {
        return Ok(None);
    }
    let (version,): (Option<i64>,) = sqlx::query_as("SELECT MAX(version) FROM _sqlx_migrations WHERE success")
        .fetch_one(pool)
        .await?;
    Ok(version)
}

/// Split a connection URL into (url of the `postgres` database, target database name).
fn split_db_name(url: &str) -> Option<(String, String)> {
    let scheme_end = url.find("://")? + 3;
    let path_start = scheme_end + url.get(scheme_end..)?.find('/')? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, q)) => (name, Some(q)),
        None => (path_and_query, None),
    };
    let base = url.get(..path_start)?;
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Some((admin_url, db_name.trim().to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
