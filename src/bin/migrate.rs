//! Apply or revert schema migrations against `DATABASE_URL`.

use clap::{Parser, ValueEnum};
use products_api::{db, Settings};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Direction {
    Up,
    Down,
}

#[derive(Parser, Debug)]
#[command(name = "migrate", about = "Run products database migrations")]
struct Args {
    /// Migrate up (apply pending) or down (revert all).
    #[arg(long, value_enum, default_value_t = Direction::Up)]
    direction: Direction,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("products_api=info,migrate=info")),
        )
        .init();

    let args = Args::parse();
    let settings = Settings::from_env()?;
    if matches!(args.direction, Direction::Up) {
        db::ensure_database_exists(&settings.database_url).await?;
    }
    let pool = db::connect(&settings.database_url).await?;

    match db::current_version(&pool).await? {
        Some(v) => tracing::info!(version = v, "current migration version"),
        None => tracing::info!("no migrations applied yet"),
    }

    match args.direction {
        Direction::Up => db::run_migrations(&pool).await?,
        Direction::Down => db::revert_migrations(&pool).await?,
    }

    pool.close().await;
    Ok(())
}
