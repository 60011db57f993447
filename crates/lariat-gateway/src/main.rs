use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use lariat_gateway::{App, AppState};
use lariat_storage::SqliteStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gateway", about = "lariat URL shortener HTTP gateway")]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "LARIAT_LISTEN_ADDR", default_value = "127.0.0.1:4001")]
    listen_addr: String,

    /// SQLite database URL.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:server.db")]
    database_url: String,

    /// Public base URL used when rendering full short links.
    #[arg(long, env = "LARIAT_BASE_URL", default_value = "http://127.0.0.1:4001")]
    base_url: String,

    /// Seconds between sweeps of expired links. Must be at least 1:
    /// `tokio::time::interval` panics on a zero period.
    #[arg(
        long,
        env = "LARIAT_SWEEP_INTERVAL_SECS",
        default_value_t = 3600,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    sweep_interval_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = SqliteStore::connect(&cli.database_url).await?;
    // Schema init failures are fatal: the gateway must not serve traffic
    // against tables it could not create.
    store.init_schema().await?;
    info!(database_url = %cli.database_url, "store initialized");

    let state = AppState::new(Arc::new(store), cli.base_url);

    // Background sweep of expired links. Best effort, never blocks the
    // request path.
    let sweeper = state.links.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(cli.sweep_interval_secs));
        loop {
            ticker.tick().await;
            if let Err(err) = sweeper.sweep().await {
                warn!(error = %err, "sweep failed");
            }
        }
    });

    let listener = tokio::net::TcpListener::bind(&cli.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "starting gateway server");
    axum::serve(listener, App::router(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_interval_must_be_positive() {
        assert!(Cli::try_parse_from(["gateway", "--sweep-interval-secs", "0"]).is_err());
        let cli = Cli::try_parse_from(["gateway", "--sweep-interval-secs", "1"]).unwrap();
        assert_eq!(cli.sweep_interval_secs, 1);
    }
}
