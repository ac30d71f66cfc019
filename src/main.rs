mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod routes;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use datasources::OpenWeatherMapClient;
use routes::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = Config::load(cli.config.clone())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let weather = OpenWeatherMapClient::new(config.openweathermap.clone());

    if let Some(Commands::Check { lat, lon }) = cli.command {
        return run_check(&weather, lat, lon).await;
    }

    let state = AppState {
        weather: Arc::new(weather),
    };
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_check(weather: &OpenWeatherMapClient, lat: f64, lon: f64) -> anyhow::Result<()> {
    match weather.test_connection(lat, lon).await {
        Ok(true) => {
            println!("OpenWeatherMap: OK");
            Ok(())
        }
        Ok(false) => {
            println!("OpenWeatherMap: FAILED (non-success status, check API key)");
            std::process::exit(1);
        }
        Err(e) => {
            println!("OpenWeatherMap: FAILED ({})", e);
            std::process::exit(1);
        }
    }
}
