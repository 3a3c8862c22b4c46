//! Binary crate for the weather HTTP server.
//!
//! Serves `GET /api/weather?location=...` and a small browser page that calls it.

use std::{
    net::{IpAddr, SocketAddr},
    process::ExitCode,
    sync::Arc,
};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use weather_core::{Config, WeatherLookup};

mod api;
#[cfg(test)]
mod testing;
mod web;

#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather HTTP API and web page")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing();

    let lookup = match Config::load().and_then(|config| WeatherLookup::from_config(&config)) {
        Ok(lookup) => Arc::new(lookup),
        Err(err) => {
            tracing::error!("Configuration Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let addr = SocketAddr::new(args.bind, args.port);
    match web::run(addr, lookup).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
