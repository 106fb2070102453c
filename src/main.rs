//! HTTP server for the quote engine.
//!
//! Reads `QUOTE_ENGINE_CONFIG` (rate configuration path) and
//! `QUOTE_ENGINE_ADDR` (listen address) from the environment, loading a
//! `.env` file first when present.

use std::env;

use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quote_engine::api::{AppState, create_router};
use quote_engine::config::ConfigLoader;

const DEFAULT_CONFIG_PATH: &str = "./config/rates.yaml";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config_path = env::var("QUOTE_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let addr = env::var("QUOTE_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into());

    let config = ConfigLoader::load(&config_path)?;
    info!(
        config = %config_path,
        policy = %config.pricing_policy(),
        customers = config.customer_names().count(),
        "Rate configuration ready"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Quote engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
