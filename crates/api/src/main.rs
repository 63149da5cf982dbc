use axum::{routing::get, Router};
use prometheus::Registry;
use routemeter::{routes::health::health, PrometheusMetrics};
use routemeter_core::MetricsConfig;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

mod app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let config = MetricsConfig::from_env()?;
    let metrics = PrometheusMetrics::new(config, Registry::new())?
        .with_exposition_router(Router::new().route("/health", get(health)));

    let app = metrics.instrument(app::route_table()?);
    metrics.spawn_listener();

    let addr: SocketAddr = std::env::var("ROUTEMETER_APP_BIND")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    info!(%addr, metrics_path = %metrics.config().metrics_path, "starting api");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
