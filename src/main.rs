// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use tokio::sync::{mpsc, watch};
use tower_http::trace::TraceLayer;

use crate::application::radar_service::RadarService;
use crate::infrastructure::ais_stream;
use crate::infrastructure::config::{default_vessel_bbox, load_radar_config};
use crate::infrastructure::opensky::OpenSkyClient;
use crate::infrastructure::vesselfinder::VesselFinderClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{aircraft_snapshot, health_check, list_vessels};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_radar_config()?;

    // Create the feed client (infrastructure layer)
    let feed = Arc::new(OpenSkyClient::new(config.opensky.base_url.clone()));

    // Create services (application layer)
    let radar_service = RadarService::new(feed);

    let vessel_bbox = config
        .vesselfinder
        .as_ref()
        .map(|vf| vf.bbox)
        .unwrap_or_else(default_vessel_bbox);
    let vessel_client = config
        .vesselfinder
        .map(|vf| VesselFinderClient::new(vf.base_url, vf.api_key));

    // Background AIS listener: independent task, hand-off via channel only.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    if let Some(ais) = config.ais {
        let (ais_tx, mut ais_rx) = mpsc::channel(256);
        tokio::spawn(ais_stream::run(ais, ais_tx, shutdown_rx));
        tokio::spawn(async move {
            while let Some(envelope) = ais_rx.recv().await {
                tracing::debug!(message_type = %envelope.message_type, "AIS position report queued");
            }
        });
    }

    // Create application state
    let state = Arc::new(AppState {
        radar_service,
        vessel_client,
        vessel_bbox,
        bbox_presets: config.bbox,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/aircraft", get(aircraft_snapshot))
        .route("/vessels", get(list_vessels))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = "0.0.0.0:8080".parse()?;
    tracing::info!("starting approach-radar service on {addr}");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    Ok(())
}
