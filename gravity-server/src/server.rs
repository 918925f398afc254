use crate::{Relay, RelayConfig, SignalingService, ws_handler};
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Starts the relay actor and returns the service connection handlers use,
/// plus the relay task. The relay stops once the service and all its clones
/// are dropped.
pub fn spawn_relay(config: &RelayConfig) -> (SignalingService, JoinHandle<()>) {
    let (relay_tx, relay_rx) = mpsc::channel(config.command_buffer);
    let service = SignalingService::new(relay_tx);

    let relay = Relay::new(relay_rx, service.sinks());
    let task = tokio::spawn(relay.run());

    (service, task)
}

/// `/ws` upgrades to the signaling channel; everything else is served from
/// the static directory when one is configured.
pub fn router(service: SignalingService, config: &RelayConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new().route("/ws", get(ws_handler));

    if let Some(dir) = &config.static_dir {
        info!("Serving static files from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Runs the relay on an already bound listener until the server stops.
pub async fn serve_on(listener: TcpListener, config: RelayConfig) -> Result<()> {
    let (service, _relay) = spawn_relay(&config);
    let app = router(service, &config);

    info!(
        "Signaling relay listening on {}",
        listener.local_addr().context("listener has no local address")?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("relay server failed")
}

pub async fn serve(config: RelayConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    serve_on(listener, config).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Cannot listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
