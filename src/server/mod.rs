//! HTTP surface for the cooking assistant.
//!
//! Exposes `POST /api/query` and `GET /health` over axum.

pub mod params;
pub mod routes;

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::agent::Orchestrator;

pub use params::{ErrorDetail, HealthStatus, QueryRequest};
pub use routes::{ApiState, router};

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default bind port.
pub const DEFAULT_PORT: u16 = 8000;

/// Binds `host:port` and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(orchestrator: Arc<Orchestrator>, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "recipe assistant listening");

    serve_listener(listener, orchestrator, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down");
    })
    .await
}

/// Serves on an already-bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve_listener<F>(
    listener: TcpListener,
    orchestrator: Arc<Orchestrator>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(ApiState::new(orchestrator));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
