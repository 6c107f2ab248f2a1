use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;
use veil_dns_api::{create_router, AppState};

/// Serve the resolution API until the shutdown token fires, then drain.
pub async fn start_web_server(
    bind_addr: SocketAddr,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    info!(bind_address = %bind_addr, "Starting resolution API server");

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Resolution API server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            info!("API server: shutting down");
        })
        .await?;

    Ok(())
}
