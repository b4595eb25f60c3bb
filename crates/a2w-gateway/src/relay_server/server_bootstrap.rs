//! Relay server bootstrap and listen-address handling.

use super::*;

/// Binds `config.bind` and serves the relay until ctrl-c.
pub async fn run_relay_server(config: RelayServerConfig) -> Result<()> {
    let bind_addr = normalize_bind_addr(&config.bind)
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid --addr '{}'", config.bind))?;

    let state = Arc::new(RelayServerState::new(config)?);
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind relay server on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound relay server address")?;

    info!(
        addr = %local_addr,
        templates = state.config().catalog.len(),
        max_message_bytes = state.config().limits.max_bytes,
        "relay server listening"
    );

    let app = build_relay_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .context("relay server exited unexpectedly")?;

    info!("relay server stopped");
    Ok(())
}

/// Expands the `:port` shorthand to `0.0.0.0:port`.
pub fn normalize_bind_addr(bind: &str) -> String {
    let trimmed = bind.trim();
    if trimmed.starts_with(':') {
        return format!("0.0.0.0{trimmed}");
    }
    trimmed.to_string()
}
