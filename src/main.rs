use contrib_calendar::{
    AppState, ProxyConfig, WidgetConfig,
    config::resolve_port,
    github::http_client,
    router,
};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let port = resolve_port();
    let proxy = ProxyConfig::from_env();
    if proxy.github_token.is_none() {
        warn!("GITHUB_TOKEN is not set; the contributions endpoint will answer 500");
    }
    let widget = WidgetConfig::from_env(port);
    let state = AppState::new(proxy, widget, http_client()?);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
