use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use passbook::config::DEFAULT_PORT;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = passbook::initialize_state().await?;
    let port = state.config.port.unwrap_or(DEFAULT_PORT);

    let app = passbook::app(state).merge(passbook::telemetry::routes()?);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("cannot install ctrl-c handler");
    tracing::info!("shutdown signal received");
}
