//! Principia server entry point.

use log::{error, info, warn};
use principia_core::{init_logging, ConnectionPool};
use principia_server::{build_router, AppState, ServerConfig, ServerError, ServerResult};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=server status=error error={err}");
            eprintln!("principia-server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ServerResult<()> {
    let config = ServerConfig::load()?;
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(ServerError::Config)?;
    for warning in &config.warnings {
        warn!("event=config_load module=server status=warn detail=\"{warning}\"");
    }

    let pool = ConnectionPool::open(&config.database, config.pool_size)?;
    let app = build_router(Arc::new(AppState::new(pool)));

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    info!(
        "event=server_start module=server status=ok addr={} require_tls={}",
        config.socket_addr(),
        config.database.require_tls
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=shutdown_signal module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
}
