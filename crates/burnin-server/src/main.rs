//! burnin server
//!
//! Synthetic workload endpoints for runtime benchmarking:
//! - /health, /cpu, /io, /json, /stream (instrumented)
//! - /metrics (Prometheus text format)
//! - listen port from `PORT` (default 8000)

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use burnin_core::error::{BurninError, Result};
use burnin_server::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.client_code().as_str(), error = %e, "burnin-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    let listen = cfg.listen_addr();
    let w = &cfg.workloads;
    tracing::info!(
        cpu_default_iterations = w.cpu.default_iterations,
        io_lines = w.io.lines,
        io_dir = %w.io.dir().display(),
        json_records = w.json.records,
        stream_chunks = w.stream.chunks,
        stream_delay_ms = w.stream.delay_ms,
        "workload parameters"
    );

    let state = AppState::new(cfg)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen.as_str())
        .await
        .map_err(|e| BurninError::Startup(format!("failed to bind {listen}: {e}")))?;
    tracing::info!(%listen, "burnin-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BurninError::Startup(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
