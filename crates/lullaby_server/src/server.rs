//! HTTP server lifecycle.

use crate::{AppState, LullabyConfig, create_router};
use lullaby_error::{LullabyResult, ServerError, ServerErrorKind};
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

/// Build the pipeline from `config`, bind, and serve until Ctrl+C or SIGTERM.
///
/// In-flight requests are allowed to finish before the function returns.
///
/// # Errors
///
/// Fails if the provider client cannot be built, the address cannot be
/// bound, or the serve loop stops with an I/O error.
#[instrument(skip_all, fields(bind = %config.bind()))]
pub async fn serve(config: LullabyConfig) -> LullabyResult<()> {
    let state = AppState::new(config.build_pipeline()?);
    let app = create_router(state, config.allowed_origins());

    let listener = TcpListener::bind(*config.bind()).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind(format!("{}: {}", config.bind(), e)))
    })?;

    info!(
        addr = %config.bind(),
        model = %config.model(),
        "Lullaby server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Io(e.to_string())))?;

    info!("Lullaby server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, starting graceful shutdown"),
    }
}
