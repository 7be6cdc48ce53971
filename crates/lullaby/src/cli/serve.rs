//! `serve` command handler.

use lullaby_server::LullabyConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Handle the `serve` command.
#[instrument(skip_all)]
pub async fn handle_serve_command(
    config_path: Option<PathBuf>,
    bind: Option<SocketAddr>,
) -> anyhow::Result<()> {
    let mut config = LullabyConfig::load(config_path.as_deref())?;
    if let Some(bind) = bind {
        config = config.with_bind(bind);
    }
    info!(?config, "Configuration loaded");

    lullaby_server::serve(config).await?;
    Ok(())
}
