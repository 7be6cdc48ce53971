//! Lullaby - diary to bedtime story service.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, handle_generate_command, handle_serve_command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Commands::Serve { config, bind } => handle_serve_command(config, bind).await?,
        Commands::Generate {
            diary,
            mood,
            character,
            format,
            show_stages,
            config,
        } => {
            handle_generate_command(diary, mood, character, format.into(), show_stages, config)
                .await?
        }
    }

    Ok(())
}

/// Logs go to stderr so `generate` output stays clean on stdout.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
