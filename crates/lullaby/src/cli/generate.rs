//! `generate` command handler.

use lullaby_core::{Format, GenerationRequest};
use lullaby_server::LullabyConfig;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Handle the `generate` command: run one pipeline and print the result.
#[instrument(skip_all, fields(format = %format))]
pub async fn handle_generate_command(
    diary: String,
    mood: String,
    character: String,
    format: Format,
    show_stages: bool,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = LullabyConfig::load(config_path.as_deref())?;
    let pipeline = config.build_pipeline()?;

    let request = GenerationRequest::builder()
        .diary(diary)
        .mood(mood)
        .character(character)
        .format(format)
        .build()?;

    let execution = pipeline.execute(request).await?;
    info!(stages = execution.stages().len(), "Generation finished");

    if show_stages {
        for stage in execution.stages() {
            println!("=== {} ===", stage.stage());
            println!("{}\n", stage.response());
        }
    } else {
        println!("{}", execution.final_text());
    }

    Ok(())
}
