//! Pipeline orchestration.
//!
//! This module provides the pipeline that turns one [`GenerationRequest`] into
//! a story or poem by running the analyze, draft and adjust stages in order,
//! recording each stage's output in the run's [`StageContext`].

use crate::{PipelineExecution, Stage, StageExecution, select};
use lullaby_core::{GenerationRequest, StageContext};
use lullaby_error::LullabyResult;
use lullaby_interface::GenerationClient;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Success text or a tagged failure.
pub type PipelineResult = LullabyResult<String>;

/// Runs the three-stage generation pipeline.
///
/// A pipeline holds only the shared client and model identifier, so one
/// instance serves any number of concurrent requests.
#[derive(Clone)]
pub struct Pipeline {
    client: Arc<dyn GenerationClient>,
    model: String,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("provider", &self.client.provider_name())
            .field("model", &self.model)
            .finish()
    }
}

impl Pipeline {
    /// Create a pipeline backed by `client`, using `model` for every stage.
    pub fn new(client: Arc<dyn GenerationClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Model identifier passed to every stage.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate the final text for `request`.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure; later stages do not run and no
    /// partial text is returned.
    pub async fn run(&self, request: GenerationRequest) -> PipelineResult {
        self.execute(request)
            .await
            .map(PipelineExecution::into_final_text)
    }

    /// Run every stage and return the full execution record.
    ///
    /// Stages run strictly one after another: draft reads the analysis and
    /// adjust reads the draft, so each waits for the previous output.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure; later stages do not run.
    #[instrument(
        skip_all,
        fields(
            format = %request.format(),
            model = %self.model,
            diary_len = request.diary().len()
        )
    )]
    pub async fn execute(&self, request: GenerationRequest) -> LullabyResult<PipelineExecution> {
        let format = *request.format();
        let stages = select(format, Arc::clone(&self.client), &self.model);
        let mut context = StageContext::new(request);
        let mut executions = Vec::with_capacity(3);

        info!(provider = self.client.provider_name(), "Starting pipeline run");

        executions.push(advance(&stages.analyze, &mut context, 0).await?);
        executions.push(advance(&stages.draft, &mut context, 1).await?);
        executions.push(advance(&stages.adjust, &mut context, 2).await?);

        info!(
            final_len = context.final_text().map(str::len).unwrap_or_default(),
            "Pipeline run completed"
        );

        Ok(PipelineExecution::new(
            format,
            self.model.clone(),
            executions,
            context,
        ))
    }
}

/// Run one stage and record its output in the slot it owns.
async fn advance(
    stage: &Stage,
    context: &mut StageContext,
    sequence_number: usize,
) -> LullabyResult<StageExecution> {
    let execution = stage.run(context, sequence_number).await?;
    context.record(stage.writes(), execution.response().as_str())?;
    debug!(
        stage = %stage.name(),
        slot = %stage.writes(),
        "Recorded stage output"
    );
    Ok(execution)
}
