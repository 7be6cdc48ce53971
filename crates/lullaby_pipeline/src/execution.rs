//! Records of completed pipeline runs.

use derive_getters::Getters;
use lullaby_core::{Format, StageContext, StageName};
use serde::Serialize;

/// Execution result for a single stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct StageExecution {
    /// Which stage ran.
    stage: StageName,

    /// The prompt that was sent to the model.
    prompt: String,

    /// The cleaned-up text the model returned.
    response: String,

    /// Position in the execution sequence (0-indexed).
    sequence_number: usize,
}

impl StageExecution {
    pub(crate) fn new(
        stage: StageName,
        prompt: String,
        response: String,
        sequence_number: usize,
    ) -> Self {
        Self {
            stage,
            prompt,
            response,
            sequence_number,
        }
    }

    /// Consume the record, keeping only the output text.
    pub fn into_response(self) -> String {
        self.response
    }
}

/// Complete execution result for one request.
///
/// The final text always comes from the context's `final` slot, which only
/// the adjust stage writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct PipelineExecution {
    /// Format the stages were selected for.
    format: Format,

    /// Model identifier every stage used.
    model: String,

    /// Ordered stage executions.
    stages: Vec<StageExecution>,

    /// Context as it stood after the last stage.
    context: StageContext,
}

impl PipelineExecution {
    pub(crate) fn new(
        format: Format,
        model: String,
        stages: Vec<StageExecution>,
        context: StageContext,
    ) -> Self {
        Self {
            format,
            model,
            stages,
            context,
        }
    }

    /// The adjusted text returned to the caller.
    pub fn final_text(&self) -> &str {
        self.context.final_text().unwrap_or_default()
    }

    /// Consume the record, keeping only the final text.
    pub fn into_final_text(self) -> String {
        self.context.into_final_text().unwrap_or_default()
    }

    /// The execution record for `stage`, if it ran.
    pub fn stage(&self, stage: StageName) -> Option<&StageExecution> {
        self.stages.iter().find(|execution| execution.stage == stage)
    }
}
