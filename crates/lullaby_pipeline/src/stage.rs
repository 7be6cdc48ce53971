//! A single LLM-backed transformation step.

use crate::{StageExecution, cleanup};
use lullaby_core::{ContextSlot, Format, StageContext, StageName};
use lullaby_error::{GenerationError, LullabyResult, PipelineError};
use lullaby_interface::GenerationClient;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Builds a stage prompt from its persona and the accumulated context.
///
/// Templates are pure: the same persona, format and context always give the
/// same prompt. The format is the one the stage was selected for, not the
/// request's.
pub type PromptTemplate =
    fn(&StagePersona, Format, &StageContext) -> Result<String, PipelineError>;

/// Who the model should be for a stage, and what it is trying to achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagePersona {
    /// Role description the prompt opens with
    role: &'static str,
    /// Goal the stage pursues
    goal: &'static str,
}

impl StagePersona {
    /// Create a persona.
    pub const fn new(role: &'static str, goal: &'static str) -> Self {
        Self { role, goal }
    }

    /// Role description the prompt opens with.
    pub fn role(&self) -> &'static str {
        self.role
    }

    /// Goal the stage pursues.
    pub fn goal(&self) -> &'static str {
        self.goal
    }
}

/// One immutable step of the pipeline.
///
/// A stage holds no request data. It reads the context slots listed in
/// [`Stage::reads`] and produces the text for [`Stage::writes`]; recording
/// that text is the pipeline's job.
#[derive(Clone)]
pub struct Stage {
    name: StageName,
    format: Format,
    persona: StagePersona,
    template: PromptTemplate,
    reads: &'static [ContextSlot],
    client: Arc<dyn GenerationClient>,
    model: String,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name)
            .field("format", &self.format)
            .field("persona", &self.persona)
            .field("reads", &self.reads)
            .field("provider", &self.client.provider_name())
            .field("model", &self.model)
            .finish()
    }
}

impl Stage {
    /// Create a stage.
    pub fn new(
        name: StageName,
        format: Format,
        persona: StagePersona,
        template: PromptTemplate,
        reads: &'static [ContextSlot],
        client: Arc<dyn GenerationClient>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name,
            format,
            persona,
            template,
            reads,
            client,
            model: model.into(),
        }
    }

    /// Stage name, used to tag failures.
    pub fn name(&self) -> StageName {
        self.name
    }

    /// Format the stage was selected for.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Persona the prompt is written for.
    pub fn persona(&self) -> &StagePersona {
        &self.persona
    }

    /// Role description, shorthand for `persona().role()`.
    pub fn role(&self) -> &'static str {
        self.persona.role
    }

    /// Context slots the template reads.
    pub fn reads(&self) -> &'static [ContextSlot] {
        self.reads
    }

    /// Context slot this stage's output goes into.
    pub fn writes(&self) -> ContextSlot {
        self.name.output_slot()
    }

    /// Model identifier passed to the generation client.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build this stage's prompt for `context`.
    ///
    /// # Errors
    ///
    /// Fails with a missing-context error when a slot in [`Stage::reads`] is empty.
    pub fn prompt(&self, context: &StageContext) -> Result<String, PipelineError> {
        for slot in self.reads {
            context.require(self.name, *slot)?;
        }
        (self.template)(&self.persona, self.format, context)
    }

    /// Run the stage and return its cleaned-up output text.
    ///
    /// # Errors
    ///
    /// Provider failures come back as a [`GenerationError`] tagged with this
    /// stage's name. Nothing is retried.
    pub async fn execute(&self, context: &StageContext) -> LullabyResult<String> {
        self.run(context, 0)
            .await
            .map(|execution| execution.into_response())
    }

    /// Run the stage, keeping the prompt alongside the output.
    #[instrument(skip_all, fields(stage = %self.name, model = %self.model))]
    pub(crate) async fn run(
        &self,
        context: &StageContext,
        sequence_number: usize,
    ) -> LullabyResult<StageExecution> {
        let prompt = self.prompt(context)?;
        debug!(prompt_len = prompt.len(), "Built stage prompt");

        let raw = self
            .client
            .generate(&prompt, &self.model)
            .await
            .map_err(|e| {
                error!(
                    stage = %self.name,
                    provider = self.client.provider_name(),
                    error = %e,
                    "Stage generation failed"
                );
                GenerationError::new(self.name.to_string(), e)
            })?;

        let response = cleanup::strip_editorial_wrapping(&raw);
        debug!(
            raw_len = raw.len(),
            response_len = response.len(),
            "Stage completed"
        );

        Ok(StageExecution::new(
            self.name,
            prompt,
            response,
            sequence_number,
        ))
    }
}
