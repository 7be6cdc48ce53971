//! Per-run accumulator threaded through the pipeline stages.

use crate::{ContextSlot, GenerationRequest, StageName};
use lullaby_error::{PipelineError, PipelineErrorKind};
use serde::Serialize;

/// The request plus every stage output produced so far.
///
/// Slots only ever go from empty to filled. A context belongs to exactly one
/// pipeline run and is dropped with it.
///
/// # Examples
///
/// ```
/// use lullaby_core::{ContextSlot, GenerationRequest, StageContext};
///
/// let request = GenerationRequest::builder()
///     .diary("Picnic in the park")
///     .mood("happy")
///     .character("Bear")
///     .build()
///     .unwrap();
/// let mut context = StageContext::new(request);
///
/// context.record(ContextSlot::Analysis, "joy; a picnic").unwrap();
/// assert_eq!(context.analysis(), Some("joy; a picnic"));
/// assert!(context.record(ContextSlot::Analysis, "again").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageContext {
    request: GenerationRequest,
    analysis: Option<String>,
    draft: Option<String>,
    #[serde(rename = "final")]
    final_text: Option<String>,
}

impl StageContext {
    /// Start an empty context for one request.
    pub fn new(request: GenerationRequest) -> Self {
        Self {
            request,
            analysis: None,
            draft: None,
            final_text: None,
        }
    }

    /// The request this run was started for.
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Output of the analyze stage, if it has run.
    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    /// Output of the draft stage, if it has run.
    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    /// Output of the adjust stage, if it has run.
    pub fn final_text(&self) -> Option<&str> {
        self.final_text.as_deref()
    }

    /// Read a slot by key.
    pub fn get(&self, slot: ContextSlot) -> Option<&str> {
        match slot {
            ContextSlot::Analysis => self.analysis(),
            ContextSlot::Draft => self.draft(),
            ContextSlot::Final => self.final_text(),
        }
    }

    /// Read a slot that `stage` depends on.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::MissingContext`] when the slot is still empty.
    #[track_caller]
    pub fn require(&self, stage: StageName, slot: ContextSlot) -> Result<&str, PipelineError> {
        self.get(slot).ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::MissingContext {
                stage: stage.to_string(),
                slot: slot.to_string(),
            })
        })
    }

    /// Fill a slot.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::SlotAlreadyFilled`] if the slot was written before.
    #[track_caller]
    pub fn record(
        &mut self,
        slot: ContextSlot,
        text: impl Into<String>,
    ) -> Result<(), PipelineError> {
        let target = match slot {
            ContextSlot::Analysis => &mut self.analysis,
            ContextSlot::Draft => &mut self.draft,
            ContextSlot::Final => &mut self.final_text,
        };
        if target.is_some() {
            return Err(PipelineError::new(PipelineErrorKind::SlotAlreadyFilled(
                slot.to_string(),
            )));
        }
        *target = Some(text.into());
        Ok(())
    }

    /// Consume the context, returning the final text if the run finished.
    pub fn into_final_text(self) -> Option<String> {
        self.final_text
    }
}
