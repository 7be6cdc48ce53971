//! Stage-tagged generation failures.

use crate::ProviderError;

/// A provider failure attributed to the pipeline stage that issued the call.
///
/// # Examples
///
/// ```
/// use lullaby_error::{GenerationError, ProviderError, ProviderErrorKind};
///
/// let err = GenerationError::new("draft", ProviderError::new(ProviderErrorKind::EmptyResponse));
/// assert_eq!(err.stage(), "draft");
/// assert!(err.to_string().contains("'draft'"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error in stage '{}': {} at line {} in {}", stage, source, line, file)]
pub struct GenerationError {
    stage: String,
    source: ProviderError,
    line: u32,
    file: &'static str,
}

impl GenerationError {
    /// Tag a provider error with the failing stage.
    #[track_caller]
    pub fn new(stage: impl Into<String>, source: ProviderError) -> Self {
        let location = std::panic::Location::caller();
        Self {
            stage: stage.into(),
            source,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Name of the stage whose provider call failed.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// The underlying provider error.
    pub fn provider_error(&self) -> &ProviderError {
        &self.source
    }
}
