//! Pipeline error types.

/// Specific error conditions for pipeline bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PipelineErrorKind {
    /// A stage template read a context slot that no earlier stage wrote
    MissingContext {
        /// Stage whose prompt could not be built
        stage: String,
        /// Context slot that was empty
        slot: String,
    },
    /// A context slot was written twice in one run
    SlotAlreadyFilled(String),
}

impl std::fmt::Display for PipelineErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineErrorKind::MissingContext { stage, slot } => write!(
                f,
                "Stage '{}' requires context slot '{}' which has not been produced",
                stage, slot
            ),
            PipelineErrorKind::SlotAlreadyFilled(slot) => {
                write!(f, "Context slot '{}' has already been written", slot)
            }
        }
    }
}

/// Error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use lullaby_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::SlotAlreadyFilled("draft".into()));
/// assert!(format!("{}", err).contains("draft"));
/// ```
#[derive(Debug, Clone)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pipeline Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for PipelineError {}
