//! Error types for the Lullaby story generation service.
//!
//! Every error struct records the file and line where it was created. The
//! umbrella [`LullabyError`] wraps one [`LullabyErrorKind`] per failure class:
//!
//! - [`ConfigError`]: startup only, the process must not serve
//! - [`ValidationError`]: per request, rejected before any stage runs
//! - [`GenerationError`]: per request, a provider failure tagged with its stage
//! - [`PipelineError`]: internal pipeline bookkeeping
//! - [`ServerError`]: binding or serving the HTTP listener

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod generation;
mod pipeline;
mod provider;
mod server;
mod validation;

pub use config::ConfigError;
pub use generation::GenerationError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum LullabyErrorKind {
    /// Configuration error
    Config(ConfigError),
    /// Request validation error
    Validation(ValidationError),
    /// Stage-tagged generation error
    Generation(GenerationError),
    /// Untagged provider error
    Provider(ProviderError),
    /// Pipeline bookkeeping error
    Pipeline(PipelineError),
    /// HTTP server error
    Server(ServerError),
}

impl std::fmt::Display for LullabyErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LullabyErrorKind::Config(e) => write!(f, "{}", e),
            LullabyErrorKind::Validation(e) => write!(f, "{}", e),
            LullabyErrorKind::Generation(e) => write!(f, "{}", e),
            LullabyErrorKind::Provider(e) => write!(f, "{}", e),
            LullabyErrorKind::Pipeline(e) => write!(f, "{}", e),
            LullabyErrorKind::Server(e) => write!(f, "{}", e),
        }
    }
}

/// Lullaby error with kind discrimination.
///
/// # Examples
///
/// ```
/// use lullaby_error::{LullabyError, LullabyErrorKind, ValidationErrorKind, ValidationError};
///
/// let err: LullabyError = ValidationError::new(ValidationErrorKind::MissingField("mood".into())).into();
/// assert!(matches!(err.kind(), LullabyErrorKind::Validation(_)));
/// assert_eq!(err.stage(), None);
/// ```
#[derive(Debug)]
pub struct LullabyError(Box<LullabyErrorKind>);

impl LullabyError {
    /// Create a new error from a kind.
    pub fn new(kind: LullabyErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LullabyErrorKind {
        &self.0
    }

    /// Name of the failing stage, for generation errors.
    pub fn stage(&self) -> Option<&str> {
        match self.kind() {
            LullabyErrorKind::Generation(e) => Some(e.stage()),
            _ => None,
        }
    }
}

impl std::fmt::Display for LullabyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lullaby Error: {}", self.0)
    }
}

impl std::error::Error for LullabyError {}

// Generic From implementation for any type that converts to LullabyErrorKind
impl<T> From<T> for LullabyError
where
    T: Into<LullabyErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Lullaby operations.
pub type LullabyResult<T> = std::result::Result<T, LullabyError>;
