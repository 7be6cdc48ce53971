//! Request validation error types.

/// Reasons a generation request body can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Body is not well-formed JSON
    #[display("Malformed request body: {_0}")]
    MalformedBody(String),
    /// A required field is absent
    #[display("Missing required field '{_0}'")]
    MissingField(String),
    /// A field is present but has the wrong type
    #[display("Invalid field: {_0}")]
    InvalidField(String),
    /// A required text field is empty or whitespace only
    #[display("Field '{_0}' must not be blank")]
    BlankField(String),
}

/// Validation error with location tracking.
///
/// Validation happens before any stage runs, so a request rejected here never
/// reaches the generation provider.
///
/// # Examples
///
/// ```
/// use lullaby_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::MissingField("diary".into()));
/// assert!(err.to_string().contains("diary"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    line: u32,
    file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    /// Returns true when the body could not be parsed as JSON at all.
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::MalformedBody(_))
    }
}

impl From<ValidationErrorKind> for ValidationError {
    #[track_caller]
    fn from(kind: ValidationErrorKind) -> Self {
        Self::new(kind)
    }
}
