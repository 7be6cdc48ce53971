//! Language-model provider error types.

/// Failure conditions reported by a generation provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// HTTP/network error
    #[display("HTTP error: {_0}")]
    Http(String),
    /// Request exceeded the client timeout
    #[display("Request timed out: {_0}")]
    Timeout(String),
    /// Provider answered with a non-success status
    #[display("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },
    /// Response body could not be parsed
    #[display("Response parsing failed: {_0}")]
    ResponseParsing(String),
    /// Response parsed but carried no text
    #[display("Provider returned no text")]
    EmptyResponse,
    /// Outbound request could not be assembled
    #[display("Builder error: {_0}")]
    Builder(String),
}

impl ProviderErrorKind {
    /// HTTP status code reported by the provider, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderErrorKind::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    line: u32,
    file: &'static str,
}

impl ProviderError {
    /// Create a new provider error with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use lullaby_error::{ProviderError, ProviderErrorKind};
    ///
    /// let err = ProviderError::new(ProviderErrorKind::Api {
    ///     status: 503,
    ///     message: "overloaded".to_string(),
    /// });
    /// assert_eq!(err.kind().status(), Some(503));
    /// ```
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ProviderErrorKind {
        &self.kind
    }
}

impl From<ProviderErrorKind> for ProviderError {
    #[track_caller]
    fn from(kind: ProviderErrorKind) -> Self {
        Self::new(kind)
    }
}
