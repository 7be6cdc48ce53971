//! Generation client contract.

use async_trait::async_trait;
use lullaby_error::ProviderError;
use std::sync::Arc;

/// A language-model capability: one prompt in, one text out.
///
/// Implementations perform a single round-trip per call. They own their
/// timeout and transport policy; callers never retry through this trait.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use lullaby_error::ProviderError;
/// use lullaby_interface::GenerationClient;
///
/// struct Shout;
///
/// #[async_trait]
/// impl GenerationClient for Shout {
///     async fn generate(&self, prompt: &str, _model: &str) -> Result<String, ProviderError> {
///         Ok(prompt.to_uppercase())
///     }
///
///     fn provider_name(&self) -> &'static str {
///         "shout"
///     }
/// }
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let text = rt.block_on(Shout.generate("hello", "any")).unwrap();
/// assert_eq!(text, "HELLO");
/// ```
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate text for `prompt` with the model identified by `model`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on transport failure, timeout, a
    /// non-success provider status, or a response without usable text.
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, ProviderError>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T> GenerationClient for Arc<T>
where
    T: GenerationClient + ?Sized,
{
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, ProviderError> {
        (**self).generate(prompt, model).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
