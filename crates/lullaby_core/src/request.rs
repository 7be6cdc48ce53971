//! Generation request parsing and validation.

use crate::Format;
use derive_getters::Getters;
use lullaby_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

/// One diary-to-story request.
///
/// Immutable once built; every pipeline run owns exactly one.
///
/// # Examples
///
/// ```
/// use lullaby_core::{Format, GenerationRequest};
///
/// let request = GenerationRequest::from_json(
///     br#"{"diary": "It rained all day.", "mood": "quiet", "character": "Rabbit"}"#,
/// )
/// .unwrap();
///
/// assert_eq!(request.character(), "Rabbit");
/// assert_eq!(*request.format(), Format::Story);
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into), build_fn(validate = "Self::validate_fields"))]
pub struct GenerationRequest {
    /// The diary entry to turn into a story or poem
    diary: String,
    /// Mood the final text should convey
    mood: String,
    /// Name of the main character
    character: String,
    /// Requested output format
    #[builder(default)]
    format: Format,
}

/// Wire shape of a request body before validation.
#[derive(Debug, Deserialize)]
struct RawGenerationRequest {
    diary: String,
    mood: String,
    character: String,
    #[serde(default)]
    format: Option<String>,
}

impl GenerationRequest {
    /// Creates a new builder for GenerationRequest.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Parse and validate a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the body is not JSON, a required field
    /// is missing or mistyped, or a required field is blank.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let raw: RawGenerationRequest =
            serde_json::from_slice(body).map_err(classify_json_error)?;

        let request = Self {
            diary: raw.diary,
            mood: raw.mood,
            character: raw.character,
            format: raw
                .format
                .as_deref()
                .map(Format::from_flag)
                .unwrap_or_default(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Check that every required text field carries content.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("diary", &self.diary),
            ("mood", &self.mood),
            ("character", &self.character),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::new(ValidationErrorKind::BlankField(
                    field.to_string(),
                )));
            }
        }
        Ok(())
    }

    /// Returns a copy of this request with the format replaced.
    pub fn with_format(self, format: Format) -> Self {
        Self { format, ..self }
    }
}

impl GenerationRequestBuilder {
    fn validate_fields(&self) -> Result<(), String> {
        for (field, value) in [
            ("diary", &self.diary),
            ("mood", &self.mood),
            ("character", &self.character),
        ] {
            if value.as_ref().is_some_and(|v| v.trim().is_empty()) {
                return Err(format!("{} must not be blank", field));
            }
        }
        Ok(())
    }
}

fn classify_json_error(err: serde_json::Error) -> ValidationError {
    use serde_json::error::Category;

    let message = err.to_string();
    let kind = match err.classify() {
        Category::Data => match missing_field_name(&message) {
            Some(field) => ValidationErrorKind::MissingField(field.to_string()),
            None => ValidationErrorKind::InvalidField(message),
        },
        Category::Syntax | Category::Eof | Category::Io => {
            ValidationErrorKind::MalformedBody(message)
        }
    };
    ValidationError::new(kind)
}

// serde reports absent fields as "missing field `name` at line .. column .."
fn missing_field_name(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_diary_is_reported_by_name() {
        let err = GenerationRequest::from_json(br#"{"mood": "calm", "character": "Fox"}"#)
            .unwrap_err();
        assert_eq!(
            err.kind(),
            &ValidationErrorKind::MissingField("diary".to_string())
        );
    }

    #[test]
    fn test_wrong_type_is_invalid_field() {
        let err = GenerationRequest::from_json(
            br#"{"diary": 42, "mood": "calm", "character": "Fox"}"#,
        )
        .unwrap_err();
        assert!(matches!(err.kind(), ValidationErrorKind::InvalidField(_)));
    }

    #[test]
    fn test_broken_json_is_malformed() {
        let err = GenerationRequest::from_json(br#"{"diary": "#).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_blank_character_is_rejected() {
        let err = GenerationRequest::from_json(
            br#"{"diary": "Sunny", "mood": "happy", "character": "   "}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.kind(),
            &ValidationErrorKind::BlankField("character".to_string())
        );
    }

    #[test]
    fn test_format_flag_defaults_and_falls_back() {
        let poem = GenerationRequest::from_json(
            br#"{"diary": "d", "mood": "m", "character": "c", "format": "poem"}"#,
        )
        .unwrap();
        assert_eq!(*poem.format(), Format::Poem);

        let null = GenerationRequest::from_json(
            br#"{"diary": "d", "mood": "m", "character": "c", "format": null}"#,
        )
        .unwrap();
        assert_eq!(*null.format(), Format::Story);

        let unknown = GenerationRequest::from_json(
            br#"{"diary": "d", "mood": "m", "character": "c", "format": "haiku"}"#,
        )
        .unwrap();
        assert_eq!(*unknown.format(), Format::Story);
    }

    #[test]
    fn test_builder_rejects_blank_fields() {
        let result = GenerationRequest::builder()
            .diary("")
            .mood("happy")
            .character("Bear")
            .build();
        assert!(result.is_err());
    }
}
