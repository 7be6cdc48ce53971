//! Output format flag.

use serde::{Deserialize, Serialize};

/// Which kind of text the draft stage writes.
///
/// Anything other than the exact flag `"poem"` selects [`Format::Story`].
///
/// # Examples
///
/// ```
/// use lullaby_core::Format;
///
/// assert_eq!(Format::from_flag("poem"), Format::Poem);
/// assert_eq!(Format::from_flag("story"), Format::Story);
/// assert_eq!(Format::from_flag("limerick"), Format::Story);
/// assert_eq!(Format::Poem.noun(), "poem");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    /// Children's story with a beginning, middle and end
    #[default]
    Story,
    /// Short lyrical poem
    Poem,
}

impl Format {
    /// Resolve a request-level format flag, falling back to [`Format::Story`].
    pub fn from_flag(flag: &str) -> Self {
        flag.parse().unwrap_or_default()
    }

    /// The noun used for this format in prompts.
    pub fn noun(&self) -> &'static str {
        match self {
            Format::Story => "story",
            Format::Poem => "poem",
        }
    }
}
