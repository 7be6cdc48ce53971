//! Stage and context slot names.

use serde::{Deserialize, Serialize};

/// The three pipeline stages, in execution order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StageName {
    /// Extract the dominant emotion and an event summary from the diary
    Analyze,
    /// Write the first story or poem
    Draft,
    /// Rewrite the draft to match the requested mood
    Adjust,
}

impl StageName {
    /// The context slot this stage writes.
    pub fn output_slot(&self) -> ContextSlot {
        match self {
            StageName::Analyze => ContextSlot::Analysis,
            StageName::Draft => ContextSlot::Draft,
            StageName::Adjust => ContextSlot::Final,
        }
    }
}

/// Keys of the per-run accumulator.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContextSlot {
    /// Output of [`StageName::Analyze`]
    Analysis,
    /// Output of [`StageName::Draft`]
    Draft,
    /// Output of [`StageName::Adjust`]
    Final,
}
