//! Chooses the stage set for a request format.

use crate::prompts::{self, ADJUST_READS, ANALYST, ANALYZE_READS, DRAFT_READS, MOOD_EDITOR};
use crate::Stage;
use lullaby_core::{Format, StageName};
use lullaby_interface::GenerationClient;
use std::sync::Arc;

/// The three stages of one run, in execution order.
#[derive(Debug, Clone)]
pub struct StageSet {
    /// Emotion and event extraction
    pub analyze: Stage,
    /// Story or poem draft
    pub draft: Stage,
    /// Mood rewrite
    pub adjust: Stage,
}

impl StageSet {
    /// Stages in the order they run.
    pub fn in_order(&self) -> [&Stage; 3] {
        [&self.analyze, &self.draft, &self.adjust]
    }
}

/// Build the stage set for `format`.
///
/// Only the draft persona and template differ between formats. Analyze and
/// adjust keep the same persona and contract; every stage carries `format`, so
/// their prompts name the selected noun whatever the request says.
pub fn select(format: Format, client: Arc<dyn GenerationClient>, model: &str) -> StageSet {
    let (draft_persona, draft_template) = prompts::draft_variant(format);

    StageSet {
        analyze: Stage::new(
            StageName::Analyze,
            format,
            ANALYST,
            prompts::analyze_prompt,
            ANALYZE_READS,
            Arc::clone(&client),
            model,
        ),
        draft: Stage::new(
            StageName::Draft,
            format,
            draft_persona,
            draft_template,
            DRAFT_READS,
            Arc::clone(&client),
            model,
        ),
        adjust: Stage::new(
            StageName::Adjust,
            format,
            MOOD_EDITOR,
            prompts::adjust_prompt,
            ADJUST_READS,
            client,
            model,
        ),
    }
}

/// Build the stage set for a raw format flag; anything but `"poem"` is a story.
pub fn select_by_flag(flag: &str, client: Arc<dyn GenerationClient>, model: &str) -> StageSet {
    select(Format::from_flag(flag), client, model)
}
