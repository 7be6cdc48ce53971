//! Stage personas and prompt templates.
//!
//! Every template is a pure function of a [`StagePersona`], the format its
//! stage was selected for, and the [`StageContext`]. Templates name the slots they read; the stage checks those
//! slots before calling the template.

use crate::{PromptTemplate, StagePersona};
use lullaby_core::{ContextSlot, Format, StageContext, StageName};
use lullaby_error::PipelineError;

/// Persona of the analyze stage, shared by every format.
pub const ANALYST: StagePersona = StagePersona::new(
    "You are an empathetic diary reader who notices how the writer truly felt.",
    "Find the dominant emotion of the diary entry and summarise the events of the day.",
);

/// Persona of the draft stage for stories.
pub const STORY_WRITER: StagePersona = StagePersona::new(
    "You are a warm children's story writer.",
    "Turn the day described in the diary into a short fairy tale starring the chosen character.",
);

/// Persona of the draft stage for poems.
pub const POET: StagePersona = StagePersona::new(
    "You are a gentle poet who writes lyrical verse for children.",
    "Turn the day described in the diary into a short poem starring the chosen character.",
);

/// Persona of the adjust stage, shared by every format.
pub const MOOD_EDITOR: StagePersona = StagePersona::new(
    "You are a careful editor who tunes the mood of writing for children.",
    "Rewrite the text so that its feeling matches the requested mood while keeping its story.",
);

/// Slots read by the analyze stage.
pub const ANALYZE_READS: &[ContextSlot] = &[];

/// Slots read by the draft stage.
pub const DRAFT_READS: &[ContextSlot] = &[ContextSlot::Analysis];

/// Slots read by the adjust stage.
pub const ADJUST_READS: &[ContextSlot] = &[ContextSlot::Draft];

const SAFETY_RULE: &str = "- Never describe violence, injury, graphic or sexual content. \
If the diary touches on such things, soften them into something abstract or leave them out.";

const LANGUAGE_RULE: &str = "- Write entirely in the language the diary is written in. \
Do not mix in words or phrases from any other language.";

fn persona_header(persona: &StagePersona) -> String {
    format!("{}\nGoal: {}\n", persona.role(), persona.goal())
}

/// Extraction prompt: dominant emotion and event summary.
pub fn analyze_prompt(
    persona: &StagePersona,
    format: Format,
    context: &StageContext,
) -> Result<String, PipelineError> {
    let request = context.request();
    let noun = format.noun();

    Ok(format!(
        r#"{header}
Read the diary entry below and identify:
1. Dominant emotion: the single feeling that colours the day most strongly.
2. Event summary: two or three sentences describing what happened.

Your analysis will be used to write a {noun} whose main character is "{character}".
Answer in the same language as the diary, with exactly two lines:
Dominant emotion: ...
Event summary: ...

Diary:
"""
{diary}
""""#,
        header = persona_header(persona),
        noun = noun,
        character = request.character(),
        diary = request.diary(),
    ))
}

/// Draft prompt for the story variant.
pub fn story_draft_prompt(
    persona: &StagePersona,
    _format: Format,
    context: &StageContext,
) -> Result<String, PipelineError> {
    let request = context.request();
    let analysis = context.require(StageName::Draft, ContextSlot::Analysis)?;

    Ok(format!(
        r#"{header}
Write a short children's story whose main character is "{character}", based on the diary and its analysis below.

Rules:
- Structure: a clear beginning, middle and end, closing on a gentle resolution that suits the feelings in the analysis.
- Tone: warm and kind, suitable for reading aloud to a child.
{safety}
- Keep it short: a few small paragraphs, not too long.
{language}
- Output only the body of the story: no title, heading, preface, notes or closing remarks.

Diary:
"""
{diary}
"""

Analysis:
"""
{analysis}
""""#,
        header = persona_header(persona),
        character = request.character(),
        safety = SAFETY_RULE,
        language = LANGUAGE_RULE,
        diary = request.diary(),
        analysis = analysis,
    ))
}

/// Draft prompt for the poem variant.
pub fn poem_draft_prompt(
    persona: &StagePersona,
    _format: Format,
    context: &StageContext,
) -> Result<String, PipelineError> {
    let request = context.request();
    let analysis = context.require(StageName::Draft, ContextSlot::Analysis)?;

    Ok(format!(
        r#"{header}
Write a short poem for children in which "{character}" appears, based on the diary and its analysis below.

Rules:
- Form: short lines with line breaks, gentle rhythm and repetition; favour images and feelings over plot.
- Tone: lyrical and tender.
{safety}
- Keep it short: two to four small stanzas, not too long.
{language}
- Output only the lines of the poem: no title, heading, preface, notes or closing remarks.

Diary:
"""
{diary}
"""

Analysis:
"""
{analysis}
""""#,
        header = persona_header(persona),
        character = request.character(),
        safety = SAFETY_RULE,
        language = LANGUAGE_RULE,
        diary = request.diary(),
        analysis = analysis,
    ))
}

/// Mood rewrite prompt, shared by both formats.
pub fn adjust_prompt(
    persona: &StagePersona,
    format: Format,
    context: &StageContext,
) -> Result<String, PipelineError> {
    let request = context.request();
    let draft = context.require(StageName::Adjust, ContextSlot::Draft)?;
    let noun = format.noun();
    let shape_rule = match format {
        Format::Story => "- Keep the paragraphs and the beginning, middle and end of the story.",
        Format::Poem => "- Keep it a poem: keep the line breaks and the rhythm.",
    };

    Ok(format!(
        r#"{header}
Rewrite the {noun} below so that it conveys the mood "{mood}". Keep "{character}" as the main character and keep the events recognisable.

How a mood should shape the rewrite, for example:
- hopeful: brighten the resolution so it points toward something good to come.
- quiet or calm (잔잔한): slow the pace, use softer words and a gentle cadence.
- happy (행복한): let the ending sparkle with joy and play.
- sad (슬픈): allow a little wistfulness, then end with comfort.
- excited (신나는): quicken the rhythm with lively moments.
For any other mood, choose the pacing, imagery and ending a reader would recognise as "{mood}".

Rules:
{shape}
- Keep about the same length or shorter.
{safety}
- Keep the same language as the original {noun}; do not add words from any other language.
- Output only the rewritten {noun}. Do not add labels such as "Revised text:", titles or explanations.

Original {noun}:
"""
{draft}
""""#,
        header = persona_header(persona),
        noun = noun,
        mood = request.mood(),
        character = request.character(),
        shape = shape_rule,
        safety = SAFETY_RULE,
        draft = draft,
    ))
}

/// Draft persona and template for a format.
pub fn draft_variant(format: Format) -> (StagePersona, PromptTemplate) {
    match format {
        Format::Poem => (POET, poem_draft_prompt as PromptTemplate),
        Format::Story => (STORY_WRITER, story_draft_prompt as PromptTemplate),
    }
}
