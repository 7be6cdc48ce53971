//! Post-generation cleanup of stage output.
//!
//! Prompts already ask for body text only. Models still sometimes wrap the
//! answer in a code fence or open with a label such as `Revised text:`; those
//! are removed here before the text is recorded. Content itself is untouched.

use regex::Regex;
use std::sync::LazyLock;

static CODE_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[A-Za-z]*[ \t]*\r?\n(.*?)\r?\n?```$").expect("valid regex")
});

static ENGLISH_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:\*\*|#+[ \t]*)?(?:(?:revised|rewritten|adjusted|edited|final)[ \t]+)?(?:text|story|poem|version|draft)(?:\*\*)?[ \t]*[:：](?:\*\*)?",
    )
    .expect("valid regex")
});

static KOREAN_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:\*\*)?(?:(?:수정된|최종|완성된)[ \t]*(?:텍스트|글|동화|이야기|시|버전)|수정본|최종본|완성본)(?:\*\*)?[ \t]*[:：](?:\*\*)?",
    )
    .expect("valid regex")
});

/// Remove a wrapping code fence and a leading editorial label.
///
/// The label may sit inside the fence or in front of it. Returns the trimmed
/// input unchanged when stripping would leave nothing.
pub fn strip_editorial_wrapping(raw: &str) -> String {
    let trimmed = raw.trim();

    let unlabelled = strip_label(unfence(trimmed));
    let cleaned = unfence(unlabelled.trim()).trim();

    if cleaned.is_empty() {
        trimmed.to_string()
    } else {
        cleaned.to_string()
    }
}

fn unfence(text: &str) -> &str {
    CODE_FENCE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |body| body.as_str())
}

fn strip_label(text: &str) -> String {
    let without_english = ENGLISH_LABEL_RE.replace(text, "");
    KOREAN_LABEL_RE.replace(&without_english, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_plain_label() {
        assert_eq!(
            strip_editorial_wrapping("Revised text: Once upon a time"),
            "Once upon a time"
        );
    }

    #[test]
    fn test_strips_bold_label_on_own_line() {
        assert_eq!(
            strip_editorial_wrapping("**Revised story:**\n\nThe fox slept."),
            "The fox slept."
        );
    }

    #[test]
    fn test_strips_korean_label() {
        assert_eq!(
            strip_editorial_wrapping("수정된 동화:\n토끼는 창밖을 보았어요."),
            "토끼는 창밖을 보았어요."
        );
    }

    #[test]
    fn test_strips_code_fence() {
        assert_eq!(
            strip_editorial_wrapping("```\nsoft rain\non the roof\n```"),
            "soft rain\non the roof"
        );
    }

    #[test]
    fn test_strips_label_in_front_of_code_fence() {
        assert_eq!(
            strip_editorial_wrapping("Revised text:\n```\nbody\n```"),
            "body"
        );
        assert_eq!(
            strip_editorial_wrapping("최종본:\n```text\n비가 와요\n```"),
            "비가 와요"
        );
    }

    #[test]
    fn test_strips_label_inside_code_fence() {
        assert_eq!(
            strip_editorial_wrapping("```\nRevised poem:\nsoft rain\n```"),
            "soft rain"
        );
    }

    #[test]
    fn test_leaves_body_text_alone() {
        let body = "Storytime was the best part of the day. Poem: not a label here.";
        assert_eq!(strip_editorial_wrapping(body), body);
    }

    #[test]
    fn test_label_only_output_is_kept() {
        assert_eq!(strip_editorial_wrapping("  Story:  "), "Story:");
    }
}
