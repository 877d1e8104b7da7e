//! Text Sanitizer. Runs on every user-supplied field before it is placed
//! into a prompt. Strips prompt-injection markers and control characters,
//! then truncates to a per-field limit.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

/// What the sanitizer changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    pub patterns_found: Vec<String>,
    pub was_truncated: bool,
    pub chars_removed: usize,
}

static INJECTION_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        (
            "ignore_instructions",
            r"(?i)\b(ignore|disregard|forget)\s+(all\s+|any\s+)?(the\s+)?(previous|prior|above|earlier)\s+(instructions|prompts|rules|messages)",
        ),
        ("role_override", r"(?i)\byou\s+are\s+now\b"),
        (
            "system_prompt_request",
            r"(?i)\b(reveal|print|show|repeat)\s+(your\s+|the\s+)?(system\s+prompt|hidden\s+instructions)",
        ),
        ("chat_markup", r"<\|(im_start|im_end|system|user|assistant)\|>"),
        ("inst_markers", r"\[/?INST\]|<</?SYS>>"),
        ("fenced_role", r"```(system|assistant)"),
        ("role_prefix", r"(?im)^\s*(system|assistant)\s*:"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("valid regex")))
    .collect()
});

/// Cleans `raw_text` and truncates it to `max_length` characters.
///
/// `context_label` only identifies the field in logs.
pub fn sanitize(raw_text: &str, max_length: usize, context_label: &str) -> (String, SanitizeReport) {
    let mut text: String = raw_text
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect();

    // Removing one match can join its neighbours into a new one, so repeat
    // until a full pass finds nothing.
    let mut patterns_found: Vec<String> = Vec::new();
    loop {
        let mut changed = false;
        for (name, pattern) in INJECTION_PATTERNS.iter() {
            if !pattern.is_match(&text) {
                continue;
            }
            if !patterns_found.iter().any(|found| found == name) {
                patterns_found.push(name.to_string());
            }
            text = pattern.replace_all(&text, "").into_owned();
            changed = true;
        }
        if !changed {
            break;
        }
    }

    let trimmed = text.trim();
    let was_truncated = trimmed.chars().count() > max_length;
    let clean: String = trimmed.chars().take(max_length).collect();

    let chars_removed = raw_text
        .chars()
        .count()
        .saturating_sub(clean.chars().count());

    if !patterns_found.is_empty() || was_truncated {
        warn!(
            context = context_label,
            patterns = patterns_found.len(),
            was_truncated,
            chars_removed,
            "sanitized user context"
        );
    }

    (
        clean,
        SanitizeReport {
            patterns_found,
            was_truncated,
            chars_removed,
        },
    )
}
