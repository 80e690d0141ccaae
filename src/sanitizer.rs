//! Cleans raw model output into something Todd would actually say.
//!
//! The model likes to echo its instructions, narrate Todd in the third
//! person, or stack several facts. Each step below handles one of those;
//! `sanitize` chains them and always returns a usable reply.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::warn;

use crate::facts::FACT_MARKER;
use crate::persona::{BEGIN_MARKER, TURN_MARKER};

pub const NARRATIVE_FALLBACK: &str = "Well, I'm not much for long stories. I'm just a potato trying to get through the day without being turned into french fries. Spud Fact: The average potato contains about 110 calories, which is more energy than I'm willing to expend on most conversations.";

pub const SHORT_FALLBACK: &str = "Well, what can a potato say? I'm not exactly bursting with conversation. Not that I'd want to be anyway. Spud Fact: The average American eats about 126 pounds of potatoes each year, which is frankly more attention than I want.";

/// Anything shorter than this after cleanup is not worth sending.
pub const MIN_REPLY_CHARS: usize = 10;

const MAX_STRIP_PASSES: usize = 4;

/// Instruction text that must never reach the user.
pub const INSTRUCTION_FRAGMENTS: &[&str] = &[
    "You are Todd",
    "PERSONALITY:",
    "RESPONSE STYLE:",
    "EXAMPLES:",
    "IMPORTANT:",
    "User input:",
    "User:",
    "Todd:",
    "Response:",
    "BEGIN RESPONSE:",
];

const NARRATIVE_FRAGMENTS: &[&str] = &["\"Is this really happening?\"", "Todd is not a fan", "he decides"];

static NARRATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Todd (was|is|has|had|would|will)").unwrap());

static STRIP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"You are Todd\W*",
        r"PERSONALITY:\W*",
        r"RESPONSE STYLE:\W*",
        r"EXAMPLES:\W*",
        r"IMPORTANT:\W*",
        r"User input:\W*",
        r"User:\W*",
        r"Todd:",
        r"Response:",
        r"(?i)- You -",
        r"(?i)BEGIN RESPONSE:",
        r"\bUser\b",
        r"(?m)^\s*-\s*",
        r"(?m)^\s*\d+\.\s*",
        r"(?i)As a potato,?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static SELF_INTRO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bI am Todd\b").unwrap());

/// Run the whole pipeline.
pub fn sanitize(raw: &str, prompt: &str, user_text: &str) -> String {
    let turn = extract_turn(raw, prompt);
    let turn = strip_begin_marker(turn);

    if is_third_person(turn) {
        warn!("Sanitizer: model narrated Todd in the third person, using fallback");
        return NARRATIVE_FALLBACK.to_string();
    }

    let mut cleaned = strip_instruction_fragments(turn);
    let without_echo = strip_user_echo(&cleaned, user_text);
    if without_echo != cleaned {
        // cutting an echo out can splice a label back together
        cleaned = strip_instruction_fragments(&without_echo);
    }
    let cleaned = keep_first_fact(cleaned.trim());

    if is_unusable(&cleaned) {
        warn!(len = cleaned.len(), "Sanitizer: nothing usable left, using fallback");
        return SHORT_FALLBACK.to_string();
    }
    cleaned
}

/// Todd's part of the output: after the echoed prompt, else after the last
/// turn marker, else everything.
pub fn extract_turn<'a>(raw: &'a str, prompt: &str) -> &'a str {
    if !prompt.is_empty() {
        if let Some(pos) = raw.find(prompt) {
            return &raw[pos + prompt.len()..];
        }
    }
    match raw.rfind(TURN_MARKER) {
        Some(pos) => &raw[pos + TURN_MARKER.len()..],
        None => raw,
    }
}

pub fn strip_begin_marker(text: &str) -> &str {
    match text.find(BEGIN_MARKER) {
        Some(pos) => &text[pos + BEGIN_MARKER.len()..],
        None => text,
    }
}

pub fn is_third_person(text: &str) -> bool {
    NARRATIVE_FRAGMENTS.iter().any(|f| text.contains(f)) || NARRATIVE.is_match(text)
}

/// Drop quoted echoes of the user's message.
pub fn strip_user_echo(text: &str, user_text: &str) -> String {
    let user_text = user_text.trim();
    if user_text.is_empty() {
        return text.to_string();
    }

    let quoted = format!("\"{}\"", regex_lite::escape(user_text));
    match Regex::new(&quoted) {
        Ok(re) => re.replace_all(text, "").into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Remove persona labels, list markers and other instruction debris.
/// Repeats until nothing changes, since one removal can expose another.
pub fn strip_instruction_fragments(text: &str) -> String {
    let mut current = text.to_string();
    for _ in 0..MAX_STRIP_PASSES {
        let next = STRIP_PATTERNS
            .iter()
            .fold(current.clone(), |acc, re| re.replace_all(&acc, "").into_owned());
        if next == current {
            break;
        }
        current = next;
    }

    if INSTRUCTION_FRAGMENTS.iter().any(|f| current.contains(f)) {
        // only reachable with pathologically nested fragments
        for fragment in INSTRUCTION_FRAGMENTS {
            while current.contains(fragment) {
                current = current.replace(fragment, "");
            }
        }
    }
    current
}

/// Keep everything up to the second fact marker, if there is one.
pub fn keep_first_fact(text: &str) -> String {
    let Some(first) = text.find(FACT_MARKER) else {
        return text.to_string();
    };
    let after_first = first + FACT_MARKER.len();
    match text[after_first..].find(FACT_MARKER) {
        Some(second) => text[..after_first + second].trim_end().to_string(),
        None => text.to_string(),
    }
}

pub fn is_unusable(text: &str) -> bool {
    text.trim().chars().count() < MIN_REPLY_CHARS || SELF_INTRO.is_match(text)
}
