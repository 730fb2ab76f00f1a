//! Recognizer for interface chrome: action buttons, counters and timestamps.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::text::char_len;

/// Default length at which texts are treated as prose and never pattern-matched.
pub(crate) const DEFAULT_GATE_CHARS: usize = 50;

const ACTION_WORDS: &[&str] = &[
    "ad",
    "bookmark",
    "bookmarks",
    "copy link",
    "follow",
    "following",
    "like",
    "liked",
    "likes",
    "more",
    "promoted",
    "quote",
    "quotes",
    "replies",
    "reply",
    "repost",
    "reposted",
    "reposts",
    "share",
    "show more",
    "translate post",
    "unfollow",
    "view",
    "views",
];

static ENGAGEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[\d.,]+\s*[kmb]?\s+(likes?|reposts?|repl(y|ies)|quotes?|views?|bookmarks?)$",
    )
    .expect("ENGAGEMENT_RE should compile")
});
static COUNTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\d[\d.,]*\s*[kmb]?$").expect("COUNTER_RE should compile"));
static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d{1,2}:\d{2}(\s*[ap]\.?m\.?)?$").expect("CLOCK_RE should compile")
});
static RELATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d+\s*(s|m|h|d|w|min|mins|hr|hrs)$").expect("RELATIVE_RE should compile")
});
static MONTH_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+\d{1,2}(,?\s+\d{4})?$",
    )
    .expect("MONTH_DATE_RE should compile")
});
static NUMERIC_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,4}[/.-]\d{1,2}[/.-]\d{1,4}$").expect("NUMERIC_DATE_RE should compile")
});

/// Exact or near-exact button text such as "Like", "Repost." or "12 Likes".
pub fn is_action_text(text: &str, gate_chars: usize) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || char_len(trimmed) >= gate_chars {
        return false;
    }
    let normalized = trimmed
        .trim_end_matches(['.', '!', ':', '\u{2026}'])
        .trim()
        .to_lowercase();
    ACTION_WORDS.contains(&normalized.as_str()) || ENGAGEMENT_RE.is_match(&normalized)
}

/// Any interface chrome: action text, bare counters, clock times, relative
/// ages and dates, including "10:30 AM \u{b7} Jan 5, 2024" style stamps.
pub fn is_ui_noise(text: &str, gate_chars: usize) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || char_len(trimmed) >= gate_chars {
        return false;
    }
    if is_action_text(trimmed, gate_chars) {
        return true;
    }

    let mut parts = trimmed
        .split(['\u{b7}', '|', '\u{2022}'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .peekable();
    if parts.peek().is_none() {
        return true;
    }
    parts.all(|part| is_stamp(part) || is_action_text(part, gate_chars))
}

fn is_stamp(part: &str) -> bool {
    COUNTER_RE.is_match(part)
        || CLOCK_RE.is_match(part)
        || RELATIVE_RE.is_match(part)
        || MONTH_DATE_RE.is_match(part)
        || NUMERIC_DATE_RE.is_match(part)
}
