use std::fmt;

use serde::Serialize;

/// Separator between paragraphs in every flattened form.
pub(crate) const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// One piece of extracted prose and the element it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit<N> {
    pub node: N,
    pub raw: String,
    pub text: String,
}

/// Engine output. `paragraphs` keeps document order, holds no empty strings
/// and no exact duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub author: Option<String>,
    pub paragraphs: Vec<String>,
    pub body: String,
}

impl ExtractedContent {
    pub(crate) fn new(title: Option<String>, author: Option<String>, paragraphs: Vec<String>) -> Self {
        let body = paragraphs.join(PARAGRAPH_SEPARATOR);
        Self {
            title,
            author,
            paragraphs,
            body,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Flattened text ready for speech, or `None` when there is nothing to read.
    pub fn readable_text(&self) -> Option<String> {
        if self.paragraphs.is_empty() {
            return None;
        }
        let byline = self.author.as_ref().map(|author| format!("Article by {author}"));
        let parts: Vec<&str> = byline
            .as_deref()
            .into_iter()
            .chain(self.paragraphs.iter().map(String::as_str))
            .collect();
        Some(parts.join(PARAGRAPH_SEPARATOR))
    }
}

/// Extraction layers, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Content-block markers inside the structured read view.
    StructuredContainer,
    /// Line-split rendered text of the read view.
    ContainerText,
    /// Item text across the primary region.
    Thread,
    /// Any language-tagged text in the main region.
    Aggressive,
}

impl Strategy {
    pub const ORDER: [Strategy; 4] = [
        Strategy::StructuredContainer,
        Strategy::ContainerText,
        Strategy::Thread,
        Strategy::Aggressive,
    ];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::StructuredContainer => write!(f, "structured container"),
            Strategy::ContainerText => write!(f, "container text"),
            Strategy::Thread => write!(f, "thread"),
            Strategy::Aggressive => write!(f, "aggressive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrategyAttempt {
    pub strategy: Strategy,
    pub paragraphs: usize,
}

/// Quality signals for one extraction, so stale markers show up as a drift
/// in strategy choice or paragraph counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// Strategy that produced the paragraphs, `None` when all came up empty.
    pub strategy: Option<Strategy>,
    /// Strategies that applied to this document, in the order they ran.
    pub attempts: Vec<StrategyAttempt>,
    pub paragraphs_found: usize,
}

/// What decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    ArticlePath,
    UnsupportedPath,
    RegionMissing,
    LongformContainer,
    LongformLabel,
    TruncatedText,
    MainItemMissing,
    LongItem {
        chars: usize,
    },
    Thread {
        items: usize,
        chars: usize,
    },
    ShortContent {
        main_chars: usize,
        author_items: usize,
        author_chars: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassificationVerdict {
    pub is_article: bool,
    pub signal: Signal,
}

impl ClassificationVerdict {
    pub(crate) fn article(signal: Signal) -> Self {
        Self {
            is_article: true,
            signal,
        }
    }

    pub(crate) fn rejected(signal: Signal) -> Self {
        Self {
            is_article: false,
            signal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_text_prepends_byline() {
        let content = ExtractedContent::new(
            None,
            Some("Alice".to_string()),
            vec!["First.".to_string(), "Second.".to_string()],
        );
        assert_eq!(content.body, "First.\n\nSecond.");
        assert_eq!(
            content.readable_text().as_deref(),
            Some("Article by Alice\n\nFirst.\n\nSecond.")
        );
    }

    #[test]
    fn empty_content_has_no_readable_text() {
        let content = ExtractedContent::new(None, Some("Alice".to_string()), Vec::new());
        assert!(content.is_empty());
        assert_eq!(content.readable_text(), None);
    }
}
