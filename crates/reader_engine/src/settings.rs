//! Platform markers and heuristic thresholds.
//!
//! The markers track one platform's current markup and go stale silently
//! when it changes, so every one of them can be overridden from a settings
//! file. Missing fields fall back to the defaults below.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::noise::DEFAULT_GATE_CHARS;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid RON settings: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("marker `{field}` is not a valid selector: {marker:?}")]
    InvalidMarker { field: &'static str, marker: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    pub markers: Markers,
    pub thresholds: Thresholds,
}

impl ReaderSettings {
    pub fn from_ron(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = ron::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects markers that would silently match nothing.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, marker) in self.markers.named() {
            if Selector::parse(marker).is_err() {
                return Err(SettingsError::InvalidMarker {
                    field,
                    marker: marker.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// CSS selectors describing the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Candidates for the main content column, tried in order.
    pub primary_region: Vec<String>,
    /// Wider fallback region for the aggressive strategy, tried in order.
    pub main_region: Vec<String>,
    /// Long-form or notes container whose presence marks an article page.
    pub longform_container: String,
    /// Structured read-view container holding an article body.
    pub read_view: String,
    /// Content-block class markers inside the read view.
    pub content_blocks: String,
    /// Elements whose exact text may be a long-form label.
    pub label: String,
    pub label_words: Vec<String>,
    /// "Show more" control on truncated items.
    pub show_more: String,
    pub item: String,
    /// The focal item on a detail page.
    pub main_item: String,
    pub item_text: String,
    /// Quoted or embedded items nested inside another item.
    pub quoted: String,
    /// Media cards, photos and embedded links excluded from the read view.
    pub media: String,
    /// Navigation and control containers whose text is never prose.
    pub chrome: String,
    /// Tags that never carry readable text.
    pub non_text_tags: Vec<String>,
    /// Broad text carriers for the aggressive strategy.
    pub language_text: String,
    pub author_name: String,
    pub author_link: String,
    pub author_meta: String,
}

impl Markers {
    fn named(&self) -> Vec<(&'static str, &str)> {
        let mut named: Vec<(&'static str, &str)> = vec![
            ("longform_container", self.longform_container.as_str()),
            ("read_view", self.read_view.as_str()),
            ("content_blocks", self.content_blocks.as_str()),
            ("label", self.label.as_str()),
            ("show_more", self.show_more.as_str()),
            ("item", self.item.as_str()),
            ("main_item", self.main_item.as_str()),
            ("item_text", self.item_text.as_str()),
            ("quoted", self.quoted.as_str()),
            ("media", self.media.as_str()),
            ("chrome", self.chrome.as_str()),
            ("language_text", self.language_text.as_str()),
            ("author_name", self.author_name.as_str()),
            ("author_link", self.author_link.as_str()),
            ("author_meta", self.author_meta.as_str()),
        ];
        named.extend(self.primary_region.iter().map(|m| ("primary_region", m.as_str())));
        named.extend(self.main_region.iter().map(|m| ("main_region", m.as_str())));
        named
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            primary_region: vec![r#"[data-testid="primaryColumn"]"#.to_string()],
            main_region: vec![
                r#"[data-testid="primaryColumn"]"#.to_string(),
                r#"main[role="main"]"#.to_string(),
                "main".to_string(),
                "body".to_string(),
            ],
            longform_container: concat!(
                r#"[data-testid="twitterArticleReadView"], "#,
                r#"[data-testid="twitterArticleRichTextView"], "#,
                r#"[data-testid="longformRichTextComponent"], "#,
                r#"[data-testid="noteText"]"#
            )
            .to_string(),
            read_view: concat!(
                r#"[data-testid="twitterArticleReadView"], "#,
                r#"[data-testid="twitterArticleRichTextView"], "#,
                r#"[data-testid="longformRichTextComponent"]"#
            )
            .to_string(),
            content_blocks: concat!(
                ".longform-unstyled, .longform-header-one, .longform-header-two, ",
                ".longform-blockquote, .longform-unordered-list-item, ",
                ".longform-ordered-list-item, .public-DraftStyleDefault-block"
            )
            .to_string(),
            label: "span".to_string(),
            label_words: vec!["Article".to_string(), "Note".to_string()],
            show_more: r#"[data-testid="tweet-text-show-more-link"]"#.to_string(),
            item: r#"article[data-testid="tweet"]"#.to_string(),
            main_item: r#"article[data-testid="tweet"][tabindex="-1"]"#.to_string(),
            item_text: r#"[data-testid="tweetText"]"#.to_string(),
            quoted: concat!(
                r#"[data-testid="quoteTweet"], div[role="link"], "#,
                r#"article[data-testid="tweet"] article[data-testid="tweet"]"#
            )
            .to_string(),
            media: concat!(
                r#"[data-testid="card.wrapper"], [data-testid="tweetPhoto"], "#,
                r#"[data-testid="videoPlayer"], div[role="link"]"#
            )
            .to_string(),
            chrome: r#"nav, footer, button, [role="button"], [role="navigation"]"#.to_string(),
            non_text_tags: ["img", "svg", "video", "picture", "iframe", "button", "input"]
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
            language_text: r#"[lang], [dir="auto"]"#.to_string(),
            author_name: r#"[data-testid="User-Name"] span"#.to_string(),
            author_link: r#"[data-testid="User-Name"] a[href]"#.to_string(),
            author_meta: r#"meta[name="author"]"#.to_string(),
        }
    }
}

/// Character-count thresholds for classification and extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// A main item strictly longer than this is long-form on its own.
    pub single_item_chars: usize,
    pub thread_min_items: usize,
    pub thread_min_chars: usize,
    /// Shortest text the thread strategy keeps.
    pub min_paragraph_chars: usize,
    /// Shortest text the aggressive strategy keeps.
    pub aggressive_min_chars: usize,
    /// A first paragraph shorter than this becomes the title.
    pub title_max_chars: usize,
    /// Texts at least this long are prose and skip noise matching.
    pub noise_gate_chars: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            single_item_chars: 280,
            thread_min_items: 2,
            thread_min_chars: 400,
            min_paragraph_chars: 20,
            aggressive_min_chars: 30,
            title_max_chars: 150,
            noise_gate_chars: DEFAULT_GATE_CHARS,
        }
    }
}
