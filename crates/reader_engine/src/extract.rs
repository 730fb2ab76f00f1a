use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex_lite::Regex;

use crate::diagnostics::{Diagnostic, DiagnosticSink, NoopSink};
use crate::dom::DocumentAccessor;
use crate::items::{is_quoted, items_by_author, main_region, primary_region, text_nodes};
use crate::navigation::NavigationContext;
use crate::noise::{is_action_text, is_ui_noise};
use crate::settings::ReaderSettings;
use crate::text::{char_len, clean_text};
use crate::types::{ExtractedContent, ExtractionReport, Strategy, StrategyAttempt, TextUnit};

/// Handle marker; an author name starting with it is a handle, not a name.
const HANDLE_PREFIX: char = '@';

static TITLE_AUTHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^["“]?(.+?)["”]? on X\s*:"#).expect("TITLE_AUTHOR_RE should compile")
});

/// Turns the current document into ordered, de-duplicated paragraphs.
///
/// Strategies run in `Strategy::ORDER`; the first one that yields anything
/// wins and the rest are skipped. Nothing is cached between calls.
pub struct ContentExtractor {
    settings: ReaderSettings,
    sink: Arc<dyn DiagnosticSink>,
}

impl ContentExtractor {
    pub fn new(settings: ReaderSettings) -> Self {
        Self {
            settings,
            sink: Arc::new(NoopSink),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Flattened text for speech, `None` when no strategy found anything.
    pub fn readable_text<D: DocumentAccessor>(&self, doc: &D) -> Option<String> {
        self.structured_content(doc).readable_text()
    }

    pub fn structured_content<D: DocumentAccessor>(&self, doc: &D) -> ExtractedContent {
        self.extract(doc).0
    }

    /// Structured content plus the quality report for this extraction.
    pub fn extract<D: DocumentAccessor>(&self, doc: &D) -> (ExtractedContent, ExtractionReport) {
        let mut report = ExtractionReport::default();
        let mut units = Vec::new();

        for strategy in Strategy::ORDER {
            let Some(found) = self.run_strategy(strategy, doc) else {
                continue;
            };
            report.attempts.push(StrategyAttempt {
                strategy,
                paragraphs: found.len(),
            });
            self.sink.emit(Diagnostic::StrategyFinished {
                strategy,
                paragraphs: found.len(),
            });
            if !found.is_empty() {
                report.strategy = Some(strategy);
                units = found;
                break;
            }
        }

        let paragraphs: Vec<String> = units.into_iter().map(|unit| unit.text).collect();
        report.paragraphs_found = paragraphs.len();
        self.sink.emit(Diagnostic::ExtractionFinished(report.clone()));

        let title = self.derive_title(&paragraphs);
        let author = self.derive_author(doc);
        (ExtractedContent::new(title, author, paragraphs), report)
    }

    /// Best-effort source elements for the paragraphs. Derived on its own, so
    /// it may be empty or differ in length from the extracted paragraphs.
    pub fn paragraph_elements<D: DocumentAccessor>(&self, doc: &D) -> Vec<D::Node> {
        let markers = &self.settings.markers;
        if let Some(container) = doc.find(None, &markers.read_view) {
            let blocks: Vec<D::Node> = doc
                .find_all(Some(container), &markers.content_blocks)
                .into_iter()
                .filter(|&node| !clean_text(&doc.text(node)).is_empty())
                .collect();
            if !blocks.is_empty() {
                return blocks;
            }
        }
        let Some(region) = primary_region(doc, markers) else {
            return Vec::new();
        };
        text_nodes(doc, Some(region), markers)
            .into_iter()
            .filter(|&node| !clean_text(&doc.text(node)).is_empty())
            .collect()
    }

    /// `None` when the strategy does not apply to this document at all.
    fn run_strategy<D: DocumentAccessor>(
        &self,
        strategy: Strategy,
        doc: &D,
    ) -> Option<Vec<TextUnit<D::Node>>> {
        match strategy {
            Strategy::StructuredContainer => self.structured_blocks(doc),
            Strategy::ContainerText => self.container_lines(doc),
            Strategy::Thread => Some(self.thread_texts(doc)),
            Strategy::Aggressive => Some(self.language_texts(doc)),
        }
    }

    fn structured_blocks<D: DocumentAccessor>(&self, doc: &D) -> Option<Vec<TextUnit<D::Node>>> {
        let markers = &self.settings.markers;
        let container = doc.find(None, &markers.read_view)?;
        let gate = self.settings.thresholds.noise_gate_chars;
        let mut collector = ParagraphCollector::new();

        for block in doc.find_all(Some(container), &markers.content_blocks) {
            if doc.ancestor_matches(block, &markers.media) || self.is_non_text(doc, block) {
                continue;
            }
            let raw = doc.text(block);
            collector.push(block, raw, |text| !is_action_text(text, gate));
        }
        Some(collector.finish())
    }

    fn container_lines<D: DocumentAccessor>(&self, doc: &D) -> Option<Vec<TextUnit<D::Node>>> {
        let container = doc.find(None, &self.settings.markers.read_view)?;
        let gate = self.settings.thresholds.noise_gate_chars;
        let mut collector = ParagraphCollector::new();

        for line in doc.text(container).lines() {
            collector.push(container, line.to_string(), |text| !is_action_text(text, gate));
        }
        Some(collector.finish())
    }

    fn thread_texts<D: DocumentAccessor>(&self, doc: &D) -> Vec<TextUnit<D::Node>> {
        let markers = &self.settings.markers;
        let min_chars = self.settings.thresholds.min_paragraph_chars;
        let gate = self.settings.thresholds.noise_gate_chars;
        let Some(region) = primary_region(doc, markers) else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        let navigation = NavigationContext::from_location(doc.location());
        if let Some(handle) = navigation.author_handle() {
            for item in items_by_author(doc, region, handle, markers) {
                candidates.extend(text_nodes(doc, Some(item), markers));
            }
        }
        if candidates.is_empty() {
            candidates = text_nodes(doc, Some(region), markers);
        }

        let mut collector = ParagraphCollector::new();
        for node in candidates {
            if doc.ancestor_matches(node, &markers.chrome) {
                continue;
            }
            let raw = doc.text(node);
            collector.push(node, raw, |text| {
                char_len(text) >= min_chars && !is_ui_noise(text, gate)
            });
        }
        collector.finish()
    }

    /// Outermost language-tagged elements only; nested ones are already
    /// part of their ancestor's text.
    fn language_texts<D: DocumentAccessor>(&self, doc: &D) -> Vec<TextUnit<D::Node>> {
        let markers = &self.settings.markers;
        let min_chars = self.settings.thresholds.aggressive_min_chars;
        let gate = self.settings.thresholds.noise_gate_chars;
        let scope = main_region(doc, markers);

        let candidates = doc.find_all(scope, &markers.language_text);
        let nested: HashSet<D::Node> = candidates
            .iter()
            .flat_map(|&node| doc.find_all(Some(node), &markers.language_text))
            .collect();

        let mut collector = ParagraphCollector::new();
        for node in candidates {
            if nested.contains(&node) || self.is_non_text(doc, node) || is_quoted(doc, node, markers) {
                continue;
            }
            let raw = doc.text(node);
            collector.push(node, raw, |text| {
                char_len(text) >= min_chars && !is_ui_noise(text, gate)
            });
        }
        collector.finish()
    }

    fn is_non_text<D: DocumentAccessor>(&self, doc: &D, node: D::Node) -> bool {
        let tag = doc.tag_name(node);
        self.settings
            .markers
            .non_text_tags
            .iter()
            .any(|non_text| non_text.eq_ignore_ascii_case(&tag))
    }

    fn derive_title(&self, paragraphs: &[String]) -> Option<String> {
        paragraphs
            .first()
            .filter(|first| char_len(first) < self.settings.thresholds.title_max_chars)
            .cloned()
    }

    /// Name element, then "<name> on X:" document title, then author meta tag.
    fn derive_author<D: DocumentAccessor>(&self, doc: &D) -> Option<String> {
        let markers = &self.settings.markers;

        if let Some(node) = doc.find(None, &markers.author_name) {
            let name = clean_text(&doc.text(node));
            if !name.is_empty() && !name.starts_with(HANDLE_PREFIX) {
                return Some(name);
            }
        }

        let from_title = doc.document_title().and_then(|title| {
            TITLE_AUTHOR_RE
                .captures(&title)
                .and_then(|caps| caps.get(1))
                .map(|name| name.as_str().trim().to_string())
                .filter(|name| !name.is_empty())
        });
        if from_title.is_some() {
            return from_title;
        }

        doc.find(None, &markers.author_meta)
            .and_then(|meta| doc.attribute(meta, "content"))
            .map(|content| clean_text(&content))
            .filter(|content| !content.is_empty())
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(ReaderSettings::default())
    }
}

/// Cleans candidates and keeps the first occurrence of each distinct text.
struct ParagraphCollector<N> {
    seen: HashSet<String>,
    units: Vec<TextUnit<N>>,
}

impl<N> ParagraphCollector<N> {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            units: Vec::new(),
        }
    }

    fn push(&mut self, node: N, raw: String, keep: impl Fn(&str) -> bool) {
        let text = clean_text(&raw);
        if text.is_empty() || self.seen.contains(&text) || !keep(&text) {
            return;
        }
        self.seen.insert(text.clone());
        self.units.push(TextUnit { node, raw, text });
    }

    fn finish(self) -> Vec<TextUnit<N>> {
        self.units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;
    use pretty_assertions::assert_eq;

    fn doc(location: &str, head: &str, body: &str) -> HtmlDocument {
        HtmlDocument::parse(
            &format!("<html><head>{head}</head><body>{body}</body></html>"),
            location,
        )
    }

    #[test]
    fn structured_blocks_skip_media_and_action_text() {
        let body = r#"
            <div data-testid="twitterArticleReadView">
              <div class="longform-header-one">A Short Title</div>
              <div class="longform-unstyled">First paragraph of the article.</div>
              <div data-testid="tweetPhoto"><div class="longform-unstyled">Photo caption</div></div>
              <div class="longform-unstyled">Share</div>
              <img class="longform-unstyled" alt="">
              <div class="longform-unordered-list-item">A list entry</div>
              <div class="longform-unstyled">First paragraph of the article.</div>
            </div>"#;
        let (content, report) = ContentExtractor::default().extract(&doc("/alice/article/1", "", body));
        assert_eq!(
            content.paragraphs,
            vec!["A Short Title", "First paragraph of the article.", "A list entry"]
        );
        assert_eq!(content.title.as_deref(), Some("A Short Title"));
        assert_eq!(report.strategy, Some(Strategy::StructuredContainer));
    }

    #[test]
    fn container_text_used_when_no_blocks_match() {
        let body = r#"<div data-testid="longformRichTextComponent"><p>Line one of the body</p><p>Like</p><p>Line two of the body</p></div>"#;
        let (content, report) = ContentExtractor::default().extract(&doc("/alice/article/1", "", body));
        assert_eq!(content.paragraphs, vec!["Line one of the body", "Line two of the body"]);
        assert_eq!(report.strategy, Some(Strategy::ContainerText));
        assert_eq!(
            report.attempts,
            vec![
                StrategyAttempt { strategy: Strategy::StructuredContainer, paragraphs: 0 },
                StrategyAttempt { strategy: Strategy::ContainerText, paragraphs: 2 },
            ]
        );
    }

    #[test]
    fn author_prefers_name_element_then_title_then_meta() {
        let extractor = ContentExtractor::default();
        let name = doc(
            "/a/status/1",
            "<title>Bob on X: \"hi\"</title>",
            r#"<div data-testid="User-Name"><span>Alice Example</span></div>"#,
        );
        assert_eq!(extractor.derive_author(&name).as_deref(), Some("Alice Example"));

        let title = doc(
            "/a/status/1",
            "<title>Bob Builder on X: \"hi\"</title>",
            r#"<div data-testid="User-Name"><span>@alice</span></div>"#,
        );
        assert_eq!(extractor.derive_author(&title).as_deref(), Some("Bob Builder"));

        let meta = doc("/a/status/1", r#"<title>Home / X</title><meta name="author" content="Carol">"#, "");
        assert_eq!(extractor.derive_author(&meta).as_deref(), Some("Carol"));

        let none = doc("/a/status/1", "<title>Home / X</title>", "");
        assert_eq!(extractor.derive_author(&none), None);
    }

    #[test]
    fn long_first_paragraph_is_not_a_title() {
        let extractor = ContentExtractor::default();
        assert_eq!(extractor.derive_title(&["x".repeat(150)]), None);
        assert_eq!(extractor.derive_title(&["x".repeat(149)]), Some("x".repeat(149)));
        assert_eq!(extractor.derive_title(&[]), None);
    }
}
