use std::sync::Arc;

use crate::diagnostics::{Diagnostic, DiagnosticSink, NoopSink};
use crate::dom::DocumentAccessor;
use crate::items::{items_by_author, main_item, primary_region, primary_text};
use crate::navigation::{NavigationContext, PageKind};
use crate::settings::ReaderSettings;
use crate::text::char_len;
use crate::types::{ClassificationVerdict, Signal};

/// Decides whether the current page holds long-form content worth reading aloud.
///
/// Every call is a fresh read of the document and location. A page that is
/// still streaming in may be rejected now and accepted on a later call.
pub struct PageClassifier {
    settings: ReaderSettings,
    sink: Arc<dyn DiagnosticSink>,
}

impl PageClassifier {
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

    pub fn is_article_page<D: DocumentAccessor>(&self, doc: &D) -> bool {
        self.classify(doc).is_article
    }

    pub fn classify<D: DocumentAccessor>(&self, doc: &D) -> ClassificationVerdict {
        let verdict = self.evaluate(doc);
        self.sink.emit(Diagnostic::Classified(verdict));
        verdict
    }

    fn evaluate<D: DocumentAccessor>(&self, doc: &D) -> ClassificationVerdict {
        let markers = &self.settings.markers;
        let thresholds = &self.settings.thresholds;
        let navigation = NavigationContext::from_location(doc.location());

        match navigation.kind() {
            PageKind::ArticleUrl => return ClassificationVerdict::article(Signal::ArticlePath),
            PageKind::Other => return ClassificationVerdict::rejected(Signal::UnsupportedPath),
            PageKind::StatusUrl => {}
        }

        let Some(region) = primary_region(doc, markers) else {
            return ClassificationVerdict::rejected(Signal::RegionMissing);
        };

        if doc.find(Some(region), &markers.longform_container).is_some() {
            return ClassificationVerdict::article(Signal::LongformContainer);
        }
        if self.has_longform_label(doc, region) {
            return ClassificationVerdict::article(Signal::LongformLabel);
        }
        if doc.find(Some(region), &markers.show_more).is_some() {
            return ClassificationVerdict::article(Signal::TruncatedText);
        }

        let Some(main) = main_item(doc, region, markers) else {
            return ClassificationVerdict::rejected(Signal::MainItemMissing);
        };
        let main_chars = char_len(&primary_text(doc, main, markers));
        if main_chars > thresholds.single_item_chars {
            return ClassificationVerdict::article(Signal::LongItem { chars: main_chars });
        }

        let (author_items, author_chars) = match navigation.author_handle() {
            Some(handle) => {
                let items = items_by_author(doc, region, handle, markers);
                let chars = items
                    .iter()
                    .map(|&item| char_len(&primary_text(doc, item, markers)))
                    .sum::<usize>();
                (items.len(), chars)
            }
            None => (0, 0),
        };

        if author_items >= thresholds.thread_min_items && author_chars >= thresholds.thread_min_chars {
            ClassificationVerdict::article(Signal::Thread {
                items: author_items,
                chars: author_chars,
            })
        } else {
            ClassificationVerdict::rejected(Signal::ShortContent {
                main_chars,
                author_items,
                author_chars,
            })
        }
    }

    fn has_longform_label<D: DocumentAccessor>(&self, doc: &D, region: D::Node) -> bool {
        let words = &self.settings.markers.label_words;
        doc.find_all(Some(region), &self.settings.markers.label)
            .into_iter()
            .any(|label| {
                let text = doc.text(label);
                let text = text.trim();
                words.iter().any(|word| word == text)
            })
    }
}

impl Default for PageClassifier {
    fn default() -> Self {
        Self::new(ReaderSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::document::HtmlDocument;

    fn page(location: &str, column: &str) -> HtmlDocument {
        HtmlDocument::parse(
            &format!(
                r#"<html><body><div data-testid="primaryColumn">{column}</div></body></html>"#
            ),
            location,
        )
    }

    fn item(handle: &str, text: &str) -> String {
        format!(
            r#"<article data-testid="tweet"><div data-testid="User-Name"><a href="/{handle}"><span>@{handle}</span></a></div><div data-testid="tweetText">{text}</div></article>"#
        )
    }

    #[test]
    fn article_path_overrides_missing_region() {
        let doc = HtmlDocument::parse("<html><body></body></html>", "/alice/article/99");
        let verdict = PageClassifier::default().classify(&doc);
        assert_eq!(verdict, ClassificationVerdict::article(Signal::ArticlePath));
    }

    #[test]
    fn listing_paths_are_rejected_without_inspection() {
        let doc = page("/home", &item("alice", &"x".repeat(1000)));
        let verdict = PageClassifier::default().classify(&doc);
        assert_eq!(verdict, ClassificationVerdict::rejected(Signal::UnsupportedPath));
    }

    #[test]
    fn missing_region_is_not_yet_decidable() {
        let doc = HtmlDocument::parse("<html><body><main></main></body></html>", "/alice/status/1");
        assert_eq!(
            PageClassifier::default().classify(&doc).signal,
            Signal::RegionMissing
        );
    }

    #[test]
    fn structural_signals_accept_the_page() {
        let cases = [
            (r#"<div data-testid="longformRichTextComponent"></div>"#, Signal::LongformContainer),
            (r#"<span> Article </span>"#, Signal::LongformLabel),
            (r#"<button data-testid="tweet-text-show-more-link">Show more</button>"#, Signal::TruncatedText),
        ];
        for (markup, signal) in cases {
            let doc = page("/alice/status/1", markup);
            assert_eq!(PageClassifier::default().classify(&doc), ClassificationVerdict::article(signal));
        }
    }

    #[test]
    fn label_must_match_exactly() {
        let doc = page("/alice/status/1", &format!("<span>Articles</span>{}", item("alice", "short")));
        assert!(!PageClassifier::default().is_article_page(&doc));
    }

    #[test]
    fn verdict_is_emitted_to_sink() {
        let sink = Arc::new(RecordingSink::new());
        let classifier = PageClassifier::default().with_sink(sink.clone());
        let doc = page("/alice/status/1", "");
        let verdict = classifier.classify(&doc);
        assert_eq!(verdict.signal, Signal::MainItemMissing);
        assert_eq!(sink.events(), vec![Diagnostic::Classified(verdict)]);
    }
}
