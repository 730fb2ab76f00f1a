//! Reader engine: page classification and readable-content extraction.
mod classifier;
mod decode;
mod diagnostics;
mod document;
mod dom;
mod extract;
mod items;
mod navigation;
mod noise;
mod settings;
mod text;
mod types;

pub use classifier::PageClassifier;
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, NoopSink, RecordingSink};
pub use document::HtmlDocument;
pub use dom::DocumentAccessor;
pub use extract::ContentExtractor;
pub use navigation::{handle_from_href, NavigationContext, PageKind};
pub use noise::{is_action_text, is_ui_noise};
pub use settings::{Markers, ReaderSettings, SettingsError, Thresholds};
pub use text::{char_len, clean_text};
pub use types::{
    ClassificationVerdict, ExtractedContent, ExtractionReport, Signal, Strategy,
    StrategyAttempt, TextUnit,
};
