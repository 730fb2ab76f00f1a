use std::collections::VecDeque;
use std::sync::Arc;

use reader_core::{update, Effect, Msg, Phase, SessionState};
use reader_engine::{
    ClassificationVerdict, ContentExtractor, DocumentAccessor, ExtractedContent, ExtractionReport,
    HtmlDocument, LogSink, PageClassifier, ReaderSettings,
};
use reader_logging::{reader_debug, reader_info};
use serde::Serialize;

/// What the session ended with after the page was driven to a steady state.
#[derive(Debug, Default, Serialize)]
pub struct RunOutcome {
    pub verdicts: Vec<ClassificationVerdict>,
    pub report: Option<ExtractionReport>,
    pub offered: Option<ExtractedContent>,
    pub no_content: bool,
}

/// Executes session effects against one static document.
///
/// The document never changes, so settle delays are skipped and polling is
/// bounded by `max_polls`.
pub struct PageRunner {
    document: HtmlDocument,
    classifier: PageClassifier,
    extractor: ContentExtractor,
    max_polls: u32,
}

impl PageRunner {
    pub fn new(document: HtmlDocument, settings: ReaderSettings, max_polls: u32) -> Self {
        let sink = Arc::new(LogSink);
        Self {
            document,
            classifier: PageClassifier::new(settings.clone()).with_sink(sink.clone()),
            extractor: ContentExtractor::new(settings).with_sink(sink),
            max_polls,
        }
    }

    pub fn run(self) -> RunOutcome {
        let mut outcome = RunOutcome::default();
        let mut pending: Option<ExtractedContent> = None;
        let mut state = SessionState::new();
        let mut queue = VecDeque::from([Msg::Navigated(self.document.location().to_string())]);
        let mut polls = 0;

        loop {
            while let Some(msg) = queue.pop_front() {
                let (next, effects) = update(state, msg);
                state = next;
                for effect in effects {
                    if let Some(reply) = self.apply(effect, &mut outcome, &mut pending) {
                        queue.push_back(reply);
                    }
                }
            }

            let phase = state.view().phase;
            if polls >= self.max_polls || !matches!(phase, Phase::Watching | Phase::Offered) {
                break;
            }
            polls += 1;
            queue.push_back(Msg::PollTick);
        }

        outcome
    }

    fn apply(
        &self,
        effect: Effect,
        outcome: &mut RunOutcome,
        pending: &mut Option<ExtractedContent>,
    ) -> Option<Msg> {
        match effect {
            Effect::ScheduleSettle { delay_ms } => {
                reader_debug!("static page, skipping {}ms settle delay", delay_ms);
                Some(Msg::SettleElapsed)
            }
            Effect::Classify { path } => {
                let verdict = self.classifier.classify(&self.document);
                outcome.verdicts.push(verdict);
                Some(Msg::Classified {
                    path,
                    is_article: verdict.is_article,
                })
            }
            Effect::Extract { path } => {
                let (content, report) = self.extractor.extract(&self.document);
                let paragraphs = content.paragraphs.len();
                outcome.report = Some(report);
                *pending = Some(content);
                Some(Msg::ContentLoaded { path, paragraphs })
            }
            Effect::OfferReader { path } => {
                reader_info!("offering reader for {}", path);
                outcome.offered = pending.take();
                None
            }
            Effect::WithdrawReader => {
                reader_info!("withdrawing reader");
                outcome.offered = None;
                None
            }
            Effect::ReportNoContent { path } => {
                reader_info!("no readable content on {}", path);
                outcome.no_content = true;
                None
            }
        }
    }
}
