use std::sync::{Mutex, PoisonError};

use reader_logging::reader_debug;

use crate::types::{ClassificationVerdict, ExtractionReport, Strategy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Classified(ClassificationVerdict),
    StrategyFinished { strategy: Strategy, paragraphs: usize },
    ExtractionFinished(ExtractionReport),
}

/// Receiver for engine diagnostics, injected instead of a global debug flag.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, event: Diagnostic);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&self, _event: Diagnostic) {}
}

/// Forwards events to the global logger at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, event: Diagnostic) {
        match event {
            Diagnostic::Classified(verdict) => {
                reader_debug!(
                    "classified is_article={} signal={:?}",
                    verdict.is_article,
                    verdict.signal
                );
            }
            Diagnostic::StrategyFinished {
                strategy,
                paragraphs,
            } => {
                reader_debug!("strategy {} produced {} paragraphs", strategy, paragraphs);
            }
            Diagnostic::ExtractionFinished(report) => {
                reader_debug!(
                    "extraction finished strategy={:?} paragraphs={} attempts={}",
                    report.strategy,
                    report.paragraphs_found,
                    report.attempts.len()
                );
            }
        }
    }
}

/// Keeps every event in order; meant for tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, event: Diagnostic) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
