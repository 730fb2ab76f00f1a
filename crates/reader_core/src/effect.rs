/// Wait after a navigation before the first check; the page streams in.
pub const SETTLE_DELAY_MS: u64 = 500;

/// Interval between re-checks while the host keeps polling.
pub const POLL_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::SettleElapsed` after the delay.
    ScheduleSettle { delay_ms: u64 },
    /// Run the page classifier and answer with `Msg::Classified`.
    Classify { path: String },
    /// Run the content extractor and answer with `Msg::ContentLoaded`.
    Extract { path: String },
    OfferReader { path: String },
    WithdrawReader,
    /// Tell the user the page had nothing to read.
    ReportNoContent { path: String },
}
