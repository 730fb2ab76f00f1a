#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The host observed a location change (full URL or path).
    Navigated(String),
    /// The settle delay after the last navigation has passed.
    SettleElapsed,
    /// Periodic re-check tick.
    PollTick,
    /// Classifier result for `path`.
    Classified { path: String, is_article: bool },
    /// Extraction result for `path`.
    ContentLoaded { path: String, paragraphs: usize },
}
