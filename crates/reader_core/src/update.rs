use reader_logging::reader_debug;

use crate::state::normalize_path;
use crate::{Effect, Msg, Phase, SessionState, SETTLE_DELAY_MS};

/// Pure update function: applies a message to state and returns any effects.
///
/// Results that name a path other than the current one are stale and dropped;
/// that is the only cancellation the reader needs.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigated(location) => {
            let path = normalize_path(&location);
            if state.path() == Some(path.as_str()) {
                return (state, Vec::new());
            }
            let mut effects = Vec::with_capacity(2);
            if state.phase() == Phase::Offered {
                effects.push(Effect::WithdrawReader);
            }
            state.navigate(path);
            effects.push(Effect::ScheduleSettle {
                delay_ms: SETTLE_DELAY_MS,
            });
            effects
        }
        Msg::SettleElapsed => match state.path().map(str::to_string) {
            Some(path) if state.phase() == Phase::Settling => {
                state.set_phase(Phase::Watching);
                vec![Effect::Classify { path }]
            }
            _ => Vec::new(),
        },
        Msg::PollTick => match (state.phase(), state.path()) {
            (Phase::Watching | Phase::Offered, Some(path)) => vec![Effect::Classify {
                path: path.to_string(),
            }],
            _ => Vec::new(),
        },
        Msg::Classified { path, is_article } => {
            if !state.is_current(&path) {
                reader_debug!("dropping stale verdict for {}", path);
                return (state, Vec::new());
            }
            match (state.phase(), is_article) {
                (Phase::Watching, true) => vec![Effect::Extract {
                    path: normalize_path(&path),
                }],
                (Phase::Offered, false) => {
                    state.set_phase(Phase::Watching);
                    vec![Effect::WithdrawReader]
                }
                _ => Vec::new(),
            }
        }
        Msg::ContentLoaded { path, paragraphs } => {
            if !state.is_current(&path) {
                reader_debug!("dropping stale content for {}", path);
                return (state, Vec::new());
            }
            if state.phase() != Phase::Watching {
                return (state, Vec::new());
            }
            let path = normalize_path(&path);
            if paragraphs == 0 {
                if state.mark_no_content() {
                    vec![Effect::ReportNoContent { path }]
                } else {
                    Vec::new()
                }
            } else {
                state.set_phase(Phase::Offered);
                vec![Effect::OfferReader { path }]
            }
        }
    };

    (state, effects)
}
