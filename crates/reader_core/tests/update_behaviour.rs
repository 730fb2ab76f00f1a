use std::sync::Once;

use pretty_assertions::assert_eq;
use reader_core::{update, Effect, Msg, Phase, SessionState, SETTLE_DELAY_MS};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(reader_logging::initialize_for_tests);
}

fn classify(path: &str) -> Effect {
    Effect::Classify {
        path: path.to_string(),
    }
}

/// Navigates and lets the settle delay pass.
fn settled(location: &str) -> SessionState {
    let (state, _) = update(SessionState::new(), Msg::Navigated(location.to_string()));
    let (state, _) = update(state, Msg::SettleElapsed);
    state
}

fn offered(path: &str) -> SessionState {
    let state = settled(path);
    let (state, _) = update(
        state,
        Msg::Classified {
            path: path.to_string(),
            is_article: true,
        },
    );
    let (state, _) = update(
        state,
        Msg::ContentLoaded {
            path: path.to_string(),
            paragraphs: 3,
        },
    );
    state
}

#[test]
fn navigation_schedules_settle_then_classifies() {
    init_logging();
    let (state, effects) = update(
        SessionState::new(),
        Msg::Navigated("https://x.com/alice/status/1?s=20".to_string()),
    );
    assert_eq!(
        effects,
        vec![Effect::ScheduleSettle {
            delay_ms: SETTLE_DELAY_MS
        }]
    );
    assert_eq!(state.view().phase, Phase::Settling);
    assert_eq!(state.view().path.as_deref(), Some("/alice/status/1"));

    let (state, effects) = update(state, Msg::SettleElapsed);
    assert_eq!(effects, vec![classify("/alice/status/1")]);
    assert_eq!(state.view().phase, Phase::Watching);
}

#[test]
fn polling_is_ignored_until_settled() {
    init_logging();
    let (state, _) = update(SessionState::new(), Msg::PollTick);
    assert_eq!(state.view().phase, Phase::Idle);

    let (state, effects) = update(state, Msg::Navigated("/alice/status/1".to_string()));
    assert_eq!(effects.len(), 1);
    let (_, effects) = update(state, Msg::PollTick);
    assert!(effects.is_empty());
}

#[test]
fn same_path_navigation_is_a_noop() {
    init_logging();
    let state = settled("/alice/status/1");
    let (next, effects) = update(state.clone(), Msg::Navigated("/alice/status/1/#reply".to_string()));
    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn positive_verdict_extracts_and_offers_once() {
    init_logging();
    let state = settled("/alice/status/1");
    let (state, effects) = update(
        state,
        Msg::Classified {
            path: "/alice/status/1".to_string(),
            is_article: true,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Extract {
            path: "/alice/status/1".to_string()
        }]
    );

    let (state, effects) = update(
        state,
        Msg::ContentLoaded {
            path: "/alice/status/1".to_string(),
            paragraphs: 4,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::OfferReader {
            path: "/alice/status/1".to_string()
        }]
    );
    assert!(state.view().reader_offered);

    // Polling keeps classifying but an offered page is not re-extracted.
    let (state, effects) = update(state, Msg::PollTick);
    assert_eq!(effects, vec![classify("/alice/status/1")]);
    let (_, effects) = update(
        state,
        Msg::Classified {
            path: "/alice/status/1".to_string(),
            is_article: true,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn empty_content_is_reported_once_and_watching_continues() {
    init_logging();
    let state = settled("/alice/status/1");
    let loaded = || Msg::ContentLoaded {
        path: "/alice/status/1".to_string(),
        paragraphs: 0,
    };

    let (state, effects) = update(state, loaded());
    assert_eq!(
        effects,
        vec![Effect::ReportNoContent {
            path: "/alice/status/1".to_string()
        }]
    );
    assert_eq!(state.view().phase, Phase::Watching);

    let (state, effects) = update(state, loaded());
    assert!(effects.is_empty());

    let (_, effects) = update(state, Msg::PollTick);
    assert_eq!(effects, vec![classify("/alice/status/1")]);
}

#[test]
fn stale_results_are_dropped() {
    init_logging();
    let state = settled("/alice/status/1");
    let (state, _) = update(state, Msg::Navigated("/bob/status/2".to_string()));

    let (next, effects) = update(
        state.clone(),
        Msg::Classified {
            path: "/alice/status/1".to_string(),
            is_article: true,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(next, state);

    let (next, effects) = update(
        state.clone(),
        Msg::ContentLoaded {
            path: "/alice/status/1".to_string(),
            paragraphs: 9,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn leaving_an_offered_page_withdraws_the_reader() {
    init_logging();
    let state = offered("/alice/status/1");
    let (state, effects) = update(state, Msg::Navigated("/home".to_string()));
    assert_eq!(
        effects,
        vec![
            Effect::WithdrawReader,
            Effect::ScheduleSettle {
                delay_ms: SETTLE_DELAY_MS
            },
        ]
    );
    assert!(!state.view().reader_offered);
}

#[test]
fn negative_verdict_while_offered_withdraws() {
    init_logging();
    let state = offered("/alice/status/1");
    let (state, effects) = update(
        state,
        Msg::Classified {
            path: "/alice/status/1".to_string(),
            is_article: false,
        },
    );
    assert_eq!(effects, vec![Effect::WithdrawReader]);
    assert_eq!(state.view().phase, Phase::Watching);
}
