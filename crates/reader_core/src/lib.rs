//! Reader core: pure session state machine for the reader host.
mod effect;
mod msg;
mod state;
mod update;

pub use effect::{Effect, POLL_INTERVAL_MS, SETTLE_DELAY_MS};
pub use msg::Msg;
pub use state::{normalize_path, Phase, SessionState, SessionView};
pub use update::update;
