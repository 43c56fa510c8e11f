//! Oracle conversation flow: states, per-user sessions, validators, report and the transition engine.

mod engine;
mod event;
mod report;
mod session;
mod state;
mod store;
pub mod texts;
mod validators;

pub use engine::{
    FlowEngine, FlowSettings, DEFAULT_GREETING_DELAY_MS, DEFAULT_REPORT_CHANNEL_ID,
    DEFAULT_SEGMENT_DELAY_MS,
};
pub use event::Event;
pub use report::compose_report;
pub use session::{PredictionRecord, UserSession};
pub use state::ConversationState;
pub use store::{SessionHandle, SessionStore};
pub use validators::{is_valid_email, is_valid_name, is_valid_phone};
