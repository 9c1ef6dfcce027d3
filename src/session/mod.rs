//! Voice session lifecycle: state, re-arm scheduling and the event loop

pub mod dispatcher;
pub mod rearm;
pub mod state;

pub use dispatcher::{VoiceSession, LISTENING};
pub use rearm::ReArmScheduler;
pub use state::{ListeningState, SessionState};
