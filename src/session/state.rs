//! Per-session mutable state

/// State carried between routing calls
///
/// Owned by the caller and handed to the router explicitly, so routing
/// stays a plain function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    last_reply: String,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent informational reply, if any was given
    pub fn last_reply(&self) -> Option<&str> {
        if self.last_reply.is_empty() {
            None
        } else {
            Some(&self.last_reply)
        }
    }

    pub fn remember(&mut self, reply: &str) {
        self.last_reply.clear();
        self.last_reply.push_str(reply);
    }
}

/// Whether the recognizer currently has the microphone open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListeningState {
    Listening,
    Idle,
}

impl ListeningState {
    pub fn from_active(active: bool) -> Self {
        if active {
            Self::Listening
        } else {
            Self::Idle
        }
    }
}
