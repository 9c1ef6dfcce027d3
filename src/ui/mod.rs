//! UI module - text output for the trainee

pub mod state;

pub use state::{ChatLog, LogEntry};

/// Fire-and-forget text sink (chat box, HUD label, console)
pub trait MessageSink {
    fn display(&mut self, message: &str);
}

/// Show a message and mirror it to the diagnostic log
pub fn show(sink: &mut dyn MessageSink, message: &str) {
    tracing::info!("🤖 {}", message);
    sink.display(message);
}
