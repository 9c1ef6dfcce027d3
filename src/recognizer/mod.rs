//! Speech recognizer integration
//!
//! The recognizer is an external collaborator: it owns the microphone, the
//! speech-to-text and the intent classification. The dispatcher only asks it
//! to start listening and subscribes to what it reports.

pub mod channel;

pub use channel::ChannelRecognizer;

use crate::intent::event::RecognizerEvent;
use tokio::sync::broadcast;

pub type RecognizerRx = broadcast::Receiver<RecognizerEvent>;

/// Control surface and event source of a speech recognizer
pub trait Recognizer: Send + Sync {
    /// Open the microphone for one utterance
    fn start_listening(&self);

    fn is_active(&self) -> bool;

    /// Subscribe to results and errors
    fn subscribe(&self) -> RecognizerRx;
}
