//! Recognizer fed through a broadcast channel
//!
//! Whatever produces recognition results (a console, a socket bridge to the
//! headset, a test) pushes them in with `submit_*`; subscribers receive them
//! as `RecognizerEvent`s.

use crate::intent::event::{RecognitionError, RecognitionPayload, RecognizerEvent};
use crate::recognizer::{Recognizer, RecognizerRx};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::broadcast;

pub const DEFAULT_CAPACITY: usize = 32;

#[derive(Debug)]
pub struct ChannelRecognizer {
    tx: broadcast::Sender<RecognizerEvent>,
    active: AtomicBool,
    activations: AtomicU64,
}

impl Default for ChannelRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ChannelRecognizer {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            active: AtomicBool::new(false),
            activations: AtomicU64::new(0),
        }
    }

    /// Deliver a recognition result, ending the current activation
    ///
    /// Returns `false` and drops the payload when the recognizer is not
    /// listening, since nothing would have been heard.
    pub fn submit_result(&self, payload: RecognitionPayload) -> bool {
        if !self.active.swap(false, Ordering::SeqCst) {
            tracing::warn!("recognizer not listening, dropped: {:?}", payload.text);
            return false;
        }
        self.publish(RecognizerEvent::Result(payload));
        true
    }

    /// Deliver an error; errors end any activation and are always published
    pub fn submit_error(&self, error: RecognitionError) {
        self.active.store(false, Ordering::SeqCst);
        self.publish(RecognizerEvent::Error(error));
    }

    /// Close the microphone without producing an event
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// How many times listening has actually been started
    pub fn activation_count(&self) -> u64 {
        self.activations.load(Ordering::SeqCst)
    }

    fn publish(&self, event: RecognizerEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("no subscribers for recognizer event");
        }
    }
}

impl Recognizer for ChannelRecognizer {
    fn start_listening(&self) {
        if !self.active.swap(true, Ordering::SeqCst) {
            self.activations.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> RecognizerRx {
        self.tx.subscribe()
    }
}
