//! Recognition events delivered by the speech recognizer
//!
//! The recognizer owns speech processing and intent classification; this
//! module only models what it hands back.

pub mod event;

pub use event::{
    IntentEvent, RecognitionError, RecognitionPayload, RecognizedIntent, RecognizerEvent,
};
