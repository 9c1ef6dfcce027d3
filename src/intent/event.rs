//! Recognizer payloads and the normalized event the router consumes

use crate::core::error::Result;
use crate::core::types::EventId;
use serde::{Deserialize, Serialize};

/// One classified intent as reported by the recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedIntent {
    /// Absent or null when the recognizer could not classify the utterance
    #[serde(default)]
    pub name: Option<String>,
    /// Recognizer confidence (0.0 - 1.0)
    #[serde(default)]
    pub confidence: f32,
}

impl RecognizedIntent {
    pub fn new(name: &str, confidence: f32) -> Self {
        Self {
            name: Some(name.to_string()),
            confidence,
        }
    }
}

/// Raw recognition response
///
/// Only `text` and `intents` are read; entities, traits and any other
/// fields the recognizer includes are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionPayload {
    #[serde(default)]
    pub text: String,
    /// Ordered by the recognizer, highest confidence first
    #[serde(default)]
    pub intents: Vec<RecognizedIntent>,
}

impl RecognitionPayload {
    pub fn new(text: impl Into<String>, intents: Vec<RecognizedIntent>) -> Self {
        Self {
            text: text.into(),
            intents,
        }
    }

    /// Payload carrying a single intent with full confidence
    pub fn single(intent: &str, text: impl Into<String>) -> Self {
        Self::new(text, vec![RecognizedIntent::new(intent, 1.0)])
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Name of the first intent in the list
    ///
    /// Ties in confidence are not re-ranked: whatever the recognizer put
    /// first is what gets routed. An unnamed first intent routes as no
    /// intent at all.
    pub fn top_intent(&self) -> Option<&str> {
        self.intents.first().and_then(|i| i.name.as_deref())
    }
}

/// Failure reported by the recognizer instead of a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionError {
    pub code: String,
    pub message: String,
}

impl RecognitionError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Human-readable description, falling back to the code
    pub fn description(&self) -> &str {
        if self.message.trim().is_empty() {
            &self.code
        } else {
            &self.message
        }
    }
}

/// Everything the recognizer can emit
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizerEvent {
    Result(RecognitionPayload),
    Error(RecognitionError),
}

/// A recognition result normalized for routing
#[derive(Debug, Clone, PartialEq)]
pub struct IntentEvent {
    pub id: EventId,
    pub intent: Option<String>,
    /// Always lowercase
    pub transcript: String,
}

impl IntentEvent {
    pub fn new(intent: Option<&str>, transcript: &str) -> Self {
        Self {
            id: EventId::new(),
            intent: intent.map(str::to_string),
            transcript: transcript.to_lowercase(),
        }
    }

    pub fn from_payload(payload: &RecognitionPayload) -> Self {
        Self::new(payload.top_intent(), &payload.text)
    }

    pub fn intent(&self) -> Option<&str> {
        self.intent.as_deref()
    }
}
