//! Canned replies for informational intents

use crate::core::config::{RouterConfig, DEFAULT_FALLBACK_REPLY};
use ahash::AHashMap;

/// Built-in answers for the fire-drill incident scenario
const BUILTIN_REPLIES: &[(&str, &str)] = &[
    ("greet_user", "Hello! How can I help you today?"),
    (
        "Get_Regulations",
        "Fire safety regulations require clear exits, alarms tested, and extinguishers ready.",
    ),
    (
        "Get_Timeline",
        "Timeline: Step 1 - Report issue, Step 2 - Investigation, Step 3 - Resolution.",
    ),
    ("Get_Cause", "The incident was caused by a pressure valve failure."),
    (
        "Get_Incident_Overview",
        "It was a small fire, quickly contained, no casualties.",
    ),
    (
        "Get_Human_Factors",
        "Human error contributed — inspection was delayed by 3 days.",
    ),
    ("Get_Safety_Systems", "Sprinklers, alarms, and fire doors were active."),
    (
        "Get_Emergency_Response",
        "Emergency team arrived in 3 minutes and evacuated everyone.",
    ),
    (
        "Get_Rescue_Info",
        "Five people were rescued by the on-site safety team.",
    ),
    (
        "Get_Safety_Case_Info",
        "Safety case says plant can keep running with stricter inspections.",
    ),
    (
        "Get_Aftermath",
        "Weekly safety drills were scheduled after the incident.",
    ),
    (
        "Get_Findings",
        "Report found missing maintenance checks as root cause.",
    ),
    (
        "Get_Lessons_Learned",
        "Lesson: Never delay inspections and always check safety valves.",
    ),
    (
        "Get_Glossary_Term",
        "A vessel is a container designed to hold fluids or gases under pressure.",
    ),
];

/// Intent name -> reply text, plus the fallback for everything else
#[derive(Debug, Clone)]
pub struct ReplyTable {
    entries: AHashMap<String, String>,
    fallback: String,
}

impl Default for ReplyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReplyTable {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_REPLIES
                .iter()
                .map(|(intent, text)| (intent.to_string(), text.to_string()))
                .collect(),
            fallback: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }

    /// Built-in table with the config's overrides and fallback applied
    pub fn from_config(config: &RouterConfig) -> Self {
        let mut table = Self::builtin();
        for (intent, text) in &config.replies {
            table.insert(intent, text);
        }
        table.fallback = config.fallback_reply.clone();
        table
    }

    pub fn insert(&mut self, intent: &str, text: &str) {
        self.entries.insert(intent.to_string(), text.to_string());
    }

    /// Exact, case-sensitive lookup
    pub fn lookup(&self, intent: Option<&str>) -> Option<&str> {
        intent.and_then(|name| self.entries.get(name)).map(String::as_str)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn contains(&self, intent: &str) -> bool {
        self.entries.contains_key(intent)
    }

    pub fn intents(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
