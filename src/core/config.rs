//! Router configuration with documented defaults
//!
//! Everything tunable about the dispatcher lives here: the re-arm delay,
//! the scene keyword rules, teleport presets and reply overrides. Values are
//! loaded from TOML; any field left out falls back to its default.

use crate::core::error::{DispatchError, Result};
use crate::core::types::Pose;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the intent router and voice session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Seconds to wait after handling an event before listening again
    ///
    /// Gives the trainee time to read the reply before the microphone
    /// reopens. Zero re-arms on the next scheduler turn.
    pub listen_delay_secs: f32,

    /// Scene loaded by `Load_Scene` when no rule matches the transcript
    pub fallback_scene: String,

    /// Ordered keyword rules for `Load_Scene`, first match wins
    pub scene_rules: Vec<SceneRule>,

    /// Reply shown for unknown or missing intents
    pub fallback_reply: String,

    /// Extra or replacement canned replies, merged over the built-in table
    pub replies: AHashMap<String, String>,

    /// Teleport presets keyed by navigate target (`ControlRoom`, `HeliDeck`, ...)
    pub teleports: AHashMap<String, TeleportPreset>,
}

/// Maps transcript keywords to a scene name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRule {
    /// Lowercase substrings searched for in the transcript
    pub keywords: Vec<String>,
    /// Scene requested when any keyword matches
    pub scene: String,
}

impl SceneRule {
    pub fn new(keywords: &[&str], scene: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            scene: scene.to_string(),
        }
    }
}

/// A named spawn point the player can be teleported to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeleportPreset {
    /// Display name reported after a successful teleport
    pub name: String,
    pub position: [f32; 3],
    /// Quaternion as `[x, y, z, w]`
    #[serde(default = "identity_rotation")]
    pub rotation: [f32; 4],
}

fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

impl TeleportPreset {
    pub fn pose(&self) -> Pose {
        Pose::from_arrays(self.position, self.rotation)
    }
}

pub const DEFAULT_LISTEN_DELAY_SECS: f32 = 3.0;
pub const DEFAULT_FALLBACK_SCENE: &str = "FireDrill";
pub const DEFAULT_FALLBACK_REPLY: &str = "Sorry, I didn't understand that. Can you rephrase?";

/// Shortest rotation quaternion accepted for a teleport preset
const MIN_ROTATION_LENGTH: f32 = 1e-6;

/// The stock scene rules: lobby, then menu, then training/firedrill
pub fn default_scene_rules() -> Vec<SceneRule> {
    vec![
        SceneRule::new(&["lobby"], "Lobby"),
        SceneRule::new(&["menu"], "MainMenu"),
        SceneRule::new(&["training", "firedrill"], "FireDrill"),
    ]
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            listen_delay_secs: DEFAULT_LISTEN_DELAY_SECS,
            fallback_scene: DEFAULT_FALLBACK_SCENE.to_string(),
            scene_rules: default_scene_rules(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
            replies: AHashMap::new(),
            teleports: AHashMap::new(),
        }
    }
}

impl RouterConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RouterConfig = toml::from_str(content)?;
        config.validate().map_err(DispatchError::InvalidConfig)?;
        Ok(config)
    }

    /// Load and validate a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DispatchError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn listen_delay(&self) -> Duration {
        Duration::try_from_secs_f32(self.listen_delay_secs).unwrap_or(Duration::ZERO)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.listen_delay_secs.is_finite() || self.listen_delay_secs < 0.0 {
            return Err(format!(
                "listen_delay_secs ({}) must be a non-negative number",
                self.listen_delay_secs
            ));
        }
        if Duration::try_from_secs_f32(self.listen_delay_secs).is_err() {
            return Err(format!(
                "listen_delay_secs ({}) is too large",
                self.listen_delay_secs
            ));
        }

        if self.fallback_scene.trim().is_empty() {
            return Err("fallback_scene must not be empty".into());
        }

        if self.fallback_reply.trim().is_empty() {
            return Err("fallback_reply must not be empty".into());
        }

        for (i, rule) in self.scene_rules.iter().enumerate() {
            if rule.scene.trim().is_empty() {
                return Err(format!("scene_rules[{}] has an empty scene name", i));
            }
            if rule.keywords.is_empty() {
                return Err(format!("scene_rules[{}] ({}) has no keywords", i, rule.scene));
            }
            // Transcripts are lowercased before matching
            for keyword in &rule.keywords {
                if keyword.is_empty() || keyword.to_lowercase() != *keyword {
                    return Err(format!(
                        "scene_rules[{}] keyword {:?} must be non-empty lowercase",
                        i, keyword
                    ));
                }
            }
        }

        for (key, preset) in &self.teleports {
            if !preset.position.iter().chain(preset.rotation.iter()).all(|v| v.is_finite()) {
                return Err(format!("teleport preset {} has non-finite coordinates", key));
            }
            // Normalizing a zero quaternion yields NaN
            let length = preset.rotation.iter().map(|v| v * v).sum::<f32>().sqrt();
            if length < MIN_ROTATION_LENGTH {
                return Err(format!("teleport preset {} has a zero-length rotation", key));
            }
        }

        Ok(())
    }
}
