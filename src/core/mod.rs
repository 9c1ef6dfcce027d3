pub mod config;
pub mod error;
pub mod types;

pub use config::{RouterConfig, SceneRule, TeleportPreset};
pub use types::{EventId, Pose};
