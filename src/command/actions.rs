//! Action intents - intents with a world or application side effect
//!
//! Each action is a named handler in an `ActionTable`. The built-in table
//! covers navigation, scene control, simulation time, exit, the placeholder
//! acknowledgements and repeating the last answer; hosts can register more.

use crate::command::scene::select_scene;
use crate::core::config::RouterConfig;
use crate::session::state::SessionState;
use crate::ui::{show, MessageSink};
use crate::world::SceneHost;
use ahash::AHashMap;

pub const TELEPORT_FAILED: &str = "⚠️ Teleport failed: PlayerRoot or target not set.";
pub const RESTARTING_SCENE: &str = "🔁 Restarting Scene...";
pub const SIMULATION_PAUSED: &str = "⏸ Simulation Paused.";
pub const SIMULATION_RESUMED: &str = "▶ Simulation Resumed.";
pub const EXITING: &str = "👋 Exiting Application...";
pub const REPEAT_PREFIX: &str = "🔁 ";
pub const NOTHING_TO_REPEAT: &str = "No previous answer to repeat.";

/// Everything a handler may read or drive
pub struct ActionContext<'a> {
    /// Lowercased transcript of the utterance
    pub transcript: &'a str,
    pub session: &'a SessionState,
    pub config: &'a RouterConfig,
    pub host: &'a mut dyn SceneHost,
    pub sink: &'a mut dyn MessageSink,
}

pub type ActionHandler = Box<dyn Fn(&mut ActionContext<'_>) + Send + Sync>;

/// Action intent name -> handler, matched exactly
pub struct ActionTable {
    handlers: AHashMap<String, ActionHandler>,
}

impl std::fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("ActionTable").field("actions", &names).finish()
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ActionTable {
    pub fn empty() -> Self {
        Self {
            handlers: AHashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut table = Self::empty();

        // Teleports
        table.register("Navigate_ControlRoom", navigate("ControlRoom"));
        table.register("Navigate_HeliDeck", navigate("HeliDeck"));
        table.register("Navigate_LivingQuarters", navigate("LivingQuarters"));

        // Scenes
        table.register("Load_Scene", Box::new(load_scene));
        table.register("Restart_Scene", Box::new(restart_scene));

        // Simulation control
        table.register("Pause_Simulation", time_scale(0.0, SIMULATION_PAUSED));
        table.register("Resume_Simulation", time_scale(1.0, SIMULATION_RESUMED));
        table.register("Exit_App", Box::new(exit_app));

        // Interactive features not wired to the scene yet
        table.register(
            "Highlight_Module",
            acknowledge("✨ Highlighting Module (placeholder)"),
        );
        table.register(
            "Toggle_Annotations",
            acknowledge("📝 Toggling annotations (placeholder)"),
        );
        table.register(
            "Play_Simulation",
            acknowledge("▶ Playing simulation (placeholder)"),
        );
        table.register(
            "Stop_Simulation",
            acknowledge("⏹ Stopping simulation (placeholder)"),
        );

        table.register("Repeat_Last_Answer", Box::new(repeat_last_answer));

        table
    }

    /// Add or replace the handler for an intent
    pub fn register(&mut self, intent: &str, handler: ActionHandler) {
        self.handlers.insert(intent.to_string(), handler);
    }

    pub fn get(&self, intent: &str) -> Option<&ActionHandler> {
        self.handlers.get(intent)
    }

    pub fn contains(&self, intent: &str) -> bool {
        self.handlers.contains_key(intent)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

fn navigate(target: &'static str) -> ActionHandler {
    Box::new(move |ctx: &mut ActionContext<'_>| teleport(ctx, target))
}

fn teleport(ctx: &mut ActionContext<'_>, target: &str) {
    let preset = ctx.config.teleports.get(target);
    let preset = match preset {
        Some(preset) if ctx.host.has_player() => preset,
        _ => {
            tracing::warn!(
                target_preset = target,
                has_player = ctx.host.has_player(),
                "teleport target unresolved"
            );
            show(ctx.sink, TELEPORT_FAILED);
            return;
        }
    };

    let pose = preset.pose();
    ctx.host.move_player_to(pose.position, pose.orientation);
    show(ctx.sink, &format!("🗺️ Teleported to {}", preset.name));
}

fn load_scene(ctx: &mut ActionContext<'_>) {
    let scene = select_scene(
        ctx.transcript,
        &ctx.config.scene_rules,
        &ctx.config.fallback_scene,
    );

    if ctx.host.scene_exists(scene) {
        show(ctx.sink, &format!("📦 Loading {}...", scene));
        ctx.host.load_scene(scene);
    } else {
        tracing::error!("Scene '{}' not found in Build Settings!", scene);
        show(ctx.sink, &format!("❌ Scene '{}' not found in Build Settings!", scene));
    }
}

fn restart_scene(ctx: &mut ActionContext<'_>) {
    show(ctx.sink, RESTARTING_SCENE);
    ctx.host.reload_current_scene();
}

fn time_scale(scale: f32, message: &'static str) -> ActionHandler {
    Box::new(move |ctx: &mut ActionContext<'_>| {
        ctx.host.set_time_scale(scale);
        show(ctx.sink, message);
    })
}

fn exit_app(ctx: &mut ActionContext<'_>) {
    show(ctx.sink, EXITING);
    ctx.host.quit_application();
}

fn acknowledge(message: &'static str) -> ActionHandler {
    Box::new(move |ctx: &mut ActionContext<'_>| show(ctx.sink, message))
}

fn repeat_last_answer(ctx: &mut ActionContext<'_>) {
    match ctx.session.last_reply() {
        Some(reply) => show(ctx.sink, &format!("{}{}", REPEAT_PREFIX, reply)),
        None => show(ctx.sink, NOTHING_TO_REPEAT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TeleportPreset;
    use crate::ui::ChatLog;
    use crate::world::{HostCall, SimWorld};

    fn run(
        intent: &str,
        transcript: &str,
        config: &RouterConfig,
        world: &mut SimWorld,
    ) -> ChatLog {
        let table = ActionTable::builtin();
        let session = SessionState::new();
        let mut log = ChatLog::new();
        let handler = table.get(intent).expect("builtin action");
        let mut ctx = ActionContext {
            transcript,
            session: &session,
            config,
            host: world,
            sink: &mut log,
        };
        handler(&mut ctx);
        log
    }

    #[test]
    fn test_builtin_action_names() {
        let table = ActionTable::builtin();
        assert_eq!(table.len(), 13);
        assert!(table.contains("Navigate_HeliDeck"));
        assert!(table.contains("Repeat_Last_Answer"));
        assert!(!table.contains("Get_Cause"));
    }

    #[test]
    fn test_teleport_with_preset() {
        let mut config = RouterConfig::default();
        config.teleports.insert(
            "HeliDeck".into(),
            TeleportPreset {
                name: "SP_HeliDeck".into(),
                position: [0.0, 12.0, 30.0],
                rotation: [0.0, 0.0, 0.0, 1.0],
            },
        );
        let mut world = SimWorld::training_build();

        let log = run("Navigate_HeliDeck", "", &config, &mut world);

        assert_eq!(log.current(), Some("🗺️ Teleported to SP_HeliDeck"));
        assert_eq!(
            world.player().map(|p| p.position),
            Some(glam::Vec3::new(0.0, 12.0, 30.0))
        );
    }

    #[test]
    fn test_teleport_without_player() {
        let mut config = RouterConfig::default();
        config.teleports.insert(
            "ControlRoom".into(),
            TeleportPreset {
                name: "SP_ControlRoom".into(),
                position: [1.0, 0.0, 1.0],
                rotation: [0.0, 0.0, 0.0, 1.0],
            },
        );
        let mut world = SimWorld::training_build().without_player();

        let log = run("Navigate_ControlRoom", "", &config, &mut world);

        assert_eq!(log.current(), Some(TELEPORT_FAILED));
        assert!(world.calls().is_empty());
    }

    #[test]
    fn test_load_missing_scene_reports_error() {
        let config = RouterConfig::default();
        let mut world = SimWorld::new(["Lobby"], "Lobby");

        let log = run("Load_Scene", "go to training area", &config, &mut world);

        assert_eq!(
            log.current(),
            Some("❌ Scene 'FireDrill' not found in Build Settings!")
        );
        assert!(world.calls().is_empty());
    }

    #[test]
    fn test_load_scene_message_precedes_switch() {
        let config = RouterConfig::default();
        let mut world = SimWorld::training_build();

        let log = run("Load_Scene", "open the menu", &config, &mut world);

        assert_eq!(log.current(), Some("📦 Loading MainMenu..."));
        assert_eq!(world.calls(), &[HostCall::LoadScene("MainMenu".into())]);
    }

    #[test]
    fn test_placeholder_has_no_effect() {
        let config = RouterConfig::default();
        let mut world = SimWorld::training_build();

        let log = run("Toggle_Annotations", "", &config, &mut world);

        assert_eq!(log.current(), Some("📝 Toggling annotations (placeholder)"));
        assert!(world.calls().is_empty());
    }

    #[test]
    fn test_register_custom_action() {
        let mut table = ActionTable::empty();
        table.register("Sound_Alarm", acknowledge("🚨 Alarm"));
        assert!(table.contains("Sound_Alarm"));
        assert_eq!(table.len(), 1);
    }
}
