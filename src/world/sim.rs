//! In-memory host used by the console driver and tests

use crate::core::types::Pose;
use crate::world::SceneHost;
use ahash::AHashSet;
use glam::{Quat, Vec3};

/// A side effect requested by the router
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    MovePlayer { position: Vec3, orientation: Quat },
    LoadScene(String),
    ReloadScene,
    SetTimeScale(f32),
    Quit,
}

/// Simulated engine state
#[derive(Debug)]
pub struct SimWorld {
    player: Option<Pose>,
    build_scenes: AHashSet<String>,
    pub active_scene: String,
    pub time_scale: f32,
    pub quit_requested: bool,
    calls: Vec<HostCall>,
}

impl SimWorld {
    /// Create a world with the given scenes in the build and a player at the origin
    pub fn new<I, S>(scenes: I, active_scene: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            player: Some(Pose::default()),
            build_scenes: scenes.into_iter().map(Into::into).collect(),
            active_scene: active_scene.to_string(),
            time_scale: 1.0,
            quit_requested: false,
            calls: Vec::new(),
        }
    }

    /// The stock build: lobby, main menu and the fire drill
    pub fn training_build() -> Self {
        Self::new(["Lobby", "MainMenu", "FireDrill"], "Lobby")
    }

    pub fn without_player(mut self) -> Self {
        self.player = None;
        self
    }

    pub fn player(&self) -> Option<Pose> {
        self.player
    }

    /// Side effects requested so far, oldest first
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl SceneHost for SimWorld {
    fn has_player(&self) -> bool {
        self.player.is_some()
    }

    fn move_player_to(&mut self, position: Vec3, orientation: Quat) {
        self.calls.push(HostCall::MovePlayer {
            position,
            orientation,
        });
        if let Some(player) = self.player.as_mut() {
            *player = Pose::new(position, orientation);
        }
    }

    fn load_scene(&mut self, name: &str) {
        self.calls.push(HostCall::LoadScene(name.to_string()));
        self.active_scene = name.to_string();
    }

    fn reload_current_scene(&mut self) {
        self.calls.push(HostCall::ReloadScene);
    }

    fn scene_exists(&self, name: &str) -> bool {
        self.build_scenes.contains(name)
    }

    fn set_time_scale(&mut self, scale: f32) {
        self.calls.push(HostCall::SetTimeScale(scale));
        self.time_scale = scale;
    }

    fn quit_application(&mut self) {
        self.calls.push(HostCall::Quit);
        self.quit_requested = true;
    }
}
