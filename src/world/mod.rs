//! Host world - the engine side the router drives
//!
//! The router never touches rendering or scene content; it asks the host to
//! move the player, switch scenes, change time scale or quit.

pub mod sim;

pub use sim::{HostCall, SimWorld};

use glam::{Quat, Vec3};

/// Scene and application control exposed by the host engine
pub trait SceneHost {
    /// Whether a player rig is being tracked
    fn has_player(&self) -> bool;

    fn move_player_to(&mut self, position: Vec3, orientation: Quat);

    /// Replace the active scene
    fn load_scene(&mut self, name: &str);

    fn reload_current_scene(&mut self);

    /// Whether `name` can be loaded in this build
    fn scene_exists(&self, name: &str) -> bool;

    /// 0.0 freezes the simulation, 1.0 is real time
    fn set_time_scale(&mut self, scale: f32);

    fn quit_application(&mut self);
}
