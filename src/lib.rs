//! Drill Voice - voice command dispatcher for VR fire-drill training

pub mod command;
pub mod core;
pub mod intent;
pub mod recognizer;
pub mod session;
pub mod ui;
pub mod world;
