//! Command routing pipeline
//!
//! Turns a recognized intent into either an in-world action or a reply:
//! IntentEvent -> IntentRouter -> ActionTable | ReplyTable -> RoutingResult

pub mod actions;
pub mod replies;
pub mod router;
pub mod scene;

pub use actions::{ActionContext, ActionHandler, ActionTable};
pub use replies::ReplyTable;
pub use router::{IntentRouter, RoutingResult};
pub use scene::select_scene;
