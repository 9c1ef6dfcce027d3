//! Intent routing - one decision per recognition event
//!
//! An intent is either an action (looked up in the `ActionTable` and run for
//! its side effect) or informational (answered from the `ReplyTable`).
//! Anything unknown gets the fallback reply.

use crate::command::actions::{ActionContext, ActionTable};
use crate::command::replies::ReplyTable;
use crate::core::config::RouterConfig;
use crate::intent::event::{IntentEvent, RecognitionError};
use crate::session::state::SessionState;
use crate::ui::{show, MessageSink};
use crate::world::SceneHost;

/// Outcome of routing one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingResult {
    /// An action intent ran; its messages went straight to the sink
    ActionHandled,
    /// Informational, fallback or error text that was displayed
    Reply(String),
    /// The event was not routed at all (session stopped)
    Unhandled,
}

/// Maps recognized intents to actions or canned replies
#[derive(Debug)]
pub struct IntentRouter {
    config: RouterConfig,
    actions: ActionTable,
    replies: ReplyTable,
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

impl IntentRouter {
    /// Router with the built-in actions and the config's reply table
    pub fn new(config: RouterConfig) -> Self {
        let replies = ReplyTable::from_config(&config);
        Self::with_tables(config, ActionTable::builtin(), replies)
    }

    pub fn with_tables(config: RouterConfig, actions: ActionTable, replies: ReplyTable) -> Self {
        Self {
            config,
            actions,
            replies,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    pub fn replies(&self) -> &ReplyTable {
        &self.replies
    }

    /// Route a recognized intent
    ///
    /// Action intents run their handler and leave `session` untouched.
    /// Informational intents display their reply and remember it; the
    /// fallback reply is displayed but never remembered.
    pub fn route<'a>(
        &'a self,
        session: &'a mut SessionState,
        event: &'a IntentEvent,
        host: &'a mut dyn SceneHost,
        sink: &'a mut dyn MessageSink,
    ) -> RoutingResult {
        tracing::debug!(event = %event.id, "🎯 Intent Detected: {:?}", event.intent());
        tracing::debug!(event = %event.id, "🗣️ Spoken Text: {}", event.transcript);

        if let Some(handler) = event.intent().and_then(|name| self.actions.get(name)) {
            let mut ctx = ActionContext {
                transcript: &event.transcript,
                session,
                config: &self.config,
                host,
                sink,
            };
            handler(&mut ctx);
            return RoutingResult::ActionHandled;
        }

        match self.replies.lookup(event.intent()) {
            Some(reply) => {
                show(sink, reply);
                session.remember(reply);
                RoutingResult::Reply(reply.to_string())
            }
            None => {
                let fallback = self.replies.fallback();
                show(sink, fallback);
                RoutingResult::Reply(fallback.to_string())
            }
        }
    }

    /// Report a recognizer failure; no session state changes
    pub fn route_error(
        &self,
        error: &RecognitionError,
        sink: &mut dyn MessageSink,
    ) -> RoutingResult {
        tracing::warn!(code = %error.code, "recognizer error: {}", error.message);
        let text = format!("❌ Error: {}", error.description());
        show(sink, &text);
        RoutingResult::Reply(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::actions::{NOTHING_TO_REPEAT, SIMULATION_PAUSED, TELEPORT_FAILED};
    use crate::core::config::DEFAULT_FALLBACK_REPLY;
    use crate::ui::ChatLog;
    use crate::world::{HostCall, SimWorld};

    const CAUSE: &str = "The incident was caused by a pressure valve failure.";

    struct Fixture {
        router: IntentRouter,
        session: SessionState,
        world: SimWorld,
        log: ChatLog,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                router: IntentRouter::default(),
                session: SessionState::new(),
                world: SimWorld::training_build(),
                log: ChatLog::new(),
            }
        }

        fn say(&mut self, intent: Option<&str>, text: &str) -> RoutingResult {
            let event = IntentEvent::new(intent, text);
            self.router
                .route(&mut self.session, &event, &mut self.world, &mut self.log)
        }
    }

    #[test]
    fn test_reply_intent_remembered() {
        let mut fx = Fixture::new();
        let result = fx.say(Some("Get_Cause"), "what caused it");
        assert_eq!(result, RoutingResult::Reply(CAUSE.to_string()));
        assert_eq!(fx.session.last_reply(), Some(CAUSE));
        assert_eq!(fx.log.current(), Some(CAUSE));
    }

    #[test]
    fn test_missing_intent_gets_fallback() {
        let mut fx = Fixture::new();
        let result = fx.say(None, "mumble");
        assert_eq!(result, RoutingResult::Reply(DEFAULT_FALLBACK_REPLY.to_string()));
        assert_eq!(fx.session.last_reply(), None);
    }

    #[test]
    fn test_action_leaves_session_untouched() {
        let mut fx = Fixture::new();
        fx.say(Some("Get_Cause"), "");
        let result = fx.say(Some("Pause_Simulation"), "pause");
        assert_eq!(result, RoutingResult::ActionHandled);
        assert_eq!(fx.session.last_reply(), Some(CAUSE));
        assert_eq!(fx.world.calls(), &[HostCall::SetTimeScale(0.0)]);
        assert_eq!(fx.log.current(), Some(SIMULATION_PAUSED));
    }

    #[test]
    fn test_repeat_before_any_reply() {
        let mut fx = Fixture::new();
        assert_eq!(fx.say(Some("Repeat_Last_Answer"), ""), RoutingResult::ActionHandled);
        assert_eq!(fx.log.current(), Some(NOTHING_TO_REPEAT));
    }

    #[test]
    fn test_repeat_after_reply() {
        let mut fx = Fixture::new();
        fx.say(Some("Get_Cause"), "");
        fx.say(Some("Repeat_Last_Answer"), "say that again");
        let shown = fx.log.current().unwrap_or_default();
        assert!(shown.contains(CAUSE));
        assert!(shown.starts_with("🔁 "));
    }

    #[test]
    fn test_navigate_unset_target_warns() {
        let mut fx = Fixture::new();
        let before = fx.world.player();
        assert_eq!(fx.say(Some("Navigate_ControlRoom"), ""), RoutingResult::ActionHandled);
        assert_eq!(fx.log.current(), Some(TELEPORT_FAILED));
        assert_eq!(fx.world.player(), before);
        assert!(fx.world.calls().is_empty());
    }

    #[test]
    fn test_transcript_case_ignored_for_scenes() {
        let mut fx = Fixture::new();
        fx.say(Some("Load_Scene"), "Take me to the LOBBY");
        assert_eq!(fx.world.calls(), &[HostCall::LoadScene("Lobby".into())]);
    }

    #[test]
    fn test_error_reply() {
        let mut fx = Fixture::new();
        fx.say(Some("Get_Cause"), "");
        let error = RecognitionError::new("NO_SPEECH", "no speech detected");
        let result = fx.router.route_error(&error, &mut fx.log);
        assert_eq!(
            result,
            RoutingResult::Reply("❌ Error: no speech detected".to_string())
        );
        assert_eq!(fx.session.last_reply(), Some(CAUSE));
    }

    #[test]
    fn test_config_reply_override() {
        let mut config = RouterConfig::default();
        config
            .replies
            .insert("Get_Muster_Point".into(), "Lifeboat station B.".into());
        let mut fx = Fixture::new();
        fx.router = IntentRouter::new(config);
        assert_eq!(
            fx.say(Some("Get_Muster_Point"), ""),
            RoutingResult::Reply("Lifeboat station B.".to_string())
        );
    }

    #[test]
    fn test_action_shadows_reply() {
        let mut replies = ReplyTable::builtin();
        replies.insert("Exit_App", "should never be shown");
        let router =
            IntentRouter::with_tables(RouterConfig::default(), ActionTable::builtin(), replies);
        let mut fx = Fixture::new();
        fx.router = router;
        assert_eq!(fx.say(Some("Exit_App"), ""), RoutingResult::ActionHandled);
        assert!(fx.world.quit_requested);
    }
}
