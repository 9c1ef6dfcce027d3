//! Voice session - wires the recognizer, the router and the host together
//!
//! `start()` subscribes to the recognizer and spawns the event loop; each
//! event is routed and followed by a delayed re-arm of the microphone.
//! `stop()` tears the loop down and drops any pending re-arm.

use crate::command::router::{IntentRouter, RoutingResult};
use crate::core::error::{DispatchError, Result};
use crate::intent::event::{IntentEvent, RecognizerEvent};
use crate::recognizer::Recognizer;
use crate::session::rearm::ReArmScheduler;
use crate::session::state::{ListeningState, SessionState};
use crate::ui::{show, MessageSink};
use crate::world::SceneHost;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

pub const LISTENING: &str = "🎤 Listening...";

/// Everything touched while routing, behind one lock
struct SessionCore<H, S> {
    router: IntentRouter,
    state: SessionState,
    host: H,
    sink: S,
}

impl<H: SceneHost, S: MessageSink> SessionCore<H, S> {
    fn dispatch(&mut self, event: RecognizerEvent) -> RoutingResult {
        let SessionCore {
            router,
            state,
            host,
            sink,
        } = self;

        match event {
            RecognizerEvent::Result(payload) => {
                let event = IntentEvent::from_payload(&payload);
                router.route(state, &event, host, sink)
            }
            RecognizerEvent::Error(error) => router.route_error(&error, sink),
        }
    }
}

/// Shared handles needed to process one event, cloned into the event loop
struct Pipeline<H, S> {
    core: Arc<Mutex<SessionCore<H, S>>>,
    recognizer: Arc<dyn Recognizer>,
    rearm: ReArmScheduler,
    listen_delay: Duration,
}

impl<H, S> Clone for Pipeline<H, S> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            recognizer: Arc::clone(&self.recognizer),
            rearm: self.rearm.clone(),
            listen_delay: self.listen_delay,
        }
    }
}

impl<H, S> Pipeline<H, S>
where
    H: SceneHost + Send + 'static,
    S: MessageSink + Send + 'static,
{
    fn process(&self, event: RecognizerEvent) -> RoutingResult {
        // A new event supersedes any re-arm still waiting
        self.rearm.cancel();

        let result = lock(&self.core).dispatch(event);

        let core = Arc::clone(&self.core);
        let recognizer = Arc::clone(&self.recognizer);
        self.rearm
            .schedule(self.listen_delay, move || activate(recognizer.as_ref(), core.as_ref()));

        result
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Start listening unless the recognizer already is
fn activate<H, S: MessageSink>(recognizer: &dyn Recognizer, core: &Mutex<SessionCore<H, S>>) {
    if recognizer.is_active() {
        tracing::debug!("recognizer already active");
        return;
    }
    recognizer.start_listening();
    show(&mut lock(core).sink, LISTENING);
}

/// A running voice-command session
pub struct VoiceSession<H, S> {
    pipeline: Pipeline<H, S>,
    listen_task: Option<JoinHandle<()>>,
}

impl<H, S> VoiceSession<H, S>
where
    H: SceneHost + Send + 'static,
    S: MessageSink + Send + 'static,
{
    /// Create a stopped session; the re-arm delay comes from the router config
    pub fn new(router: IntentRouter, recognizer: Arc<dyn Recognizer>, host: H, sink: S) -> Self {
        let listen_delay = router.config().listen_delay();
        Self {
            pipeline: Pipeline {
                core: Arc::new(Mutex::new(SessionCore {
                    router,
                    state: SessionState::new(),
                    host,
                    sink,
                })),
                recognizer,
                rearm: ReArmScheduler::new(),
                listen_delay,
            },
            listen_task: None,
        }
    }

    /// Subscribe to the recognizer and start listening
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<()> {
        if self.listen_task.is_some() {
            return Err(DispatchError::AlreadyRunning);
        }

        let mut rx = self.pipeline.recognizer.subscribe();
        let pipeline = self.pipeline.clone();
        self.listen_task = Some(tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        pipeline.process(event);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("voice session lagged, {} events skipped", skipped);
                    }
                    Err(RecvError::Closed) => {
                        tracing::info!("recognizer event source closed");
                        break;
                    }
                }
            }
        }));

        tracing::info!("voice session started");
        activate(self.pipeline.recognizer.as_ref(), self.pipeline.core.as_ref());
        Ok(())
    }

    /// Unsubscribe and drop any pending re-arm
    pub fn stop(&mut self) -> Result<()> {
        let task = self.listen_task.take().ok_or(DispatchError::NotRunning)?;
        task.abort();
        self.pipeline.rearm.cancel();
        tracing::info!("voice session stopped");
        Ok(())
    }

    /// Route one event directly, bypassing the subscription
    ///
    /// A stopped session ignores the event and returns `Unhandled`.
    pub fn handle_event(&self, event: RecognizerEvent) -> RoutingResult {
        if !self.is_running() {
            tracing::debug!("voice session stopped, ignoring {:?}", event);
            return RoutingResult::Unhandled;
        }
        self.pipeline.process(event)
    }
}

impl<H, S> VoiceSession<H, S> {
    pub fn is_running(&self) -> bool {
        self.listen_task.is_some()
    }

    pub fn listening_state(&self) -> ListeningState {
        ListeningState::from_active(self.pipeline.recognizer.is_active())
    }

    pub fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(&lock(&self.pipeline.core).host)
    }

    pub fn with_sink<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.pipeline.core).sink)
    }

    pub fn session_state(&self) -> SessionState {
        lock(&self.pipeline.core).state.clone()
    }
}

impl<H, S> Drop for VoiceSession<H, S> {
    fn drop(&mut self) {
        if let Some(task) = self.listen_task.take() {
            task.abort();
        }
        self.pipeline.rearm.cancel();
    }
}
