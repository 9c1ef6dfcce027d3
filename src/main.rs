//! Drill Voice - Console Driver
//!
//! Stands in for the headset: each line typed on stdin is fed to the
//! recognizer as if it had been spoken, and routed replies are printed.

use drill_voice::command::IntentRouter;
use drill_voice::core::error::{DispatchError, Result};
use drill_voice::core::RouterConfig;
use drill_voice::intent::{RecognitionError, RecognitionPayload};
use drill_voice::recognizer::{ChannelRecognizer, Recognizer};
use drill_voice::session::VoiceSession;
use drill_voice::ui::MessageSink;
use drill_voice::world::SimWorld;

use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_CONFIG: &str = "data/router.toml";

/// Voice command dispatcher console
#[derive(Parser, Debug)]
#[command(name = "drill-voice")]
#[command(about = "Route recognized voice intents for the VR fire-drill trainer")]
struct Args {
    /// Router config (TOML); defaults to data/router.toml when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the re-arm delay in seconds
    #[arg(long)]
    listen_delay: Option<f32>,

    /// Scenes available in the build (repeatable)
    #[arg(long = "scene", default_values = ["Lobby", "MainMenu", "FireDrill"])]
    scenes: Vec<String>,

    /// Simulate a missing player rig
    #[arg(long)]
    no_player: bool,
}

/// Prints the chat box to stdout
struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn display(&mut self, message: &str) {
        println!("  {}", message);
    }
}

/// One line of console input
#[derive(Debug, PartialEq)]
enum ConsoleInput {
    Utterance(RecognitionPayload),
    Error(RecognitionError),
    Quit,
    Empty,
}

/// Parse `Intent_Name: transcript`, a raw JSON payload, `!error <code> <message>` or `quit`
fn parse_line(line: &str) -> Result<ConsoleInput> {
    let line = line.trim();

    if line.is_empty() {
        return Ok(ConsoleInput::Empty);
    }
    if line == "quit" || line == "q" {
        return Ok(ConsoleInput::Quit);
    }
    if line.starts_with('{') {
        return Ok(ConsoleInput::Utterance(RecognitionPayload::from_json(line)?));
    }
    if let Some(rest) = line.strip_prefix("!error") {
        let rest = rest.trim();
        let (code, message) = rest.split_once(' ').unwrap_or((rest, ""));
        return Ok(ConsoleInput::Error(RecognitionError::new(code, message.trim())));
    }

    let payload = match line.split_once(':') {
        Some((intent, text)) if !intent.trim().is_empty() => {
            RecognitionPayload::single(intent.trim(), text.trim())
        }
        Some((_, text)) => RecognitionPayload::new(text.trim(), Vec::new()),
        None => RecognitionPayload::single(line, ""),
    };
    Ok(ConsoleInput::Utterance(payload))
}

fn load_config(args: &Args) -> Result<RouterConfig> {
    let mut config = match &args.config {
        Some(path) => RouterConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => {
            RouterConfig::load(Path::new(DEFAULT_CONFIG))?
        }
        None => {
            tracing::warn!("{} not found - using built-in defaults", DEFAULT_CONFIG);
            RouterConfig::default()
        }
    };

    if let Some(delay) = args.listen_delay {
        config.listen_delay_secs = delay;
        config
            .validate()
            .map_err(DispatchError::InvalidConfig)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("drill_voice=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    tracing::info!(
        "Drill Voice starting (listen delay {:.1}s, {} teleport presets)",
        config.listen_delay_secs,
        config.teleports.len()
    );

    let mut world = SimWorld::new(args.scenes.iter().cloned(), "Lobby");
    if args.no_player {
        world = world.without_player();
    }

    let recognizer = Arc::new(ChannelRecognizer::default());
    let shared: Arc<dyn Recognizer> = recognizer.clone();
    let mut session = VoiceSession::new(IntentRouter::new(config), shared, world, ConsoleSink);

    println!("\n=== DRILL VOICE ===");
    println!("Type what the recognizer would report:");
    println!("  <Intent_Name>: <transcript>   e.g. Load_Scene: take me to the lobby");
    println!("  {{\"text\": ..., \"intents\": [...]}}  raw recognizer JSON");
    println!("  !error <code> <message>       simulate a recognizer failure");
    println!("  quit / q                      exit");
    println!();

    session.start()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(ConsoleInput::Empty) => continue,
            Ok(ConsoleInput::Quit) => break,
            Ok(ConsoleInput::Utterance(payload)) => {
                if !recognizer.submit_result(payload) {
                    println!("  (not listening yet - wait for 🎤)");
                }
            }
            Ok(ConsoleInput::Error(error)) => recognizer.submit_error(error),
            Err(e) => println!("  Could not parse input: {}", e),
        }

        // Let the event loop route before checking for exit
        tokio::time::sleep(Duration::from_millis(50)).await;
        if session.with_host(|world| world.quit_requested) {
            break;
        }
    }

    session.stop()?;
    let (scene, time_scale) =
        session.with_host(|world| (world.active_scene.clone(), world.time_scale));
    println!("\nGoodbye! Final scene: {}, time scale {:.1}.", scene, time_scale);
    Ok(())
}
