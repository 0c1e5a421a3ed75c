//! boardside - play chess against a UCI engine from the terminal
//!
//! Startup order: settings file, command-line overrides, logging, engine
//! process, controller, then the session loop until the user quits.

use anyhow::Context;
use boardside::core::logging::init_logging;
use boardside::core::settings_persistence::{load_settings, save_settings};
use boardside::core::GameSettings;
use boardside::game::ai::UciProcess;
use boardside::game::rules::ShakmatyRules;
use boardside::game::{Controller, ControllerOptions, Session, SessionEnd};
use boardside::ui::terminal::{read_commands, HELP};
use boardside::ui::TerminalView;
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "boardside", version, about = "Play chess against a UCI engine")]
struct Cli {
    /// UCI engine binary
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Difficulty: 1 easy, 2 medium, 3 hard
    #[arg(long)]
    level: Option<i64>,

    /// Engine skill level (0-20)
    #[arg(long)]
    skill: Option<u8>,

    /// Pause before the computer starts thinking, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Store the resulting settings as the new defaults
    #[arg(long)]
    save_settings: bool,
}

impl Cli {
    fn apply(&self, mut settings: GameSettings) -> GameSettings {
        if let Some(engine) = &self.engine {
            settings.engine_path = engine.clone();
        }
        if let Some(level) = self.level {
            settings.difficulty = level;
        }
        if let Some(skill) = self.skill {
            settings.skill_level = skill;
        }
        if let Some(delay_ms) = self.delay_ms {
            settings.think_delay_ms = delay_ms;
        }
        settings.sanitized()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = load_settings();
    let settings = cli.apply(loaded.settings);

    init_logging(&settings.log_filter).context("failed to initialise logging")?;
    loaded.source.log();

    if cli.save_settings {
        match save_settings(&settings) {
            Ok(path) => info!("[SETTINGS] Defaults updated in {:?}", path),
            Err(e) => warn!("[SETTINGS] Could not save settings: {}", e),
        }
    }

    let (engine, engine_lines) = UciProcess::spawn(&settings.engine_path)
        .with_context(|| format!("could not start engine {:?}", settings.engine_path))?;

    let view = TerminalView::new(std::io::stdout());
    let controller = Controller::new(
        ShakmatyRules::new(),
        view,
        engine,
        ControllerOptions::from(&settings),
    )
    .context("engine rejected start-up directives")?;

    println!("{HELP}");

    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    tokio::spawn(read_commands(ui_tx));

    let (controller, end) = Session::new(controller, ui_rx, engine_lines).run().await;
    info!("[SESSION] Final position: {}", controller.position_string());

    if end == SessionEnd::EngineClosed {
        anyhow::bail!("engine exited unexpectedly");
    }
    Ok(())
}
