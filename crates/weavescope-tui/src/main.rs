//! weavescope: step through a recorded causal-tree history.
//!
//! Usage:
//!   # Interactive viewer (Left/Right, [ ], { }, g to jump, Up/Down to scroll, q to quit)
//!   weavescope run.json
//!
//!   # Headless: apply a command script and print the resulting snapshot
//!   weavescope run.json --commands "+10 -1 =3"
//!
//!   # Report sitemap and cause violations (exit status 1 if any)
//!   weavescope run.json --check

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use weavescope_model::History;
use weavescope_nav::{NavigatorSession, ScriptedInput, TimeNavigator, parse_commands};

use weavescope_tui::input::TerminalInput;
use weavescope_tui::{Screen, TerminalView, ViewerConfig, logging, render_current};

/// Time-travel viewer for recorded causal-tree snapshots.
#[derive(Parser, Debug)]
#[command(name = "weavescope")]
#[command(about = "Step through a recorded causal-tree history")]
struct Args {
    /// Recorded history: a JSON array of snapshots, or one snapshot per line
    log: PathBuf,

    /// Start at this snapshot index (clamped into range)
    #[arg(long, allow_negative_numbers = true)]
    at: Option<i64>,

    /// Apply these commands headlessly and print the final snapshot, e.g. "+10 -1 =3"
    #[arg(long, allow_hyphen_values = true)]
    commands: Option<String>,

    /// Check the history for data-integrity problems and exit
    #[arg(long, conflicts_with = "commands")]
    check: bool,

    /// Viewer config (RON); defaults to ~/.config/weavescope/config.ron
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file; interactive runs default to $WEAVESCOPE_LOG_DIR/weavescope.log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = ViewerConfig::resolve(args.config.as_deref()).context("failed to load config")?;

    let interactive = !args.check && args.commands.is_none();
    let log_file = match (&args.log_file, interactive) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(logging::default_log_path()),
        (None, false) => None,
    };
    let filter = config.log_filter.as_deref().unwrap_or(logging::DEFAULT_FILTER);
    let _guard = logging::init(filter, log_file.as_deref(), !interactive)?;

    let history = History::load(&args.log)
        .with_context(|| format!("failed to load history from {}", args.log.display()))?;

    if args.check {
        return Ok(check(&history));
    }

    let mut navigator = TimeNavigator::new(Arc::new(history));
    if let Some(at) = args.at {
        navigator.jump_to(at);
    }

    match args.commands {
        Some(script) => replay(navigator, &script, &config),
        None => interactive_session(navigator, &config),
    }
}

fn check(history: &History) -> ExitCode {
    let report = history.check_integrity();
    println!("{report}");
    if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        tracing::warn!(issues = report.issues.len(), "integrity check failed");
        ExitCode::FAILURE
    }
}

fn replay(navigator: TimeNavigator, script: &str, config: &ViewerConfig) -> Result<ExitCode> {
    let commands = parse_commands(script).context("invalid --commands script")?;
    let mut session = NavigatorSession::new(navigator, ScriptedInput::new(commands));
    let stats = session.run()?;
    tracing::info!(commands = stats.commands, moves = stats.moves, "replay finished");

    print!("{}", render_current(session.navigator(), &config.render_options()).to_plain_text());
    session.close();
    Ok(ExitCode::SUCCESS)
}

fn interactive_session(mut navigator: TimeNavigator, config: &ViewerConfig) -> Result<ExitCode> {
    let keymap = config.keymap();
    let hints = keymap.hints();
    let options = config.render_options();

    let screen = Screen::new(io::stdout()).with_footer(hints).shared();
    let view = TerminalView::new(Rc::clone(&screen), navigator.len(), options.clone());
    navigator.subscribe(Box::new(view));

    let input = TerminalInput::new(keymap).with_screen(Rc::clone(&screen));
    let mut session = NavigatorSession::new(navigator, input);
    session.run_with(|nav| {
        if let Err(e) = screen.borrow_mut().show(render_current(nav, &options)) {
            tracing::warn!(error = %e, "failed to paint initial snapshot");
        }
    })?;
    session.close();
    Ok(ExitCode::SUCCESS)
}
