//! partplan - Main entry point
//!
//! Runs the planning wizard and prints the committed plan once the
//! terminal has been restored.

use anyhow::{Context, Result, anyhow};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::cell::RefCell;
use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::rc::Rc;
use std::sync::Mutex;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use partplan::app::App;
use partplan::cli::Cli;
use partplan::config::WizardConfig;
use partplan::devices::{FixedDevices, LsblkEnumerator};
use partplan::disk_info::{CommandInspector, DiskInspector};
use partplan::error::PartPlanError;
use partplan::plan::PlanModel;
use partplan::process_guard;
use partplan::session::{CompletionHandlers, PlanSession};

/// How the wizard ended
enum Outcome {
    Committed(PlanModel),
    Cancelled,
}

/// Initialize tracing; RUST_LOG overrides the default `warn` filter
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.log_file.as_deref())?;
    info!("partplan starting up");

    if let Err(e) = process_guard::init_signal_handlers() {
        warn!("Failed to initialize signal handlers: {}", e);
    }

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration file: {:?}", path);
            WizardConfig::load_from_file(path)?
        }
        None => WizardConfig::default(),
    };
    let settings = cli.merge_into(config);
    settings.validate()?;
    debug!("Effective settings: {:?}", settings);

    let outcome: Rc<RefCell<Option<Outcome>>> = Rc::new(RefCell::new(None));
    let commit_slot = Rc::clone(&outcome);
    let cancel_slot = Rc::clone(&outcome);
    let handlers = CompletionHandlers::new(
        move |plan| *commit_slot.borrow_mut() = Some(Outcome::Committed(plan)),
        move || *cancel_slot.borrow_mut() = Some(Outcome::Cancelled),
    );

    let mut session = if settings.devices.is_empty() {
        PlanSession::new(&LsblkEnumerator::new(), handlers)?
    } else {
        let devices = FixedDevices::from_paths(settings.devices.iter().cloned());
        PlanSession::new(&devices, handlers)?
    };
    session.select_label(settings.default_label)?;

    let inspector = CommandInspector::from_argv(&settings.inspect_command)
        .ok_or_else(|| anyhow!("inspect_command must name a program"))?;

    run_tui(session, Box::new(inspector))?;

    match outcome.borrow_mut().take() {
        Some(Outcome::Committed(plan)) => {
            info!("Plan committed");
            if settings.json_output {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("{}", plan.describe());
            }
        }
        Some(Outcome::Cancelled) | None => info!("Plan cancelled"),
    }

    Ok(())
}

/// Run the wizard in the alternate screen
fn run_tui(session: PlanSession, inspector: Box<dyn DiskInspector>) -> Result<()> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| PartPlanError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| PartPlanError::terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| PartPlanError::terminal(format!("Failed to create terminal: {}", e)))
        .and_then(|mut terminal| App::new(session, inspector).run(&mut terminal));

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result.map_err(Into::into)
}
