//! weather-menu CLI
//!
//! Configure graph size and filters through a keyboard-driven menu.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use weather_menu::logger::{default_log_path, init_tracing, Env, Logger};
use weather_menu::registry::Location;
use weather_menu::report::format_transfer;
use weather_menu::tui::run::run;
use weather_menu::tui::state::Session;
use weather_menu::types::{
    DisplayOptions, Filter, FilterType, GraphParameters, OutputFormat, TransferData,
    DEFAULT_TIME_RANGE,
};

#[derive(Parser)]
#[command(name = "weather-menu")]
#[command(about = "Interactive menu for configuring weather graphs")]
#[command(version)]
struct Cli {
    /// Logging environment (logs are only written in dev)
    #[arg(long, value_enum, default_value = "prod")]
    env: EnvArg,

    /// Development log file (default: weather-menu.log in the temp dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Initial graph width
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Initial graph height
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// Initial location filter, by country name
    #[arg(long)]
    location: Option<String>,

    /// Initial time range filter, "start|end"
    #[arg(long)]
    time_range: Option<String>,

    /// Start with the controls help hidden
    #[arg(long)]
    hide_controls: bool,

    /// Start with the active filters shown
    #[arg(long)]
    show_filters: bool,

    /// Print the final transfer data on quit
    #[arg(long, value_enum, default_value = "none")]
    emit: EmitArg,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum EnvArg {
    Dev,
    Prod,
}

impl From<EnvArg> for Env {
    fn from(arg: EnvArg) -> Self {
        match arg {
            EnvArg::Dev => Env::Dev,
            EnvArg::Prod => Env::Prod,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum EmitArg {
    None,
    Human,
    Json,
}

impl EmitArg {
    fn format(self) -> Option<OutputFormat> {
        match self {
            EmitArg::None => None,
            EmitArg::Human => Some(OutputFormat::Human),
            EmitArg::Json => Some(OutputFormat::Json),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cmd_menu(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// STARTUP CONFIGURATION
// ============================================================================

/// Build the initial transfer data from the command line.
fn initial_data(cli: &Cli) -> Result<TransferData, String> {
    let defaults = GraphParameters::default();
    let graph = GraphParameters {
        width: cli.width.unwrap_or(defaults.width),
        height: cli.height.unwrap_or(defaults.height),
    };

    let location = match &cli.location {
        Some(name) => Location::from_name(name).map_err(|e| e.to_string())?,
        None => Location::DEFAULT,
    };
    let time_range = cli.time_range.as_deref().unwrap_or(DEFAULT_TIME_RANGE);

    let filters = vec![
        Filter::new(FilterType::TimeRange, time_range),
        Filter::new(FilterType::Location, location.name()),
    ];
    Ok(TransferData::new(Some(graph), Some(filters)))
}

fn initial_options(cli: &Cli) -> DisplayOptions {
    let mut options = DisplayOptions::default();
    options.set(Some(!cli.hide_controls), Some(cli.show_filters));
    options
}

// ============================================================================
// COMMAND HANDLER
// ============================================================================

fn cmd_menu(cli: Cli) -> Result<(), String> {
    let env = Env::from(cli.env);
    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    init_tracing(env, &log_path)
        .map_err(|e| format!("cannot open log file {}: {}", log_path.display(), e))?;

    let data = initial_data(&cli)?;
    let options = initial_options(&cli);
    let logger = Logger::new(env);
    tracing::info!(?env, log_file = %log_path.display(), "starting");

    let mut session = Session::instance(data, options)
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    run(&mut session, &logger).map_err(|e| e.to_string())?;

    println!("Quitting...");
    if let Some(format) = cli.emit.format() {
        print!("{}", format_transfer(&session.data, format));
    }
    Ok(())
}
