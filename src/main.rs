use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use focus_mode::period::Period;
use focus_mode::settings::SettingsStore;
use focus_mode::storage::DocumentStore;
use focus_mode::tracker::FocusTracker;
use focus_mode::{logging, ui};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Focus session stopwatch with highscores and goals", long_about = None)]
struct Cli {
    /// Directory holding highscores.json, focus_hours.json and goals.json
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,
    /// Log filter for this crate (e.g. debug, info, warn)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the focus window (default command)
    Run,
    /// Print highscores, focus hours and saved goals to stdout
    Report,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings_store = SettingsStore::new()?;
    let settings = settings_store.load()?;

    let log_level = cli.log_level.as_deref().or(settings.log_level.as_deref());
    logging::init(log_level)?;

    let data_dir = settings.resolve_data_dir(cli.data_dir.as_deref())?;
    info!(
        data_dir = %data_dir.display(),
        settings = %settings_store.path().display(),
        "storage resolved"
    );

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run_window(data_dir),
        Command::Report => run_report(&DocumentStore::open(data_dir)),
    }
}

fn run_window(data_dir: PathBuf) -> Result<()> {
    let store = DocumentStore::new(data_dir)?;
    let tracker = FocusTracker::load(store)?;
    ui::launch(tracker)
}

fn run_report(store: &DocumentStore) -> Result<()> {
    let highscores = store.load_highscores()?;
    let hours = store.load_focus_hours()?;
    let goals = store.load_goals()?;

    println!("Focus Summary ({})\n", store.data_dir().display());
    if highscores.is_empty() {
        println!("No sessions recorded yet.");
    } else {
        println!("Sessions ({}):", highscores.len());
        for (idx, entry) in highscores.iter().enumerate() {
            println!(" {}. {}", idx + 1, entry);
        }
    }

    println!("\nGoals:");
    for period in Period::ALL {
        println!(
            " {:<12} {:>8.2} h of {} h",
            period.title(),
            hours.get(period),
            goals.get(period)
        );
    }
    Ok(())
}
