mod log;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, instrument};

use touchutils_lib::{TouchTrace, TouchTracker, TrackerConfig};

#[derive(Debug, Parser)]
#[command(name = "touchutils")]
#[command(about = "Replay recorded touch traces through the gesture tracker")]
struct Cli {
    /// Directory for a daily rolling log file.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Replay(ReplayArgs),
    CheckConfig(CheckConfigArgs),
}

#[derive(Debug, Args)]
struct ReplayArgs {
    trace: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print one JSON snapshot per frame instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CheckConfigArgs {
    config: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    log::init_log(cli.log_dir.as_deref(), cli.verbose);

    match cli.command {
        Commands::Replay(args) => replay(args),
        Commands::CheckConfig(args) => check_config(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<TrackerConfig> {
    match path {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("failed loading tracker config {}", path.display())),
        None => Ok(TrackerConfig::default()),
    }
}

#[instrument(skip_all, fields(trace = %args.trace.display()))]
fn replay(args: ReplayArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let trace = TouchTrace::load(&args.trace)
        .with_context(|| format!("failed loading touch trace {}", args.trace.display()))?;
    info!("Replaying {} frames", trace.len());

    let tracker = TouchTracker::with_config(config);
    for snapshot in trace.replay(&tracker) {
        if args.json {
            println!("{}", serde_json::to_string(&snapshot)?);
            continue;
        }
        let msgs = report::describe(&snapshot);
        if !msgs.is_empty() {
            println!("frame {}: {}", snapshot.frame, msgs.join("; "));
        }
    }
    Ok(())
}

fn check_config(args: CheckConfigArgs) -> Result<()> {
    let config = load_config(Some(&args.config))?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
