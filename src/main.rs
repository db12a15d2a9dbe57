//! nifopt - batch asset processing for Skyrim SE mods.
//!
//! CLI entry point. This binary exposes the texture compliance scanner;
//! the mesh optimize pipeline is driven through the library API by hosts
//! that link a mesh optimizer backend.
//!
//! # Execution Flow
//!
//! 1. Initialize logging → logs/nifopt.<date>
//! 2. Load `nifopt Config.yaml` (defaults when missing)
//! 3. Assemble run options from config + CLI overrides
//! 4. Run the batch with a progress printer subscribed to tracker events
//! 5. Print the per-file findings and the run summary

use anyhow::Result;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use nifopt::{
    APP_NAME, BatchRunner, ConfigManager, ProgressEvent, TargetGame, VERSION, cancel_channel,
};
use tokio::sync::broadcast::error::RecvError;

#[derive(Parser)]
#[command(name = "nifopt", version, about = "Batch asset processing for Skyrim SE mods")]
struct Cli {
    /// Directory holding the configuration file
    #[arg(long, default_value = "nifopt Data")]
    config_dir: Utf8PathBuf,

    /// Verbose diagnostic logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan textures under a folder for compliance issues
    Scan {
        /// Folder to scan (defaults to the configured folder)
        folder: Option<Utf8PathBuf>,

        /// Do not descend into sub directories
        #[arg(long)]
        no_recursive: bool,

        /// Skip writing the run log
        #[arg(long)]
        no_log: bool,

        /// Target game profile
        #[arg(long, value_enum)]
        target: Option<TargetArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetArg {
    Sse,
    Le,
}

impl From<TargetArg> for TargetGame {
    fn from(value: TargetArg) -> Self {
        match value {
            TargetArg::Sse => TargetGame::Sse,
            TargetArg::Le => TargetGame::Le,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = nifopt::logging::init("logs", "nifopt", cli.debug, false)?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let user_config = config_manager.load_user_config()?;

    match cli.command {
        Command::Scan {
            folder,
            no_recursive,
            no_log,
            target,
        } => {
            let mut options = user_config.settings.scan_options(folder);
            if no_recursive {
                options.recursive = false;
            }
            if no_log {
                options.write_log = false;
            }
            if let Some(target) = target {
                options.target_game = target.into();
            }
            run_scan(options)
        }
    }
}

fn run_scan(options: nifopt::ScanOptions) -> Result<()> {
    // The sender stays alive for the whole run; this host has no
    // interactive cancel path, so the flag simply never trips.
    let (_cancel_tx, cancel_rx) = cancel_channel();
    let mut runner = BatchRunner::new(cancel_rx);

    let mut events = runner.progress().subscribe();
    let printer = std::thread::spawn(move || {
        loop {
            match events.blocking_recv() {
                Ok(ProgressEvent::Started { .. }) => {}
                Ok(ProgressEvent::Updated { value, status }) => {
                    eprint!("\r[{:>3}%] {status}", value / 100);
                }
                Ok(ProgressEvent::Finished { .. }) => {
                    eprintln!();
                    break;
                }
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    });

    let result = runner.run_scan(&options);
    drop(runner); // closes the event channel so the printer always exits
    let _ = printer.join();

    let summary = result?;

    if summary.is_clean() {
        println!("No errors were detected in the texture scan.");
    } else {
        for (file, findings) in &summary.flagged {
            println!("{file}");
            for finding in findings {
                println!("- {finding}");
            }
        }
    }

    println!(
        "{} of {} file(s) processed{}",
        summary.files_processed,
        summary.files_found,
        if summary.cancelled { " (cancelled)" } else { "" }
    );

    Ok(())
}
