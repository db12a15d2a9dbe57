// nifopt - Batch mesh optimization and texture compliance scanning for
// Skyrim SE assets
//
// This is the library crate containing the batch engine, progress
// composition, DDS compliance scanner, and the mesh-optimizer contract.
// The binary crate (main.rs) provides the CLI entry point.

pub mod config;
pub mod logging;
pub mod models;
pub mod progress;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{OptimizeOptions, ScanOptions, TargetGame, UserConfig};
pub use progress::{PROGRESS_SCALE, ProgressEvent, ProgressTracker};
pub use services::{BatchRunner, BatchSummary, cancel_channel};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
