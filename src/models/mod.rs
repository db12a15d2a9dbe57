//! Data models for nifopt.
//!
//! This module contains the option and configuration structures shared across
//! the batch drivers:
//! - [`OptimizeOptions`] / [`ScanOptions`]: per-run options assembled from the
//!   configuration file and CLI overrides
//! - [`TargetGame`]: the two supported deployment targets (SSE / LE)
//! - [`UserConfig`] / [`Settings`]: user preferences persisted as YAML

pub mod config;
pub mod options;

pub use config::{Settings, UserConfig};
pub use options::{OptimizeOptions, ScanOptions, TargetGame};
