//! Services module - the batch engine and the per-file operations it drives.
//!
//! Everything here is framework-agnostic: no CLI, no UI, only business logic
//! with explicit inputs, so each piece is testable on its own.
//!
//! # Components
//!
//! - [`batch::BatchRunner`]: drives an operation across a discovered file
//!   list with per-file progress, per-file failure tolerance, and
//!   cooperative cancellation at file boundaries.
//! - [`dds`]: structural decoding of DDS texture headers (magic, primary
//!   header, optional DX10 extension).
//! - [`scan::TextureScanner`]: the fixed-order compliance rules over a
//!   decoded header, plus the TGA name exception.
//! - [`mesh`]: the contract consumed from the external mesh optimizer
//!   library; defined here, implemented by hosts, mocked in tests.
//! - [`report`]: the CRLF run-log artifact and the [`report::BatchSummary`]
//!   returned by every run.
//!
//! # Flow
//!
//! A run discovers files, opens each in turn, hands the stream to the
//! per-file operation (scanner rules or optimizer contract), merges the
//! findings into the run log and summary, advances progress, and checks
//! for cancellation before moving on.

pub mod batch;
pub mod dds;
pub mod mesh;
pub mod report;
pub mod scan;

pub use batch::{BatchRunner, CancelFlag, CancelRequest, cancel_channel, collect_files};
pub use report::{BatchSummary, RunLog};
pub use scan::TextureScanner;
