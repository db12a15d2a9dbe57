//! Batch execution over discovered asset files.
//!
//! The runner drives one operation across a file list: it advances progress
//! exactly once per file (failed loads included), tolerates any per-file
//! failure, and observes a host-owned cancellation flag between files. A
//! file already being processed always runs to completion; cancellation is
//! cooperative, never preemptive.

use crate::models::{OptimizeOptions, ScanOptions};
use crate::progress::ProgressTracker;
use crate::services::mesh::{
    MeshError, MeshLoadOptions, MeshOptimizer, MeshOptions, NifVersion, SmoothNormals,
};
use crate::services::report::{BatchSummary, RunLog};
use crate::services::scan::TextureScanner;
use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use tokio::sync::watch;
use walkdir::WalkDir;

/// Mesh container extensions, in collection order.
pub const MESH_EXTENSIONS: [&str; 3] = ["nif", "btr", "bto"];

/// Texture extensions, in collection order.
pub const TEXTURE_EXTENSIONS: [&str; 2] = ["dds", "tga"];

pub const OPTIMIZE_LOG_NAME: &str = "nifopt.txt";
pub const SCAN_LOG_NAME: &str = "nifopt (Texture Scan).txt";

/// Host side of the cancellation flag. Send `true` to stop the batch at the
/// next file boundary.
pub type CancelRequest = watch::Sender<bool>;

/// Runner side of the cancellation flag; read-only.
pub type CancelFlag = watch::Receiver<bool>;

/// Create a cancellation flag pair, initially not cancelled.
pub fn cancel_channel() -> (CancelRequest, CancelFlag) {
    watch::channel(false)
}

/// Collect files under `folder` carrying one of `extensions`.
///
/// One sweep per extension, so results group by extension in the given
/// order; each sweep visits directory entries in sorted name order.
/// Unreadable or non-UTF-8 entries are skipped with a warning.
pub fn collect_files(
    folder: &Utf8Path,
    recursive: bool,
    extensions: &[&str],
) -> Result<Vec<Utf8PathBuf>> {
    anyhow::ensure!(folder.is_dir(), "Folder does not exist: {folder}");

    let mut files = Vec::new();
    for wanted in extensions {
        let mut walker = WalkDir::new(folder).sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::warn!("Skipping unreadable entry: {error}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
                tracing::warn!("Skipping non-UTF-8 path under {folder}");
                continue;
            };
            if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
            {
                files.push(path);
            }
        }
    }
    Ok(files)
}

/// Drives per-file operations across a file list.
pub struct BatchRunner {
    progress: ProgressTracker,
    cancel: CancelFlag,
}

impl BatchRunner {
    pub fn new(cancel: CancelFlag) -> Self {
        Self {
            progress: ProgressTracker::new(),
            cancel,
        }
    }

    /// The progress tracker; subscribe before starting a run.
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Run `per_file` across `files` in list order.
    ///
    /// Writes the file count and per-file blocks to `log`, advances progress
    /// by `100/len` per file, and stops early (after finishing the current
    /// file) once the cancellation flag reads `true`. The log always closes
    /// with the finished marker, cancelled or not.
    pub fn run<F>(&mut self, files: &[Utf8PathBuf], log: &mut RunLog, mut per_file: F) -> BatchSummary
    where
        F: FnMut(&Utf8Path, &mut RunLog, &mut BatchSummary),
    {
        let mut summary = BatchSummary::new(files.len());

        self.progress.start();

        log.line(&format!("[INFO] {} file(s) were found.", files.len()));
        log.separator();

        let mut step = 100.0f32;
        if !files.is_empty() {
            step /= files.len() as f32;
        }
        let mut prog = 0.0f32;

        for file in files {
            prog += step;
            let display = file.file_name().unwrap_or(file.as_str());
            self.progress.update(prog, &format!("'{display}'..."));

            log.line(&format!("Loading '{file}'..."));
            per_file(file, log, &mut summary);
            summary.files_processed += 1;

            log.separator();

            if *self.cancel.borrow() {
                tracing::info!("Batch cancelled after {} file(s)", summary.files_processed);
                summary.cancelled = true;
                break;
            }
        }

        log.line("Program finished.");
        self.progress.end();

        summary
    }

    /// Optimize every mesh container under the configured folder.
    ///
    /// The actual geometry passes run behind the [`MeshOptimizer`] seam; the
    /// runner opens and rewrites the files and renders the report blocks.
    pub fn run_optimize(
        &mut self,
        options: &OptimizeOptions,
        optimizer: &dyn MeshOptimizer,
    ) -> Result<BatchSummary> {
        let log = if options.write_log {
            RunLog::create(Utf8Path::new(OPTIMIZE_LOG_NAME))?
        } else {
            RunLog::disabled()
        };
        self.run_optimize_with_log(options, optimizer, log)
    }

    /// [`Self::run_optimize`] with a caller-supplied run log.
    pub fn run_optimize_with_log(
        &mut self,
        options: &OptimizeOptions,
        optimizer: &dyn MeshOptimizer,
        mut log: RunLog,
    ) -> Result<BatchSummary> {
        let files = collect_files(&options.folder, options.recursive, &MESH_EXTENSIONS)?;

        log.line(&format!("==== {} v{} ====", crate::APP_NAME, crate::VERSION));
        log.separator();
        log.line("[INFO] Options:");
        log.line(&format!("- Folder: '{}'", options.folder));
        log.line(&format!("- Sub Directories: {}", yes_no(options.recursive)));
        log.line(&format!("- Head Parts Only: {}", yes_no(options.head_parts)));
        log.line(&format!("- Clean Skinning: {}", yes_no(options.clean_skinning)));
        log.line(&format!(
            "- Calculate Bounds: {}",
            yes_no(options.calculate_bounds)
        ));
        log.line(&format!(
            "- Remove Parallax: {}",
            yes_no(options.remove_parallax)
        ));
        log.line(&format!(
            "- Smooth Normals: {}",
            yes_no(options.smooth_normals)
        ));
        if options.smooth_normals {
            log.line(&format!("- Smooth Angle: {}", options.smooth_angle));
            log.line(&format!(
                "- Smooth Seam Normals: {}",
                yes_no(options.smooth_seam_normals)
            ));
        }
        log.blank();

        let mesh_options = build_mesh_options(options);
        let export_note = format!("Optimized with {} v{}.", crate::APP_NAME, crate::VERSION);

        Ok(self.run(&files, &mut log, |file, log, summary| {
            optimize_one(file, optimizer, &mesh_options, &export_note, log, summary);
        }))
    }

    /// Scan every texture under the configured folder for compliance issues.
    pub fn run_scan(&mut self, options: &ScanOptions) -> Result<BatchSummary> {
        let log = if options.write_log {
            RunLog::create(Utf8Path::new(SCAN_LOG_NAME))?
        } else {
            RunLog::disabled()
        };
        self.run_scan_with_log(options, log)
    }

    /// [`Self::run_scan`] with a caller-supplied run log.
    pub fn run_scan_with_log(
        &mut self,
        options: &ScanOptions,
        mut log: RunLog,
    ) -> Result<BatchSummary> {
        let files = collect_files(&options.folder, options.recursive, &TEXTURE_EXTENSIONS)?;

        log.line(&format!(
            "==== {} v{} (Texture Scan) ====",
            crate::APP_NAME,
            crate::VERSION
        ));
        log.separator();
        log.line("[INFO] Options:");
        log.line(&format!("- Folder: '{}'", options.folder));
        log.line(&format!("- Sub Directories: {}", yes_no(options.recursive)));
        log.blank();

        let scanner = TextureScanner::new();
        let target = options.target_game;

        Ok(self.run(&files, &mut log, |file, log, summary| {
            scan_one(file, &scanner, target, log, summary);
        }))
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn build_mesh_options(options: &OptimizeOptions) -> MeshOptions {
    MeshOptions {
        head_parts: options.head_parts,
        calc_bounds: options.calculate_bounds,
        remove_parallax: options.remove_parallax,
        clean_skinning: options.clean_skinning,
        smooth_normals: options.smooth_normals.then(|| SmoothNormals {
            max_angle: options.smooth_angle,
            seam_normals: options.smooth_seam_normals,
        }),
        target_version: NifVersion::for_target(options.target_game),
    }
}

fn record_load_failure(file: &Utf8Path, log: &mut RunLog, summary: &mut BatchSummary) {
    log.line(&format!("[ERROR] Failed to load '{file}'."));
    summary.flag(file, vec!["Failed to load.".to_string()]);
}

fn optimize_one(
    file: &Utf8Path,
    optimizer: &dyn MeshOptimizer,
    options: &MeshOptions,
    export_note: &str,
    log: &mut RunLog,
    summary: &mut BatchSummary,
) {
    let extension = file
        .extension()
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    let load_options = MeshLoadOptions {
        is_terrain: extension == "btr" || extension == "bto",
    };

    let handle = match File::open(file.as_std_path()) {
        Ok(handle) => handle,
        Err(error) => {
            tracing::debug!("Open failed for {file}: {error}");
            record_load_failure(file, log, summary);
            return;
        }
    };

    let mut document = match optimizer.load(&mut BufReader::new(handle), &load_options) {
        Ok(document) => document,
        Err(error) => {
            tracing::debug!("Mesh load failed for {file}: {error}");
            record_load_failure(file, log, summary);
            return;
        }
    };

    let report = document.optimize(options);

    if report.version_mismatch {
        log.line(
            "[INFO] NIF version can't be saved with the target version (or already was). \
             Skipping conversion.",
        );
    }
    if report.dupes_renamed {
        log.line("[INFO] Renamed at least one shape with duplicate names.");
    }

    log_shape_list(
        log,
        "[INFO] Removed vertex colors from shapes:",
        &report.vertex_colors_removed,
    );
    log_shape_list(
        log,
        "[INFO] Removed unnecessary normals and tangents from shapes:",
        &report.normals_removed,
    );
    log_shape_list(
        log,
        "[INFO] Triangulated skin partitions of shapes:",
        &report.partitions_triangulated,
    );
    log_shape_list(log, "[INFO] Added tangents to shapes:", &report.tangents_added);
    log_shape_list(
        log,
        "[INFO] Removed parallax from shapes:",
        &report.parallax_removed,
    );

    if options.clean_skinning && report.skinned {
        log.line("[INFO] Skinned mesh: Cleaning up skin data and calculating bounds.");
    }

    document.finalize(export_note);

    let saved = File::create(file.as_std_path())
        .map_err(MeshError::from)
        .and_then(|out| {
            let mut writer = BufWriter::new(out);
            document.save(&mut writer)?;
            writer.flush().map_err(MeshError::from)
        });

    match saved {
        Ok(()) => log.line("[SUCCESS] Saved file."),
        Err(error) => {
            tracing::debug!("Save failed for {file}: {error}");
            log.line("[ERROR] Failed to save file.");
        }
    }
}

fn log_shape_list(log: &mut RunLog, heading: &str, shapes: &[String]) {
    if shapes.is_empty() {
        return;
    }
    let mut block = String::from(heading);
    for shape in shapes {
        block.push_str("\r\n- ");
        block.push_str(shape);
    }
    log.line(&block);
}

fn scan_one(
    file: &Utf8Path,
    scanner: &TextureScanner,
    target: crate::models::TargetGame,
    log: &mut RunLog,
    summary: &mut BatchSummary,
) {
    let path_lower = file.as_str().to_lowercase();

    let findings = if path_lower.ends_with(".tga") {
        scanner.evaluate_tga(&path_lower)
    } else {
        let handle = match File::open(file.as_std_path()) {
            Ok(handle) => handle,
            Err(error) => {
                tracing::debug!("Open failed for {file}: {error}");
                record_load_failure(file, log, summary);
                return;
            }
        };
        match scanner.scan_stream(&mut BufReader::new(handle), &path_lower, target) {
            Ok(findings) => findings,
            Err(error) => {
                tracing::debug!("Read failed for {file}: {error}");
                record_load_failure(file, log, summary);
                return;
            }
        }
    };

    if !findings.is_empty() {
        log.line(file.as_str());
        for finding in &findings {
            log.line(&format!("- {finding}"));
        }
        summary.flag(file, findings);
    }
}
