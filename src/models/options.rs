use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Target runtime the processed assets must be compatible with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetGame {
    /// Skyrim Special Edition (64-bit; extended DX10 texture headers allowed).
    #[default]
    Sse,
    /// Skyrim Legacy Edition (32-bit; legacy texture formats only).
    Le,
}

impl TargetGame {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetGame::Sse => "SSE",
            TargetGame::Le => "LE",
        }
    }
}

/// Options for a mesh optimization batch.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeOptions {
    pub folder: Utf8PathBuf,
    pub recursive: bool,
    pub smooth_normals: bool,
    pub smooth_angle: u32,
    pub smooth_seam_normals: bool,
    pub head_parts: bool,
    pub clean_skinning: bool,
    pub calculate_bounds: bool,
    pub remove_parallax: bool,
    pub target_game: TargetGame,
    pub write_log: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            folder: Utf8PathBuf::new(),
            recursive: true,
            smooth_normals: false,
            smooth_angle: 60,
            smooth_seam_normals: true,
            head_parts: false,
            clean_skinning: true,
            calculate_bounds: true,
            remove_parallax: true,
            target_game: TargetGame::Sse,
            write_log: true,
        }
    }
}

/// Options for a texture scan batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOptions {
    pub folder: Utf8PathBuf,
    pub recursive: bool,
    pub target_game: TargetGame,
    pub write_log: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            folder: Utf8PathBuf::new(),
            recursive: true,
            target_game: TargetGame::Sse,
            write_log: true,
        }
    }
}
