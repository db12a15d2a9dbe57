//! Mesh optimizer contract.
//!
//! The geometry passes (skinning cleanup, normal/tangent recomputation,
//! bounds calculation) live in an external optimizer library. This module
//! defines the narrow seam the batch driver consumes: load a document,
//! apply the passes, collect a report of what changed, write the result.
//! Nothing in this crate implements the passes themselves; hosts inject an
//! implementation and tests mock it.

use crate::models::TargetGame;
use std::io::{Read, Write};
use thiserror::Error;

/// Errors crossing the optimizer seam.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("failed to load mesh")]
    Load,

    #[error("failed to save mesh")]
    Save,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// NIF version triple the optimizer converts documents to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NifVersion {
    pub file: u32,
    pub user: u32,
    pub stream: u32,
}

impl NifVersion {
    /// File version 20.2.0.7, shared by both supported targets.
    pub const FILE_20_2_0_7: u32 = 0x1402_0007;

    pub fn for_target(target: TargetGame) -> Self {
        match target {
            TargetGame::Sse => Self {
                file: Self::FILE_20_2_0_7,
                user: 12,
                stream: 100,
            },
            TargetGame::Le => Self {
                file: Self::FILE_20_2_0_7,
                user: 12,
                stream: 83,
            },
        }
    }
}

/// Options forwarded to the optimizer untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshOptions {
    pub head_parts: bool,
    pub calc_bounds: bool,
    pub remove_parallax: bool,
    pub clean_skinning: bool,
    pub smooth_normals: Option<SmoothNormals>,
    pub target_version: NifVersion,
}

/// Normal-smoothing pass parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothNormals {
    pub max_angle: u32,
    pub seam_normals: bool,
}

/// Flags applied while reading a document.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshLoadOptions {
    /// Terrain containers carry a reduced block set.
    pub is_terrain: bool,
}

/// What the optimizer did to a document, by shape name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshReport {
    /// The document could not be converted to the target version (or
    /// already was), so saving left it untouched.
    pub version_mismatch: bool,
    /// At least one shape with a duplicate name was renamed.
    pub dupes_renamed: bool,
    pub vertex_colors_removed: Vec<String>,
    pub normals_removed: Vec<String>,
    pub partitions_triangulated: Vec<String>,
    pub tangents_added: Vec<String>,
    pub parallax_removed: Vec<String>,
    /// The document carries skin data.
    pub skinned: bool,
}

/// A loaded mesh document.
pub trait MeshDocument {
    /// Apply the optimization passes and report what changed.
    fn optimize(&mut self, options: &MeshOptions) -> MeshReport;

    /// Stamp the export note and prepare internal buffers for writing.
    fn finalize(&mut self, export_note: &str);

    fn save(&self, writer: &mut dyn Write) -> Result<(), MeshError>;
}

/// The external optimizer library behind a narrow seam.
pub trait MeshOptimizer {
    /// Read a document from `reader`.
    fn load(
        &self,
        reader: &mut dyn Read,
        options: &MeshLoadOptions,
    ) -> Result<Box<dyn MeshDocument>, MeshError>;
}
