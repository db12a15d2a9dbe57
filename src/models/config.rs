use crate::models::{OptimizeOptions, ScanOptions, TargetGame};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// User configuration from `nifopt Config.yaml`.
///
/// Contains the last-used folder, batch toggles, and mesh-pass flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "Nifopt_Settings")]
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "Folder", default)]
    pub folder: String,

    #[serde(rename = "Sub Directories", default = "default_true")]
    pub recursive: bool,

    #[serde(rename = "Write Log", default = "default_true")]
    pub write_log: bool,

    #[serde(rename = "Target Game", default)]
    pub target_game: TargetGame,

    #[serde(rename = "Head Parts Only", default)]
    pub head_parts: bool,

    #[serde(rename = "Clean Skinning", default = "default_true")]
    pub clean_skinning: bool,

    #[serde(rename = "Calculate Bounds", default = "default_true")]
    pub calculate_bounds: bool,

    #[serde(rename = "Remove Parallax", default = "default_true")]
    pub remove_parallax: bool,

    #[serde(rename = "Smooth Normals", default)]
    pub smooth_normals: bool,

    #[serde(rename = "Smooth Angle", default = "default_smooth_angle")]
    pub smooth_angle: u32,

    #[serde(rename = "Smooth Seam Normals", default = "default_true")]
    pub smooth_seam_normals: bool,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            folder: String::new(),
            recursive: true,
            write_log: true,
            target_game: TargetGame::Sse,
            head_parts: false,
            clean_skinning: true,
            calculate_bounds: true,
            remove_parallax: true,
            smooth_normals: false,
            smooth_angle: 60,
            smooth_seam_normals: true,
            debug_mode: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_smooth_angle() -> u32 {
    60
}

impl Settings {
    /// Build mesh batch options, rooted at `folder` when given.
    pub fn optimize_options(&self, folder: Option<Utf8PathBuf>) -> OptimizeOptions {
        OptimizeOptions {
            folder: folder.unwrap_or_else(|| Utf8PathBuf::from(&self.folder)),
            recursive: self.recursive,
            smooth_normals: self.smooth_normals,
            smooth_angle: self.smooth_angle,
            smooth_seam_normals: self.smooth_seam_normals,
            head_parts: self.head_parts,
            clean_skinning: self.clean_skinning,
            calculate_bounds: self.calculate_bounds,
            remove_parallax: self.remove_parallax,
            target_game: self.target_game,
            write_log: self.write_log,
        }
    }

    /// Build texture scan options, rooted at `folder` when given.
    pub fn scan_options(&self, folder: Option<Utf8PathBuf>) -> ScanOptions {
        ScanOptions {
            folder: folder.unwrap_or_else(|| Utf8PathBuf::from(&self.folder)),
            recursive: self.recursive,
            target_game: self.target_game,
            write_log: self.write_log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert!(settings.recursive);
        assert!(settings.write_log);
        assert!(settings.clean_skinning);
        assert!(!settings.smooth_normals);
        assert_eq!(settings.smooth_angle, 60);
        assert_eq!(settings.target_game, TargetGame::Sse);
    }

    #[test]
    fn test_settings_parse_with_missing_fields() {
        let yaml = "Nifopt_Settings:\n  \"Target Game\": LE\n";
        let config: UserConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.settings.target_game, TargetGame::Le);
        // Unspecified fields fall back to the documented defaults.
        assert!(config.settings.recursive);
        assert_eq!(config.settings.smooth_angle, 60);
    }

    #[test]
    fn test_scan_options_folder_override() {
        let settings = Settings {
            folder: "C:/Games/Data".to_string(),
            ..Settings::default()
        };

        let from_config = settings.scan_options(None);
        assert_eq!(from_config.folder, Utf8PathBuf::from("C:/Games/Data"));

        let overridden = settings.scan_options(Some(Utf8PathBuf::from("D:/Mods")));
        assert_eq!(overridden.folder, Utf8PathBuf::from("D:/Mods"));
    }
}
