//! Integration tests for configuration loading and saving.

use camino::Utf8PathBuf;
use nifopt::models::TargetGame;
use nifopt::{ConfigManager, UserConfig};
use std::fs;

fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
}

#[test]
fn test_defaults_when_no_config_exists() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConfigManager::new(utf8_dir(&dir)).unwrap();

    let config = manager.load_user_config().unwrap();
    assert_eq!(config.settings.folder, "");
    assert!(config.settings.recursive);
    assert!(config.settings.write_log);
    assert_eq!(config.settings.target_game, TargetGame::Sse);
}

#[test]
fn test_round_trip_preserves_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ConfigManager::new(utf8_dir(&dir)).unwrap();

    let mut config = UserConfig::default();
    config.settings.folder = "C:/Skyrim/Data".to_string();
    config.settings.recursive = false;
    config.settings.write_log = false;
    config.settings.target_game = TargetGame::Le;
    config.settings.head_parts = true;
    config.settings.clean_skinning = false;
    config.settings.calculate_bounds = false;
    config.settings.remove_parallax = false;
    config.settings.smooth_normals = true;
    config.settings.smooth_angle = 75;
    config.settings.smooth_seam_normals = false;
    config.settings.debug_mode = true;

    manager.save_user_config(&config).unwrap();
    let reloaded = manager.load_user_config().unwrap();

    assert_eq!(reloaded.settings.folder, "C:/Skyrim/Data");
    assert!(!reloaded.settings.recursive);
    assert!(!reloaded.settings.write_log);
    assert_eq!(reloaded.settings.target_game, TargetGame::Le);
    assert!(reloaded.settings.head_parts);
    assert!(!reloaded.settings.clean_skinning);
    assert!(!reloaded.settings.calculate_bounds);
    assert!(!reloaded.settings.remove_parallax);
    assert!(reloaded.settings.smooth_normals);
    assert_eq!(reloaded.settings.smooth_angle, 75);
    assert!(!reloaded.settings.smooth_seam_normals);
    assert!(reloaded.settings.debug_mode);
}

#[test]
fn test_hand_written_config_with_renamed_keys() {
    let dir = tempfile::tempdir().unwrap();
    let root = utf8_dir(&dir);
    let manager = ConfigManager::new(&root).unwrap();

    let yaml = concat!(
        "Nifopt_Settings:\n",
        "  \"Folder\": \"D:/Mods\"\n",
        "  \"Sub Directories\": false\n",
        "  \"Target Game\": LE\n",
        "  \"Smooth Angle\": 30\n",
    );
    fs::write(root.join("nifopt Config.yaml"), yaml).unwrap();

    let config = manager.load_user_config().unwrap();
    assert_eq!(config.settings.folder, "D:/Mods");
    assert!(!config.settings.recursive);
    assert_eq!(config.settings.target_game, TargetGame::Le);
    assert_eq!(config.settings.smooth_angle, 30);
    // Unlisted keys keep their defaults.
    assert!(config.settings.clean_skinning);
    assert!(config.settings.write_log);
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let root = utf8_dir(&dir);
    let manager = ConfigManager::new(&root).unwrap();

    fs::write(root.join("nifopt Config.yaml"), "Nifopt_Settings: [not, a, map]").unwrap();
    assert!(manager.load_user_config().is_err());
}

#[test]
fn test_settings_feed_batch_options() {
    let mut config = UserConfig::default();
    config.settings.folder = "C:/Skyrim/Data".to_string();
    config.settings.target_game = TargetGame::Le;
    config.settings.smooth_normals = true;

    let scan = config.settings.scan_options(None);
    assert_eq!(scan.folder, Utf8PathBuf::from("C:/Skyrim/Data"));
    assert_eq!(scan.target_game, TargetGame::Le);

    let optimize = config
        .settings
        .optimize_options(Some(Utf8PathBuf::from("E:/Other")));
    assert_eq!(optimize.folder, Utf8PathBuf::from("E:/Other"));
    assert!(optimize.smooth_normals);
    assert_eq!(optimize.smooth_angle, 60);
}
