//! Runtime configuration, optionally loaded from a TOML file.
//!
//! [`AppConfig::load_or_default`] reads the file if present and overwrites
//! the compile-time defaults with any keys it contains; missing keys keep
//! their defaults, so a minimal TOML can override just the values you care
//! about.  A malformed file is logged and ignored rather than aborting the
//! run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use hand_gesture::{DEFAULT_FIST_THRESHOLD, DEFAULT_PINCH_THRESHOLD};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    // ── Frame ────────────────────────────────────────────────────────────
    pub width: usize,
    pub height: usize,

    // ── Gesture thresholds (frame pixels) ────────────────────────────────
    pub pinch_threshold: f32,
    pub fist_threshold: f32,

    // ── Collaborator paths ───────────────────────────────────────────────
    pub records_path: PathBuf,
    pub icons_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            width: 1280,
            height: 720,
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            fist_threshold: DEFAULT_FIST_THRESHOLD,
            records_path: PathBuf::from("game_records.json"),
            icons_dir: PathBuf::from("icons"),
        }
    }
}

impl AppConfig {
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(cfg) => {
                    log::info!("config loaded from {}", path.display());
                    cfg
                }
                Err(e) => {
                    log::warn!("config {} is invalid ({e}); using defaults", path.display());
                    AppConfig::default()
                }
            },
            Err(_) => AppConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classifier_thresholds() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.pinch_threshold, 40.0);
        assert_eq!(cfg.fist_threshold, 240.0);
        assert_eq!((cfg.width, cfg.height), (1280, 720));
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let cfg: AppConfig = toml::from_str("width = 640\nheight = 480").unwrap();
        assert_eq!((cfg.width, cfg.height), (640, 480));
        assert_eq!(cfg.pinch_threshold, 40.0);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = AppConfig::load_or_default("definitely/not/here.toml");
        assert_eq!(cfg.width, 1280);
    }
}
