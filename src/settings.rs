//! Presentation settings and preferences
//!
//! Read once at startup from an optional JSON file. Nothing is written back.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable naming an optional settings JSON file
pub const SETTINGS_ENV: &str = "SIDE_SCROLLER_SETTINGS";

/// Presentation settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    /// Logical viewport width in pixels
    pub viewport_width: u32,
    /// Logical viewport height in pixels (the ground strip anchors to it)
    pub viewport_height: u32,

    // === Pacing ===
    /// Delay between frames (milliseconds)
    pub frame_delay_ms: u64,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show the controls hint along the bottom edge
    pub show_controls_hint: bool,

    // === Accessibility ===
    /// Reduced motion (no question block bob, no death flashing)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 1024,
            viewport_height: 720,

            frame_delay_ms: 16,

            show_fps: false,
            show_controls_hint: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from the file named by `SIDE_SCROLLER_SETTINGS`
    pub fn load() -> Self {
        match std::env::var_os(SETTINGS_ENV) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Whether the question block bob animation is enabled
    pub fn animate_blocks(&self) -> bool {
        !self.reduced_motion
    }

    /// Whether the player flashes while frozen after a death
    pub fn flash_on_death(&self) -> bool {
        !self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings() {
        let settings = Settings::from_json(r#"{ "show_fps": true }"#).unwrap();
        assert!(settings.show_fps);
        assert_eq!(settings.viewport_height, 720);
        assert_eq!(settings.frame_delay_ms, 16);
    }

    fn scratch_file(name: &str, contents: Option<&str>) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "side-scroller-{}-{}.json",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        if let Some(contents) = contents {
            std::fs::write(&path, contents).unwrap();
        }
        path
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = scratch_file("settings-missing", None);
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_load_malformed_file_uses_defaults() {
        let path = scratch_file("settings-malformed", Some("{ \"show_fps\": tru"));
        assert_eq!(Settings::load_from(&path), Settings::default());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_partial_file() {
        let path = scratch_file(
            "settings-partial",
            Some(r#"{ "frame_delay_ms": 33, "reduced_motion": true }"#),
        );
        let settings = Settings::load_from(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.frame_delay_ms, 33);
        assert!(settings.reduced_motion);
        assert_eq!(settings.viewport_width, 1024);
        assert!(settings.show_controls_hint);
    }

    #[test]
    fn test_reduced_motion_disables_effects() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.animate_blocks());
        assert!(!settings.flash_on_death());
    }
}
