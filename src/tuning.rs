//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives in [`Tuning`]. The
//! defaults reproduce the classic feel; a JSON document can override any
//! subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Points for collecting a coin
pub const COIN_SCORE: u32 = 50;
/// Points for bumping a question block from below
pub const BLOCK_SCORE: u32 = 100;
/// Points for stomping an enemy
pub const STOMP_SCORE: u32 = 200;

/// Environment variable naming an optional tuning JSON file
pub const TUNING_ENV: &str = "SIDE_SCROLLER_TUNING";

/// Scoring event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreKind {
    Coin,
    Block,
    Stomp,
}

/// Gameplay tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_force: f32,
    /// Horizontal run speed (pixels/s)
    pub move_speed: f32,
    /// Terminal falling speed
    pub max_fall_speed: f32,

    // === Camera ===
    /// Where the player sits relative to the left edge once scrolling starts
    pub camera_offset_x: f32,
    /// Closest the player may get to the left edge of the view
    pub left_margin: f32,

    // === Level bounds ===
    /// Reaching `level_width - level_end_margin` completes the level
    pub level_end_margin: f32,
    /// Falling this far below the viewport kills the player
    pub fall_death_margin: f32,

    // === Enemies ===
    /// Enemy walking speed magnitude
    pub enemy_speed: f32,
    /// Patrol half-width in tiles around the spawn (None = whole level)
    pub enemy_patrol_tiles: Option<u32>,
    /// Slack below an enemy's top edge that still counts as a stomp
    pub stomp_tolerance: f32,
    /// Bounce after a stomp, as a fraction of the jump force
    pub stomp_bounce: f32,

    // === Scoring ===
    pub coin_score: u32,
    pub block_score: u32,
    pub stomp_score: u32,
    /// Player hit box shrink (per side) for coin pickup
    pub coin_pickup_inset: i32,

    // === Floating score text ===
    pub coin_text_speed: f32,
    pub block_text_speed: f32,
    pub stomp_text_speed: f32,
    /// Upward drift slows by this much per second
    pub text_deceleration: f32,

    // === Death sequence ===
    /// Player freezes (and flashes) until this age
    pub death_freeze_ms: u64,
    /// Player falls off screen until this age
    pub death_fall_ms: u64,
    /// Death screen shows until this age, then respawn or game over
    pub death_screen_ms: u64,
    /// Gravity multiplier for the death fall
    pub death_fall_gravity_factor: f32,

    // === Animation ===
    pub walk_anim_rate: f32,
    pub coin_anim_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1200.0,
            jump_force: -700.0,
            move_speed: 250.0,
            max_fall_speed: 600.0,

            camera_offset_x: 200.0,
            left_margin: 50.0,

            level_end_margin: 100.0,
            fall_death_margin: 50.0,

            enemy_speed: 50.0,
            enemy_patrol_tiles: None,
            stomp_tolerance: 10.0,
            stomp_bounce: 0.5,

            coin_score: COIN_SCORE,
            block_score: BLOCK_SCORE,
            stomp_score: STOMP_SCORE,
            coin_pickup_inset: 4,

            coin_text_speed: -80.0,
            block_text_speed: -100.0,
            stomp_text_speed: -120.0,
            text_deceleration: 50.0,

            death_freeze_ms: 500,
            death_fall_ms: 2000,
            death_screen_ms: 4000,
            death_fall_gravity_factor: 0.5,

            walk_anim_rate: 10.0,
            coin_anim_rate: 3.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from the file named by `SIDE_SCROLLER_TUNING`
    ///
    /// Never fails: unreadable or malformed files fall back to defaults.
    pub fn load() -> Self {
        match std::env::var_os(TUNING_ENV) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Load tuning from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Points awarded for a scoring event
    pub fn points(&self, kind: ScoreKind) -> u32 {
        match kind {
            ScoreKind::Coin => self.coin_score,
            ScoreKind::Block => self.block_score,
            ScoreKind::Stomp => self.stomp_score,
        }
    }

    /// Initial rise speed of the score popup for a scoring event
    pub fn text_speed(&self, kind: ScoreKind) -> f32 {
        match kind {
            ScoreKind::Coin => self.coin_text_speed,
            ScoreKind::Block => self.block_text_speed,
            ScoreKind::Stomp => self.stomp_text_speed,
        }
    }

    /// Vertical velocity after stomping an enemy
    pub fn stomp_bounce_velocity(&self) -> f32 {
        self.jump_force * self.stomp_bounce
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scores() {
        let tuning = Tuning::default();
        assert_eq!(tuning.points(ScoreKind::Coin), 50);
        assert_eq!(tuning.points(ScoreKind::Block), 100);
        assert_eq!(tuning.points(ScoreKind::Stomp), 200);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 900.0, "coin_score": 10 }"#).unwrap();
        assert_eq!(tuning.gravity, 900.0);
        assert_eq!(tuning.coin_score, 10);
        assert_eq!(tuning.jump_force, -700.0);
        assert_eq!(tuning.death_screen_ms, 4000);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Tuning::from_json("{ gravity: }").is_err());
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
        let path = scratch_file("tuning-missing", None);
        assert_eq!(Tuning::load_from(&path), Tuning::default());
    }

    #[test]
    fn test_load_malformed_file_uses_defaults() {
        let path = scratch_file("tuning-malformed", Some("{ gravity: }"));
        assert_eq!(Tuning::load_from(&path), Tuning::default());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_partial_file() {
        let path = scratch_file(
            "tuning-partial",
            Some(r#"{ "move_speed": 150.0, "stomp_score": 500 }"#),
        );
        let tuning = Tuning::load_from(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(tuning.move_speed, 150.0);
        assert_eq!(tuning.points(ScoreKind::Stomp), 500);
        assert_eq!(tuning.gravity, Tuning::default().gravity);
        assert_eq!(tuning.points(ScoreKind::Coin), 50);
    }

    #[test]
    fn test_stomp_bounce_is_half_jump() {
        let tuning = Tuning::default();
        assert_eq!(tuning.stomp_bounce_velocity(), -350.0);
    }
}
