//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - Variable timestep, clamped per frame (no sub-stepping)
//! - Stable iteration order (authoring order of the level grid)
//! - Time only enters through the `now_ms` passed to `tick`

pub mod camera;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Contact, Rect, resolve_platform};
pub use level::{Glyph, LevelEntities, MAIN_LEVEL, TileGrid, load_level};
pub use state::{
    Coin, DeathCause, DeathPhase, Enemy, Facing, FloatingText, GameEvent, GamePhase, GameState,
    Platform, Player, PlayerState,
};
pub use tick::{TickInput, tick};
