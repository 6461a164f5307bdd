//! Side Scroller - a single-level side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Level loading, physics, collisions, camera and session state
//! - `frame`: Read-only per-frame snapshot handed to presentation
//! - `renderer`: Draws a frame snapshot onto a render surface
//! - `platform`: Render surface, input and clock abstractions
//! - `game`: Blocking entry point that drives one play session
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod frame;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{GameOutcome, GameSession, play, run_game};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Edge length of one level tile (pixels)
    pub const TILE_SIZE: i32 = 32;
    /// Player bounding box edge length (pixels)
    pub const PLAYER_SIZE: i32 = 32;
    /// Enemy bounding box edge length, slightly smaller than a tile
    pub const ENEMY_SIZE: i32 = 28;
    /// Coin hit box edge length
    pub const COIN_SIZE: i32 = 16;

    /// The synthetic ground strip starts this far above the viewport bottom
    pub const GROUND_STRIP_OFFSET: i32 = 80;

    /// Upper bound for a single frame's delta time (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Floating score text expires after this age
    pub const FLOATING_TEXT_LIFETIME_MS: u64 = 1000;

    /// Lives at the start of every session
    pub const STARTING_LIVES: u32 = 3;

    /// Player spawn used when a level has no spawn glyph
    pub const DEFAULT_SPAWN: (f32, f32) = (100.0, 100.0);

    /// Objects further than this outside the viewport are not drawn
    pub const CULL_MARGIN: f32 = 100.0;
}
