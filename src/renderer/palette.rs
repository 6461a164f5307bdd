//! Colour palette

use crate::platform::Color;

pub const SKY: Color = Color::rgb(92, 148, 252);
pub const CLOUD: Color = Color::rgb(255, 255, 255);
pub const OUTLINE: Color = Color::rgb(0, 0, 0);

// Ground
pub const GRASS: Color = Color::rgb(123, 192, 67);
pub const GRASS_BLADE: Color = Color::rgb(100, 170, 50);
pub const DIRT: Color = Color::rgb(139, 90, 43);
pub const DIRT_DARK: Color = Color::rgb(120, 75, 35);

// Bricks
pub const BRICK: Color = Color::rgb(184, 111, 80);
pub const BRICK_MORTAR: Color = Color::rgb(100, 70, 50);

// Question blocks
pub const QUESTION: Color = Color::rgb(255, 200, 100);
pub const QUESTION_HIGHLIGHT: Color = Color::rgb(255, 230, 150);
pub const QUESTION_SHADOW: Color = Color::rgb(200, 140, 60);
pub const QUESTION_MARK: Color = Color::rgb(255, 255, 255);
pub const USED_BLOCK: Color = Color::rgb(140, 110, 70);
pub const USED_BLOCK_LINES: Color = Color::rgb(100, 80, 50);

// Coins
pub const COIN: Color = Color::rgb(255, 215, 0);
pub const COIN_INNER: Color = Color::rgb(218, 165, 32);
pub const COIN_RIM: Color = Color::rgb(184, 134, 11);

// Enemies
pub const ENEMY_BODY: Color = Color::rgb(139, 69, 19);
pub const ENEMY_CAP: Color = Color::rgb(160, 82, 45);
pub const ENEMY_EYE: Color = Color::rgb(255, 255, 255);
pub const ENEMY_PUPIL: Color = Color::rgb(0, 0, 0);

// Player
pub const PLAYER_SHIRT: Color = Color::rgb(255, 0, 0);
pub const PLAYER_SKIN: Color = Color::rgb(255, 200, 150);
pub const PLAYER_EYE: Color = Color::rgb(0, 0, 0);
pub const PLAYER_MUSTACHE: Color = Color::rgb(60, 40, 20);
pub const PLAYER_CAP: Color = Color::rgb(200, 0, 0);
pub const PLAYER_OVERALLS: Color = Color::rgb(0, 0, 200);
pub const PLAYER_SHOE: Color = Color::rgb(100, 50, 0);

// HUD and overlays
pub const HUD_BOX: Color = Color::rgba(0, 0, 0, 200);
pub const HUD_SCORE: Color = Color::rgb(255, 220, 0);
pub const HUD_LIVES: Color = Color::rgb(255, 0, 0);
pub const HEART: Color = Color::rgb(255, 0, 0);
pub const TEXT: Color = Color::rgb(255, 255, 255);
pub const TEXT_DIM: Color = Color::rgb(200, 200, 200);
pub const POPUP: Color = Color::rgb(255, 255, 0);
pub const SCRIM: Color = Color::rgba(0, 0, 0, 200);
pub const BLACKOUT: Color = Color::rgb(0, 0, 0);
pub const PANEL_DEATH: Color = Color::rgb(139, 0, 0);
pub const PANEL_COMPLETE: Color = Color::rgb(0, 139, 0);
pub const TITLE_COMPLETE: Color = Color::rgb(255, 255, 0);
pub const TITLE_DEATH: Color = Color::rgb(255, 0, 0);
pub const TITLE_GAME_OVER: Color = Color::rgb(255, 50, 50);
