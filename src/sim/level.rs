//! Level data and the level loader
//!
//! Levels are authored as rows of text, one glyph per tile:
//!
//! | glyph | meaning                     |
//! |-------|-----------------------------|
//! | `' '` | empty                       |
//! | `G`   | ground block                |
//! | `B`   | brick block                 |
//! | `?`   | question block              |
//! | `C`   | coin                        |
//! | `E`   | enemy walking right         |
//! | `e`   | enemy walking left          |
//! | `P`   | player start                |
//!
//! Unknown glyphs and short rows are ignored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{Coin, Enemy, Platform};
use crate::consts::{DEFAULT_SPAWN, ENEMY_SIZE, GROUND_STRIP_OFFSET};
use crate::tuning::Tuning;

/// The built-in level. Row 19 is the ground-level row.
pub const MAIN_LEVEL: &[&str] = &[
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "                                                                                                                                                                          ",
    "             ?           ?                      C   C   C                   ?       ?       ?                                                                            ",
    "                                                                                                                                                                          ",
    "      C     BBBB         BBBB                       BBB                 BBB   BBB   BBB                                         C                                        ",
    "    BBBB                                                                                                                    BBBBBBBB                                      ",
    "                                                                                                                                                                          ",
    "  P            E              e                 E           e                   E               e                       E                   e                           ",
];

/// Meaning of one level character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Ground,
    Brick,
    Question,
    Coin,
    EnemyRight,
    EnemyLeft,
    PlayerStart,
}

impl Glyph {
    /// Decode a level character; unknown characters read as empty
    pub fn from_char(c: char) -> Self {
        match c {
            'G' => Glyph::Ground,
            'B' => Glyph::Brick,
            '?' => Glyph::Question,
            'C' => Glyph::Coin,
            'E' => Glyph::EnemyRight,
            'e' => Glyph::EnemyLeft,
            'P' => Glyph::PlayerStart,
            _ => Glyph::Empty,
        }
    }
}

/// Immutable grid of level characters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileGrid {
    rows: Vec<Vec<char>>,
}

impl TileGrid {
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        Self {
            rows: rows.iter().map(|r| r.as_ref().chars().collect()).collect(),
        }
    }

    /// Parse a multi-line level document (one row per line)
    pub fn parse(text: &str) -> Self {
        Self {
            rows: text.lines().map(|line| line.chars().collect()).collect(),
        }
    }

    /// The compiled-in level
    pub fn main_level() -> Self {
        Self::from_rows(MAIN_LEVEL)
    }

    pub fn height_tiles(&self) -> usize {
        self.rows.len()
    }

    /// Width of the longest row
    pub fn width_tiles(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn level_width_px(&self, tile_size: i32) -> i32 {
        self.width_tiles() as i32 * tile_size
    }

    /// Glyph at a cell; cells past the end of a row are empty
    pub fn glyph_at(&self, row: usize, col: usize) -> Glyph {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or(Glyph::Empty, |&c| Glyph::from_char(c))
    }

    /// Every cell as `(row, col, glyph)`, row-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Glyph)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, &c)| (row, col, Glyph::from_char(c)))
        })
    }
}

/// Entity collections produced by the loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelEntities {
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub spawn: Vec2,
}

impl Default for LevelEntities {
    fn default() -> Self {
        Self {
            platforms: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            spawn: Vec2::new(DEFAULT_SPAWN.0, DEFAULT_SPAWN.1),
        }
    }
}

/// Turn a tile grid into platforms, coins, enemies and a spawn point
///
/// Clears `out` first, so it can be re-run to reset a level. After the grid
/// a full-width ground strip is appended at `viewport_height - 80`; it is
/// not deduplicated against authored ground tiles.
pub fn load_level(
    grid: &TileGrid,
    tile_size: i32,
    viewport_height: i32,
    tuning: &Tuning,
    out: &mut LevelEntities,
) {
    out.platforms.clear();
    out.coins.clear();
    out.enemies.clear();
    out.spawn = Vec2::new(DEFAULT_SPAWN.0, DEFAULT_SPAWN.1);

    let level_width = grid.level_width_px(tile_size);
    let mut spawn_seen = false;

    for (row, col, glyph) in grid.cells() {
        let x = col as i32 * tile_size;
        let y = row as i32 * tile_size;
        let tile = Rect::new(x, y, tile_size, tile_size);

        match glyph {
            Glyph::Ground | Glyph::Brick => out.platforms.push(Platform::solid(tile)),
            Glyph::Question => out.platforms.push(Platform::question(tile)),
            Glyph::Coin => out
                .coins
                .push(Coin::new(x + tile_size / 2, y + tile_size / 2)),
            Glyph::EnemyRight | Glyph::EnemyLeft => {
                let speed = if glyph == Glyph::EnemyRight {
                    tuning.enemy_speed
                } else {
                    -tuning.enemy_speed
                };
                let mut enemy = Enemy::new(x, y, speed);
                enemy.patrol = tuning.enemy_patrol_tiles.map(|tiles| {
                    let reach = (tiles as i32 * tile_size) as f32;
                    let max_x = (level_width - ENEMY_SIZE) as f32;
                    ((x as f32 - reach).max(0.0), (x as f32 + reach).min(max_x))
                });
                out.enemies.push(enemy);
            }
            Glyph::PlayerStart => {
                if spawn_seen {
                    log::debug!("Duplicate player start at row {}, col {}", row, col);
                }
                spawn_seen = true;
                out.spawn = Vec2::new(x as f32, y as f32);
            }
            Glyph::Empty => {}
        }
    }

    let ground_y = viewport_height - GROUND_STRIP_OFFSET;
    for x in (0..level_width).step_by(tile_size.max(1) as usize) {
        out.platforms.push(Platform::solid(Rect::new(
            x,
            ground_y,
            tile_size,
            GROUND_STRIP_OFFSET,
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn load(rows: &[&str], viewport_height: i32) -> LevelEntities {
        let mut out = LevelEntities::default();
        load_level(
            &TileGrid::from_rows(rows),
            32,
            viewport_height,
            &Tuning::default(),
            &mut out,
        );
        out
    }

    #[test]
    fn test_glyphs_produce_entities() {
        let level = load(&["G B ? C", "P E e"], 480);

        // 3 authored platforms + 7 ground strip tiles
        assert_eq!(level.platforms.len(), 3 + 7);
        assert!(level.platforms[0].solid && !level.platforms[0].breakable);
        assert!(level.platforms[1].solid);
        assert!(level.platforms[2].breakable && !level.platforms[2].hit);
        assert_eq!(level.platforms[2].rect, Rect::new(128, 0, 32, 32));

        assert_eq!(level.coins.len(), 1);
        assert_eq!((level.coins[0].x, level.coins[0].y), (208, 16));

        assert_eq!(level.enemies.len(), 2);
        assert_eq!(level.enemies[0].vx, 50.0);
        assert_eq!(level.enemies[1].vx, -50.0);
        assert_eq!(level.enemies[0].rect, Rect::new(64, 32, 28, 28));

        assert_eq!(level.spawn, Vec2::new(0.0, 32.0));
    }

    #[test]
    fn test_ground_strip_spans_level() {
        let level = load(&["    ", "          "], 480);
        assert_eq!(level.platforms.len(), 10);
        for (i, platform) in level.platforms.iter().enumerate() {
            assert_eq!(platform.rect, Rect::new(i as i32 * 32, 400, 32, 80));
        }
    }

    #[test]
    fn test_last_spawn_wins() {
        let level = load(&["P  P"], 480);
        assert_eq!(level.spawn, Vec2::new(96.0, 0.0));
    }

    #[test]
    fn test_missing_spawn_uses_default() {
        let level = load(&["   "], 480);
        assert_eq!(level.spawn, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_unknown_glyphs_ignored() {
        let level = load(&["xyz#", ""], 480);
        assert!(level.coins.is_empty());
        assert!(level.enemies.is_empty());
        assert_eq!(level.platforms.len(), 4);
    }

    #[test]
    fn test_patrol_bounds_clamped_to_level() {
        let tuning = Tuning {
            enemy_patrol_tiles: Some(2),
            ..Default::default()
        };
        let mut out = LevelEntities::default();
        load_level(&TileGrid::from_rows(&["E     e"]), 32, 480, &tuning, &mut out);
        assert_eq!(out.enemies[0].patrol, Some((0.0, 64.0)));
        assert_eq!(out.enemies[1].patrol, Some((128.0, 196.0)));
    }

    #[test]
    fn test_main_level_dimensions() {
        let grid = TileGrid::main_level();
        assert_eq!(grid.height_tiles(), 20);
        assert!(grid.width_tiles() >= 170);
        assert_eq!(grid.glyph_at(19, 2), Glyph::PlayerStart);
        assert_eq!(grid.glyph_at(14, 13), Glyph::Question);
        assert_eq!(grid.glyph_at(0, 10_000), Glyph::Empty);
    }

    #[test]
    fn test_parse_multiline() {
        let grid = TileGrid::parse("  C\nP  \nGGG");
        assert_eq!(grid.height_tiles(), 3);
        assert_eq!(grid.glyph_at(1, 0), Glyph::PlayerStart);
        assert_eq!(grid.glyph_at(2, 1), Glyph::Ground);
    }

    proptest! {
        #[test]
        fn prop_loader_is_idempotent(
            rows in prop::collection::vec("[ GB?CEeP]{0,24}", 0..12),
            viewport_height in 200i32..900,
        ) {
            let grid = TileGrid::from_rows(rows.as_slice());
            let tuning = Tuning::default();
            let mut first = LevelEntities::default();
            load_level(&grid, 32, viewport_height, &tuning, &mut first);
            let mut second = first.clone();
            load_level(&grid, 32, viewport_height, &tuning, &mut second);
            prop_assert_eq!(first, second);
        }
    }
}
