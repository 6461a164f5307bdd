//! Game state and core simulation types
//!
//! One `GameState` is one play session: it exclusively owns every entity
//! collection plus score, lives and the death/terminal bookkeeping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::{LevelEntities, TileGrid, load_level};
use crate::consts::*;
use crate::tuning::{ScoreKind, Tuning};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play, including the death/respawn sequence
    Playing,
    /// Out of lives
    GameOver,
    /// Reached the end of the level
    LevelComplete,
}

impl GamePhase {
    /// Terminal phases absorb: no further simulation happens
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::LevelComplete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Player life state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerState {
    Alive,
    /// Death sequence in progress (the life is already spent)
    Dying { started_ms: u64, fall_velocity: f32 },
}

/// Stage of the death sequence, derived from time since death
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathPhase {
    /// Player frozen in place
    Freeze,
    /// Player drops off the screen
    Fall,
    /// Death screen with message and counters
    Screen,
    /// Sequence over: respawn or game over
    Done,
}

impl DeathPhase {
    pub fn at(elapsed_ms: u64, tuning: &Tuning) -> Self {
        if elapsed_ms < tuning.death_freeze_ms {
            DeathPhase::Freeze
        } else if elapsed_ms < tuning.death_fall_ms {
            DeathPhase::Fall
        } else if elapsed_ms < tuning.death_screen_ms {
            DeathPhase::Screen
        } else {
            DeathPhase::Done
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Touched an enemy without stomping it
    Enemy,
    /// Fell below the viewport
    Fall,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { points: u32 },
    BlockHit { points: u32 },
    EnemyStomped { points: u32 },
    PlayerDied { cause: DeathCause, lives_left: u32 },
    Respawned,
    GameOver { score: u32 },
    LevelComplete { score: u32 },
}

/// A static level rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// Question block
    pub breakable: bool,
    /// Ground or brick
    pub solid: bool,
    /// Question block already bumped
    pub hit: bool,
}

impl Platform {
    pub fn solid(rect: Rect) -> Self {
        Self {
            rect,
            breakable: false,
            solid: true,
            hit: false,
        }
    }

    pub fn question(rect: Rect) -> Self {
        Self {
            rect,
            breakable: true,
            solid: false,
            hit: false,
        }
    }

    /// Mark an unhit question block as hit; true only on that transition
    pub fn try_break(&mut self) -> bool {
        if self.breakable && !self.hit {
            self.hit = true;
            true
        } else {
            false
        }
    }
}

/// A walking enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vx: f32,
    pub rect: Rect,
    /// Cleared forever once stomped
    pub active: bool,
    /// Patrol range for `pos.x` (None = whole level)
    pub patrol: Option<(f32, f32)>,
}

impl Enemy {
    pub fn new(x: i32, y: i32, vx: f32) -> Self {
        Self {
            pos: Vec2::new(x as f32, y as f32),
            vx,
            rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            active: true,
            patrol: None,
        }
    }

    /// Walk for `dt` seconds, turning around at the level or patrol bounds
    pub fn step(&mut self, dt: f32, level_width: f32) {
        self.pos.x += self.vx * dt;
        self.rect.x = self.pos.x as i32;
        self.rect.y = self.pos.y as i32;

        let (min_x, max_x) = self
            .patrol
            .unwrap_or((0.0, level_width - self.rect.w as f32));
        if self.pos.x < min_x {
            self.vx = self.vx.abs();
        } else if self.pos.x > max_x {
            self.vx = -self.vx.abs();
        }
    }

    pub fn defeat(&mut self) {
        self.active = false;
    }

    pub fn facing_right(&self) -> bool {
        self.vx > 0.0
    }
}

/// A collectible coin (position is its centre)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub x: i32,
    pub y: i32,
    pub collected: bool,
    /// Spin animation phase (visual only)
    pub anim_phase: f32,
}

impl Coin {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            collected: false,
            anim_phase: 0.0,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.x, self.y, COIN_SIZE, COIN_SIZE)
    }

    /// Collect the coin; true only the first time
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }
}

/// A "+N" score popup drifting upward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    pub pos: Vec2,
    pub vy: f32,
    pub value: u32,
    pub spawn_ms: u64,
    pub active: bool,
}

impl FloatingText {
    pub fn new(pos: Vec2, vy: f32, value: u32, spawn_ms: u64) -> Self {
        Self {
            pos,
            vy,
            value,
            spawn_ms,
            active: true,
        }
    }

    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.spawn_ms)
    }

    /// Drift and decelerate; deactivate once past the lifetime
    pub fn update(&mut self, dt: f32, deceleration: f32, now_ms: u64) {
        if !self.active {
            return;
        }
        self.pos.y += self.vy * dt;
        self.vy += deceleration * dt;
        if self.age_ms(now_ms) > FLOATING_TEXT_LIFETIME_MS {
            self.active = false;
        }
    }
}

/// The player-controlled character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    pub facing: Facing,
    /// Walk cycle phase (visual only)
    pub anim_phase: f32,
    pub state: PlayerState,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            on_ground: false,
            facing: Facing::Right,
            anim_phase: 0.0,
            state: PlayerState::Alive,
        }
    }

    pub fn size() -> f32 {
        PLAYER_SIZE as f32
    }

    /// Integer bounding box used for pickups and enemy contact
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x as i32,
            self.pos.y as i32,
            PLAYER_SIZE,
            PLAYER_SIZE,
        )
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.state, PlayerState::Alive)
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Level width in pixels (longest grid row × tile size)
    pub level_width: f32,
    pub level: LevelEntities,
    pub player: Player,
    pub floating_texts: Vec<FloatingText>,
    /// Score (never decreases)
    pub score: u32,
    /// Remaining lives
    pub lives: u32,
    /// Deaths so far this session
    pub deaths: u32,
    /// World x of the viewport's left edge
    pub camera_x: f32,
    pub phase: GamePhase,
    /// Timestamp of the most recent tick (ms)
    pub time_ms: u64,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a fresh session on `grid`
    pub fn new(
        grid: &TileGrid,
        viewport_width: f32,
        viewport_height: f32,
        tuning: Tuning,
        now_ms: u64,
    ) -> Self {
        let mut level = LevelEntities::default();
        load_level(
            grid,
            TILE_SIZE,
            viewport_height as i32,
            &tuning,
            &mut level,
        );
        let level_width = grid.level_width_px(TILE_SIZE) as f32;

        log::info!(
            "Level loaded: {} platforms, {} coins, {} enemies, {} px wide",
            level.platforms.len(),
            level.coins.len(),
            level.enemies.len(),
            level_width
        );

        Self {
            tuning,
            viewport_width,
            viewport_height,
            level_width,
            player: Player::new(level.spawn),
            level,
            floating_texts: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            deaths: 0,
            camera_x: 0.0,
            phase: GamePhase::Playing,
            time_ms: now_ms,
            events: Vec::new(),
        }
    }

    /// Record a new timestamp and return the clamped frame delta (seconds)
    pub fn advance_clock(&mut self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.time_ms);
        self.time_ms = self.time_ms.max(now_ms);
        (elapsed as f32 / 1000.0).min(MAX_FRAME_DT)
    }

    /// Top of the synthetic ground strip
    pub fn ground_y(&self) -> i32 {
        self.viewport_height as i32 - GROUND_STRIP_OFFSET
    }

    /// Add points and spawn the matching popup at `at`
    pub fn award(&mut self, kind: ScoreKind, at: Vec2) {
        let points = self.tuning.points(kind);
        self.score += points;
        self.floating_texts.push(FloatingText::new(
            at,
            self.tuning.text_speed(kind),
            points,
            self.time_ms,
        ));

        let event = match kind {
            ScoreKind::Coin => GameEvent::CoinCollected { points },
            ScoreKind::Block => GameEvent::BlockHit { points },
            ScoreKind::Stomp => GameEvent::EnemyStomped { points },
        };
        log::debug!("{:?} -> score {}", event, self.score);
        self.events.push(event);
    }

    /// Begin the death sequence; a no-op if already dying
    ///
    /// The life is spent immediately, not at the end of the sequence.
    pub fn start_dying(&mut self, cause: DeathCause) -> bool {
        if !self.player.is_alive() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.deaths += 1;
        self.player.vel = Vec2::ZERO;
        self.player.state = PlayerState::Dying {
            started_ms: self.time_ms,
            fall_velocity: 0.0,
        };

        log::info!("Died ({:?}), lives remaining: {}", cause, self.lives);
        self.events.push(GameEvent::PlayerDied {
            cause,
            lives_left: self.lives,
        });
        true
    }

    /// Put the player back at the spawn point; progress is kept
    pub fn respawn(&mut self) {
        self.player.pos = self.level.spawn;
        self.player.vel = Vec2::ZERO;
        self.player.on_ground = false;
        self.player.state = PlayerState::Alive;
        self.camera_x = 0.0;

        log::info!("Respawned at {:?}", self.level.spawn);
        self.events.push(GameEvent::Respawned);
    }

    /// Enter a terminal phase
    pub fn finish(&mut self, phase: GamePhase) {
        debug_assert!(phase.is_terminal());
        self.phase = phase;
        let event = match phase {
            GamePhase::LevelComplete => GameEvent::LevelComplete { score: self.score },
            _ => GameEvent::GameOver { score: self.score },
        };
        log::info!("{:?} (deaths: {})", event, self.deaths);
        self.events.push(event);
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_state() -> GameState {
        let grid = TileGrid::from_rows(&["P                                   "]);
        GameState::new(&grid, 640.0, 480.0, Tuning::default(), 0)
    }

    #[test]
    fn test_new_session_defaults() {
        let state = flat_state();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.deaths, 0);
        assert_eq!(state.camera_x, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::ZERO);
    }

    #[test]
    fn test_advance_clock_clamps_dt() {
        let mut state = flat_state();
        assert!((state.advance_clock(16) - 0.016).abs() < 1e-6);
        assert_eq!(state.advance_clock(1016), MAX_FRAME_DT);
        // Time never runs backwards
        assert_eq!(state.advance_clock(500), 0.0);
        assert_eq!(state.time_ms, 1016);
    }

    #[test]
    fn test_start_dying_only_once_per_life() {
        let mut state = flat_state();
        assert!(state.start_dying(DeathCause::Enemy));
        assert!(!state.start_dying(DeathCause::Fall));
        assert_eq!(state.lives, 2);
        assert_eq!(state.deaths, 1);
    }

    #[test]
    fn test_lives_never_negative() {
        let mut state = flat_state();
        for _ in 0..5 {
            state.start_dying(DeathCause::Fall);
            state.respawn();
        }
        assert_eq!(state.lives, 0);
        assert_eq!(state.deaths, 5);
    }

    #[test]
    fn test_try_break_once() {
        let mut block = Platform::question(Rect::new(0, 0, 32, 32));
        assert!(block.try_break());
        assert!(!block.try_break());
        assert!(block.hit);

        let mut brick = Platform::solid(Rect::new(0, 0, 32, 32));
        assert!(!brick.try_break());
        assert!(!brick.hit);
    }

    #[test]
    fn test_enemy_turns_at_level_edge() {
        let mut enemy = Enemy::new(0, 0, -50.0);
        enemy.step(0.05, 320.0);
        assert!(enemy.pos.x < 0.0);
        assert!(enemy.vx > 0.0);

        let mut enemy = Enemy::new(290, 0, 50.0);
        enemy.step(0.05, 320.0);
        assert!(enemy.vx < 0.0);
    }

    #[test]
    fn test_enemy_respects_patrol() {
        let mut enemy = Enemy::new(100, 0, 50.0);
        enemy.patrol = Some((64.0, 101.0));
        enemy.step(0.05, 10_000.0);
        assert!(enemy.vx < 0.0);
    }

    #[test]
    fn test_floating_text_expires() {
        let mut text = FloatingText::new(Vec2::new(0.0, 100.0), -80.0, 50, 0);
        text.update(0.016, 50.0, 16);
        assert!(text.active);
        assert!(text.pos.y < 100.0);
        text.update(0.016, 50.0, 1001);
        assert!(!text.active);
    }

    #[test]
    fn test_coin_collect_once() {
        let mut coin = Coin::new(16, 16);
        assert!(coin.collect());
        assert!(!coin.collect());
    }
}
