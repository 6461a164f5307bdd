//! Per-frame simulation step
//!
//! Advances the session by one wall-clock frame. The frame delta is clamped
//! to `MAX_FRAME_DT` and integrated in a single step (no sub-stepping).

use glam::Vec2;

use super::camera;
use super::collision::{Contact, resolve_platform};
use super::state::{
    Coin, DeathCause, DeathPhase, Facing, GamePhase, GameState, Player, PlayerState,
};
use crate::tuning::ScoreKind;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left held
    pub move_left: bool,
    /// Right held (wins over left)
    pub move_right: bool,
    /// Jump pressed since the previous tick
    pub jump: bool,
}

/// Advance the game state to `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    let dt = state.advance_clock(now_ms);

    // Game over and level complete absorb everything
    if state.phase.is_terminal() {
        return;
    }

    let tuning = state.tuning;
    let player = &mut state.player;

    if input.jump && player.on_ground && player.is_alive() {
        player.vel.y = tuning.jump_force;
        player.on_ground = false;
    }

    player.vel.x = 0.0;
    if player.is_alive() {
        if input.move_left {
            player.vel.x = -tuning.move_speed;
            player.facing = Facing::Left;
        }
        if input.move_right {
            player.vel.x = tuning.move_speed;
            player.facing = Facing::Right;
        }
    }

    if let PlayerState::Dying {
        started_ms,
        fall_velocity,
    } = state.player.state
    {
        update_dying(state, started_ms, fall_velocity, dt);
        return;
    }

    let old_pos = integrate_player(state, dt);

    if state.player.pos.x >= state.level_width - tuning.level_end_margin {
        state.finish(GamePhase::LevelComplete);
        return;
    }

    resolve_platforms(state, old_pos);
    collect_coins(state);
    update_floating_texts(state, dt);
    update_enemies(state, old_pos, dt);
    check_fall_death(state);
    animate(state, dt);
}

/// Run the staged death sequence: freeze, fall, death screen, then resolve
fn update_dying(state: &mut GameState, started_ms: u64, mut fall_velocity: f32, dt: f32) {
    let tuning = state.tuning;
    let elapsed = state.time_ms.saturating_sub(started_ms);

    match DeathPhase::at(elapsed, &tuning) {
        DeathPhase::Freeze => {
            state.player.vel = Vec2::ZERO;
        }
        DeathPhase::Fall => {
            state.player.vel = Vec2::ZERO;
            fall_velocity += tuning.gravity * dt * tuning.death_fall_gravity_factor;
            state.player.pos.y += fall_velocity * dt;
            state.player.state = PlayerState::Dying {
                started_ms,
                fall_velocity,
            };
        }
        DeathPhase::Screen => {}
        DeathPhase::Done => {
            if state.lives == 0 {
                state.finish(GamePhase::GameOver);
            } else {
                state.respawn();
            }
        }
    }
}

/// Gravity, integration, left-edge clamp and camera follow.
/// Returns the position before integration.
fn integrate_player(state: &mut GameState, dt: f32) -> Vec2 {
    let tuning = state.tuning;
    let player = &mut state.player;

    player.vel.y = (player.vel.y + tuning.gravity * dt).min(tuning.max_fall_speed);

    let old_pos = player.pos;
    player.pos += player.vel * dt;
    player.pos.x = camera::clamp_player_left(player.pos.x, state.camera_x, tuning.left_margin);

    state.camera_x = camera::follow(
        state.camera_x,
        player.pos.x,
        tuning.camera_offset_x,
        state.level_width,
        state.viewport_width,
    );

    old_pos
}

/// Resolve the player against every platform, in order
fn resolve_platforms(state: &mut GameState, old_pos: Vec2) {
    let size = Player::size();
    let player = &mut state.player;
    player.on_ground = false;

    // Break effects are applied after the loop (award needs all of state)
    let mut broken = Vec::new();

    for platform in &mut state.level.platforms {
        match resolve_platform(
            &mut player.pos,
            &mut player.vel,
            old_pos,
            size,
            &platform.rect,
        ) {
            Contact::Landed => player.on_ground = true,
            Contact::Ceiling => {
                if platform.try_break() {
                    broken.push(platform.rect);
                }
            }
            _ => {}
        }
    }

    for rect in broken {
        let center_x = rect.x + rect.w / 2;
        state.award(
            ScoreKind::Block,
            Vec2::new(rect.x as f32 + rect.w as f32 / 2.0, rect.y as f32 - 10.0),
        );
        state.level.coins.push(Coin::new(center_x, rect.y - 20));
    }
}

fn collect_coins(state: &mut GameState) {
    let grab = state.player.rect().inset(state.tuning.coin_pickup_inset);

    let mut collected = Vec::new();
    for coin in &mut state.level.coins {
        if !coin.collected && grab.intersects(&coin.hitbox()) && coin.collect() {
            collected.push(Vec2::new(coin.x as f32, coin.y as f32 - 10.0));
        }
    }

    for at in collected {
        state.award(ScoreKind::Coin, at);
    }
}

fn update_floating_texts(state: &mut GameState, dt: f32) {
    let deceleration = state.tuning.text_deceleration;
    let now_ms = state.time_ms;
    for text in &mut state.floating_texts {
        text.update(dt, deceleration, now_ms);
    }
    state.floating_texts.retain(|t| t.active);
}

/// Walk enemies and settle player contact: stomp from above, otherwise die
fn update_enemies(state: &mut GameState, old_pos: Vec2, dt: f32) {
    let tuning = state.tuning;
    let size = Player::size();
    let level_width = state.level_width;
    let player_rect = state.player.rect();

    let mut stomped = Vec::new();
    let mut hit = false;

    for enemy in state.level.enemies.iter_mut().filter(|e| e.active) {
        enemy.step(dt, level_width);

        if hit || !player_rect.intersects(&enemy.rect) {
            continue;
        }

        let from_above = old_pos.y + size <= enemy.rect.y as f32 + tuning.stomp_tolerance;
        if state.player.vel.y > 0.0 && from_above {
            enemy.defeat();
            state.player.vel.y = tuning.stomp_bounce_velocity();
            stomped.push(Vec2::new(
                enemy.rect.x as f32 + enemy.rect.w as f32 / 2.0,
                enemy.rect.y as f32 - 10.0,
            ));
        } else {
            hit = true;
        }
    }

    for at in stomped {
        state.award(ScoreKind::Stomp, at);
    }
    if hit {
        state.start_dying(DeathCause::Enemy);
    }
}

fn check_fall_death(state: &mut GameState) {
    let limit = state.viewport_height + state.tuning.fall_death_margin;
    if state.player.is_alive() && state.player.pos.y > limit {
        state.start_dying(DeathCause::Fall);
    }
}

fn animate(state: &mut GameState, dt: f32) {
    let tuning = state.tuning;
    let player = &mut state.player;
    if player.vel.x != 0.0 && player.on_ground {
        player.anim_phase += dt * tuning.walk_anim_rate;
    }
    for coin in &mut state.level.coins {
        coin.anim_phase += dt * tuning.coin_anim_rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Rect;
    use crate::sim::level::TileGrid;
    use crate::sim::state::{Enemy, GameEvent, Platform};
    use crate::tuning::Tuning;

    const FRAME_MS: u64 = 16;

    /// 64 tiles wide, 640x480 viewport, no platforms, spawn at (100, 100)
    fn sandbox() -> GameState {
        let grid = TileGrid::from_rows(&[" ".repeat(64)]);
        let mut state = GameState::new(&grid, 640.0, 480.0, Tuning::default(), 0);
        state.level.platforms.clear();
        state
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// Tick every frame until `until_ms`
    fn run_until(state: &mut GameState, input: &TickInput, until_ms: u64) {
        let mut now = state.time_ms;
        while now < until_ms {
            now = (now + FRAME_MS).min(until_ms);
            tick(state, input, now);
        }
    }

    #[test]
    fn test_landing_resolution() {
        let mut state = sandbox();
        state
            .level
            .platforms
            .push(Platform::solid(Rect::new(64, 200, 96, 32)));
        state.player.pos = Vec2::new(100.0, 165.0);
        state.player.vel = Vec2::new(0.0, 300.0);

        tick(&mut state, &idle(), FRAME_MS);

        assert_eq!(state.player.pos.y, 168.0);
        assert_eq!(state.player.vel.y, 0.0);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_standing_stays_grounded() {
        let mut state = sandbox();
        state
            .level
            .platforms
            .push(Platform::solid(Rect::new(0, 200, 640, 32)));
        state.player.pos = Vec2::new(100.0, 168.0);

        run_until(&mut state, &idle(), 500);
        assert_eq!(state.player.pos.y, 168.0);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut state = sandbox();
        state
            .level
            .platforms
            .push(Platform::solid(Rect::new(0, 200, 640, 32)));
        state.player.pos = Vec2::new(100.0, 168.0);
        tick(&mut state, &idle(), FRAME_MS);
        assert!(state.player.on_ground);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, 2 * FRAME_MS);
        assert!(!state.player.on_ground);
        assert!(state.player.vel.y < -600.0);

        // Mid-air jump requests are ignored
        let vy = state.player.vel.y;
        tick(&mut state, &jump, 3 * FRAME_MS);
        assert!(state.player.vel.y > vy);
    }

    #[test]
    fn test_question_block_breaks_once() {
        let mut state = sandbox();
        let block = Rect::new(96, 100, 32, 32);
        state.level.platforms.push(Platform::question(block));
        let coins_before = state.level.coins.len();

        state.player.pos = Vec2::new(100.0, 135.0);
        state.player.vel = Vec2::new(0.0, -400.0);
        tick(&mut state, &idle(), FRAME_MS);

        assert!(state.level.platforms[0].hit);
        assert_eq!(state.player.pos.y, 132.0);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.score, 100);
        assert_eq!(state.level.coins.len(), coins_before + 1);
        let coin = state.level.coins.last().unwrap();
        assert_eq!((coin.x, coin.y), (112, 80));
        assert_eq!(state.floating_texts.len(), 1);
        assert_eq!(state.floating_texts[0].value, 100);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::BlockHit { points: 100 }]
        );

        // A second bump does nothing
        state.player.pos = Vec2::new(100.0, 135.0);
        state.player.vel = Vec2::new(0.0, -400.0);
        tick(&mut state, &idle(), 2 * FRAME_MS);
        assert_eq!(state.score, 100);
        assert_eq!(state.level.coins.len(), coins_before + 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_coin_collected_once() {
        let mut state = sandbox();
        state.level.coins.push(Coin::new(116, 116));
        state.player.pos = Vec2::new(100.0, 100.0);

        tick(&mut state, &idle(), FRAME_MS);
        assert!(state.level.coins[0].collected);
        assert_eq!(state.score, 50);
        assert_eq!(state.floating_texts.len(), 1);

        state.player.pos = Vec2::new(100.0, 100.0);
        state.player.vel = Vec2::ZERO;
        tick(&mut state, &idle(), 2 * FRAME_MS);
        assert_eq!(state.score, 50);
    }

    #[test]
    fn test_stomp_defeats_enemy() {
        let mut state = sandbox();
        state.level.enemies.push(Enemy::new(100, 300, 50.0));
        state.player.pos = Vec2::new(100.0, 265.0);
        state.player.vel = Vec2::new(0.0, 300.0);

        tick(&mut state, &idle(), FRAME_MS);

        assert!(!state.level.enemies[0].active);
        assert_eq!(state.score, 200);
        assert_eq!(state.player.vel.y, -350.0);
        assert!(state.player.is_alive());
        assert_eq!(state.lives, 3);

        // Defeated enemies stay put and never interact again
        let x = state.level.enemies[0].pos.x;
        state.player.pos = Vec2::new(100.0, 300.0);
        state.player.vel = Vec2::ZERO;
        tick(&mut state, &idle(), 2 * FRAME_MS);
        assert_eq!(state.level.enemies[0].pos.x, x);
        assert!(!state.level.enemies[0].active);
        assert!(state.player.is_alive());
    }

    #[test]
    fn test_enemy_side_contact_kills() {
        let mut state = sandbox();
        state.level.enemies.push(Enemy::new(110, 300, -50.0));
        state.player.pos = Vec2::new(100.0, 300.0);

        tick(&mut state, &idle(), FRAME_MS);

        assert!(!state.player.is_alive());
        assert_eq!(state.lives, 2);
        assert_eq!(state.deaths, 1);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(state.level.enemies[0].active);
    }

    #[test]
    fn test_two_enemies_cost_one_life() {
        let mut state = sandbox();
        state.level.enemies.push(Enemy::new(105, 300, 50.0));
        state.level.enemies.push(Enemy::new(110, 300, -50.0));
        state.player.pos = Vec2::new(100.0, 300.0);

        tick(&mut state, &idle(), FRAME_MS);
        assert_eq!(state.lives, 2);
        assert_eq!(state.deaths, 1);
    }

    #[test]
    fn test_death_sequence_respawns() {
        let mut state = sandbox();
        state.level.coins.push(Coin::new(116, 316));
        state.level.enemies.push(Enemy::new(110, 300, -50.0));
        state.player.pos = Vec2::new(100.0, 300.0);
        tick(&mut state, &idle(), FRAME_MS);
        assert!(!state.player.is_alive());
        let score = state.score;

        // Frozen: input ignored, no movement
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        let frozen_at = state.player.pos;
        run_until(&mut state, &right, 400);
        assert_eq!(state.player.pos, frozen_at);

        // Falling
        run_until(&mut state, &right, 1500);
        assert!(state.player.pos.y > frozen_at.y);
        assert_eq!(state.player.pos.x, frozen_at.x);

        // Respawn after the death screen
        run_until(&mut state, &idle(), FRAME_MS + 4000);
        assert!(state.player.is_alive());
        assert_eq!(state.player.pos, state.level.spawn);
        assert_eq!(state.camera_x, 0.0);
        assert_eq!(state.score, score);
        assert!(state.level.coins[0].collected);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_fall_death_and_game_over() {
        let mut state = sandbox();
        let mut now = 0;

        for expected_lives in [2, 1, 0] {
            state.player.pos = Vec2::new(100.0, 600.0);
            now += FRAME_MS;
            tick(&mut state, &idle(), now);
            assert!(!state.player.is_alive());
            assert_eq!(state.lives, expected_lives);

            now += 4000;
            run_until(&mut state, &idle(), now);
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.deaths, 3);

        // Absorbing: nothing moves any more
        let pos = state.player.pos;
        run_until(&mut state, &idle(), now + 1000);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_level_complete_stops_simulation() {
        let mut state = sandbox();
        state
            .level
            .platforms
            .push(Platform::solid(Rect::new(0, 400, 2048, 80)));
        state.player.pos = Vec2::new(state.level_width - 150.0, 368.0);
        state.camera_x = state.level_width - 640.0;

        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        run_until(&mut state, &right, 1000);

        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(state.player.pos.x >= state.level_width - 100.0);
        let completions = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::LevelComplete { .. }))
            .count();
        assert_eq!(completions, 1);

        let pos = state.player.pos;
        run_until(&mut state, &right, 2000);
        assert_eq!(state.player.pos, pos);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_player_cannot_leave_view_left() {
        let mut state = sandbox();
        state.camera_x = 200.0;
        state.player.pos = Vec2::new(255.0, 100.0);

        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        run_until(&mut state, &left, 200);
        assert_eq!(state.player.pos.x, 250.0);
        assert_eq!(state.camera_x, 200.0);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = sandbox();
        state.player.pos = Vec2::new(100.0, 100.0);
        tick(&mut state, &idle(), 5000);
        // One 50 ms step of gravity, not five seconds
        assert!((state.player.vel.y - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_right_wins_over_left() {
        let mut state = sandbox();
        state.player.pos = Vec2::new(300.0, 100.0);
        let both = TickInput {
            move_left: true,
            move_right: true,
            jump: false,
        };
        tick(&mut state, &both, FRAME_MS);
        assert_eq!(state.player.vel.x, 250.0);
        assert_eq!(state.player.facing, Facing::Right);
    }
}
