//! Read-only per-frame snapshot for presentation
//!
//! A `FrameView` is everything a renderer needs for one frame, already in
//! screen coordinates and already culled. Building it never mutates the
//! game state.

use crate::consts::{COIN_SIZE, CULL_MARGIN, FLOATING_TEXT_LIFETIME_MS};
use crate::settings::Settings;
use crate::sim::camera;
use crate::sim::collision::Rect;
use crate::sim::state::{DeathPhase, Facing, GamePhase, GameState, Platform, PlayerState};

/// Shown on the death screen, picked by death count
pub const DEATH_MESSAGES: [&str; 6] = [
    "YOU DIED!",
    "OUCH!",
    "TRY AGAIN!",
    "GAME OVER... NOT!",
    "SO CLOSE!",
    "KEEP TRYING!",
];

pub const CLOUD_COUNT: usize = 5;
const CLOUD_SIZE: (i32, i32) = (60, 30);
const CLOUD_PARALLAX: f32 = 0.3;

/// Solid platforms within this distance of the ground strip draw as ground
const GROUND_LOOK_SLACK: i32 = 5;

pub fn death_message(deaths: u32) -> &'static str {
    DEATH_MESSAGES[deaths as usize % DEATH_MESSAGES.len()]
}

/// How a platform is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformLook {
    Ground,
    Brick,
    Question,
    /// Question block that has already been bumped
    Used,
}

impl PlatformLook {
    fn of(platform: &Platform, ground_y: i32) -> Self {
        if platform.breakable {
            if platform.hit {
                PlatformLook::Used
            } else {
                PlatformLook::Question
            }
        } else if platform.rect.y >= ground_y - GROUND_LOOK_SLACK {
            PlatformLook::Ground
        } else {
            PlatformLook::Brick
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSprite {
    pub rect: Rect,
    pub look: PlatformLook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemySprite {
    pub rect: Rect,
    pub facing_right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSprite {
    pub rect: Rect,
    /// False on the "off" beats of the death flash
    pub visible: bool,
    pub facing: Facing,
    /// Leg swing offset while walking on the ground
    pub stride: Option<i32>,
    pub dying: bool,
}

/// A "+N" popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSprite {
    pub x: i32,
    pub y: i32,
    pub label: String,
    pub alpha: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub deaths: u32,
    pub fps: Option<u32>,
}

/// Full-screen panel drawn over the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Death screen, only during the display stage of the death sequence
    Dying {
        message: &'static str,
        deaths: u32,
        score: u32,
    },
    GameOver {
        score: u32,
        deaths: u32,
    },
    LevelComplete {
        score: u32,
        deaths: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub viewport: (i32, i32),
    pub clouds: Vec<Rect>,
    pub platforms: Vec<PlatformSprite>,
    pub coins: Vec<Rect>,
    pub enemies: Vec<EnemySprite>,
    /// None once the session reached a terminal phase
    pub player: Option<PlayerSprite>,
    pub texts: Vec<TextSprite>,
    pub hud: Hud,
    pub overlay: Overlay,
    pub show_controls_hint: bool,
}

impl FrameView {
    /// Snapshot `state` as of its last tick
    pub fn new(state: &GameState, settings: &Settings) -> Self {
        let camera_x = state.camera_x;
        let viewport_width = state.viewport_width;
        let now_ms = state.time_ms;
        let cam = camera_x as i32;

        let in_view = |left: f32, right: f32| {
            right >= camera_x - CULL_MARGIN && left <= camera_x + viewport_width + CULL_MARGIN
        };

        let clouds = (0..CLOUD_COUNT)
            .filter_map(|i| {
                let x = (200.0 + i as f32 * 350.0 - camera_x * CLOUD_PARALLAX) as i32;
                let y = 80 + i as i32 * 30;
                let visible =
                    x > -(CULL_MARGIN as i32) && x < (viewport_width + CULL_MARGIN) as i32;
                visible.then(|| Rect::new(x, y, CLOUD_SIZE.0, CLOUD_SIZE.1))
            })
            .collect();

        let bob = if settings.animate_blocks() {
            ((now_ms as f32 * 0.005).sin() * 2.0) as i32
        } else {
            0
        };
        let ground_y = state.ground_y();
        let platforms = state
            .level
            .platforms
            .iter()
            .filter(|p| in_view(p.rect.x as f32, p.rect.right() as f32))
            .map(|p| {
                let look = PlatformLook::of(p, ground_y);
                let mut rect = p.rect.offset_x(-cam);
                if look == PlatformLook::Question {
                    rect.y += bob;
                }
                PlatformSprite { rect, look }
            })
            .collect();

        let coins = state
            .level
            .coins
            .iter()
            .filter(|c| !c.collected && in_view(c.x as f32, c.x as f32))
            .map(|c| {
                let width = ((COIN_SIZE as f32 * c.anim_phase.cos().abs()) as i32).max(4);
                Rect::new(
                    c.x - cam - width / 2,
                    c.y - COIN_SIZE / 2,
                    width,
                    COIN_SIZE,
                )
            })
            .collect();

        let enemies = state
            .level
            .enemies
            .iter()
            .filter(|e| e.active && in_view(e.rect.x as f32, e.rect.x as f32))
            .map(|e| EnemySprite {
                rect: e.rect.offset_x(-cam),
                facing_right: e.facing_right(),
            })
            .collect();

        let player = (!state.phase.is_terminal()).then(|| player_sprite(state, settings, cam));

        let texts = state
            .floating_texts
            .iter()
            .filter(|t| t.active && in_view(t.pos.x, t.pos.x))
            .map(|t| TextSprite {
                x: camera::to_screen(t.pos.x, camera_x) as i32,
                y: t.pos.y as i32,
                label: format!("+{}", t.value),
                alpha: text_alpha(t.age_ms(now_ms)),
            })
            .collect();

        Self {
            viewport: (state.viewport_width as i32, state.viewport_height as i32),
            clouds,
            platforms,
            coins,
            enemies,
            player,
            texts,
            hud: Hud {
                score: state.score,
                lives: state.lives,
                deaths: state.deaths,
                fps: None,
            },
            overlay: overlay(state),
            show_controls_hint: settings.show_controls_hint,
        }
    }
}

/// Linear fade over the popup lifetime
pub fn text_alpha(age_ms: u64) -> u8 {
    let lifetime = FLOATING_TEXT_LIFETIME_MS;
    let faded = age_ms.min(lifetime) * 255 / lifetime;
    (255 - faded) as u8
}

fn player_sprite(state: &GameState, settings: &Settings, cam: i32) -> PlayerSprite {
    let player = &state.player;
    let mut sprite = PlayerSprite {
        rect: player.rect().offset_x(-cam),
        visible: true,
        facing: player.facing,
        stride: None,
        dying: false,
    };

    match player.state {
        PlayerState::Alive => {
            if player.on_ground {
                sprite.stride = Some((player.anim_phase.sin() * 3.0) as i32);
            }
        }
        PlayerState::Dying { started_ms, .. } => {
            sprite.dying = true;
            let elapsed = state.time_ms.saturating_sub(started_ms);
            let frozen = DeathPhase::at(elapsed, &state.tuning) == DeathPhase::Freeze;
            if frozen && settings.flash_on_death() {
                sprite.visible = (elapsed / 100) % 2 == 0;
            }
        }
    }

    sprite
}

fn overlay(state: &GameState) -> Overlay {
    match state.phase {
        GamePhase::GameOver => Overlay::GameOver {
            score: state.score,
            deaths: state.deaths,
        },
        GamePhase::LevelComplete => Overlay::LevelComplete {
            score: state.score,
            deaths: state.deaths,
        },
        GamePhase::Playing => match state.player.state {
            PlayerState::Dying { started_ms, .. }
                if DeathPhase::at(state.time_ms.saturating_sub(started_ms), &state.tuning)
                    == DeathPhase::Screen =>
            {
                Overlay::Dying {
                    message: death_message(state.deaths),
                    deaths: state.deaths,
                    score: state.score,
                }
            }
            _ => Overlay::None,
        },
    }
}
