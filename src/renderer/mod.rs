//! Frame rendering
//!
//! Turns a `FrameView` into fill/outline/text calls on a `RenderSurface`.
//! Draw order: sky, clouds, platforms, coins, enemies, player, popups, HUD,
//! overlays. Text calls are skipped when the surface has no text resource.

pub mod palette;

use crate::frame::{
    EnemySprite, FrameView, Hud, Overlay, PlatformLook, PlatformSprite, PlayerSprite,
};
use crate::platform::{Align, Color, RenderSurface, TextSize};
use crate::sim::collision::Rect;
use crate::sim::state::Facing;

const SCORE_BOX: Rect = Rect::new(10, 10, 260, 40);
const LIVES_BOX: Rect = Rect::new(285, 10, 250, 40);
const HEART_X: i32 = 415;
const HEART_SPACING: i32 = 32;
const HEART_SIZE: i32 = 18;
const DEATHS_BOX: Rect = Rect::new(550, 10, 200, 40);

const CONTROLS_HINT: &str = "A/D or arrows: move   Space/W/Up: jump   Esc: menu";

/// Draw one complete frame (does not present)
pub fn draw_frame<S: RenderSurface + ?Sized>(surface: &mut S, view: &FrameView) {
    surface.clear(palette::SKY);

    for cloud in &view.clouds {
        surface.fill_rect(*cloud, palette::CLOUD);
    }
    for platform in &view.platforms {
        draw_platform(surface, platform);
    }
    for coin in &view.coins {
        draw_coin(surface, *coin);
    }
    for enemy in &view.enemies {
        draw_enemy(surface, enemy);
    }
    if let Some(player) = &view.player {
        draw_player(surface, player);
    }

    let text = surface.text_available();
    if text {
        for popup in &view.texts {
            surface.draw_text(
                &popup.label,
                popup.x,
                popup.y,
                TextSize::Small,
                Align::Center,
                palette::POPUP.with_alpha(popup.alpha),
            );
        }
    }

    draw_hud(surface, &view.hud, view.viewport, text);
    draw_overlay(surface, &view.overlay, view.viewport, text);

    if text && view.show_controls_hint && view.overlay == Overlay::None {
        surface.draw_text(
            CONTROLS_HINT,
            view.viewport.0 / 2,
            view.viewport.1 - 30,
            TextSize::Small,
            Align::Center,
            palette::TEXT_DIM,
        );
    }
}

fn draw_platform<S: RenderSurface + ?Sized>(surface: &mut S, platform: &PlatformSprite) {
    let r = platform.rect;
    match platform.look {
        PlatformLook::Ground => {
            surface.fill_rect(Rect::new(r.x, r.y, r.w, 20), palette::GRASS);
            for i in (0..r.w).step_by(8) {
                surface.fill_rect(Rect::new(r.x + i, r.y, 2, 12), palette::GRASS_BLADE);
            }
            surface.fill_rect(Rect::new(r.x, r.y + 20, r.w, r.h - 20), palette::DIRT);
            surface.fill_rect(Rect::new(r.x + 6, r.y + 32, 3, 3), palette::DIRT_DARK);
        }
        PlatformLook::Brick => {
            surface.fill_rect(r, palette::BRICK);
            surface.fill_rect(Rect::new(r.x, r.y + r.h / 2, r.w, 2), palette::BRICK_MORTAR);
            surface.fill_rect(Rect::new(r.x + r.w / 2, r.y, 2, r.h / 2), palette::BRICK_MORTAR);
            surface.outline_rect(r, palette::OUTLINE);
        }
        PlatformLook::Question => {
            surface.fill_rect(r, palette::QUESTION);
            surface.fill_rect(Rect::new(r.x + 2, r.y + 2, r.w - 4, 8), palette::QUESTION_HIGHLIGHT);
            surface.fill_rect(
                Rect::new(r.x + 2, r.y + r.h - 10, r.w - 4, 8),
                palette::QUESTION_SHADOW,
            );
            surface.outline_rect(r, palette::OUTLINE);
            // "?" glyph
            surface.fill_rect(Rect::new(r.x + 10, r.y + 6, 12, 8), palette::QUESTION_MARK);
            surface.fill_rect(Rect::new(r.x + 14, r.y + 12, 8, 6), palette::QUESTION_MARK);
            surface.fill_rect(Rect::new(r.x + 14, r.y + 20, 6, 6), palette::QUESTION_MARK);
        }
        PlatformLook::Used => {
            surface.fill_rect(r, palette::USED_BLOCK);
            for i in 0..4 {
                surface.fill_rect(Rect::new(r.x + i * 8, r.y, 4, r.h), palette::USED_BLOCK_LINES);
            }
            surface.outline_rect(r, palette::OUTLINE);
        }
    }
}

fn draw_coin<S: RenderSurface + ?Sized>(surface: &mut S, coin: Rect) {
    surface.fill_rect(coin, palette::COIN);
    let inner_w = if coin.w > 4 { coin.w - 4 } else { 2 };
    surface.fill_rect(Rect::new(coin.x + 2, coin.y + 2, inner_w, 12), palette::COIN_INNER);
    surface.outline_rect(coin, palette::COIN_RIM);
}

fn draw_enemy<S: RenderSurface + ?Sized>(surface: &mut S, enemy: &EnemySprite) {
    let r = enemy.rect;
    surface.fill_rect(r, palette::ENEMY_BODY);
    surface.fill_rect(Rect::new(r.x + 2, r.y + 2, r.w - 4, 6), palette::ENEMY_CAP);

    surface.fill_rect(Rect::new(r.x + 5, r.y + 10, 7, 7), palette::ENEMY_EYE);
    surface.fill_rect(Rect::new(r.x + 16, r.y + 10, 7, 7), palette::ENEMY_EYE);
    // Pupils look where it walks
    let look = if enemy.facing_right { 2 } else { 0 };
    surface.fill_rect(Rect::new(r.x + 7 + look, r.y + 12, 3, 4), palette::ENEMY_PUPIL);
    surface.fill_rect(Rect::new(r.x + 18 + look, r.y + 12, 3, 4), palette::ENEMY_PUPIL);

    surface.outline_rect(r, palette::OUTLINE);
}

fn draw_player<S: RenderSurface + ?Sized>(surface: &mut S, player: &PlayerSprite) {
    if !player.visible {
        return;
    }
    let r = player.rect;

    surface.fill_rect(Rect::new(r.x + 4, r.y + 8, 24, 16), palette::PLAYER_SHIRT);
    surface.fill_rect(Rect::new(r.x + 8, r.y, 16, 16), palette::PLAYER_SKIN);

    let eye_y = if player.dying { r.y + 8 } else { r.y + 6 };
    let shift = if player.facing == Facing::Left { -1 } else { 1 };
    surface.fill_rect(Rect::new(r.x + 10 + shift, eye_y, 3, 3), palette::PLAYER_EYE);
    surface.fill_rect(Rect::new(r.x + 17 + shift, eye_y, 3, 3), palette::PLAYER_EYE);
    surface.fill_rect(Rect::new(r.x + 10, r.y + 10, 12, 3), palette::PLAYER_MUSTACHE);
    surface.fill_rect(Rect::new(r.x + 6, r.y - 4, 20, 8), palette::PLAYER_CAP);

    match player.stride {
        Some(offset) => {
            surface.fill_rect(
                Rect::new(r.x + 8 + offset, r.y + 24, 6, 8),
                palette::PLAYER_OVERALLS,
            );
            surface.fill_rect(
                Rect::new(r.x + 18 - offset, r.y + 24, 6, 8),
                palette::PLAYER_OVERALLS,
            );
            surface.fill_rect(Rect::new(r.x + 7 + offset, r.y + 29, 8, 3), palette::PLAYER_SHOE);
            surface.fill_rect(Rect::new(r.x + 17 - offset, r.y + 29, 8, 3), palette::PLAYER_SHOE);
        }
        None => {
            surface.fill_rect(Rect::new(r.x + 10, r.y + 24, 12, 8), palette::PLAYER_OVERALLS);
            surface.fill_rect(Rect::new(r.x + 9, r.y + 29, 14, 3), palette::PLAYER_SHOE);
        }
    }
}

fn draw_hud<S: RenderSurface + ?Sized>(
    surface: &mut S,
    hud: &Hud,
    viewport: (i32, i32),
    text: bool,
) {
    surface.fill_rect(SCORE_BOX, palette::HUD_BOX);
    surface.outline_rect(SCORE_BOX, palette::HUD_SCORE);
    surface.fill_rect(LIVES_BOX, palette::HUD_BOX);
    surface.outline_rect(LIVES_BOX, palette::HUD_LIVES);
    surface.fill_rect(DEATHS_BOX, palette::HUD_BOX);
    surface.outline_rect(DEATHS_BOX, palette::TEXT_DIM);

    for i in 0..hud.lives as i32 {
        surface.fill_rect(
            Rect::new(HEART_X + i * HEART_SPACING, 19, HEART_SIZE, HEART_SIZE),
            palette::HEART,
        );
    }

    if !text {
        return;
    }
    surface.draw_text(
        &format!("SCORE: {}", hud.score),
        18,
        18,
        TextSize::Large,
        Align::Left,
        palette::HUD_SCORE,
    );
    surface.draw_text("LIVES:", 295, 18, TextSize::Large, Align::Left, palette::TEXT);
    surface.draw_text(
        &format!("DEATHS: {}", hud.deaths),
        DEATHS_BOX.x + 10,
        18,
        TextSize::Large,
        Align::Left,
        palette::TEXT,
    );
    if let Some(fps) = hud.fps {
        surface.draw_text(
            &format!("FPS: {}", fps),
            viewport.0 - 120,
            18,
            TextSize::Small,
            Align::Left,
            palette::TEXT,
        );
    }
}

/// A framed panel centred in the viewport
fn draw_panel<S: RenderSurface + ?Sized>(
    surface: &mut S,
    viewport: (i32, i32),
    half_height: i32,
    fill: Color,
) {
    let (cx, cy) = (viewport.0 / 2, viewport.1 / 2);
    let panel = Rect::new(cx - 300, cy - half_height, 600, 2 * half_height);
    surface.fill_rect(panel, fill);
    surface.outline_rect(panel, palette::TEXT);
    surface.outline_rect(panel.inset(10), palette::TEXT);
}

fn draw_overlay<S: RenderSurface + ?Sized>(
    surface: &mut S,
    overlay: &Overlay,
    viewport: (i32, i32),
    text: bool,
) {
    let (cx, cy) = (viewport.0 / 2, viewport.1 / 2);
    let screen = Rect::new(0, 0, viewport.0, viewport.1);

    let line = |surface: &mut S, s: &str, dy: i32, size: TextSize, color: Color| {
        if text {
            surface.draw_text(s, cx, cy + dy, size, Align::Center, color);
        }
    };

    match *overlay {
        Overlay::None => {}
        Overlay::Dying {
            message,
            deaths,
            score,
        } => {
            surface.fill_rect(screen, palette::BLACKOUT);
            draw_panel(surface, viewport, 120, palette::PANEL_DEATH);
            line(surface, message, -60, TextSize::Large, palette::TITLE_DEATH);
            line(surface, &format!("Deaths: {}", deaths), -10, TextSize::Large, palette::TEXT);
            line(surface, &format!("Score: {}", score), 30, TextSize::Large, palette::TEXT);
            line(surface, "Respawning...", 80, TextSize::Small, palette::TEXT_DIM);
        }
        Overlay::GameOver { score, deaths } => {
            surface.fill_rect(screen, palette::SCRIM);
            draw_panel(surface, viewport, 150, palette::PANEL_DEATH);
            line(surface, "GAME OVER", -80, TextSize::Large, palette::TITLE_GAME_OVER);
            line(surface, &format!("FINAL SCORE: {}", score), -20, TextSize::Large, palette::TEXT);
            line(surface, &format!("Total Deaths: {}", deaths), 30, TextSize::Large, palette::TEXT);
            line(surface, "Press R to restart", 80, TextSize::Small, palette::TEXT_DIM);
            line(surface, "Press ESC to exit", 110, TextSize::Small, palette::TEXT_DIM);
        }
        Overlay::LevelComplete { score, deaths } => {
            surface.fill_rect(screen, palette::SCRIM);
            draw_panel(surface, viewport, 150, palette::PANEL_COMPLETE);
            line(surface, "LEVEL COMPLETE!", -80, TextSize::Large, palette::TITLE_COMPLETE);
            line(surface, &format!("SCORE: {}", score), -20, TextSize::Large, palette::TEXT);
            line(surface, &format!("Deaths: {}", deaths), 30, TextSize::Large, palette::TEXT);
            line(surface, "Press R to restart", 80, TextSize::Small, palette::TEXT_DIM);
            line(surface, "Press ESC to exit", 110, TextSize::Small, palette::TEXT_DIM);
        }
    }
}
