//! Game entry point
//!
//! `run_level` blocks for one play session on a borrowed render surface and
//! returns how the session ended. Each loop iteration polls input, advances
//! the simulation by one clamped wall-clock step, draws and presents a
//! frame, then delays. `play` chains sessions across restarts.

use std::io;
use std::ops::{Deref, DerefMut};

use crate::frame::FrameView;
use crate::platform::{Clock, HeldKeys, InputEvent, InputSource, Key, RenderSurface};
use crate::renderer::draw_frame;
use crate::settings::Settings;
use crate::sim::level::TileGrid;
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick::{TickInput, tick};
use crate::tuning::Tuning;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// Quit the whole application
    Quit,
    /// Back to the caller's menu
    ReturnToMenu,
    /// Play again with a fresh session
    Restart,
}

/// One play session plus the input buffered between ticks
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    jump_requested: bool,
}

impl GameSession {
    pub fn new(grid: &TileGrid, viewport: (f32, f32), tuning: Tuning, now_ms: u64) -> Self {
        Self {
            state: GameState::new(grid, viewport.0, viewport.1, tuning, now_ms),
            jump_requested: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Feed one discrete input event; returns the outcome if it ends the session
    pub fn handle_event(&mut self, event: InputEvent) -> Option<GameOutcome> {
        match event {
            InputEvent::Quit => Some(GameOutcome::Quit),
            InputEvent::KeyDown(Key::Escape) => Some(GameOutcome::ReturnToMenu),
            InputEvent::KeyDown(Key::R) if self.state.phase.is_terminal() => {
                Some(GameOutcome::Restart)
            }
            InputEvent::KeyDown(key) if key.is_jump() => {
                self.jump_requested = true;
                None
            }
            InputEvent::KeyDown(_) => None,
        }
    }

    /// Advance one frame with the sampled movement keys
    pub fn step(&mut self, held: HeldKeys, now_ms: u64) -> Vec<GameEvent> {
        let input = TickInput {
            move_left: held.left,
            move_right: held.right,
            jump: std::mem::take(&mut self.jump_requested),
        };
        tick(&mut self.state, &input, now_ms);
        self.state.drain_events()
    }

    pub fn view(&self, settings: &Settings) -> FrameView {
        FrameView::new(&self.state, settings)
    }
}

/// Rolling frames-per-second over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [u64; 60],
    frame_index: usize,
    filled: bool,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frame_times: [0; 60],
            frame_index: 0,
            filled: false,
            fps: 0,
        }
    }

    pub fn record(&mut self, now_ms: u64) {
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        if self.frame_index == 0 {
            self.filled = true;
        }

        if self.filled {
            let elapsed = now_ms.saturating_sub(oldest);
            if elapsed > 0 {
                self.fps = (60_000.0 / elapsed as f64).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the surface's text resource open; closes it when dropped
struct TextScope<'a, S: RenderSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: RenderSurface + ?Sized> TextScope<'a, S> {
    fn open(surface: &'a mut S) -> Self {
        if !surface.open_text() {
            log::warn!("Text resources unavailable; drawing without text");
        }
        Self { surface }
    }
}

impl<S: RenderSurface + ?Sized> Deref for TextScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: RenderSurface + ?Sized> DerefMut for TextScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: RenderSurface + ?Sized> Drop for TextScope<'_, S> {
    fn drop(&mut self) {
        self.surface.close_text();
    }
}

/// Play `grid` until the player quits or returns to the menu
///
/// Every restart starts over with a freshly loaded level.
pub fn play<S, I, C>(
    surface: &mut S,
    input: &mut I,
    clock: &mut C,
    grid: &TileGrid,
    tuning: Tuning,
    settings: &Settings,
) -> io::Result<GameOutcome>
where
    S: RenderSurface + ?Sized,
    I: InputSource + ?Sized,
    C: Clock + ?Sized,
{
    loop {
        input.reset();
        match run_level(surface, input, clock, grid, tuning, settings)? {
            GameOutcome::Restart => log::info!("Restarting"),
            outcome => return Ok(outcome),
        }
    }
}

/// Play the built-in level until quit, return-to-menu or restart
pub fn run_game<S, I, C>(
    surface: &mut S,
    input: &mut I,
    clock: &mut C,
    tuning: Tuning,
    settings: &Settings,
) -> io::Result<GameOutcome>
where
    S: RenderSurface + ?Sized,
    I: InputSource + ?Sized,
    C: Clock + ?Sized,
{
    run_level(surface, input, clock, &TileGrid::main_level(), tuning, settings)
}

/// Play `grid` until quit, return-to-menu or restart
pub fn run_level<S, I, C>(
    surface: &mut S,
    input: &mut I,
    clock: &mut C,
    grid: &TileGrid,
    tuning: Tuning,
    settings: &Settings,
) -> io::Result<GameOutcome>
where
    S: RenderSurface + ?Sized,
    I: InputSource + ?Sized,
    C: Clock + ?Sized,
{
    let mut surface = TextScope::open(surface);

    let (width, height) = surface.size();
    let mut session = GameSession::new(
        grid,
        (width as f32, height as f32),
        tuning,
        clock.now_ms(),
    );
    let mut fps = FpsCounter::new();
    log::info!("Session started ({}x{})", width, height);

    loop {
        for event in input.poll_events() {
            if let Some(outcome) = session.handle_event(event) {
                log::info!(
                    "Session ended: {:?} (score {}, deaths {})",
                    outcome,
                    session.state().score,
                    session.state().deaths
                );
                return Ok(outcome);
            }
        }

        let now_ms = clock.now_ms();
        for event in session.step(input.held(), now_ms) {
            log::trace!("{:?}", event);
        }
        fps.record(now_ms);

        let mut view = session.view(settings);
        if settings.show_fps {
            view.hud.fps = Some(fps.fps());
        }
        draw_frame(&mut *surface, &view);
        surface.present()?;

        clock.delay(settings.frame_delay_ms);
    }
}
