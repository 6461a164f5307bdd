//! Platform abstraction layer
//!
//! The game loop only talks to the outside world through these traits:
//! - `RenderSurface`: fill/outline rectangles, draw text, present
//! - `InputSource`: key-down events plus held-key sampling
//! - `Clock`: milliseconds and frame delay

pub mod input;
pub mod time;

pub use input::{HeldKeys, HoldTracker, InputEvent, InputSource, Key};
pub use time::{Clock, SystemClock};

use crate::sim::collision::Rect;

/// RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// HUD and titles
    Large,
    /// Popups and hints
    Small,
}

/// Horizontal anchoring of a text call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Drawing target lent to the game for the length of a session
///
/// Coordinates are logical viewport pixels, origin top-left.
pub trait RenderSurface {
    /// Logical viewport size
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn outline_rect(&mut self, rect: Rect, color: Color);

    /// Draw a single line of text; a no-op while text is unavailable
    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: TextSize, align: Align, color: Color);

    /// Acquire text resources for the session; false if they are missing
    fn open_text(&mut self) -> bool;
    /// Release text resources
    fn close_text(&mut self);
    fn text_available(&self) -> bool;

    /// Show the finished frame
    fn present(&mut self) -> std::io::Result<()>;
}
