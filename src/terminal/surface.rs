//! Terminal render surface
//!
//! Rasterizes the fixed logical viewport into terminal cells. Each cell
//! holds two vertical pixels drawn with an upper-half block (foreground =
//! top pixel, background = bottom pixel). Text is laid over the pixels on
//! a separate glyph layer.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Print},
    terminal,
};

use side_scroller::platform::{Align, Color, RenderSurface, TextSize};
use side_scroller::sim::Rect;

const HALF_BLOCK: char = '▀';
/// Faded text below this alpha is not drawn
const MIN_TEXT_ALPHA: u8 = 60;

pub struct TerminalSurface<W: Write> {
    out: W,
    logical: (u32, u32),
    cols: u16,
    rows: u16,
    /// cols x (rows * 2) pixels, row-major
    pixels: Vec<Color>,
    /// cols x rows glyphs
    glyphs: Vec<Option<(char, Color)>>,
    text_open: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, logical: (u32, u32)) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut surface = Self {
            out,
            logical,
            cols: 0,
            rows: 0,
            pixels: Vec::new(),
            glyphs: Vec::new(),
            text_open: false,
        };
        surface.resize(cols, rows);
        Ok(surface)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        if (cols, rows) == (self.cols, self.rows) {
            return;
        }
        log::debug!("Terminal resized to {}x{}", cols, rows);
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        let cells = self.cols as usize * self.rows as usize;
        self.pixels = vec![Color::rgb(0, 0, 0); cells * 2];
        self.glyphs = vec![None; cells];
    }

    fn pixel_height(&self) -> i32 {
        self.rows as i32 * 2
    }

    /// Logical rect to a clamped pixel range `(x0, y0, x1, y1)`
    fn to_pixels(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        if rect.is_empty() {
            return None;
        }
        let (lw, lh) = (self.logical.0.max(1) as i64, self.logical.1.max(1) as i64);
        let (pw, ph) = (self.cols as i64, self.pixel_height() as i64);

        let x0 = (rect.x as i64 * pw / lw).clamp(0, pw);
        let x1 = (rect.right() as i64 * pw / lw).clamp(0, pw);
        let y0 = (rect.y as i64 * ph / lh).clamp(0, ph);
        let y1 = (rect.bottom() as i64 * ph / lh).clamp(0, ph);

        (x0 < x1 && y0 < y1).then_some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    fn to_cell(&self, x: i32, y: i32) -> (i64, i64) {
        let col = x as i64 * self.cols as i64 / self.logical.0.max(1) as i64;
        let row = y as i64 * self.rows as i64 / self.logical.1.max(1) as i64;
        (col, row)
    }

    fn put_pixel(&mut self, x: usize, y: usize, color: Color) {
        let index = y * self.cols as usize + x;
        if let Some(dst) = self.pixels.get_mut(index) {
            *dst = blend(*dst, color);
        }
    }

    /// Write text/blank cells straight to the terminal (title screen)
    pub fn print_line(&mut self, row: u16, text: &str, color: Color) -> std::io::Result<()> {
        let col = (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(to_term(color)))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    pub fn clear_screen(&mut self) -> std::io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn size(&self) -> (u32, u32) {
        self.logical
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.with_alpha(255));
        self.glyphs.fill(None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.to_pixels(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.put_pixel(x, y, color);
            }
        }
    }

    fn outline_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.to_pixels(rect) else {
            return;
        };
        for x in x0..x1 {
            self.put_pixel(x, y0, color);
            if y1 - 1 > y0 {
                self.put_pixel(x, y1 - 1, color);
            }
        }
        for y in (y0 + 1)..y1.saturating_sub(1) {
            self.put_pixel(x0, y, color);
            if x1 - 1 > x0 {
                self.put_pixel(x1 - 1, y, color);
            }
        }
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        _size: TextSize,
        align: Align,
        color: Color,
    ) {
        if !self.text_open || color.a < MIN_TEXT_ALPHA {
            return;
        }
        let (mut col, row) = self.to_cell(x, y);
        if align == Align::Center {
            col -= text.chars().count() as i64 / 2;
        }
        if row < 0 || row >= self.rows as i64 {
            return;
        }

        for (i, c) in text.chars().enumerate() {
            let cell_col = col + i as i64;
            if cell_col < 0 || cell_col >= self.cols as i64 {
                continue;
            }
            let index = row as usize * self.cols as usize + cell_col as usize;
            self.glyphs[index] = Some((c, color.with_alpha(255)));
        }
    }

    fn open_text(&mut self) -> bool {
        self.text_open = true;
        true
    }

    fn close_text(&mut self) {
        self.text_open = false;
    }

    fn text_available(&self) -> bool {
        self.text_open
    }

    fn present(&mut self) -> std::io::Result<()> {
        let (cols, rows) = terminal::size()?;
        if (cols, rows) != (self.cols, self.rows) {
            // Drop this frame; the next one is drawn at the new size
            self.resize(cols, rows);
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            return self.out.flush();
        }

        let width = self.cols as usize;
        let mut fg = None;
        let mut bg = None;

        for row in 0..self.rows as usize {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..width {
                let top = self.pixels[(row * 2) * width + col];
                let bottom = self.pixels[(row * 2 + 1) * width + col];
                let (ch, want_fg, want_bg) = match self.glyphs[row * width + col] {
                    Some((c, color)) => (c, color, blend(top, bottom.with_alpha(128))),
                    None => (HALF_BLOCK, top, bottom),
                };

                // Only emit colour changes between runs
                if fg != Some(want_fg) {
                    self.out.queue(style::SetForegroundColor(to_term(want_fg)))?;
                    fg = Some(want_fg);
                }
                if bg != Some(want_bg) {
                    self.out.queue(style::SetBackgroundColor(to_term(want_bg)))?;
                    bg = Some(want_bg);
                }
                self.out.queue(Print(ch))?;
            }
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

/// Alpha-blend `src` over `dst`
fn blend(dst: Color, src: Color) -> Color {
    let a = src.a as u16;
    let mix = |d: u8, s: u8| ((s as u16 * a + d as u16 * (255 - a)) / 255) as u8;
    Color::rgb(mix(dst.r, src.r), mix(dst.g, src.g), mix(dst.b, src.b))
}

fn to_term(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend() {
        let black = Color::rgb(0, 0, 0);
        assert_eq!(blend(black, Color::rgb(200, 100, 50)), Color::rgb(200, 100, 50));
        assert_eq!(blend(black, Color::rgba(200, 100, 50, 0)), black);
        assert_eq!(blend(black, Color::rgba(255, 255, 255, 51)), Color::rgb(51, 51, 51));
    }
}
