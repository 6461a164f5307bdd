//! Native terminal front-end
//!
//! `TerminalSession` puts the terminal into raw mode on the alternate
//! screen and restores it when dropped, including on panic unwinds.

pub mod input;
pub mod surface;

use std::io::{BufWriter, Stdout, stdout};

use crossterm::{
    ExecutableCommand, cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal,
};

pub use input::KeyboardInput;
pub use surface::TerminalSurface;

pub struct TerminalSession {
    pub surface: TerminalSurface<BufWriter<Stdout>>,
    pub input: KeyboardInput,
    keyboard_enhanced: bool,
}

impl TerminalSession {
    pub fn enter(logical: (u32, u32)) -> std::io::Result<Self> {
        let surface = TerminalSurface::new(BufWriter::new(stdout()), logical)?;

        terminal::enable_raw_mode()?;
        // From here on, Drop restores whatever was set up
        let mut session = Self {
            surface,
            input: KeyboardInput::spawn(),
            keyboard_enhanced: false,
        };

        let mut out = stdout();
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Key release events where the terminal supports them
        session.keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        log::info!(
            "Terminal ready (key release events: {})",
            session.keyboard_enhanced
        );

        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.surface.flush();
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        log::info!("Terminal restored");
    }
}
