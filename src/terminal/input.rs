//! Keyboard input from the terminal
//!
//! A dedicated thread blocks on `event::read` and forwards events through a
//! channel, so the game loop never blocks on I/O. Terminals that report
//! key releases drop held keys immediately; the others rely on the hold
//! window, which is longer than the OS key-repeat interval.

use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use side_scroller::platform::{HeldKeys, HoldTracker, InputEvent, InputSource, Key};

/// A key counts as held this long after its last press/repeat
const HOLD_WINDOW_MS: u64 = 130;

pub struct KeyboardInput {
    rx: mpsc::Receiver<Event>,
    tracker: HoldTracker,
    origin: Instant,
}

impl KeyboardInput {
    /// Start the reader thread
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    // Receiver dropped, program exiting
                    break;
                }
            }
        });

        Self {
            rx,
            tracker: HoldTracker::new(HOLD_WINDOW_MS),
            origin: Instant::now(),
        }
    }

    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    /// Block until a key is pressed; `None` means the input stream is gone
    pub fn wait_key(&mut self) -> Option<InputEvent> {
        loop {
            let ev = self.rx.recv().ok()?;
            if let Event::Key(key) = ev {
                if key.kind == KeyEventKind::Press {
                    return Some(translate(&key));
                }
            }
        }
    }
}

impl InputSource for KeyboardInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let now = self.now_ms();
        let mut events = Vec::new();

        while let Ok(ev) = self.rx.try_recv() {
            let Event::Key(key) = ev else {
                continue;
            };
            let mapped = map_code(key.code);
            match key.kind {
                KeyEventKind::Press => {
                    self.tracker.press(mapped, now);
                    events.push(translate(&key));
                }
                KeyEventKind::Repeat => self.tracker.press(mapped, now),
                KeyEventKind::Release => self.tracker.release(mapped),
            }
        }

        events
    }

    fn held(&self) -> HeldKeys {
        self.tracker.held(self.now_ms())
    }

    fn reset(&mut self) {
        self.tracker.clear();
        while self.rx.try_recv().is_ok() {}
    }
}

/// Ctrl+C quits; everything else is a key-down
fn translate(key: &KeyEvent) -> InputEvent {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        InputEvent::Quit
    } else {
        InputEvent::KeyDown(map_code(key.code))
    }
}

fn map_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            ' ' => Key::Space,
            'a' => Key::A,
            'd' => Key::D,
            'w' => Key::W,
            'r' => Key::R,
            'q' => Key::Q,
            _ => Key::Other,
        },
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_map_code() {
        assert_eq!(map_code(KeyCode::Char('A')), Key::A);
        assert_eq!(map_code(KeyCode::Char(' ')), Key::Space);
        assert_eq!(map_code(KeyCode::Esc), Key::Escape);
        assert_eq!(map_code(KeyCode::Char('x')), Key::Other);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ev = press(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate(&ev), InputEvent::Quit);
        let ev = press(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(translate(&ev), InputEvent::KeyDown(Key::R));
    }
}
