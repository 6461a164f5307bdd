//! Keyboard input model
//!
//! Discrete key-down events drive jump, restart and exit. Movement is read
//! from continuously held keys, sampled once per frame.

use std::collections::HashMap;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
    A,
    D,
    W,
    R,
    Q,
    Enter,
    Escape,
    Other,
}

impl Key {
    pub fn is_jump(self) -> bool {
        matches!(self, Key::Space | Key::Up | Key::W)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Key::Left | Key::A)
    }

    pub fn is_right(self) -> bool {
        matches!(self, Key::Right | Key::D)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Window closed / interrupt
    Quit,
}

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

pub trait InputSource {
    /// Drain pending events without blocking
    fn poll_events(&mut self) -> Vec<InputEvent>;
    /// Sample the held movement keys
    fn held(&self) -> HeldKeys;
    /// Forget held keys and pending events before a new session
    fn reset(&mut self) {}
}

/// Held-key tracking for terminals that may not report key releases
///
/// A key counts as held while its last press/repeat is younger than the
/// hold window. Explicit releases drop it immediately.
#[derive(Debug, Clone)]
pub struct HoldTracker {
    last_seen: HashMap<Key, u64>,
    window_ms: u64,
}

impl HoldTracker {
    pub fn new(window_ms: u64) -> Self {
        Self {
            last_seen: HashMap::new(),
            window_ms,
        }
    }

    /// Press or auto-repeat
    pub fn press(&mut self, key: Key, now_ms: u64) {
        self.last_seen.insert(key, now_ms);
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    pub fn is_held(&self, key: Key, now_ms: u64) -> bool {
        self.last_seen
            .get(&key)
            .is_some_and(|&last| now_ms.saturating_sub(last) <= self.window_ms)
    }

    pub fn held(&self, now_ms: u64) -> HeldKeys {
        let any = |pred: fn(Key) -> bool| {
            self.last_seen
                .keys()
                .any(|&k| pred(k) && self.is_held(k, now_ms))
        };
        HeldKeys {
            left: any(Key::is_left),
            right: any(Key::is_right),
        }
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}
