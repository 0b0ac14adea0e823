use std::time::Instant;

use crate::components::Dir;

/// Directional keys held during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    /// At most one direction per tick; left beats right beats up beats down.
    pub fn direction(&self) -> Option<Dir> {
        if self.left {
            Some(Dir::Left)
        } else if self.right {
            Some(Dir::Right)
        } else if self.up {
            Some(Dir::Up)
        } else if self.down {
            Some(Dir::Down)
        } else {
            None
        }
    }

    pub fn set(&mut self, dir: Dir, held: bool) {
        match dir {
            Dir::Left => self.left = held,
            Dir::Right => self.right = held,
            Dir::Up => self.up = held,
            Dir::Down => self.down = held,
        }
    }
}

/// Everything the session needs from the outside world for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub direction: Option<Dir>,
    /// Reading of a [`Clock`], in milliseconds.
    pub now_ms: u64,
}

impl FrameInput {
    pub fn new(keys: HeldKeys, now_ms: u64) -> Self {
        Self {
            direction: keys.direction(),
            now_ms,
        }
    }
}

pub trait Clock {
    /// Milliseconds since an arbitrary, fixed epoch. Never goes backwards.
    fn now_ms(&self) -> u64;
}

pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}
