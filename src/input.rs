//! Player commands and held-key sampling
//!
//! Discrete presses (jump, pause, ...) are queued as [`Command`]s and drained
//! once per frame. Left/right are *held* state, re-applied on a fixed
//! interval by [`MoveSampler`] regardless of frame rate.

use std::collections::VecDeque;

use crate::sim::Direction;

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Restart,
    Jump,
    /// Left/right pressed (`true`) or released (`false`)
    Hold(Direction, bool),
    ToggleSound,
}

impl Command {
    /// Map a keyboard key (lowercased `KeyboardEvent.key`) to a command
    pub fn from_key(key: &str, pressed: bool) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "a" | "arrowleft" => Some(Command::Hold(Direction::Left, pressed)),
            "d" | "arrowright" => Some(Command::Hold(Direction::Right, pressed)),
            " " | "w" | "arrowup" if pressed => Some(Command::Jump),
            "p" | "escape" if pressed => Some(Command::Pause),
            _ => None,
        }
    }
}

/// FIFO of commands waiting for the next frame
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: VecDeque<Command>,
}

impl CommandQueue {
    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Take every queued command in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Which movement keys are currently down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn set(&mut self, dir: Direction, down: bool) {
        match dir {
            Direction::Left => self.left = down,
            Direction::Right => self.right = down,
        }
    }

    /// Direction to apply; right wins when both are held
    pub fn direction(&self) -> Option<Direction> {
        if self.right {
            Some(Direction::Right)
        } else if self.left {
            Some(Direction::Left)
        } else {
            None
        }
    }
}

/// Fixed-interval sampler for held movement
#[derive(Debug, Clone)]
pub struct MoveSampler {
    interval_ms: f64,
    next_due_ms: Option<f64>,
}

impl MoveSampler {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_due_ms: None,
        }
    }

    /// Whether at least one sample point fell at or before `now_ms` since the
    /// last poll. Missed sample points collapse into one.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let due = *self.next_due_ms.get_or_insert(now_ms);
        if now_ms < due {
            return false;
        }
        let elapsed_steps = ((now_ms - due) / self.interval_ms).floor() + 1.0;
        self.next_due_ms = Some(due + elapsed_steps * self.interval_ms);
        true
    }

    /// Forget the schedule; the next poll samples immediately
    pub fn reset(&mut self) {
        self.next_due_ms = None;
    }
}
