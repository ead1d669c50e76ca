//! Movement timer and position step.
//!
//! The phase counter counts idle edges. When it already equals the
//! movement frequency on an edge, it returns to zero and a step fires, so
//! one step happens every `frequency + 1` edges. After reset, step `i`
//! lands exactly on edge `i * (frequency + 1)`.

use crate::config::{AlienConfig, BoundaryPolicy, Direction};

/// Per-entity phase counter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementTimer {
    counter: u32,
}

impl MovementTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Edges elapsed since the last step (0..=frequency).
    #[must_use]
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Next-state function: the counter after this edge, and whether a step
    /// fires. Does not mutate, so callers can commit it alongside other
    /// registers.
    #[must_use]
    pub const fn next(&self, frequency: u32) -> (Self, bool) {
        if self.counter >= frequency {
            (Self { counter: 0 }, true)
        } else {
            (
                Self {
                    counter: self.counter + 1,
                },
                false,
            )
        }
    }

    /// Clock one edge. Returns true if a step fires.
    pub fn clock(&mut self, frequency: u32) -> bool {
        let (next, fire) = self.next(frequency);
        *self = next;
        fire
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

/// Apply one movement step to `x`.
#[must_use]
pub fn step(x: u16, config: &AlienConfig) -> u16 {
    let max = u32::from(config.max_position_x);
    let x = u32::from(x).min(max);
    let width = u32::from(config.step_width);

    let moved = match (config.direction, config.boundary) {
        (Direction::Increment, BoundaryPolicy::Saturate) => (x + width).min(max),
        (Direction::Decrement, BoundaryPolicy::Saturate) => x.saturating_sub(width),
        (Direction::Increment, BoundaryPolicy::Wrap) => (x + width) % (max + 1),
        (Direction::Decrement, BoundaryPolicy::Wrap) => {
            let span = max + 1;
            (x + span - width % span) % span
        }
    };
    moved as u16
}
