//! Timed stimulus for scripted harness sequences.
//!
//! Events are keyed by the edge number they precede and applied to the
//! formation's input pins just before that edge is clocked.

use std::collections::VecDeque;

use crate::formation::Formation;

/// What to drive onto the pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StimulusKind {
    /// Hold reset for `cycles` edges (at least one), then release.
    Reset { cycles: u64 },
    /// Pulse the hit pin of one entity for one edge.
    Hit { col: u16, row: u16 },
}

/// A pin change scheduled for a given edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stimulus {
    /// Edge number (counted from simulation start) the stimulus applies to.
    pub tick: u64,
    pub kind: StimulusKind,
}

/// Queue of scheduled stimuli, sorted by edge.
#[derive(Debug, Default)]
pub struct StimulusQueue {
    events: VecDeque<Stimulus>,
    /// Edge after which a queued reset releases.
    reset_until: Option<u64>,
}

impl StimulusQueue {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
            reset_until: None,
        }
    }

    /// Enqueue a stimulus, keeping edge order. Stimuli for the same edge
    /// apply in insertion order.
    pub fn push(&mut self, stimulus: Stimulus) {
        let pos = self
            .events
            .iter()
            .position(|e| e.tick > stimulus.tick)
            .unwrap_or(self.events.len());
        self.events.insert(pos, stimulus);
    }

    pub fn enqueue_hit(&mut self, tick: u64, col: u16, row: u16) {
        self.push(Stimulus {
            tick,
            kind: StimulusKind::Hit { col, row },
        });
    }

    pub fn enqueue_reset(&mut self, tick: u64, cycles: u64) {
        self.push(Stimulus {
            tick,
            kind: StimulusKind::Reset { cycles },
        });
    }

    /// Drive all stimuli due at edge `tick` onto the formation's pins.
    ///
    /// Call once per edge, before clocking it.
    pub fn apply(&mut self, tick: u64, formation: &mut Formation) {
        if self.reset_until.is_some_and(|until| tick >= until) {
            formation.set_reset(false);
            self.reset_until = None;
        }

        while let Some(event) = self.events.front().copied() {
            if event.tick > tick {
                break;
            }
            self.events.pop_front();
            match event.kind {
                StimulusKind::Reset { cycles } => {
                    formation.set_reset(true);
                    self.reset_until = Some(tick + cycles.max(1));
                }
                StimulusKind::Hit { col, row } => {
                    formation.hit(col, row);
                }
            }
        }
    }

    /// True while a queued reset is still being held.
    #[must_use]
    pub fn holding_reset(&self) -> bool {
        self.reset_until.is_some()
    }

    /// Number of pending stimuli.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
