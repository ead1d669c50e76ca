//! Alive/dead and fired state.

/// Life state. `Dead` is terminal until reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Life {
    #[default]
    Alive,
    Dead,
}

/// Life/fire registers for one entity.
///
/// `fired` is an output with no write path besides reset: it powers up
/// false and stays false.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LifeState {
    life: Life,
    fired: bool,
}

impl LifeState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            life: Life::Alive,
            fired: false,
        }
    }

    /// Next-state function for one edge with the hit pin at `hit`.
    #[must_use]
    pub const fn next(&self, hit: bool) -> Self {
        match self.life {
            Life::Alive if hit => Self {
                life: Life::Dead,
                fired: self.fired,
            },
            _ => *self,
        }
    }

    /// Clock one edge.
    pub fn clock(&mut self, hit: bool) {
        *self = self.next(hit);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub const fn life(&self) -> Life {
        self.life
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        matches!(self.life, Life::Alive)
    }

    #[must_use]
    pub const fn fired(&self) -> bool {
        self.fired
    }
}
