//! Entity and formation configuration.
//!
//! These correspond to the HDL module parameters and the slow-changing
//! input pins the harness drives. None of them change while the clock runs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Horizontal movement direction (the 1-bit `movement_direction` pin).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Pin low: x decreases.
    Decrement,
    /// Pin high: x increases.
    #[default]
    Increment,
}

impl Direction {
    #[must_use]
    pub const fn from_bit(bit: bool) -> Self {
        if bit { Self::Increment } else { Self::Decrement }
    }

    #[must_use]
    pub const fn bit(self) -> bool {
        matches!(self, Self::Increment)
    }
}

/// What a step does when it would leave `[0, max_position_x]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BoundaryPolicy {
    /// Clamp to the nearest bound.
    #[default]
    Saturate,
    /// Wrap modulo `max_position_x + 1`.
    Wrap,
}

/// Immutable per-entity parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlienConfig {
    /// X loaded into the position register on reset.
    pub initial_x: u16,
    /// Y loaded into the position register on reset.
    pub initial_y: u16,
    /// Largest x the position register may hold.
    pub max_position_x: u16,
    /// Pixel magnification. Zero behaves as one.
    pub scale: u8,
    /// Idle cycles between steps. A step fires every `frequency + 1` edges.
    pub movement_frequency: u32,
    /// Pixels moved per step.
    pub step_width: u16,
    pub direction: Direction,
    pub boundary: BoundaryPolicy,
}

impl Default for AlienConfig {
    fn default() -> Self {
        Self {
            initial_x: 0,
            initial_y: 0,
            max_position_x: 639,
            scale: 1,
            movement_frequency: 10,
            step_width: 1,
            direction: Direction::Increment,
            boundary: BoundaryPolicy::Saturate,
        }
    }
}

impl AlienConfig {
    #[must_use]
    pub const fn with_initial_position(mut self, x: u16, y: u16) -> Self {
        self.initial_x = x;
        self.initial_y = y;
        self
    }

    #[must_use]
    pub const fn with_movement(mut self, frequency: u32, step_width: u16, direction: Direction) -> Self {
        self.movement_frequency = frequency;
        self.step_width = step_width;
        self.direction = direction;
        self
    }

    #[must_use]
    pub const fn with_bounds(mut self, max_position_x: u16, boundary: BoundaryPolicy) -> Self {
        self.max_position_x = max_position_x;
        self.boundary = boundary;
        self
    }

    #[must_use]
    pub const fn with_scale(mut self, scale: u8) -> Self {
        self.scale = scale;
        self
    }

    /// Effective magnification (never zero).
    #[must_use]
    pub const fn effective_scale(&self) -> u16 {
        if self.scale == 0 { 1 } else { self.scale as u16 }
    }
}

/// A rectangular grid of aliens sharing one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormationConfig {
    pub columns: u16,
    pub rows: u16,
    /// Sprite width used for the lattice pitch on both axes.
    pub sprite_width: u16,
    /// Gap between neighbouring sprites.
    pub spacing: u16,
    /// Shared parameters. Its initial position is replaced per entity.
    pub template: AlienConfig,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            columns: 11,
            rows: 5,
            sprite_width: 16,
            spacing: 8,
            template: AlienConfig::default(),
        }
    }
}

impl FormationConfig {
    /// Distance between neighbouring entity origins.
    #[must_use]
    pub const fn pitch(&self) -> u32 {
        self.sprite_width as u32 + self.spacing as u32
    }

    /// Reset position of the entity at (`col`, `row`).
    ///
    /// Coordinates beyond the 16-bit register width are truncated, as the
    /// register would.
    #[must_use]
    pub const fn seed_position(&self, col: u16, row: u16) -> (u16, u16) {
        let pitch = self.pitch() as u64;
        ((pitch * col as u64) as u16, (pitch * row as u64) as u16)
    }

    /// True when every seed position fits the 16-bit register without
    /// truncation.
    #[must_use]
    pub const fn lattice_fits(&self) -> bool {
        let pitch = self.pitch() as u64;
        let far = if self.columns > self.rows { self.columns } else { self.rows };
        far == 0 || pitch * (far as u64 - 1) <= u16::MAX as u64
    }

    /// Entity count.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(feature = "native")]
impl FormationConfig {
    /// Parse a JSON config file. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
