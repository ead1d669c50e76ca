//! One alien entity: position register, movement timer, life/fire state
//! and the combinational sprite output.
//!
//! Input pins are level signals sampled on the next edge, like `rst_n` and
//! `hit` on the HDL module. Everything the edge writes is computed from the
//! registers as they stood before it, then committed together.

use std::sync::Arc;

use sim_core::{Observable, Tickable, Value};

use crate::bitmap::SpriteBitmap;
use crate::config::AlienConfig;
use crate::life::{Life, LifeState};
use crate::render;
use crate::timer::{self, MovementTimer};

/// A single alien sprite entity.
#[derive(Debug, Clone)]
pub struct Alien {
    config: AlienConfig,
    bitmap: Arc<SpriteBitmap>,

    // Registers
    x: u16,
    y: u16,
    timer: MovementTimer,
    life: LifeState,

    // Input pins
    reset_pin: bool,
    hit_pin: bool,
}

impl Alien {
    /// Build an entity in its power-up state (same as after reset).
    #[must_use]
    pub fn new(config: AlienConfig, bitmap: Arc<SpriteBitmap>) -> Self {
        Self {
            x: config.initial_x,
            y: config.initial_y,
            config,
            bitmap,
            timer: MovementTimer::new(),
            life: LifeState::new(),
            reset_pin: false,
            hit_pin: false,
        }
    }

    /// Drive the synchronous reset pin (active high here; the HDL's
    /// `rst_n` is the inverse).
    pub fn set_reset(&mut self, asserted: bool) {
        self.reset_pin = asserted;
    }

    /// Drive the hit pin.
    pub fn set_hit(&mut self, asserted: bool) {
        self.hit_pin = asserted;
    }

    /// Assert reset for one edge, then release it.
    pub fn reset_now(&mut self) {
        self.set_reset(true);
        self.tick();
        self.set_reset(false);
    }

    /// Committed position register.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// Edges elapsed since the last movement step.
    #[must_use]
    pub const fn phase(&self) -> u32 {
        self.timer.counter()
    }

    #[must_use]
    pub const fn life(&self) -> Life {
        self.life.life()
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.life.is_alive()
    }

    #[must_use]
    pub const fn fired(&self) -> bool {
        self.life.fired()
    }

    #[must_use]
    pub const fn config(&self) -> &AlienConfig {
        &self.config
    }

    #[must_use]
    pub fn bitmap(&self) -> &SpriteBitmap {
        &self.bitmap
    }

    /// Sprite output for a scan coordinate.
    #[must_use]
    pub fn pixel(&self, scan_x: u16, scan_y: u16) -> u8 {
        render::render(
            scan_x,
            scan_y,
            (self.x, self.y),
            &self.bitmap,
            self.config.effective_scale(),
            self.life.is_alive(),
        )
    }

    /// Bounding box as (x, y, width, height) in pixels.
    #[must_use]
    pub fn bounds(&self) -> (u16, u16, usize, usize) {
        let scale = usize::from(self.config.effective_scale());
        (
            self.x,
            self.y,
            self.bitmap.width() * scale,
            self.bitmap.height() * scale,
        )
    }

    fn load_initial(&mut self) {
        self.x = self.config.initial_x;
        self.y = self.config.initial_y;
        self.timer.reset();
        self.life.reset();
    }
}

impl Tickable for Alien {
    fn tick(&mut self) {
        if self.reset_pin {
            self.load_initial();
            return;
        }

        let next_life = self.life.next(self.hit_pin);

        if self.life.is_alive() {
            let (next_timer, fire) = self.timer.next(self.config.movement_frequency);
            self.timer = next_timer;
            if fire {
                self.x = timer::step(self.x, &self.config);
            }
        }

        self.life = next_life;
    }
}

impl Observable for Alien {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "x" => Some(self.x.into()),
            "y" => Some(self.y.into()),
            "position" => Some(Value::Array(vec![self.x.into(), self.y.into()])),
            "phase" => Some(self.timer.counter().into()),
            "alive" => Some(self.life.is_alive().into()),
            "fired" => Some(self.life.fired().into()),
            "pin.reset" => Some(self.reset_pin.into()),
            "pin.hit" => Some(self.hit_pin.into()),
            "pin.direction" => Some(self.config.direction.bit().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "x",
            "y",
            "position",
            "phase",
            "alive",
            "fired",
            "pin.reset",
            "pin.hit",
            "pin.direction",
        ]
    }
}
