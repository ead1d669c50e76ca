//! Cycle-accurate reference model of the alien sprite entity.
//!
//! One entity tracks a position register, a movement timer that steps it
//! every `frequency + 1` clock edges, alive/fired state cleared by reset
//! and killed by a hit pulse, and a combinational sprite output evaluated
//! against a scan coordinate. A formation seeds many identical entities
//! on a lattice and clocks them in lockstep.
//!
//! Registers commit on `Tickable::tick`; pixel queries between edges only
//! read committed state.

pub mod alien;
pub mod bitmap;
#[cfg(feature = "native")]
pub mod capture;
pub mod config;
pub mod formation;
pub mod life;
pub mod render;
pub mod simulation;
pub mod stimulus;
pub mod timer;

pub use alien::Alien;
pub use bitmap::{FormatError, SpriteBitmap};
pub use config::{AlienConfig, BoundaryPolicy, Direction, FormationConfig};
pub use formation::Formation;
pub use life::{Life, LifeState};
pub use render::render;
pub use simulation::Simulation;
pub use stimulus::{Stimulus, StimulusKind, StimulusQueue};
pub use timer::MovementTimer;
