//! Core traits and types for cycle-stepped chip models.
//!
//! One tick is one active clock edge. Registers commit on the edge;
//! everything read between edges is combinational and sees committed state.

mod observable;
mod tickable;
mod ticks;

pub use observable::{Observable, Value};
pub use tickable::Tickable;
pub use ticks::Ticks;
