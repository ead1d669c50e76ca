//! Trait for components advanced by clock edges.

use crate::Ticks;

/// A synchronous component driven by a single clock.
///
/// Each call to `tick()` is one active clock edge: input pins are sampled,
/// next state is computed from the state held before the edge, and the
/// result commits at once. Combinational outputs read between calls always
/// see committed state.
pub trait Tickable {
    /// Advance the component by one clock edge.
    fn tick(&mut self);

    /// Advance the component by `count` edges.
    ///
    /// Implementations may override this, but must produce the same state
    /// as calling `tick()` `count` times with the input pins held steady.
    fn tick_n(&mut self, count: Ticks) {
        for _ in 0..count.get() {
            self.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(u64);

    impl Tickable for Counter {
        fn tick(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn tick_n_matches_repeated_tick() {
        let mut a = Counter(0);
        let mut b = Counter(0);
        a.tick_n(Ticks::new(55));
        for _ in 0..55 {
            b.tick();
        }
        assert_eq!(a.0, b.0);
    }
}
