//! Data-driven edge sequences.
//!
//! Each case in `tests/vectors/alien.json` names a sprite, an entity
//! config (missing fields take their defaults) and a list of operations:
//! `reset`, `tick` (with `count`), `hit` (one edge with the hit pin high)
//! and `expect` (any subset of the observable registers plus pixel probes).

#![cfg(feature = "serde")]

use std::sync::Arc;

use chipinvaders_alien::{Alien, AlienConfig, SpriteBitmap};
use serde::Deserialize;
use sim_core::{Observable, Tickable, Ticks};

#[derive(Deserialize)]
struct TestCase {
    name: String,
    sprite: Vec<String>,
    config: AlienConfig,
    ops: Vec<Op>,
}

#[derive(Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Op {
    Reset,
    Tick { count: u64 },
    Hit,
    Expect(Expectation),
}

#[derive(Deserialize)]
struct Expectation {
    x: Option<u16>,
    y: Option<u16>,
    alive: Option<bool>,
    fired: Option<bool>,
    phase: Option<u32>,
    #[serde(default)]
    pixels: Vec<(u16, u16, u8)>,
}

fn number(alien: &Alien, path: &str) -> Option<u64> {
    alien.query(path).and_then(|v| v.as_u64())
}

fn flag(alien: &Alien, path: &str) -> Option<bool> {
    alien.query(path).and_then(|v| v.as_bool())
}

fn check(case: &str, step: usize, alien: &Alien, want: &Expectation) {
    if let Some(x) = want.x {
        assert_eq!(number(alien, "x"), Some(u64::from(x)), "{case} op {step}: x");
    }
    if let Some(y) = want.y {
        assert_eq!(number(alien, "y"), Some(u64::from(y)), "{case} op {step}: y");
    }
    if let Some(alive) = want.alive {
        assert_eq!(flag(alien, "alive"), Some(alive), "{case} op {step}: alive");
    }
    if let Some(fired) = want.fired {
        assert_eq!(flag(alien, "fired"), Some(fired), "{case} op {step}: fired");
    }
    if let Some(phase) = want.phase {
        assert_eq!(
            number(alien, "phase"),
            Some(u64::from(phase)),
            "{case} op {step}: phase"
        );
    }
    for &(px, py, value) in &want.pixels {
        assert_eq!(
            alien.pixel(px, py),
            value,
            "{case} op {step}: pixel ({px}, {py})"
        );
    }
}

#[test]
fn alien_vectors() {
    let cases: Vec<TestCase> =
        serde_json::from_str(include_str!("vectors/alien.json")).expect("vector file parses");
    assert!(!cases.is_empty());

    for case in &cases {
        let bitmap = SpriteBitmap::parse(&case.sprite.join("\n"))
            .unwrap_or_else(|e| panic!("{}: bad sprite: {e}", case.name));
        let mut alien = Alien::new(case.config, Arc::new(bitmap));

        for (step, op) in case.ops.iter().enumerate() {
            match op {
                Op::Reset => alien.reset_now(),
                Op::Tick { count } => alien.tick_n(Ticks::new(*count)),
                Op::Hit => {
                    alien.set_hit(true);
                    alien.tick();
                    alien.set_hit(false);
                }
                Op::Expect(want) => check(&case.name, step, &alien, want),
            }
        }
    }
}
