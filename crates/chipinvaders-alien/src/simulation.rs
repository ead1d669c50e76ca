//! Top-level simulation context.
//!
//! Owns the clock count, the formation and the stimulus queue. Lifecycle:
//! construct with a loaded bitmap, `reset()`, `run()`, then read outputs.
//! Each edge is two-phase: pins are driven and registers commit in
//! `tick()`; pixel queries between edges are pure reads.

use std::sync::Arc;

use sim_core::{Observable, Tickable, Ticks, Value};

use crate::bitmap::SpriteBitmap;
use crate::config::FormationConfig;
use crate::formation::Formation;
use crate::stimulus::StimulusQueue;

/// A clocked formation plus its scripted inputs.
#[derive(Debug)]
pub struct Simulation {
    formation: Formation,
    bitmap: Arc<SpriteBitmap>,
    queue: StimulusQueue,
    /// Edges clocked since construction.
    tick_count: u64,
}

impl Simulation {
    #[must_use]
    pub fn new(config: &FormationConfig, bitmap: SpriteBitmap) -> Self {
        let bitmap = Arc::new(bitmap);
        Self {
            formation: Formation::new(config, Arc::clone(&bitmap)),
            bitmap,
            queue: StimulusQueue::new(),
            tick_count: 0,
        }
    }

    /// Assert reset for one edge, then release it. A queued reset that is
    /// still holding keeps the pin asserted until its own release edge.
    pub fn reset(&mut self) {
        self.formation.set_reset(true);
        self.tick();
        if !self.queue.holding_reset() {
            self.formation.set_reset(false);
        }
    }

    /// Clock `count` edges.
    pub fn run(&mut self, count: Ticks) {
        self.tick_n(count);
    }

    /// Edges clocked since construction (reset edges included).
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub const fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn formation_mut(&mut self) -> &mut Formation {
        &mut self.formation
    }

    #[must_use]
    pub fn bitmap(&self) -> &SpriteBitmap {
        &self.bitmap
    }

    /// Scheduled stimuli. Edge numbers are absolute: stimulus `n` applies
    /// to the `n`th edge since construction.
    pub fn queue_mut(&mut self) -> &mut StimulusQueue {
        &mut self.queue
    }

    /// Combined sprite output at a scan coordinate.
    #[must_use]
    pub fn pixel(&self, scan_x: u16, scan_y: u16) -> u8 {
        self.formation.pixel(scan_x, scan_y)
    }

    /// Scan a `width × height` raster. Row-major, one byte per pixel (0/1).
    #[must_use]
    pub fn render_frame(&self, width: u16, height: u16) -> Vec<u8> {
        let mut frame = vec![0u8; usize::from(width) * usize::from(height)];
        for alien in &self.formation {
            let (x0, y0, w, h) = alien.bounds();
            let x_end = (usize::from(x0) + w).min(usize::from(width));
            let y_end = (usize::from(y0) + h).min(usize::from(height));
            for y in usize::from(y0)..y_end {
                for x in usize::from(x0)..x_end {
                    if alien.pixel(x as u16, y as u16) == 1 {
                        frame[y * usize::from(width) + x] = 1;
                    }
                }
            }
        }
        frame
    }
}

impl Tickable for Simulation {
    fn tick(&mut self) {
        self.tick_count += 1;
        self.queue.apply(self.tick_count, &mut self.formation);
        self.formation.tick();
    }
}

fn parse_alien_path(path: &str) -> Option<(usize, &str)> {
    let rest = path.strip_prefix("alien.")?;
    let (index, field) = rest.split_once('.')?;
    Some((index.parse().ok()?, field))
}

impl Observable for Simulation {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some((index, field)) = parse_alien_path(path) {
            return self.formation.as_slice().get(index)?.query(field);
        }
        match path {
            "tick" => Some(self.tick_count.into()),
            "alive_count" => Some((self.formation.alive_count() as u64).into()),
            "entities" => Some((self.formation.len() as u64).into()),
            "pending_stimuli" => Some((self.queue.len() as u64).into()),
            "bitmap.width" => Some((self.bitmap.width() as u64).into()),
            "bitmap.height" => Some((self.bitmap.height() as u64).into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "tick",
            "alive_count",
            "entities",
            "pending_stimuli",
            "bitmap.width",
            "bitmap.height",
            "alien.<n>.<alien_path>",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AlienConfig, Direction};

    fn sim() -> Simulation {
        let bmp = SpriteBitmap::parse("10\n01").expect("valid bitmap");
        let cfg = FormationConfig {
            columns: 3,
            rows: 2,
            sprite_width: 2,
            spacing: 1,
            template: AlienConfig::default().with_movement(10, 10, Direction::Increment),
        };
        Simulation::new(&cfg, bmp)
    }

    #[test]
    fn reset_counts_as_an_edge() {
        let mut s = sim();
        s.reset();
        assert_eq!(s.tick_count(), 1);
        assert_eq!(s.query("alien.4.x"), Some(Value::U16(3)));
        assert_eq!(s.query("alien.4.y"), Some(Value::U16(3)));
    }

    #[test]
    fn run_moves_whole_formation() {
        let mut s = sim();
        s.reset();
        s.run(Ticks::new(11));
        assert_eq!(s.query("alien.0.x"), Some(Value::U16(10)));
        assert_eq!(s.query("alien.5.x"), Some(Value::U16(16)));
    }

    #[test]
    fn scheduled_hit_kills_one_entity() {
        let mut s = sim();
        s.reset();
        s.queue_mut().enqueue_hit(5, 2, 1);
        s.run(Ticks::new(10));
        assert_eq!(s.query("alive_count"), Some(Value::U64(5)));
        assert_eq!(s.query("alien.5.alive"), Some(Value::Bool(false)));
        assert_eq!(s.query("pending_stimuli"), Some(Value::U64(0)));
    }

    #[test]
    fn render_frame_matches_pixel_queries() {
        let mut s = sim();
        s.reset();
        let frame = s.render_frame(12, 8);
        for y in 0..8u16 {
            for x in 0..12u16 {
                assert_eq!(frame[usize::from(y) * 12 + usize::from(x)], s.pixel(x, y));
            }
        }
        assert_eq!(frame.iter().filter(|&&p| p == 1).count(), 12);
    }

    #[test]
    fn reset_leaves_a_queued_hold_asserted() {
        let mut s = sim();
        s.queue_mut().enqueue_reset(1, 5);
        s.run(Ticks::new(1));
        s.reset();
        assert_eq!(s.query("alien.0.pin.reset"), Some(Value::Bool(true)));

        // Edges 1..=5 are held; the pin drops before edge 6.
        s.run(Ticks::new(3));
        assert_eq!(s.query("alien.0.pin.reset"), Some(Value::Bool(true)));
        assert_eq!(s.query("alien.0.phase"), Some(Value::U32(0)));
        s.run(Ticks::new(1));
        assert_eq!(s.query("alien.0.pin.reset"), Some(Value::Bool(false)));
        assert_eq!(s.query("alien.0.phase"), Some(Value::U32(1)));
    }

    #[test]
    fn reset_releases_when_nothing_is_queued() {
        let mut s = sim();
        s.reset();
        assert_eq!(s.query("alien.0.pin.reset"), Some(Value::Bool(false)));
    }

    #[test]
    fn unknown_paths_are_none() {
        let s = sim();
        assert_eq!(s.query("alien.99.x"), None);
        assert_eq!(s.query("alien.x"), None);
        assert_eq!(s.query("bogus"), None);
    }
}
