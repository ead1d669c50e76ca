//! Grid formation: a flat, row-major collection of identical entities.
//!
//! Each entity's reset position is fixed by its (column, row) index at
//! construction. All entities share the clock and reset; there is no
//! interaction between them.

use std::sync::Arc;

use sim_core::Tickable;

use crate::alien::Alien;
use crate::bitmap::SpriteBitmap;
use crate::config::FormationConfig;

/// A `columns × rows` lattice of aliens.
#[derive(Debug, Clone)]
pub struct Formation {
    config: FormationConfig,
    aliens: Vec<Alien>,
}

impl Formation {
    #[must_use]
    pub fn new(config: &FormationConfig, bitmap: Arc<SpriteBitmap>) -> Self {
        let mut aliens = Vec::with_capacity(config.len());
        for row in 0..config.rows {
            for col in 0..config.columns {
                let (x, y) = config.seed_position(col, row);
                let entity = config.template.with_initial_position(x, y);
                aliens.push(Alien::new(entity, Arc::clone(&bitmap)));
            }
        }
        Self {
            config: *config,
            aliens,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &FormationConfig {
        &self.config
    }

    /// Flat index of (`col`, `row`), or `None` outside the grid.
    #[must_use]
    pub fn index_of(&self, col: u16, row: u16) -> Option<usize> {
        if col >= self.config.columns || row >= self.config.rows {
            return None;
        }
        Some(usize::from(row) * usize::from(self.config.columns) + usize::from(col))
    }

    /// (`col`, `row`) of a flat index.
    #[must_use]
    pub fn coords_of(&self, index: usize) -> Option<(u16, u16)> {
        if index >= self.aliens.len() {
            return None;
        }
        let columns = usize::from(self.config.columns);
        Some(((index % columns) as u16, (index / columns) as u16))
    }

    #[must_use]
    pub fn get(&self, col: u16, row: u16) -> Option<&Alien> {
        self.index_of(col, row).map(|i| &self.aliens[i])
    }

    pub fn get_mut(&mut self, col: u16, row: u16) -> Option<&mut Alien> {
        self.index_of(col, row).map(|i| &mut self.aliens[i])
    }

    /// Entities in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Alien> {
        self.aliens.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Alien] {
        &self.aliens
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.aliens.iter().filter(|a| a.is_alive()).count()
    }

    /// Drive every entity's reset pin.
    pub fn set_reset(&mut self, asserted: bool) {
        for alien in &mut self.aliens {
            alien.set_reset(asserted);
        }
    }

    /// Assert reset for one edge, then release it.
    pub fn reset_now(&mut self) {
        self.set_reset(true);
        self.tick();
        self.set_reset(false);
    }

    /// Raise the hit pin of one entity for its next edge.
    ///
    /// Returns false if the index is outside the grid.
    pub fn hit(&mut self, col: u16, row: u16) -> bool {
        match self.get_mut(col, row) {
            Some(alien) => {
                alien.set_hit(true);
                true
            }
            None => false,
        }
    }

    /// Combined sprite output: 1 if any entity draws ink at the scan.
    #[must_use]
    pub fn pixel(&self, scan_x: u16, scan_y: u16) -> u8 {
        u8::from(self.aliens.iter().any(|a| a.pixel(scan_x, scan_y) == 1))
    }
}

impl Tickable for Formation {
    /// Clock every entity in lockstep. Hit pins are pulses: they are
    /// released after the edge that samples them.
    fn tick(&mut self) {
        for alien in &mut self.aliens {
            alien.tick();
            alien.set_hit(false);
        }
    }
}

impl<'a> IntoIterator for &'a Formation {
    type Item = &'a Alien;
    type IntoIter = std::slice::Iter<'a, Alien>;

    fn into_iter(self) -> Self::IntoIter {
        self.aliens.iter()
    }
}
