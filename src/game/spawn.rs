use std::collections::HashSet;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IteratorRandom};

use super::error::{GameError, GameResult};
use super::grid::{Bounds, Cell};

/// Picks unoccupied cells inside the playing field.
///
/// Sampling is uniform rejection sampling over `[-H, H] x [-H, H]`. Once
/// `max_attempts` samples have all landed on occupied cells, the free cells
/// are enumerated and one is drawn uniformly, so a nearly full grid still
/// terminates and a completely full one reports `SpawnExhausted`.
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: StdRng,
    bounds: Bounds,
    max_attempts: u32,
}

impl Spawner {
    pub fn new(bounds: Bounds, max_attempts: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            bounds,
            max_attempts,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Shared RNG for every random decision in the game, so a seed replays a
    /// whole session.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn random_empty_cell(&mut self, occupied: &HashSet<Cell>) -> GameResult<Cell> {
        let h = self.bounds.half_extent;

        for _ in 0..self.max_attempts {
            let cell = Cell::new(self.rng.gen_range(-h..=h), self.rng.gen_range(-h..=h));
            if !occupied.contains(&cell) {
                return Ok(cell);
            }
        }

        let capacity = self.bounds.capacity();
        let taken = occupied
            .iter()
            .filter(|cell| self.bounds.in_bounds(**cell))
            .count();
        tracing::warn!(
            attempts = self.max_attempts,
            taken,
            capacity,
            "random spawn attempts exhausted, scanning for free cells"
        );

        let bounds = self.bounds;
        bounds
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .choose(&mut self.rng)
            .ok_or(GameError::SpawnExhausted {
                occupied: taken,
                capacity,
            })
    }
}
