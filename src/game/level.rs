//! Level layouts and difficulty curve.
//!
//! Each level gets a fresh obstacle set and bridge list; nothing carries over
//! from the previous level.

use std::collections::HashSet;

use super::config::GameConfig;
use super::error::GameResult;
use super::grid::{Bridge, Cell};
use super::snake::Snake;
use super::spawn::Spawner;

/// Layout and pacing for one level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    /// Level number, starting at 1
    pub level: u32,
    /// Seconds between ticks, before any boost
    pub tick_interval: f64,
    pub obstacles: HashSet<Cell>,
    pub bridges: Vec<Bridge>,
}

impl LevelConfig {
    /// An empty layout, used as a placeholder before the first setup
    pub fn empty(level: u32, tick_interval: f64) -> Self {
        Self {
            level,
            tick_interval,
            obstacles: HashSet::new(),
            bridges: Vec::new(),
        }
    }

    /// True if any bridge footprint covers the cell
    pub fn on_any_bridge(&self, cell: Cell) -> bool {
        self.bridges.iter().any(|bridge| bridge.covers(cell))
    }
}

/// Difficulty curve derived from the game config
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    base_tick_interval: f64,
    tick_interval_step: f64,
    min_tick_interval: f64,
    obstacles_per_level: u32,
    max_obstacles: u32,
    max_bridges: u32,
    bridge_width: u32,
}

impl LevelGenerator {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            base_tick_interval: config.base_tick_interval,
            tick_interval_step: config.tick_interval_step,
            min_tick_interval: config.min_tick_interval,
            obstacles_per_level: config.obstacles_per_level,
            max_obstacles: config.max_obstacles,
            max_bridges: config.max_bridges,
            bridge_width: config.bridge_width,
        }
    }

    /// `max(min, base - (n - 1) * step)`
    pub fn tick_interval(&self, level: u32) -> f64 {
        let steps = level.saturating_sub(1) as f64;
        (self.base_tick_interval - steps * self.tick_interval_step).max(self.min_tick_interval)
    }

    /// `min(max_obstacles, (n - 1) * per_level)`
    pub fn obstacle_count(&self, level: u32) -> u32 {
        level
            .saturating_sub(1)
            .saturating_mul(self.obstacles_per_level)
            .min(self.max_obstacles)
    }

    /// `min(max_bridges, n)`
    pub fn bridge_count(&self, level: u32) -> u32 {
        level.min(self.max_bridges)
    }

    /// Generate the layout for `level`. Obstacles avoid the snake and each
    /// other; bridges only avoid the snake and obstacles at their centre cell
    /// and may overlap anything else.
    pub fn setup_level(
        &self,
        level: u32,
        snake: &Snake,
        spawner: &mut Spawner,
    ) -> GameResult<LevelConfig> {
        let level = level.max(1);
        let mut occupied: HashSet<Cell> = snake.segments().iter().copied().collect();

        let mut obstacles = HashSet::new();
        for _ in 0..self.obstacle_count(level) {
            let cell = spawner.random_empty_cell(&occupied)?;
            occupied.insert(cell);
            obstacles.insert(cell);
        }

        let mut bridges = Vec::new();
        for _ in 0..self.bridge_count(level) {
            let center = spawner.random_empty_cell(&occupied)?;
            bridges.push(Bridge::new(center, self.bridge_width));
        }

        let tick_interval = self.tick_interval(level);
        tracing::info!(
            level,
            tick_interval,
            obstacles = obstacles.len(),
            bridges = bridges.len(),
            "level set up"
        );

        Ok(LevelConfig {
            level,
            tick_interval,
            obstacles,
            bridges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use crate::game::grid::Bounds;

    fn generator() -> LevelGenerator {
        LevelGenerator::new(&GameConfig::default())
    }

    #[test]
    fn test_tick_interval_curve() {
        let levels = generator();
        assert!((levels.tick_interval(1) - 0.1).abs() < 1e-9);
        assert!((levels.tick_interval(2) - 0.09).abs() < 1e-9);
        assert!((levels.tick_interval(6) - 0.05).abs() < 1e-9);
        assert!((levels.tick_interval(7) - 0.04).abs() < 1e-9);
        assert!((levels.tick_interval(50) - 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_counts_are_monotonic_and_capped() {
        let levels = generator();
        assert_eq!(levels.obstacle_count(1), 0);
        assert_eq!(levels.obstacle_count(2), 3);
        assert_eq!(levels.obstacle_count(11), 30);
        assert_eq!(levels.obstacle_count(40), 30);
        assert_eq!(levels.bridge_count(1), 1);
        assert_eq!(levels.bridge_count(5), 5);
        assert_eq!(levels.bridge_count(9), 5);

        for n in 1..40 {
            assert!(levels.obstacle_count(n + 1) >= levels.obstacle_count(n));
            assert!(levels.bridge_count(n + 1) >= levels.bridge_count(n));
            assert!(levels.tick_interval(n + 1) <= levels.tick_interval(n));
        }
    }

    #[test]
    fn test_setup_avoids_snake() {
        let levels = generator();
        let snake = Snake::new(Cell::new(3, 0), Direction::Right, 6);
        let mut spawner = Spawner::new(Bounds::from_grid_size(20), 512, Some(9));

        let layout = levels.setup_level(8, &snake, &mut spawner).unwrap();

        assert_eq!(layout.level, 8);
        assert_eq!(layout.obstacles.len(), 21);
        assert_eq!(layout.bridges.len(), 5);
        for segment in snake.segments() {
            assert!(!layout.obstacles.contains(segment));
        }
        for bridge in &layout.bridges {
            assert!(!layout.obstacles.contains(&bridge.center));
            assert!(!snake.self_collides(bridge.center));
        }
    }

    #[test]
    fn test_setup_fails_when_grid_is_full() {
        let levels = generator();
        // 3x3 grid, snake fills 9 cells, level 2 wants 3 obstacles
        let cells = Bounds::from_grid_size(2).cells().collect();
        let snake = Snake::from_cells(cells, Direction::Right).unwrap();
        let mut spawner = Spawner::new(Bounds::from_grid_size(2), 8, Some(1));

        assert!(levels.setup_level(2, &snake, &mut spawner).is_err());
    }
}
