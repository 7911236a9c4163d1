use std::collections::HashSet;

use super::action::Direction;
use super::effects::TimedEffects;
use super::food::Food;
use super::grid::{Bounds, Cell};
use super::level::LevelConfig;
use super::snake::Snake;

/// Colour state of the snake, chosen by the rules and drawn by the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    Normal,
    Boosted,
    /// Set on game over
    Burned,
}

/// Complete simulation state for one run
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction that will be committed on the next tick
    pub next_direction: Direction,
    pub food: Food,
    /// Present only while the special food timer runs
    pub special_food: Option<Cell>,
    pub level: LevelConfig,
    pub effects: TimedEffects,
    pub bounds: Bounds,
    pub score: u32,
    pub ticks: u64,
    pub tint: Tint,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Food, level: LevelConfig, bounds: Bounds) -> Self {
        Self {
            next_direction: snake.direction,
            snake,
            food,
            special_food: None,
            level,
            effects: TimedEffects::new(),
            bounds,
            score: 0,
            ticks: 0,
            tint: Tint::Normal,
            is_alive: true,
        }
    }

    /// Check if a cell is within the grid bounds
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        self.bounds.in_bounds(cell)
    }

    /// Cells that food and obstacles must not spawn on
    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.snake
            .segments()
            .iter()
            .chain(self.level.obstacles.iter())
            .copied()
            .collect()
    }

    pub fn boost_active(&self) -> bool {
        self.effects.boost_active()
    }
}
