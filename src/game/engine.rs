use rand::Rng;

use super::{
    action::Direction,
    config::GameConfig,
    effects::Expired,
    error::GameResult,
    food::{Food, FoodKind},
    grid::{Bounds, Cell},
    level::LevelGenerator,
    snake::Snake,
    spawn::Spawner,
    state::{GameState, Tint},
};

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the field while not on a bridge
    Wall,
    /// Snake hit an obstacle while not on a bridge
    Obstacle,
    /// Snake hit itself
    SelfCollision,
}

/// What the head landed on this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eaten {
    Food(FoodKind),
    SpecialFood,
}

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    pub eaten: Option<Eaten>,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// New level number if the score crossed a level boundary
    pub level_up: Option<u32>,
    pub special_food_spawned: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Points awarded this step
    pub points: u32,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn terminated(collision_type: Option<CollisionType>) -> Self {
        Self {
            points: 0,
            terminated: true,
            info: StepInfo {
                collision_type,
                ..Default::default()
            },
        }
    }
}

/// The game engine that handles all game rules
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    levels: LevelGenerator,
    spawner: Spawner,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let spawner = Spawner::new(
            Bounds::from_grid_size(config.grid_size),
            config.max_spawn_attempts,
            config.seed,
        );
        Self {
            levels: LevelGenerator::new(&config),
            spawner,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn levels(&self) -> &LevelGenerator {
        &self.levels
    }

    /// Reset the game to initial state: one segment at the origin heading
    /// right, level 1, fresh food.
    pub fn reset(&mut self) -> GameResult<GameState> {
        let bounds = self.spawner.bounds();
        let snake = Snake::new(Cell::ORIGIN, Direction::default(), 1);
        let level = self.levels.setup_level(1, &snake, &mut self.spawner)?;

        let placeholder = Food::new(Cell::ORIGIN, FoodKind::Sphere);
        let mut state = GameState::new(snake, placeholder, level, bounds);
        self.respawn_food(&mut state)?;

        Ok(state)
    }

    /// Seconds until the next tick: the level interval, scaled down while
    /// the boost runs.
    pub fn tick_delay(&self, state: &GameState) -> f64 {
        if state.boost_active() {
            state.level.tick_interval * self.config.boost_interval_factor
        } else {
            state.level.tick_interval
        }
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> GameResult<StepResult> {
        if !state.is_alive {
            return Ok(StepResult::terminated(None));
        }

        // Reversals were already rejected when the request came in
        state.snake.direction = state.next_direction;
        let candidate = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(collision_type) = self.check_collision(state, candidate) {
            self.end_run(state, collision_type);
            return Ok(StepResult::terminated(Some(collision_type)));
        }

        let previous_score = state.score;
        let mut info = StepInfo::default();

        if candidate == state.food.cell {
            let kind = state.food.kind;
            state.score += kind.score();
            // +1 from keeping the tail, the rest stacked on the tail cell
            state.snake.advance(candidate, true);
            state.snake.grow(kind.growth().saturating_sub(1));

            self.respawn_food(state)?;
            info.special_food_spawned = self.maybe_spawn_special_food(state)?;
            info.eaten = Some(Eaten::Food(kind));
            tracing::debug!(?kind, score = state.score, len = state.snake.len(), "food eaten");
        } else if state.special_food == Some(candidate) {
            state.score += self.config.special_food_score;
            state.special_food = None;
            state.effects.deactivate_special_food();
            state.effects.activate_boost(self.config.boost_duration);
            state.tint = Tint::Boosted;
            state.snake.advance(candidate, true);
            info.eaten = Some(Eaten::SpecialFood);
            tracing::debug!(score = state.score, "special food eaten, boost active");
        } else {
            state.snake.advance(candidate, false);
        }

        let step = self.config.level_up_score;
        if previous_score / step < state.score / step {
            let next = state.level.level + 1;
            self.start_level(state, next)?;
            info.level_up = Some(next);
        }

        state.ticks += 1;

        Ok(StepResult {
            points: state.score - previous_score,
            terminated: false,
            info,
        })
    }

    /// Check if moving the head onto `candidate` ends the run. Self-collision
    /// is checked against the pre-move body and ignores bridges.
    fn check_collision(&self, state: &GameState, candidate: Cell) -> Option<CollisionType> {
        if state.snake.self_collides(candidate) {
            return Some(CollisionType::SelfCollision);
        }

        if state.level.on_any_bridge(candidate) {
            return None;
        }

        if !state.is_in_bounds(candidate) {
            return Some(CollisionType::Wall);
        }

        if state.level.obstacles.contains(&candidate) {
            return Some(CollisionType::Obstacle);
        }

        None
    }

    fn end_run(&self, state: &mut GameState, collision_type: CollisionType) {
        state.is_alive = false;
        state.tint = Tint::Burned;
        tracing::info!(
            ?collision_type,
            score = state.score,
            level = state.level.level,
            len = state.snake.len(),
            "game over"
        );
    }

    /// Replace the current obstacle/bridge layout with the one for `level`
    pub fn start_level(&mut self, state: &mut GameState, level: u32) -> GameResult<()> {
        state.level = self.levels.setup_level(level, &state.snake, &mut self.spawner)?;
        Ok(())
    }

    /// Move the food to a new free cell with a freshly rolled kind
    pub fn respawn_food(&mut self, state: &mut GameState) -> GameResult<()> {
        let mut occupied = state.occupied_cells();
        occupied.extend(state.special_food);

        let cell = self.spawner.random_empty_cell(&occupied)?;
        let kind = FoodKind::random(self.spawner.rng());
        state.food = Food::new(cell, kind);
        Ok(())
    }

    /// Roll for special food; only when none is on the field
    fn maybe_spawn_special_food(&mut self, state: &mut GameState) -> GameResult<bool> {
        if state.effects.special_food_active() {
            return Ok(false);
        }
        let chance = self.config.special_food_chance.clamp(0.0, 1.0);
        if !self.spawner.rng().gen_bool(chance) {
            return Ok(false);
        }
        self.spawn_special_food(state)?;
        Ok(true)
    }

    /// Place special food and start its lifetime countdown
    pub fn spawn_special_food(&mut self, state: &mut GameState) -> GameResult<()> {
        let mut occupied = state.occupied_cells();
        occupied.insert(state.food.cell);

        let cell = self.spawner.random_empty_cell(&occupied)?;
        state.special_food = Some(cell);
        state.effects.activate_special_food(self.config.special_food_lifetime);
        tracing::debug!(?cell, "special food spawned");
        Ok(())
    }

    /// Run the frame-time countdowns and apply their expiry side effects
    pub fn advance_effects(&self, state: &mut GameState, dt: f64) -> Expired {
        let expired = state.effects.advance(dt);

        if expired.special_food {
            state.special_food = None;
            tracing::debug!("special food expired");
        }
        if expired.boost && state.tint == Tint::Boosted {
            state.tint = Tint::Normal;
            tracing::debug!("boost expired");
        }

        expired
    }

    /// Food rotation: new kind at a new cell
    pub fn rotate_food(&mut self, state: &mut GameState) -> GameResult<()> {
        self.respawn_food(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Bridge;
    use crate::game::level::LevelConfig;

    fn engine() -> GameEngine {
        GameEngine::new(GameConfig::default().with_seed(17))
    }

    /// Level 1 layout with no bridges, so wall tests are deterministic
    fn bare_state(snake: Snake, food: Food) -> GameState {
        GameState::new(
            snake,
            food,
            LevelConfig::empty(1, 0.1),
            Bounds::from_grid_size(20),
        )
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset().unwrap();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Cell::ORIGIN);
        assert_eq!(state.level.level, 1);
        assert!(state.level.obstacles.is_empty());
        assert_eq!(state.level.bridges.len(), 1);
        assert_ne!(state.food.cell, Cell::ORIGIN);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = bare_state(
            Snake::new(Cell::ORIGIN, Direction::Right, 1),
            Food::new(Cell::new(-5, -5), FoodKind::Sphere),
        );

        let result = engine.step(&mut state).unwrap();

        assert!(!result.terminated);
        assert_eq!(result.info.eaten, None);
        assert_eq!(state.ticks, 1);
        assert_eq!(state.snake.head(), Cell::new(1, 0));
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn test_food_consumption_grows_by_kind() {
        for kind in FoodKind::ALL {
            let mut engine = engine();
            let mut state = bare_state(
                Snake::new(Cell::ORIGIN, Direction::Right, 2),
                Food::new(Cell::new(1, 0), kind),
            );

            let result = engine.step(&mut state).unwrap();

            assert_eq!(result.info.eaten, Some(Eaten::Food(kind)));
            assert_eq!(state.snake.len(), 2 + kind.growth());
            assert_eq!(state.score, kind.score());
            assert_eq!(result.points, kind.score());
            assert_ne!(state.food.cell, Cell::new(1, 0));
        }
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let mut state = bare_state(
            Snake::new(Cell::new(10, 0), Direction::Right, 1),
            Food::new(Cell::new(0, 5), FoodKind::Sphere),
        );

        let result = engine.step(&mut state).unwrap();

        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(state.tint, Tint::Burned);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.snake.head(), Cell::new(10, 0));
    }

    #[test]
    fn test_obstacle_collision_beats_food() {
        let mut engine = engine();
        let mut state = bare_state(
            Snake::new(Cell::ORIGIN, Direction::Right, 1),
            Food::new(Cell::new(1, 0), FoodKind::Diamond),
        );
        state.level.obstacles.insert(Cell::new(1, 0));

        let result = engine.step(&mut state).unwrap();

        assert_eq!(result.info.collision_type, Some(CollisionType::Obstacle));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_bridge_exempts_wall_and_obstacles() {
        let mut engine = engine();
        let mut state = bare_state(
            Snake::new(Cell::new(10, 0), Direction::Right, 1),
            Food::new(Cell::new(0, 5), FoodKind::Sphere),
        );
        state.level.bridges.push(Bridge::new(Cell::new(10, 0), 3));
        state.level.obstacles.insert(Cell::new(11, 0));

        let result = engine.step(&mut state).unwrap();
        assert!(!result.terminated);
        assert_eq!(state.snake.head(), Cell::new(11, 0));

        // stepping off the footprint outside the field is fatal
        let result = engine.step(&mut state).unwrap();
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
    }

    #[test]
    fn test_bridge_does_not_exempt_self_collision() {
        let mut engine = engine();
        // head at (5,5) heading down into its own body at (5,4)
        let cells = vec![
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 4),
            Cell::new(5, 4),
            Cell::new(4, 4),
        ];
        let snake = Snake::from_cells(cells, Direction::Left).unwrap();
        let mut state = bare_state(snake, Food::new(Cell::new(-5, -5), FoodKind::Sphere));
        state.level.bridges.push(Bridge::new(Cell::new(5, 4), 3));
        state.next_direction = Direction::Down;

        let result = engine.step(&mut state).unwrap();

        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 5);
        let mut state = bare_state(snake, Food::new(Cell::new(-8, -8), FoodKind::Sphere));

        // Up, Left, then Down into the body
        state.next_direction = Direction::Up;
        engine.step(&mut state).unwrap();
        state.next_direction = Direction::Left;
        engine.step(&mut state).unwrap();
        state.next_direction = Direction::Down;
        let result = engine.step(&mut state).unwrap();

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_special_food_grants_boost() {
        let mut engine = engine();
        let mut state = bare_state(
            Snake::new(Cell::ORIGIN, Direction::Right, 1),
            Food::new(Cell::new(-5, -5), FoodKind::Sphere),
        );
        state.special_food = Some(Cell::new(1, 0));
        state.effects.activate_special_food(10.0);

        let result = engine.step(&mut state).unwrap();

        assert_eq!(result.info.eaten, Some(Eaten::SpecialFood));
        assert_eq!(state.score, 30);
        assert_eq!(state.snake.len(), 2);
        assert!(state.special_food.is_none());
        assert!(!state.effects.special_food_active());
        assert!(state.boost_active());
        assert_eq!(state.tint, Tint::Boosted);
        assert!((engine.tick_delay(&state) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_level_up_on_crossing() {
        let mut engine = engine();
        let mut state = bare_state(
            Snake::new(Cell::ORIGIN, Direction::Right, 1),
            Food::new(Cell::new(1, 0), FoodKind::Diamond),
        );
        state.score = 40;

        let result = engine.step(&mut state).unwrap();

        assert_eq!(state.score, 70);
        assert_eq!(result.info.level_up, Some(2));
        assert_eq!(state.level.level, 2);
        assert_eq!(state.level.obstacles.len(), 3);
        assert!((state.level.tick_interval - 0.09).abs() < 1e-9);
    }

    #[test]
    fn test_no_level_up_without_crossing() {
        let mut engine = engine();
        let mut state = bare_state(
            Snake::new(Cell::ORIGIN, Direction::Right, 1),
            Food::new(Cell::new(1, 0), FoodKind::Sphere),
        );
        state.score = 50;

        let result = engine.step(&mut state).unwrap();

        assert_eq!(state.score, 60);
        assert_eq!(result.info.level_up, None);
        assert_eq!(state.level.level, 1);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.reset().unwrap();
        state.is_alive = false;
        let ticks_before = state.ticks;
        let head_before = state.snake.head();

        let result = engine.step(&mut state).unwrap();

        assert!(result.terminated);
        assert_eq!(state.ticks, ticks_before);
        assert_eq!(state.snake.head(), head_before);
    }

    #[test]
    fn test_special_food_expiry_clears_cell() {
        let mut engine = engine();
        let mut state = engine.reset().unwrap();
        engine.spawn_special_food(&mut state).unwrap();
        assert!(state.special_food.is_some());
        assert_ne!(state.special_food, Some(state.food.cell));

        let expired = engine.advance_effects(&mut state, 11.0);

        assert!(expired.special_food);
        assert!(state.special_food.is_none());
    }
}
