//! Top-level game driver.
//!
//! `GameController` is the only mutator of the simulation. A front-end feeds
//! it input commands and frame deltas and reads back a [`GameSnapshot`] to
//! draw. Ticks run from the controller's own [`TickScheduler`]: every frame
//! lets the pending delay elapse and, once due, runs exactly one tick, which
//! re-arms the scheduler on completion.

use super::{
    action::{Command, Direction},
    config::GameConfig,
    effects::{Countdown, Expired},
    engine::{GameEngine, StepResult},
    error::{GameError, GameResult},
    food::Food,
    grid::{Bridge, Cell},
    scheduler::{TickScheduler, TickToken},
    state::{GameState, Tint},
};

/// Run state of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    GameOver,
}

/// Read-only view of everything the presentation layer draws
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// Segments, head first
    pub snake: Vec<Cell>,
    pub direction: Direction,
    pub tint: Tint,
    pub food: Food,
    pub special_food: Option<Cell>,
    pub special_food_remaining: Option<f64>,
    /// Sorted for stable drawing order
    pub obstacles: Vec<Cell>,
    pub bridges: Vec<Bridge>,
    pub score: u32,
    pub level: u32,
    pub run_state: RunState,
    pub boost_active: bool,
    pub boost_remaining: Option<f64>,
    /// Field spans `[-half_extent, half_extent]` on both axes; walls sit one
    /// cell outside.
    pub half_extent: i32,
}

impl GameSnapshot {
    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// Segments are drawn burned after a fatal collision
    pub fn is_burned(&self) -> bool {
        self.tint == Tint::Burned
    }

    pub fn special_food_active(&self) -> bool {
        self.special_food.is_some()
    }
}

/// What happened during one `on_frame` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub expired: Expired,
    pub food_rotated: bool,
    pub tick: Option<StepResult>,
}

pub struct GameController {
    engine: GameEngine,
    state: GameState,
    run_state: RunState,
    scheduler: TickScheduler,
    food_rotation: Countdown,
}

impl GameController {
    /// Validate the config, set up level 1 and arm the first tick
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let mut engine = GameEngine::new(config);
        let state = engine.reset()?;
        Ok(Self::with_state(engine, state))
    }

    /// Wrap an existing engine and state, e.g. a hand-built scenario
    pub fn with_state(engine: GameEngine, state: GameState) -> Self {
        let run_state = if state.is_alive {
            RunState::Running
        } else {
            RunState::GameOver
        };
        let food_rotation = Countdown::new(engine.config().food_rotation_interval);
        let mut controller = Self {
            engine,
            state,
            run_state,
            scheduler: TickScheduler::new(),
            food_rotation,
        };
        if run_state == RunState::Running {
            controller.arm_next_tick();
        }
        controller
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Token and remaining delay of the pending tick, if one is armed
    pub fn pending_tick(&self) -> Option<(TickToken, f64)> {
        self.scheduler.pending()
    }

    /// Delay the next tick would be armed with right now
    pub fn tick_delay(&self) -> f64 {
        self.engine.tick_delay(&self.state)
    }

    /// Dispatch an input event
    pub fn handle(&mut self, command: Command) -> GameResult<()> {
        match command {
            Command::Move(direction) => self.on_input(direction),
            Command::TogglePause => self.on_pause_toggle(),
            Command::Restart => self.on_restart()?,
        }
        Ok(())
    }

    /// Queue a direction for the next tick. Reversals and input while not
    /// running are ignored.
    pub fn on_input(&mut self, direction: Direction) {
        if self.run_state != RunState::Running {
            tracing::debug!(?direction, run_state = ?self.run_state, "input ignored");
            return;
        }
        if self.state.snake.direction.is_opposite(direction) {
            tracing::debug!(?direction, "reversal ignored");
            return;
        }
        self.state.next_direction = direction;
    }

    /// Running -> Paused cancels the pending tick; Paused -> Running re-arms
    /// it immediately with the level's tick interval. No effect after game
    /// over.
    pub fn on_pause_toggle(&mut self) {
        match self.run_state {
            RunState::Running => {
                self.scheduler.cancel();
                self.run_state = RunState::Paused;
                tracing::info!("paused");
            }
            RunState::Paused => {
                self.run_state = RunState::Running;
                self.scheduler.arm(self.state.level.tick_interval);
                tracing::info!("resumed");
            }
            RunState::GameOver => {
                tracing::debug!("pause toggle ignored after game over");
            }
        }
    }

    /// Start a fresh run. Only valid from `GameOver`; ignored otherwise.
    pub fn on_restart(&mut self) -> GameResult<()> {
        if self.run_state != RunState::GameOver {
            tracing::debug!(run_state = ?self.run_state, "restart ignored");
            return Ok(());
        }

        self.scheduler.cancel();
        self.state = self.engine.reset()?;
        self.food_rotation = Countdown::new(self.engine.config().food_rotation_interval);
        self.run_state = RunState::Running;
        self.arm_next_tick();
        tracing::info!("restarted");
        Ok(())
    }

    /// Advance frame time by `dt` seconds: timed effects, food rotation, and
    /// at most one due tick. Suppressed entirely unless running.
    ///
    /// A failed spawn ends the run before the error is returned, so the
    /// controller never stays `Running` without a pending tick.
    pub fn on_frame(&mut self, dt: f64) -> GameResult<FrameReport> {
        let mut report = FrameReport::default();
        if self.run_state != RunState::Running {
            return Ok(report);
        }
        let dt = dt.max(0.0);

        report.expired = self.engine.advance_effects(&mut self.state, dt);

        if self.food_rotation.advance(dt) {
            if let Err(err) = self.engine.rotate_food(&mut self.state) {
                return Err(self.abort(err));
            }
            self.food_rotation = Countdown::new(self.engine.config().food_rotation_interval);
            report.food_rotated = true;
        }

        if let Some(token) = self.scheduler.advance(dt) {
            report.tick = self.on_tick(token)?;
        }

        Ok(report)
    }

    /// Run the tick armed under `token`. Stale tokens, and any tick arriving
    /// while not running, are no-ops that do not reschedule.
    pub fn on_tick(&mut self, token: TickToken) -> GameResult<Option<StepResult>> {
        if !self.scheduler.claim(token) {
            tracing::debug!(?token, "stale tick dropped");
            return Ok(None);
        }
        if self.run_state != RunState::Running {
            return Ok(None);
        }

        let result = match self.engine.step(&mut self.state) {
            Ok(result) => result,
            Err(err) => return Err(self.abort(err)),
        };

        if result.terminated {
            self.game_over();
        } else {
            self.arm_next_tick();
        }

        Ok(Some(result))
    }

    /// Freeze the run. The engine has already burned the snake's tint.
    fn game_over(&mut self) {
        self.run_state = RunState::GameOver;
        self.scheduler.cancel();
    }

    /// End the run after an engine failure; only a restart leaves this state
    fn abort(&mut self, err: GameError) -> GameError {
        tracing::error!(error = %err, score = self.state.score, "run aborted");
        self.state.is_alive = false;
        self.state.tint = Tint::Burned;
        self.game_over();
        err
    }

    fn arm_next_tick(&mut self) -> TickToken {
        let delay = self.engine.tick_delay(&self.state);
        self.scheduler.arm(delay)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let state = &self.state;
        let mut obstacles: Vec<Cell> = state.level.obstacles.iter().copied().collect();
        obstacles.sort_by_key(|cell| (cell.z, cell.x));

        GameSnapshot {
            snake: state.snake.segments().to_vec(),
            direction: state.snake.direction,
            tint: state.tint,
            food: state.food,
            special_food: state.special_food,
            special_food_remaining: state.effects.special_food_remaining(),
            obstacles,
            bridges: state.level.bridges.clone(),
            score: state.score,
            level: state.level.level,
            run_state: self.run_state,
            boost_active: state.boost_active(),
            boost_remaining: state.effects.boost_remaining(),
            half_extent: state.bounds.half_extent,
        }
    }
}
