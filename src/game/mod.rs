//! Core game rules for the 3D snake.
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Front-ends drive it through [`GameController`] and draw from [`GameSnapshot`].

pub mod action;
pub mod config;
pub mod controller;
pub mod effects;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod level;
pub mod scheduler;
pub mod snake;
pub mod spawn;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::GameConfig;
pub use controller::{FrameReport, GameController, GameSnapshot, RunState};
pub use effects::{Countdown, TimedEffects};
pub use engine::{CollisionType, Eaten, GameEngine, StepInfo, StepResult};
pub use error::{GameError, GameResult};
pub use food::{Food, FoodKind};
pub use grid::{Bounds, Bridge, Cell, on_bridge};
pub use level::{LevelConfig, LevelGenerator};
pub use scheduler::{TickScheduler, TickToken};
pub use snake::Snake;
pub use spawn::Spawner;
pub use state::{GameState, Tint};
