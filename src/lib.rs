//! Snake3D - a grid-based 3D snake game
//!
//! This library provides:
//! - Core game rules: tick engine, levels, timed effects (game module)
//! - A greedy autopilot for unattended play (autopilot module)
//! - Terminal front-end pieces: input mapping, rendering, session metrics
//! - Execution modes (human, demo, headless)

pub mod autopilot;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
