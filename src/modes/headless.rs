//! Unattended simulation without a terminal UI.
//!
//! Steps the controller with a fixed frame delta, steering with the
//! autopilot and restarting after every game over, until the simulated time
//! budget is spent. Progress goes to `tracing`; the caller gets a summary.

use anyhow::{Context, Result};

use crate::autopilot::Autopilot;
use crate::game::{Command, GameConfig, GameController, RunState};
use crate::metrics::GameMetrics;

/// Totals for one headless session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessSummary {
    pub simulated_secs: f64,
    pub frames: u64,
    pub metrics: GameMetrics,
}

pub struct HeadlessMode {
    controller: GameController,
    autopilot: Autopilot,
    frame_dt: f64,
    duration: f64,
}

impl HeadlessMode {
    pub fn new(config: GameConfig, fps: u32, duration: f64) -> Result<Self> {
        let controller = GameController::new(config).context("Failed to set up the game")?;
        Ok(Self {
            controller,
            autopilot: Autopilot::new(),
            frame_dt: 1.0 / fps.max(1) as f64,
            duration: duration.max(0.0),
        })
    }

    pub fn run(&mut self) -> Result<HeadlessSummary> {
        let mut summary = HeadlessSummary::default();

        while summary.simulated_secs < self.duration {
            if self.controller.run_state() == RunState::GameOver {
                self.controller.handle(Command::Restart)?;
                summary.metrics.on_game_start();
            }

            if let Some(direction) = self.autopilot.choose(&self.controller.snapshot()) {
                self.controller.on_input(direction);
            }

            let ran = self.controller.run_state();
            let report = self.controller.on_frame(self.frame_dt)?;
            summary.frames += 1;
            summary.simulated_secs += self.frame_dt;
            summary.metrics.record_frame(self.frame_dt, ran, &report);

            let Some(tick) = report.tick else {
                continue;
            };
            let snapshot = self.controller.snapshot();
            if tick.terminated {
                summary.metrics.on_game_over(&snapshot);
            } else {
                summary.metrics.observe(&snapshot);
            }
            if let Some(level) = tick.info.level_up {
                tracing::info!(level, score = snapshot.score, "level up");
            }
        }

        summary.metrics.observe(&self.controller.snapshot());

        tracing::info!(?summary, "headless run finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_run_is_deterministic() {
        let run = || {
            HeadlessMode::new(GameConfig::default().with_seed(21), 60, 30.0)
                .unwrap()
                .run()
                .unwrap()
        };

        let first = run();
        let second = run();

        assert_eq!(first, second);
        assert!(first.metrics.ticks > 0);
        assert!(first.metrics.longest_snake >= 1);
        assert!(first.frames >= 1800);
    }

    #[test]
    fn test_zero_duration_does_nothing() {
        let summary = HeadlessMode::new(GameConfig::default().with_seed(1), 60, 0.0)
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.metrics.ticks, 0);
        assert_eq!(summary.metrics.games_played, 0);
        assert_eq!(summary.metrics.best_level, 1);
    }
}
