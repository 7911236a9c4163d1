use std::time::Duration;

use crate::game::{Eaten, FrameReport, GameSnapshot, RunState};

/// Session totals shared by every front-end. Kept in memory only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameMetrics {
    /// Running time of the current game; paused and finished frames don't count
    pub game_time: Duration,
    pub games_played: u32,
    pub best_score: u32,
    pub best_level: u32,
    pub longest_snake: usize,
    pub ticks: u64,
    pub food_eaten: u32,
    pub special_food_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one `on_frame` call into the totals. `ran` is the run state the
    /// frame started in.
    pub fn record_frame(&mut self, dt: f64, ran: RunState, report: &FrameReport) {
        if ran == RunState::Running && dt.is_finite() && dt > 0.0 {
            self.game_time += Duration::from_secs_f64(dt);
        }

        let Some(tick) = &report.tick else {
            return;
        };
        self.ticks += 1;
        match tick.info.eaten {
            Some(Eaten::Food(_)) => self.food_eaten += 1,
            Some(Eaten::SpecialFood) => self.special_food_eaten += 1,
            None => {}
        }
    }

    /// Raise the bests to whatever the snapshot shows
    pub fn observe(&mut self, snapshot: &GameSnapshot) {
        self.best_score = self.best_score.max(snapshot.score);
        self.best_level = self.best_level.max(snapshot.level);
        self.longest_snake = self.longest_snake.max(snapshot.snake.len());
    }

    pub fn on_game_start(&mut self) {
        self.game_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, snapshot: &GameSnapshot) {
        self.games_played += 1;
        self.observe(snapshot);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.game_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}
