use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};

use crate::autopilot::Autopilot;
use crate::game::{Command, FrameReport, GameConfig, GameController, RunState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{CameraView, Renderer};

/// Seconds a finished demo run stays on screen before restarting
const DEMO_RESTART_DELAY: f64 = 2.0;

/// Terminal front-end. Feeds keyboard input and frame time into the
/// controller and draws its snapshot every frame. With an autopilot attached
/// the snake steers itself and restarts after each game over.
pub struct HumanMode {
    controller: GameController,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    autopilot: Option<Autopilot>,
    view: CameraView,
    frame_interval: Duration,
    game_over_for: f64,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, fps: u32) -> Result<Self> {
        let controller = GameController::new(config).context("Failed to set up the game")?;

        Ok(Self {
            controller,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            autopilot: None,
            view: CameraView::default(),
            frame_interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            game_over_for: 0.0,
            should_quit: false,
        })
    }

    /// Same front-end, driven by the autopilot
    pub fn demo(config: GameConfig, fps: u32) -> Result<Self> {
        let mut mode = Self::new(config, fps)?;
        mode.autopilot = Some(Autopilot::new());
        Ok(mode)
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Ticks are scheduled by the controller; this only sets frame granularity
        let mut frame_timer = interval(self.frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Advance the simulation and draw
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    let dt = now.duration_since(last_frame).as_secs_f64();
                    last_frame = now;

                    self.update_game(dt)?;

                    let snapshot = self.controller.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics, self.view);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Game(command) => self.apply_command(command)?,
                KeyAction::ToggleCamera => self.view = self.view.toggled(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn apply_command(&mut self, command: Command) -> Result<()> {
        let was_over = self.controller.run_state() == RunState::GameOver;
        self.controller.handle(command)?;

        if was_over && self.controller.run_state() == RunState::Running {
            self.metrics.on_game_start();
            self.game_over_for = 0.0;
        }
        Ok(())
    }

    fn update_game(&mut self, dt: f64) -> Result<()> {
        if let Some(pilot) = &self.autopilot {
            if self.controller.run_state() == RunState::Running {
                if let Some(direction) = pilot.choose(&self.controller.snapshot()) {
                    self.controller.on_input(direction);
                }
            }
        }

        let ran = self.controller.run_state();
        let report = self.controller.on_frame(dt)?;
        self.metrics.record_frame(dt, ran, &report);
        self.track_game_over(&report);

        if self.autopilot.is_some() && self.controller.run_state() == RunState::GameOver {
            self.game_over_for += dt;
            if self.game_over_for >= DEMO_RESTART_DELAY {
                self.apply_command(Command::Restart)?;
            }
        }

        Ok(())
    }

    fn track_game_over(&mut self, report: &FrameReport) {
        let snapshot = self.controller.snapshot();
        if report.tick.as_ref().is_some_and(|tick| tick.terminated) {
            self.metrics.on_game_over(&snapshot);
        } else {
            self.metrics.observe(&snapshot);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
