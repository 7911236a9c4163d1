use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, FoodKind, GameSnapshot, RunState, Tint};
use crate::metrics::GameMetrics;

/// Cells shown around the head in the follow view
const FOLLOW_RADIUS: i32 = 6;

/// Which part of the field is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraView {
    /// Whole field plus the wall ring
    #[default]
    TopDown,
    /// A window centred on the snake's head
    FollowHead,
}

impl CameraView {
    pub fn toggled(self) -> Self {
        match self {
            CameraView::TopDown => CameraView::FollowHead,
            CameraView::FollowHead => CameraView::TopDown,
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
        view: CameraView,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Status
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);
        frame.render_widget(self.render_grid(snapshot, view), chunks[1]);
        frame.render_widget(self.render_status(snapshot), chunks[2]);
        frame.render_widget(self.render_controls(), chunks[3]);
    }

    fn render_grid(&self, snapshot: &GameSnapshot, view: CameraView) -> Paragraph<'_> {
        let wall = snapshot.half_extent + 1;
        let (center, radius) = match view {
            CameraView::TopDown => (Cell::ORIGIN, wall),
            CameraView::FollowHead => (snapshot.head(), FOLLOW_RADIUS),
        };

        let body: HashSet<Cell> = snapshot.snake.iter().copied().collect();
        let obstacles: HashSet<Cell> = snapshot.obstacles.iter().copied().collect();
        let snake_style = Style::default().fg(tint_color(snapshot.tint));

        let mut lines = Vec::new();
        // +z is drawn at the top
        for z in (center.z - radius..=center.z + radius).rev() {
            let mut spans = Vec::new();

            for x in center.x - radius..=center.x + radius {
                let cell = Cell::new(x, z);

                let span = if cell == snapshot.head() {
                    Span::styled("■ ", snake_style.add_modifier(Modifier::BOLD))
                } else if body.contains(&cell) {
                    Span::styled("□ ", snake_style)
                } else if cell == snapshot.food.cell {
                    let (glyph, color) = food_glyph(snapshot.food.kind);
                    Span::styled(glyph, Style::default().fg(color).add_modifier(Modifier::BOLD))
                } else if snapshot.special_food == Some(cell) {
                    Span::styled(
                        "★ ",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.bridges.iter().any(|bridge| bridge.covers(cell)) {
                    Span::styled("= ", Style::default().fg(Color::LightBlue))
                } else if obstacles.contains(&cell) {
                    Span::styled("▓ ", Style::default().fg(Color::Rgb(150, 90, 40)))
                } else if (x.abs() == wall && z.abs() <= wall) || (z.abs() == wall && x.abs() <= wall) {
                    Span::styled("█ ", Style::default().fg(Color::Gray))
                } else if x.abs() > wall || z.abs() > wall {
                    Span::raw("  ")
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        let title = match snapshot.run_state {
            RunState::Running => " Snake3D ",
            RunState::Paused => " PAUSED ",
            RunState::GameOver => " GAME OVER ",
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(snapshot.level.to_string(), value),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(snapshot.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ];

        if let Some(remaining) = snapshot.boost_remaining {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                format!("SPEED BOOST {remaining:.1}s"),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_status(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let line = match snapshot.run_state {
            RunState::GameOver => Line::from(vec![
                Span::styled(
                    "GAME OVER",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" - press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart", Style::default().fg(Color::Gray)),
            ]),
            RunState::Paused => Line::from(vec![
                Span::styled(
                    "PAUSED",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" - press P to continue", Style::default().fg(Color::Gray)),
            ]),
            RunState::Running => match snapshot.special_food_remaining {
                Some(remaining) => Line::from(Span::styled(
                    format!("Special food! {remaining:.1}s left"),
                    Style::default().fg(Color::Yellow),
                )),
                None => Line::from(""),
            },
        };

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Cyan)),
            Span::raw(" restart | "),
            Span::styled("C", Style::default().fg(Color::Cyan)),
            Span::raw(" camera | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Normal => Color::Green,
        Tint::Boosted => Color::Yellow,
        Tint::Burned => Color::Red,
    }
}

fn food_glyph(kind: FoodKind) -> (&'static str, Color) {
    match kind {
        FoodKind::Sphere => ("● ", Color::Red),
        FoodKind::Cube => ("■ ", Color::Cyan),
        FoodKind::Diamond => ("◆ ", Color::Magenta),
    }
}
