//! Greedy steering for unattended play.
//!
//! Heads for the special food when it is on the field, ordinary food
//! otherwise, and only takes moves that survive the next tick. A one-move
//! lookahead rejects moves that leave no safe follow-up.

use std::collections::HashSet;

use crate::game::{Cell, Direction, GameSnapshot};

/// Penalty added to moves that walk into a dead end
const DEAD_END_PENALTY: u32 = 10_000;

#[derive(Debug, Clone, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Pick the next direction, or `None` to keep going straight
    pub fn choose(&self, snapshot: &GameSnapshot) -> Option<Direction> {
        let field = Field::new(snapshot);
        let head = snapshot.head();
        let target = snapshot.special_food.unwrap_or(snapshot.food.cell);

        Direction::ALL
            .into_iter()
            .filter(|dir| !snapshot.direction.is_opposite(*dir))
            .filter_map(|dir| {
                let first = head.moved_in_direction(dir);
                if !field.is_safe(first, &snapshot.snake) {
                    return None;
                }

                // body after the move, tail dropped
                let mut body = Vec::with_capacity(snapshot.snake.len());
                body.push(first);
                body.extend_from_slice(&snapshot.snake[..snapshot.snake.len() - 1]);

                let exits = Direction::ALL
                    .into_iter()
                    .filter(|next| !dir.is_opposite(*next))
                    .filter(|next| field.is_safe(first.moved_in_direction(*next), &body))
                    .count();

                let mut cost = first.distance(target) * 2;
                if exits == 0 {
                    cost += DEAD_END_PENALTY;
                }
                if dir != snapshot.direction {
                    cost += 1;
                }
                Some((cost, dir))
            })
            .min_by_key(|(cost, _)| *cost)
            .map(|(_, dir)| dir)
    }
}

/// Static hazards of the current level
struct Field<'a> {
    snapshot: &'a GameSnapshot,
    obstacles: HashSet<Cell>,
}

impl<'a> Field<'a> {
    fn new(snapshot: &'a GameSnapshot) -> Self {
        Self {
            snapshot,
            obstacles: snapshot.obstacles.iter().copied().collect(),
        }
    }

    /// Mirrors the tick's collision rules
    fn is_safe(&self, cell: Cell, body: &[Cell]) -> bool {
        if body.contains(&cell) {
            return false;
        }
        if self.snapshot.bridges.iter().any(|bridge| bridge.covers(cell)) {
            return true;
        }
        let h = self.snapshot.half_extent;
        cell.x.abs() <= h && cell.z.abs() <= h && !self.obstacles.contains(&cell)
    }
}
