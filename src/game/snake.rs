use super::action::Direction;
use super::grid::Cell;

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0. Never empty.
    body: Vec<Cell>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting cell and direction, with
    /// `length - 1` segments trailing behind the head.
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dz) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dz));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments (head first). Returns `None` for
    /// an empty list.
    pub fn from_cells(cells: Vec<Cell>, direction: Direction) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        Some(Self {
            body: cells,
            direction,
        })
    }

    /// Get the head cell
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail cell (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> &[Cell] {
        &self.body
    }

    /// True iff the candidate lies on any current segment, head included
    pub fn self_collides(&self, candidate: Cell) -> bool {
        self.body.contains(&candidate)
    }

    /// Push a new head; drop the tail unless `keep_tail` is set
    pub fn advance(&mut self, new_head: Cell, keep_tail: bool) {
        self.body.insert(0, new_head);

        if !keep_tail {
            self.body.pop();
        }
    }

    /// Append `count` segments stacked on the current tail cell. They unfold
    /// as the snake moves on, because only the tail is ever dropped.
    pub fn grow(&mut self, count: usize) {
        let tail = self.tail();
        self.body.extend(std::iter::repeat_n(tail, count));
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
