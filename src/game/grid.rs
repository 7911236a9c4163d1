use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell on the ground plane. `z` is the depth axis of the 3D scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, z: 0 };

    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dz) = direction.delta();
        self.moved_by(dx, dz)
    }

    /// Manhattan distance to another cell
    pub fn distance(&self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }
}

/// Square playing field centred on the origin, `half_extent` cells in every
/// direction (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub half_extent: i32,
}

impl Bounds {
    /// Bounds for a grid of `grid_size` cells per side (`H = grid_size / 2`).
    pub fn from_grid_size(grid_size: u32) -> Self {
        Self {
            half_extent: (grid_size / 2) as i32,
        }
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x.abs() <= self.half_extent && cell.z.abs() <= self.half_extent
    }

    /// Number of cells inside the bounds
    pub fn capacity(&self) -> usize {
        let side = (2 * self.half_extent + 1) as usize;
        side * side
    }

    /// Every cell inside the bounds, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let h = self.half_extent;
        (-h..=h).flat_map(move |z| (-h..=h).map(move |x| Cell::new(x, z)))
    }
}

/// A traversable strip. Cells under the footprint are exempt from wall and
/// obstacle checks, never from self-collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bridge {
    /// Centre cell of the strip
    pub center: Cell,
    /// Footprint width along x; depth along z is always one cell
    pub width: u32,
}

impl Bridge {
    pub fn new(center: Cell, width: u32) -> Self {
        Self { center, width }
    }

    /// `|dx| <= width / 2` and `|dz| <= 1 / 2`, evaluated on doubled
    /// coordinates so odd widths keep their half-cell edge.
    pub fn covers(&self, cell: Cell) -> bool {
        let dx2 = 2 * cell.x.abs_diff(self.center.x);
        let dz2 = 2 * cell.z.abs_diff(self.center.z);
        dx2 <= self.width && dz2 <= 1
    }

    /// Cells covered by the footprint, left to right
    pub fn footprint(&self) -> impl Iterator<Item = Cell> + '_ {
        let reach = (self.width / 2) as i32;
        (-reach..=reach).map(move |dx| self.center.moved_by(dx, 0))
    }
}

pub fn on_bridge(cell: Cell, bridge: &Bridge) -> bool {
    bridge.covers(cell)
}
