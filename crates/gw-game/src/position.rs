//! Grid position and movement.
//!
//! All coordinates are **0-indexed** grid cells: `x` is the column, `y` the
//! row, `(0, 0)` the top-left. Movement is one cell on one axis, clamped to
//! the grid, so walking into a wall leaves the position where it was.

use std::fmt;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// All directions, in `w a s d` order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Left, Self::Down, Self::Right];
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cell on the grid: (x, y), both 0-indexed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    /// The top-left cell.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Pull the position inside a `width × height` grid.
    ///
    /// A zero-sized axis clamps to 0.
    #[must_use]
    pub fn clamp_to(self, width: u16, height: u16) -> Self {
        Self {
            x: self.x.min(width.saturating_sub(1)),
            y: self.y.min(height.saturating_sub(1)),
        }
    }

    /// The neighbouring cell in `dir`, clamped to a `width × height` grid.
    ///
    /// ```
    /// use gw_game::position::{Direction, Position};
    ///
    /// let p = Position::new(0, 1);
    /// assert_eq!(p.step(Direction::Left, 3, 3), p);            // wall
    /// assert_eq!(p.step(Direction::Up, 3, 3), Position::new(0, 0));
    /// ```
    #[must_use]
    pub fn step(self, dir: Direction, width: u16, height: u16) -> Self {
        let moved = match dir {
            Direction::Up => Self::new(self.x, self.y.saturating_sub(1)),
            Direction::Down => Self::new(self.x, self.y.saturating_add(1)),
            Direction::Left => Self::new(self.x.saturating_sub(1), self.y),
            Direction::Right => Self::new(self.x.saturating_add(1), self.y),
        };
        moved.clamp_to(width, height)
    }

    /// The position as an `(x, y)` tuple, the form screen writes take.
    #[inline]
    #[must_use]
    pub const fn as_tuple(self) -> (u16, u16) {
        (self.x, self.y)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({},{})", self.x, self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
