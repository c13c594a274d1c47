//! Tile classification and grid coordinates

use core::fmt;
use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{
    S_DOOR, S_EMPTY, S_FLOOR, S_HWALL, S_PATH, S_PATH_WALL, S_VWALL, S_WALL,
};

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Point {
    pub col: i32,
    pub row: i32,
}

impl Point {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Squared Euclidean distance
    pub fn dist2(self, other: Point) -> i32 {
        let dc = self.col - other.col;
        let dr = self.row - other.row;
        dc * dc + dr * dr
    }

    /// The four orthogonal neighbours (east, west, south, north)
    pub fn neighbours(self) -> [Point; 4] {
        [
            Point::new(self.col + 1, self.row),
            Point::new(self.col - 1, self.row),
            Point::new(self.col, self.row + 1),
            Point::new(self.col, self.row - 1),
        ]
    }

    /// Step one cell in a direction
    pub fn step(self, dir: Direction) -> Point {
        self + dir.delta()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.col + rhs.col, self.row + rhs.row)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.col - rhs.col, self.row - rhs.row)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Orthogonal step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Direction {
    East,
    West,
    South,
    North,
}

impl Direction {
    /// Column/row delta for this direction
    pub const fn delta(self) -> Point {
        match self {
            Direction::East => Point::new(1, 0),
            Direction::West => Point::new(-1, 0),
            Direction::South => Point::new(0, 1),
            Direction::North => Point::new(0, -1),
        }
    }
}

/// Generation-time tile classification
///
/// `VerticalWall`, `HorizontalWall` and `PathWall` are never stored in the
/// grid. They only pick which wall object is emitted; see [`TileKind::stored`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Empty = 0,
    Floor = 1,
    Path = 2,
    VerticalWall = 3,
    HorizontalWall = 4,
    Wall = 5,
    PathWall = 6,
    Door = 7,
}

impl TileKind {
    /// The kind actually kept in the grid for this classification
    pub const fn stored(self) -> TileKind {
        match self {
            TileKind::VerticalWall | TileKind::HorizontalWall => TileKind::Wall,
            TileKind::PathWall => TileKind::Empty,
            other => other,
        }
    }

    /// Get the display character for this tile kind
    pub const fn symbol(self) -> char {
        match self {
            TileKind::Empty => S_EMPTY,
            TileKind::Floor => S_FLOOR,
            TileKind::Path => S_PATH,
            TileKind::VerticalWall => S_VWALL,
            TileKind::HorizontalWall => S_HWALL,
            TileKind::Wall => S_WALL,
            TileKind::PathWall => S_PATH_WALL,
            TileKind::Door => S_DOOR,
        }
    }
}
