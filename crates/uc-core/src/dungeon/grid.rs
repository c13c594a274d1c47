//! Generation grid
//!
//! Tile kinds plus the feature that carved each cell. Ownership is only
//! consulted while carving, to resolve collisions and attribute connections.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::corridor::CorridorId;
use super::room::RoomId;
use super::tile::{Point, TileKind};

/// The feature that carved a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    None,
    Room(RoomId),
    Corridor(CorridorId),
}

/// Width x height tile grid, indexed `[col][row]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Vec<TileKind>>,
    owners: Vec<Vec<Owner>>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        Self {
            width,
            height,
            cells: vec![vec![TileKind::Empty; h]; w],
            owners: vec![vec![Owner::None; h]; w],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if a point lies inside the grid
    pub fn in_bounds(&self, p: Point) -> bool {
        p.col >= 0 && p.row >= 0 && p.col < self.width && p.row < self.height
    }

    fn index(&self, p: Point) -> (usize, usize) {
        assert!(
            self.in_bounds(p),
            "grid coordinate {p} outside {}x{}",
            self.width,
            self.height
        );
        (p.col as usize, p.row as usize)
    }

    /// Stored tile kind at a point
    ///
    /// Panics if the point is outside the grid.
    pub fn tile(&self, p: Point) -> TileKind {
        let (c, r) = self.index(p);
        self.cells[c][r]
    }

    /// Feature that last carved a point
    ///
    /// Panics if the point is outside the grid.
    pub fn owner(&self, p: Point) -> Owner {
        let (c, r) = self.index(p);
        self.owners[c][r]
    }

    /// Write a tile, collapsing transient classifications to their stored kind
    pub fn set(&mut self, p: Point, kind: TileKind, owner: Owner) {
        let (c, r) = self.index(p);
        self.cells[c][r] = kind.stored();
        self.owners[c][r] = owner;
    }

    /// Count cells of a stored kind
    pub fn count(&self, kind: TileKind) -> usize {
        self.cells
            .iter()
            .flat_map(|col| col.iter())
            .filter(|&&k| k == kind)
            .count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            let line: String = (0..self.width)
                .map(|col| self.tile(Point::new(col, row)).symbol())
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
