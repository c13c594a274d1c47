//! Object map handed to the game layer
//!
//! Every cell holds a stack of placed objects; the most recently placed one
//! is current. The generator only ever pushes onto these stacks, and marks
//! cells visible when the player's starting room is revealed.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::room::RoomId;
use super::tile::{Point, TileKind};
use super::visibility::DoorId;
use crate::consts::{
    S_DOOR, S_EMPTY, S_EXIT, S_FLOOR, S_HWALL, S_MONSTER, S_PATH, S_PATH_WALL, S_PLAYER,
    S_VWALL,
};

/// Unique identifier for spawned monsters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

/// A monster spawned during generation, one per room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub point: Point,
    pub room: RoomId,
}

/// Objects the generator emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameObject {
    Floor,
    Path,
    VerticalWall,
    HorizontalWall,
    PathWall,
    Door(DoorId),
    Monster(MonsterId),
    Exit,
    Player,
}

impl GameObject {
    /// Object emitted for a carved tile classification
    ///
    /// Doors are emitted with their id by the door placement path, and
    /// `Empty`/`Wall` never produce an object.
    pub const fn for_tile(kind: TileKind) -> Option<GameObject> {
        match kind {
            TileKind::Floor => Some(GameObject::Floor),
            TileKind::Path => Some(GameObject::Path),
            TileKind::VerticalWall => Some(GameObject::VerticalWall),
            TileKind::HorizontalWall => Some(GameObject::HorizontalWall),
            TileKind::PathWall => Some(GameObject::PathWall),
            TileKind::Empty | TileKind::Wall | TileKind::Door => None,
        }
    }

    pub const fn symbol(&self) -> char {
        match self {
            GameObject::Floor => S_FLOOR,
            GameObject::Path => S_PATH,
            GameObject::VerticalWall => S_VWALL,
            GameObject::HorizontalWall => S_HWALL,
            GameObject::PathWall => S_PATH_WALL,
            GameObject::Door(_) => S_DOOR,
            GameObject::Monster(_) => S_MONSTER,
            GameObject::Exit => S_EXIT,
            GameObject::Player => S_PLAYER,
        }
    }
}

/// Per-cell object stacks plus the set of revealed cells, indexed `[col][row]`
#[derive(Debug, Clone, Default)]
pub struct ObjectMap {
    width: i32,
    height: i32,
    stacks: Vec<Vec<Vec<GameObject>>>,
    visible: Vec<Vec<bool>>,
}

impl ObjectMap {
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        Self {
            width,
            height,
            stacks: vec![vec![Vec::new(); h]; w],
            visible: vec![vec![false; h]; w],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, p: Point) -> (usize, usize) {
        assert!(
            p.col >= 0 && p.row >= 0 && p.col < self.width && p.row < self.height,
            "map coordinate {p} outside {}x{}",
            self.width,
            self.height
        );
        (p.col as usize, p.row as usize)
    }

    /// Push an object on top of the stack at a point
    pub fn place_object(&mut self, p: Point, object: GameObject) {
        let (c, r) = self.index(p);
        self.stacks[c][r].push(object);
    }

    /// The most recently placed object at a point
    pub fn get_object(&self, p: Point) -> Option<&GameObject> {
        let (c, r) = self.index(p);
        self.stacks[c][r].last()
    }

    /// Check if nothing has been placed at a point
    pub fn is_empty(&self, p: Point) -> bool {
        let (c, r) = self.index(p);
        self.stacks[c][r].is_empty()
    }

    /// Full stack at a point, bottom first
    pub fn stack(&self, p: Point) -> &[GameObject] {
        let (c, r) = self.index(p);
        &self.stacks[c][r]
    }

    /// Mark points as visible (or hidden)
    pub fn set_visible(&mut self, points: &[Point], visible: bool) {
        for &p in points {
            let (c, r) = self.index(p);
            self.visible[c][r] = visible;
        }
    }

    pub fn is_visible(&self, p: Point) -> bool {
        let (c, r) = self.index(p);
        self.visible[c][r]
    }

    /// Number of visible cells
    pub fn visible_count(&self) -> usize {
        self.visible
            .iter()
            .flat_map(|col| col.iter())
            .filter(|&&v| v)
            .count()
    }

    /// Points whose current object matches a predicate, column-major
    pub fn find(&self, pred: impl Fn(&GameObject) -> bool) -> Vec<Point> {
        let mut out = Vec::new();
        for (c, col) in self.stacks.iter().enumerate() {
            for (r, stack) in col.iter().enumerate() {
                if stack.iter().any(&pred) {
                    out.push(Point::new(c as i32, r as i32));
                }
            }
        }
        out
    }
}

impl fmt::Display for ObjectMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            let line: String = (0..self.width)
                .map(|col| {
                    self.get_object(Point::new(col, row))
                        .map_or(S_EMPTY, GameObject::symbol)
                })
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
