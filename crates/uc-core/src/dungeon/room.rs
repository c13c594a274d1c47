//! Rooms and rejection-sampled room placement
//!
//! A room is an axis-aligned rectangle. Its border (minus the four corners)
//! is wall, everything inside the border is floor. Rooms never overlap:
//! candidates are resampled until they clear every existing room, up to the
//! configured attempt budget.

use core::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::context::GenContext;
use super::grid::Owner;
use super::tile::{Point, TileKind};
use super::visibility::Visibility;
use crate::error::GenError;
use crate::rng::GameRng;

/// Room identifier (creation order, index into the room list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Top-left corner of the bounding box
    pub min: Point,
    /// `min + (width, height)`, one past the far walls
    pub max: Point,
    pub center: Point,
    /// Every cell the room carved: interior, then top, bottom, left, right walls
    pub visible: Visibility,
}

impl Room {
    /// Create an uncarved room
    pub fn new(id: RoomId, min: Point, width: i32, height: i32) -> Self {
        let max = Point::new(min.col + width, min.row + height);
        Self {
            id,
            min,
            max,
            center: Point::new((min.col + max.col) / 2, (min.row + max.row) / 2),
            visible: Visibility::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.col - self.min.col
    }

    pub fn height(&self) -> i32 {
        self.max.row - self.min.row
    }

    /// Check if this room's bounding box touches or overlaps another's
    pub fn collides(&self, other: &Room) -> bool {
        !(self.min.col > other.max.col
            || self.max.col < other.min.col
            || self.min.row > other.max.row
            || self.max.row < other.min.row)
    }

    /// Check if a point is inside the bounding box
    pub fn contains(&self, p: Point) -> bool {
        p.col >= self.min.col
            && p.col <= self.max.col
            && p.row >= self.min.row
            && p.row <= self.max.row
    }

    /// Check if a point is on the room's floor
    pub fn interior_contains(&self, p: Point) -> bool {
        p.col > self.min.col
            && p.col < self.max.col - 1
            && p.row > self.min.row
            && p.row < self.max.row - 1
    }

    /// Random point strictly inside the walls
    pub fn random_interior_point(&self, rng: &mut GameRng) -> Point {
        let col = rng.range(self.min.col + 1, self.max.col - 1);
        let row = rng.range(self.min.row + 1, self.max.row - 1);
        Point::new(col, row)
    }

    /// Distance from a point to the bounding box, truncated (0 inside)
    pub fn distance_to(&self, p: Point) -> i32 {
        let cx = p.col.clamp(self.min.col, self.max.col);
        let cy = p.row.clamp(self.min.row, self.max.row);
        (f64::from(p.dist2(Point::new(cx, cy)))).sqrt() as i32
    }

    /// Cells to carve, in carving order
    fn layout(&self) -> Vec<(Point, TileKind)> {
        let (w, h) = (self.width(), self.height());
        let (x0, y0) = (self.min.col, self.min.row);
        let mut cells = Vec::new();

        for i in 1..w - 1 {
            for j in 1..h - 1 {
                cells.push((Point::new(x0 + i, y0 + j), TileKind::Floor));
            }
        }
        for i in 1..w - 1 {
            cells.push((Point::new(x0 + i, y0), TileKind::HorizontalWall));
        }
        for i in 1..w - 1 {
            cells.push((Point::new(x0 + i, y0 + h - 1), TileKind::HorizontalWall));
        }
        for j in 1..h - 1 {
            cells.push((Point::new(x0, y0 + j), TileKind::VerticalWall));
        }
        for j in 1..h - 1 {
            cells.push((Point::new(x0 + w - 1, y0 + j), TileKind::VerticalWall));
        }
        cells
    }
}

/// Place a room of the given size and carve it into the grid
pub fn place_room(ctx: &mut GenContext, width: i32, height: i32) -> Result<RoomId, GenError> {
    let id = RoomId(ctx.rooms.len());
    let no_space = |attempts| GenError::NoSpaceForRoom {
        room: id,
        width,
        height,
        attempts,
    };

    let span_x = ctx.grid.width() - width - 1;
    let span_y = ctx.grid.height() - height - 1;
    if span_x <= 0 || span_y <= 0 {
        return Err(no_space(0));
    }

    let max_attempts = ctx.params.max_room_attempts;
    let mut attempts = 0;
    let room = loop {
        if attempts >= max_attempts {
            return Err(no_space(attempts));
        }
        attempts += 1;

        let min = Point::new(ctx.rng.range(0, span_x), ctx.rng.range(0, span_y));
        let candidate = Room::new(id, min, width, height);
        if !ctx.rooms.iter().any(|r| candidate.collides(r)) {
            break candidate;
        }
    };

    debug!(
        "room {} placed at {} size {}x{} after {} attempts",
        id, room.min, width, height, attempts
    );
    Ok(carve(ctx, room))
}

/// Carve a room at a fixed position
///
/// The room must fit the same bounds rejection sampling would draw from and
/// must clear every existing room.
pub fn carve_room_at(
    ctx: &mut GenContext,
    min: Point,
    width: i32,
    height: i32,
) -> Result<RoomId, GenError> {
    let id = RoomId(ctx.rooms.len());
    let room = Room::new(id, min, width, height);
    let fits = min.col >= 0
        && min.row >= 0
        && min.col < ctx.grid.width() - width - 1
        && min.row < ctx.grid.height() - height - 1;
    if !fits || ctx.rooms.iter().any(|r| room.collides(r)) {
        return Err(GenError::NoSpaceForRoom {
            room: id,
            width,
            height,
            attempts: 1,
        });
    }
    Ok(carve(ctx, room))
}

fn carve(ctx: &mut GenContext, mut room: Room) -> RoomId {
    let id = room.id;
    let tracked = ctx.tracker.add_room();
    debug_assert_eq!(tracked, id);

    for (p, kind) in room.layout() {
        room.visible.push(p);
        ctx.place(kind, p, Owner::Room(id));
    }

    ctx.rooms.push(room);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenParams;

    fn ctx(width: i32, height: i32) -> GenContext {
        GenContext::new(GenParams {
            width,
            height,
            ..GenParams::default()
        })
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(RoomId(0), Point::new(2, 3), 10, 6);
        assert_eq!(room.max, Point::new(12, 9));
        assert_eq!(room.center, Point::new(7, 6));
        assert_eq!(room.width(), 10);
        assert_eq!(room.height(), 6);
    }

    #[test]
    fn test_collides() {
        let a = Room::new(RoomId(0), Point::new(0, 0), 10, 5);
        let touching = Room::new(RoomId(1), Point::new(10, 0), 8, 4);
        let apart = Room::new(RoomId(2), Point::new(11, 0), 8, 4);
        let below = Room::new(RoomId(3), Point::new(0, 6), 8, 4);
        assert!(a.collides(&touching));
        assert!(!a.collides(&apart));
        assert!(!a.collides(&below));
        assert!(a.collides(&a.clone()));
    }

    #[test]
    fn test_random_interior_point_is_floor() {
        let mut rng = GameRng::new(7);
        let room = Room::new(RoomId(0), Point::new(4, 4), 8, 4);
        for _ in 0..500 {
            let p = room.random_interior_point(&mut rng);
            assert!(room.interior_contains(p), "{p} not inside the walls");
        }
    }

    #[test]
    fn test_distance_to() {
        let room = Room::new(RoomId(0), Point::new(10, 10), 8, 4);
        assert_eq!(room.distance_to(Point::new(12, 12)), 0);
        assert_eq!(room.distance_to(Point::new(10, 5)), 5);
        assert_eq!(room.distance_to(Point::new(21, 18)), 5);
    }

    #[test]
    fn test_place_room_carves_tiles() {
        let mut ctx = ctx(40, 20);
        let id = place_room(&mut ctx, 8, 5).unwrap();
        let room = ctx.rooms[id.0].clone();

        // Corners are never carved
        assert_eq!(ctx.grid.tile(room.min), TileKind::Empty);
        assert_eq!(
            ctx.grid.tile(Point::new(room.min.col + 7, room.min.row + 4)),
            TileKind::Empty
        );

        // Walls are stored collapsed, interior is floor
        assert_eq!(
            ctx.grid.tile(Point::new(room.min.col + 1, room.min.row)),
            TileKind::Wall
        );
        assert_eq!(
            ctx.grid.tile(Point::new(room.min.col, room.min.row + 1)),
            TileKind::Wall
        );
        assert_eq!(
            ctx.grid.tile(Point::new(room.min.col + 1, room.min.row + 1)),
            TileKind::Floor
        );

        // 6x3 floor plus 2x6 horizontal and 2x3 vertical wall cells
        assert_eq!(room.visible.len(), 18 + 12 + 6);
        assert_eq!(ctx.grid.count(TileKind::Floor), 18);
        assert_eq!(ctx.grid.count(TileKind::Wall), 18);
        for p in room.visible.iter() {
            assert_eq!(ctx.grid.owner(*p), Owner::Room(id));
            assert!(!ctx.map.is_empty(*p));
        }
        assert_eq!(ctx.tracker.set_count(), 1);
    }

    #[test]
    fn test_rooms_never_overlap() {
        let mut ctx = ctx(80, 40);
        for _ in 0..6 {
            place_room(&mut ctx, 8, 4).unwrap();
        }
        for (i, a) in ctx.rooms.iter().enumerate() {
            for b in &ctx.rooms[i + 1..] {
                assert!(!a.collides(b), "rooms {} and {} overlap", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_carve_room_at_rejects_overlap() {
        let mut ctx = ctx(40, 20);
        let a = carve_room_at(&mut ctx, Point::new(2, 2), 8, 5).unwrap();
        assert_eq!(a, RoomId(0));
        assert_eq!(ctx.rooms[0].min, Point::new(2, 2));

        let err = carve_room_at(&mut ctx, Point::new(6, 4), 8, 5).unwrap_err();
        assert!(matches!(err, GenError::NoSpaceForRoom { room: RoomId(1), .. }));

        // Out of the sampling bounds
        assert!(carve_room_at(&mut ctx, Point::new(31, 2), 8, 5).is_err());
        assert_eq!(ctx.rooms.len(), 1);
    }

    #[test]
    fn test_room_too_large_for_grid() {
        let mut ctx = ctx(10, 10);
        let err = place_room(&mut ctx, 12, 4).unwrap_err();
        assert!(matches!(err, GenError::NoSpaceForRoom { attempts: 0, .. }));
    }

    #[test]
    fn test_full_grid_reports_no_space() {
        let mut ctx = ctx(12, 8);
        place_room(&mut ctx, 8, 4).unwrap();
        let err = place_room(&mut ctx, 8, 4).unwrap_err();
        match err {
            GenError::NoSpaceForRoom { room, attempts, .. } => {
                assert_eq!(room, RoomId(1));
                assert_eq!(attempts, ctx.params.max_room_attempts);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(ctx.rooms.len(), 1);
    }
}
