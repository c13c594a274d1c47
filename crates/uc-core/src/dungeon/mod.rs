//! Dungeon layout generation
//!
//! Rooms, corridors and doors carved into a tile grid, plus the connectivity
//! and visibility bookkeeping that goes with them.

mod builder;
mod connectivity;
mod context;
mod corridor;
mod grid;
mod map;
mod room;
mod tile;
mod visibility;

pub use builder::{Dungeon, DungeonBuilder, generate, nearest};
pub use connectivity::ConnectivityTracker;
pub use context::GenContext;
pub use corridor::{CarveOutcome, Corridor, CorridorId, carve_corridor};
pub use grid::{Grid, Owner};
pub use map::{GameObject, Monster, MonsterId, ObjectMap};
pub use room::{Room, RoomId, carve_room_at, place_room};
pub use tile::{Direction, Point, TileKind};
pub use visibility::{Door, DoorId, Visibility};
