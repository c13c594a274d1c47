//! Generation context
//!
//! Everything one generation run mutates, owned in one place and passed by
//! `&mut` into room placement and corridor carving.

use super::connectivity::ConnectivityTracker;
use super::corridor::Corridor;
use super::grid::{Grid, Owner};
use super::map::{GameObject, ObjectMap};
use super::room::{Room, RoomId};
use super::tile::{Point, TileKind};
use super::visibility::{Door, DoorId, Visibility};
use crate::config::GenParams;
use crate::rng::GameRng;

/// Mutable state of a single generation run
#[derive(Debug, Clone)]
pub struct GenContext {
    pub params: GenParams,
    pub rng: GameRng,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub doors: Vec<Door>,
    pub tracker: ConnectivityTracker,
    pub map: ObjectMap,
}

impl GenContext {
    /// Fresh context seeded from the parameters
    pub fn new(params: GenParams) -> Self {
        Self {
            rng: GameRng::new(params.seed),
            grid: Grid::new(params.width, params.height),
            map: ObjectMap::new(params.width, params.height),
            rooms: Vec::new(),
            corridors: Vec::new(),
            doors: Vec::new(),
            tracker: ConnectivityTracker::new(),
            params,
        }
    }

    /// Carve a tile and emit the matching object
    pub fn place(&mut self, kind: TileKind, p: Point, owner: Owner) {
        self.grid.set(p, kind, owner);
        if let Some(object) = GameObject::for_tile(kind) {
            self.map.place_object(p, object);
        }
    }

    /// Place a door attributed to a room
    pub fn place_door(&mut self, p: Point, room: RoomId, visible: Visibility) -> DoorId {
        let id = DoorId(self.doors.len());
        self.grid.set(p, TileKind::Door, Owner::Room(room));
        self.map.place_object(p, GameObject::Door(id));
        self.doors.push(Door {
            id,
            point: p,
            room,
            visible,
        });
        id
    }

    /// Room that a cell's owner stands for in connectivity terms
    ///
    /// Corridors delegate to the room they started from.
    pub fn owning_room(&self, owner: Owner) -> Option<RoomId> {
        match owner {
            Owner::None => None,
            Owner::Room(room) => Some(room),
            Owner::Corridor(corridor) => self.corridors.get(corridor.0).map(|c| c.origin),
        }
    }
}
