//! Dungeon generation
//!
//! Places the requested rooms (each spawning one monster), then joins nearby
//! rooms with corridors until every room is in one connectivity set. Finally
//! drops an exit and the player and reveals the player's room.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::connectivity::ConnectivityTracker;
use super::context::GenContext;
use super::corridor::{Corridor, carve_corridor};
use super::grid::Grid;
use super::map::{GameObject, Monster, MonsterId, ObjectMap};
use super::room::{Room, RoomId, place_room};
use super::tile::Point;
use super::visibility::{Door, DoorId};
use crate::config::GenParams;
use crate::error::GenError;
use crate::rng::GameRng;

/// A finished layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dungeon {
    pub params: GenParams,
    pub seed: u64,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub doors: Vec<Door>,
    pub monsters: Vec<Monster>,
    pub exit: Point,
    pub player: Point,
    pub player_room: RoomId,
    pub tracker: ConnectivityTracker,
    #[serde(skip)]
    pub map: ObjectMap,
}

impl Dungeon {
    /// Random floor point of a random room
    pub fn random_valid_point(&self, rng: &mut GameRng) -> Option<Point> {
        random_valid_point(&self.rooms, rng)
    }

    /// Room whose bounding box holds a point
    pub fn room_at(&self, p: Point) -> Option<&Room> {
        self.rooms.iter().find(|r| r.contains(p))
    }

    /// Reveal everything visible through a door, returning the number of
    /// newly revealed cells
    pub fn reveal_door(&mut self, id: DoorId) -> usize {
        let Some(door) = self.doors.get(id.0) else {
            return 0;
        };
        let before = self.map.visible_count();
        self.map.set_visible(door.visible.points(), true);
        self.map.visible_count() - before
    }
}

fn random_valid_point(rooms: &[Room], rng: &mut GameRng) -> Option<Point> {
    let room = rng.choose(rooms)?;
    Some(room.random_interior_point(rng))
}

/// Runs one generation pass over a fresh context
pub struct DungeonBuilder {
    ctx: GenContext,
    monsters: Vec<Monster>,
}

impl DungeonBuilder {
    pub fn new(params: GenParams) -> Result<Self, GenError> {
        params.validate()?;
        Ok(Self {
            ctx: GenContext::new(params),
            monsters: Vec::new(),
        })
    }

    pub fn build(mut self) -> Result<Dungeon, GenError> {
        self.place_rooms()?;
        self.connect_rooms()?;
        self.finish()
    }

    fn place_rooms(&mut self) -> Result<(), GenError> {
        let p = &self.ctx.params;
        let (min_w, max_w) = (p.min_room_width, p.max_room_width);
        let (min_h, max_h) = (p.min_room_height, p.max_room_height);

        for _ in 0..self.ctx.params.room_count {
            let width = self.ctx.rng.range(min_w, max_w);
            let height = self.ctx.rng.range(min_h, max_h);
            let room = place_room(&mut self.ctx, width, height)?;

            let spawn = self.ctx.rooms[room.0].random_interior_point(&mut self.ctx.rng);
            let id = MonsterId(self.monsters.len() as u32);
            self.ctx.map.place_object(spawn, GameObject::Monster(id));
            self.monsters.push(Monster {
                id,
                point: spawn,
                room,
            });
        }
        Ok(())
    }

    /// Carve corridors until one connectivity set remains
    fn connect_rooms(&mut self) -> Result<(), GenError> {
        let max_stalled = self.ctx.params.max_stalled_iterations;
        let mut stalled = 0;

        while self.ctx.tracker.set_count() > 1 {
            if stalled >= max_stalled {
                return Err(GenError::ConnectivityStalled {
                    sets: self.ctx.tracker.set_count(),
                    iterations: stalled,
                });
            }
            let sets = self.ctx.tracker.set_count();

            let Some(i) = self.ctx.rng.index(self.ctx.rooms.len()) else {
                break;
            };
            let current = RoomId(i);
            // Each corridor runs from the nearest room toward the chosen one
            if let Some(near) = nearest(&self.ctx, current)
                && let Err(err) = carve_corridor(&mut self.ctx, near, current)
                && !err.is_retryable()
            {
                return Err(err);
            }

            if self.ctx.tracker.set_count() < sets {
                stalled = 0;
            } else {
                stalled += 1;
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Dungeon, GenError> {
        let Self { mut ctx, monsters } = self;

        let (Some(exit), Some(player_room)) = (
            random_valid_point(&ctx.rooms, &mut ctx.rng),
            ctx.rng.index(ctx.rooms.len()).map(RoomId),
        ) else {
            return Err(GenError::InvalidParams("no rooms were placed".to_string()));
        };
        ctx.map.place_object(exit, GameObject::Exit);

        let room = &ctx.rooms[player_room.0];
        let player = room.center;
        ctx.map.place_object(player, GameObject::Player);
        ctx.map.set_visible(room.visible.points(), true);

        info!(
            "generated {} rooms, {} corridors, {} doors (seed {})",
            ctx.rooms.len(),
            ctx.corridors.len(),
            ctx.doors.len(),
            ctx.params.seed
        );
        debug!("player in room {} at {}, exit at {}", player_room, player, exit);

        Ok(Dungeon {
            seed: ctx.params.seed,
            params: ctx.params,
            grid: ctx.grid,
            rooms: ctx.rooms,
            corridors: ctx.corridors,
            doors: ctx.doors,
            monsters,
            exit,
            player,
            player_room,
            tracker: ctx.tracker,
            map: ctx.map,
        })
    }
}

/// Closest room not directly joined to `room`, by squared centre distance
///
/// Ties go to the earliest room.
pub fn nearest(ctx: &GenContext, room: RoomId) -> Option<RoomId> {
    let center = ctx.rooms[room.0].center;
    let mut best: Option<(i32, RoomId)> = None;
    for other in &ctx.rooms {
        if other.id == room || ctx.tracker.is_connected(other.id, room) {
            continue;
        }
        let dist = other.center.dist2(center);
        if best.is_none_or(|(d, _)| dist < d) {
            best = Some((dist, other.id));
        }
    }
    best.map(|(_, id)| id)
}

/// Generate a dungeon from parameters
pub fn generate(params: GenParams) -> Result<Dungeon, GenError> {
    DungeonBuilder::new(params)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::room::carve_room_at;
    use crate::dungeon::tile::TileKind;

    /// First default-sized dungeon from `seed` onward whose rooms all fit
    fn any_dungeon(seed: u64) -> Dungeon {
        (seed..seed + 100)
            .find_map(|s| generate(GenParams::with_seed(s)).ok())
            .unwrap()
    }

    #[test]
    fn test_nearest_skips_self_and_neighbours() {
        let mut ctx = GenContext::new(GenParams::default());
        let a = carve_room_at(&mut ctx, Point::new(1, 1), 8, 5).unwrap();
        let b = carve_room_at(&mut ctx, Point::new(12, 1), 8, 5).unwrap();
        let c = carve_room_at(&mut ctx, Point::new(30, 1), 8, 5).unwrap();
        let d = carve_room_at(&mut ctx, Point::new(1, 20), 8, 5).unwrap();

        assert_eq!(nearest(&ctx, a), Some(b));
        ctx.tracker.connect(a, b);
        assert_eq!(nearest(&ctx, a), Some(d));
        ctx.tracker.connect(a, d);
        assert_eq!(nearest(&ctx, a), Some(c));
        ctx.tracker.connect(a, c);
        assert_eq!(nearest(&ctx, a), None);
    }

    #[test]
    fn test_nearest_tie_goes_to_first() {
        let mut ctx = GenContext::new(GenParams::default());
        let a = carve_room_at(&mut ctx, Point::new(15, 10), 8, 5).unwrap();
        let left = carve_room_at(&mut ctx, Point::new(1, 10), 8, 5).unwrap();
        let _right = carve_room_at(&mut ctx, Point::new(29, 10), 8, 5).unwrap();
        assert_eq!(nearest(&ctx, a), Some(left));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = GenParams {
            room_count: 0,
            ..GenParams::default()
        };
        assert!(matches!(
            DungeonBuilder::new(params),
            Err(GenError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_unproductive_connection_loop_stalls() {
        // One-step walks never leave their room, so no set ever merges
        let err = (0..20)
            .map(|seed| {
                generate(GenParams {
                    room_count: 2,
                    seed,
                    max_corridor_steps: 1,
                    max_stalled_iterations: 50,
                    ..GenParams::default()
                })
            })
            .find_map(|result| match result {
                Err(GenError::NoSpaceForRoom { .. }) => None,
                other => Some(other),
            })
            .unwrap()
            .unwrap_err();

        assert_eq!(
            err,
            GenError::ConnectivityStalled {
                sets: 2,
                iterations: 50
            }
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_single_room_needs_no_corridors() {
        let dungeon = generate(GenParams {
            room_count: 1,
            seed: 4,
            ..GenParams::default()
        })
        .unwrap();
        assert_eq!(dungeon.rooms.len(), 1);
        assert!(dungeon.corridors.is_empty());
        assert_eq!(dungeon.player_room, RoomId(0));
        assert_eq!(dungeon.player, dungeon.rooms[0].center);
        assert!(dungeon.rooms[0].interior_contains(dungeon.exit));
    }

    #[test]
    fn test_two_rooms_get_joined() {
        for seed in 0..20 {
            let Ok(dungeon) = generate(GenParams {
                room_count: 2,
                seed,
                ..GenParams::default()
            }) else {
                continue;
            };
            assert_eq!(dungeon.tracker.set_count(), 1, "seed {seed}");
            assert!(dungeon.tracker.is_connected(RoomId(0), RoomId(1)));
            assert!(!dungeon.doors.is_empty());
        }
    }

    #[test]
    fn test_player_room_revealed() {
        let dungeon = any_dungeon(12);
        let room = &dungeon.rooms[dungeon.player_room.0];
        for p in room.visible.iter() {
            assert!(dungeon.map.is_visible(*p));
        }
        assert_eq!(dungeon.map.visible_count(), room.visible.unique_points().len());
        assert_eq!(dungeon.map.get_object(dungeon.player), Some(&GameObject::Player));
    }

    #[test]
    fn test_reveal_door_discloses_more() {
        let mut dungeon = any_dungeon(12);
        assert!(!dungeon.doors.is_empty());
        let before = dungeon.map.visible_count();
        let revealed: usize = (0..dungeon.doors.len())
            .map(|i| dungeon.reveal_door(DoorId(i)))
            .sum();
        assert!(revealed > 0);
        assert_eq!(dungeon.map.visible_count(), before + revealed);
        assert_eq!(dungeon.reveal_door(DoorId(usize::MAX)), 0);
    }

    #[test]
    fn test_room_at_and_valid_point() {
        let dungeon = any_dungeon(21);
        let mut rng = GameRng::new(99);
        for _ in 0..50 {
            let p = dungeon.random_valid_point(&mut rng).unwrap();
            assert_eq!(dungeon.grid.tile(p), TileKind::Floor);
            let room = dungeon.room_at(p).unwrap();
            assert!(room.interior_contains(p));
        }
        assert!(dungeon.room_at(Point::new(-5, -5)).is_none());
    }
}
