//! Corridor carving
//!
//! A corridor is a biased random walk from a floor point of its origin room
//! toward a floor point of its target room. Each step moves one cell along an
//! axis that still has distance left, preferring the previous direction.
//!
//! While the walk is still inside its origin room it is inactive: stepping
//! into open space activates it and puts a door on the cell just left, while
//! stepping onto an existing path or door joins whatever owns it and ends the
//! walk. Once active, open space is carved as path, a room wall becomes a
//! door into that room, and another corridor's path merges the two. The walk
//! ends early on any of those joins, or as a dead end when no distance is left.

use core::fmt;

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use super::context::GenContext;
use super::grid::Owner;
use super::room::RoomId;
use super::tile::{Direction, Point, TileKind};
use super::visibility::{DoorId, Visibility};
use crate::error::GenError;
use crate::rng::GameRng;

/// Corridor identifier (index into the corridor list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CorridorId(pub usize);

impl fmt::Display for CorridorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a corridor walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarveOutcome {
    /// Reached its target point without running into anything to join
    DeadEnd,
    /// Ran into a feature owned by `room`; `merged` if that joined two sets
    Joined { room: RoomId, merged: bool },
}

/// A carved (or attempted) corridor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub id: CorridorId,
    /// Room the walk started in; the corridor's connectivity identity
    pub origin: RoomId,
    pub target: RoomId,
    pub start: Point,
    pub goal: Point,
    pub current: Point,
    /// Remaining `goal - current`
    pub travel: Point,
    pub prev: Option<Direction>,
    pub active: bool,
    pub visible: Visibility,
    /// Every position the walk stood on, starting point first
    pub route: Vec<Point>,
    /// Cells carved as path
    pub cells: Vec<Point>,
    /// Door placed when the walk left its origin room
    pub first_door: Option<DoorId>,
    pub outcome: Option<CarveOutcome>,
}

impl Corridor {
    pub fn new(id: CorridorId, origin: RoomId, target: RoomId, start: Point, goal: Point) -> Self {
        Self {
            id,
            origin,
            target,
            start,
            goal,
            current: start,
            travel: goal - start,
            prev: None,
            active: false,
            visible: Visibility::new(),
            route: vec![start],
            cells: Vec::new(),
            first_door: None,
            outcome: None,
        }
    }

    /// Directions that still reduce the remaining distance
    pub fn candidate_moves(&self) -> Vec<Direction> {
        let mut moves = Vec::with_capacity(2);
        if self.travel.col > 0 {
            moves.push(Direction::East);
        }
        if self.travel.col < 0 {
            moves.push(Direction::West);
        }
        if self.travel.row > 0 {
            moves.push(Direction::South);
        }
        if self.travel.row < 0 {
            moves.push(Direction::North);
        }
        moves
    }

    /// Pick a move, favouring the previous direction unless a 1-in-`dir_change`
    /// draw says to turn
    fn choose_move(
        &mut self,
        moves: &[Direction],
        rng: &mut GameRng,
        dir_change: u32,
    ) -> Direction {
        let mut dir = moves[rng.rn2(moves.len() as u32) as usize];
        if let Some(prev) = self.prev
            && moves.contains(&prev)
            && !rng.one_in(dir_change)
        {
            dir = prev;
        }
        self.prev = Some(dir);
        dir
    }

    /// Step one cell, returning the cell just left
    fn advance(&mut self, dir: Direction) -> Point {
        let last = self.current;
        self.current = last.step(dir);
        self.travel = self.travel - dir.delta();
        self.route.push(self.current);
        last
    }

    /// Number of times the walk changed direction
    pub fn turns(&self) -> usize {
        self.route
            .windows(3)
            .filter(|w| w[1] - w[0] != w[2] - w[1])
            .count()
    }
}

/// Carve a corridor from a floor point of `origin` toward one of `target`
///
/// The corridor is recorded even when the walk fails, since cells it already
/// carved reference it.
pub fn carve_corridor(
    ctx: &mut GenContext,
    origin: RoomId,
    target: RoomId,
) -> Result<CarveOutcome, GenError> {
    let id = CorridorId(ctx.corridors.len());
    let goal = ctx.rooms[target.0].random_interior_point(&mut ctx.rng);
    let start = ctx.rooms[origin.0].random_interior_point(&mut ctx.rng);

    let mut corridor = Corridor::new(id, origin, target, start, goal);
    let result = walk(ctx, &mut corridor);
    match &result {
        Ok(outcome) => {
            trace!(
                "corridor {} from room {} toward room {}: {:?} after {} steps",
                id,
                origin,
                target,
                outcome,
                corridor.route.len() - 1
            );
            corridor.outcome = Some(*outcome);
        }
        Err(err) => warn!("{}", err),
    }
    ctx.corridors.push(corridor);
    result
}

fn walk(ctx: &mut GenContext, corridor: &mut Corridor) -> Result<CarveOutcome, GenError> {
    let max_steps = ctx.params.max_corridor_steps;
    let dir_change = ctx.params.path_dir_change;
    let mut steps = 0;

    loop {
        let moves = corridor.candidate_moves();
        if moves.is_empty() {
            return Ok(CarveOutcome::DeadEnd);
        }
        if steps >= max_steps {
            return Err(GenError::CorridorStepOverflow {
                corridor: corridor.id,
                origin: corridor.origin,
                target: corridor.target,
                steps,
            });
        }
        steps += 1;

        let dir = corridor.choose_move(&moves, &mut ctx.rng, dir_change);
        let last = corridor.advance(dir);
        let here = corridor.current;

        if !corridor.active {
            match ctx.grid.tile(here) {
                TileKind::Empty => {
                    corridor.active = true;
                    corridor.visible.push(last);
                    let seeded = ctx.rooms[corridor.origin.0].visible.clone();
                    corridor.first_door = Some(ctx.place_door(last, corridor.origin, seeded));
                }
                TileKind::Path | TileKind::Door => {
                    if let Some(room) = ctx.owning_room(ctx.grid.owner(here)) {
                        return Ok(join(ctx, corridor.origin, room));
                    }
                }
                _ => {}
            }
        }

        if corridor.active {
            match ctx.grid.tile(here) {
                TileKind::Empty => {
                    ctx.place(TileKind::Path, here, Owner::Corridor(corridor.id));
                    corridor.visible.push(here);
                    corridor.cells.push(here);
                }
                TileKind::Wall => {
                    if let Some(room) = ctx.owning_room(ctx.grid.owner(here)) {
                        return Ok(enter_room(ctx, corridor, here, room));
                    }
                }
                TileKind::Path => {
                    if let Owner::Corridor(other) = ctx.grid.owner(here)
                        && other != corridor.id
                    {
                        return Ok(merge_corridors(ctx, corridor, other));
                    }
                }
                _ => {}
            }
        }

        for n in here.neighbours() {
            if ctx.grid.in_bounds(n) && ctx.grid.tile(n) == TileKind::Empty {
                ctx.place(TileKind::PathWall, n, Owner::Corridor(corridor.id));
            }
        }
    }
}

fn join(ctx: &mut GenContext, origin: RoomId, room: RoomId) -> CarveOutcome {
    let merged = ctx.tracker.connect(origin, room);
    CarveOutcome::Joined { room, merged }
}

/// The walk hit a room wall: put a door there and stop
fn enter_room(
    ctx: &mut GenContext,
    corridor: &mut Corridor,
    at: Point,
    room: RoomId,
) -> CarveOutcome {
    let outcome = join(ctx, corridor.origin, room);
    corridor.visible.push(at);

    let mut door_visible = corridor.visible.clone();
    door_visible.extend_from(&ctx.rooms[room.0].visible);
    ctx.place_door(at, room, door_visible);

    if let Some(first) = corridor.first_door {
        ctx.doors[first.0].visible.extend_from(&corridor.visible);
    }
    outcome
}

/// The walk hit another corridor's path: join the two origin rooms and share
/// what each side can see
fn merge_corridors(
    ctx: &mut GenContext,
    corridor: &mut Corridor,
    other: CorridorId,
) -> CarveOutcome {
    let room = ctx.corridors[other.0].origin;
    let outcome = join(ctx, corridor.origin, room);

    if let Some(first) = corridor.first_door {
        let door = &mut ctx.doors[first.0].visible;
        door.extend_from(&corridor.visible);
        door.extend_from(&ctx.corridors[other.0].visible);
    }
    ctx.corridors[other.0].visible.extend_from(&corridor.visible);
    outcome
}
