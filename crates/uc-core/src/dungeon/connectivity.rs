//! Room connectivity tracking
//!
//! Rooms start in their own set. Connecting two rooms records an undirected
//! edge and, when they were in different sets, merges them. Sets are a
//! union-find (union by size, path compression); the edge lists are kept
//! separately because nearest-room selection needs direct adjacency.

use hashbrown::HashSet;
use log::debug;
use serde::{Deserialize, Serialize};

use super::room::RoomId;

/// Tracks which rooms are joined and how many distinct sets remain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectivityTracker {
    parent: Vec<usize>,
    size: Vec<usize>,
    /// Rooms directly joined to each room
    connected: Vec<Vec<RoomId>>,
    /// Number of distinct sets
    sets: usize,
}

impl ConnectivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new room in its own set
    pub fn add_room(&mut self) -> RoomId {
        let id = self.parent.len();
        self.parent.push(id);
        self.size.push(1);
        self.connected.push(Vec::new());
        self.sets += 1;
        debug!("set {} created, {} sets total", id, self.sets);
        RoomId(id)
    }

    /// Number of distinct connectivity sets
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Check if every room is in one set
    pub fn all_connected(&self) -> bool {
        self.sets <= 1
    }

    /// Representative set id of a room
    pub fn set_of(&self, room: RoomId) -> usize {
        let mut x = room.0;
        while self.parent[x] != x {
            x = self.parent[x];
        }
        x
    }

    fn find(&mut self, room: usize) -> usize {
        let mut root = room;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut x = room;
        while self.parent[x] != root {
            let next = self.parent[x];
            self.parent[x] = root;
            x = next;
        }
        root
    }

    /// Check if two rooms are in the same set
    pub fn same_set(&self, a: RoomId, b: RoomId) -> bool {
        self.set_of(a) == self.set_of(b)
    }

    /// Rooms directly joined to a room
    pub fn connected(&self, room: RoomId) -> &[RoomId] {
        &self.connected[room.0]
    }

    /// Check if two rooms share a direct edge
    pub fn is_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.connected[a.0].contains(&b)
    }

    /// Join two rooms
    ///
    /// Returns true if this merged two previously distinct sets. Joining a
    /// room to itself, or to a room it is already joined to, does nothing.
    pub fn connect(&mut self, a: RoomId, b: RoomId) -> bool {
        if a == b || self.is_connected(a, b) {
            return false;
        }

        let ra = self.find(a.0);
        let rb = self.find(b.0);
        let merged = ra != rb;
        if merged {
            let (big, small) = if self.size[ra] >= self.size[rb] {
                (ra, rb)
            } else {
                (rb, ra)
            };
            self.parent[small] = big;
            self.size[big] += self.size[small];
            self.sets -= 1;
            debug!("connected room {} to room {}, {} sets left", a, b, self.sets);
        }

        self.connected[a.0].push(b);
        self.connected[b.0].push(a);
        merged
    }

    /// All rooms reachable from a room over direct edges
    pub fn reachable_from(&self, start: RoomId) -> HashSet<RoomId> {
        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(room) = stack.pop() {
            if !visited.insert(room) {
                continue;
            }
            for &next in &self.connected[room.0] {
                if !visited.contains(&next) {
                    stack.push(next);
                }
            }
        }
        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_with(n: usize) -> ConnectivityTracker {
        let mut tracker = ConnectivityTracker::new();
        for _ in 0..n {
            tracker.add_room();
        }
        tracker
    }

    #[test]
    fn test_connectivity_tracker() {
        let mut tracker = tracker_with(5);
        assert_eq!(tracker.set_count(), 5);

        // Initially, no rooms are connected
        assert!(!tracker.same_set(RoomId(0), RoomId(1)));

        // Connect 0 and 1
        assert!(tracker.connect(RoomId(0), RoomId(1)));
        assert!(tracker.same_set(RoomId(0), RoomId(1)));
        assert!(!tracker.same_set(RoomId(0), RoomId(2)));

        // Connect 1 and 2 (should also connect 0 and 2)
        assert!(tracker.connect(RoomId(1), RoomId(2)));
        assert!(tracker.same_set(RoomId(0), RoomId(2)));
        assert!(!tracker.is_connected(RoomId(0), RoomId(2)));

        assert!(!tracker.all_connected());
        tracker.connect(RoomId(2), RoomId(3));
        tracker.connect(RoomId(3), RoomId(4));
        assert!(tracker.all_connected());
        assert_eq!(tracker.set_count(), 1);
    }

    #[test]
    fn test_connect_is_idempotent() {
        let mut tracker = tracker_with(2);
        assert!(tracker.connect(RoomId(0), RoomId(1)));
        assert!(!tracker.connect(RoomId(0), RoomId(1)));
        assert!(!tracker.connect(RoomId(1), RoomId(0)));
        assert_eq!(tracker.connected(RoomId(0)), &[RoomId(1)]);
        assert_eq!(tracker.connected(RoomId(1)), &[RoomId(0)]);
        assert_eq!(tracker.set_count(), 1);
    }

    #[test]
    fn test_self_connect_ignored() {
        let mut tracker = tracker_with(1);
        assert!(!tracker.connect(RoomId(0), RoomId(0)));
        assert!(tracker.connected(RoomId(0)).is_empty());
    }

    #[test]
    fn test_edge_within_set_does_not_decrement() {
        let mut tracker = tracker_with(3);
        tracker.connect(RoomId(0), RoomId(1));
        tracker.connect(RoomId(1), RoomId(2));
        assert_eq!(tracker.set_count(), 1);

        // Closing a cycle records the edge but merges nothing
        assert!(!tracker.connect(RoomId(2), RoomId(0)));
        assert_eq!(tracker.set_count(), 1);
        assert!(tracker.is_connected(RoomId(0), RoomId(2)));
    }

    #[test]
    fn test_reachable_with_cycles() {
        let mut tracker = tracker_with(6);
        tracker.connect(RoomId(0), RoomId(1));
        tracker.connect(RoomId(1), RoomId(2));
        tracker.connect(RoomId(2), RoomId(0));
        tracker.connect(RoomId(3), RoomId(4));

        let from0 = tracker.reachable_from(RoomId(0));
        assert_eq!(from0.len(), 3);
        assert!(from0.contains(&RoomId(2)));
        assert!(!from0.contains(&RoomId(3)));

        let from5 = tracker.reachable_from(RoomId(5));
        assert_eq!(from5.len(), 1);
    }

    #[test]
    fn test_set_ids_agree_after_merges() {
        let mut tracker = tracker_with(8);
        for i in 0..7 {
            tracker.connect(RoomId(i), RoomId(i + 1));
        }
        let set = tracker.set_of(RoomId(0));
        for i in 0..8 {
            assert_eq!(tracker.set_of(RoomId(i)), set);
        }
    }
}
