//! Per-feature visibility lists
//!
//! A visibility list holds the points a consumer should disclose once the
//! owning feature is discovered. Lists are append-only and merges are plain
//! concatenation, so the same point can appear more than once; revealing is
//! idempotent for the consumer. Use [`Visibility::unique_points`] when an
//! exactly-once view is needed.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::room::RoomId;
use super::tile::Point;

/// Append-only list of points disclosed together
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Visibility(Vec<Point>);

impl Visibility {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, p: Point) {
        self.0.push(p);
    }

    /// Concatenate another list onto this one
    pub fn extend_from(&mut self, other: &Visibility) {
        self.0.extend_from_slice(&other.0);
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.0.contains(&p)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.0.iter()
    }

    /// Sorted, de-duplicated copy of the points
    pub fn unique_points(&self) -> Vec<Point> {
        let mut pts = self.0.clone();
        pts.sort_unstable();
        pts.dedup();
        pts
    }
}

impl FromIterator<Point> for Visibility {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Door identifier (index into the dungeon's door list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoorId(pub usize);

impl fmt::Display for DoorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A door placed where a corridor crosses a room boundary
///
/// Doors carry the visibility of both features they join and never own a
/// connectivity set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub id: DoorId,
    pub point: Point,
    /// Room the door was attributed to when placed
    pub room: RoomId,
    pub visible: Visibility,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_keeps_duplicates() {
        let mut a: Visibility = [Point::new(1, 1), Point::new(2, 1)].into_iter().collect();
        let b: Visibility = [Point::new(2, 1), Point::new(3, 1)].into_iter().collect();
        a.extend_from(&b);
        assert_eq!(a.len(), 4);
        assert_eq!(a.unique_points().len(), 3);
    }

    #[test]
    fn test_unique_points_sorted() {
        let v: Visibility = [Point::new(5, 0), Point::new(1, 2), Point::new(5, 0)]
            .into_iter()
            .collect();
        assert_eq!(v.unique_points(), vec![Point::new(1, 2), Point::new(5, 0)]);
    }

    #[test]
    fn test_serializes_as_list() {
        let v: Visibility = [Point::new(1, 2)].into_iter().collect();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"[{"col":1,"row":2}]"#);
    }
}
