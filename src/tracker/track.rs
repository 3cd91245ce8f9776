//! Single object track for one counting zone.

use nalgebra::Point2;

use crate::tracker::line_side::LineSide;

/// Detection centroid in frame pixel coordinates.
pub type Point = Point2<i32>;

/// One physical object followed across frames within a zone.
///
/// Tracks carry no identifier; they are owned by exactly one
/// [`TrackManager`](crate::tracker::TrackManager) and addressed by position
/// in its list.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Observed positions, oldest first. Never empty.
    positions: Vec<Point>,
    /// Side of the counting line at the last observation
    pub(crate) state: LineSide,
    /// Whether this track has already contributed to the zone count
    pub(crate) counted: bool,
    /// Whether a detection was associated in the current frame
    pub(crate) found: bool,
    /// Frames since the last association
    pub(crate) age: u32,
}

impl Track {
    /// Start a track at its first observation.
    ///
    /// A track first seen already below the line is born counted, since it
    /// will never be observed making the crossing.
    pub(crate) fn new(point: Point, side: LineSide) -> Self {
        Self {
            positions: vec![point],
            state: side,
            counted: side == LineSide::Below,
            found: true,
            age: 0,
        }
    }

    /// Most recent observation.
    pub fn last_position(&self) -> Point {
        // `positions` is created non-empty and only ever appended to.
        self.positions[self.positions.len() - 1]
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn state(&self) -> LineSide {
        self.state
    }

    pub fn is_counted(&self) -> bool {
        self.counted
    }

    pub fn is_found(&self) -> bool {
        self.found
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Start of a frame: nothing associated yet.
    pub(crate) fn mark_missed(&mut self) {
        self.found = false;
        self.age += 1;
    }

    /// Record an associated observation and report whether it completes the
    /// track's one countable crossing (above to below, not yet counted).
    pub(crate) fn observe(&mut self, point: Point, side: LineSide) -> bool {
        self.positions.push(point);
        self.found = true;
        self.age = 0;

        let crossed =
            self.state == LineSide::Above && side == LineSide::Below && !self.counted;
        if crossed {
            self.counted = true;
        }
        self.state = side;
        crossed
    }
}
