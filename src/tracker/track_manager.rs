//! Per-zone track manager: aging, association, counting and pruning.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::tracker::counter::{Counter, ZoneKind};
use crate::tracker::crossing::CountingLine;
use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::rect::Rect;
use crate::tracker::track::{Point, Track};

/// Frames a track may go unmatched before it is dropped.
pub const MAX_TRACK_FRAMES: u32 = 5;

/// Tracking configuration for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Observation rectangle before rotation
    pub roi: Rect,
    /// Rotation of the observation rectangle about its center, in degrees
    pub rotation_deg: f64,
    /// Detections strictly closer than this (pixels) may join a track
    pub match_distance: f32,
    /// Tracks with this many consecutive misses are pruned
    pub max_track_frames: u32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            roi: Rect::new(350, 125, 200, 200),
            rotation_deg: 0.0,
            match_distance: 30.0,
            max_track_frames: MAX_TRACK_FRAMES,
        }
    }
}

/// What one call to [`TrackManager::update`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameUpdate {
    pub matched: usize,
    pub created: usize,
    pub pruned: usize,
    /// Increments added to the zone counter this frame
    pub counted: u64,
}

pub struct TrackManager {
    kind: ZoneKind,
    tracks: Vec<Track>,
    line: CountingLine,
    config: ZoneConfig,
    counter: Counter,
    frame_id: u64,
}

impl TrackManager {
    pub fn new(kind: ZoneKind, config: ZoneConfig) -> Self {
        Self {
            kind,
            tracks: Vec::new(),
            line: CountingLine::new(config.roi, config.rotation_deg),
            config,
            counter: Counter::new(),
            frame_id: 0,
        }
    }

    /// Feed one frame of detections, in frame coordinates.
    pub fn update(&mut self, detections: &[Point]) -> FrameUpdate {
        self.frame_id += 1;
        let mut summary = FrameUpdate::default();

        // Step 1: Age every track
        for track in self.tracks.iter_mut() {
            track.mark_missed();
        }

        // Step 2: Associate detections with existing tracks
        //
        // Tracks created below start out found, so they can never take a
        // detection in the frame they were born. Matching against the tracks
        // present at the start of the frame is therefore the full search.
        let last_positions: Vec<Point> = self.tracks.iter().map(Track::last_position).collect();
        let dists = matching::euclidean_distance(&last_positions, detections);

        let AssignmentResult {
            matches,
            unmatched_detections,
            ..
        } = matching::first_fit_assignment(&dists, self.config.match_distance);

        for (itrack, idet) in matches {
            let point = detections[idet];
            let side = self.line.classify(point);
            if self.tracks[itrack].observe(point, side) {
                self.record_count(point);
                summary.counted += 1;
            }
            summary.matched += 1;
        }

        // Step 3: Start tracks for the leftovers
        for idet in unmatched_detections {
            let point = detections[idet];
            let side = self.line.classify(point);
            let track = Track::new(point, side);
            debug!(zone = %self.kind, x = point.x, y = point.y, ?side, "track created");
            if track.is_counted() {
                self.record_count(point);
                summary.counted += 1;
            }
            self.tracks.push(track);
            summary.created += 1;
        }

        // Step 4: Drop tracks that have gone stale
        let before = self.tracks.len();
        let max_age = self.config.max_track_frames;
        self.tracks.retain(|t| t.age < max_age);
        summary.pruned = before - self.tracks.len();
        if summary.pruned > 0 {
            debug!(zone = %self.kind, pruned = summary.pruned, "tracks pruned");
        }

        trace!(
            zone = %self.kind,
            frame = self.frame_id,
            detections = detections.len(),
            active = self.tracks.len(),
            ?summary,
            "frame processed"
        );
        summary
    }

    fn record_count(&mut self, point: Point) {
        let total = self.counter.increment();
        info!(zone = %self.kind, total, x = point.x, y = point.y, "object counted");
    }

    /// Forget all tracks and zero the counter for a new run.
    pub fn reset(&mut self) {
        self.tracks.clear();
        self.counter = Counter::new();
        self.frame_id = 0;
    }

    pub fn count(&self) -> u64 {
        self.counter.get()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    pub fn line(&self) -> &CountingLine {
        &self.line
    }

    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }
}
