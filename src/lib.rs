//! Counting boxes and pallets as they cross a line on a camera-observed conveyor.
//!
//! Each zone turns per-frame blob centroids into tracks with a greedy
//! nearest-available match, and counts a track once when it moves from above
//! to below the zone's midline. Rotated zones are evaluated in their own
//! unrotated frame.

pub mod config;
pub mod error;
pub mod integration;
pub mod tracker;

pub use config::{CounterConfig, ZoneSettings};
pub use error::{ConfigError, PipelineError};
pub use integration::{
    BlobDetector, BlobParams, CountingPipeline, FrameReport, SimpleBlobDetector, ZoneDetector,
};
pub use tracker::{Counts, LineSide, Point, Rect, TrackManager, ZoneConfig, ZoneKind};
