//! Integration module connecting frames and blob detectors with zone tracking.
//!
//! This module provides the blob detector seam, the zone extraction that feeds
//! it, and the two-zone counting pipeline built on top.

mod blob;
mod builder;
mod detector;
mod overlay;
mod pipeline;
mod zone;

pub use blob::{BlobParams, SimpleBlobDetector};
pub use builder::ZoneSettingsBuilder;
pub use detector::BlobDetector;
pub use overlay::{draw_annotations, draw_zone};
pub use pipeline::{Annotations, CountingPipeline, FrameReport, Trail, ZoneAnnotation, ZonePipeline};
pub use zone::ZoneDetector;
