//! Counting pipeline combining zone detection with tracking.

use image::RgbImage;
use serde::Serialize;
use tracing::warn;

use crate::config::{CounterConfig, ZoneSettings};
use crate::error::PipelineError;
use crate::tracker::{Counts, FrameUpdate, Point, Rect, TrackManager, ZoneKind};

use super::{BlobDetector, SimpleBlobDetector, ZoneDetector};

/// A counting zone: its detector and the tracker that owns its tracks and count.
pub struct ZonePipeline<D: BlobDetector> {
    detector: ZoneDetector<D>,
    tracker: TrackManager,
}

impl ZonePipeline<SimpleBlobDetector> {
    pub fn from_settings(kind: ZoneKind, settings: &ZoneSettings) -> Self {
        Self::new(
            ZoneDetector::from_settings(settings),
            TrackManager::new(kind, settings.tracking.clone()),
        )
    }
}

impl<D: BlobDetector> ZonePipeline<D> {
    pub fn new(detector: ZoneDetector<D>, tracker: TrackManager) -> Self {
        Self { detector, tracker }
    }

    /// Detect, associate and count one frame for this zone.
    pub fn process_frame(&mut self, frame: &RgbImage) -> Result<ZoneAnnotation, D::Error> {
        let detections = self.detector.detect(frame)?;
        let update = self.tracker.update(&detections);
        Ok(self.annotate(detections, update))
    }

    fn annotate(&self, detections: Vec<Point>, update: FrameUpdate) -> ZoneAnnotation {
        ZoneAnnotation {
            zone: self.tracker.kind(),
            outline: self.detector.outline(),
            crop: self.detector.roi(),
            counting_line: self.tracker.line().endpoints(),
            detections,
            trails: self
                .tracker
                .tracks()
                .iter()
                .map(|t| Trail {
                    points: t.positions().to_vec(),
                    counted: t.is_counted(),
                })
                .collect(),
            count: self.tracker.count(),
            newly_counted: update.counted,
        }
    }

    pub fn count(&self) -> u64 {
        self.tracker.count()
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    pub fn tracker(&self) -> &TrackManager {
        &self.tracker
    }

    pub fn detector(&self) -> &ZoneDetector<D> {
        &self.detector
    }
}

/// Past positions of one live track, for drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trail {
    pub points: Vec<Point>,
    pub counted: bool,
}

/// Drawable geometry for one zone after a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneAnnotation {
    pub zone: ZoneKind,
    /// Rotated zone outline, clockwise from the top-left corner
    pub outline: [Point; 4],
    /// Axis-aligned crop handed to the blob detector
    pub crop: Rect,
    pub counting_line: [Point; 2],
    pub detections: Vec<Point>,
    pub trails: Vec<Trail>,
    pub count: u64,
    /// Objects counted during this frame
    pub newly_counted: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotations {
    pub conveyor: ZoneAnnotation,
    pub pallet: ZoneAnnotation,
}

/// Result of [`CountingPipeline::process_frame`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub counts: Counts,
    pub annotations: Annotations,
}

/// Box and pallet zones run side by side over the same frames.
///
/// The two zones share nothing; each owns its tracks and its counter.
pub struct CountingPipeline<D: BlobDetector> {
    conveyor: ZonePipeline<D>,
    pallet: ZonePipeline<D>,
    frames: u64,
}

impl CountingPipeline<SimpleBlobDetector> {
    /// Create a pipeline from a run configuration.
    pub fn from_config(config: &CounterConfig) -> Self {
        Self::new(
            ZonePipeline::from_settings(ZoneKind::Conveyor, &config.conveyor),
            ZonePipeline::from_settings(ZoneKind::Pallet, &config.pallet),
        )
    }
}

impl<D: BlobDetector> CountingPipeline<D> {
    pub fn new(conveyor: ZonePipeline<D>, pallet: ZonePipeline<D>) -> Self {
        Self {
            conveyor,
            pallet,
            frames: 0,
        }
    }

    /// Process a single decoded frame through both zones.
    ///
    /// Both zones always run, so a failing detector in one zone never stalls
    /// tracking or counting in the other.
    ///
    /// # Returns
    /// Current counts and the geometry to draw, or the first zone detector error.
    pub fn process_frame(
        &mut self,
        frame: &RgbImage,
    ) -> Result<FrameReport, PipelineError<D::Error>> {
        self.frames += 1;

        let conveyor = self.conveyor.process_frame(frame);
        let pallet = self.pallet.process_frame(frame);

        let conveyor = conveyor.map_err(|source| {
            warn!(zone = %ZoneKind::Conveyor, frame = self.frames, "zone detector failed");
            PipelineError {
                zone: ZoneKind::Conveyor,
                source,
            }
        });
        let pallet = pallet.map_err(|source| {
            warn!(zone = %ZoneKind::Pallet, frame = self.frames, "zone detector failed");
            PipelineError {
                zone: ZoneKind::Pallet,
                source,
            }
        });
        let (conveyor, pallet) = (conveyor?, pallet?);

        Ok(FrameReport {
            counts: self.counts(),
            annotations: Annotations { conveyor, pallet },
        })
    }

    pub fn counts(&self) -> Counts {
        Counts {
            boxes: self.conveyor.count(),
            pallets: self.pallet.count(),
        }
    }

    /// Start a new run: all tracks dropped, counters back to zero.
    pub fn reset(&mut self) {
        self.conveyor.reset();
        self.pallet.reset();
        self.frames = 0;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn zone(&self, kind: ZoneKind) -> &ZonePipeline<D> {
        match kind {
            ZoneKind::Conveyor => &self.conveyor,
            ZoneKind::Pallet => &self.pallet,
        }
    }
}
