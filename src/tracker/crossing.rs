//! Counting line for one zone and the side classification it drives.

use nalgebra::Point2;

use crate::tracker::line_side::LineSide;
use crate::tracker::rect::Rect;
use crate::tracker::rotation::{rotate, to_pixel};
use crate::tracker::track::Point;

/// Horizontal midline of a zone, evaluated in the zone's unrotated frame.
///
/// Detections arrive in frame coordinates. For a rotated zone each point is
/// first turned back by the zone angle around the zone center, so the
/// comparison is always against the fixed midline `y = center.y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountingLine {
    roi: Rect,
    center: Point2<f64>,
    angle_deg: f64,
}

impl CountingLine {
    pub fn new(roi: Rect, angle_deg: f64) -> Self {
        Self {
            roi,
            center: roi.center(),
            angle_deg,
        }
    }

    /// Side of the line `point` falls on. Points exactly on the line are `Above`.
    pub fn classify(&self, point: Point) -> LineSide {
        let canonical = if self.angle_deg == 0.0 {
            point.cast::<f64>()
        } else {
            rotate(point.cast::<f64>(), self.center, -self.angle_deg)
        };

        if canonical.y > self.center.y {
            LineSide::Below
        } else {
            LineSide::Above
        }
    }

    /// Endpoints of the line in frame coordinates, for drawing.
    pub fn endpoints(&self) -> [Point; 2] {
        let [x1, _, x2, _] = self.roi.to_tlbr();
        [x1, x2].map(|x| {
            let end = Point2::new(f64::from(x), self.center.y);
            to_pixel(rotate(end, self.center, self.angle_deg))
        })
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    pub fn center(&self) -> Point2<f64> {
        self.center
    }
}
