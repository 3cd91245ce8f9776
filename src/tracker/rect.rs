use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::tracker::rotation::rotate;

/// Axis-aligned zone rectangle in frame pixel coordinates.
///
/// Supports the two forms the zone pipeline needs:
/// - TLWH: Top-Left X, Top-Left Y, Width, Height (the stored form)
/// - TLBR: Top-Left X, Top-Left Y, Bottom-Right X, Bottom-Right Y (exclusive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: i32,
    /// Top-left y coordinate
    pub y: i32,
    /// Width of the zone
    pub width: i32,
    /// Height of the zone
    pub height: i32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    ///
    /// The far edge saturates at `i32::MAX` for zones reaching past the pixel range.
    #[inline]
    pub fn to_tlbr(&self) -> [i32; 4] {
        [
            self.x,
            self.y,
            self.x.saturating_add(self.width),
            self.y.saturating_add(self.height),
        ]
    }

    /// True when the rectangle covers no pixels.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Get the center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Corners in drawing order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point2<f64>; 4] {
        let [x1, y1, x2, y2] = self.to_tlbr().map(f64::from);
        [
            Point2::new(x1, y1),
            Point2::new(x2, y1),
            Point2::new(x2, y2),
            Point2::new(x1, y2),
        ]
    }

    /// Corners rotated by `angle_deg` around the rectangle's center.
    pub fn rotated_corners(&self, angle_deg: f64) -> [Point2<f64>; 4] {
        let center = self.center();
        self.corners().map(|corner| rotate(corner, center, angle_deg))
    }

    /// Intersection with a `width` x `height` frame, or `None` when nothing
    /// of the rectangle is visible.
    pub fn clip_to_frame(&self, width: u32, height: u32) -> Option<Rect> {
        if self.is_degenerate() {
            return None;
        }
        let [x1, y1, x2, y2] = self.to_tlbr();
        let frame_w = i32::try_from(width).unwrap_or(i32::MAX);
        let frame_h = i32::try_from(height).unwrap_or(i32::MAX);

        let clipped = Rect::from_tlbr(x1.max(0), y1.max(0), x2.min(frame_w), y2.min(frame_h));
        (!clipped.is_degenerate()).then_some(clipped)
    }
}
