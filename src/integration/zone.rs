//! Zone detector: turns a full frame into zone detections in frame coordinates.

use image::{GrayImage, Luma, Rgb, RgbImage, imageops};
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point as PixelPoint;

use crate::config::ZoneSettings;
use crate::tracker::{Point, Rect, to_pixel};

use super::{BlobDetector, SimpleBlobDetector};

/// Extracts one zone from each frame and runs a [`BlobDetector`] on it.
///
/// The crop is always the zone's unrotated rectangle. When the zone is
/// rotated, pixels of the crop that fall outside the rotated outline are
/// overwritten with `mask_fill` before binarization.
pub struct ZoneDetector<D: BlobDetector> {
    roi: Rect,
    angle_deg: f64,
    binarize_threshold: u8,
    mask_fill: u8,
    detector: D,
}

impl ZoneDetector<SimpleBlobDetector> {
    pub fn from_settings(settings: &ZoneSettings) -> Self {
        Self::new(
            settings.tracking.roi,
            settings.tracking.rotation_deg,
            settings.binarize_threshold,
            settings.mask_fill,
            SimpleBlobDetector::new(settings.blob.clone()),
        )
    }
}

impl<D: BlobDetector> ZoneDetector<D> {
    pub fn new(roi: Rect, angle_deg: f64, binarize_threshold: u8, mask_fill: u8, detector: D) -> Self {
        Self {
            roi,
            angle_deg,
            binarize_threshold,
            mask_fill,
            detector,
        }
    }

    /// Detect blobs in this zone of `frame`.
    ///
    /// A zone that is degenerate or lies entirely outside the frame yields
    /// no detections.
    pub fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Point>, D::Error> {
        let Some(crop) = self.roi.clip_to_frame(frame.width(), frame.height()) else {
            return Ok(Vec::new());
        };

        let mut region = imageops::crop_imm(
            frame,
            crop.x as u32,
            crop.y as u32,
            crop.width as u32,
            crop.height as u32,
        )
        .to_image();

        if self.angle_deg != 0.0 {
            let mask = self.mask(&crop);
            let fill = Rgb([self.mask_fill; 3]);
            for (pixel, inside) in region.pixels_mut().zip(mask.pixels()) {
                if inside[0] == 0 {
                    *pixel = fill;
                }
            }
        }

        let gray = imageops::grayscale(&region);
        let binary = threshold(&gray, self.binarize_threshold, ThresholdType::Binary);

        let keypoints = self.detector.detect(&binary)?;
        Ok(keypoints
            .into_iter()
            .map(|kp| Point::new(kp.x as i32 + crop.x, kp.y as i32 + crop.y))
            .collect())
    }

    /// Rotated zone outline in frame coordinates.
    pub fn outline(&self) -> [Point; 4] {
        self.roi.rotated_corners(self.angle_deg).map(to_pixel)
    }

    pub fn roi(&self) -> Rect {
        self.roi
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// White where the rotated outline covers the crop, black elsewhere.
    fn mask(&self, crop: &Rect) -> GrayImage {
        let mut mask = GrayImage::new(crop.width as u32, crop.height as u32);

        let mut polygon: Vec<PixelPoint<i32>> = self
            .outline()
            .iter()
            .map(|p| PixelPoint::new(p.x.saturating_sub(crop.x), p.y.saturating_sub(crop.y)))
            .collect();
        polygon.dedup();
        while polygon.len() > 1 && polygon.first() == polygon.last() {
            polygon.pop();
        }

        if polygon.len() >= 3 {
            draw_polygon_mut(&mut mask, &polygon, Luma([255u8]));
        }
        mask
    }
}
