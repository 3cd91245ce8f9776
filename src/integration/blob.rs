//! Connected-component blob detector with shape filters.

use std::collections::BTreeMap;
use std::convert::Infallible;

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::geometry::convex_hull;
use imageproc::point::Point;
use imageproc::region_labelling::{Connectivity, connected_components};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use super::BlobDetector;

/// Blob filtering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobParams {
    /// Smallest accepted blob, in pixels (inclusive)
    pub min_area: u32,
    /// Largest accepted blob, in pixels (exclusive)
    pub max_area: u32,
    /// Minimum ratio of blob area to its convex hull area
    pub min_convexity: Option<f32>,
    /// Minimum ratio of the smaller to the larger principal moment of inertia
    pub min_inertia_ratio: Option<f32>,
    /// Gray level of blob pixels in the binarized region
    pub blob_color: u8,
}

impl Default for BlobParams {
    fn default() -> Self {
        Self {
            min_area: 500,
            max_area: 2000,
            min_convexity: Some(0.5),
            min_inertia_ratio: Some(0.01),
            blob_color: 0,
        }
    }
}

/// Detects blobs as 8-connected regions of `blob_color` pixels.
#[derive(Debug, Clone, Default)]
pub struct SimpleBlobDetector {
    params: BlobParams,
}

impl SimpleBlobDetector {
    pub fn new(params: BlobParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BlobParams {
        &self.params
    }

    fn accepts(&self, blob: &BlobStats) -> bool {
        let params = &self.params;
        if blob.area < u64::from(params.min_area) || blob.area >= u64::from(params.max_area) {
            return false;
        }
        if let Some(min) = params.min_convexity {
            if blob.convexity() < f64::from(min) {
                return false;
            }
        }
        if let Some(min) = params.min_inertia_ratio {
            if blob.inertia_ratio() < f64::from(min) {
                return false;
            }
        }
        true
    }
}

impl BlobDetector for SimpleBlobDetector {
    type Error = Infallible;

    fn detect(&mut self, region: &GrayImage) -> Result<Vec<Point2<f32>>, Self::Error> {
        let color = self.params.blob_color;
        let foreground: GrayImage = ImageBuffer::from_fn(region.width(), region.height(), |x, y| {
            if region.get_pixel(x, y)[0] == color {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        let labels = connected_components(&foreground, Connectivity::Eight, Luma([0u8]));

        let mut blobs: BTreeMap<u32, BlobStats> = BTreeMap::new();
        for (x, y, label) in labels.enumerate_pixels() {
            let label = label[0];
            if label != 0 {
                blobs.entry(label).or_default().add(x, y);
            }
        }

        Ok(blobs
            .values()
            .filter(|blob| self.accepts(blob))
            .map(BlobStats::centroid)
            .collect())
    }
}

/// Running sums over the pixels of one component.
#[derive(Debug, Default)]
struct BlobStats {
    area: u64,
    sum_x: f64,
    sum_y: f64,
    sum_xx: f64,
    sum_yy: f64,
    sum_xy: f64,
    /// Leftmost and rightmost column per row
    rows: BTreeMap<u32, (u32, u32)>,
}

impl BlobStats {
    fn add(&mut self, x: u32, y: u32) {
        let (fx, fy) = (f64::from(x), f64::from(y));
        self.area += 1;
        self.sum_x += fx;
        self.sum_y += fy;
        self.sum_xx += fx * fx;
        self.sum_yy += fy * fy;
        self.sum_xy += fx * fy;

        let span = self.rows.entry(y).or_insert((x, x));
        span.0 = span.0.min(x);
        span.1 = span.1.max(x);
    }

    fn centroid(&self) -> Point2<f32> {
        let n = self.area as f64;
        Point2::new((self.sum_x / n) as f32, (self.sum_y / n) as f32)
    }

    /// Smaller over larger eigenvalue of the second central moments.
    fn inertia_ratio(&self) -> f64 {
        let n = self.area as f64;
        let (cx, cy) = (self.sum_x / n, self.sum_y / n);
        let mu20 = self.sum_xx / n - cx * cx;
        let mu02 = self.sum_yy / n - cy * cy;
        let mu11 = self.sum_xy / n - cx * cy;

        let denom = ((mu20 - mu02).powi(2) + 4.0 * mu11 * mu11).sqrt();
        if denom <= 1e-2 {
            return 1.0;
        }
        let imin = 0.5 * (mu20 + mu02) - 0.5 * denom;
        let imax = 0.5 * (mu20 + mu02) + 0.5 * denom;
        if imax <= 0.0 { 0.0 } else { imin / imax }
    }

    /// Pixel area over the area of the convex hull of the pixel squares.
    fn convexity(&self) -> f64 {
        let mut outline: Vec<Point<i64>> = self
            .rows
            .iter()
            .flat_map(|(&y, &(x0, x1))| {
                let (y, x0, x1) = (i64::from(y), i64::from(x0), i64::from(x1) + 1);
                [
                    Point::new(x0, y),
                    Point::new(x0, y + 1),
                    Point::new(x1, y),
                    Point::new(x1, y + 1),
                ]
            })
            .collect();
        outline.sort_by_key(|p| (p.x, p.y));
        outline.dedup();

        let hull = convex_hull(outline);
        let hull_area = polygon_area(&hull);
        if hull_area <= 0.0 {
            return 1.0;
        }
        (self.area as f64 / hull_area).min(1.0)
    }
}

/// Shoelace area of a simple polygon.
fn polygon_area(points: &[Point<i64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice.abs() as f64 / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
    use imageproc::rect::Rect as PixelRect;

    fn white(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([255u8]))
    }

    fn detect(params: BlobParams, image: &GrayImage) -> Vec<Point2<f32>> {
        let mut detector = SimpleBlobDetector::new(params);
        match detector.detect(image) {
            Ok(points) => points,
            Err(never) => match never {},
        }
    }

    #[test]
    fn test_single_square() {
        let mut image = white(100, 100);
        draw_filled_rect_mut(&mut image, PixelRect::at(10, 20).of_size(30, 30), Luma([0u8]));

        let points = detect(BlobParams::default(), &image);
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 24.5).abs() < 1e-4);
        assert!((points[0].y - 34.5).abs() < 1e-4);
    }

    #[test]
    fn test_area_filter() {
        let mut image = white(200, 100);
        // 10x10 = 100 px, too small
        draw_filled_rect_mut(&mut image, PixelRect::at(5, 5).of_size(10, 10), Luma([0u8]));
        // 30x30 = 900 px, accepted
        draw_filled_rect_mut(&mut image, PixelRect::at(40, 5).of_size(30, 30), Luma([0u8]));
        // 50x50 = 2500 px, too large
        draw_filled_rect_mut(&mut image, PixelRect::at(100, 5).of_size(50, 50), Luma([0u8]));

        let points = detect(BlobParams::default(), &image);
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 54.5).abs() < 1e-4);
    }

    #[test]
    fn test_blob_color() {
        let mut image = GrayImage::new(100, 100);
        draw_filled_circle_mut(&mut image, (50, 50), 15, Luma([255u8]));

        assert!(detect(BlobParams::default(), &image).is_empty());

        let bright = BlobParams {
            blob_color: 255,
            ..BlobParams::default()
        };
        let points = detect(bright, &image);
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 50.0).abs() < 0.5);
        assert!((points[0].y - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_inertia_rejects_thin_line() {
        let mut image = white(700, 20);
        // 600x1 line: area in range, inertia ratio ~0
        draw_filled_rect_mut(&mut image, PixelRect::at(10, 10).of_size(600, 1), Luma([0u8]));

        let loose = BlobParams {
            max_area: 5000,
            min_inertia_ratio: None,
            ..BlobParams::default()
        };
        assert_eq!(detect(loose.clone(), &image).len(), 1);

        let strict = BlobParams {
            min_inertia_ratio: Some(0.01),
            ..loose
        };
        assert!(detect(strict, &image).is_empty());
    }

    #[test]
    fn test_convexity_rejects_l_shape() {
        let mut image = white(200, 200);
        // Thin L: two 100x6 bars joined at a corner, 1164 px in a ~5600 px hull.
        draw_filled_rect_mut(&mut image, PixelRect::at(20, 20).of_size(6, 100), Luma([0u8]));
        draw_filled_rect_mut(&mut image, PixelRect::at(20, 114).of_size(100, 6), Luma([0u8]));

        let no_convexity = BlobParams {
            min_convexity: None,
            min_inertia_ratio: None,
            ..BlobParams::default()
        };
        assert_eq!(detect(no_convexity.clone(), &image).len(), 1);

        let convex_only = BlobParams {
            min_convexity: Some(0.5),
            ..no_convexity
        };
        assert!(detect(convex_only, &image).is_empty());
    }

    #[test]
    fn test_square_is_fully_convex() {
        let mut stats = BlobStats::default();
        for y in 0..10 {
            for x in 0..10 {
                stats.add(x, y);
            }
        }
        assert!((stats.convexity() - 1.0).abs() < 1e-9);
        assert!((stats.inertia_ratio() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_area() {
        let square = [
            Point::new(0i64, 0),
            Point::new(4, 0),
            Point::new(4, 3),
            Point::new(0, 3),
        ];
        assert_eq!(polygon_area(&square), 12.0);
        assert_eq!(polygon_area(&square[..2]), 0.0);
    }
}
