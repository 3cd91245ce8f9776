//! Trait for blob detection backends.

use image::GrayImage;
use nalgebra::Point2;

/// Trait for blob detection backends.
///
/// Implement this trait to plug any keypoint detector into a counting zone.
///
/// # Example
///
/// ```ignore
/// use conveyor_count::integration::BlobDetector;
/// use image::GrayImage;
/// use nalgebra::Point2;
///
/// struct MyDetector;
///
/// impl BlobDetector for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, region: &GrayImage) -> Result<Vec<Point2<f32>>, Self::Error> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait BlobDetector {
    /// Error type for detection failures.
    type Error;

    /// Find blob centroids in a binarized zone region.
    ///
    /// # Arguments
    /// * `region` - Binary image (0 or 255) cropped to the zone's bounding box
    ///
    /// # Returns
    /// Centroids in region-local pixel coordinates, in no particular order.
    fn detect(&mut self, region: &GrayImage) -> Result<Vec<Point2<f32>>, Self::Error>;
}
