//! Planar rotation about a pivot, shared by zone corners and detections.
//!
//! Frame coordinates have the y axis pointing down. A positive angle turns
//! counter-clockwise as seen on screen, the same direction image libraries
//! use for rotation matrices, so a zone outline and the points mapped back
//! through it always agree.

use nalgebra::{Point2, Rotation2};

/// Rotate `point` about `pivot` by `angle_deg` degrees.
#[inline]
pub fn rotate(point: Point2<f64>, pivot: Point2<f64>, angle_deg: f64) -> Point2<f64> {
    // Negated because the y axis is flipped relative to the maths convention.
    let rotation = Rotation2::new(-angle_deg.to_radians());
    pivot + rotation * (point - pivot)
}

/// Round a rotated point to the nearest pixel.
#[inline]
pub fn to_pixel(point: Point2<f64>) -> Point2<i32> {
    Point2::new(point.x.round() as i32, point.y.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point2<f64>, b: Point2<f64>) {
        assert!((a - b).norm() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let p = Point2::new(12.5, -3.0);
        assert_close(rotate(p, Point2::new(100.0, 100.0), 0.0), p);
    }

    #[test]
    fn test_quarter_turn_is_counter_clockwise_on_screen() {
        // A point to the right of the pivot ends up above it (smaller y).
        let pivot = Point2::new(100.0, 100.0);
        let rotated = rotate(Point2::new(110.0, 100.0), pivot, 90.0);
        assert_close(rotated, Point2::new(100.0, 90.0));
    }

    #[test]
    fn test_round_trip() {
        let pivots = [Point2::new(0.0, 0.0), Point2::new(450.0, 225.0), Point2::new(-7.5, 3.25)];
        let points = [Point2::new(1.0, 2.0), Point2::new(460.0, 190.0), Point2::new(-300.0, 800.0)];
        let angles = [-179.0, -45.0, -0.5, 0.0, 7.0, 33.3, 90.0, 270.0, 725.0];

        for &c in &pivots {
            for &p in &points {
                for &theta in &angles {
                    let back = rotate(rotate(p, c, theta), c, -theta);
                    assert!((back - p).norm() < 1e-6, "{p:?} about {c:?} by {theta}");
                }
            }
        }
    }

    #[test]
    fn test_pivot_is_fixed() {
        let pivot = Point2::new(3.0, 4.0);
        assert_close(rotate(pivot, pivot, 123.0), pivot);
    }

    #[test]
    fn test_to_pixel_rounds() {
        assert_eq!(to_pixel(Point2::new(1.49, 2.5)), Point2::new(1, 3));
        assert_eq!(to_pixel(Point2::new(-1.6, 0.4)), Point2::new(-2, 0));
    }
}
