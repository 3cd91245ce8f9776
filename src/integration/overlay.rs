//! Draws zone annotations onto a frame.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_circle_mut, draw_line_segment_mut};

use crate::tracker::Point;

use super::{Annotations, ZoneAnnotation};

const ZONE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const LINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const DETECTION_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const TRAIL_COLOR: Rgb<u8> = Rgb([255, 200, 0]);
const COUNTED_TRAIL_COLOR: Rgb<u8> = Rgb([0, 160, 255]);

/// Draw both zones.
pub fn draw_annotations(frame: &mut RgbImage, annotations: &Annotations) {
    draw_zone(frame, &annotations.conveyor);
    draw_zone(frame, &annotations.pallet);
}

/// Outline, counting line, track trails and current detections of one zone.
pub fn draw_zone(frame: &mut RgbImage, zone: &ZoneAnnotation) {
    let outline = &zone.outline;
    for (i, &start) in outline.iter().enumerate() {
        let end = outline[(i + 1) % outline.len()];
        segment(frame, start, end, ZONE_COLOR);
    }

    let [a, b] = zone.counting_line;
    segment(frame, a, b, LINE_COLOR);

    for trail in &zone.trails {
        let color = if trail.counted {
            COUNTED_TRAIL_COLOR
        } else {
            TRAIL_COLOR
        };
        for pair in trail.points.windows(2) {
            segment(frame, pair[0], pair[1], color);
        }
    }

    for p in &zone.detections {
        draw_hollow_circle_mut(frame, (p.x, p.y), 6, DETECTION_COLOR);
        draw_cross_mut(frame, DETECTION_COLOR, p.x, p.y);
    }
}

fn segment(frame: &mut RgbImage, start: Point, end: Point, color: Rgb<u8>) {
    draw_line_segment_mut(
        frame,
        (start.x as f32, start.y as f32),
        (end.x as f32, end.y as f32),
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::Trail;
    use crate::tracker::{Rect, ZoneKind};

    fn annotation() -> ZoneAnnotation {
        ZoneAnnotation {
            zone: ZoneKind::Conveyor,
            outline: [
                Point::new(10, 10),
                Point::new(50, 10),
                Point::new(50, 50),
                Point::new(10, 50),
            ],
            crop: Rect::new(10, 10, 40, 40),
            counting_line: [Point::new(10, 30), Point::new(50, 30)],
            detections: vec![Point::new(30, 20)],
            trails: vec![Trail {
                points: vec![Point::new(20, 15), Point::new(20, 40)],
                counted: true,
            }],
            count: 1,
            newly_counted: 0,
        }
    }

    #[test]
    fn test_draw_zone_marks_geometry() {
        let mut frame = RgbImage::new(64, 64);
        draw_zone(&mut frame, &annotation());

        assert_eq!(*frame.get_pixel(30, 10), ZONE_COLOR);
        assert_eq!(*frame.get_pixel(40, 30), LINE_COLOR);
        assert_eq!(*frame.get_pixel(20, 25), COUNTED_TRAIL_COLOR);
        assert_eq!(*frame.get_pixel(30, 20), DETECTION_COLOR);
        assert_eq!(*frame.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_draw_off_frame_is_clipped() {
        let mut ann = annotation();
        ann.outline = [
            Point::new(-100, -100),
            Point::new(500, -100),
            Point::new(500, 500),
            Point::new(-100, 500),
        ];
        ann.detections = vec![Point::new(1000, 1000)];
        let mut frame = RgbImage::new(64, 64);
        draw_zone(&mut frame, &ann);
        assert_eq!(*frame.get_pixel(40, 30), LINE_COLOR);
    }
}
