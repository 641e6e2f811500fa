use std::f64::consts::{PI, TAU};

use super::{ArcPath, CurvePath, Point};

/// Angle 0 points at 3 o'clock and angles grow clockwise (SVG's y-down axis).
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Angular distance from `start` to `end` going clockwise; `end` is moved a
/// full turn forward when it does not lie past `start`.
pub fn clockwise_span(start: f64, end: f64) -> f64 {
    if end > start {
        end - start
    } else {
        TAU + end - start
    }
}

pub fn large_arc_flag(start: f64, end: f64) -> bool {
    clockwise_span(start, end) > PI
}

pub fn arc(center: Point, radius: f64, angle_start: f64, angle_end: f64) -> ArcPath {
    ArcPath {
        start: polar(center, radius, angle_start),
        end: polar(center, radius, angle_end),
        radius,
        large_arc: large_arc_flag(angle_start, angle_end),
        sweep: true,
    }
}

/// The control point is the circle's center, so every curve bows inward.
pub fn quadratic_curve(center: Point, radius: f64, angle_start: f64, angle_end: f64) -> CurvePath {
    CurvePath {
        start: polar(center, radius, angle_start),
        control: center,
        end: polar(center, radius, angle_end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;
    const CENTER: Point = Point::new(250.0, 250.0);

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn polar_uses_y_down_convention() {
        assert!(close(polar(CENTER, 100.0, 0.0), Point::new(350.0, 250.0)));
        assert!(close(polar(CENTER, 100.0, PI / 2.0), Point::new(250.0, 350.0)));
        assert!(close(polar(CENTER, 100.0, PI), Point::new(150.0, 250.0)));
    }

    #[test]
    fn large_arc_flag_for_quarter_half_and_three_quarter_turns() {
        assert!(!arc(CENTER, 10.0, 0.0, PI / 2.0).large_arc);
        assert!(!arc(CENTER, 10.0, 0.0, PI).large_arc);
        assert!(arc(CENTER, 10.0, 0.0, 3.0 * PI / 2.0).large_arc);
    }

    #[test]
    fn large_arc_flag_wraps_around() {
        // 350 degrees to 10 degrees clockwise is a short 20 degree arc.
        let start = 350f64.to_radians();
        let end = 10f64.to_radians();
        assert!(!large_arc_flag(start, end));
        // 10 degrees back to 350 degrees goes the long way round.
        assert!(large_arc_flag(end, start));
        assert!((clockwise_span(start, end) - 20f64.to_radians()).abs() < EPS);
    }

    #[test]
    fn sweep_is_always_positive() {
        assert!(arc(CENTER, 10.0, 1.0, 0.5).sweep);
        assert!(arc(CENTER, 10.0, 0.5, 1.0).sweep);
    }

    #[test]
    fn curve_is_controlled_by_center() {
        let curve = quadratic_curve(CENTER, 150.0, 0.0, PI);
        assert_eq!(curve.control, CENTER);
        assert!(close(curve.start, Point::new(400.0, 250.0)));
        assert!(close(curve.end, Point::new(100.0, 250.0)));
    }
}
