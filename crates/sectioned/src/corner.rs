use crate::geometry::{Arc, Point, Sweep};
use std::f64::consts::FRAC_PI_2;

/// Circle tangent to both edges of a corner, plus the angles of its two
/// tangent points as seen from the circle's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerFillet {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub sweep: Sweep,
}

impl CornerFillet {
    /// Tangent point on the incoming edge.
    pub fn start_point(&self) -> Point {
        Point::polar(self.center, self.radius, self.start_angle)
    }

    /// Tangent point on the outgoing edge.
    pub fn end_point(&self) -> Point {
        Point::polar(self.center, self.radius, self.end_angle)
    }

    pub fn arc(&self) -> Arc {
        Arc::new(
            self.center,
            self.radius,
            self.start_angle,
            self.end_angle,
            self.sweep,
        )
    }
}

/// Rounds the corner `from -> via -> to` with a fillet of `radius`.
///
/// Both edges are shifted by `radius` towards the inside of the turn and the
/// fillet center is where the shifted lines cross. Returns `None` when the
/// edges are collinear or degenerate.
pub fn round_corner(from: Point, via: Point, to: Point, radius: f64) -> Option<CornerFillet> {
    let from_angle = via.angle_from(from);
    let to_angle = to.angle_from(via);

    let turn = (to_angle - from_angle).sin();
    if turn.abs() < f64::EPSILON || from == via || via == to {
        return None;
    }
    // positive turns bend clockwise on screen, so the inside is on the clockwise side
    let (side, sweep) = if turn > 0.0 {
        (1.0, Sweep::Positive)
    } else {
        (-1.0, Sweep::Negative)
    };

    let offset = |angle: f64| {
        Point::new(
            -angle.sin() * radius * side,
            angle.cos() * radius * side,
        )
    };
    let shift = |p: Point, o: Point| Point::new(p.x + o.x, p.y + o.y);

    let (from_offset, to_offset) = (offset(from_angle), offset(to_angle));
    let center = intersect_lines(
        (shift(from, from_offset), shift(via, from_offset)),
        (shift(via, to_offset), shift(to, to_offset)),
    )?;

    Some(CornerFillet {
        center,
        radius,
        start_angle: from_angle - FRAC_PI_2 * side,
        end_angle: to_angle - FRAC_PI_2 * side,
        sweep,
    })
}

/// Intersection of two infinite lines, each given by two points.
fn intersect_lines((p1, p2): (Point, Point), (p3, p4): (Point, Point)) -> Option<Point> {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let a = p1.x * p2.y - p1.y * p2.x;
    let b = p3.x * p4.y - p3.y * p4.x;
    Some(Point::new(
        (a * (p3.x - p4.x) - (p1.x - p2.x) * b) / denom,
        (a * (p3.y - p4.y) - (p1.y - p2.y) * b) / denom,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance_to_line(p: Point, a: Point, b: Point) -> f64 {
        ((b.x - a.x) * (a.y - p.y) - (a.x - p.x) * (b.y - a.y)).abs() / a.distance(b)
    }

    #[test]
    fn test_fillet_is_tangent_to_both_edges() {
        let (from, via, to) = (
            Point::new(100.0, 0.0),
            Point::new(50.0, 100.0),
            Point::new(0.0, 0.0),
        );
        let fillet = round_corner(from, via, to, 10.0).unwrap();

        assert!((distance_to_line(fillet.center, from, via) - 10.0).abs() < 1e-9);
        assert!((distance_to_line(fillet.center, via, to) - 10.0).abs() < 1e-9);
        assert!(distance_to_line(fillet.start_point(), from, via) < 1e-9);
        assert!(distance_to_line(fillet.end_point(), via, to) < 1e-9);
        // the fillet sits inside the corner, above the vertex
        assert!(fillet.center.y < via.y);
    }

    #[test]
    fn test_fillet_direction_follows_turn() {
        let cw = round_corner(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            2.0,
        )
        .unwrap();
        assert_eq!(cw.sweep, Sweep::Positive);
        assert!((cw.center.x - 8.0).abs() < 1e-9 && (cw.center.y - 2.0).abs() < 1e-9);

        let ccw = round_corner(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, -10.0),
            2.0,
        )
        .unwrap();
        assert_eq!(ccw.sweep, Sweep::Negative);
        assert!((ccw.center.x - 8.0).abs() < 1e-9 && (ccw.center.y + 2.0).abs() < 1e-9);
        assert!(ccw.arc().end_point().distance(ccw.end_point()) < 1e-9);
    }

    #[test]
    fn test_collinear_edges_have_no_fillet() {
        assert!(
            round_corner(
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
                Point::new(10.0, 0.0),
                1.0
            )
            .is_none()
        );
        assert!(
            round_corner(
                Point::new(0.0, 0.0),
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                1.0
            )
            .is_none()
        );
    }
}
