use std::f64::consts::{PI, TAU};

/// Angular step used when flattening arcs for hit testing.
pub const ARC_FLATTEN_STEP: f64 = PI / 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `center` along `angle` (radians, y axis pointing down).
    pub fn polar(center: Point, radius: f64, angle: f64) -> Self {
        Self::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn angle_from(self, origin: Point) -> f64 {
        (self.y - origin.y).atan2(self.x - origin.x)
    }

    /// Reflection across the vertical line `x = axis`.
    pub fn mirror_x(self, axis: f64) -> Self {
        Self::new(2.0 * axis - self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Direction an arc is swept in. `Positive` increases the angle, which is
/// clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub sweep: Sweep,
}

impl Arc {
    pub fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64, sweep: Sweep) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            sweep,
        }
    }

    pub fn start_point(&self) -> Point {
        Point::polar(self.center, self.radius, self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(1.0)
    }

    /// Signed angle actually travelled. The end angle is wrapped by whole turns
    /// until it lies on the sweep side of the start angle, matching cairo's
    /// `arc`/`arc_negative`.
    pub fn extent(&self) -> f64 {
        let delta = self.end_angle - self.start_angle;
        match self.sweep {
            Sweep::Positive if delta >= 0.0 => delta,
            Sweep::Positive => delta.rem_euclid(TAU),
            Sweep::Negative if delta <= 0.0 => delta,
            Sweep::Negative => -(-delta).rem_euclid(TAU),
        }
    }

    pub fn point_at(&self, t: f64) -> Point {
        Point::polar(
            self.center,
            self.radius,
            self.start_angle + self.extent() * t,
        )
    }

    fn flatten_into(&self, out: &mut Vec<Point>) {
        let extent = self.extent();
        let steps = ((extent.abs() / ARC_FLATTEN_STEP).ceil() as usize).max(1);
        out.extend((0..=steps).map(|i| self.point_at(i as f64 / steps as f64)));
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    /// Draws a straight line from the current point to the arc start, then the arc.
    Arc(Arc),
    Close,
}

/// Immutable outline made of one or more sub-paths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> PathBuilder {
        PathBuilder::default()
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn subpath_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, PathElement::MoveTo(_)))
            .count()
    }

    pub fn append(&mut self, other: Path) {
        self.elements.extend(other.elements);
    }

    /// Flattens every sub-path into a polygon. Arcs become polylines at
    /// [`ARC_FLATTEN_STEP`] resolution; polygons are implicitly closed.
    pub fn polygons(&self) -> Vec<Vec<Point>> {
        let mut polygons = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for element in &self.elements {
            match element {
                PathElement::MoveTo(p) => {
                    flush_polygon(&mut polygons, &mut current);
                    current.push(*p);
                }
                PathElement::LineTo(p) => current.push(*p),
                PathElement::Arc(arc) => arc.flatten_into(&mut current),
                PathElement::Close => {
                    let start = current.first().copied();
                    flush_polygon(&mut polygons, &mut current);
                    current.extend(start);
                }
            }
        }
        flush_polygon(&mut polygons, &mut current);
        polygons
    }

    /// Non-zero winding containment test.
    pub fn contains(&self, point: Point) -> bool {
        self.polygons()
            .iter()
            .map(|polygon| winding_number(polygon, point))
            .sum::<i32>()
            != 0
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        let points: Vec<Point> = self.polygons().into_iter().flatten().collect();
        let first = points.first()?;
        let (min, max) = points.iter().fold((*first, *first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

fn flush_polygon(polygons: &mut Vec<Vec<Point>>, current: &mut Vec<Point>) {
    let polygon = std::mem::take(current);
    if polygon.len() >= 3 {
        polygons.push(polygon);
    }
}

fn is_left(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

fn winding_number(polygon: &[Point], p: Point) -> i32 {
    let edges = polygon.iter().zip(polygon.iter().cycle().skip(1));
    edges.fold(0, |wn, (&a, &b)| {
        if a.y <= p.y {
            if b.y > p.y && is_left(a, b, p) > 0.0 {
                return wn + 1;
            }
        } else if b.y <= p.y && is_left(a, b, p) < 0.0 {
            return wn - 1;
        }
        wn
    })
}

/// Chained construction of a [`Path`].
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    elements: Vec<PathElement>,
}

impl PathBuilder {
    pub fn move_to(mut self, point: Point) -> Self {
        self.elements.push(PathElement::MoveTo(point));
        self
    }

    pub fn line_to(mut self, point: Point) -> Self {
        self.elements.push(PathElement::LineTo(point));
        self
    }

    pub fn arc(
        mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        sweep: Sweep,
    ) -> Self {
        self.elements.push(PathElement::Arc(Arc::new(
            center,
            radius,
            start_angle,
            end_angle,
            sweep,
        )));
        self
    }

    pub fn close(mut self) -> Self {
        self.elements.push(PathElement::Close);
        self
    }

    pub fn build(self) -> Path {
        Path {
            elements: self.elements,
        }
    }
}
