//! Band layout and outline construction for the sectioned gauge.
//!
//! The gauge is a pie slice whose apex sits at the bottom-center of its bounds.
//! It is cut into concentric bands: a filleted wedge at the apex, plain ring
//! segments, and a rounded cap at the far end. Every band becomes its own
//! closed sub-path, and the bands are merged into one active and one inactive
//! outline so each side needs a single fill.

use crate::color;
use crate::corner::round_corner;
use crate::error::SliderError;
use crate::geometry::{Path, Point, Rect, Sweep};
use palette::{Srgb, Srgba, WithAlpha};
use std::f64::consts::PI;

pub const START_ANGLE: f64 = 4.2 * PI / 3.0;
pub const END_ANGLE: f64 = 4.8 * PI / 3.0;
/// Gap left between neighbouring bands.
pub const LINE_WIDTH: f64 = 0.5;
pub const MIN_SECTIONS: usize = 4;
/// Apex fillet radius relative to the band height.
pub const APEX_FILLET_FACTOR: f64 = 0.3;
/// Tilt of the cap's fillet centers relative to the end edge. Empirical: a
/// value of `1.5π` would put the fillet center square to the edge, the extra
/// `0.025π` pulls it inward so the fillet meets the outer arc almost
/// tangentially for this sweep.
pub const CAP_FILLET_TILT: f64 = 1.525 * PI;
pub const MIN_ACTIVE_ALPHA: f64 = 0.4;
pub const MAX_ACTIVE_ALPHA: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandState {
    Active,
    Inactive,
}

impl BandState {
    pub fn resolve(index: usize, current: usize) -> Self {
        if index <= current {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandShape {
    /// Pie wedge touching the apex, with the apex corner filleted.
    Apex { radius: f64, fillet_radius: f64 },
    /// Annular segment between two radii.
    Ring { inner: f64, outer: f64 },
    /// Terminal band with rounded outer corners.
    Cap { inner: f64, fillet_radius: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub index: usize,
    pub shape: BandShape,
    pub state: BandState,
}

impl Band {
    pub fn outline(&self, apex: Point) -> Path {
        match self.shape {
            BandShape::Apex {
                radius,
                fillet_radius,
            } => apex_outline(apex, radius, fillet_radius),
            BandShape::Ring { inner, outer } => ring_outline(apex, inner, outer),
            BandShape::Cap {
                inner,
                fillet_radius,
            } => cap_outline(apex, inner, fillet_radius),
        }
    }
}

/// Validated inputs for one geometry rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionLayout {
    bounds: Rect,
    sections: usize,
    current: usize,
    half_sections: bool,
}

impl SectionLayout {
    pub fn new(
        bounds: Rect,
        sections: usize,
        current: usize,
        half_sections: bool,
    ) -> Result<Self, SliderError> {
        if sections < MIN_SECTIONS {
            return Err(SliderError::TooFewSections(sections));
        }
        if current >= sections {
            return Err(SliderError::SectionOutOfRange {
                section: current,
                sections,
            });
        }
        if bounds.is_empty() {
            return Err(SliderError::EmptyBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }

        let layout = Self {
            bounds,
            sections,
            current,
            half_sections,
        };
        if layout.apex_radius() <= 0.0 {
            return Err(SliderError::BandsTooThin {
                height: bounds.height,
                sections,
            });
        }
        Ok(layout)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn sections(&self) -> usize {
        self.sections
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn half_sections(&self) -> bool {
        self.half_sections
    }

    /// Same layout with another selection; `current` must already be in range.
    pub(crate) fn with_current(self, current: usize) -> Self {
        debug_assert!(current < self.sections);
        Self { current, ..self }
    }

    pub(crate) fn with_bounds(self, bounds: Rect) -> Result<Self, SliderError> {
        Self::new(bounds, self.sections, self.current, self.half_sections)
    }

    pub fn apex(&self) -> Point {
        Point::new(self.bounds.mid_x(), self.bounds.max_y())
    }

    /// Number of `LINE_WIDTH` gaps stacked along the radius. Half sections
    /// pair up bands, so only every other boundary carries a gap.
    pub fn gap_count(&self) -> usize {
        if self.half_sections {
            self.sections / 2 - 1
        } else {
            self.sections - 1
        }
    }

    pub fn empty_space(&self) -> f64 {
        LINE_WIDTH * self.gap_count() as f64
    }

    pub fn visible_height(&self) -> f64 {
        (self.bounds.height - self.empty_space()) / self.sections as f64
    }

    /// Outer radius of the apex wedge. Without half sections the first gap is
    /// taken out of it.
    pub fn apex_radius(&self) -> f64 {
        let h = self.visible_height();
        if self.half_sections { h } else { h - LINE_WIDTH }
    }

    /// Radius where band `index` starts. Only meaningful from the third band
    /// on; the first two are laid out by [`Self::bands`] directly.
    pub fn band_start(&self, index: usize) -> f64 {
        let gaps = if self.half_sections {
            index / 2
        } else {
            index.saturating_sub(1)
        };
        index as f64 * self.visible_height() + LINE_WIDTH * gaps as f64
    }

    pub fn bands(&self) -> Vec<Band> {
        let h = self.visible_height();
        let last = self.sections - 1;

        (0..self.sections)
            .map(|index| {
                let shape = match index {
                    0 => BandShape::Apex {
                        radius: self.apex_radius(),
                        fillet_radius: h * APEX_FILLET_FACTOR,
                    },
                    1 => BandShape::Ring {
                        inner: h,
                        outer: 2.0 * h,
                    },
                    i if i == last => BandShape::Cap {
                        inner: self.band_start(i),
                        fillet_radius: h,
                    },
                    i => {
                        let inner = self.band_start(i);
                        BandShape::Ring {
                            inner,
                            outer: inner + h,
                        }
                    }
                };
                Band {
                    index,
                    shape,
                    state: BandState::resolve(index, self.current),
                }
            })
            .collect()
    }

    /// Share of the bands that are lit, in `(0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        (self.current + 1) as f64 / self.sections as f64
    }

    pub fn build(&self) -> SliderGeometry {
        let apex = self.apex();
        let bands = self.bands();

        let (active, inactive): (Vec<&Band>, Vec<&Band>) = bands
            .iter()
            .partition(|band| band.state == BandState::Active);
        let merge = |bands: Vec<&Band>| {
            bands.into_iter().fold(Path::new(), |mut path, band| {
                path.append(band.outline(apex));
                path
            })
        };

        log::debug!(
            "Rebuilt slider geometry: {} sections, current {}, bounds {:?}",
            self.sections,
            self.current,
            self.bounds
        );

        SliderGeometry {
            body: body_outline(self.bounds, apex),
            active: merge(active),
            inactive: merge(inactive),
            bands,
            fill_ratio: self.fill_ratio(),
        }
    }
}

/// Outlines produced by one rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderGeometry {
    /// Full pie silhouette used for hit testing.
    pub body: Path,
    pub bands: Vec<Band>,
    pub active: Path,
    pub inactive: Path,
    pub fill_ratio: f64,
}

impl SliderGeometry {
    /// Opacity of the active fill, remapped from [`Self::fill_ratio`] into
    /// `[MIN_ACTIVE_ALPHA, MAX_ACTIVE_ALPHA]`. The ratio counts lit bands, so
    /// it is `(current + 1) / sections` and a full slider is fully opaque.
    pub fn active_alpha(&self) -> f64 {
        color::remap(
            self.fill_ratio,
            (0.0, 1.0),
            (MIN_ACTIVE_ALPHA, MAX_ACTIVE_ALPHA),
        )
    }

    pub fn active_color(&self, accent: Srgb<f64>) -> Srgba<f64> {
        accent.with_alpha(self.active_alpha())
    }

    pub fn bands_in(&self, state: BandState) -> impl Iterator<Item = &Band> {
        self.bands.iter().filter(move |band| band.state == state)
    }
}

/// Builds the geometry in one call, validating the inputs first.
pub fn build_geometry(
    bounds: Rect,
    sections: usize,
    current: usize,
    half_sections: bool,
) -> Result<SliderGeometry, SliderError> {
    Ok(SectionLayout::new(bounds, sections, current, half_sections)?.build())
}

fn body_outline(bounds: Rect, apex: Point) -> Path {
    let radius = bounds.height;
    Path::builder()
        .move_to(Point::polar(apex, radius, START_ANGLE))
        .arc(apex, radius, START_ANGLE, END_ANGLE, Sweep::Positive)
        .line_to(apex)
        .close()
        .build()
}

fn ring_outline(apex: Point, inner: f64, outer: f64) -> Path {
    Path::builder()
        .move_to(Point::polar(apex, inner, START_ANGLE))
        .arc(apex, inner, START_ANGLE, END_ANGLE, Sweep::Positive)
        .arc(apex, outer, END_ANGLE, START_ANGLE, Sweep::Negative)
        .close()
        .build()
}

fn apex_outline(apex: Point, radius: f64, fillet_radius: f64) -> Path {
    let right = Point::polar(apex, radius, END_ANGLE);
    let left = Point::polar(apex, radius, START_ANGLE);

    let builder = Path::builder().move_to(right);
    let builder = match round_corner(right, apex, left, fillet_radius) {
        Some(fillet) => builder.line_to(fillet.start_point()).arc(
            fillet.center,
            fillet.radius,
            fillet.start_angle,
            fillet.end_angle,
            fillet.sweep,
        ),
        None => builder.line_to(apex),
    };

    builder
        .line_to(left)
        .arc(apex, radius, START_ANGLE, END_ANGLE, Sweep::Positive)
        .close()
        .build()
}

/// Inner arc, right fillet, outer arc, mirrored left fillet.
fn cap_outline(apex: Point, inner: f64, radius: f64) -> Path {
    let right = Point::polar(apex, inner, END_ANGLE);
    let tilt = END_ANGLE - CAP_FILLET_TILT;
    let right_center = Point::polar(right, radius, tilt + PI);
    let left_center = right_center.mirror_x(apex.x);

    // the outer arc runs through the right fillet's end point
    let shoulder = Point::polar(right_center, radius, END_ANGLE);
    let outer = shoulder.distance(apex);
    let outer_start = shoulder.angle_from(apex);
    let outer_end = START_ANGLE + END_ANGLE - outer_start;

    Path::builder()
        .move_to(Point::polar(apex, inner, START_ANGLE))
        .arc(apex, inner, START_ANGLE, END_ANGLE, Sweep::Positive)
        .arc(right_center, radius, tilt, END_ANGLE, Sweep::Negative)
        .arc(apex, outer, outer_start, outer_end, Sweep::Negative)
        .arc(
            left_center,
            radius,
            3.0 * PI - END_ANGLE,
            PI - tilt,
            Sweep::Negative,
        )
        .close()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathElement;

    fn layout(sections: usize, current: usize, half: bool) -> SectionLayout {
        SectionLayout::new(Rect::from_size(200.0, 300.0), sections, current, half).unwrap()
    }

    /// Point at `radius` straight above the apex.
    fn above_apex(layout: &SectionLayout, radius: f64) -> Point {
        let apex = layout.apex();
        Point::new(apex.x, apex.y - radius)
    }

    #[test]
    fn test_rejects_invalid_layouts() {
        let bounds = Rect::from_size(200.0, 300.0);
        assert_eq!(
            SectionLayout::new(bounds, 0, 0, false),
            Err(SliderError::TooFewSections(0))
        );
        assert_eq!(
            SectionLayout::new(bounds, 3, 0, false),
            Err(SliderError::TooFewSections(3))
        );
        assert_eq!(
            SectionLayout::new(bounds, 10, 10, false),
            Err(SliderError::SectionOutOfRange {
                section: 10,
                sections: 10
            })
        );
        assert!(matches!(
            SectionLayout::new(Rect::from_size(200.0, 0.0), 10, 0, false),
            Err(SliderError::EmptyBounds { .. })
        ));
        assert!(SectionLayout::new(bounds, MIN_SECTIONS, 0, false).is_ok());
    }

    #[test]
    fn test_rejects_bands_without_height() {
        // 39 gaps of 0.5 already take 19.5 of the 10 available
        assert_eq!(
            SectionLayout::new(Rect::from_size(100.0, 10.0), 40, 39, false),
            Err(SliderError::BandsTooThin {
                height: 10.0,
                sections: 40
            })
        );
        // exactly filled by gaps
        assert!(matches!(
            SectionLayout::new(Rect::from_size(100.0, 1.5), 4, 0, false),
            Err(SliderError::BandsTooThin { .. })
        ));
        // bands are 0.375 high, less than the gap the apex gives up
        assert!(matches!(
            SectionLayout::new(Rect::from_size(100.0, 3.0), 4, 0, false),
            Err(SliderError::BandsTooThin { .. })
        ));

        let thin = SectionLayout::new(Rect::from_size(100.0, 40.0), 40, 39, true).unwrap();
        assert!(thin.visible_height() > 0.0);
        for band in thin.bands() {
            match band.shape {
                BandShape::Apex { radius, fillet_radius } => {
                    assert!(radius > 0.0 && fillet_radius > 0.0)
                }
                BandShape::Ring { inner, outer } => assert!(inner > 0.0 && outer > inner),
                BandShape::Cap { inner, fillet_radius } => {
                    assert!(inner > 0.0 && fillet_radius > 0.0)
                }
            }
        }
    }

    #[test]
    fn test_active_and_inactive_bands_split_at_current() {
        let geometry = layout(10, 3, false).build();

        let active: Vec<usize> = geometry
            .bands_in(BandState::Active)
            .map(|b| b.index)
            .collect();
        let inactive: Vec<usize> = geometry
            .bands_in(BandState::Inactive)
            .map(|b| b.index)
            .collect();

        assert_eq!(active, vec![0, 1, 2, 3]);
        assert_eq!(inactive, vec![4, 5, 6, 7, 8, 9]);
        assert_eq!(geometry.active.subpath_count(), 4);
        assert_eq!(geometry.inactive.subpath_count(), 6);
    }

    #[test]
    fn test_band_fill_matches_state() {
        let layout = layout(10, 3, false);
        let geometry = layout.build();
        let h = layout.visible_height();

        let in_band_two = above_apex(&layout, layout.band_start(2) + h / 2.0);
        assert!(geometry.active.contains(in_band_two));
        assert!(!geometry.inactive.contains(in_band_two));

        let in_band_five = above_apex(&layout, layout.band_start(5) + h / 2.0);
        assert!(geometry.inactive.contains(in_band_five));
        assert!(!geometry.active.contains(in_band_five));

        // the gap between band 2 and band 3 stays empty
        let in_gap = above_apex(&layout, layout.band_start(3) - LINE_WIDTH / 2.0);
        assert!(!geometry.active.contains(in_gap));
        assert!(!geometry.inactive.contains(in_gap));
    }

    #[test]
    fn test_cap_and_apex_are_filled() {
        let layout = layout(10, 9, false);
        let geometry = layout.build();
        let h = layout.visible_height();

        let in_cap = above_apex(&layout, layout.band_start(9) + h / 2.0);
        assert!(geometry.active.contains(in_cap));

        let in_apex = above_apex(&layout, h - LINE_WIDTH - 1.0);
        assert!(geometry.active.contains(in_apex));
        assert!(geometry.inactive.is_empty());

        // the fillet rounds away the very tip of the wedge
        let tip = above_apex(&layout, 0.5);
        assert!(!geometry.active.contains(tip));
    }

    #[test]
    fn test_cap_stays_inside_body() {
        let layout = layout(10, 0, false);
        let geometry = layout.build();
        let cap = geometry.bands.last().unwrap().outline(layout.apex());

        let bbox = cap.bounding_box().unwrap();
        assert!(bbox.y >= -1e-6);
        assert!(bbox.max_y() < layout.apex().y);

        let cap_top = layout.apex().y - bbox.y;
        assert!(cap_top > layout.band_start(9));
        assert!(cap_top <= layout.bounds().height);
    }

    #[test]
    fn test_cap_sub_path_is_connected() {
        let layout = layout(10, 0, false);
        let cap = layout.bands()[9].outline(layout.apex());

        let arcs: Vec<_> = cap
            .elements()
            .iter()
            .filter_map(|e| match e {
                PathElement::Arc(arc) => Some(*arc),
                _ => None,
            })
            .collect();
        assert_eq!(arcs.len(), 4);
        for pair in arcs.windows(2) {
            assert!(pair[0].end_point().distance(pair[1].start_point()) < 1e-6);
        }
        // the last fillet lands back on the starting corner
        let start = Point::polar(layout.apex(), layout.band_start(9), START_ANGLE);
        assert!(arcs[3].end_point().distance(start) < 1e-6);
    }

    #[test]
    fn test_half_sections_pair_up_bands() {
        let full = layout(10, 0, false);
        let half = layout(10, 0, true);

        assert_eq!(full.gap_count(), 9);
        assert_eq!(half.gap_count(), 4);
        assert!(half.empty_space() < full.empty_space());

        // bands 2 and 3 share an edge when paired
        let h = half.visible_height();
        assert!((half.band_start(2) + h - half.band_start(3)).abs() < 1e-9);
        assert!((half.band_start(4) - (half.band_start(3) + h) - LINE_WIDTH).abs() < 1e-9);
    }

    #[test]
    fn test_doubled_half_sections_keep_spacing() {
        let full = layout(10, 0, false);
        let doubled = layout(20, 0, true);

        assert_eq!(full.empty_space(), doubled.empty_space());
        assert!((full.visible_height() - 2.0 * doubled.visible_height()).abs() < 1e-9);
    }

    #[test]
    fn test_active_alpha_follows_selection() {
        let lowest = layout(10, 0, false).build();
        assert!((lowest.active_alpha() - 0.46).abs() < 1e-9);

        let alphas: Vec<f64> = (0..10)
            .map(|c| layout(10, c, false).build().active_alpha())
            .collect();
        assert!(alphas.windows(2).all(|w| w[0] < w[1]));
        assert!(alphas.iter().all(|a| *a > MIN_ACTIVE_ALPHA));
        assert!((alphas[9] - MAX_ACTIVE_ALPHA).abs() < 1e-9);

        let color = lowest.active_color(Srgb::new(1.0, 0.0, 0.0));
        assert_eq!(color.red, 1.0);
        assert!((color.alpha - 0.46).abs() < 1e-9);
    }

    #[test]
    fn test_body_covers_bands() {
        let layout = layout(12, 5, true);
        let geometry = layout.build();
        for band in &geometry.bands {
            let sample = match band.shape {
                BandShape::Apex { radius, .. } => radius - 1.0,
                BandShape::Ring { inner, outer } => (inner + outer) / 2.0,
                BandShape::Cap { inner, .. } => inner + 1.0,
            };
            assert!(geometry.body.contains(above_apex(&layout, sample)));
        }
        assert!(!geometry.body.contains(Point::new(5.0, 150.0)));
    }
}
