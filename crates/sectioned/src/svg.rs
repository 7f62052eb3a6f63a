use crate::geometry::{Arc, Path, PathElement, Point};
use crate::host::SliderPalette;
use crate::sections::SliderGeometry;
use palette::Srgba;
use std::f64::consts::PI;
use std::fmt::Write;

const POINT_EPSILON: f64 = 1e-9;

impl Path {
    /// SVG `d` attribute for this outline.
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        let mut current: Option<Point> = None;
        let mut subpath_start: Option<Point> = None;

        for element in self.elements() {
            match element {
                PathElement::MoveTo(p) => {
                    push_command(&mut data, format_args!("M {} {}", num(p.x), num(p.y)));
                    current = Some(*p);
                    subpath_start = Some(*p);
                }
                PathElement::LineTo(p) => {
                    push_command(&mut data, format_args!("L {} {}", num(p.x), num(p.y)));
                    current = Some(*p);
                }
                PathElement::Arc(arc) => {
                    let start = arc.start_point();
                    match current {
                        Some(p) if p.distance(start) < POINT_EPSILON => {}
                        Some(_) => push_command(
                            &mut data,
                            format_args!("L {} {}", num(start.x), num(start.y)),
                        ),
                        None => {
                            push_command(
                                &mut data,
                                format_args!("M {} {}", num(start.x), num(start.y)),
                            );
                            subpath_start = Some(start);
                        }
                    }
                    push_arc(&mut data, arc);
                    current = Some(arc.end_point());
                }
                PathElement::Close => {
                    push_command(&mut data, format_args!("Z"));
                    current = subpath_start;
                }
            }
        }
        data
    }
}

/// Standalone SVG document: the body in the track color, then the active
/// bands in the accent color on top.
pub fn render_svg(geometry: &SliderGeometry, palette: &SliderPalette) -> String {
    let view = geometry.body.bounding_box().unwrap_or_default();
    let active = geometry.active_color(palette.accent.color);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
        num(view.x),
        num(view.y),
        num(view.width),
        num(view.height),
        num(view.width),
        num(view.height),
    );
    for (id, path, color) in [
        ("inactive", &geometry.inactive, palette.track),
        ("active", &geometry.active, active),
    ] {
        if path.is_empty() {
            continue;
        }
        let (fill, opacity) = svg_color(color);
        let _ = writeln!(
            svg,
            r#"  <path id="{id}" fill="{fill}" fill-opacity="{}" d="{}"/>"#,
            num(opacity),
            path.to_svg_data()
        );
    }
    svg.push_str("</svg>\n");
    svg
}

fn push_command(data: &mut String, command: std::fmt::Arguments) {
    if !data.is_empty() {
        data.push(' ');
    }
    let _ = data.write_fmt(command);
}

/// SVG arcs can't express a full turn and get ambiguous near half a turn,
/// so longer arcs are emitted in pieces of at most `PI`.
fn push_arc(data: &mut String, arc: &Arc) {
    let extent = arc.extent();
    let pieces = ((extent.abs() / PI).ceil() as usize).max(1);
    let sweep_flag = u8::from(extent > 0.0);

    for i in 1..=pieces {
        let end = arc.point_at(i as f64 / pieces as f64);
        push_command(
            data,
            format_args!(
                "A {r} {r} 0 0 {sweep_flag} {} {}",
                num(end.x),
                num(end.y),
                r = num(arc.radius)
            ),
        );
    }
}

fn svg_color(color: Srgba<f64>) -> (String, f64) {
    let rgb = color.color.into_format::<u8>();
    (
        format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue),
        color.alpha,
    )
}

/// Three decimals, trailing zeros dropped.
fn num(value: f64) -> String {
    let formatted = format!("{:.3}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
