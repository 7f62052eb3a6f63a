use super::model::DialogState;
use super::{
    BUTTON_FONT_SIZE, DEFAULT_BUTTON_TITLE, DialogLayout, ICON_SIZE, TITLE_FONT_SIZE,
    VALUE_FONT_SIZE,
};
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use sectioned::geometry::{Path, PathElement, Point, Sweep};
use sectioned::slider::SectionedSlider;
use std::f64::consts::PI;

struct DialogRenderer<'a> {
    dialog: &'a DialogState,
    layout: &'a DialogLayout,
}

impl<'a> DialogRenderer<'a> {
    fn new(dialog: &'a DialogState, layout: &'a DialogLayout) -> Self {
        Self { dialog, layout }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.draw_backdrop(cr)?;
        if let Some(pixbuf) = &self.dialog.icon {
            self.draw_icon(cr, pixbuf)?;
        }
        self.draw_labels(cr)?;
        if let Some(slider) = self.dialog.slider() {
            self.draw_slider(cr, slider)?;
        }
        self.draw_button(cr)
    }

    fn draw_backdrop(&self, cr: &Context) -> Result<(), cairo::Error> {
        let bounds = self.layout.bounds;
        set_color(cr, self.dialog.controller.backdrop());
        cr.rectangle(bounds.x, bounds.y, bounds.width, bounds.height);
        cr.fill()
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let icon = self.layout.icon;
        let scale = icon.width / ICON_SIZE as f64;
        // pixbufs keep their aspect ratio, center inside the icon box
        let (iw, ih) = (
            pixbuf.width() as f64 * scale,
            pixbuf.height() as f64 * scale,
        );

        cr.save()?;
        cr.translate(icon.mid_x() - iw / 2.0, icon.mid_y() - ih / 2.0);
        cr.scale(scale, scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_labels(&self, cr: &Context) -> Result<(), cairo::Error> {
        let palette = self.dialog.controller.palette();
        if let Some(title) = &self.dialog.controller.options().title {
            draw_centered_text(cr, title, self.layout.title, TITLE_FONT_SIZE, palette.title)?;
        }
        draw_centered_text(
            cr,
            &self.dialog.controller.value_label(),
            self.layout.value,
            VALUE_FONT_SIZE,
            palette.value,
        )
    }

    fn draw_slider(&self, cr: &Context, slider: &SectionedSlider) -> Result<(), cairo::Error> {
        let geometry = slider.geometry();

        trace_path(cr, &geometry.inactive);
        set_color(cr, self.dialog.controller.palette().track);
        cr.fill()?;

        trace_path(cr, &geometry.active);
        set_color(cr, slider.active_color());
        cr.fill()
    }

    fn draw_button(&self, cr: &Context) -> Result<(), cairo::Error> {
        let center = self.layout.button_center;
        set_color(cr, self.dialog.controller.button_accent());
        cr.new_sub_path();
        cr.arc(center.x, center.y, self.layout.button_radius, 0.0, 2.0 * PI);
        cr.fill()?;

        let label = self
            .dialog
            .controller
            .options()
            .button_title
            .as_ref()
            .map_or(DEFAULT_BUTTON_TITLE, |t| t.as_str());
        draw_centered_text(
            cr,
            label,
            Point::new(center.x, center.y + BUTTON_FONT_SIZE * 0.35),
            BUTTON_FONT_SIZE,
            self.dialog.controller.palette().background,
        )
    }
}

/// Draws the dialog scaled around the middle of the area and faded by its
/// current transition frame.
pub fn draw(cr: &Context, dialog: &DialogState) -> Result<(), cairo::Error> {
    let (Some(layout), Some(pivot)) = (dialog.layout(), dialog.pivot()) else {
        return Ok(());
    };
    let frame = dialog.frame();
    if frame.alpha <= 0.0 {
        return Ok(());
    }

    cr.save()?;
    cr.translate(pivot.x, pivot.y);
    cr.scale(frame.scale, frame.scale);
    cr.translate(-pivot.x, -pivot.y);

    cr.push_group();
    DialogRenderer::new(dialog, layout).draw(cr)?;
    cr.pop_group_to_source()?;
    cr.paint_with_alpha(frame.alpha)?;
    cr.restore()
}

/// Replays `path` on the context; arcs map onto `arc`/`arc_negative`.
pub fn trace_path(cr: &Context, path: &Path) {
    for element in path.elements() {
        match element {
            PathElement::MoveTo(p) => cr.move_to(p.x, p.y),
            PathElement::LineTo(p) => cr.line_to(p.x, p.y),
            PathElement::Arc(arc) => {
                let (c, r) = (arc.center, arc.radius);
                match arc.sweep {
                    Sweep::Positive => cr.arc(c.x, c.y, r, arc.start_angle, arc.end_angle),
                    Sweep::Negative => {
                        cr.arc_negative(c.x, c.y, r, arc.start_angle, arc.end_angle)
                    }
                }
            }
            PathElement::Close => cr.close_path(),
        }
    }
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn draw_centered_text(
    cr: &Context,
    text: &str,
    baseline: Point,
    size: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(size);
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(
            baseline.x - ext.width() / 2.0 - ext.x_bearing(),
            baseline.y,
        );
        cr.show_text(text)?;
    }
    Ok(())
}
