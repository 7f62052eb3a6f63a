use sectioned::geometry::{Point, Rect};

pub mod model;
pub mod view;

pub use model::{DialogOutcome, DialogState, PointerAction, PointerTarget};
pub use view::draw;

pub const MARGIN: f64 = 24.0;
pub const ICON_SIZE: i32 = 64;
pub const TITLE_FONT_SIZE: f64 = 20.0;
pub const VALUE_FONT_SIZE: f64 = 44.0;
pub const BUTTON_FONT_SIZE: f64 = 15.0;
pub const BUTTON_RADIUS: f64 = 36.0;
pub const TITLE_GAP: f64 = 16.0; // icon to title baseline
pub const LINE_GAP: f64 = 12.0;
pub const SLIDER_GAP: f64 = 24.0;
pub const SLIDER_ASPECT: f64 = 0.75; // max width / height of the slider box
pub const MIN_SLIDER_HEIGHT: f64 = 40.0;
pub const DEFAULT_BUTTON_TITLE: &str = "Save";

/// Placement of everything the dialog draws, top to bottom: icon, title,
/// value, slider, confirm button. Text positions are centered baselines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialogLayout {
    pub bounds: Rect,
    pub icon: Rect,
    pub title: Point,
    pub value: Point,
    pub slider: Rect,
    pub button_center: Point,
    pub button_radius: f64,
}

impl DialogLayout {
    /// `None` when the area is too small to fit a usable slider.
    pub fn compute(width: f64, height: f64) -> Option<Self> {
        let bounds = Rect::from_size(width, height);
        if bounds.is_empty() {
            return None;
        }
        let cx = bounds.mid_x();
        let icon_size = ICON_SIZE as f64;

        let icon = Rect::new(cx - icon_size / 2.0, MARGIN, icon_size, icon_size);
        let title = Point::new(cx, icon.max_y() + TITLE_GAP + TITLE_FONT_SIZE);
        let value = Point::new(cx, title.y + LINE_GAP + VALUE_FONT_SIZE);
        let button_center = Point::new(cx, height - MARGIN - BUTTON_RADIUS);

        let slider_top = value.y + SLIDER_GAP;
        let slider_height = button_center.y - BUTTON_RADIUS - SLIDER_GAP - slider_top;
        let slider_width = (width - 2.0 * MARGIN).min(slider_height * SLIDER_ASPECT);
        if slider_height < MIN_SLIDER_HEIGHT || slider_width <= 0.0 {
            return None;
        }

        Some(Self {
            bounds,
            icon,
            title,
            value,
            slider: Rect::new(cx - slider_width / 2.0, slider_top, slider_width, slider_height),
            button_center,
            button_radius: BUTTON_RADIUS,
        })
    }

    pub fn hits_button(&self, point: Point) -> bool {
        point.distance(self.button_center) <= self.button_radius
    }
}
