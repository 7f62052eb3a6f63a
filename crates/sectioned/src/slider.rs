use crate::error::SliderError;
use crate::events::SliderEvent;
use crate::geometry::{Point, Rect};
use crate::input::{TapTracker, position_to_section};
use crate::sections::{SectionLayout, SliderGeometry};
use async_channel::Sender;
use palette::{Srgb, Srgba};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub bounds: Rect,
    pub selected_section: usize,
    pub sections: usize,
    pub half_sections: bool,
    pub accent: Srgb<f64>,
}

/// What the host should do after feeding the slider a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliderAction {
    pub should_redraw: bool,
    pub haptic_tick: bool,
}

impl SliderAction {
    pub fn new(should_redraw: bool, haptic_tick: bool) -> Self {
        Self {
            should_redraw,
            haptic_tick,
        }
    }

    fn selection_changed() -> Self {
        Self::new(true, true)
    }
}

/// The sectioned gauge control. Owns the selected index and the outlines
/// built from it; notifies its host through an event channel.
pub struct SectionedSlider {
    layout: SectionLayout,
    accent: Srgb<f64>,
    geometry: SliderGeometry,
    tap: TapTracker,
    dragging: bool,
    events: Sender<SliderEvent>,
}

impl SectionedSlider {
    pub fn new(config: SliderConfig, events: Sender<SliderEvent>) -> Result<Self, SliderError> {
        let layout = SectionLayout::new(
            config.bounds,
            config.sections,
            config.selected_section,
            config.half_sections,
        )?;

        Ok(Self {
            geometry: layout.build(),
            layout,
            accent: config.accent,
            tap: TapTracker::default(),
            dragging: false,
            events,
        })
    }

    pub fn current_section(&self) -> usize {
        self.layout.current()
    }

    pub fn sections(&self) -> usize {
        self.layout.sections()
    }

    pub fn half_sections(&self) -> bool {
        self.layout.half_sections()
    }

    pub fn bounds(&self) -> Rect {
        self.layout.bounds()
    }

    pub fn geometry(&self) -> &SliderGeometry {
        &self.geometry
    }

    pub fn active_color(&self) -> Srgba<f64> {
        self.geometry.active_color(self.accent)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.geometry.body.contains(point)
    }

    pub fn set_bounds(&mut self, bounds: Rect) -> Result<(), SliderError> {
        if bounds != self.layout.bounds() {
            self.layout = self.layout.with_bounds(bounds)?;
            self.geometry = self.layout.build();
        }
        Ok(())
    }

    pub fn touch_began(&mut self, point: Point) -> SliderAction {
        let inside = self.contains(point);
        self.tap.begin(self.current_section(), inside);
        self.dragging = inside;

        if inside {
            self.process(point)
        } else {
            SliderAction::default()
        }
    }

    pub fn drag(&mut self, point: Point) -> SliderAction {
        if !self.dragging {
            return SliderAction::default();
        }
        self.process(point)
    }

    pub fn touch_ended(&mut self, point: Point) -> SliderAction {
        let inside = self.contains(point);
        self.dragging = false;
        if let Some(section) = self.tap.finish(self.current_section(), inside) {
            self.emit(SliderEvent::DoubleTapped(section));
        }
        SliderAction::default()
    }

    pub fn touch_cancelled(&mut self) {
        self.dragging = false;
        self.tap.cancel();
    }

    fn process(&mut self, point: Point) -> SliderAction {
        position_to_section(point, self.layout.bounds(), self.layout.sections())
            .filter(|&section| section != self.current_section())
            .map(|section| self.select(section))
            .unwrap_or_default()
    }

    fn select(&mut self, section: usize) -> SliderAction {
        log::debug!(
            "Slider section {} -> {}",
            self.current_section(),
            section
        );
        self.layout = self.layout.with_current(section);
        self.geometry = self.layout.build();
        self.tap.section_changed();
        self.emit(SliderEvent::SectionChanged(section));
        SliderAction::selection_changed()
    }

    fn emit(&self, event: SliderEvent) {
        if let Err(e) = self.events.try_send(event) {
            log::warn!("Dropped slider event {:?}: {}", event, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_channel::Receiver;

    fn slider(selected: usize) -> (SectionedSlider, Receiver<SliderEvent>) {
        let (tx, rx) = async_channel::unbounded();
        let slider = SectionedSlider::new(
            SliderConfig {
                bounds: Rect::from_size(200.0, 300.0),
                selected_section: selected,
                sections: 10,
                half_sections: false,
                accent: Srgb::new(1.0, 0.8, 0.0),
            },
            tx,
        )
        .unwrap();
        (slider, rx)
    }

    /// Point on the vertical axis in the middle of band `i` (30px bands).
    fn band_point(i: usize) -> Point {
        Point::new(100.0, 300.0 - (i as f64 * 30.0 + 15.0))
    }

    fn drain(rx: &Receiver<SliderEvent>) -> Vec<SliderEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[test]
    fn test_rejects_zero_sections() {
        let (tx, _rx) = async_channel::unbounded();
        let config = SliderConfig {
            bounds: Rect::from_size(200.0, 300.0),
            selected_section: 0,
            sections: 0,
            half_sections: false,
            accent: Srgb::new(1.0, 1.0, 1.0),
        };
        assert_eq!(
            SectionedSlider::new(config, tx).err(),
            Some(SliderError::TooFewSections(0))
        );
    }

    #[test]
    fn test_drag_changes_section_and_notifies() {
        let (mut slider, rx) = slider(2);

        let action = slider.touch_began(band_point(2));
        assert_eq!(action, SliderAction::default());

        let action = slider.drag(band_point(5));
        assert!(action.should_redraw && action.haptic_tick);
        assert_eq!(slider.current_section(), 5);

        // same band again: nothing to do
        assert_eq!(slider.drag(band_point(5)), SliderAction::default());

        slider.touch_ended(band_point(5));
        assert_eq!(drain(&rx), vec![SliderEvent::SectionChanged(5)]);
        assert_eq!(slider.geometry().active.subpath_count(), 6);
    }

    #[test]
    fn test_tap_on_current_section_confirms() {
        let (mut slider, rx) = slider(4);
        slider.touch_began(band_point(4));
        slider.touch_ended(band_point(4));
        assert_eq!(drain(&rx), vec![SliderEvent::DoubleTapped(4)]);
    }

    #[test]
    fn test_tap_on_other_section_only_selects() {
        let (mut slider, rx) = slider(4);
        slider.touch_began(band_point(7));
        slider.touch_ended(band_point(7));
        assert_eq!(drain(&rx), vec![SliderEvent::SectionChanged(7)]);
    }

    #[test]
    fn test_drag_back_to_start_does_not_confirm() {
        let (mut slider, rx) = slider(4);
        slider.touch_began(band_point(4));
        slider.drag(band_point(6));
        slider.drag(band_point(4));
        slider.touch_ended(band_point(4));
        assert_eq!(
            drain(&rx),
            vec![
                SliderEvent::SectionChanged(6),
                SliderEvent::SectionChanged(4)
            ]
        );
    }

    #[test]
    fn test_touch_outside_body_is_ignored() {
        let (mut slider, rx) = slider(4);
        let outside = Point::new(5.0, 150.0);
        assert!(!slider.contains(outside));

        assert_eq!(slider.touch_began(outside), SliderAction::default());
        assert_eq!(slider.drag(band_point(7)), SliderAction::default());
        slider.touch_ended(band_point(4));
        assert!(drain(&rx).is_empty());
        assert_eq!(slider.current_section(), 4);
    }

    #[test]
    fn test_drag_below_control_keeps_selection() {
        let (mut slider, rx) = slider(4);
        slider.touch_began(band_point(4));
        assert_eq!(slider.drag(Point::new(100.0, 340.0)), SliderAction::default());
        assert_eq!(slider.current_section(), 4);
        slider.touch_cancelled();
        slider.touch_ended(band_point(4));
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_set_bounds_rebuilds_geometry() {
        let (mut slider, _rx) = slider(4);
        let before = slider.geometry().clone();
        slider.set_bounds(Rect::new(50.0, 50.0, 100.0, 150.0)).unwrap();
        assert_ne!(&before, slider.geometry());
        assert!(slider.contains(Point::new(100.0, 150.0)));
        assert!(slider.set_bounds(Rect::from_size(0.0, 0.0)).is_err());
        assert_eq!(slider.bounds(), Rect::new(50.0, 50.0, 100.0, 150.0));
    }

    #[test]
    fn test_closed_channel_does_not_panic() {
        let (mut slider, rx) = slider(1);
        drop(rx);
        slider.touch_began(band_point(1));
        let action = slider.drag(band_point(3));
        assert!(action.should_redraw);
        assert_eq!(slider.current_section(), 3);
    }
}
