use super::{DialogLayout, ICON_SIZE};
use async_channel::Sender;
use gdk_pixbuf::Pixbuf;
use sectioned::error::SliderError;
use sectioned::events::SliderEvent;
use sectioned::geometry::Point;
use sectioned::host::SliderController;
use sectioned::slider::{SectionedSlider, SliderConfig};
use sectioned::transition::{Transition, TransitionFrame, TransitionMode};
use std::path::Path;
use std::time::Duration;

/// Where a press landed; decides what its release means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Slider,
    Button,
    Backdrop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogOutcome {
    Confirmed(f64),
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerAction {
    pub should_redraw: bool,
    pub outcome: Option<DialogOutcome>,
}

impl PointerAction {
    pub fn new(should_redraw: bool, outcome: Option<DialogOutcome>) -> Self {
        Self {
            should_redraw,
            outcome,
        }
    }

    fn redraw() -> Self {
        Self::new(true, None)
    }

    fn finish(outcome: DialogOutcome) -> Self {
        Self::new(true, Some(outcome))
    }
}

/// Transition in flight, timed against the frame clock.
#[derive(Debug, Clone, Copy)]
struct Animation {
    transition: Transition,
    started_us: Option<i64>,
    frame: TransitionFrame,
}

/// One presentation of the slider dialog.
pub struct DialogState {
    pub controller: SliderController,
    pub icon: Option<Pixbuf>,
    slider: Option<SectionedSlider>,
    layout: Option<DialogLayout>,
    pressed: Option<PointerTarget>,
    animation: Option<Animation>,
    closing: bool,
    events: Sender<SliderEvent>,
}

impl DialogState {
    pub fn new(controller: SliderController, events: Sender<SliderEvent>) -> Self {
        let icon = controller.options().icon.as_deref().and_then(Self::load_icon);
        Self {
            controller,
            icon,
            slider: None,
            layout: None,
            pressed: None,
            animation: None,
            closing: false,
            events,
        }
    }

    fn load_icon(path: &Path) -> Option<Pixbuf> {
        Pixbuf::from_file_at_scale(path, ICON_SIZE, ICON_SIZE, true)
            .inspect_err(|e| log::warn!("Failed to load icon {}: {}", path.display(), e))
            .ok()
    }

    pub fn layout(&self) -> Option<&DialogLayout> {
        self.layout.as_ref()
    }

    pub fn slider(&self) -> Option<&SectionedSlider> {
        self.slider.as_ref()
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Point the transition scales around: the middle of the drawing area.
    pub fn pivot(&self) -> Option<Point> {
        self.layout.map(|l| l.bounds.center())
    }

    /// Lays the dialog out for a new drawing area size. The slider is created
    /// on the first usable size and only moved afterwards.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.layout = DialogLayout::compute(width, height);
        let Some(layout) = self.layout else {
            return;
        };

        let result = match self.slider.as_mut() {
            Some(slider) => slider.set_bounds(layout.slider),
            None => self.build_slider(&layout).map(|slider| {
                self.slider = Some(slider);
            }),
        };
        if let Err(e) = result {
            log::error!("Failed to lay out slider: {}", e);
        }
    }

    fn build_slider(&self, layout: &DialogLayout) -> Result<SectionedSlider, SliderError> {
        SectionedSlider::new(
            SliderConfig {
                bounds: layout.slider,
                selected_section: self.controller.initial_section(),
                sections: self.controller.sections(),
                half_sections: self.controller.options().half_sections,
                accent: self.controller.accent(),
            },
            self.events.clone(),
        )
    }

    fn target_at(&self, point: Point) -> PointerTarget {
        if self.slider.as_ref().is_some_and(|s| s.contains(point)) {
            PointerTarget::Slider
        } else if self.layout.is_some_and(|l| l.hits_button(point)) {
            PointerTarget::Button
        } else {
            PointerTarget::Backdrop
        }
    }

    pub fn press(&mut self, point: Point) -> PointerAction {
        if self.closing {
            return PointerAction::default();
        }
        let target = self.target_at(point);
        self.pressed = Some(target);

        match (target, self.slider.as_mut()) {
            (PointerTarget::Slider, Some(slider)) => {
                PointerAction::new(slider.touch_began(point).should_redraw, None)
            }
            _ => PointerAction::default(),
        }
    }

    pub fn motion(&mut self, point: Point) -> PointerAction {
        match (self.pressed, self.slider.as_mut()) {
            (Some(PointerTarget::Slider), Some(slider)) => {
                PointerAction::new(slider.drag(point).should_redraw, None)
            }
            _ => PointerAction::default(),
        }
    }

    pub fn release(&mut self, point: Point) -> PointerAction {
        let Some(pressed) = self.pressed.take() else {
            return PointerAction::default();
        };

        match pressed {
            PointerTarget::Slider => {
                if let Some(slider) = self.slider.as_mut() {
                    slider.touch_ended(point);
                }
                PointerAction::default()
            }
            PointerTarget::Button if self.target_at(point) == PointerTarget::Button => {
                PointerAction::finish(DialogOutcome::Confirmed(self.controller.confirm()))
            }
            PointerTarget::Backdrop if self.target_at(point) == PointerTarget::Backdrop => {
                PointerAction::finish(DialogOutcome::Cancelled)
            }
            _ => PointerAction::default(),
        }
    }

    pub fn cancel_pointer(&mut self) {
        if self.pressed.take() == Some(PointerTarget::Slider)
            && let Some(slider) = self.slider.as_mut()
        {
            slider.touch_cancelled();
        }
    }

    pub fn on_slider_event(&mut self, event: SliderEvent) -> PointerAction {
        if self.closing {
            return PointerAction::default();
        }
        match event {
            SliderEvent::SectionChanged(section) => {
                self.controller.on_section_changed(section);
                PointerAction::redraw()
            }
            SliderEvent::DoubleTapped(_) => {
                PointerAction::finish(DialogOutcome::Confirmed(self.controller.confirm()))
            }
        }
    }

    pub fn present(&mut self) {
        self.start_transition(TransitionMode::Present);
    }

    /// Starts the dismiss transition; input is ignored from here on.
    pub fn dismiss(&mut self) {
        self.closing = true;
        self.cancel_pointer();
        self.start_transition(TransitionMode::Dismiss);
    }

    fn start_transition(&mut self, mode: TransitionMode) {
        let transition = Transition::new(mode);
        self.animation = Some(Animation {
            transition,
            started_us: None,
            frame: transition.frame(Duration::ZERO),
        });
    }

    /// Advances the running transition to `frame_time_us` (frame clock time in
    /// microseconds). Returns `true` once it has finished.
    pub fn advance(&mut self, frame_time_us: i64) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return true;
        };
        let started = *animation.started_us.get_or_insert(frame_time_us);
        let elapsed = Duration::from_micros((frame_time_us - started).max(0) as u64);

        animation.frame = animation.transition.frame(elapsed);
        let finished = animation.transition.is_finished(elapsed);
        if finished && animation.transition.mode == TransitionMode::Present {
            self.animation = None;
        }
        finished
    }

    /// Current scale and opacity of the dialog.
    pub fn frame(&self) -> TransitionFrame {
        self.animation.map(|a| a.frame).unwrap_or(TransitionFrame {
            scale: 1.0,
            alpha: 1.0,
        })
    }
}
