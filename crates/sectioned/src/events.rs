/// Notifications a [`SectionedSlider`](crate::slider::SectionedSlider) sends to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderEvent {
    SectionChanged(usize),
    DoubleTapped(usize),
}
