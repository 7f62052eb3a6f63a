use thiserror::Error;

use crate::sections::MIN_SECTIONS;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SliderError {
    #[error("Slider needs at least {min} sections, got {0}", min = MIN_SECTIONS)]
    TooFewSections(usize),
    #[error("Section {section} is out of range for {sections} sections")]
    SectionOutOfRange { section: usize, sections: usize },
    #[error("Slider bounds must have a positive size, got {width}x{height}")]
    EmptyBounds { width: f64, height: f64 },
    #[error("Slider of height {height} is too short for {sections} sections")]
    BandsTooThin { height: f64, sections: usize },
    #[error("Divider must be a positive number, got {0}")]
    InvalidDivider(f64),
}
