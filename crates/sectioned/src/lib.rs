//! Sectioned circular gauge slider: geometry, input mapping, the host value
//! model and the present/dismiss transition, independent of any toolkit.

pub mod macros;

pub mod color;
pub mod corner;
pub mod error;
pub mod events;
pub mod geometry;
pub mod host;
pub mod input;
pub mod sections;
pub mod slider;
pub mod svg;
pub mod transition;

pub use error::SliderError;
pub use events::SliderEvent;
pub use geometry::{Path, Point, Rect};
pub use host::{SliderController, SliderOptions, SliderPalette};
pub use sections::{SliderGeometry, build_geometry};
pub use slider::{SectionedSlider, SliderAction, SliderConfig};
