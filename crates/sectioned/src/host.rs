//! Value model of the surface that presents a slider: turns a start value and
//! a divider into sections, and sections back into the value handed to the
//! caller on confirm.

use crate::color::HexColor;
use crate::error::SliderError;
use crate::sections::MIN_SECTIONS;
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{Srgb, Srgba, WithAlpha};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::PathBuf;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Title(String);

crate::impl_label_newtype!(Title);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ButtonTitle(String);

crate::impl_label_newtype!(ButtonTitle);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum BlurStyle {
    #[strum(serialize = "None", serialize = "off", serialize = "-1")]
    None,
    #[strum(
        serialize = "ExtraLight",
        serialize = "extra-light",
        serialize = "extra_light",
        serialize = "0"
    )]
    ExtraLight,
    #[default]
    #[strum(serialize = "Light", serialize = "1")]
    Light,
    #[strum(serialize = "Dark", serialize = "2")]
    Dark,
}

impl BlurStyle {
    /// Tint laid over the host content, or `None` when the palette
    /// background should be painted opaque instead.
    pub fn tint(&self) -> Option<Srgba<f64>> {
        match self {
            Self::None => None,
            Self::ExtraLight => Some(Srgba::new(0.97, 0.97, 0.97, 0.85)),
            Self::Light => Some(Srgba::new(0.93, 0.93, 0.93, 0.7)),
            Self::Dark => Some(Srgba::new(0.1, 0.1, 0.1, 0.7)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderPalette {
    pub title: Srgba<f64>,
    pub value: Srgba<f64>,
    pub background: Srgba<f64>,
    pub track: Srgba<f64>,
    pub accent: Srgba<f64>,
}

impl Default for SliderPalette {
    fn default() -> Self {
        Self {
            title: Srgba::new(0.0, 0.0, 0.0, 1.0),
            value: Srgba::new(0.0, 0.0, 0.0, 1.0),
            background: Srgba::new(1.0, 1.0, 1.0, 1.0),
            track: Srgba::new(0.0, 0.0, 0.0, 0.5),
            accent: Srgba::new(1.0, 1.0, 0.0, 1.0),
        }
    }
}

/// Config-file form of [`SliderPalette`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub title: HexColor,
    pub value: HexColor,
    pub background: HexColor,
    pub track: HexColor,
    pub accent: HexColor,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            title: HexColor::new(0, 0, 0, 0xff),
            value: HexColor::new(0, 0, 0, 0xff),
            background: HexColor::new(0xff, 0xff, 0xff, 0xff),
            track: HexColor::new(0, 0, 0, 0x80),
            accent: HexColor::new(0xff, 0xff, 0, 0xff),
        }
    }
}

impl From<PaletteConfig> for SliderPalette {
    fn from(config: PaletteConfig) -> Self {
        Self {
            title: config.title.into(),
            value: config.value.into(),
            background: config.background.into(),
            track: config.track.into(),
            accent: config.accent.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderOptions {
    pub title: Option<Title>,
    pub button_title: Option<ButtonTitle>,
    pub icon: Option<PathBuf>,
    pub start_value: f64,
    /// Number of whole steps; doubled internally when `half_sections` is set.
    pub sections: usize,
    pub half_sections: bool,
    pub divider: f64,
    pub palette: SliderPalette,
    pub blur_style: BlurStyle,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            title: None,
            button_title: None,
            icon: None,
            start_value: 1.0,
            sections: 10,
            half_sections: true,
            divider: 0.5,
            palette: SliderPalette::default(),
            blur_style: BlurStyle::default(),
        }
    }
}

/// Rounds `value` to a multiple of `divider`, halves rounding up.
pub fn round_to_divider(value: f64, divider: f64) -> f64 {
    let remainder = value % divider;
    let rounded = value - remainder;
    if remainder >= divider / 2.0 {
        rounded + divider
    } else {
        rounded
    }
}

/// Whole values print without a fraction, everything else as is.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderController {
    options: SliderOptions,
    current_value: f64,
}

impl SliderController {
    pub fn new(options: SliderOptions) -> Result<Self, SliderError> {
        if !(options.divider.is_finite() && options.divider > 0.0) {
            return Err(SliderError::InvalidDivider(options.divider));
        }
        let sections = effective_sections(options.sections, options.half_sections);
        if sections < MIN_SECTIONS {
            return Err(SliderError::TooFewSections(sections));
        }

        let start = round_to_divider(options.start_value, options.divider);
        let mut controller = Self {
            options,
            current_value: start,
        };
        // snap onto a value the gauge can show
        let section = controller.section_for_value(start);
        controller.current_value = controller.value_for_section(section);
        Ok(controller)
    }

    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    pub fn palette(&self) -> &SliderPalette {
        &self.options.palette
    }

    pub fn accent(&self) -> Srgb<f64> {
        self.options.palette.accent.color
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// Number of bands drawn by the slider.
    pub fn sections(&self) -> usize {
        effective_sections(self.options.sections, self.options.half_sections)
    }

    /// Value covered by one band.
    pub fn step(&self) -> f64 {
        if self.options.half_sections {
            self.options.divider / 2.0
        } else {
            self.options.divider
        }
    }

    /// Value shown while `section` is selected: one step per lit band.
    pub fn value_for_section(&self, section: usize) -> f64 {
        (section + 1) as f64 * self.step()
    }

    pub fn section_for_value(&self, value: f64) -> usize {
        let lit = (value / self.step()).round();
        (lit.max(1.0) as usize - 1).min(self.sections() - 1)
    }

    pub fn initial_section(&self) -> usize {
        self.section_for_value(self.current_value)
    }

    pub fn on_section_changed(&mut self, section: usize) -> f64 {
        self.current_value = self.value_for_section(section);
        self.current_value
    }

    pub fn value_label(&self) -> String {
        format_value(self.current_value)
    }

    /// Value handed back to the caller when the user saves.
    pub fn confirm(&self) -> f64 {
        log::info!("Value changed: {}", self.current_value);
        self.current_value
    }

    pub fn backdrop(&self) -> Srgba<f64> {
        self.options
            .blur_style
            .tint()
            .unwrap_or(self.options.palette.background)
    }

    pub fn button_accent(&self) -> Srgba<f64> {
        self.accent().with_alpha(1.0)
    }
}

fn effective_sections(sections: usize, half_sections: bool) -> usize {
    if half_sections {
        sections * 2
    } else {
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(start: f64, sections: usize, half: bool, divider: f64) -> SliderController {
        SliderController::new(SliderOptions {
            start_value: start,
            sections,
            half_sections: half,
            divider,
            ..SliderOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn test_round_to_divider() {
        assert_eq!(round_to_divider(5.2121313, 1.0), 5.0);
        assert_eq!(round_to_divider(5.5, 1.0), 6.0);
        assert_eq!(round_to_divider(1.2, 0.5), 1.0);
        assert_eq!(round_to_divider(1.3, 0.5), 1.5);
        assert_eq!(round_to_divider(4.0, 2.0), 4.0);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(5.0), "5");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(0.0), "0");
    }

    #[test]
    fn test_half_sections_double_the_bands() {
        let half = controller(5.2121313, 10, true, 1.0);
        assert_eq!(half.sections(), 20);
        assert_eq!(half.step(), 0.5);
        assert_eq!(half.current_value(), 5.0);
        assert_eq!(half.initial_section(), 9);
        assert_eq!(half.value_for_section(half.initial_section()), 5.0);

        let full = controller(3.0, 10, false, 1.0);
        assert_eq!(full.sections(), 10);
        assert_eq!(full.initial_section(), 2);
    }

    #[test]
    fn test_section_value_round_trip() {
        let c = controller(1.0, 10, true, 0.5);
        for section in 0..c.sections() {
            assert_eq!(c.section_for_value(c.value_for_section(section)), section);
        }
        assert_eq!(c.section_for_value(0.0), 0);
        assert_eq!(c.section_for_value(1000.0), c.sections() - 1);
    }

    #[test]
    fn test_start_value_snaps_to_lit_bands() {
        let empty = controller(0.0, 10, false, 1.0);
        assert_eq!(empty.initial_section(), 0);
        assert_eq!(empty.current_value(), 1.0);
        assert_eq!(empty.value_label(), "1");

        let over = controller(100.0, 10, false, 1.0);
        assert_eq!(over.initial_section(), 9);
        assert_eq!(over.current_value(), 10.0);
        assert_eq!(over.confirm(), 10.0);

        let half = controller(-3.0, 4, true, 2.0);
        assert_eq!(half.current_value(), 1.0);
    }

    #[test]
    fn test_section_changes_update_value() {
        let mut c = controller(1.0, 10, true, 1.0);
        assert_eq!(c.on_section_changed(4), 2.5);
        assert_eq!(c.value_label(), "2.5");
        assert_eq!(c.on_section_changed(5), 3.0);
        assert_eq!(c.value_label(), "3");
        assert_eq!(c.confirm(), 3.0);
    }

    #[test]
    fn test_rejects_bad_options() {
        let bad_divider = SliderController::new(SliderOptions {
            divider: 0.0,
            ..SliderOptions::default()
        });
        assert_eq!(bad_divider, Err(SliderError::InvalidDivider(0.0)));

        let too_few = SliderController::new(SliderOptions {
            sections: 3,
            half_sections: false,
            ..SliderOptions::default()
        });
        assert_eq!(too_few, Err(SliderError::TooFewSections(3)));
    }

    #[test]
    fn test_blur_style_deserialization() {
        let cases = vec![
            ("\"light\"", BlurStyle::Light),
            ("\"Light\"", BlurStyle::Light),
            ("\"DARK\"", BlurStyle::Dark),
            ("\"extra-light\"", BlurStyle::ExtraLight),
            ("\"ExtraLight\"", BlurStyle::ExtraLight),
            ("\"none\"", BlurStyle::None),
            ("\"-1\"", BlurStyle::None),
            ("\"2\"", BlurStyle::Dark),
        ];

        for (json, expected) in cases {
            let deserialized: BlurStyle = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_backdrop_uses_background_without_blur() {
        let palette = SliderPalette {
            background: Srgba::new(0.2, 0.3, 0.4, 1.0),
            ..SliderPalette::default()
        };
        let c = SliderController::new(SliderOptions {
            blur_style: BlurStyle::None,
            palette,
            ..SliderOptions::default()
        })
        .unwrap();
        assert_eq!(c.backdrop(), palette.background);
    }

    #[test]
    fn test_palette_config_converts() {
        let palette = SliderPalette::from(PaletteConfig::default());
        assert_eq!(palette.track.alpha, 128.0 / 255.0);
        assert_eq!(palette.accent.red, 1.0);
        assert_eq!(palette.accent.blue, 0.0);
    }
}
