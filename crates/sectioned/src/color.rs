use palette::{Srgb, Srgba, WithAlpha};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Linear map of `value` from the `from` range onto the `to` range.
pub fn remap(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    (to.1 - to.0) / (from.1 - from.0) * (value - from.0) + to.0
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid hex color '{0}', expected #rrggbb or #rrggbbaa")]
pub struct HexColorError(String);

/// `#rrggbb` / `#rrggbbaa` color as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay)]
pub struct HexColor {
    rgb: Srgb<u8>,
    alpha: u8,
}

impl HexColor {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            rgb: Srgb::new(red, green, blue),
            alpha,
        }
    }

    pub fn to_srgba(self) -> Srgba<f64> {
        self.rgb
            .into_format::<f64>()
            .with_alpha(self.alpha as f64 / 255.0)
    }
}

impl From<HexColor> for Srgba<f64> {
    fn from(color: HexColor) -> Self {
        color.to_srgba()
    }
}

impl FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || HexColorError(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(err());
        }

        let (rgb, alpha) = match hex.len() {
            6 => (hex, 0xff),
            8 => (
                &hex[..6],
                u8::from_str_radix(&hex[6..], 16).map_err(|_| err())?,
            ),
            _ => return Err(err()),
        };
        let rgb = Srgb::<u8>::from_str(rgb).map_err(|_| err())?;
        Ok(Self { rgb, alpha })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.rgb.into_components();
        write!(f, "#{r:02x}{g:02x}{b:02x}")?;
        if self.alpha != 0xff {
            write!(f, "{:02x}", self.alpha)?;
        }
        Ok(())
    }
}
