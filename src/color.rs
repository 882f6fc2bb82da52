//! Particle tint parsing.

use crate::{constants::DEFAULT_COLOR, Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Colors offered by the appearance panel
pub const PALETTE: [&str; 3] = [DEFAULT_COLOR, "#ff0055", "#ffff00"];

/// 8-bit RGB tint, serialized as a `#rrggbb` string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to [0, 1] for a material uniform
    #[must_use]
    pub fn to_linear_array(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::new(0x00, 0xff, 0xcc)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Accepts `#rrggbb`, `rrggbb`, `#rgb` and `rgb`.
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || Error::InvalidInput(format!("Invalid color '{s}', expected #rrggbb"));

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::new(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
                Ok(Self::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#00ffcc".parse::<Rgb>().unwrap(), Rgb::new(0, 255, 204));
        assert_eq!("FF0055".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 85));
        assert_eq!("#ff0".parse::<Rgb>().unwrap(), Rgb::new(255, 255, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("#00ffc".parse::<Rgb>().is_err());
        assert!("#00ffzz".parse::<Rgb>().is_err());
        assert!("".parse::<Rgb>().is_err());
        assert!("#ééé".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_palette_parses() {
        for hex in PALETTE {
            let color: Rgb = hex.parse().unwrap();
            assert_eq!(color.to_string(), hex);
        }
        assert_eq!(Rgb::default().to_string(), DEFAULT_COLOR);
    }

    #[test]
    fn test_linear_array() {
        assert_eq!(Rgb::new(255, 0, 0).to_linear_array(), [1.0, 0.0, 0.0]);
    }
}
