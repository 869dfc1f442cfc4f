//! Plain data types shared between the engine, the code that feeds it
//! settings, and whatever renders its frames.

use crate::error::InvalidInput;
use crate::palette::Palette;
use crate::timing::Timing;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 24-bit RGB colour.  Serialised as an upper-case `#RRGGBB` string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour(pub [u8; 3]);

impl Colour {
    /// Black, which is also how an unlit slot is represented
    pub const OFF: Colour = Colour([0, 0, 0]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn is_off(&self) -> bool {
        *self == Self::OFF
    }
}

impl FromStr for Colour {
    type Err = InvalidInput;

    /// Accepts `#RRGGBB` or `RRGGBB`, either case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidInput::MalformedColour(s.to_string()));
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self([r, g, b])),
            _ => Err(InvalidInput::MalformedColour(s.to_string())),
        }
    }
}

impl TryFrom<String> for Colour {
    type Error = InvalidInput;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

/// A user-authored setting, as produced by the app and posted to the fixture.
/// The engine only reads `colors`, `flashing_pattern` and `delay_time`; the
/// white and brightness channels travel with it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    #[serde(default)]
    pub name: String,
    pub colors: Vec<Colour>,
    #[serde(default)]
    pub white_values: Vec<i32>,
    #[serde(default)]
    pub brightness_values: Vec<i32>,
    pub flashing_pattern: String,
    /// Delay unit in milliseconds
    pub delay_time: i64,
}

impl Setting {
    /// Check everything a run needs plus the channel-length invariant.  The
    /// white and brightness channels may be left empty, but if present they
    /// must have one entry per colour.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        self.palette()?;
        self.timing()?;

        let channels = [
            ("whiteValues", self.white_values.len()),
            ("brightnessValues", self.brightness_values.len()),
        ];
        for (channel, values) in channels {
            if values != 0 && values != self.colors.len() {
                return Err(InvalidInput::ChannelLength {
                    channel,
                    colours: self.colors.len(),
                    values,
                });
            }
        }
        Ok(())
    }

    pub fn palette(&self) -> Result<Palette, InvalidInput> {
        Palette::new(self.colors.clone())
    }

    pub fn timing(&self) -> Result<Timing, InvalidInput> {
        Timing::from_millis(self.delay_time)
    }
}
