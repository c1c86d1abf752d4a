// Terminal colors with mixing and contrast.
//
// A `Color` prints as a bold dot in 24-bit ANSI color. Adding two colors
// mixes them channel-wise (saturating at 255), and `contrast` pulls every
// channel toward or away from mid-grey.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use anyhow::{Context, Result};

const START: &str = "\x1b[1;38;2";
const END: &str = "\x1b[0";
const MOD: &str = "m";

/// An RGB color. Channels are guaranteed to be in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    /// Build a color from raw channel values, rejecting anything outside 0..=255.
    pub fn new(red: i64, green: i64, blue: i64) -> Result<Self> {
        Ok(Self {
            red: channel("red", red)?,
            green: channel("green", green)?,
            blue: channel("blue", blue)?,
        })
    }

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Apply a contrast level in [0, 1]. 1.0 leaves the color unchanged,
    /// 0.0 collapses every channel to mid-grey.
    pub fn contrast(&self, level: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&level) {
            anyhow::bail!("Contrast level must be within [0, 1], got {level}");
        }

        let cl = -256.0 * (1.0 - level);
        let factor = 259.0 * (cl + 255.0) / (255.0 * (259.0 - cl));
        let adjust = |x: u8| -> u8 {
            let value = (factor * (f64::from(x) - 128.0) + 128.0).trunc();
            value.clamp(0.0, 255.0) as u8
        };

        Ok(Self {
            red: adjust(self.red),
            green: adjust(self.green),
            blue: adjust(self.blue),
        })
    }
}

fn channel(name: &str, value: i64) -> Result<u8> {
    u8::try_from(value)
        .map_err(|_| anyhow::anyhow!("{name} channel must be within 0..=255, got {value}"))
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{START};{};{};{}{MOD}\u{25cf}{END}{MOD}",
            self.red, self.green, self.blue
        )
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color {
            red: self.red.saturating_add(other.red),
            green: self.green.saturating_add(other.green),
            blue: self.blue.saturating_add(other.blue),
        }
    }
}

impl Sum for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Color {
        iter.fold(Color::default(), Add::add)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    /// Accepts `r,g,b` or `#rrggbb`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                anyhow::bail!("Hex color must look like #rrggbb, got {s:?}");
            }
            let part = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16)
                    .with_context(|| format!("Invalid hex digits in {s:?}"))
            };
            return Ok(Color::rgb(part(0..2)?, part(2..4)?, part(4..6)?));
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            anyhow::bail!("Color must have three channels (r,g,b), got {s:?}");
        }
        let mut values = [0i64; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .with_context(|| format!("Invalid channel value {part:?}"))?;
        }
        Color::new(values[0], values[1], values[2])
    }
}
