use crate::foundation::error::{CuepathError, CuepathResult};

pub use kurbo::{BezPath, Point, Vec2};

/// Absolute 0-based frame index used when a host samples the timeline at a fixed rate.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> CuepathResult<Self> {
        if den == 0 {
            return Err(CuepathError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(CuepathError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Timeline time of frame `f` in seconds.
    pub fn frame_to_secs(self, f: FrameIndex) -> f64 {
        (f.0 as f64) * self.frame_duration_secs()
    }

    /// Number of whole frames needed to cover `secs` (ceil), at least one.
    pub fn frames_covering(self, secs: f64) -> u64 {
        ((secs.max(0.0) * self.as_f64()).ceil() as u64).max(1)
    }
}

/// Straight-alpha RGBA8 color as authored in style properties (`fill`, `stroke`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Parse a CSS-style color: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` or one
    /// of a handful of named colors.
    pub fn parse(s: &str) -> CuepathResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            let args = args
                .strip_suffix(')')
                .ok_or_else(|| CuepathError::validation(format!("unterminated color \"{s}\"")))?;
            return parse_rgb_args(args, s);
        }
        named(&lower).ok_or_else(|| CuepathError::validation(format!("unknown color \"{s}\"")))
    }

    /// Lowercase `#rrggbbaa` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

fn parse_hex(hex: &str) -> CuepathResult<Rgba8> {
    fn byte(pair: &str) -> CuepathResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| CuepathError::validation(format!("invalid hex byte \"{pair}\"")))
    }
    fn nibble(c: &str) -> CuepathResult<u8> {
        Ok(byte(c)? * 17)
    }

    if !hex.is_ascii() {
        return Err(CuepathError::validation(format!(
            "invalid hex color \"#{hex}\""
        )));
    }
    match hex.len() {
        3 => Ok(Rgba8::rgb(
            nibble(&hex[0..1])?,
            nibble(&hex[1..2])?,
            nibble(&hex[2..3])?,
        )),
        6 => Ok(Rgba8::rgb(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: byte(&hex[0..2])?,
            g: byte(&hex[2..4])?,
            b: byte(&hex[4..6])?,
            a: byte(&hex[6..8])?,
        }),
        _ => Err(CuepathError::validation(
            "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
        )),
    }
}

fn parse_rgb_args(args: &str, original: &str) -> CuepathResult<Rgba8> {
    let parts = args
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CuepathError::validation(format!("invalid color \"{original}\": {e}")))?;
    let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    match parts.as_slice() {
        [r, g, b] => Ok(Rgba8::rgb(channel(*r), channel(*g), channel(*b))),
        [r, g, b, a] => Ok(Rgba8 {
            r: channel(*r),
            g: channel(*g),
            b: channel(*b),
            a: (a.clamp(0.0, 1.0) * 255.0).round() as u8,
        }),
        _ => Err(CuepathError::validation(format!(
            "color \"{original}\" must have 3 or 4 components"
        ))),
    }
}

fn named(name: &str) -> Option<Rgba8> {
    Some(match name {
        "transparent" => Rgba8::transparent(),
        "black" => Rgba8::rgb(0, 0, 0),
        "white" => Rgba8::rgb(255, 255, 255),
        "red" => Rgba8::rgb(255, 0, 0),
        "green" => Rgba8::rgb(0, 128, 0),
        "blue" => Rgba8::rgb(0, 0, 255),
        "yellow" => Rgba8::rgb(255, 255, 0),
        "gray" | "grey" => Rgba8::rgb(128, 128, 128),
        _ => return None,
    })
}

impl serde::Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
