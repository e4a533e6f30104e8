use crate::foundation::core::Rgba8;
use crate::foundation::error::{CuepathError, CuepathResult};

/// Linear interpolation between two values of the same kind.
pub trait Lerp: Sized {
    /// Interpolate from `a` (at `t = 0`) to `b` (at `t = 1`). `t` may leave `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    // Exact at both ends: `t == 1` yields `b` bit for bit.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a * (1.0 - t) + b * t
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// A property value written onto a stage target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Scalar property (position, scale, opacity, radius, dash offset, ...).
    Number(f64),
    /// Color property (`fill`, `stroke`).
    Color(Rgba8),
}

impl PropValue {
    /// Numeric payload, if this is a number.
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(v),
            Self::Color(_) => None,
        }
    }

    /// Color payload, if this is a color.
    pub fn as_color(self) -> Option<Rgba8> {
        match self {
            Self::Color(c) => Some(c),
            Self::Number(_) => None,
        }
    }

    /// Neutral value of the same kind, used when a property has never been written.
    pub fn zero_like(self) -> Self {
        match self {
            Self::Number(_) => Self::Number(0.0),
            Self::Color(_) => Self::Color(Rgba8::transparent()),
        }
    }

    /// Interpolate two values of matching kinds.
    pub fn interpolate(a: Self, b: Self, t: f64) -> CuepathResult<Self> {
        match (a, b) {
            (Self::Number(a), Self::Number(b)) => Ok(Self::Number(f64::lerp(&a, &b, t))),
            (Self::Color(a), Self::Color(b)) => Ok(Self::Color(Rgba8::lerp(&a, &b, t))),
            (a, b) => Err(CuepathError::validation(format!(
                "cannot interpolate between {a:?} and {b:?}"
            ))),
        }
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Rgba8> for PropValue {
    fn from(value: Rgba8) -> Self {
        Self::Color(value)
    }
}

/// End value of a tweened property.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropTarget {
    /// Tween to this value.
    To(PropValue),
    /// Tween by a delta relative to the value the property holds when the cue starts.
    By(f64),
    /// Jump to `from` when the cue starts, then tween to `to`.
    FromTo {
        /// Value written when the cue starts.
        from: PropValue,
        /// End value.
        to: PropValue,
    },
}

impl PropTarget {
    /// Parse the authored shorthand `"+=80"` / `"-=80"` into a relative delta.
    pub fn relative(expr: &str) -> CuepathResult<Self> {
        let expr = expr.trim();
        let (sign, rest) = if let Some(rest) = expr.strip_prefix("+=") {
            (1.0, rest)
        } else if let Some(rest) = expr.strip_prefix("-=") {
            (-1.0, rest)
        } else {
            return Err(CuepathError::validation(format!(
                "relative value must start with '+=' or '-=' (got \"{expr}\")"
            )));
        };
        let delta = rest.trim().parse::<f64>().map_err(|e| {
            CuepathError::validation(format!("invalid relative value \"{expr}\": {e}"))
        })?;
        Ok(Self::By(sign * delta))
    }

    /// Resolve `(from, to)` given the property's value at cue start.
    pub fn resolve(self, base: PropValue) -> CuepathResult<(PropValue, PropValue)> {
        match self {
            Self::To(to) => Ok((base, to)),
            Self::By(delta) => match base {
                PropValue::Number(v) => Ok((base, PropValue::Number(v + delta))),
                PropValue::Color(_) => Err(CuepathError::validation(
                    "relative deltas apply to numeric properties only",
                )),
            },
            Self::FromTo { from, to } => Ok((from, to)),
        }
    }

    /// Value kind used when the property has not been written yet.
    pub fn kind_hint(self) -> PropValue {
        match self {
            Self::To(v) | Self::FromTo { to: v, .. } => v.zero_like(),
            Self::By(_) => PropValue::Number(0.0),
        }
    }
}

impl From<f64> for PropTarget {
    fn from(value: f64) -> Self {
        Self::To(PropValue::Number(value))
    }
}

impl From<Rgba8> for PropTarget {
    fn from(value: Rgba8) -> Self {
        Self::To(PropValue::Color(value))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
