//! Easing curves mapping normalized progress `[0, 1]` to eased progress.
//!
//! Curves are named with the notation the landing choreography is authored in
//! (`"power2.in"`, `"elastic.out(1, 0.5)"`, `"slow(0.3, 0.7, false)"`); [`Ease`] parses from and
//! serializes to that notation.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{CuepathError, CuepathResult};

/// Easing functions used to map normalized animation progress.
///
/// Every curve satisfies `apply(0.0) == 0.0` and `apply(1.0) == 1.0` exactly; overshooting
/// curves (elastic, slow-mo middle) may leave `[0, 1]` in between.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Linear interpolation (`"none"`).
    Linear,
    /// Quadratic ease-in (`"power1.in"`).
    InQuad,
    /// Quadratic ease-out (`"power1.out"`).
    OutQuad,
    /// Quadratic ease-in/out (`"power1.inOut"`).
    InOutQuad,
    /// Cubic ease-in (`"power2.in"`).
    InCubic,
    /// Cubic ease-out (`"power2.out"`).
    OutCubic,
    /// Cubic ease-in/out (`"power2.inOut"`).
    InOutCubic,
    /// Quartic ease-in (`"power3.in"`).
    InQuart,
    /// Quartic ease-out (`"power3.out"`).
    OutQuart,
    /// Quartic ease-in/out (`"power3.inOut"`).
    InOutQuart,
    /// Sine ease-in.
    InSine,
    /// Sine ease-out.
    OutSine,
    /// Sine ease-in/out.
    InOutSine,
    /// Circular ease-out.
    OutCirc,
    /// Overshoot-and-settle oscillation.
    ElasticOut {
        /// Oscillation amplitude; values below 1 are folded into the period.
        amplitude: f64,
        /// Oscillation period in normalized time.
        period: f64,
    },
    /// Decaying parabolic bounces settling on 1.
    BounceOut,
    /// Fast edges around a slow linear middle section spanning `linear_ratio` of the
    /// timeline. `power` (0..=1) controls how strongly the middle is slowed.
    SlowMo {
        /// Fraction of the timeline spent in the linear middle section.
        linear_ratio: f64,
        /// Strength of the slowdown in the middle section.
        power: f64,
    },
}

impl Default for Ease {
    fn default() -> Self {
        Self::OutQuad
    }
}

impl Ease {
    /// Build a validated elastic-out curve.
    pub fn elastic_out(amplitude: f64, period: f64) -> CuepathResult<Self> {
        let ease = Self::ElasticOut { amplitude, period };
        ease.validate()?;
        Ok(ease)
    }

    /// Build a validated slow-mo curve.
    pub fn slow_mo(linear_ratio: f64, power: f64) -> CuepathResult<Self> {
        let ease = Self::SlowMo {
            linear_ratio,
            power,
        };
        ease.validate()?;
        Ok(ease)
    }

    /// Reject parameterized curves whose parameters are out of range.
    pub fn validate(self) -> CuepathResult<()> {
        match self {
            Self::ElasticOut { amplitude, period } => {
                if !(amplitude.is_finite() && amplitude > 0.0) {
                    return Err(CuepathError::easing(format!(
                        "elastic amplitude must be finite and > 0 (got {amplitude})"
                    )));
                }
                if !(period.is_finite() && period > 0.0) {
                    return Err(CuepathError::easing(format!(
                        "elastic period must be finite and > 0 (got {period})"
                    )));
                }
                Ok(())
            }
            Self::SlowMo {
                linear_ratio,
                power,
            } => {
                if !(0.0..=1.0).contains(&linear_ratio) {
                    return Err(CuepathError::easing(format!(
                        "slow-mo linear ratio must be in [0, 1] (got {linear_ratio})"
                    )));
                }
                if !(0.0..=1.0).contains(&power) {
                    return Err(CuepathError::easing(format!(
                        "slow-mo power must be in [0, 1] (got {power})"
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Apply this easing function to normalized progress `t` (clamped to `[0, 1]`).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::InSine => 1.0 - (t * FRAC_PI_2).cos(),
            Self::OutSine => (t * FRAC_PI_2).sin(),
            Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
            Self::BounceOut => bounce_out(t),
            Self::SlowMo {
                linear_ratio,
                power,
            } => slow_mo(t, linear_ratio, power),
        }
    }
}

fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    let a = amplitude.max(1.0);
    let p = period / amplitude.min(1.0);
    // Phase shift so the curve leaves 0 exactly at t = 0.
    let shift = p / TAU * (1.0 / a).asin();
    a * (2f64).powf(-10.0 * t) * ((t - shift) * TAU / p).sin() + 1.0
}

fn bounce_out(t: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

fn slow_mo(t: f64, linear_ratio: f64, power: f64) -> f64 {
    let power = if linear_ratio < 1.0 { power } else { 0.0 };
    let p1 = (1.0 - linear_ratio) / 2.0;
    let p3 = p1 + linear_ratio;
    // `r` is the slowed linear ramp through (0.5, 0.5); the edges blend into it.
    let r = t + (0.5 - t) * power;
    if t < p1 {
        let q = 1.0 - t / p1;
        r - q * q * q * q * r
    } else if t > p3 {
        let q = (t - p3) / p1;
        r + (t - r) * q * q * q * q
    } else {
        r
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("none"),
            Self::InQuad => f.write_str("power1.in"),
            Self::OutQuad => f.write_str("power1.out"),
            Self::InOutQuad => f.write_str("power1.inOut"),
            Self::InCubic => f.write_str("power2.in"),
            Self::OutCubic => f.write_str("power2.out"),
            Self::InOutCubic => f.write_str("power2.inOut"),
            Self::InQuart => f.write_str("power3.in"),
            Self::OutQuart => f.write_str("power3.out"),
            Self::InOutQuart => f.write_str("power3.inOut"),
            Self::InSine => f.write_str("sine.in"),
            Self::OutSine => f.write_str("sine.out"),
            Self::InOutSine => f.write_str("sine.inOut"),
            Self::OutCirc => f.write_str("circ.out"),
            Self::ElasticOut { amplitude, period } => {
                write!(f, "elastic.out({amplitude}, {period})")
            }
            Self::BounceOut => f.write_str("bounce.out"),
            Self::SlowMo {
                linear_ratio,
                power,
            } => write!(f, "slow({linear_ratio}, {power}, false)"),
        }
    }
}

impl FromStr for Ease {
    type Err = CuepathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, args) = match s.split_once('(') {
            Some((name, rest)) => {
                let inner = rest.strip_suffix(')').ok_or_else(|| {
                    CuepathError::easing(format!("unterminated ease arguments in \"{s}\""))
                })?;
                let args = inner
                    .split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .collect::<Vec<_>>();
                (name.trim(), args)
            }
            None => (s, Vec::new()),
        };

        let num = |idx: usize, default: f64| -> CuepathResult<f64> {
            match args.get(idx) {
                None => Ok(default),
                Some(raw) => raw.parse::<f64>().map_err(|e| {
                    CuepathError::easing(format!("invalid ease argument \"{raw}\" in \"{s}\": {e}"))
                }),
            }
        };

        let ease = match name {
            "none" | "linear" => Self::Linear,
            "power1.in" | "quad.in" => Self::InQuad,
            "power1" | "power1.out" | "quad" | "quad.out" => Self::OutQuad,
            "power1.inOut" | "quad.inOut" => Self::InOutQuad,
            "power2.in" | "cubic.in" => Self::InCubic,
            "power2" | "power2.out" | "cubic" | "cubic.out" => Self::OutCubic,
            "power2.inOut" | "cubic.inOut" => Self::InOutCubic,
            "power3.in" | "quart.in" => Self::InQuart,
            "power3" | "power3.out" | "quart" | "quart.out" => Self::OutQuart,
            "power3.inOut" | "quart.inOut" => Self::InOutQuart,
            "sine.in" => Self::InSine,
            "sine" | "sine.out" => Self::OutSine,
            "sine.inOut" => Self::InOutSine,
            "circ" | "circ.out" => Self::OutCirc,
            "elastic" | "elastic.out" => Self::elastic_out(num(0, 1.0)?, num(1, 0.3)?)?,
            "bounce" | "bounce.out" => Self::BounceOut,
            "slow" => {
                if let Some(&yoyo) = args.get(2)
                    && yoyo != "false"
                {
                    return Err(CuepathError::easing(format!(
                        "slow-mo yoyo mode is not supported (in \"{s}\")"
                    )));
                }
                Self::slow_mo(num(0, 0.7)?, num(1, 0.7)?)?
            }
            other => {
                return Err(CuepathError::easing(format!("unknown ease \"{other}\"")));
            }
        };
        Ok(ease)
    }
}

impl TryFrom<String> for Ease {
    type Error = CuepathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
