//! Letter-touch impact: the burst played whenever the ball strikes a letter.

use crate::animation::ease::Ease;
use crate::foundation::core::Rgba8;
use crate::timeline::cue::CueDef;

/// The ball.
pub const BALL: &str = "ball";
/// Group holding the impact lines.
pub const LINES: &str = "lines";
/// Number of impact lines (`line0` .. `line4`).
pub const LINE_COUNT: usize = 5;
/// Ball tint while squashed.
pub const SQUASH_FILL: Rgba8 = Rgba8::rgb(0xfa, 0xa9, 0xa9);

const TEXT_WIGGLE_SECS: f64 = 0.3;
const SQUASH_SECS: f64 = 0.05;
const BURST_SECS: f64 = 0.5;
const FADE_DELAY_SECS: f64 = 0.1;

/// Line endpoints before a burst.
pub const LINE_REST: [&[(&str, f64)]; LINE_COUNT] = [
    &[("x2", 197.0)],
    &[("x1", 203.0)],
    &[("y2", 407.0)],
    &[("y2", 406.5), ("x2", 196.4)],
    &[("y2", 407.0), ("x2", 202.8)],
];

/// Line endpoints at the end of a burst.
pub const LINE_BURST: [&[(&str, f64)]; LINE_COUNT] = [
    &[("x2", 183.0)],
    &[("x1", 216.2)],
    &[("y2", 421.0)],
    &[("y2", 416.2), ("x2", 186.7)],
    &[("y2", 416.6), ("x2", 212.5)],
];

/// Identifier of impact line `idx`.
pub fn line_name(idx: usize) -> String {
    format!("line{idx}")
}

/// How the struck letter reacts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wiggle {
    /// Rotation to tween to, in degrees.
    pub rotation: Option<f64>,
    /// Vertical scale to tween to.
    pub scale_y: Option<f64>,
    /// Curve of the wiggle.
    pub ease: Ease,
}

impl Default for Wiggle {
    fn default() -> Self {
        Self {
            rotation: None,
            scale_y: None,
            ease: Ease::ElasticOut {
                amplitude: 1.0,
                period: 0.5,
            },
        }
    }
}

impl Wiggle {
    /// Rotate the letter to `degrees`.
    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Squash the letter vertically to `scale_y`.
    pub fn squash(mut self, scale_y: f64) -> Self {
        self.scale_y = Some(scale_y);
        self
    }
}

/// Cues for one impact on `letter` at `at`: the letter wiggle, a squash of the ball (out and
/// back), the impact lines snapped to rest and burst outward, and the line group fading out.
pub fn letter_touch(letter: &str, at: f64, wiggle: Wiggle) -> Vec<CueDef> {
    let mut cues = Vec::with_capacity(4 + 2 * LINE_COUNT);

    if wiggle.rotation.is_some() || wiggle.scale_y.is_some() {
        let mut text = CueDef::tween(letter, at, TEXT_WIGGLE_SECS).ease(wiggle.ease);
        if let Some(rotation) = wiggle.rotation {
            text = text.prop("rotation", rotation);
        }
        if let Some(scale_y) = wiggle.scale_y {
            text = text.prop("scale_y", scale_y);
        }
        cues.push(text);
    }

    cues.push(
        CueDef::tween(BALL, at, SQUASH_SECS)
            .prop("scale_x", 1.4)
            .prop("scale_y", 0.6)
            .prop("fill", SQUASH_FILL)
            .repeat(1, true),
    );

    cues.push(CueDef::set(LINES, at).prop("opacity", 1.0));
    for (idx, rest) in LINE_REST.iter().enumerate() {
        let cue = rest
            .iter()
            .fold(CueDef::set(line_name(idx), at), |cue, (attr, v)| cue.prop(*attr, *v));
        cues.push(cue);
    }
    for (idx, burst) in LINE_BURST.iter().enumerate() {
        let cue = burst
            .iter()
            .fold(CueDef::tween(line_name(idx), at, BURST_SECS), |cue, (attr, v)| {
                cue.prop(*attr, *v)
            });
        cues.push(cue);
    }
    cues.push(CueDef::tween(LINES, at + FADE_DELAY_SECS, BURST_SECS).prop("opacity", 0.0));

    cues
}

/// Deform the ball for the duration of a leg (`scale_x` / `scale_y`, default curve).
pub fn stretch(at: f64, duration: f64, scale_x: f64, scale_y: f64) -> CueDef {
    CueDef::tween(BALL, at, duration)
        .prop("scale_x", scale_x)
        .prop("scale_y", scale_y)
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/impact.rs"]
mod tests;
