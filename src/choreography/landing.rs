//! Initial stage state and cue tables of the landing page.
//!
//! The page runs three timelines: the intro (start-button shake and the arrow hint), the main
//! path-traced ball animation, and the restart-button reaction. Path geometry comes from the
//! caller; every path is registered twice, once as the ball's motion path and once as its
//! `_m` stroke mask that draws in alongside the ball.

use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::animation::value::{PropTarget, PropValue};
use crate::choreography::impact::{
    BALL, LINE_REST, LINES, Wiggle, letter_touch, line_name, stretch,
};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{CuepathError, CuepathResult};
use crate::motion::path::MotionPath;
use crate::stage::registry::Stage;
use crate::timeline::cue::CueDef;
use crate::timeline::sequence::Sequence;

/// The wordmark the ball bounces across.
pub const MAIN_TEXT: &str = "mainText";
/// Tagline sliding in under the wordmark.
pub const SUB_TEXT: &str = "subText";
/// Slab hiding the T's crossbar.
pub const T_HIDE: &str = "tHide";
/// Dot of ".com", dropped from above.
pub const DOT_COM: &str = "dot_com";
/// Ripple circles.
pub const CIRCLES: [&str; 4] = ["r_circle", "e_circle", "com_circle", "h_circle"];
/// Full-screen overlay shown before leaving the page.
pub const GLITCH_OVERLAY: &str = "glitchOverlay";
/// Start button label.
pub const START_TEXT: &str = "startText";
/// Start button hit area.
pub const START_CLICK: &str = "startClick";
/// Restart button label.
pub const RESTART_TEXT: &str = "restartText";
/// Restart button hit area.
pub const RESTART_CLICK: &str = "restartClick";
/// Arrow pointing at the start button.
pub const ARROW_CLICK: &str = "arrow_click";
/// Page the main timeline hands over to.
pub const DESTINATION: &str = "tools.html";
/// Seconds between the last main cue and the navigation.
pub const NAVIGATE_DELAY_SECS: f64 = 2.0;

/// Motion paths the main timeline traverses, in order.
pub const MOTION_PATHS: [&str; 10] = [
    "path1", "path2", "path2_1", "path3", "path4", "path5", "path6", "path8", "path9", "path10",
];

const SLOW: Ease = Ease::SlowMo {
    linear_ratio: 0.3,
    power: 0.7,
};
const SNAP: Ease = Ease::ElasticOut {
    amplitude: 1.0,
    period: 0.3,
};
const SHAKE: Ease = Ease::ElasticOut {
    amplitude: 1.0,
    period: 0.5,
};

/// Identifier of the stroke mask drawn in alongside `path`.
pub fn mask_of(path: &str) -> String {
    format!("{path}_m")
}

fn num(v: f64) -> PropValue {
    PropValue::Number(v)
}

fn hidden() -> [(&'static str, PropValue); 1] {
    [("auto_alpha", num(0.0))]
}

/// Build the landing stage from SVG path data keyed by path identifier.
///
/// Every entry is registered as a motion path and as a hidden `_m` stroke mask. The paths in
/// [`MOTION_PATHS`] are required.
#[tracing::instrument(skip(paths), fields(path_count = paths.len()))]
pub fn landing_stage(paths: &BTreeMap<String, String>, accuracy: f64) -> CuepathResult<Stage> {
    for required in MOTION_PATHS {
        if !paths.contains_key(required) {
            return Err(CuepathError::target(format!(
                "landing page needs geometry for '{required}'"
            )));
        }
    }

    let mut stage = Stage::new();
    for (name, d) in paths {
        let geometry = MotionPath::from_svg(d, accuracy)
            .map_err(|e| CuepathError::path(format!("path '{name}': {e}")))?;
        stage.add_path(name.as_str(), geometry.clone())?;
        let mask = stage.add_path(mask_of(name), geometry)?;
        stage.prepare_draw_in(mask);
    }

    stage.add_target(
        BALL,
        [
            ("x", num(0.0)),
            ("y", num(0.0)),
            ("x_percent", num(-50.0)),
            ("y_percent", num(-50.0)),
            ("rotation", num(0.0)),
            ("scale", num(1.0)),
            ("fill", PropValue::Color(Rgba8::rgb(255, 255, 255))),
        ],
    )?;
    stage.add_target("paths", [("opacity", num(1.0))])?;
    stage.add_target(
        MAIN_TEXT,
        [("rotation", num(0.0)), ("scale_y", num(1.0))],
    )?;
    stage.add_target(SUB_TEXT, [("auto_alpha", num(0.0)), ("x", num(100.0))])?;
    stage.add_target(T_HIDE, [("y", num(0.0))])?;
    stage.add_target(DOT_COM, [("y", num(-1000.0))])?;
    for circle in CIRCLES {
        stage.add_target(circle, [("r", num(0.0))])?;
    }
    let com_circle = stage.resolve("com_circle")?;
    stage.set(com_circle, "auto_alpha", num(0.0));
    stage.add_target(
        "i",
        [
            ("opacity", num(0.0)),
            ("fill", PropValue::Color(Rgba8::parse("rgba(255,255,255,0.5)")?)),
        ],
    )?;
    stage.add_target("shine", [("opacity", num(0.0))])?;
    stage.add_target(
        GLITCH_OVERLAY,
        [("auto_alpha", num(0.0)), ("pointer_events", num(0.0))],
    )?;
    stage.add_target(LINES, [("opacity", num(0.0))])?;
    for (idx, rest) in LINE_REST.iter().enumerate() {
        stage.add_target(line_name(idx), rest.iter().map(|(k, v)| (*k, num(*v))))?;
    }
    stage.add_target(START_TEXT, [("x", num(0.0)), ("auto_alpha", num(1.0))])?;
    stage.add_target(START_CLICK, [("auto_alpha", num(1.0))])?;
    stage.add_target(RESTART_TEXT, [("x", num(0.0)), ("auto_alpha", num(0.0))])?;
    stage.add_target(RESTART_CLICK, hidden())?;
    stage.add_target(
        ARROW_CLICK,
        [
            ("x", num(0.0)),
            ("rotation", num(0.0)),
            ("scale_y", num(1.0)),
            ("auto_alpha", num(1.0)),
        ],
    )?;

    tracing::debug!(targets = stage.target_count(), "landing stage ready");
    Ok(stage)
}

/// Ball leg along `path` with its mask drawn in over the same interval and curve.
fn leg(
    seq: &mut Sequence,
    path: &str,
    at: f64,
    duration: f64,
    ease: Ease,
    deform: Option<(f64, f64)>,
) {
    seq.add(CueDef::motion(BALL, path, at, duration).ease(ease));
    if let Some((scale_x, scale_y)) = deform {
        seq.add(stretch(at, duration, scale_x, scale_y));
    }
    seq.add(CueDef::reveal(mask_of(path), at, duration).ease(ease));
}

fn fade_mask(seq: &mut Sequence, path: &str, at: f64, duration: f64) {
    seq.add(CueDef::tween(mask_of(path), at, duration).prop("opacity", 0.0));
}

fn touch(seq: &mut Sequence, at: f64, wiggle: Wiggle) {
    seq.extend(letter_touch(MAIN_TEXT, at, wiggle));
}

fn ripple(seq: &mut Sequence, circle: &str, at: f64, duration: f64) {
    seq.add(CueDef::tween(circle, at, duration).prop("r", 200.0));
}

/// The main timeline: the ball traces the wordmark, then leaves for [`DESTINATION`].
pub fn main_sequence() -> Sequence {
    let mut seq = Sequence::new();
    let wiggle = Wiggle::default();

    // Drop into the R.
    leg(&mut seq, "path1", 0.0, 1.5, Ease::InCubic, Some((0.6, 1.4)));
    touch(&mut seq, 1.5, wiggle.rotate(2.0));
    ripple(&mut seq, "r_circle", 1.5, 2.0);
    fade_mask(&mut seq, "path1", 1.8, 0.3);

    // R to the E.
    leg(&mut seq, "path2", 1.5, 1.4, SLOW, Some((1.3, 0.7)));
    touch(&mut seq, 1.5, wiggle.rotate(-2.0).squash(0.95));
    touch(&mut seq, 1.6, wiggle.rotate(2.0).squash(0.95));
    fade_mask(&mut seq, "path2", 2.9, 0.5);

    leg(&mut seq, "path2_1", 2.9, 0.6, SLOW, Some((1.3, 0.7)));
    touch(&mut seq, 2.9, wiggle.rotate(2.0).squash(0.95));
    ripple(&mut seq, "e_circle", 2.9, 2.0);
    fade_mask(&mut seq, "path2_1", 3.5, 0.5);

    // Two hits on the T; the crossbar slab drops with each.
    leg(&mut seq, "path3", 3.5, 0.5, SLOW, Some((1.3, 0.7)));
    touch(&mut seq, 3.5, wiggle.squash(0.9));
    fade_mask(&mut seq, "path3", 4.0, 0.4);

    leg(&mut seq, "path4", 4.0, 0.4, SLOW, Some((1.3, 0.7)));
    touch(&mut seq, 4.0, wiggle.rotate(1.0).squash(0.95));
    seq.add(CueDef::tween(T_HIDE, 4.0, 0.2).ease(SNAP).prop("y", 67.0));
    fade_mask(&mut seq, "path4", 4.4, 0.3);

    leg(&mut seq, "path5", 4.4, 0.3, Ease::InQuad, Some((1.2, 0.8)));
    touch(&mut seq, 4.4, wiggle.squash(0.95));
    seq.add(CueDef::tween(T_HIDE, 4.4, 0.3).ease(SNAP).prop("y", 134.0));
    fade_mask(&mut seq, "path5", 4.7, 0.3);

    // Into the M.
    leg(&mut seq, "path6", 4.7, 0.2, Ease::OutQuad, None);
    seq.add(CueDef::set("com_circle", 5.2).prop("auto_alpha", 1.0));
    ripple(&mut seq, "com_circle", 5.2, 1.5);
    fade_mask(&mut seq, "path6", 5.0, 0.3);

    // Bounce on the M, tagline slides in.
    seq.add(
        CueDef::tween(BALL, 4.9, 0.3)
            .ease(Ease::OutQuad)
            .prop("y", PropTarget::By(-80.0)),
    );
    seq.add(
        CueDef::tween(BALL, 5.2, 0.6)
            .ease(Ease::BounceOut)
            .prop("y", PropTarget::By(80.0)),
    );
    seq.add(
        CueDef::tween(SUB_TEXT, 5.0, 1.2)
            .ease(Ease::OutQuart)
            .prop("auto_alpha", 1.0)
            .prop("x", 0.0),
    );

    seq.add(CueDef::tween(DOT_COM, 5.5, 0.7).ease(Ease::BounceOut).prop("y", 0.0));

    // M to O, then the zig-zag H.
    leg(&mut seq, "path8", 5.8, 0.6, SLOW, Some((1.3, 0.7)));
    seq.add(
        CueDef::tween(MAIN_TEXT, 6.6, 0.15)
            .prop("scale_y", 0.95)
            .repeat(1, true),
    );
    fade_mask(&mut seq, "path8", 6.4, 0.3);

    leg(&mut seq, "path9", 6.4, 0.6, SLOW, Some((1.3, 0.7)));

    leg(&mut seq, "path10", 7.0, 0.6, Ease::Linear, Some((1.2, 0.8)));
    touch(&mut seq, 7.0, wiggle.rotate(2.0).squash(0.95));
    ripple(&mut seq, "h_circle", 7.0, 0.3);
    fade_mask(&mut seq, "path9", 7.0, 0.3);
    fade_mask(&mut seq, "path10", 7.6, 0.3);

    // Jump onto the i and become its dot.
    seq.add(CueDef::tween(BALL, 7.6, 1.2).ease(Ease::OutQuad).prop("x", 665.0));
    seq.add(CueDef::tween(BALL, 7.6, 0.5).ease(Ease::OutCirc).prop("y", 221.2));
    seq.add(CueDef::tween(BALL, 8.1, 0.7).ease(Ease::BounceOut).prop("y", 361.2));
    seq.add(
        CueDef::tween(BALL, 8.8, 0.2)
            .prop("scale", 1.0)
            .prop("fill", Rgba8::rgb(255, 0, 0)),
    );

    seq.add(
        CueDef::tween(GLITCH_OVERLAY, 9.2, 1.0)
            .prop("auto_alpha", 1.0)
            .prop("pointer_events", 1.0),
    );

    let leave_at = seq.end_time() + NAVIGATE_DELAY_SECS;
    seq.add(CueDef::navigate(DESTINATION, leave_at));
    seq
}

/// Played once on load: the start label shakes and fades, the arrow hint fades and wiggles.
pub fn intro_sequence() -> Sequence {
    Sequence::from_cues(vec![
        CueDef::tween(START_TEXT, 0.0, 0.3)
            .ease(SHAKE)
            .prop_from_to("x", -1.0, 1.0),
        CueDef::clear(START_TEXT, 0.3, ["x"]),
        CueDef::tween(START_TEXT, 0.3, 0.5).prop("auto_alpha", 0.0),
        CueDef::set(START_CLICK, 0.8).prop("auto_alpha", 0.0),
        CueDef::tween(ARROW_CLICK, 0.0, 0.5).prop("auto_alpha", 0.0),
        CueDef::tween(ARROW_CLICK, 1.2, 0.5)
            .ease(SNAP)
            .prop("rotation", 5.0)
            .prop("scale_y", 0.8)
            .prop("x", 5.0),
    ])
}

/// Played on every restart press: the restart label appears, shakes, and fades.
pub fn restart_sequence() -> Sequence {
    Sequence::from_cues(vec![
        CueDef::set(RESTART_TEXT, 0.0).prop("auto_alpha", 1.0),
        CueDef::tween(RESTART_TEXT, 0.0, 0.3)
            .ease(SHAKE)
            .prop_from_to("x", -2.0, 2.0),
        CueDef::clear(RESTART_TEXT, 0.3, ["x"]),
        CueDef::tween(RESTART_TEXT, 0.3, 1.0).prop("auto_alpha", 0.0),
    ])
}

/// What plays from page load without interaction: the intro followed by the main timeline,
/// merged into one sequence (both start at 0).
pub fn load_sequence() -> Sequence {
    let mut seq = intro_sequence();
    seq.extend(main_sequence().cues().iter().cloned());
    seq
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/landing.rs"]
mod tests;
