use super::*;
use crate::foundation::core::Rgba8;

fn stage() -> Stage {
    let mut stage = Stage::new();
    stage
        .add_target("ball", [("y", PropValue::Number(0.0))])
        .unwrap();
    stage.add_svg_path("path1", "M0,0 L100,0").unwrap();
    stage
}

#[test]
fn builder_produces_expected_def() {
    let cue = CueDef::tween("ball", 1.0, 2.0)
        .ease(Ease::Linear)
        .prop("y", 100.0)
        .prop("fill", Rgba8::rgb(255, 0, 0))
        .repeat(1, true);
    assert_eq!(cue.end(), 5.0);
    let ActionDef::Tween { target, props } = &cue.action else {
        panic!("expected tween");
    };
    assert_eq!(target, "ball");
    assert_eq!(props.len(), 2);
}

#[test]
fn bind_resolves_handles() {
    let stage = stage();
    let cue = CueDef::motion("ball", "path1", 0.0, 1.0).bind(&stage).unwrap();
    assert_eq!(cue.target(), Some(stage.resolve("ball").unwrap()));
    let Action::Motion { path, .. } = cue.action else {
        panic!("expected motion");
    };
    assert_eq!(path, stage.resolve_path("path1").unwrap());

    let reveal = CueDef::reveal("path1", 0.0, 1.0).bind(&stage).unwrap();
    assert_eq!(reveal.target(), Some(stage.resolve("path1").unwrap()));
}

#[test]
fn bind_fails_fast() {
    let stage = stage();
    assert!(matches!(
        CueDef::tween("missing", 0.0, 1.0).prop("y", 1.0).bind(&stage),
        Err(CuepathError::Target(_))
    ));
    assert!(matches!(
        CueDef::motion("ball", "nope", 0.0, 1.0).bind(&stage),
        Err(CuepathError::Target(_))
    ));
    assert!(CueDef::tween("ball", 0.0, 1.0).bind(&stage).is_err());
    assert!(CueDef::tween("ball", -1.0, 1.0).prop("y", 1.0).bind(&stage).is_err());
    assert!(CueDef::tween("ball", 0.0, f64::NAN).prop("y", 1.0).bind(&stage).is_err());
    assert!(
        CueDef::tween("ball", 0.0, 1.0)
            .prop_from_to("y", 0.0, Rgba8::rgb(1, 1, 1))
            .bind(&stage)
            .is_err()
    );
    let bad_ease = CueDef::tween("ball", 0.0, 1.0)
        .prop("y", 1.0)
        .ease(Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.0,
        });
    assert!(matches!(bad_ease.bind(&stage), Err(CuepathError::Easing(_))));
    assert!(CueDef::navigate(" ", 1.0).bind(&stage).is_err());
}

#[test]
fn one_shot_actions_have_no_extent() {
    let stage = stage();
    let mut nav = CueDef::navigate("tools.html", 2.0);
    nav.duration = 3.0;
    let cue = nav.bind(&stage).unwrap();
    assert_eq!(cue.duration, 0.0);
    assert_eq!(cue.end(), 2.0);
}

#[test]
fn raw_progress_handles_repeat_and_yoyo() {
    let stage = stage();
    let cue = CueDef::tween("ball", 1.0, 1.0)
        .prop("y", 1.0)
        .ease(Ease::Linear)
        .repeat(1, true)
        .bind(&stage)
        .unwrap();
    assert_eq!(cue.raw_progress(0.5), 0.0);
    assert_eq!(cue.raw_progress(1.25), 0.25);
    assert_eq!(cue.raw_progress(2.25), 0.75);
    assert_eq!(cue.raw_progress(3.0), 0.0);
    assert_eq!(cue.raw_progress(10.0), 0.0);

    let plain = CueDef::tween("ball", 0.0, 2.0)
        .prop("y", 1.0)
        .repeat(2, false)
        .bind(&stage)
        .unwrap();
    assert_eq!(plain.raw_progress(3.0), 0.5);
    assert_eq!(plain.raw_progress(6.0), 1.0);
}

#[test]
fn zero_duration_progress_jumps_at_start() {
    let stage = stage();
    let cue = CueDef::set("ball", 1.0).prop("y", 5.0).bind(&stage).unwrap();
    assert_eq!(cue.raw_progress(0.999), 0.0);
    assert_eq!(cue.raw_progress(1.0), 1.0);
}

#[test]
fn serde_round_trips_authored_json() {
    let json = serde_json::json!({
        "kind": "tween",
        "target": "ball",
        "start": 4.9,
        "duration": 0.3,
        "ease": "power1.out",
        "props": { "y": { "by": -80.0 } }
    });
    let cue: CueDef = serde_json::from_value(json).unwrap();
    assert_eq!(cue.ease, Ease::OutQuad);
    assert_eq!(cue.repeat, 0);
    let ActionDef::Tween { props, .. } = &cue.action else {
        panic!("expected tween");
    };
    assert_eq!(props["y"], PropTarget::By(-80.0));

    let motion: CueDef = serde_json::from_value(serde_json::json!({
        "kind": "motion",
        "target": "ball",
        "path": "path1",
        "start": 0
    }))
    .unwrap();
    assert_eq!(motion.duration, 0.5);
    assert!(matches!(
        motion.action,
        ActionDef::Motion {
            auto_rotate: true,
            ..
        }
    ));
}
