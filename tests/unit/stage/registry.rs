use super::*;
use crate::foundation::core::Rgba8;

fn stage() -> (Stage, TargetId) {
    let mut stage = Stage::new();
    let ball = stage
        .add_target(
            "ball",
            [
                ("x", PropValue::Number(10.0)),
                ("fill", PropValue::Color(Rgba8::rgb(255, 255, 255))),
            ],
        )
        .unwrap();
    (stage, ball)
}

#[test]
fn resolves_registered_targets_and_fails_fast_on_unknown() {
    let (stage, ball) = stage();
    assert_eq!(stage.resolve("ball").unwrap(), ball);
    assert_eq!(stage.target_name(ball), "ball");
    assert!(matches!(stage.resolve("#ball"), Err(CuepathError::Target(_))));
    assert!(matches!(stage.resolve_path("path1"), Err(CuepathError::Target(_))));
}

#[test]
fn rejects_duplicates_and_empty_names() {
    let (mut stage, _) = stage();
    assert!(stage.add_target("ball", Vec::<(String, PropValue)>::new()).is_err());
    assert!(stage.add_target("  ", Vec::<(String, PropValue)>::new()).is_err());
}

#[test]
fn unwritten_props_use_neutral_defaults() {
    let (stage, ball) = stage();
    assert_eq!(stage.get(ball, "y"), None);
    assert_eq!(stage.number(ball, "y"), Some(0.0));
    assert_eq!(stage.number(ball, "scale_x"), Some(1.0));
    assert_eq!(stage.number(ball, "opacity"), Some(1.0));
    assert_eq!(stage.number(ball, "fill"), None);
}

#[test]
fn aliases_expand_on_write() {
    let (mut stage, ball) = stage();
    stage.set(ball, "scale", PropValue::Number(1.3));
    assert_eq!(stage.number(ball, "scale_x"), Some(1.3));
    assert_eq!(stage.number(ball, "scale_y"), Some(1.3));
    assert_eq!(stage.number(ball, "scale"), Some(1.3));

    stage.set(ball, "auto_alpha", PropValue::Number(0.0));
    assert_eq!(stage.number(ball, "opacity"), Some(0.0));
    assert_eq!(stage.number(ball, "visibility"), Some(0.0));
    stage.set(ball, "auto_alpha", PropValue::Number(0.4));
    assert_eq!(stage.number(ball, "visibility"), Some(1.0));

    stage.clear(ball, "scale");
    assert_eq!(stage.get(ball, "scale_y"), None);
}

#[test]
fn paths_register_a_drawn_stroke_target() {
    let mut stage = Stage::new();
    let path = stage.add_svg_path("path1_m", "M0,0 L30,40").unwrap();
    let target = stage.resolve("path1_m").unwrap();
    assert_eq!(stage.path_target(path), Some(target));
    assert_eq!(stage.path_length(path), 50.0);
    assert_eq!(stage.revealed_fraction(target), Some(1.0));

    stage.prepare_draw_in(path);
    assert_eq!(stage.number(target, PROP_DASHOFFSET), Some(50.0));
    assert_eq!(stage.revealed_fraction(target), Some(0.0));

    assert!(stage.add_svg_path("path1_m", "M0,0 L1,1").is_err());
    assert!(matches!(
        stage.add_svg_path("broken", "M0,0"),
        Err(CuepathError::Path(_))
    ));
}

#[test]
fn snapshot_restores_initial_values() {
    let (mut stage, ball) = stage();
    let snap = stage.snapshot();
    stage.set(ball, "x", PropValue::Number(99.0));
    stage.set(ball, "y", PropValue::Number(5.0));
    assert_eq!(snap.value(ball, "x"), Some(PropValue::Number(10.0)));
    stage.restore(&snap);
    assert_eq!(stage.number(ball, "x"), Some(10.0));
    assert_eq!(stage.get(ball, "y"), None);
}

#[test]
fn state_view_is_keyed_by_identifier() {
    let (stage, _) = stage();
    let state = stage.state();
    assert_eq!(state["ball"]["x"], PropValue::Number(10.0));
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["ball"]["fill"], serde_json::json!("#ffffffff"));
}

#[test]
fn restore_prop_touches_only_the_named_property() {
    let (mut stage, ball) = stage();
    let snap = stage.snapshot();
    stage.set(ball, "x", PropValue::Number(99.0));
    stage.set(ball, "scale", PropValue::Number(2.0));
    stage.set(ball, "y", PropValue::Number(5.0));

    stage.restore_prop(&snap, ball, "x");
    stage.restore_prop(&snap, ball, "scale");
    assert_eq!(stage.number(ball, "x"), Some(10.0));
    assert_eq!(stage.get(ball, "scale_x"), None);
    assert_eq!(stage.get(ball, "scale_y"), None);
    assert_eq!(stage.number(ball, "y"), Some(5.0));
}
