use super::*;

#[test]
fn numbers_and_colors_interpolate() {
    let v = PropValue::interpolate(PropValue::Number(0.0), PropValue::Number(100.0), 0.25).unwrap();
    assert_eq!(v, PropValue::Number(25.0));

    let white = PropValue::Color(Rgba8::rgb(255, 255, 255));
    let red = PropValue::Color(Rgba8::rgb(255, 0, 0));
    let mid = PropValue::interpolate(white, red, 0.5).unwrap();
    assert_eq!(mid, PropValue::Color(Rgba8::rgb(255, 128, 128)));
}

#[test]
fn mixed_kinds_do_not_interpolate() {
    let err = PropValue::interpolate(PropValue::Number(1.0), Rgba8::rgb(1, 2, 3).into(), 0.5);
    assert!(err.is_err());
}

#[test]
fn overshoot_extrapolates_numbers_and_clamps_colors() {
    assert_eq!(f64::lerp(&0.0, &10.0, 1.2), 12.0);
    let c = Rgba8::lerp(&Rgba8::rgb(0, 0, 0), &Rgba8::rgb(250, 0, 0), 1.2);
    assert_eq!(c.r, 255);
}

#[test]
fn relative_shorthand_resolves_against_base() {
    let down = PropTarget::relative("+=80").unwrap();
    let up = PropTarget::relative("-= 80").unwrap();
    assert_eq!(down, PropTarget::By(80.0));
    assert_eq!(up, PropTarget::By(-80.0));
    let (from, to) = up.resolve(PropValue::Number(120.0)).unwrap();
    assert_eq!(from, PropValue::Number(120.0));
    assert_eq!(to, PropValue::Number(40.0));
    assert!(PropTarget::relative("80").is_err());
    assert!(PropTarget::relative("+=abc").is_err());
}

#[test]
fn from_to_ignores_base() {
    let t = PropTarget::FromTo {
        from: PropValue::Number(-1.0),
        to: PropValue::Number(1.0),
    };
    let (from, to) = t.resolve(PropValue::Number(50.0)).unwrap();
    assert_eq!(from, PropValue::Number(-1.0));
    assert_eq!(to, PropValue::Number(1.0));
}

#[test]
fn prop_target_serde_shape() {
    let json = serde_json::json!({ "by": -80.0 });
    let t: PropTarget = serde_json::from_value(json).unwrap();
    assert_eq!(t, PropTarget::By(-80.0));

    let json = serde_json::json!({ "to": "#ff0000" });
    let t: PropTarget = serde_json::from_value(json).unwrap();
    assert_eq!(t, PropTarget::To(PropValue::Color(Rgba8::rgb(255, 0, 0))));
}
