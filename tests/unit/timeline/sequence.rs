use super::*;
use crate::animation::value::PropValue;

#[test]
fn end_time_is_latest_cue_end() {
    let mut seq = Sequence::new();
    assert!(seq.is_empty());
    assert_eq!(seq.end_time(), 0.0);
    seq.add(CueDef::tween("ball", 1.0, 0.5).prop("y", 1.0))
        .add(CueDef::navigate("tools.html", 0.2));
    seq.extend([CueDef::set("ball", 3.0).prop("x", 2.0)]);
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.end_time(), 3.0);
}

#[test]
fn json_is_a_plain_cue_array() {
    let seq: Sequence = serde_json::from_str(
        r#"[
            {"start": 0.0, "kind": "tween", "target": "ball", "props": {"y": {"to": 100.0}}},
            {"start": 1.0, "duration": 0.0, "kind": "navigate", "destination": "tools.html"}
        ]"#,
    )
    .unwrap();
    assert_eq!(seq.len(), 2);
    assert_eq!(seq.cues()[0].duration, 0.5);

    let mut stage = Stage::new();
    stage
        .add_target("ball", [("y", PropValue::Number(0.0))])
        .unwrap();
    assert_eq!(seq.bind(&stage).unwrap().len(), 2);
}

#[test]
fn bind_reports_first_bad_cue() {
    let seq: Sequence = [CueDef::tween("ghost", 0.0, 1.0).prop("y", 1.0)]
        .into_iter()
        .collect();
    assert!(seq.bind(&Stage::new()).is_err());
}
