use super::*;

#[test]
fn fps_frame_times() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.frame_to_secs(FrameIndex(15)), 0.5);
    assert_eq!(fps.frames_covering(1.0), 30);
    assert_eq!(fps.frames_covering(0.0), 1);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn parses_authored_color_forms() {
    assert_eq!(Rgba8::parse("red").unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!(Rgba8::parse("#faa9a9").unwrap(), Rgba8::rgb(0xfa, 0xa9, 0xa9));
    assert_eq!(Rgba8::parse("#fff").unwrap(), Rgba8::rgb(255, 255, 255));
    assert_eq!(
        Rgba8::parse("rgba(255,255,255,0.5)").unwrap(),
        Rgba8 {
            r: 255,
            g: 255,
            b: 255,
            a: 128
        }
    );
    assert!(Rgba8::parse("chartreuse-ish").is_err());
    assert!(Rgba8::parse("#12345").is_err());
}

#[test]
fn serde_uses_hex_strings() {
    let c = Rgba8::rgb(1, 2, 3);
    let s = serde_json::to_string(&c).unwrap();
    assert_eq!(s, "\"#010203ff\"");
    let back: Rgba8 = serde_json::from_str(&s).unwrap();
    assert_eq!(back, c);
}
