use super::*;
use crate::motion::path::DEFAULT_ARCLEN_ACCURACY;
use crate::timeline::cue::ActionDef;

fn paths() -> BTreeMap<String, String> {
    MOTION_PATHS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let x0 = i as f64 * 60.0;
            let d = format!("M{x0},100 Q{},0 {},100", x0 + 30.0, x0 + 60.0);
            ((*name).to_owned(), d)
        })
        .collect()
}

#[test]
fn stage_requires_every_motion_path() {
    let mut partial = paths();
    partial.remove("path6");
    assert!(matches!(
        landing_stage(&partial, DEFAULT_ARCLEN_ACCURACY),
        Err(CuepathError::Target(_))
    ));

    let mut broken = paths();
    broken.insert("path1".to_owned(), "M0,0".to_owned());
    assert!(landing_stage(&broken, DEFAULT_ARCLEN_ACCURACY).is_err());
}

#[test]
fn masks_start_hidden_and_motion_paths_drawn() {
    let stage = landing_stage(&paths(), DEFAULT_ARCLEN_ACCURACY).unwrap();
    for name in MOTION_PATHS {
        let mask = stage.resolve(&mask_of(name)).unwrap();
        assert_eq!(stage.revealed_fraction(mask), Some(0.0), "{name}");
        let path = stage.resolve(name).unwrap();
        assert_eq!(stage.revealed_fraction(path), Some(1.0), "{name}");
    }
}

#[test]
fn initial_state_matches_the_page() {
    let stage = landing_stage(&paths(), DEFAULT_ARCLEN_ACCURACY).unwrap();
    let sub = stage.resolve(SUB_TEXT).unwrap();
    assert_eq!(stage.number(sub, "opacity"), Some(0.0));
    assert_eq!(stage.number(sub, "visibility"), Some(0.0));
    assert_eq!(stage.number(sub, "x"), Some(100.0));
    assert_eq!(stage.number(stage.resolve(DOT_COM).unwrap(), "y"), Some(-1000.0));
    assert_eq!(
        stage.number(stage.resolve("com_circle").unwrap(), "opacity"),
        Some(0.0)
    );
    let i = stage.resolve("i").unwrap();
    let fill = stage.get(i, "fill").and_then(PropValue::as_color).unwrap();
    assert_eq!((fill.r, fill.g, fill.b), (255, 255, 255));
    assert!(fill.a > 120 && fill.a < 135);
}

#[test]
fn every_timeline_binds_to_the_landing_stage() {
    let stage = landing_stage(&paths(), DEFAULT_ARCLEN_ACCURACY).unwrap();
    for seq in [main_sequence(), intro_sequence(), restart_sequence(), load_sequence()] {
        seq.bind(&stage).unwrap();
    }
    assert_eq!(
        load_sequence().len(),
        main_sequence().len() + intro_sequence().len()
    );
}

#[test]
fn navigation_is_scheduled_two_seconds_after_the_last_cue() {
    let seq = main_sequence();
    let navigations = seq
        .cues()
        .iter()
        .filter(|c| matches!(&c.action, ActionDef::Navigate { destination } if destination == DESTINATION))
        .collect::<Vec<_>>();
    assert_eq!(navigations.len(), 1);
    assert!((navigations[0].start - 12.2).abs() < 1e-9);
    assert!((seq.end_time() - 12.2).abs() < 1e-9);
}

#[test]
fn every_leg_pairs_motion_with_its_mask() {
    let seq = main_sequence();
    for name in MOTION_PATHS {
        let motion = seq
            .cues()
            .iter()
            .find(|c| matches!(&c.action, ActionDef::Motion { path, .. } if path == name))
            .unwrap();
        let reveal = seq
            .cues()
            .iter()
            .find(|c| matches!(&c.action, ActionDef::Reveal { path } if *path == mask_of(name)))
            .unwrap();
        assert_eq!(motion.start, reveal.start, "{name}");
        assert_eq!(motion.duration, reveal.duration, "{name}");
        assert_eq!(motion.ease, reveal.ease, "{name}");
    }
}

#[test]
fn intro_and_restart_timings() {
    assert!((intro_sequence().end_time() - 1.7).abs() < 1e-9);
    assert!((restart_sequence().end_time() - 1.3).abs() < 1e-9);
}
