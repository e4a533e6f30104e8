use super::*;
use crate::animation::value::PropValue;
use crate::choreography::impact::BALL;
use crate::choreography::landing::{
    DESTINATION, GLITCH_OVERLAY, MOTION_PATHS, RESTART_TEXT, START_TEXT,
};
use crate::foundation::core::Rgba8;
use crate::timeline::sequencer::{PlayState, RecordedNavigation};

const FRAME: f64 = 1.0 / 60.0;

fn page() -> LandingPage<RecordedNavigation> {
    let paths = MOTION_PATHS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let x0 = i as f64 * 80.0;
            ((*name).to_owned(), format!("M{x0},0 C{},-60 {},-60 {},0", x0 + 10.0, x0 + 70.0, x0 + 80.0))
        })
        .collect();
    LandingPage::new(&paths, RecordedNavigation::default()).unwrap()
}

fn run(page: &mut LandingPage<RecordedNavigation>, secs: f64) {
    let frames = (secs / FRAME).round() as usize;
    for _ in 0..frames {
        page.tick(FRAME);
    }
}

fn num(page: &LandingPage<RecordedNavigation>, target: &str, prop: &str) -> f64 {
    let stage = page.stage();
    stage.number(stage.resolve(target).unwrap(), prop).unwrap()
}

#[test]
fn nothing_moves_before_start() {
    let mut page = page();
    run(&mut page, 1.0);
    assert_eq!(page.main().head(), 0.0);
    assert_eq!(page.main().play_state(), PlayState::Stopped);
    assert_eq!(num(&page, START_TEXT, "opacity"), 1.0);
}

#[test]
fn full_run_ends_on_the_i_and_navigates_once() {
    let mut page = page();
    page.start();
    run(&mut page, 20.0);

    assert!(page.is_finished());
    assert_eq!(page.navigator().destinations(), [DESTINATION]);
    assert!((num(&page, BALL, "x") - 665.0).abs() < 1e-9);
    assert!((num(&page, BALL, "y") - 361.2).abs() < 1e-9);
    assert_eq!(num(&page, BALL, "scale_x"), 1.0);
    let ball = page.stage().resolve(BALL).unwrap();
    assert_eq!(
        page.stage().get(ball, "fill"),
        Some(PropValue::Color(Rgba8::rgb(255, 0, 0)))
    );
    assert_eq!(num(&page, GLITCH_OVERLAY, "visibility"), 1.0);
    assert_eq!(num(&page, START_TEXT, "visibility"), 0.0);
    assert_eq!(num(&page, START_TEXT, "x"), 0.0);
    assert_eq!(num(&page, "subText", "x"), 0.0);
    assert_eq!(num(&page, "dot_com", "y"), 0.0);
    assert_eq!(num(&page, "r_circle", "r"), 200.0);
}

#[test]
fn restart_replays_main_from_scratch() {
    let mut fresh = page();
    fresh.start();
    run(&mut fresh, 3.0);
    let expected = fresh.stage().state()["ball"].clone();

    let mut page = page();
    page.start();
    run(&mut page, 6.0);
    page.press_restart();
    assert_eq!(page.main().head(), 0.0);
    assert_eq!(num(&page, RESTART_TEXT, "visibility"), 1.0);
    assert_eq!(num(&page, RESTART_TEXT, "x"), -2.0);
    assert_eq!(num(&page, "dot_com", "y"), -1000.0);

    run(&mut page, 3.0);
    assert_eq!(page.stage().state()["ball"], expected);
    assert_eq!(num(&page, RESTART_TEXT, "opacity"), 0.0);

    run(&mut page, 15.0);
    assert_eq!(page.navigator().destinations().len(), 1);
}

#[test]
fn pause_freezes_the_ball_but_not_the_restart_label() {
    let mut page = page();
    page.start();
    run(&mut page, 2.0);
    page.pause();
    let held = page.stage().state()["ball"].clone();
    run(&mut page, 1.0);
    assert_eq!(page.stage().state()["ball"], held);
    page.resume();
    run(&mut page, 0.5);
    assert_ne!(page.stage().state()["ball"], held);
}
