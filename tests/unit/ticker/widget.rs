use super::*;
use crate::ticker::clock::{FixedClock, SystemClock};
use chrono::TimeDelta;

fn ticker() -> Ticker<FixedClock> {
    let clock = FixedClock::parse("2026-10-19T14:05:09Z").unwrap();
    Ticker::in_memory(clock, TickerOpts::default()).unwrap()
}

#[test]
fn renders_the_exact_clock_string() {
    let ticker = ticker();
    assert_eq!(
        ticker.state().clock,
        "Monday, October 19, 2026 at 02:05:09 PM UTC"
    );
    assert_eq!(ticker.state().uptime, "T+00:00:00");
    assert_eq!(ticker.clock_field().text(), ticker.state().clock);
}

#[test]
fn single_digit_days_and_morning_hours() {
    let now = DateTime::parse_from_rfc3339("2026-03-05T09:07:03+01:00")
        .unwrap()
        .with_timezone(&Tz::Europe__Paris);
    assert_eq!(
        format_clock(&now, None),
        "Thursday, March 5, 2026 at 09:07:03 AM CET"
    );
}

#[test]
fn renders_the_zone_abbreviation_in_summer_and_winter() {
    let summer = FixedClock::parse_in("2026-10-19T14:05:09Z", Tz::Europe__Berlin).unwrap();
    let ticker = Ticker::in_memory(summer, TickerOpts::default()).unwrap();
    assert_eq!(
        ticker.state().clock,
        "Monday, October 19, 2026 at 04:05:09 PM CEST"
    );

    let winter = FixedClock::parse_in("2026-12-01T09:00:00Z", Tz::Europe__Berlin).unwrap();
    let ticker = Ticker::in_memory(winter, TickerOpts::default()).unwrap();
    assert_eq!(
        ticker.state().clock,
        "Tuesday, December 1, 2026 at 10:00:00 AM CET"
    );
}

#[test]
fn system_clock_ticker_prints_a_named_zone() {
    let clock = SystemClock::in_zone(Tz::Europe__Berlin);
    let ticker = Ticker::in_memory(clock, TickerOpts::default()).unwrap();
    let clock = &ticker.state().clock;
    assert!(clock.ends_with(" CET") || clock.ends_with(" CEST"), "{clock}");
}

#[test]
fn zone_label_override() {
    let clock = FixedClock::parse_in("2026-10-19T16:05:09+02:00", Tz::Europe__Berlin).unwrap();
    let opts = TickerOpts {
        zone_label: Some("Berlin".to_owned()),
        ..TickerOpts::default()
    };
    let ticker = Ticker::in_memory(clock, opts).unwrap();
    assert_eq!(
        ticker.state().clock,
        "Monday, October 19, 2026 at 04:05:09 PM Berlin"
    );

    let unlabeled = Ticker::in_memory(clock, TickerOpts::default()).unwrap();
    assert!(unlabeled.state().clock.ends_with("PM CEST"));
}

#[test]
fn fires_once_per_interval() {
    let mut ticker = ticker();
    assert_eq!(ticker.clock_field().writes(), 1);
    assert!(!ticker.advance(0.5));
    ticker.clock_mut().advance(TimeDelta::seconds(1));
    assert!(ticker.advance(0.5));
    assert_eq!(ticker.clock_field().writes(), 2);
    assert_eq!(ticker.uptime_field().text(), "T+00:00:01");
}

#[test]
fn backgrounded_host_fires_once_against_current_time() {
    let mut ticker = ticker();
    ticker.clock_mut().advance(TimeDelta::seconds(3725));
    assert!(ticker.advance(3725.0));
    assert_eq!(ticker.clock_field().writes(), 2);
    assert_eq!(ticker.state().uptime, "T+01:02:05");
    assert_eq!(
        ticker.state().clock,
        "Monday, October 19, 2026 at 03:07:14 PM UTC"
    );
}

#[test]
fn refresh_appends_a_stamped_line() {
    let mut ticker = ticker();
    ticker.refresh("manual refresh");
    ticker.clock_mut().advance(TimeDelta::seconds(2));
    ticker.refresh("again");
    assert_eq!(
        ticker.log().lines(),
        ["[14:05:09] manual refresh", "[14:05:11] again"]
    );
    assert_eq!(ticker.uptime_field().text(), "T+00:00:02");
}

#[test]
fn uptime_formatting() {
    assert_eq!(format_uptime(0), "T+00:00:00");
    assert_eq!(format_uptime(59), "T+00:00:59");
    assert_eq!(format_uptime(100 * 3600 + 1), "T+100:00:01");
    assert_eq!(format_uptime(-5), "T+00:00:00");
}

#[test]
fn rejects_bad_interval() {
    let clock = FixedClock::parse("2026-10-19T14:05:09Z").unwrap();
    let opts = TickerOpts {
        interval_secs: 0.0,
        ..TickerOpts::default()
    };
    assert!(Ticker::in_memory(clock, opts).is_err());
}
