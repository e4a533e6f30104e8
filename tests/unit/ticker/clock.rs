use super::*;

#[test]
fn fixed_clock_only_moves_when_told() {
    let mut clock = FixedClock::parse("2026-10-19T14:05:09Z").unwrap();
    let start = clock.now();
    assert_eq!(clock.now(), start);
    clock.advance(TimeDelta::seconds(61));
    assert_eq!((clock.now() - start).num_seconds(), 61);
    assert!(FixedClock::parse("yesterday").is_err());
}

#[test]
fn fixed_clock_displays_in_its_zone() {
    let utc = FixedClock::parse("2026-10-19T14:05:09Z").unwrap();
    assert_eq!(utc.now().format("%H:%M %Z").to_string(), "14:05 UTC");

    let berlin = utc.in_zone(Tz::Europe__Berlin);
    assert_eq!(berlin.now(), utc.now());
    assert_eq!(berlin.now().format("%H:%M %Z").to_string(), "16:05 CEST");

    let offset_input = FixedClock::parse_in("2026-10-19T16:05:09+02:00", Tz::America__New_York)
        .unwrap();
    assert_eq!(
        offset_input.now().format("%H:%M %Z").to_string(),
        "10:05 EDT"
    );
}

#[test]
fn abbreviation_follows_daylight_saving_transitions() {
    // Berlin leaves summer time at 01:00 UTC on 2026-10-25.
    let mut clock =
        FixedClock::parse_in("2026-10-25T00:59:59Z", Tz::Europe__Berlin).unwrap();
    assert_eq!(clock.now().format("%H:%M:%S %Z").to_string(), "02:59:59 CEST");
    clock.advance(TimeDelta::seconds(1));
    assert_eq!(clock.now().format("%H:%M:%S %Z").to_string(), "02:00:00 CET");
}

#[test]
fn system_clock_reads_the_host() {
    let before = chrono::Utc::now();
    let now = SystemClock::in_zone(Tz::Asia__Tokyo).now();
    assert!(now.with_timezone(&chrono::Utc) >= before - TimeDelta::seconds(1));
    assert_eq!(now.format("%Z").to_string(), "JST");
    assert_eq!(SystemClock::default().zone(), host_zone());
}
