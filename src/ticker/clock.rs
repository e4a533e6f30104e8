use chrono::{DateTime, TimeDelta, Utc};
pub use chrono_tz::Tz;

/// Source of the current wall-clock instant.
pub trait Clock {
    /// Current instant, in the named zone it should be displayed in.
    fn now(&self) -> DateTime<Tz>;
}

/// The host's clock, displayed in a named zone (the host zone by default).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemClock {
    zone: Tz,
}

impl SystemClock {
    /// Clock in the host's time zone.
    pub fn new() -> Self {
        Self::in_zone(host_zone())
    }

    /// Clock displayed in `zone`.
    pub fn in_zone(zone: Tz) -> Self {
        Self { zone }
    }

    /// Display zone.
    pub fn zone(&self) -> Tz {
        self.zone
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.zone)
    }
}

/// A clock that only moves when told to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Tz>,
}

impl FixedClock {
    /// Clock frozen at `now`.
    pub fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    /// Parse an RFC 3339 instant (`2026-10-19T14:05:09Z`), displayed in UTC.
    pub fn parse(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        Self::parse_in(rfc3339, Tz::UTC)
    }

    /// Parse an RFC 3339 instant, displayed in `zone`.
    pub fn parse_in(rfc3339: &str, zone: Tz) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(rfc3339).map(|t| Self::new(t.with_timezone(&zone)))
    }

    /// The same instant, displayed in `zone`.
    pub fn in_zone(self, zone: Tz) -> Self {
        Self::new(self.now.with_timezone(&zone))
    }

    /// Move the clock forward (or back, with a negative delta).
    pub fn advance(&mut self, delta: TimeDelta) {
        self.now += delta;
    }

    /// Jump to `now`.
    pub fn set(&mut self, now: DateTime<Tz>) {
        self.now = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Tz> {
        (**self).now()
    }
}

/// The host's IANA time zone: `TZ` when it names a zone, otherwise the system setting.
/// Falls back to UTC when neither resolves.
pub fn host_zone() -> Tz {
    if let Ok(name) = std::env::var("TZ")
        && let Ok(zone) = name.trim_start_matches(':').parse::<Tz>()
    {
        return zone;
    }
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse::<Tz>().unwrap_or_else(|err| {
            tracing::warn!(zone = %name, %err, "unknown host time zone, using UTC");
            Tz::UTC
        }),
        Err(err) => {
            tracing::warn!(%err, "host time zone unavailable, using UTC");
            Tz::UTC
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ticker/clock.rs"]
mod tests;
