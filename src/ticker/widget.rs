//! The ticker itself: formatting and interval scheduling.

use chrono::DateTime;

use crate::foundation::error::{CuepathError, CuepathResult};
use crate::ticker::clock::{Clock, Tz};
use crate::ticker::surface::{DisplayField, LogSurface, MemoryField, MemoryLog};

/// `Monday, October 19, 2026 at 02:05:09 PM`; the zone is appended separately.
const CLOCK_FORMAT: &str = "%A, %B %-d, %Y at %I:%M:%S %p";
const LOG_STAMP_FORMAT: &str = "%H:%M:%S";

/// Ticker configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TickerOpts {
    /// Seconds between refreshes.
    pub interval_secs: f64,
    /// Label printed instead of the clock zone's abbreviation.
    pub zone_label: Option<String>,
    /// Visible lines of the in-memory log.
    pub log_window: usize,
}

impl Default for TickerOpts {
    fn default() -> Self {
        Self {
            interval_secs: 1.0,
            zone_label: None,
            log_window: 8,
        }
    }
}

/// Text last written to the two fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ClockState {
    /// Human-readable date and time.
    pub clock: String,
    /// Time since the ticker was created, `T+HH:MM:SS`.
    pub uptime: String,
}

/// Rewrites a clock field and an uptime field once per interval.
///
/// Scheduling is driven by [`Ticker::advance`]. When several intervals have passed since the
/// last call (a backgrounded host), the ticker fires once, against the current time.
#[derive(Debug)]
pub struct Ticker<C: Clock, F: DisplayField = MemoryField, L: LogSurface = MemoryLog> {
    clock: C,
    clock_field: F,
    uptime_field: F,
    log: L,
    opts: TickerOpts,
    loaded_at: DateTime<Tz>,
    since_tick: f64,
    state: ClockState,
}

impl<C: Clock> Ticker<C> {
    /// Ticker writing to in-memory surfaces.
    pub fn in_memory(clock: C, opts: TickerOpts) -> CuepathResult<Self> {
        let log = MemoryLog::new(opts.log_window);
        Self::new(clock, MemoryField::default(), MemoryField::default(), log, opts)
    }
}

impl<C: Clock, F: DisplayField, L: LogSurface> Ticker<C, F, L> {
    /// Create the ticker and render both fields once. The clock's current instant is the load
    /// time the uptime counts from.
    pub fn new(
        clock: C,
        clock_field: F,
        uptime_field: F,
        log: L,
        opts: TickerOpts,
    ) -> CuepathResult<Self> {
        if !(opts.interval_secs.is_finite() && opts.interval_secs > 0.0) {
            return Err(CuepathError::validation(format!(
                "ticker interval must be finite and > 0 (got {})",
                opts.interval_secs
            )));
        }
        let loaded_at = clock.now();
        let mut ticker = Self {
            clock,
            clock_field,
            uptime_field,
            log,
            opts,
            loaded_at,
            since_tick: 0.0,
            state: ClockState::default(),
        };
        ticker.tick();
        Ok(ticker)
    }

    /// Interval callback: returns whether the fields were rewritten.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !(dt.is_finite() && dt > 0.0) {
            return false;
        }
        self.since_tick += dt;
        if self.since_tick < self.opts.interval_secs {
            return false;
        }
        // Missed intervals are not replayed: one fire renders the current time and the
        // remainder carries into the next interval.
        let skipped = (self.since_tick / self.opts.interval_secs).floor() as u64 - 1;
        if skipped > 0 {
            tracing::debug!(skipped, "ticker intervals coalesced");
        }
        self.since_tick %= self.opts.interval_secs;
        self.tick();
        true
    }

    /// Recompute and rewrite both fields now.
    pub fn tick(&mut self) -> &ClockState {
        let now = self.clock.now();
        self.state = ClockState {
            clock: format_clock(&now, self.opts.zone_label.as_deref()),
            uptime: format_uptime((now - self.loaded_at).num_seconds()),
        };
        self.clock_field.write(&self.state.clock);
        self.uptime_field.write(&self.state.uptime);
        &self.state
    }

    /// Manual refresh: rewrite both fields and append `[HH:MM:SS] message` to the log.
    pub fn refresh(&mut self, message: &str) -> &ClockState {
        self.tick();
        let stamp = self.clock.now().format(LOG_STAMP_FORMAT);
        self.log.append_line(&format!("[{stamp}] {message}"));
        &self.state
    }

    /// Text last written.
    pub fn state(&self) -> &ClockState {
        &self.state
    }

    /// Instant the ticker was created.
    pub fn loaded_at(&self) -> DateTime<Tz> {
        self.loaded_at
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The clock, mutably (to move a `FixedClock`).
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The date/time field.
    pub fn clock_field(&self) -> &F {
        &self.clock_field
    }

    /// The uptime field.
    pub fn uptime_field(&self) -> &F {
        &self.uptime_field
    }

    /// The log surface.
    pub fn log(&self) -> &L {
        &self.log
    }
}

/// `Monday, October 19, 2026 at 04:05:09 PM CEST`: the zone's abbreviation at `now`, or
/// `zone_label` when given.
pub fn format_clock(now: &DateTime<Tz>, zone_label: Option<&str>) -> String {
    match zone_label {
        Some(label) => format!("{} {label}", now.format(CLOCK_FORMAT)),
        None => format!("{} {}", now.format(CLOCK_FORMAT), now.format("%Z")),
    }
}

/// `T+HH:MM:SS`; hours keep counting past 99, negative spans read as zero.
pub fn format_uptime(secs: i64) -> String {
    let secs = secs.max(0);
    format!(
        "T+{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

#[cfg(test)]
#[path = "../../tests/unit/ticker/widget.rs"]
mod tests;
