//! Play-head controller for a bound [`Sequence`].
//!
//! A [`Track`] renders onto a borrowed stage; a [`Sequencer`] owns its stage. Advancing the play
//! head processes every cue start and end inside the advanced window at its exact time before
//! rendering the new head position, so the stage at time `t` does not depend on how the head got
//! there: one jump, many small frame ticks, or a skipped callback all produce the same state.

use crate::animation::value::{PropTarget, PropValue};
use crate::foundation::error::{CuepathError, CuepathResult};
use crate::stage::registry::{PROP_DASHOFFSET, Stage, StageSnapshot, TargetId};
use crate::timeline::cue::{Action, Cue};
use crate::timeline::sequence::Sequence;

/// Capability to hand control to an external destination (page, resource).
pub trait Navigator {
    /// Called once when a navigation cue fires.
    fn navigate(&mut self, destination: &str);
}

/// Navigator that only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNavigation;

impl Navigator for NoNavigation {
    fn navigate(&mut self, destination: &str) {
        tracing::debug!(destination, "navigation ignored");
    }
}

/// Navigator that records every destination it is asked to visit.
#[derive(Clone, Debug, Default)]
pub struct RecordedNavigation {
    destinations: Vec<String>,
}

impl RecordedNavigation {
    /// Destinations in firing order.
    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }
}

impl Navigator for RecordedNavigation {
    fn navigate(&mut self, destination: &str) {
        self.destinations.push(destination.to_owned());
    }
}

impl<N: Navigator + ?Sized> Navigator for Box<N> {
    fn navigate(&mut self, destination: &str) {
        (**self).navigate(destination);
    }
}

/// Playback state of a sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    /// Not advancing; the head is at 0 after construction or reset.
    Stopped,
    /// Advancing on every [`Sequencer::tick`].
    Running,
    /// Holding the current head position.
    Paused,
}

/// Sequencer tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SequencerOpts {
    /// Multiplier applied to frame deltas passed to [`Sequencer::tick`].
    pub time_scale: f64,
}

impl Default for SequencerOpts {
    fn default() -> Self {
        Self { time_scale: 1.0 }
    }
}

#[derive(Clone, Debug)]
enum CueState {
    Pending,
    /// Started; holds the `(property, from, to)` ranges captured at start (tweens only).
    Active(Vec<(String, PropValue, PropValue)>),
    Done,
}

/// Play head and per-cue state for one bound sequence, rendering onto a borrowed [`Stage`].
///
/// Several tracks may share one stage (the landing page runs its intro, main and restart
/// timelines side by side). Restarting a track restores only the properties its cues write.
///
/// Every method taking a `&mut Stage` must be given the stage the track was bound to in
/// [`Track::new`], or a clone of it: the bound cues hold handles into that stage. Debug builds
/// assert this.
#[derive(Clone, Debug)]
pub struct Track {
    stage_id: u64,
    cues: Vec<Cue>,
    states: Vec<CueState>,
    initial: StageSnapshot,
    touched: Vec<(TargetId, String)>,
    head: f64,
    play_state: PlayState,
    opts: SequencerOpts,
}

impl Track {
    /// Bind `sequence` to `stage`. The stage's current values are what [`Track::restart`]
    /// returns to.
    #[tracing::instrument(skip_all, fields(cues = sequence.len()))]
    pub fn new(sequence: &Sequence, stage: &Stage, opts: SequencerOpts) -> CuepathResult<Self> {
        validate_time_scale(opts.time_scale)?;
        let cues = sequence.bind(stage)?;

        let mut touched = Vec::<(TargetId, String)>::new();
        for cue in &cues {
            for key in written_props(cue) {
                if !touched.contains(&key) {
                    touched.push(key);
                }
            }
        }
        tracing::debug!(
            targets = stage.target_count(),
            props = touched.len(),
            end = sequence.end_time(),
            "sequence bound"
        );

        Ok(Self {
            stage_id: stage.id(),
            states: vec![CueState::Pending; cues.len()],
            cues,
            initial: stage.snapshot(),
            touched,
            head: 0.0,
            play_state: PlayState::Stopped,
            opts,
        })
    }

    /// Start advancing. From `Paused` this is the same as [`Track::resume`].
    pub fn play(&mut self, stage: &mut Stage, navigator: &mut impl Navigator) {
        if self.play_state != PlayState::Running {
            tracing::debug!(head = self.head, "play");
            self.play_state = PlayState::Running;
            // Cues authored at offset 0 apply as soon as playback starts.
            self.advance_to(stage, navigator, self.head);
        }
    }

    /// Hold the current head position.
    pub fn pause(&mut self) {
        if self.play_state == PlayState::Running {
            self.play_state = PlayState::Paused;
        }
    }

    /// Continue from a pause. No effect in other states.
    pub fn resume(&mut self) {
        if self.play_state == PlayState::Paused {
            self.play_state = PlayState::Running;
        }
    }

    /// Discard all progress, restore the written properties, and play from 0.
    pub fn restart(&mut self, stage: &mut Stage, navigator: &mut impl Navigator) {
        tracing::debug!(head = self.head, "restart");
        self.stop(stage);
        self.play(stage, navigator);
    }

    /// Discard all progress and restore the written properties without playing.
    pub fn stop(&mut self, stage: &mut Stage) {
        self.check_stage(stage);
        for (target, prop) in &self.touched {
            stage.restore_prop(&self.initial, *target, prop);
        }
        self.states.fill(CueState::Pending);
        self.head = 0.0;
        self.play_state = PlayState::Stopped;
    }

    /// Frame callback: advance by `dt` seconds (scaled) while running.
    pub fn tick(&mut self, stage: &mut Stage, navigator: &mut impl Navigator, dt: f64) {
        if self.play_state != PlayState::Running || !(dt.is_finite() && dt > 0.0) {
            return;
        }
        self.advance_to(stage, navigator, self.head + dt * self.opts.time_scale);
    }

    /// Move the head forward to `time`, applying every cue crossed on the way. Times behind the
    /// head are ignored; use [`Track::seek`] to go back.
    pub fn advance_to(&mut self, stage: &mut Stage, navigator: &mut impl Navigator, time: f64) {
        self.check_stage(stage);
        if !time.is_finite() || time < self.head {
            return;
        }

        let mut events = self
            .cues
            .iter()
            .zip(&self.states)
            .flat_map(|(cue, state)| {
                let start = matches!(state, CueState::Pending) && cue.start <= time;
                let end = !matches!(state, CueState::Done) && cue.end() <= time;
                [start.then_some(cue.start), end.then_some(cue.end())]
            })
            .flatten()
            .collect::<Vec<_>>();
        events.sort_by(f64::total_cmp);
        events.dedup();

        for &event in &events {
            self.step(stage, navigator, event);
        }
        if events.last() != Some(&time) {
            self.step(stage, navigator, time);
        }
        self.head = time;
    }

    /// Deterministically position the head at `time`, replaying from 0 when going backwards.
    /// The play state is kept.
    pub fn seek(&mut self, stage: &mut Stage, navigator: &mut impl Navigator, time: f64) {
        if !time.is_finite() {
            return;
        }
        let time = time.max(0.0);
        if time < self.head {
            let play_state = self.play_state;
            self.stop(stage);
            self.play_state = play_state;
        }
        self.advance_to(stage, navigator, time);
    }

    fn check_stage(&self, stage: &Stage) {
        debug_assert_eq!(
            stage.id(),
            self.stage_id,
            "track driven with a stage it was not bound to"
        );
    }

    /// Render all cues at `time`.
    ///
    /// Running cues render first, then cues starting now capture their base values from the
    /// stage as it is at this instant. A last pass re-renders every cue live at `time` in
    /// registration order, so the last-registered cue wins even when an earlier one starts at
    /// exactly this instant.
    fn step(&mut self, stage: &mut Stage, navigator: &mut impl Navigator, time: f64) {
        let mut live = Vec::new();
        for idx in 0..self.cues.len() {
            if matches!(self.states[idx], CueState::Active(_)) {
                self.render(stage, idx, time);
                live.push(idx);
            }
        }
        for idx in 0..self.cues.len() {
            if matches!(self.states[idx], CueState::Pending) && self.cues[idx].start <= time {
                self.start_cue(stage, navigator, idx);
                self.render(stage, idx, time);
                live.push(idx);
            }
        }

        live.sort_unstable();
        for &idx in &live {
            self.render(stage, idx, time);
        }
        for idx in live {
            let end = self.cues[idx].end();
            if time >= end && matches!(self.states[idx], CueState::Active(_)) {
                tracing::debug!(cue = idx, end, "cue finished");
                self.states[idx] = CueState::Done;
            }
        }
    }

    fn start_cue(&mut self, stage: &mut Stage, navigator: &mut impl Navigator, idx: usize) {
        let cue = &self.cues[idx];
        tracing::debug!(
            cue = idx,
            start = cue.start,
            subject = cue.target().map(|t| stage.target_name(t)),
            "cue started"
        );
        let state = match &cue.action {
            Action::Tween { target, props } => CueState::Active(
                props
                    .iter()
                    .map(|(name, prop_target)| {
                        let (from, to) = capture_range(stage, *target, name, *prop_target);
                        (name.clone(), from, to)
                    })
                    .collect(),
            ),
            Action::Navigate { destination } => {
                tracing::info!(destination = %destination, at = cue.start, "navigate");
                navigator.navigate(destination);
                CueState::Done
            }
            Action::Motion { .. } | Action::Reveal { .. } | Action::Clear { .. } => {
                CueState::Active(Vec::new())
            }
        };
        self.states[idx] = state;
    }

    /// Write cue `idx` at `time`. Idempotent for a given time.
    fn render(&self, stage: &mut Stage, idx: usize, time: f64) {
        let CueState::Active(ranges) = &self.states[idx] else {
            return;
        };
        let cue = &self.cues[idx];
        let eased = cue.progress(time);

        match &cue.action {
            Action::Tween { target, .. } => {
                for (name, from, to) in ranges {
                    let value = PropValue::interpolate(*from, *to, eased).unwrap_or(*to);
                    stage.set(*target, name, value);
                }
            }
            Action::Motion {
                target,
                path,
                auto_rotate,
            } => {
                let sample = stage.path(*path).sample(eased);
                stage.set(*target, "x", PropValue::Number(sample.point.x));
                stage.set(*target, "y", PropValue::Number(sample.point.y));
                if *auto_rotate {
                    stage.set(*target, "rotation", PropValue::Number(sample.angle_deg));
                }
            }
            Action::Reveal { target, path } => {
                let length = stage.path_length(*path);
                stage.set(
                    *target,
                    PROP_DASHOFFSET,
                    PropValue::Number(length * (1.0 - eased)),
                );
            }
            Action::Clear { target, props } => {
                for prop in props {
                    stage.restore_prop(&self.initial, *target, prop);
                }
            }
            Action::Navigate { .. } => {}
        }
    }

    /// Current play-head position in seconds.
    pub fn head(&self) -> f64 {
        self.head
    }

    /// Current playback state.
    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    /// End of the last cue, in seconds.
    pub fn duration(&self) -> f64 {
        self.cues.iter().map(Cue::end).fold(0.0, f64::max)
    }

    /// Whether every cue has completed.
    pub fn is_finished(&self) -> bool {
        self.states.iter().all(|s| matches!(s, CueState::Done))
    }

    /// Bound cues, in registration order.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Active options.
    pub fn opts(&self) -> SequencerOpts {
        self.opts
    }

    /// Change the playback speed multiplier.
    pub fn set_time_scale(&mut self, time_scale: f64) -> CuepathResult<()> {
        validate_time_scale(time_scale)?;
        self.opts.time_scale = time_scale;
        Ok(())
    }
}

/// `(from, to)` for a tweened property, read from the stage at the instant the cue starts.
fn capture_range(
    stage: &Stage,
    target: TargetId,
    name: &str,
    prop_target: PropTarget,
) -> (PropValue, PropValue) {
    let base = match (stage.get(target, name), prop_target.kind_hint()) {
        (Some(v), _) => v,
        (None, hint @ PropValue::Color(_)) => hint,
        (None, PropValue::Number(_)) => stage.value(target, name),
    };
    let (from, to) = match prop_target.resolve(base) {
        Ok(range) => range,
        Err(err) => {
            tracing::warn!(property = name, %err, "holding property");
            (base, base)
        }
    };
    if from.zero_like() == to.zero_like() {
        (from, to)
    } else {
        tracing::warn!(property = name, "value kinds differ, snapping");
        (to, to)
    }
}

fn written_props(cue: &Cue) -> Vec<(TargetId, String)> {
    fn keyed(target: TargetId, names: &[&str]) -> Vec<(TargetId, String)> {
        names.iter().map(|n| (target, (*n).to_owned())).collect()
    }

    match &cue.action {
        Action::Tween { target, props } => props
            .iter()
            .map(|(name, _)| (*target, name.clone()))
            .collect(),
        Action::Motion { target, .. } => keyed(*target, &["x", "y", "rotation"]),
        Action::Reveal { target, .. } => keyed(*target, &[PROP_DASHOFFSET]),
        Action::Clear { target, props } => {
            props.iter().map(|name| (*target, name.clone())).collect()
        }
        Action::Navigate { .. } => Vec::new(),
    }
}

/// A [`Track`] bundled with the stage it owns and the navigator it fires.
pub struct Sequencer<N: Navigator = NoNavigation> {
    track: Track,
    stage: Stage,
    navigator: N,
}

impl<N: Navigator> std::fmt::Debug for Sequencer<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("cues", &self.track.cues.len())
            .field("head", &self.track.head)
            .field("play_state", &self.track.play_state)
            .field("opts", &self.track.opts)
            .finish()
    }
}

impl<N: Navigator> Sequencer<N> {
    /// Bind `sequence` to `stage` with default options. The stage's current values become the
    /// state every restart returns to.
    pub fn new(sequence: &Sequence, stage: Stage, navigator: N) -> CuepathResult<Self> {
        Self::with_opts(sequence, stage, navigator, SequencerOpts::default())
    }

    /// Bind with explicit options.
    pub fn with_opts(
        sequence: &Sequence,
        stage: Stage,
        navigator: N,
        opts: SequencerOpts,
    ) -> CuepathResult<Self> {
        let track = Track::new(sequence, &stage, opts)?;
        Ok(Self {
            track,
            stage,
            navigator,
        })
    }

    /// Start advancing. From `Paused` this is the same as [`Sequencer::resume`].
    pub fn play(&mut self) {
        self.track.play(&mut self.stage, &mut self.navigator);
    }

    /// Hold the current head position.
    pub fn pause(&mut self) {
        self.track.pause();
    }

    /// Continue from a pause.
    pub fn resume(&mut self) {
        self.track.resume();
    }

    /// Discard all progress, restore the initial stage, and play from 0.
    pub fn restart(&mut self) {
        self.track.restart(&mut self.stage, &mut self.navigator);
    }

    /// Discard all progress and restore the initial stage without playing.
    pub fn stop(&mut self) {
        self.track.stop(&mut self.stage);
    }

    /// Frame callback.
    pub fn tick(&mut self, dt: f64) {
        self.track.tick(&mut self.stage, &mut self.navigator, dt);
    }

    /// See [`Track::advance_to`].
    pub fn advance_to(&mut self, time: f64) {
        self.track.advance_to(&mut self.stage, &mut self.navigator, time);
    }

    /// See [`Track::seek`].
    pub fn seek(&mut self, time: f64) {
        self.track.seek(&mut self.stage, &mut self.navigator, time);
    }

    /// Current play-head position in seconds.
    pub fn head(&self) -> f64 {
        self.track.head()
    }

    /// Current playback state.
    pub fn play_state(&self) -> PlayState {
        self.track.play_state()
    }

    /// End of the last cue, in seconds.
    pub fn duration(&self) -> f64 {
        self.track.duration()
    }

    /// Whether every cue has completed.
    pub fn is_finished(&self) -> bool {
        self.track.is_finished()
    }

    /// Stage as written so far.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Underlying track.
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Change the playback speed multiplier.
    pub fn set_time_scale(&mut self, time_scale: f64) -> CuepathResult<()> {
        self.track.set_time_scale(time_scale)
    }

    /// Injected navigator.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Injected navigator, mutably.
    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    /// Give back the stage and navigator.
    pub fn into_parts(self) -> (Stage, N) {
        (self.stage, self.navigator)
    }
}

fn validate_time_scale(time_scale: f64) -> CuepathResult<()> {
    if time_scale.is_finite() && time_scale > 0.0 {
        Ok(())
    } else {
        Err(CuepathError::validation(format!(
            "time scale must be finite and > 0 (got {time_scale})"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequencer.rs"]
mod tests;
