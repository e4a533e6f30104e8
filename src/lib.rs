//! cuepath is a headless cue sequencer for path-traced landing animations.
//!
//! A [`Sequencer`] plays an ahead-of-time authored [`Sequence`] of timed [`CueDef`]s against a
//! [`Stage`] (named targets with property bags, plus path geometry). A separate [`Ticker`]
//! rewrites a clock field and an uptime field once per second.
//!
//! # Playback model
//!
//! 1. **Author**: cues are plain data (tweens, motion along a path, stroke draw-in, property
//!    clears, one-shot navigation), built in code or loaded from a scene file ([`Scene`]).
//! 2. **Bind**: identifiers resolve once into typed handles; unknown targets, unusable paths and
//!    out-of-range easing parameters fail here, never during playback.
//! 3. **Advance**: the play head moves forward; every cue start and end inside the advanced window
//!    is applied at its exact time, so the stage at time `t` is a pure function of `t`.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: restarting and replaying reproduces the same stage at every sampled time.
//! - **Arc-length motion**: path progress is distance travelled, not the curve parameter.
//! - **No IO during playback**: the only side effect a cue can have is a [`Navigator`] call.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod choreography;
mod foundation;
mod motion;
mod scene;
mod stage;
mod ticker;
mod timeline;

pub use animation::ease::Ease;
pub use animation::value::{Lerp, PropTarget, PropValue};
pub use choreography::page::LandingPage;
pub use choreography::{impact, landing};
pub use foundation::core::{BezPath, Fps, FrameIndex, Point, Rgba8, Vec2};
pub use foundation::error::{CuepathError, CuepathResult};
pub use motion::path::{DEFAULT_ARCLEN_ACCURACY, MotionPath, PathSample};
pub use scene::document::Scene;
pub use scene::model::SceneDef;
pub use stage::registry::{PROP_DASHARRAY, PROP_DASHOFFSET, PathId, Stage, StageSnapshot, TargetId};
pub use ticker::clock::{Clock, FixedClock, SystemClock, Tz, host_zone};
pub use ticker::surface::{DisplayField, LogSurface, MemoryField, MemoryLog};
pub use ticker::widget::{ClockState, Ticker, TickerOpts, format_clock, format_uptime};
pub use timeline::cue::{Action, ActionDef, Cue, CueDef};
pub use timeline::sequence::Sequence;
pub use timeline::sequencer::{
    Navigator, NoNavigation, PlayState, RecordedNavigation, Sequencer, SequencerOpts, Track,
};
