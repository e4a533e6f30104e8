use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::animation::value::{PropTarget, PropValue};
use crate::foundation::error::{CuepathError, CuepathResult};
use crate::stage::registry::{PathId, Stage, TargetId};

fn default_duration() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}

/// Authored cue: a timed mutation against named targets.
///
/// This is the serde boundary form. Identifiers are plain strings until the cue is bound to a
/// [`Stage`], which turns it into a [`Cue`] with typed handles.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CueDef {
    /// Offset from the sequence start, in seconds.
    pub start: f64,
    /// Length of one iteration, in seconds. `0` makes the cue an instantaneous write.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Easing applied to each iteration.
    #[serde(default)]
    pub ease: Ease,
    /// Extra iterations after the first.
    #[serde(default)]
    pub repeat: u32,
    /// Play odd iterations backwards.
    #[serde(default)]
    pub yoyo: bool,
    /// What the cue does.
    #[serde(flatten)]
    pub action: ActionDef,
}

/// Authored cue action.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionDef {
    /// Interpolate properties of a target.
    Tween {
        /// Target identifier.
        target: String,
        /// End value per property.
        props: BTreeMap<String, PropTarget>,
    },
    /// Move a target along a path.
    Motion {
        /// Target identifier.
        target: String,
        /// Path identifier.
        path: String,
        /// Write `rotation` so the target faces the direction of travel.
        #[serde(default = "default_true")]
        auto_rotate: bool,
    },
    /// Draw a path's stroke in from 0 % to 100 %.
    Reveal {
        /// Path identifier; the path's own target receives the dash offset.
        path: String,
    },
    /// Undo inline writes, restoring the authored initial values.
    Clear {
        /// Target identifier.
        target: String,
        /// Properties to clear.
        props: Vec<String>,
    },
    /// Hand control to an external destination.
    Navigate {
        /// Page or resource identifier.
        destination: String,
    },
}

impl CueDef {
    fn new(start: f64, duration: f64, action: ActionDef) -> Self {
        Self {
            start,
            duration,
            ease: Ease::default(),
            repeat: 0,
            yoyo: false,
            action,
        }
    }

    /// Tween `target` over `[start, start + duration]`. Add properties with [`CueDef::prop`].
    pub fn tween(target: impl Into<String>, start: f64, duration: f64) -> Self {
        Self::new(
            start,
            duration,
            ActionDef::Tween {
                target: target.into(),
                props: BTreeMap::new(),
            },
        )
    }

    /// Instantaneous write at `at`.
    pub fn set(target: impl Into<String>, at: f64) -> Self {
        Self::tween(target, at, 0.0)
    }

    /// Move `target` along `path` with auto-rotation.
    pub fn motion(
        target: impl Into<String>,
        path: impl Into<String>,
        start: f64,
        duration: f64,
    ) -> Self {
        Self::new(
            start,
            duration,
            ActionDef::Motion {
                target: target.into(),
                path: path.into(),
                auto_rotate: true,
            },
        )
    }

    /// Draw `path` in over `[start, start + duration]`.
    pub fn reveal(path: impl Into<String>, start: f64, duration: f64) -> Self {
        Self::new(start, duration, ActionDef::Reveal { path: path.into() })
    }

    /// Clear inline `props` of `target` at `at`.
    pub fn clear<S: Into<String>>(
        target: impl Into<String>,
        at: f64,
        props: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            at,
            0.0,
            ActionDef::Clear {
                target: target.into(),
                props: props.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Navigate to `destination` when the play head crosses `at`.
    pub fn navigate(destination: impl Into<String>, at: f64) -> Self {
        Self::new(
            at,
            0.0,
            ActionDef::Navigate {
                destination: destination.into(),
            },
        )
    }

    /// Set the easing curve.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Add a tweened property. Ignored for non-tween actions.
    pub fn prop(mut self, name: impl Into<String>, target: impl Into<PropTarget>) -> Self {
        if let ActionDef::Tween { props, .. } = &mut self.action {
            props.insert(name.into(), target.into());
        }
        self
    }

    /// Add a property tweened between explicit `from` and `to` values.
    pub fn prop_from_to(
        self,
        name: impl Into<String>,
        from: impl Into<PropValue>,
        to: impl Into<PropValue>,
    ) -> Self {
        self.prop(
            name,
            PropTarget::FromTo {
                from: from.into(),
                to: to.into(),
            },
        )
    }

    /// Repeat `count` extra times, optionally playing odd iterations backwards.
    pub fn repeat(mut self, count: u32, yoyo: bool) -> Self {
        self.repeat = count;
        self.yoyo = yoyo;
        self
    }

    /// Disable auto-rotation on a motion cue.
    pub fn no_rotate(mut self) -> Self {
        if let ActionDef::Motion { auto_rotate, .. } = &mut self.action {
            *auto_rotate = false;
        }
        self
    }

    /// Time at which the last iteration completes.
    pub fn end(&self) -> f64 {
        self.start + self.duration * f64::from(self.repeat + 1)
    }

    /// Validate numbers and resolve identifiers against `stage`.
    pub fn bind(&self, stage: &Stage) -> CuepathResult<Cue> {
        if !(self.start.is_finite() && self.start >= 0.0) {
            return Err(CuepathError::validation(format!(
                "cue start must be finite and >= 0 (got {})",
                self.start
            )));
        }
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(CuepathError::validation(format!(
                "cue duration must be finite and >= 0 (got {})",
                self.duration
            )));
        }
        self.ease.validate()?;

        let action = match &self.action {
            ActionDef::Tween { target, props } => {
                if props.is_empty() {
                    return Err(CuepathError::validation(format!(
                        "tween on '{target}' has no properties"
                    )));
                }
                let props = props
                    .iter()
                    .map(|(name, t)| {
                        validate_prop_target(name, *t)?;
                        Ok((name.clone(), *t))
                    })
                    .collect::<CuepathResult<Vec<_>>>()?;
                Action::Tween {
                    target: stage.resolve(target)?,
                    props,
                }
            }
            ActionDef::Motion {
                target,
                path,
                auto_rotate,
            } => Action::Motion {
                target: stage.resolve(target)?,
                path: stage.resolve_path(path)?,
                auto_rotate: *auto_rotate,
            },
            ActionDef::Reveal { path } => {
                let path_id = stage.resolve_path(path)?;
                let target = stage.path_target(path_id).ok_or_else(|| {
                    CuepathError::target(format!("path '{path}' has no stroke target"))
                })?;
                Action::Reveal {
                    target,
                    path: path_id,
                }
            }
            ActionDef::Clear { target, props } => Action::Clear {
                target: stage.resolve(target)?,
                props: props.clone(),
            },
            ActionDef::Navigate { destination } => {
                if destination.trim().is_empty() {
                    return Err(CuepathError::validation(
                        "navigation destination must be non-empty",
                    ));
                }
                Action::Navigate {
                    destination: destination.clone(),
                }
            }
        };

        // One-shot actions have no extent.
        let (duration, repeat) = match action {
            Action::Clear { .. } | Action::Navigate { .. } => (0.0, 0),
            _ => (self.duration, self.repeat),
        };

        Ok(Cue {
            start: self.start,
            duration,
            ease: self.ease,
            repeat,
            yoyo: self.yoyo,
            action,
        })
    }
}

fn validate_prop_target(name: &str, target: PropTarget) -> CuepathResult<()> {
    let finite = |v: PropValue| match v {
        PropValue::Number(n) => n.is_finite(),
        PropValue::Color(_) => true,
    };
    let ok = match target {
        PropTarget::To(v) => finite(v),
        PropTarget::By(d) => d.is_finite(),
        PropTarget::FromTo { from, to } => {
            finite(from) && finite(to) && from.zero_like() == to.zero_like()
        }
    };
    if !ok {
        return Err(CuepathError::validation(format!(
            "property '{name}' has an invalid target value {target:?}"
        )));
    }
    Ok(())
}

/// Resolved cue action with typed handles.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Interpolate properties.
    Tween {
        /// Target handle.
        target: TargetId,
        /// `(property, end value)` pairs.
        props: Vec<(String, PropTarget)>,
    },
    /// Move along a path.
    Motion {
        /// Target handle.
        target: TargetId,
        /// Path handle.
        path: PathId,
        /// Write `rotation`.
        auto_rotate: bool,
    },
    /// Draw a path's stroke in.
    Reveal {
        /// Stroke target.
        target: TargetId,
        /// Path handle.
        path: PathId,
    },
    /// Undo inline writes.
    Clear {
        /// Target handle.
        target: TargetId,
        /// Properties to clear.
        props: Vec<String>,
    },
    /// One-shot navigation.
    Navigate {
        /// Destination identifier.
        destination: String,
    },
}

/// A cue bound to a stage.
#[derive(Clone, Debug, PartialEq)]
pub struct Cue {
    /// Offset from sequence start, in seconds.
    pub start: f64,
    /// Length of one iteration, in seconds.
    pub duration: f64,
    /// Easing.
    pub ease: Ease,
    /// Extra iterations.
    pub repeat: u32,
    /// Reverse odd iterations.
    pub yoyo: bool,
    /// Resolved action.
    pub action: Action,
}

impl Cue {
    /// Time at which the last iteration completes.
    pub fn end(&self) -> f64 {
        self.start + self.duration * f64::from(self.repeat + 1)
    }

    /// Raw (un-eased) progress of the current iteration at `time`, in `[0, 1]`.
    ///
    /// Before `start` this is `0`; from `end` on it is the final iteration's end state.
    pub fn raw_progress(&self, time: f64) -> f64 {
        if time < self.start {
            return 0.0;
        }
        let final_progress = if self.yoyo && self.repeat % 2 == 1 {
            0.0
        } else {
            1.0
        };
        if self.duration <= 0.0 || time >= self.end() {
            return final_progress;
        }
        let local = (time - self.start) / self.duration;
        let iteration = local.floor();
        let frac = local - iteration;
        if self.yoyo && (iteration as u64) % 2 == 1 {
            1.0 - frac
        } else {
            frac
        }
    }

    /// Eased progress at `time`.
    pub fn progress(&self, time: f64) -> f64 {
        self.ease.apply(self.raw_progress(time))
    }

    /// Target written by this cue, if any.
    pub fn target(&self) -> Option<TargetId> {
        match &self.action {
            Action::Tween { target, .. }
            | Action::Motion { target, .. }
            | Action::Reveal { target, .. }
            | Action::Clear { target, .. } => Some(*target),
            Action::Navigate { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/cue.rs"]
mod tests;
