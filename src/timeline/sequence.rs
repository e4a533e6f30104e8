use crate::foundation::error::CuepathResult;
use crate::stage::registry::Stage;
use crate::timeline::cue::{Cue, CueDef};

/// An ordered, replayable list of authored cues.
///
/// Registration order is significant: when cues overlap on the same property, the one
/// registered last wins.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Sequence {
    cues: Vec<CueDef>,
}

impl Sequence {
    /// Empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of cues, keeping their order.
    pub fn from_cues(cues: Vec<CueDef>) -> Self {
        Self { cues }
    }

    /// Register a cue.
    pub fn add(&mut self, cue: CueDef) -> &mut Self {
        self.cues.push(cue);
        self
    }

    /// Register every cue in `cues`, in order.
    pub fn extend(&mut self, cues: impl IntoIterator<Item = CueDef>) -> &mut Self {
        self.cues.extend(cues);
        self
    }

    /// Registered cues.
    pub fn cues(&self) -> &[CueDef] {
        &self.cues
    }

    /// Number of cues.
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether no cue is registered.
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// End of the last cue, in seconds.
    pub fn end_time(&self) -> f64 {
        self.cues.iter().map(CueDef::end).fold(0.0, f64::max)
    }

    /// Resolve every cue against `stage`. Fails on the first invalid cue.
    pub fn bind(&self, stage: &Stage) -> CuepathResult<Vec<Cue>> {
        self.cues.iter().map(|c| c.bind(stage)).collect()
    }
}

impl FromIterator<CueDef> for Sequence {
    fn from_iter<I: IntoIterator<Item = CueDef>>(iter: I) -> Self {
        Self {
            cues: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequence.rs"]
mod tests;
