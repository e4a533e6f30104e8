use std::collections::BTreeMap;

use crate::animation::value::PropValue;
use crate::motion::path::DEFAULT_ARCLEN_ACCURACY;
use crate::timeline::sequence::Sequence;
use crate::timeline::sequencer::SequencerOpts;

fn default_accuracy() -> f64 {
    DEFAULT_ARCLEN_ACCURACY
}

/// Serde shape of a scene file.
///
/// ```json
/// {
///   "targets": { "ball": { "x": 0, "y": 0, "fill": "#ffffff" } },
///   "paths": { "path1": "M0,0 C50,-80 150,-80 200,0" },
///   "draw_in": ["path1"],
///   "cues": [ { "start": 0, "duration": 1.5, "kind": "motion", "target": "ball", "path": "path1" } ]
/// }
/// ```
///
/// Without `cues` the file only supplies geometry (and optional target overrides) for the
/// built-in landing choreography.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDef {
    /// Targets and their initial property values.
    #[serde(default)]
    pub targets: BTreeMap<String, BTreeMap<String, PropValue>>,
    /// SVG path data keyed by path identifier.
    #[serde(default)]
    pub paths: BTreeMap<String, String>,
    /// Paths whose stroke starts hidden, to be drawn in by reveal cues.
    #[serde(default)]
    pub draw_in: Vec<String>,
    /// Arc-length accuracy used when measuring paths.
    #[serde(default = "default_accuracy")]
    pub path_accuracy: f64,
    /// Playback options.
    #[serde(default)]
    pub sequencer: SequencerOpts,
    /// Cue list; `None` selects the landing choreography.
    #[serde(default)]
    pub cues: Option<Sequence>,
}
