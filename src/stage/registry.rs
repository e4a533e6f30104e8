use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::animation::value::PropValue;
use crate::foundation::error::{CuepathError, CuepathResult};
use crate::motion::path::{DEFAULT_ARCLEN_ACCURACY, MotionPath};

/// Stroke length used for the dash pattern of a registered path.
pub const PROP_DASHARRAY: &str = "stroke_dasharray";
/// Hidden portion of a path's stroke; `0` is fully drawn, the path length fully hidden.
pub const PROP_DASHOFFSET: &str = "stroke_dashoffset";

/// Typed handle to a registered target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub(crate) u32);

/// Typed handle to registered path geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathId(pub(crate) u32);

#[derive(Clone, Debug)]
struct Target {
    name: String,
    props: BTreeMap<String, PropValue>,
}

#[derive(Clone, Debug)]
struct StagePath {
    name: String,
    geometry: Arc<MotionPath>,
}

/// Property values of every target, captured for restart.
#[derive(Clone, Debug, PartialEq)]
pub struct StageSnapshot {
    props: Vec<BTreeMap<String, PropValue>>,
}

impl StageSnapshot {
    /// Captured value of a property, used to undo inline writes.
    pub fn value(&self, target: TargetId, prop: &str) -> Option<PropValue> {
        let key = alias_expansion(prop).first().copied().unwrap_or(prop);
        self.props.get(target.0 as usize)?.get(key).copied()
    }
}

/// The target registry: named elements with property bags, plus path geometry.
///
/// Identifiers are resolved once into [`TargetId`] / [`PathId`] handles; unknown identifiers are
/// an error rather than a silent no-op. Handles are only meaningful on the stage that issued them
/// (or a clone of it).
#[derive(Clone, Debug)]
pub struct Stage {
    id: u64,
    targets: Vec<Target>,
    target_idx: HashMap<String, TargetId>,
    paths: Vec<StagePath>,
    path_idx: HashMap<String, PathId>,
}

impl Stage {
    /// Empty stage.
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            targets: Vec::new(),
            target_idx: HashMap::new(),
            paths: Vec::new(),
            path_idx: HashMap::new(),
        }
    }

    /// Identity shared by a stage and its clones.
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Register a target with its authored initial property values.
    pub fn add_target<K>(
        &mut self,
        name: impl Into<String>,
        props: impl IntoIterator<Item = (K, PropValue)>,
    ) -> CuepathResult<TargetId>
    where
        K: Into<String>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CuepathError::validation("target name must be non-empty"));
        }
        if self.target_idx.contains_key(&name) {
            return Err(CuepathError::validation(format!("duplicate target '{name}'")));
        }
        let id = TargetId(self.targets.len() as u32);
        let mut target = Target {
            name: name.clone(),
            props: BTreeMap::new(),
        };
        for (key, value) in props {
            write_prop(&mut target.props, &key.into(), value);
        }
        self.targets.push(target);
        self.target_idx.insert(name, id);
        Ok(id)
    }

    /// Register path geometry under `name`. A target of the same name is created (if missing)
    /// with its stroke fully drawn: `stroke_dasharray = length`, `stroke_dashoffset = 0`.
    pub fn add_path(
        &mut self,
        name: impl Into<String>,
        geometry: MotionPath,
    ) -> CuepathResult<PathId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CuepathError::validation("path name must be non-empty"));
        }
        if self.path_idx.contains_key(&name) {
            return Err(CuepathError::validation(format!("duplicate path '{name}'")));
        }
        let length = geometry.length();
        let id = PathId(self.paths.len() as u32);
        self.paths.push(StagePath {
            name: name.clone(),
            geometry: Arc::new(geometry),
        });
        self.path_idx.insert(name.clone(), id);

        let existing = self.target_idx.get(&name).copied();
        let target = match existing {
            Some(t) => t,
            None => self.add_target(name, std::iter::empty::<(String, PropValue)>())?,
        };
        self.set(target, PROP_DASHARRAY, PropValue::Number(length));
        self.set(target, PROP_DASHOFFSET, PropValue::Number(0.0));
        Ok(id)
    }

    /// Parse SVG path data and register it.
    pub fn add_svg_path(&mut self, name: impl Into<String>, d: &str) -> CuepathResult<PathId> {
        self.add_svg_path_with_accuracy(name, d, DEFAULT_ARCLEN_ACCURACY)
    }

    /// Parse SVG path data and register it, measuring lengths to `accuracy`.
    pub fn add_svg_path_with_accuracy(
        &mut self,
        name: impl Into<String>,
        d: &str,
        accuracy: f64,
    ) -> CuepathResult<PathId> {
        let name = name.into();
        let geometry = MotionPath::from_svg(d, accuracy)
            .map_err(|e| CuepathError::path(format!("path '{name}': {e}")))?;
        self.add_path(name, geometry)
    }

    /// Hide a path's stroke so a reveal cue can draw it in.
    pub fn prepare_draw_in(&mut self, path: PathId) {
        let length = self.path(path).length();
        let name = self.paths[path.0 as usize].name.clone();
        if let Some(&target) = self.target_idx.get(&name) {
            self.set(target, PROP_DASHARRAY, PropValue::Number(length));
            self.set(target, PROP_DASHOFFSET, PropValue::Number(length));
        }
    }

    /// Resolve a target identifier.
    pub fn resolve(&self, name: &str) -> CuepathResult<TargetId> {
        self.target_idx
            .get(name)
            .copied()
            .ok_or_else(|| CuepathError::target(format!("unknown target '{name}'")))
    }

    /// Resolve a path identifier.
    pub fn resolve_path(&self, name: &str) -> CuepathResult<PathId> {
        self.path_idx
            .get(name)
            .copied()
            .ok_or_else(|| CuepathError::target(format!("unknown path '{name}'")))
    }

    /// Identifier of a target.
    pub fn target_name(&self, target: TargetId) -> &str {
        &self.targets[target.0 as usize].name
    }

    /// Identifier of a path.
    pub fn path_name(&self, path: PathId) -> &str {
        &self.paths[path.0 as usize].name
    }

    /// Target registered under the same name as `path`, if any.
    pub fn path_target(&self, path: PathId) -> Option<TargetId> {
        self.target_idx.get(self.path_name(path)).copied()
    }

    /// Path geometry.
    pub fn path(&self, path: PathId) -> &MotionPath {
        &self.paths[path.0 as usize].geometry
    }

    /// Total length of a registered path.
    pub fn path_length(&self, path: PathId) -> f64 {
        self.path(path).length()
    }

    /// Number of registered targets.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Explicitly written value of `prop`, if any. Aliases read their first expansion.
    pub fn get(&self, target: TargetId, prop: &str) -> Option<PropValue> {
        let key = alias_expansion(prop).first().copied().unwrap_or(prop);
        self.targets[target.0 as usize].props.get(key).copied()
    }

    /// Value of `prop`, falling back to the property's neutral default when never written.
    pub fn value(&self, target: TargetId, prop: &str) -> PropValue {
        self.get(target, prop)
            .unwrap_or_else(|| PropValue::Number(default_number(prop)))
    }

    /// Numeric value of `prop` (colors read as `None`).
    pub fn number(&self, target: TargetId, prop: &str) -> Option<f64> {
        self.value(target, prop).as_number()
    }

    /// Write a property, expanding aliases (`scale`, `auto_alpha`).
    pub fn set(&mut self, target: TargetId, prop: &str, value: PropValue) {
        write_prop(&mut self.targets[target.0 as usize].props, prop, value);
    }

    /// Remove an explicitly written property (and its alias expansions).
    pub fn clear(&mut self, target: TargetId, prop: &str) {
        let props = &mut self.targets[target.0 as usize].props;
        let keys = alias_expansion(prop);
        if keys.is_empty() {
            props.remove(prop);
        } else {
            for key in keys {
                props.remove(*key);
            }
        }
    }

    /// Fraction of a path target's stroke currently drawn, in `[0, 1]`.
    pub fn revealed_fraction(&self, target: TargetId) -> Option<f64> {
        let dash = self.get(target, PROP_DASHARRAY)?.as_number()?;
        let offset = self.get(target, PROP_DASHOFFSET)?.as_number()?;
        if dash <= 0.0 {
            return Some(1.0);
        }
        Some((1.0 - offset / dash).clamp(0.0, 1.0))
    }

    /// Capture every target's property bag.
    pub fn snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            props: self.targets.iter().map(|t| t.props.clone()).collect(),
        }
    }

    /// Restore a snapshot taken from this stage. Targets registered after the snapshot keep
    /// their current values.
    pub fn restore(&mut self, snapshot: &StageSnapshot) {
        for (target, props) in self.targets.iter_mut().zip(&snapshot.props) {
            target.props.clone_from(props);
        }
    }

    /// Restore one property (and its alias expansions) from a snapshot, removing it when the
    /// snapshot never had it.
    pub fn restore_prop(&mut self, snapshot: &StageSnapshot, target: TargetId, prop: &str) {
        let Some(saved) = snapshot.props.get(target.0 as usize) else {
            return;
        };
        let props = &mut self.targets[target.0 as usize].props;
        let single = [prop];
        let keys = match alias_expansion(prop) {
            [] => &single[..],
            keys => keys,
        };
        for key in keys {
            match saved.get(*key) {
                Some(v) => {
                    props.insert((*key).to_owned(), *v);
                }
                None => {
                    props.remove(*key);
                }
            }
        }
    }

    /// Serializable view of every target's properties, keyed by identifier.
    pub fn state(&self) -> BTreeMap<String, BTreeMap<String, PropValue>> {
        self.targets
            .iter()
            .map(|t| (t.name.clone(), t.props.clone()))
            .collect()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

fn alias_expansion(prop: &str) -> &'static [&'static str] {
    match prop {
        "scale" => &["scale_x", "scale_y"],
        "auto_alpha" => &["opacity", "visibility"],
        _ => &[],
    }
}

fn write_prop(props: &mut BTreeMap<String, PropValue>, prop: &str, value: PropValue) {
    match prop {
        "auto_alpha" => {
            props.insert("opacity".to_owned(), value);
            let visible = match value {
                PropValue::Number(v) if v <= 0.0 => 0.0,
                _ => 1.0,
            };
            props.insert("visibility".to_owned(), PropValue::Number(visible));
        }
        _ => {
            let keys = alias_expansion(prop);
            if keys.is_empty() {
                props.insert(prop.to_owned(), value);
            } else {
                for key in keys {
                    props.insert((*key).to_owned(), value);
                }
            }
        }
    }
}

fn default_number(prop: &str) -> f64 {
    match prop {
        "scale" | "scale_x" | "scale_y" | "opacity" | "auto_alpha" | "visibility" => 1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/registry.rs"]
mod tests;
