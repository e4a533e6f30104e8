use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::choreography::landing::{landing_stage, load_sequence};
use crate::choreography::page::LandingPage;
use crate::foundation::error::{CuepathError, CuepathResult};
use crate::scene::model::SceneDef;
use crate::stage::registry::Stage;
use crate::timeline::sequence::Sequence;
use crate::timeline::sequencer::{Navigator, Sequencer};

/// A parsed scene file.
#[derive(Clone, Debug)]
pub struct Scene {
    def: SceneDef,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CuepathResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| CuepathError::serde(format!("parse scene JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CuepathResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CuepathError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Wrap an already built definition.
    pub fn from_def(def: SceneDef) -> Self {
        Self { def }
    }

    /// The underlying definition.
    pub fn def(&self) -> &SceneDef {
        &self.def
    }

    /// Whether the scene plays the built-in landing choreography.
    pub fn is_landing(&self) -> bool {
        self.def.cues.is_none()
    }

    /// Build the stage and the sequence to play on it.
    ///
    /// Landing scenes play the intro and main timelines merged into one sequence; use
    /// [`Scene::landing_page`] for the restartable three-timeline controller.
    #[tracing::instrument(skip(self), fields(landing = self.is_landing()))]
    pub fn build(&self) -> CuepathResult<(Stage, Sequence)> {
        let stage = self.stage()?;
        let sequence = match &self.def.cues {
            Some(cues) => cues.clone(),
            None => load_sequence(),
        };
        Ok((stage, sequence))
    }

    /// Build a sequencer over [`Scene::build`] output.
    pub fn sequencer<N: Navigator>(&self, navigator: N) -> CuepathResult<Sequencer<N>> {
        let (stage, sequence) = self.build()?;
        Sequencer::with_opts(&sequence, stage, navigator, self.def.sequencer)
    }

    /// Build the landing page controller. Fails for scenes with their own cue list.
    pub fn landing_page<N: Navigator>(&self, navigator: N) -> CuepathResult<LandingPage<N>> {
        if !self.is_landing() {
            return Err(CuepathError::validation(
                "scene defines its own cues; it is not a landing page",
            ));
        }
        LandingPage::from_stage(self.stage()?, navigator, self.def.sequencer)
    }

    fn stage(&self) -> CuepathResult<Stage> {
        let def = &self.def;
        let mut stage = if self.is_landing() {
            landing_stage(&def.paths, def.path_accuracy)?
        } else {
            let mut stage = Stage::new();
            for (name, d) in &def.paths {
                stage.add_svg_path_with_accuracy(name.as_str(), d, def.path_accuracy)?;
            }
            stage
        };

        for (name, props) in &def.targets {
            match stage.resolve(name) {
                Ok(target) => {
                    for (prop, value) in props {
                        stage.set(target, prop, *value);
                    }
                }
                Err(_) => {
                    stage.add_target(name.as_str(), props.iter().map(|(k, v)| (k.as_str(), *v)))?;
                }
            }
        }

        for name in &def.draw_in {
            let path = stage.resolve_path(name)?;
            stage.prepare_draw_in(path);
        }
        Ok(stage)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
