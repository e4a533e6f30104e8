use std::collections::BTreeMap;

use crate::choreography::landing::{
    intro_sequence, landing_stage, main_sequence, restart_sequence,
};
use crate::foundation::error::CuepathResult;
use crate::motion::path::DEFAULT_ARCLEN_ACCURACY;
use crate::stage::registry::Stage;
use crate::timeline::sequencer::{NoNavigation, Navigator, SequencerOpts, Track};

/// The landing page controller: one stage, three timelines.
///
/// [`LandingPage::start`] plays the intro and the main timeline from page load;
/// [`LandingPage::press_restart`] replays the restart-button reaction and restarts the main
/// timeline from scratch. The intro is never replayed.
pub struct LandingPage<N: Navigator = NoNavigation> {
    stage: Stage,
    navigator: N,
    intro: Track,
    main: Track,
    restart: Track,
}

impl<N: Navigator> std::fmt::Debug for LandingPage<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandingPage")
            .field("intro", &self.intro.head())
            .field("main", &self.main.head())
            .field("restart", &self.restart.head())
            .finish_non_exhaustive()
    }
}

impl<N: Navigator> LandingPage<N> {
    /// Build the page from SVG path data keyed by path identifier.
    pub fn new(paths: &BTreeMap<String, String>, navigator: N) -> CuepathResult<Self> {
        let stage = landing_stage(paths, DEFAULT_ARCLEN_ACCURACY)?;
        Self::from_stage(stage, navigator, SequencerOpts::default())
    }

    /// Bind the landing timelines to an already populated stage.
    pub fn from_stage(stage: Stage, navigator: N, opts: SequencerOpts) -> CuepathResult<Self> {
        Ok(Self {
            intro: Track::new(&intro_sequence(), &stage, opts)?,
            main: Track::new(&main_sequence(), &stage, opts)?,
            restart: Track::new(&restart_sequence(), &stage, SequencerOpts::default())?,
            stage,
            navigator,
        })
    }

    /// Page load: play the intro and the main timeline.
    pub fn start(&mut self) {
        self.intro.restart(&mut self.stage, &mut self.navigator);
        self.main.play(&mut self.stage, &mut self.navigator);
    }

    /// Restart trigger: replay the restart reaction and the main timeline from 0.
    pub fn press_restart(&mut self) {
        tracing::info!(at = self.main.head(), "restart pressed");
        self.restart.restart(&mut self.stage, &mut self.navigator);
        self.main.restart(&mut self.stage, &mut self.navigator);
    }

    /// Frame callback for all three timelines.
    pub fn tick(&mut self, dt: f64) {
        for track in [&mut self.intro, &mut self.main, &mut self.restart] {
            track.tick(&mut self.stage, &mut self.navigator, dt);
        }
    }

    /// Pause the main timeline.
    pub fn pause(&mut self) {
        self.main.pause();
    }

    /// Resume the main timeline.
    pub fn resume(&mut self) {
        self.main.resume();
    }

    /// Whether the main timeline has run to completion (navigation included).
    pub fn is_finished(&self) -> bool {
        self.main.is_finished()
    }

    /// Stage as written so far.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The main timeline.
    pub fn main(&self) -> &Track {
        &self.main
    }

    /// The intro timeline.
    pub fn intro(&self) -> &Track {
        &self.intro
    }

    /// The restart-button timeline.
    pub fn restart_track(&self) -> &Track {
        &self.restart
    }

    /// Injected navigator.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/page.rs"]
mod tests;
