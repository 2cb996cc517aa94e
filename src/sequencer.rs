//! Ordered setup and launch with rollback.
//!
//! ```text
//! Idle -> FontsLoaded -> EnvConfigured -> Launched -> Cleanup -> Done
//!   \________ any failure after fonts loaded ________/
//! ```
//!
//! Fonts are the only resource with an explicit undo. Once [`Registrar::load_all`]
//! succeeds, every exit path passes through `Cleanup` and unloads the batch
//! exactly once. A font failure leaves nothing loaded and goes straight to `Done`.

use crate::env::{Configurator, EnvAssignment, EnvError, EnvironmentWriter, SearchPath};
use crate::font::{FontError, Registrar, ResourceBatch, ResourceLoader};
use crate::launch::{ChildExit, LaunchError, LaunchRequest, ProcessLauncher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Idle,
    FontsLoaded,
    EnvConfigured,
    Launched,
    Cleanup,
    Done,
}

/// Everything one launch needs, built once from the install layout.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub fonts: ResourceBatch,
    pub search_path: SearchPath,
    /// Fixed assignments, applied after the search path.
    pub assignments: Vec<EnvAssignment>,
    pub request: LaunchRequest,
}

/// A completed launch. The child's exit code is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub child: ChildExit,
}

#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    #[error("font loading failed: {0}")]
    Fonts(#[from] FontError),
    #[error("environment setup failed: {0}")]
    Environment(#[from] EnvError),
    #[error("launch failed: {0}")]
    Launch(#[from] LaunchError),
}

pub struct Sequencer<L, E, P> {
    registrar: Registrar<L>,
    configurator: Configurator<E>,
    launcher: P,
    history: Vec<LaunchState>,
}

impl<L, E, P> Sequencer<L, E, P>
where
    L: ResourceLoader,
    E: EnvironmentWriter,
    P: ProcessLauncher,
{
    pub fn new(loader: L, env: E, launcher: P) -> Self {
        Self {
            registrar: Registrar::new(loader),
            configurator: Configurator::new(env),
            launcher,
            history: vec![LaunchState::Idle],
        }
    }

    pub fn state(&self) -> LaunchState {
        self.history.last().copied().unwrap_or(LaunchState::Idle)
    }

    /// States visited by the last [`run`](Self::run), in order.
    pub fn history(&self) -> &[LaunchState] {
        &self.history
    }

    pub fn registrar(&self) -> &Registrar<L> {
        &self.registrar
    }

    pub fn configurator(&self) -> &Configurator<E> {
        &self.configurator
    }

    pub fn launcher(&self) -> &P {
        &self.launcher
    }

    fn enter(&mut self, state: LaunchState) {
        log::trace!("{:?} -> {:?}", self.state(), state);
        self.history.push(state);
    }

    pub fn run(&mut self, plan: &LaunchPlan) -> Result<LaunchOutcome, SequenceError> {
        self.history.clear();
        self.history.push(LaunchState::Idle);

        if let Err(e) = self.registrar.load_all(&plan.fonts) {
            // load_all already unloaded whatever it had registered.
            self.enter(LaunchState::Done);
            return Err(e.into());
        }
        self.enter(LaunchState::FontsLoaded);

        let result = self.configure_and_launch(plan);

        self.enter(LaunchState::Cleanup);
        self.registrar.unload_all(&plan.fonts);
        self.enter(LaunchState::Done);

        result
    }

    fn configure_and_launch(&mut self, plan: &LaunchPlan) -> Result<LaunchOutcome, SequenceError> {
        let search_path = self
            .configurator
            .compute_augmented_search_path(&plan.search_path)?;

        let mut assignments = Vec::with_capacity(plan.assignments.len() + 1);
        assignments.push(search_path);
        assignments.extend(plan.assignments.iter().cloned());
        self.configurator.apply_set(&assignments)?;
        self.enter(LaunchState::EnvConfigured);

        let child = self.launcher.run(&plan.request).map_err(|e| {
            match e.os_code() {
                Some(code) => log::error!("{} (os error {})", e, code),
                None => log::error!("{}", e),
            }
            e
        })?;
        self.enter(LaunchState::Launched);

        log::info!("{} finished with {}", plan.request.program.display(), child);
        Ok(LaunchOutcome { child })
    }
}
