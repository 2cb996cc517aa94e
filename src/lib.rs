pub mod cli;
pub mod config;
pub mod constants;
pub mod env;
pub mod font;
pub mod launch;
pub mod layout;
pub mod sequencer;

use log::info;

use crate::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::env::ProcessEnvironment;
use crate::font::SystemFontLoader;
use crate::launch::SystemLauncher;
use crate::layout::Layout;
use crate::sequencer::{LaunchOutcome, Sequencer};

pub fn run(args: Vec<String>) -> Result<LaunchOutcome, Box<dyn std::error::Error>> {
    let root = layout::install_root()?;
    let config = config::Config::load(&root);
    let plan = Layout::new(root, config).plan(args);

    info!("Launching {}", plan.request.command_line());

    let mut sequencer = Sequencer::new(
        SystemFontLoader::new(),
        ProcessEnvironment::new(),
        SystemLauncher::new(),
    );
    Ok(sequencer.run(&plan)?)
}

/// Process exit status for a finished run. The child's own exit code is
/// never propagated: reaching it at all counts as success.
pub fn exit_code<E>(result: &Result<LaunchOutcome, E>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}
