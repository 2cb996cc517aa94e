// The launcher has nothing to show, so release builds on Windows get no console window.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use clap::Parser;
use log::info;
use nvim_launcher::cli::Cli;
use nvim_launcher::{exit_code, run};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = run(cli.args);
    match &result {
        Ok(outcome) => info!("nvim-launcher done ({})", outcome.child),
        Err(e) => log::error!("{}", e),
    }
    std::process::exit(exit_code(&result));
}
