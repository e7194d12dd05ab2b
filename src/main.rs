mod alpha_cmd;
mod cli;
mod config;
mod convert;
mod lcoe_cmd;
mod logging;
mod project_cmd;
mod report;
mod roughness_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Project(args) => project_cmd::run(args),
        Command::Roughness(args) => roughness_cmd::run(args),
        Command::Alpha(args) => alpha_cmd::run(args),
        Command::Lcoe(args) => lcoe_cmd::run(args),
    }
}
