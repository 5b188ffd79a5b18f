mod backends;
mod config;
mod model;
mod protocol;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::backends::applications::ApplicationsBackend;
use crate::backends::google::GoogleSearchBackend;
use crate::config::load_config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    backend: BackendArg,
}

#[derive(Subcommand, Debug)]
enum BackendArg {
    /// Fuzzy-search installed desktop applications
    Applications,
    /// Turn g:-prefixed queries into a Google search link
    GoogleSearch,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config().context("loading configuration")?;

    match args.backend {
        BackendArg::Applications => {
            let backend = ApplicationsBackend::new(&config);
            protocol::serve(&backend)
        }
        BackendArg::GoogleSearch => protocol::serve(&GoogleSearchBackend::new()),
    }
}
