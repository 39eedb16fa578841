//! CLI entry point for parley.

mod attachments;
mod cli;
mod commands;
mod output;
mod surface;

use std::path::{Path, PathBuf};

use clap::Parser;
use parley_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Nearest `name` in `start` or one of its parents.
fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .take(32)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.exists())
}

/// Load credentials and settings into the process environment.
/// Order: 1) ~/.parley/env  2) nearest .env from the working directory up.
/// dotenvy never overrides a variable that is already set, so the real
/// environment wins over both files and the global file wins over the project one.
fn load_parley_env() {
    if let Some(home) = dirs::home_dir() {
        let global = home.join(".parley").join("env");
        if global.exists() {
            let _ = dotenvy::from_path(&global);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(env_file) = find_upwards(&cwd, ".env") {
            let _ = dotenvy::from_path(&env_file);
        }
    }
}

fn init_observability(verbose: bool) {
    let mut config = ObservabilityConfig::from_env().with_version(env!("CARGO_PKG_VERSION"));
    if verbose && config.log_level.is_none() {
        config = config.with_log_level("info");
    }
    if let Err(e) = parley_observability::init(config) {
        output::warning(&format!("Logging disabled: {}", e));
    }
}

#[tokio::main]
async fn main() {
    load_parley_env();
    let cli = Cli::parse();
    output::init(cli.output);
    init_observability(cli.verbose);

    let result = commands::handle(cli).await;
    parley_observability::shutdown();

    if let Err(e) = result {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
