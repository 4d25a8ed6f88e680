//! Penney's game driver.
//!
//! Subcommands: train, estimate, consistency, tournament, oracle, evaluate.
//! Add --json for machine-readable output and --seed for reproducible runs.

fn main() -> anyhow::Result<()> {
    penney::core::log();
    penney::core::brb();
    penney::Cli::run()
}
