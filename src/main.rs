//! CLI entrypoint for convertlf.

use clap::Parser;
use convertlf::cli::{run, Args};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    std::process::exit(run(args));
}
