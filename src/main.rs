use clap::Parser;
use valuescreen::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
