use clap::Parser;
use viewconf::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
