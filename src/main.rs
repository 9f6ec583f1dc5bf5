//! bunfig - Command-line tool for compiling bun.config.ts into bunfig.toml

use std::process::ExitCode;

use bunfig::cli;

fn main() -> ExitCode {
    cli::run()
}
