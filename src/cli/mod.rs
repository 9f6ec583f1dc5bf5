//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod compile;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit codes; clap reports invalid invocations with its own code 2
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;

/// bunfig - Compile a bun.config.ts module into bunfig.toml
#[derive(Parser)]
#[command(name = "bunfig")]
#[command(about = "Compile a bun.config.ts module into bunfig.toml")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile bun.config.ts in the working directory into bunfig.toml
    Compile {
        /// Directory containing bun.config.ts (default: current directory)
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Recompile whenever bun.config.ts changes
    Watch {
        /// Directory containing bun.config.ts (default: current directory)
        #[arg(long)]
        cwd: Option<PathBuf>,
    },

    /// Scaffold a starter bun.config.ts
    Init {
        /// Directory to scaffold in (default: current directory)
        #[arg(long)]
        cwd: Option<PathBuf>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile { cwd, verbose } => compile::run_compile(cwd.as_deref(), verbose),
        // Recognized commands without behavior yet; they reserve the
        // surface and report that, rather than failing or acting silently
        Commands::Watch { .. } => {
            eprintln!("`watch` is not implemented yet");
            ExitCode::from(EXIT_SUCCESS)
        }
        Commands::Init { .. } => {
            eprintln!("`init` is not implemented yet");
            ExitCode::from(EXIT_SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parse_compile_with_cwd() {
        let cli = Cli::try_parse_from(["bunfig", "compile", "--cwd=/tmp/proj"]).unwrap();
        match cli.command {
            Commands::Compile { cwd, verbose } => {
                assert_eq!(cwd.as_deref(), Some(Path::new("/tmp/proj")));
                assert!(!verbose);
            }
            _ => panic!("expected compile command"),
        }
    }

    #[test]
    fn test_parse_compile_defaults() {
        let cli = Cli::try_parse_from(["bunfig", "compile"]).unwrap();
        match cli.command {
            Commands::Compile { cwd, verbose } => {
                assert!(cwd.is_none());
                assert!(!verbose);
            }
            _ => panic!("expected compile command"),
        }
    }

    #[test]
    fn test_parse_watch_and_init() {
        assert!(matches!(
            Cli::try_parse_from(["bunfig", "watch"]).unwrap().command,
            Commands::Watch { .. }
        ));
        assert!(matches!(
            Cli::try_parse_from(["bunfig", "init", "--cwd=."]).unwrap().command,
            Commands::Init { .. }
        ));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["bunfig", "frobnicate"]).is_err());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["bunfig", "compile", "--mode=fast"]).is_err());
    }
}
