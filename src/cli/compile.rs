//! Compile command implementation
//!
//! Strictly sequential pipeline: evaluate the configuration module in a
//! subprocess, convert the captured JSON to TOML, replace the artifact.
//! Each stage blocks on the previous one's complete output, and a failing
//! stage aborts the run before anything is written.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::BunConfig;
use crate::convert;
use crate::eval::{Evaluator, CONFIG_MODULE};
use crate::output;

/// Run the compile command
pub fn run_compile(cwd: Option<&Path>, verbose: bool) -> ExitCode {
    let cwd = match cwd {
        Some(path) => path.to_path_buf(),
        None => match env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: Cannot resolve current directory: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
    };

    if verbose {
        println!("Evaluating {} in {}", CONFIG_MODULE, cwd.display());
    }

    let json = match Evaluator::new().evaluate(&cwd) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    report_schema_notes(&json, verbose);

    let toml_text = match convert::json_to_toml(&json) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match output::write_artifact(&cwd, &toml_text) {
        Ok(path) => {
            println!("Saved: {}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Surface schema-level notes without gating the pipeline.
///
/// Unknown keys and validation findings are informational; the artifact
/// always carries the configuration exactly as the module exported it.
fn report_schema_notes(json: &str, verbose: bool) {
    let Ok(config) = serde_json::from_str::<BunConfig>(json) else {
        return;
    };

    if verbose && !config.extra.is_empty() {
        let keys: Vec<&str> = config.extra.keys().map(String::as_str).collect();
        println!("Passing through unrecognized keys: {}", keys.join(", "));
    }

    for finding in config.validate() {
        eprintln!("Warning: {}", finding);
    }
}
