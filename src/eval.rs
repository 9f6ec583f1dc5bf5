//! Evaluation of the user's `bun.config.ts` module
//!
//! The configuration module is arbitrary user code, so it never runs inside
//! this process. A `bun` subprocess rooted at the working directory imports
//! the module, serializes its default export with `JSON.stringify`, and
//! prints the JSON text to stdout. The only channel between the module and
//! this tool is that captured text.

use std::io;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

/// Name of the configuration module, resolved relative to the working directory
pub const CONFIG_MODULE: &str = "bun.config.ts";

/// Script handed to `bun --print`: import the module, stringify its default
/// export. A module that throws, is missing, or exports something
/// `JSON.stringify` cannot handle makes the subprocess fail or print
/// `undefined`.
const PRINT_SNIPPET: &str =
    r#"const mod = await import("./bun.config.ts"); JSON.stringify(mod.default);"#;

/// Evaluation error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EvalError {
    /// The runtime executable could not be started
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        /// The executable that was invoked
        program: String,
        /// The underlying spawn error
        source: io::Error,
    },
    /// The configuration module failed to evaluate
    #[error("Evaluating bun.config.ts failed (exit code {code}):\n{stderr}")]
    Failed {
        /// Exit code of the evaluation subprocess
        code: i32,
        /// Captured stderr of the evaluation subprocess
        stderr: String,
    },
    /// The module evaluated but produced no JSON
    #[error("bun.config.ts has no JSON-serializable default export")]
    NoDefaultExport,
}

/// Runs the configuration module in an isolated subprocess.
///
/// Uses the `bun` on `PATH` by default; tests substitute a stub executable
/// via [`Evaluator::with_program`].
#[derive(Debug, Clone)]
pub struct Evaluator {
    program: String,
}

impl Evaluator {
    /// Evaluator backed by the `bun` runtime on `PATH`.
    pub fn new() -> Self {
        Self {
            program: "bun".to_string(),
        }
    }

    /// Evaluator backed by a specific executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Evaluate the configuration module under `cwd` and capture its default
    /// export as JSON text.
    ///
    /// Blocks until the subprocess exits and its output is fully buffered.
    /// Any failure mode of the module (absent, throws, non-serializable
    /// export) surfaces as an error; there is no fallback to an empty
    /// configuration.
    pub fn evaluate(&self, cwd: &Path) -> Result<String, EvalError> {
        let output = Command::new(&self.program)
            .current_dir(cwd)
            .arg("--print")
            .arg(PRINT_SNIPPET)
            .output()
            .map_err(|source| EvalError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(EvalError::Failed {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        let json = String::from_utf8_lossy(&output.stdout).trim().to_string();
        // JSON.stringify(undefined) prints the literal `undefined`
        if json.is_empty() || json == "undefined" {
            return Err(EvalError::NoDefaultExport);
        }
        Ok(json)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_spawn_error_for_missing_program() {
        let temp = TempDir::new().unwrap();
        let result = Evaluator::with_program("bunfig-test-no-such-runtime").evaluate(temp.path());
        assert!(matches!(result, Err(EvalError::Spawn { .. })));
    }

    #[cfg(unix)]
    mod stub {
        use super::super::{EvalError, Evaluator};
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::{Path, PathBuf};
        use tempfile::TempDir;

        /// Write an executable stub script and return its path.
        fn write_stub(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("stub-runtime");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            let mut perms = fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms).unwrap();
            path
        }

        #[test]
        fn test_captures_stdout_json() {
            let temp = TempDir::new().unwrap();
            let stub = write_stub(temp.path(), r#"echo '{"smol": true}'"#);

            let json = Evaluator::with_program(stub.to_string_lossy())
                .evaluate(temp.path())
                .unwrap();
            assert_eq!(json, r#"{"smol": true}"#);
        }

        #[test]
        fn test_nonzero_exit_surfaces_code_and_stderr() {
            let temp = TempDir::new().unwrap();
            let stub = write_stub(
                temp.path(),
                r#"echo 'error: Cannot find module "./bun.config.ts"' >&2; exit 3"#,
            );

            let result = Evaluator::with_program(stub.to_string_lossy()).evaluate(temp.path());
            match result {
                Err(EvalError::Failed { code, stderr }) => {
                    assert_eq!(code, 3);
                    assert!(stderr.contains("Cannot find module"));
                }
                other => panic!("expected Failed, got {:?}", other),
            }
        }

        #[test]
        fn test_undefined_export_is_an_error() {
            let temp = TempDir::new().unwrap();
            let stub = write_stub(temp.path(), "echo undefined");

            let result = Evaluator::with_program(stub.to_string_lossy()).evaluate(temp.path());
            assert!(matches!(result, Err(EvalError::NoDefaultExport)));
        }

        #[test]
        fn test_empty_output_is_an_error() {
            let temp = TempDir::new().unwrap();
            let stub = write_stub(temp.path(), "true");

            let result = Evaluator::with_program(stub.to_string_lossy()).evaluate(temp.path());
            assert!(matches!(result, Err(EvalError::NoDefaultExport)));
        }
    }
}
