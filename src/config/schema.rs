//! Configuration schema types for `bunfig.toml`
//!
//! Mirrors the documented key set of Bun's configuration file. Every field
//! is optional, key spellings follow Bun's camelCase, and keys outside the
//! documented set are kept in an open map rather than rejected. The schema
//! describes the file; it never gates the compile pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// JSX transform mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Jsx {
    /// Classic `React.createElement` transform
    #[serde(rename = "react")]
    React,
    /// Automatic runtime (`jsx` / `jsxs` imports)
    #[serde(rename = "react-jsx")]
    ReactJsx,
    /// Solid's compiled JSX
    #[serde(rename = "solid")]
    Solid,
    /// Automatic runtime with development diagnostics
    #[serde(rename = "react-jsxDEV")]
    ReactJsxDev,
}

/// Runtime log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Warn,
    Error,
}

/// How a file extension is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loader {
    Jsx,
    Js,
    Ts,
    Tsx,
    Css,
    File,
    Json,
    Toml,
    Wasm,
    Napi,
    Base64,
    Dataurl,
    Text,
}

/// Package auto-install behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AutoInstall {
    /// Install on the fly when no node_modules is present
    #[default]
    Auto,
    /// Always install on the fly
    Force,
    /// Never install automatically
    Disable,
    /// Check node_modules first, then install on the fly
    Fallback,
}

/// Additional lockfile format written alongside `bun.lockb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockfilePrint {
    Yarn,
}

/// Shell used for package.json scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunShell {
    /// The platform shell
    System,
    /// Bun's built-in shell
    Bun,
}

/// A single entry or a list of entries (Bun accepts both spellings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    /// View the entries as a slice regardless of spelling
    pub fn as_slice(&self) -> &[String] {
        match self {
            StringOrList::One(s) => std::slice::from_ref(s),
            StringOrList::Many(v) => v.as_slice(),
        }
    }
}

/// Coverage threshold, either one fraction or per-metric values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoverageThreshold {
    /// Single fraction applied to every metric
    Global(f64),
    /// Per-metric thresholds (e.g. `line`, `function`, `statement`)
    PerMetric(serde_json::Map<String, serde_json::Value>),
}

/// Registry, either a bare URL or URL plus auth token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Registry {
    Url(String),
    Detailed(RegistryConfig),
}

/// Registry with authentication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// The URL of the registry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The token to use for authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Test runner section (`[test]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestConfig {
    /// Root directory to run tests from. Default `.`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Scripts to run before each test file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preload: Option<StringOrList>,
    /// Reduce memory usage for test runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smol: Option<bool>,
    /// Enable coverage reporting. Default `false`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<bool>,
    /// Fail the run when coverage drops below this threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_threshold: Option<CoverageThreshold>,
    /// Skip test files when computing coverage. Default `false`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_skip_test_files: Option<bool>,
}

/// Package cache section (`[install.cache]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    /// Directory to use for the cache
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// When true, don't load from the global cache
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable: Option<bool>,
    /// When true, always resolve latest versions from the registry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_manifest: Option<bool>,
}

/// Lockfile section (`[install.lockfile]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LockfileConfig {
    /// Whether to generate a lockfile on install. Default `true`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save: Option<bool>,
    /// Extra lockfile format written alongside `bun.lockb`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print: Option<LockfilePrint>,
}

/// Package management section (`[install]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfig {
    /// Install optional dependencies. Default `true`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Install development dependencies. Default `true`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev: Option<bool>,
    /// Install peer dependencies. Default `true`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer: Option<bool>,
    /// Production mode: skip devDependencies. Default `false`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<bool>,
    /// Pin exact versions in package.json instead of caret ranges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
    /// Auto-install behavior
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto: Option<AutoInstall>,
    /// Refuse to update the lockfile. Default `false`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frozen_lockfile: Option<bool>,
    /// Resolve without installing. Default `false`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    /// Directory for globally installed packages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_dir: Option<String>,
    /// Directory for globally installed binaries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_bin_dir: Option<String>,
    /// Default registry. Default `https://registry.npmjs.org/`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<Registry>,
    /// Per-scope registry overrides (values may reference `$variable`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<serde_json::Map<String, serde_json::Value>>,
    /// Cache behavior
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheConfig>,
    /// Lockfile behavior
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lockfile: Option<LockfileConfig>,
}

/// Script execution section (`[run]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Shell for package.json scripts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<RunShell>,
    /// Alias `node` to `bun` for invoked scripts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bun: Option<bool>,
    /// Suppress reporting the command being run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub silent: Option<bool>,
}

/// Complete bunfig.toml configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BunConfig {
    /// Scripts or plugins to run before the entrypoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preload: Option<StringOrList>,
    /// JSX transform mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx: Option<Jsx>,
    /// Function used to create JSX elements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_factory: Option<String>,
    /// Function used for JSX fragments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_fragment: Option<String>,
    /// Module specifier for importing the JSX factory functions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_import_source: Option<String>,
    /// Reduce memory usage at the cost of performance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smol: Option<bool>,
    /// Log verbosity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
    /// Global identifier substitutions; values are JSON expressions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub define: Option<HashMap<String, String>>,
    /// File-extension-to-loader mapping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<HashMap<String, Loader>>,
    /// Enable/disable analytics records. Default `true`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<bool>,
    /// Test runner settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<TestConfig>,
    /// Package management settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallConfig>,
    /// Script execution settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunConfig>,
    /// Keys outside the documented set, carried so unknown keys survive
    /// serde round-trips
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the questionable field (e.g. "install.registry")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bunfig: '{}' {}", self.field, self.message)
    }
}

impl BunConfig {
    /// Validate the configuration and return any findings.
    ///
    /// Structural sanity checks only. Callers surface these as warnings;
    /// nothing here blocks compilation.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if let Some(preload) = &self.preload {
            check_preload(preload, "preload", &mut errors);
        }

        if let Some(define) = &self.define {
            for (identifier, expression) in define {
                if serde_json::from_str::<serde_json::Value>(expression).is_err() {
                    errors.push(ConfigValidationError {
                        field: format!("define.{}", identifier),
                        message: "must be a JSON expression string".to_string(),
                    });
                }
            }
        }

        if let Some(test) = &self.test {
            if let Some(preload) = &test.preload {
                check_preload(preload, "test.preload", &mut errors);
            }
            if let Some(CoverageThreshold::Global(fraction)) = test.coverage_threshold {
                if !(0.0..=1.0).contains(&fraction) {
                    errors.push(ConfigValidationError {
                        field: "test.coverageThreshold".to_string(),
                        message: "must be a fraction between 0 and 1".to_string(),
                    });
                }
            }
        }

        if let Some(install) = &self.install {
            let registry_url = match &install.registry {
                Some(Registry::Url(url)) => Some(url),
                Some(Registry::Detailed(detailed)) => detailed.url.as_ref(),
                None => None,
            };
            if registry_url.is_some_and(|url| url.is_empty()) {
                errors.push(ConfigValidationError {
                    field: "install.registry".to_string(),
                    message: "URL must be non-empty".to_string(),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn check_preload(preload: &StringOrList, field: &str, errors: &mut Vec<ConfigValidationError>) {
    if preload.as_slice().iter().any(|entry| entry.is_empty()) {
        errors.push(ConfigValidationError {
            field: field.to_string(),
            message: "entries must be non-empty paths".to_string(),
        });
    }
}
