//! bunfig - Compile a `bun.config.ts` module into `bunfig.toml`
//!
//! This library provides:
//! - A typed schema for Bun's `bunfig.toml` configuration file
//! - A pipeline that evaluates a project's `bun.config.ts` default export
//!   in an isolated `bun` subprocess and converts the captured JSON into
//!   the TOML configuration file Bun reads at startup

pub mod cli;
pub mod config;
pub mod convert;
pub mod eval;
pub mod output;
