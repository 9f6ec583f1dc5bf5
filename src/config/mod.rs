//! Configuration schema for `bunfig.toml`
//!
//! Provides the typed description of every recognized configuration key.

pub mod schema;

pub use schema::*;
