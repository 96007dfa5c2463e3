//! Configuration management for the terminal client.
//!
//! Settings are layered from built-in defaults, an optional TOML file and
//! command line arguments or `CARENOVA_*` environment variables.

mod config;

pub use config::*;
