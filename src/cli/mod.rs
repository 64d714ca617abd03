//! # CLI Module
//!
//! Command-line interface for the `attrgen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate a Rust module from a design:
//!
//! ```bash
//! attrgen generate --design cellar.yaml --output src/cellar.rs
//! ```
//!
//! Options:
//! - `--design <FILE>` - Path to the design (YAML or JSON, required)
//! - `--output <FILE>` - Where to write the module (default: stdout)
//! - `--config <FILE>` - Generator config (default: `attrgen.toml` next to the design)
//!
//! ### `check`
//!
//! Report structural problems in a design. Exits non-zero when any are found:
//!
//! ```bash
//! attrgen check --design cellar.yaml
//! ```
//!
//! ### `ident`
//!
//! Print the Rust identifiers names resolve to:
//!
//! ```bash
//! attrgen ident user_id test-B --lower
//! ```
//!
//! ## Logging
//!
//! Logs go to stderr; see [`crate::logging`] for the environment variables.
//! `--verbose` raises the level to debug.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run, run_cli, Cli, Commands};
