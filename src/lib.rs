//! # attrgen
//!
//! **attrgen** synthesizes Rust code from an attribute type graph: the types
//! a service exchanges, described as attributes with validation rules,
//! defaults and metadata.
//!
//! ## Overview
//!
//! For every user type in a design, attrgen emits:
//!
//! - a **private** struct, in which every field is optional, with
//!   `validate()`, `finalize()` (fills in defaults) and `publicize()`
//! - a **public** struct, in which required and defaulted fields hold values
//!   directly, with `validate()`
//! - one struct per **view** of a projected type, with projection methods
//!
//! Declared transforms become free functions copying one type into another
//! by matching fields on their transform keys.
//!
//! ## Architecture
//!
//! - **[`design`]** - The attribute graph model, design loading and checks
//! - **[`generator`]** - Name resolution, the synthesizers, and module rendering
//! - **[`runtime`]** - Error aggregation and format checks used by generated code
//! - **[`config`]** - Generator configuration (`attrgen.toml`)
//! - **[`logging`]** - Structured logging setup
//! - **[`cli`]** - The `attrgen` command-line interface
//!
//! ### Generation Flow
//!
//! ```text
//! design.yaml → design::load_design → Design::validate
//!             → generator::generate → (structs, impls, transforms)
//!             → askama module template → output .rs file
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use attrgen::config::GeneratorConfig;
//! use attrgen::design::{parse_design, DesignFormat};
//! use attrgen::generator::generate;
//!
//! let design = parse_design(
//!     r#"
//! types:
//!   - name: Bottle
//!     required: [name]
//!     attributes:
//!       - { name: name, type: string, min_length: 1 }
//!       - { name: vintage, type: integer, minimum: 1900, default: 2000 }
//! "#,
//!     DesignFormat::Yaml,
//! )
//! .unwrap();
//!
//! let module = generate(&design, &GeneratorConfig::default()).unwrap();
//! assert!(module.source.contains("pub struct BottlePrivate"));
//! assert!(module.source.contains("pub fn finalize(&mut self)"));
//! ```
//!
//! ## Command Line
//!
//! ```bash
//! attrgen check --design cellar.yaml
//! attrgen generate --design cellar.yaml --output src/cellar.rs
//! ```

pub mod cli;
pub mod config;
pub mod design;
pub mod generator;
pub mod logging;
pub mod runtime;

pub use config::GeneratorConfig;
pub use design::{load_design, Design};
pub use generator::{generate, write_module, GeneratedModule, SynthError};
