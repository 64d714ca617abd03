//! # Runtime Support
//!
//! Helpers called by the code that `attrgen` emits. A generated module imports
//! this module (the path is configurable via `runtime_path`) and uses it to
//! report validation failures and to check string formats and patterns.
//!
//! ## Error Aggregation
//!
//! Generated `validate()` methods never stop at the first violation. Every
//! failing rule pushes a [`ValidationError`] onto a [`ValidationErrors`]
//! aggregate, nested named types merge their own aggregates into the parent,
//! and the method finishes with [`ValidationErrors::into_result`]:
//!
//! ```rust
//! use attrgen::runtime::{ValidationError, ValidationErrors};
//!
//! let mut err = ValidationErrors::new();
//! err.push(ValidationError::missing_attribute("body", "name"));
//! err.push(ValidationError::invalid_length("body.name", &"", 0, 1, true));
//! assert_eq!(err.len(), 2);
//! assert!(err.into_result().is_err());
//! ```
//!
//! ## Formats
//!
//! [`validate_format`] understands the formats a design may attach to string
//! attributes (see [`Format`]). [`validate_pattern`] compiles each pattern once
//! and keeps it in a process-wide cache.

mod errors;
mod format;

pub use errors::{ValidationError, ValidationErrors};
pub use format::{validate_format, validate_pattern, Format, UnknownFormat};

#[cfg(test)]
mod tests;
