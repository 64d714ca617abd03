//! # Design Module
//!
//! The attribute graph: the in-memory description of user types that every
//! synthesizer walks.
//!
//! ## Model
//!
//! - [`Attribute`] - a typed field descriptor with validations, a default
//!   value and free-form metadata
//! - [`DataType`] - the closed set of shapes: primitives, arrays, maps,
//!   inline objects, and references to named or projected user types
//! - [`UserType`] - a name bound to an object attribute, optionally with views
//! - [`Design`] - the registry resolving type references; references go
//!   through it, which is how a type refers to itself
//!
//! ## Loading
//!
//! Designs are written in YAML or JSON and loaded with [`load_design`]:
//!
//! ```yaml
//! types:
//!   - name: Bottle
//!     required: [name]
//!     attributes:
//!       - { name: name, type: string, min_length: 1 }
//!       - { name: vintage, type: integer, minimum: 1900, default: 2000 }
//!       - { name: related, type: { array: { type: Bottle } } }
//!     views:
//!       - { name: default, attributes: [name, vintage] }
//! transforms:
//!   - { source: Bottle, target: BottleSummary }
//! ```
//!
//! Loaded designs are not trusted: [`Design::check`] reports structural
//! problems before any code is synthesized.

mod check;
mod load;
mod registry;
mod types;

pub use check::{print_issues, DesignIssue, Severity};
pub use load::{load_design, parse_design, DesignFormat};
pub use registry::{Design, DesignError, TransformDecl};
pub use types::*;
