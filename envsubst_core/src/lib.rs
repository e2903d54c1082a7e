//! `envsubst_core` is the substitution engine behind the `envsubst` command.
//! It replaces `$NAME` and `${NAME}` references in text with values from an
//! environment-like source, following a small policy for unset and empty
//! variables.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Shell format (optional)
//!   → Reference scanner (extracts the restricted name list)
//!   → Key resolver (builds an open or closed KeyMapping from a VariableSource)
//!   → Restriction policy (unset / empty handling flags)
//!   → Substitution engine (replaces each reference or fails the whole call)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Defaults loaded from `envsubst.toml`.
//! - [`route`] — `IN[:OUT]` file routes and sequential batch rewriting.
//! - [`source`] — Variable sources, the three-state [`Binding`], and the
//!   [`KeyResolver`].
//!
//! ## Reference Syntax
//!
//! A reference is `$`, an optional `{`, zero or more `[A-Za-z0-9_]`
//! characters, and an optional `}`. The braces are matched independently:
//! `${NAME` and `$NAME}` are both references to `NAME`, and a lone `$`
//! references the empty name.
//!
//! ## Quick Start
//!
//! ```rust
//! use envsubst_core::KeyResolver;
//! use envsubst_core::MapSource;
//! use envsubst_core::RestrictionPolicy;
//! use envsubst_core::substitute;
//!
//! let source: MapSource = [("NAME", "World")].into_iter().collect();
//! let mapping = KeyResolver::new(&source).resolve(None);
//! let output = substitute("Hello $NAME!", &mapping, &RestrictionPolicy::new()).unwrap();
//! assert_eq!(output, "Hello World!");
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use lexer::extract_names;
pub use lexer::scan_references;
pub use policy::*;
pub use route::*;
pub use source::*;
pub use tokens::*;

pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
pub(crate) mod lexer;
mod policy;
pub mod route;
pub mod source;
mod tokens;
