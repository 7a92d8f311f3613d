//! A typed, self-describing schema engine for hierarchical configuration
//! documents.
//!
//! A schema is built up from five parameter kinds — [`Atom`], [`Table`],
//! fixed and vector [`Sequence`]s, and [`Tuple`] — composed with ordinary
//! Rust closures rather than derived from a user struct's fields. Every
//! node computes its own fully-qualified [`key`](node::ParamNode::key) as
//! it is constructed (`outer.inner[2]` style), self-describes through
//! [`AllowedConfigurationPrinter`], and can validate and bind an untyped
//! [`DocumentNode`] against itself through [`ValidationBinder`]:
//!
//! ```
//! use cfg_schema::{Atom, Table, DocumentNode, ValidationBinder};
//!
//! let mut schema = Table::build("server", "", |b| {
//!     b.push(Atom::<String>::with_default("host", "0.0.0.0".to_string()));
//!     b.push(Atom::<i64>::new("port"));
//! })
//! .into();
//!
//! // built by a parser in a real caller; constructed by hand here
//! let document = DocumentNode::Table(
//!     [("port".to_string(), DocumentNode::Atom("9090".to_string()))]
//!         .into_iter()
//!         .collect(),
//! );
//!
//! ValidationBinder::new(&[]).validate_and_bind(&mut schema, &document).unwrap();
//! ```
//!
//! See `DESIGN.md` for how this engine's construction-time name stack and
//! schema registry relate to the raw-pointer member discovery of the
//! system this crate's data model is grounded on.

mod atom;
mod base;
pub mod document;
pub mod error;
mod key;
mod kind;
mod node;
pub mod printer;
pub mod registry;
mod sequence;
mod table;
mod tuple;
pub mod validate;
pub mod visitor;

pub use atom::{Atom, Atomic};
pub use document::DocumentNode;
pub use error::{ParamError, ParamErrorKind};
pub use kind::ParameterKind;
pub use node::ParamNode;
pub use printer::AllowedConfigurationPrinter;
pub use sequence::Sequence;
pub use table::{Table, TableBuilder};
pub use tuple::{Tuple, TupleBuilder};
pub use validate::ValidationBinder;
pub use visitor::{visit, ParameterVisitor};
