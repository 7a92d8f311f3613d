//! The common fields every schema node carries, per `spec.md` §4.1
//!
//! `original_source`'s `ParameterBase` is an inheritance root; here the same
//! contract is composition — every concrete node type (`Atom`, `Table`,
//! `Sequence`, `Tuple`) embeds a `Base` and exposes it through identical
//! inherent accessors, and [`crate::ParamNode`] forwards to whichever
//! variant is active.

use crate::key::Key;
use crate::kind::ParameterKind;

#[derive(Clone, Debug)]
pub(crate) struct Base {
	pub name: String,
	pub key: Key,
	pub comment: String,
	pub has_default: bool,
	pub is_optional: bool,
	pub kind: ParameterKind,
}

impl Base {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn comment(&self) -> &str {
		&self.comment
	}

	pub fn has_default(&self) -> bool {
		self.has_default
	}

	pub fn is_optional(&self) -> bool {
		self.is_optional
	}

	pub fn parameter_type(&self) -> ParameterKind {
		self.kind
	}

	/// The bracketed-name form used when printing a table member, or the
	/// empty string for a sequence/tuple element (whose own key already
	/// carries its position), per `original_source`'s `is_sequence_element`
	pub fn is_sequence_element(&self) -> bool {
		self.key.ends_with(']')
	}
}
