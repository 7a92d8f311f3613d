//! The external document tree, per `spec.md` §6
//!
//! This engine does not parse configuration documents — it only defines the
//! shape a parser is expected to hand it: [`DocumentNode`] is an abstract
//! tree where each node is an atom value, a table of named children, or a
//! sequence of children. Keys in tables are bare identifiers matching
//! `[A-Za-z_][A-Za-z0-9_]*`; this module does not validate that shape since
//! producing it is the parser's job, not this crate's.

use indexmap::IndexMap;

/// A single node of an already-parsed configuration document
///
/// Table members use [`IndexMap`] rather than [`std::collections::HashMap`]
/// so that document-order is preserved for diagnostics and round-tripping,
/// matching how the rest of the ecosystem represents ordered string-keyed
/// maps (e.g. `grill-json-schema`'s use of `indexmap` for schema objects).
#[derive(Clone, Debug, PartialEq)]
pub enum DocumentNode {
	Atom(String),
	Table(IndexMap<String, DocumentNode>),
	Sequence(Vec<DocumentNode>),
}

impl DocumentNode {
	pub fn as_atom(&self) -> Option<&str> {
		match self {
			Self::Atom(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_table(&self) -> Option<&IndexMap<String, DocumentNode>> {
		match self {
			Self::Table(m) => Some(m),
			_ => None,
		}
	}

	pub fn as_sequence(&self) -> Option<&[DocumentNode]> {
		match self {
			Self::Sequence(s) => Some(s),
			_ => None,
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn json_conversion_builds_expected_shape() {
		let doc: DocumentNode = serde_json::json!({
			"host": "localhost",
			"port": 8080,
			"tags": ["a", "b"],
		})
		.into();
		let table = doc.as_table().unwrap();
		assert_eq!(table["host"].as_atom(), Some("localhost"));
		assert_eq!(table["port"].as_atom(), Some("8080"));
		assert_eq!(table["tags"].as_sequence().unwrap().len(), 2);
	}
}
