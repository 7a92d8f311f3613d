//! The validation binder, per `spec.md` §4.10
//!
//! Walks a schema tree and a [`DocumentNode`] together. For every node it
//! checks structural conformance — a table's document counterpart must be a
//! table, a fixed sequence's counterpart must have exactly as many elements
//! as declared, every non-defaulted/non-optional member must be present,
//! and every document key must have a schema counterpart unless it is
//! explicitly ignored — then binds atoms to their document values. All
//! deviations are collected rather than stopping at the first one, so a
//! caller sees every problem with a document in a single pass.

use crate::document::DocumentNode;
use crate::error::{ParamError, ParamErrorKind};
use crate::node::ParamNode;

/// Drives one validate-and-bind pass
///
/// `ignored_keys` are document member names permitted at any table level
/// without a matching schema member (`original_source`'s framework-supplied
/// keys like `module_type` play this role).
pub struct ValidationBinder<'a> {
	ignored_keys: &'a [&'a str],
	errors: Vec<ParamError>,
}

impl<'a> ValidationBinder<'a> {
	pub fn new(ignored_keys: &'a [&'a str]) -> Self {
		ValidationBinder {
			ignored_keys,
			errors: Vec::new(),
		}
	}

	/// Validate `doc` against `schema`, binding every atom it touches, and
	/// return the aggregate [`ParamError::invalid_document`] if any
	/// deviation was found
	pub fn validate_and_bind(mut self, schema: &mut ParamNode, doc: &DocumentNode) -> Result<(), ParamError> {
		self.visit(schema, doc);
		self.finish()
	}

	/// Validate `doc` against a table's own members directly, without the
	/// caller needing to wrap the table in a [`ParamNode`] first — what
	/// [`crate::Table::validate`] delegates to
	pub fn validate_and_bind_table(mut self, key: &str, members: &mut [ParamNode], doc: &DocumentNode) -> Result<(), ParamError> {
		self.visit_table_members(key, members, doc);
		self.finish()
	}

	/// Like [`ValidationBinder::validate_and_bind_table`], but first strips
	/// `doc`'s ancestor prefix down to the subtree actually rooted at
	/// `table_key`, per `spec.md` §4.10 ("When trimParents is set,
	/// validation is performed against the subtree rooted at the table —
	/// the document's root prefix is stripped"): `doc` is the *untrimmed*
	/// document (e.g. a whole configuration file), and `table_key`'s dotted
	/// segments are walked as nested table lookups to reach the subtree this
	/// table actually validates against
	pub fn validate_and_bind_table_trimmed(
		mut self,
		table_key: &str,
		members: &mut [ParamNode],
		doc: &DocumentNode,
	) -> Result<(), ParamError> {
		match trim_to_subtree(doc, table_key) {
			Some(subtree) => {
				self.visit_table_members(table_key, members, subtree);
			}
			None => self.errors.push(ParamError::kind(ParamErrorKind::MissingRequired {
				key: table_key.to_owned(),
			})),
		}
		self.finish()
	}

	fn finish(self) -> Result<(), ParamError> {
		if self.errors.is_empty() {
			Ok(())
		} else {
			Err(ParamError::invalid_document(self.errors))
		}
	}

	fn visit(&mut self, schema: &mut ParamNode, doc: &DocumentNode) {
		match schema {
			ParamNode::Atom(_) => self.visit_atom(schema, doc),
			ParamNode::Table(_) => self.visit_table(schema, doc),
			ParamNode::Sequence(_) => self.visit_sequence(schema, doc),
			ParamNode::Tuple(_) => self.visit_tuple(schema, doc),
		}
	}

	fn visit_atom(&mut self, schema: &mut ParamNode, doc: &DocumentNode) {
		let key = schema.key().to_owned();
		match doc.as_atom() {
			Some(raw) => {
				if let Err(message) = schema.bind_atom_raw(raw).expect("schema is an atom") {
					self.errors.push(ParamError::kind(ParamErrorKind::Coercion { key, message }));
				}
			}
			None => self.errors.push(ParamError::kind(ParamErrorKind::WrongKind { key, expected: "atom" })),
		}
	}

	fn visit_table(&mut self, schema: &mut ParamNode, doc: &DocumentNode) {
		let key = schema.key().to_owned();
		self.visit_table_members(&key, schema.children_mut(), doc);
	}

	/// The shared core of table validation: checks every member present,
	/// reports missing-required/extra deviations, and binds what matches —
	/// used both when descending into a nested table member and when
	/// [`crate::Table::validate`] starts directly at a table root
	fn visit_table_members(&mut self, key: &str, members: &mut [ParamNode], doc: &DocumentNode) {
		let Some(table) = doc.as_table() else {
			self.errors.push(ParamError::kind(ParamErrorKind::WrongKind {
				key: key.to_owned(),
				expected: "table",
			}));
			return;
		};

		for member in members.iter_mut() {
			match table.get(member.name()) {
				Some(value) => self.visit(member, value),
				None if member.has_default() || member.is_optional() => {}
				None => self.errors.push(ParamError::kind(ParamErrorKind::MissingRequired {
					key: member.key().to_owned(),
				})),
			}
		}

		let known: std::collections::HashSet<&str> = members.iter().map(ParamNode::name).collect();
		for name in table.keys() {
			if !known.contains(name.as_str()) && !self.ignored_keys.contains(&name.as_str()) {
				self.errors.push(ParamError::kind(ParamErrorKind::Extra {
					key: format!("{key}.{name}"),
				}));
			}
		}
	}

	fn visit_sequence(&mut self, schema: &mut ParamNode, doc: &DocumentNode) {
		let key = schema.key().to_owned();
		let Some(items) = doc.as_sequence() else {
			self.errors.push(ParamError::kind(ParamErrorKind::WrongKind { key, expected: "sequence" }));
			return;
		};

		if schema.is_vector_sequence() {
			self.visit_vector(schema, items);
			return;
		}

		let elements = schema.children_mut();
		if elements.len() != items.len() {
			self.errors.push(ParamError::kind(ParamErrorKind::WrongSize {
				key,
				expected: elements.len(),
				found: items.len(),
			}));
			return;
		}
		for (element, item) in elements.iter_mut().zip(items) {
			self.visit(element, item);
		}
	}

	fn visit_vector(&mut self, schema: &mut ParamNode, items: &[DocumentNode]) {
		let ParamNode::Sequence(sequence) = schema else {
			unreachable!("visit_vector called on a non-sequence node");
		};
		let exemplar = sequence.elements[0].clone();
		let exemplar_prefix = exemplar.key().to_owned();
		let base_prefix = exemplar_prefix
			.strip_suffix("[0]")
			.expect("vector sequence exemplar is built at index 0")
			.to_owned();

		let mut bound = Vec::with_capacity(items.len());
		for (i, item) in items.iter().enumerate() {
			let mut element = exemplar.clone();
			element.rekey_prefix(&exemplar_prefix, &format!("{base_prefix}[{i}]"));
			self.visit(&mut element, item);
			bound.push(element);
		}
		sequence.elements = bound;
	}

	fn visit_tuple(&mut self, schema: &mut ParamNode, doc: &DocumentNode) {
		let key = schema.key().to_owned();
		let Some(items) = doc.as_sequence() else {
			self.errors.push(ParamError::kind(ParamErrorKind::WrongKind { key, expected: "sequence" }));
			return;
		};
		let elements = schema.children_mut();
		if elements.len() != items.len() {
			self.errors.push(ParamError::kind(ParamErrorKind::WrongSize {
				key,
				expected: elements.len(),
				found: items.len(),
			}));
			return;
		}
		for (element, item) in elements.iter_mut().zip(items) {
			self.visit(element, item);
		}
	}
}

/// Walk `doc` down through nested tables following `key`'s dot-separated
/// segments (bracketed sequence-index segments are not meaningful here,
/// since `trimParents` only strips table ancestry above a table parameter)
fn trim_to_subtree<'a>(doc: &'a DocumentNode, key: &str) -> Option<&'a DocumentNode> {
	let mut current = doc;
	for segment in key.split('.') {
		let name = segment.split('[').next().unwrap_or(segment);
		current = current.as_table()?.get(name)?;
	}
	Some(current)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;
	use crate::sequence::Sequence;
	use crate::table::Table;

	fn doc(v: serde_json::Value) -> DocumentNode {
		v.into()
	}

	#[test]
	fn binds_atoms_and_reports_missing_required() {
		let table = Table::build("cfg", "", |b| {
			b.push(Atom::<i64>::new("port"));
			b.push(Atom::<String>::with_default("host", "localhost".into()));
		});
		let mut node: ParamNode = table.into();
		let document = doc(serde_json::json!({ "host": "example.com" }));

		let err = ValidationBinder::new(&[]).validate_and_bind(&mut node, &document).unwrap_err();
		let deviations = err.deviations().unwrap();
		assert_eq!(deviations.len(), 1);
		assert_eq!(deviations[0].kind_of(), Some(&ParamErrorKind::MissingRequired { key: "cfg.port".into() }));
	}

	#[test]
	fn reports_extra_keys_not_in_ignore_list() {
		let table = Table::build("cfg", "", |b| {
			b.push(Atom::<i64>::with_default("port", 8080));
		});
		let mut node: ParamNode = table.into();
		let document = doc(serde_json::json!({ "port": 9090, "module_type": "widget", "bogus": 1 }));

		let err = ValidationBinder::new(&["module_type"]).validate_and_bind(&mut node, &document).unwrap_err();
		let deviations = err.deviations().unwrap();
		assert_eq!(deviations.len(), 1);
		assert_eq!(deviations[0].kind_of(), Some(&ParamErrorKind::Extra { key: "cfg.bogus".into() }));
	}

	#[test]
	fn vector_sequence_binds_one_element_per_document_item() {
		let table = Table::build("cfg", "", |b| {
			b.push(Sequence::vector("tags", "", |i| Atom::<String>::at_index(i, String::new(), None).into()));
		});
		let mut node: ParamNode = table.into();
		let document = doc(serde_json::json!({ "tags": ["a", "b", "c"] }));

		ValidationBinder::new(&[]).validate_and_bind(&mut node, &document).unwrap();
		let tags = node.children()[0].children();
		assert_eq!(tags.len(), 3);
		assert_eq!(tags[0].key(), "cfg.tags[0]");
		assert_eq!(tags[2].key(), "cfg.tags[2]");
		assert_eq!(tags[1].stringify().as_deref(), Some("b"));
	}

	#[test]
	fn fixed_sequence_size_mismatch_is_reported() {
		let table = Table::build("cfg", "", |b| {
			b.push(Sequence::fixed("xy", "", 2, |i| Atom::<i64>::at_index(i, String::new(), None).into()));
		});
		let mut node: ParamNode = table.into();
		let document = doc(serde_json::json!({ "xy": [1, 2, 3] }));

		let err = ValidationBinder::new(&[]).validate_and_bind(&mut node, &document).unwrap_err();
		assert_eq!(
			err.deviations().unwrap()[0].kind_of(),
			Some(&ParamErrorKind::WrongSize { key: "cfg.xy".into(), expected: 2, found: 3 })
		);
	}

	#[test]
	fn trim_to_subtree_descends_through_nested_tables() {
		let document = doc(serde_json::json!({
			"physics": { "producers": { "cfg": { "port": 9090 } } }
		}));
		let subtree = trim_to_subtree(&document, "physics.producers.cfg").unwrap();
		assert_eq!(subtree.as_table().unwrap()["port"].as_atom(), Some("9090"));
	}

	#[test]
	fn validate_trimmed_strips_ancestors_above_the_table() {
		let mut table = Table::build("cfg", "", |b| {
			b.push(Atom::<i64>::new("port"));
		});
		let document = doc(serde_json::json!({ "physics": { "cfg": { "port": 9090 } } }));

		ValidationBinder::new(&[])
			.validate_and_bind_table_trimmed("physics.cfg", &mut table.members, &document)
			.unwrap();
		assert_eq!(table.members[0].stringify().as_deref(), Some("9090"));
	}
}
