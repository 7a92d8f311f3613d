//! Tables, per `spec.md` §3: "Table. A named, ordered collection of
//! parameters (atoms, tables, sequences, tuples), declared once by its
//! author and filled in by construction order"
//!
//! `original_source`'s `Table<T>` owns a default-constructed `T value_` and
//! separately discovers `T`'s fields as raw `exempt_ptr<ParameterBase>`
//! members via `fill_members()`. Here a table's members are simply the
//! [`ParamNode`]s pushed to it during its builder closure — declaration
//! order is member order, with no separate discovery pass needed.

use crate::base::Base;
use crate::document::DocumentNode;
use crate::error::ParamError;
use crate::key::{self, Position};
use crate::kind::ParameterKind;
use crate::node::ParamNode;
use crate::printer::AllowedConfigurationPrinter;
use crate::registry::{self, ChildInfo};
use crate::validate::ValidationBinder;

#[derive(Clone, Debug)]
pub struct Table {
	pub(crate) base: Base,
	pub(crate) members: Vec<ParamNode>,
}

/// Accumulates a [`Table`]'s members in declaration order
pub struct TableBuilder {
	members: Vec<ParamNode>,
}

impl TableBuilder {
	fn new() -> Self {
		TableBuilder { members: Vec::new() }
	}

	/// Add an already-constructed member
	///
	/// The member must have been constructed while this table's builder
	/// closure was running, so that its key was computed relative to this
	/// table (see [`Table::build`]).
	pub fn push(&mut self, member: impl Into<ParamNode>) -> &mut Self {
		let member = member.into();
		self.members.push(member);
		self
	}
}

impl Table {
	fn build_at(position: Position, comment: impl Into<String>, f: impl FnOnce(&mut TableBuilder)) -> Self {
		if key::is_empty() {
			registry::clear();
		}
		let name = key::name_of(&position);
		let parent = key::parent_key();
		let (key, members) = key::with_position(&position, |key| {
			let mut builder = TableBuilder::new();
			f(&mut builder);
			(key, builder.members)
		});
		registry::register(
			&parent,
			ChildInfo {
				key: key.clone(),
				kind: ParameterKind::Table,
			},
		);
		// Per spec.md §3: "A node's has_default is true iff a default value
		// was supplied at construction for that node and for all its
		// descendants" — no exception for optional members, matching
		// Sequence/Tuple's identical `ParamNode::has_default` fold.
		let has_default = members.iter().all(ParamNode::has_default);
		Table {
			base: Base {
				name,
				key,
				comment: comment.into(),
				has_default,
				is_optional: false,
				kind: ParameterKind::Table,
			},
			members,
		}
	}

	pub fn build(name: impl Into<String>, comment: impl Into<String>, f: impl FnOnce(&mut TableBuilder)) -> Self {
		Self::build_at(Position::Named(name.into()), comment, f)
	}

	/// Build a table that is itself a sequence or tuple element, i.e. whose
	/// key is `[index]` relative to its enclosing sequence/tuple rather than
	/// a dotted name — used when a [`crate::Sequence`] or [`crate::Tuple`] is
	/// homogeneous/heterogeneous over tables, per `spec.md` §3: "each child's
	/// kind is the sequence's element type"
	pub fn at_index(index: usize, comment: impl Into<String>, f: impl FnOnce(&mut TableBuilder)) -> Self {
		Self::build_at(Position::Indexed(index), comment, f)
	}

	pub fn optional(mut self) -> Self {
		self.base.is_optional = true;
		self
	}

	pub fn name(&self) -> &str {
		self.base.name()
	}
	pub fn key(&self) -> &str {
		self.base.key()
	}
	pub fn comment(&self) -> &str {
		self.base.comment()
	}
	pub fn has_default(&self) -> bool {
		self.base.has_default()
	}
	pub fn is_optional(&self) -> bool {
		self.base.is_optional()
	}
	pub fn members(&self) -> &[ParamNode] {
		&self.members
	}

	/// The runtime parameter-set this table's validated/bound members form —
	/// `spec.md` §6's `parameter_set()`. `original_source`'s `Table<T>`
	/// returns a distinct, user-defined `T` backing struct here; this crate
	/// has no generic backing-struct type to parallel it (see `DESIGN.md`),
	/// so `parameter_set()` is this table's own bound [`ParamNode`] members —
	/// the runtime container the validation binder (`spec.md` §4.10)
	/// populates is this same `Vec`, not a separate consumer-owned type.
	pub fn parameter_set(&self) -> &[ParamNode] {
		&self.members
	}

	/// The ordered keys of every descendant, including this table's own key,
	/// as recorded by the construction-time registry
	pub fn parameter_keys(&self) -> Vec<String> {
		registry::parameter_keys(&self.base.key)
	}

	/// Validate `document` against this table's members and bind whatever
	/// matches, per `spec.md` §4.5; `document` is expected to already
	/// represent exactly this table's own subtree (no ancestor wrapping) —
	/// see [`Table::validate_trimmed`] for the alternative
	pub fn validate(&mut self, document: &DocumentNode, ignored_keys: &[&str]) -> Result<(), ParamError> {
		ValidationBinder::new(ignored_keys).validate_and_bind_table(&self.base.key, &mut self.members, document)
	}

	/// Like [`Table::validate`], but `document` is the *untrimmed* document
	/// (e.g. the whole configuration file) and `root_path` is the dotted
	/// path of table names leading from `document`'s root down to this
	/// table's subtree, per `spec.md` §4.10's `trimParents` flag
	pub fn validate_trimmed(&mut self, document: &DocumentNode, root_path: &str, ignored_keys: &[&str]) -> Result<(), ParamError> {
		ValidationBinder::new(ignored_keys).validate_and_bind_table_trimmed(root_path, &mut self.members, document)
	}

	/// Render this table's allowed configuration in document syntax,
	/// including defaults, comments and ellipses for unbounded sequences,
	/// per `spec.md` §4.5 / §4.9
	pub fn print_allowed_configuration(&self) -> Result<String, ParamError> {
		let node: ParamNode = self.clone().into();
		AllowedConfigurationPrinter::new().render(&node)
	}

	/// Find a direct or indirect member by its fully-qualified key
	pub fn find(&self, key: &str) -> Option<&ParamNode> {
		fn search(nodes: &[ParamNode], key: &str) -> Option<&ParamNode> {
			for node in nodes {
				if node.key() == key {
					return Some(node);
				}
				if let Some(found) = search(node.children(), key) {
					return Some(found);
				}
			}
			None
		}
		if self.base.key == key {
			return None;
		}
		search(&self.members, key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;

	#[test]
	fn nested_table_members_are_keyed_relative_to_it() {
		let table = Table::build("outer", "", |b| {
			b.push(Atom::<i64>::with_default("port", 8080));
			b.push(Table::build("inner", "", |b| {
				b.push(Atom::<String>::new("host"));
			}));
		});
		assert_eq!(table.key(), "outer");
		assert_eq!(table.members()[0].key(), "outer.port");
		assert_eq!(table.members()[1].key(), "outer.inner");
		assert_eq!(table.members()[1].children()[0].key(), "outer.inner.host");
	}

	#[test]
	fn parameter_keys_matches_declaration_order() {
		let table = Table::build("cfg", "", |b| {
			b.push(Atom::<i64>::new("a"));
			b.push(Atom::<i64>::new("b"));
		});
		assert_eq!(table.parameter_keys(), vec!["cfg", "cfg.a", "cfg.b"]);
	}

	#[test]
	fn has_default_requires_every_member_defaulted() {
		let with_required = Table::build("a", "", |b| {
			b.push(Atom::<i64>::new("x"));
		});
		assert!(!with_required.has_default());

		let all_defaulted = Table::build("b", "", |b| {
			b.push(Atom::<i64>::with_default("x", 1));
		});
		assert!(all_defaulted.has_default());

		// Optional does not substitute for a default: spec.md §3 propagates
		// has_default strictly off whether every descendant was given a
		// default at construction.
		let optional_without_default = Table::build("c", "", |b| {
			b.push(Atom::<i64>::new("x").optional());
		});
		assert!(!optional_without_default.has_default());
	}

	#[test]
	fn find_locates_nested_members_by_key() {
		let table = Table::build("outer", "", |b| {
			b.push(Table::build("inner", "", |b| {
				b.push(Atom::<i64>::new("x"));
			}));
		});
		assert!(table.find("outer.inner.x").is_some());
		assert!(table.find("outer.missing").is_none());
	}

	#[test]
	fn validate_binds_atoms_directly_on_a_table() {
		let mut table = Table::build("cfg", "", |b| {
			b.push(Atom::<i64>::new("port"));
		});
		let document: crate::document::DocumentNode = serde_json::json!({ "port": 9090 }).into();
		table.validate(&document, &[]).unwrap();
		assert_eq!(table.members()[0].stringify().as_deref(), Some("9090"));
	}

	#[test]
	fn validate_trimmed_navigates_past_ancestor_wrapping() {
		let mut table = Table::build("cfg", "", |b| {
			b.push(Atom::<i64>::new("port"));
		});
		let document: crate::document::DocumentNode = serde_json::json!({
			"physics": { "cfg": { "port": 9090 } }
		})
		.into();
		table.validate_trimmed(&document, "physics.cfg", &[]).unwrap();
		assert_eq!(table.members()[0].stringify().as_deref(), Some("9090"));
	}

	#[test]
	fn print_allowed_configuration_renders_the_whole_table() {
		let table = Table::build("cfg", "", |b| {
			b.push(Atom::<i64>::with_default("port", 8080));
		});
		let text = table.print_allowed_configuration().unwrap();
		assert_eq!(text, "cfg: {\n   port: 8080  # default\n}\n");
	}

	#[test]
	fn table_at_index_nests_under_a_sequence_element_key() {
		use crate::sequence::Sequence;

		// A sequence of tables is as valid a homogeneous sequence as a
		// sequence of atoms, per spec.md §3: "each child's kind is the
		// sequence's element type".
		let seq = Sequence::fixed("endpoints", "", 2, |i| {
			Table::at_index(i, "", |b| {
				b.push(Atom::<String>::new("host"));
			})
			.into()
		});
		assert_eq!(seq.elements()[0].key(), "endpoints[0]");
		assert_eq!(seq.elements()[0].children()[0].key(), "endpoints[0].host");
		assert_eq!(seq.elements()[1].children()[0].key(), "endpoints[1].host");
	}
}
