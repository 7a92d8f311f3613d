//! spec.md §8 universal invariants: default stringification before binding,
//! and a validated table's parameter set round-tripping through its own
//! allowed-configuration rendering.

use cfg_schema::document::DocumentNode;
use cfg_schema::{Atom, ParamNode, Table};
use indexmap::IndexMap;

#[test]
fn atom_with_default_stringifies_as_the_default_before_any_bind() {
	let atom = Atom::<i64>::with_default("port", 8080);
	assert_eq!(atom.get().unwrap(), &8080);
	let node: ParamNode = atom.into();
	assert_eq!(node.stringify(), Some(8080.to_string()));
}

/// Rebuild a [`DocumentNode`] straight from a schema's own current effective
/// values (defaults and/or bound values) — standing in for "parse the
/// printed allowed-configuration text back into a document", since parsing
/// document syntax is explicitly out of scope for this engine (`spec.md`
/// §1). This exercises the same round-trip property `spec.md` §8 describes
/// ("re-parsing the `print_allowed_configuration` output... re-validates
/// without errors") without requiring a parser this crate doesn't own.
fn document_of(node: &ParamNode) -> DocumentNode {
	match node {
		ParamNode::Atom(_) => DocumentNode::Atom(node.stringify().expect("every member here is defaulted or bound")),
		ParamNode::Table(t) => {
			let mut members = IndexMap::new();
			for member in t.members() {
				members.insert(member.name().to_owned(), document_of(member));
			}
			DocumentNode::Table(members)
		}
		ParamNode::Sequence(s) => DocumentNode::Sequence(s.elements().iter().map(document_of).collect()),
		ParamNode::Tuple(t) => DocumentNode::Sequence(t.elements().iter().map(document_of).collect()),
	}
}

#[test]
fn a_fully_defaulted_table_round_trips_through_its_own_rendering() {
	let table = Table::build("server", "", |b| {
		b.push(Atom::<String>::with_default("host", "0.0.0.0".into()));
		b.push(Atom::<i64>::with_default("port", 8080));
		b.push(Table::build("tls", "", |b| {
			b.push(Atom::<bool>::with_default("enabled", false));
		}));
	});

	// Printing requires every atom to already have a value (default or
	// bound) — a fully-defaulted table satisfies that without any document.
	let printed = table.print_allowed_configuration().unwrap();
	assert!(printed.contains("host: 0.0.0.0  # default"));

	let node: ParamNode = table.into();
	let document = document_of(&node);

	let ParamNode::Table(mut rebuilt) = node else {
		unreachable!()
	};
	rebuilt.validate(&document, &[]).unwrap();
	assert_eq!(rebuilt.members()[0].stringify().as_deref(), Some("0.0.0.0"));
	assert_eq!(rebuilt.members()[1].stringify().as_deref(), Some("8080"));
}

#[test]
fn a_table_with_required_fields_round_trips_once_bound() {
	let mut table = Table::build("cfg", "", |b| {
		b.push(Atom::<i64>::new("port"));
		b.push(Atom::<String>::with_default("host", "localhost".into()));
	});
	let document: DocumentNode = serde_json::json!({ "port": 9090 }).into();
	table.validate(&document, &[]).unwrap();

	let node: ParamNode = table.into();
	let rebuilt_document = document_of(&node);
	let ParamNode::Table(mut rebuilt) = node else {
		unreachable!()
	};
	rebuilt.validate(&rebuilt_document, &[]).unwrap();
	assert_eq!(rebuilt.members()[0].stringify().as_deref(), Some("9090"));
	assert_eq!(rebuilt.members()[1].stringify().as_deref(), Some("localhost"));
}
