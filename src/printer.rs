//! The allowed-configuration printer, per `spec.md` §4.9, grounded on
//! `original_source`'s `PrintAllowedConfiguration.cc` (whose `maybeName`
//! helper is the `is_sequence_element`-gated name-or-indent emission below,
//! and whose `suffix` helper is the `keys_with_commas`/`keys_with_ellipses`
//! bookkeeping in [`enter_sequence`](AllowedConfigurationPrinter::enter_sequence)
//! / [`after_action`](AllowedConfigurationPrinter::after_action))
//!
//! Renders a schema tree as the document syntax that would satisfy it: every
//! unset atom shows its type placeholder (`<int>`), every defaulted atom
//! shows its default value annotated `# default`, comments precede a
//! parameter as `# `-prefixed lines, and an unbounded vector sequence with
//! no default shows its one exemplar followed by a literal `...` line.

use std::collections::HashSet;

use crate::error::{ParamError, ParamErrorKind};
use crate::kind::ParameterKind;
use crate::node::ParamNode;
use crate::visitor::{visit, ParameterVisitor};

/// The literal text of one indent level; `original_source`'s
/// `Table::print_allowed_configuration` default argument is
/// `std::string(3, ' ')`, confirmed by `PrintAllowedConfiguration.cc`'s
/// `non_whitespace` helper special-casing single-character fragments
/// (implying the default is wider) — see `DESIGN.md`.
const INDENT_FRAGMENT: &str = "   ";

/// A [`ParameterVisitor`] that renders a schema tree into allowed-
/// configuration document text
pub struct AllowedConfigurationPrinter {
	out: String,
	error: Option<ParamError>,
	indent: Vec<String>,
	keys_with_commas: HashSet<String>,
	keys_with_ellipses: HashSet<String>,
	/// One entry per currently-open table/sequence level (plus one for the
	/// level the starting node itself belongs to), `true` until that level's
	/// first member has been processed — lets a blank line separate
	/// successive siblings (`spec.md` §4.9's before_action blank line)
	/// without one leaking in before a container's very first child or
	/// before the starting node itself.
	first_child: Vec<bool>,
}

impl AllowedConfigurationPrinter {
	pub fn new() -> Self {
		Self::at_depth(0)
	}

	/// Start rendering as though already nested `depth` levels deep — used
	/// by [`print_within`] to render an isolated subtree at the indent its
	/// true ancestors would have put it at
	fn at_depth(depth: usize) -> Self {
		AllowedConfigurationPrinter {
			out: String::new(),
			error: None,
			indent: std::iter::repeat(INDENT_FRAGMENT.to_owned()).take(depth).collect(),
			keys_with_commas: HashSet::new(),
			keys_with_ellipses: HashSet::new(),
			first_child: vec![true],
		}
	}

	fn prefix(&self) -> String {
		self.indent.concat()
	}

	fn value_token(node: &ParamNode) -> String {
		match node.stringify() {
			Some(v) => v,
			None => format!("<{}>", node.type_placeholder().unwrap_or("?")),
		}
	}

	/// Render `node` (and its descendants) to allowed-configuration text
	///
	/// Fails with [`ParamErrorKind::Logic`] if a vector sequence with no
	/// default carries other than exactly one exemplar element — per
	/// `spec.md` §4.9, that shape only occurs if this is called on a schema
	/// that has already been validated/bound against a document, which this
	/// printer does not support.
	pub fn render(mut self, node: &ParamNode) -> Result<String, ParamError> {
		visit(node, &mut self);
		match self.error {
			Some(e) => Err(e),
			None => Ok(self.out),
		}
	}
}

impl Default for AllowedConfigurationPrinter {
	fn default() -> Self {
		Self::new()
	}
}

impl ParameterVisitor for AllowedConfigurationPrinter {
	fn before_action(&mut self, node: &ParamNode) -> bool {
		if node.is_vector_sequence() && !node.has_default() && node.children().len() != 1 {
			self.error = Some(ParamError::kind(ParamErrorKind::Logic {
				key: node.key().to_owned(),
				message: format!(
					"vector sequence with no default must have exactly one exemplar to print, found {}",
					node.children().len()
				),
			}));
			return false;
		}

		let is_first = *self.first_child.last().unwrap();
		if !node.is_sequence_element() && !is_first {
			self.out.push('\n');
		}
		if let Some(top) = self.first_child.last_mut() {
			*top = false;
		}

		if !node.comment().is_empty() {
			for line in node.comment().lines() {
				self.out.push_str(&self.prefix());
				self.out.push_str("# ");
				self.out.push_str(line);
				self.out.push('\n');
			}
		}

		if node.is_optional() {
			if let Some(fragment) = self.indent.last_mut() {
				*fragment = " ( ".to_owned();
			}
		}

		self.out.push_str(&self.prefix());
		if !node.is_sequence_element() {
			self.out.push_str(node.name());
			self.out.push_str(": ");
		}
		true
	}

	fn enter_table(&mut self, _node: &ParamNode) {
		self.out.push_str("{\n");
		self.indent.push(INDENT_FRAGMENT.to_owned());
		self.first_child.push(true);
	}

	fn exit_table(&mut self, _node: &ParamNode) {
		self.first_child.pop();
		self.indent.pop();
		self.out.push_str(&self.prefix());
		self.out.push('}');
	}

	fn enter_sequence(&mut self, node: &ParamNode) {
		self.out.push_str("[\n");
		self.indent.push(INDENT_FRAGMENT.to_owned());
		self.first_child.push(true);

		let children = node.children();
		if children.is_empty() {
			return;
		}
		// Per spec.md §4.9 enter_sequence rules.
		if node.has_default() || !node.is_vector_sequence() {
			for child in &children[..children.len() - 1] {
				self.keys_with_commas.insert(child.key().to_owned());
			}
		} else {
			let key = children[0].key().to_owned();
			self.keys_with_commas.insert(key.clone());
			self.keys_with_ellipses.insert(key);
		}
	}

	fn exit_sequence(&mut self, _node: &ParamNode) {
		self.first_child.pop();
		self.indent.pop();
		self.out.push_str(&self.prefix());
		self.out.push(']');
	}

	fn atom(&mut self, node: &ParamNode) {
		self.out.push_str(&Self::value_token(node));
	}

	fn after_action(&mut self, node: &ParamNode) {
		let key = node.key();
		let had_comma = self.keys_with_commas.remove(key);
		if had_comma {
			self.out.push(',');
		}
		if self.keys_with_ellipses.remove(key) {
			self.out.push('\n');
			self.out.push_str(&self.prefix());
			self.out.push_str("...");
		}
		if node.has_default() && node.parameter_type() == ParameterKind::Atom {
			// A sequence element without a trailing comma (the last element
			// of a fixed/defaulted-vector sequence) needs a third space so
			// the `#` lands in the same column the comma would otherwise
			// have occupied, per spec.md §8's literal `"1,  # default"` /
			// `"2   # default"` pair. Table members never get a comma at
			// all, so they always use the two-space form.
			let needs_third_space = node.is_sequence_element() && !had_comma;
			self.out.push_str(if needs_third_space { "   # default" } else { "  # default" });
		}
		if node.is_optional() {
			if let Some(fragment) = self.indent.last_mut() {
				*fragment = INDENT_FRAGMENT.to_owned();
			}
		}
		self.out.push('\n');
	}
}

/// Find `target_key` under `root`, returning the chain of ancestors from
/// `root` down to (but excluding) the target, and the target itself
fn find_with_ancestors<'a>(root: &'a ParamNode, target_key: &str) -> Option<(Vec<&'a ParamNode>, &'a ParamNode)> {
	if root.key() == target_key {
		return Some((Vec::new(), root));
	}
	for child in root.children() {
		if let Some((mut ancestors, target)) = find_with_ancestors(child, target_key) {
			ancestors.insert(0, root);
			return Some((ancestors, target));
		}
	}
	None
}

/// Render the allowed configuration of the subtree rooted at `target_key`,
/// wrapped in synthetic ancestor frames so the output still reads like a
/// fragment of the whole document — `original_source`'s `MaybeDisplayParent`
/// reconstructs this chain by re-parsing the key string; here it is read
/// straight off the real ancestor nodes since they are already in hand
/// (`spec.md` §9: "there is no cycle ... represent parent/child purely as
/// downward ownership")
pub fn print_within(root: &ParamNode, target_key: &str) -> Option<Result<String, ParamError>> {
	let (ancestors, target) = find_with_ancestors(root, target_key)?;
	let printer = AllowedConfigurationPrinter::at_depth(ancestors.len());
	let text = match printer.render(target) {
		Ok(text) => text,
		Err(e) => return Some(Err(e)),
	};
	let mut text = text;
	for (depth, ancestor) in ancestors.iter().enumerate().rev() {
		text = wrap_ancestor(ancestor, &text, depth);
	}
	Some(Ok(text))
}

fn wrap_ancestor(ancestor: &ParamNode, inner: &str, depth: usize) -> String {
	let indent: String = std::iter::repeat(INDENT_FRAGMENT).take(depth).collect();
	let (open, close) = match ancestor.parameter_type() {
		ParameterKind::Table => ('{', '}'),
		_ => ('[', ']'),
	};
	let mut out = String::new();
	out.push_str(&indent);
	if !ancestor.is_sequence_element() {
		out.push_str(ancestor.name());
		out.push_str(": ");
	}
	out.push(open);
	out.push('\n');
	out.push_str(inner);
	out.push_str(&indent);
	out.push(close);
	out.push('\n');
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::atom::Atom;
	use crate::sequence::Sequence;
	use crate::table::Table;

	#[test]
	fn unset_atom_shows_type_placeholder() {
		let node: ParamNode = Atom::<i64>::new("port").into();
		let text = AllowedConfigurationPrinter::new().render(&node).unwrap();
		assert_eq!(text, "port: <int>\n");
	}

	#[test]
	fn defaulted_atom_shows_its_default_and_annotation() {
		let node: ParamNode = Atom::<i64>::with_default("port", 8080).into();
		let text = AllowedConfigurationPrinter::new().render(&node).unwrap();
		assert_eq!(text, "port: 8080  # default\n");
	}

	#[test]
	fn optional_atom_gets_leading_paren_marker() {
		let table = Table::build("cfg", "", |b| {
			b.push(Atom::<i64>::new("port").optional());
		});
		let text = AllowedConfigurationPrinter::new().render(&table.into()).unwrap();
		assert_eq!(text, "cfg: {\n ( port: <int>\n}\n");
	}

	#[test]
	fn table_nests_and_indents_members_with_blank_line_between() {
		let table = Table::build("server", "", |b| {
			b.push(Atom::<String>::with_comment("host", "bind address"));
			b.push(Atom::<i64>::with_default("port", 8080));
		});
		let text = AllowedConfigurationPrinter::new().render(&table.into()).unwrap();
		assert_eq!(
			text,
			"server: {\n   # bind address\n   host: <string>\n\n   port: 8080  # default\n}\n"
		);
	}

	#[test]
	fn fixed_sequence_elements_are_comma_separated() {
		let seq = Sequence::fixed("xy", "", 2, |i| Atom::<i64>::at_index(i, String::new(), None).into());
		let text = AllowedConfigurationPrinter::new().render(&seq.into()).unwrap();
		assert_eq!(text, "xy: [\n   <int>,\n   <int>\n]\n");
	}

	#[test]
	fn vector_sequence_shows_exemplar_with_comma_then_ellipsis() {
		let seq = Sequence::vector("tags", "", |i| Atom::<String>::at_index(i, String::new(), None).into());
		let text = AllowedConfigurationPrinter::new().render(&seq.into()).unwrap();
		assert_eq!(text, "tags: [\n   <string>,\n   ...\n]\n");
	}

	#[test]
	fn vector_with_defaults_prints_like_a_fixed_list() {
		let seq = Sequence::vector_with_defaults("list", "", 2, |i| {
			Atom::<i64>::at_index(i, String::new(), Some([1_i64, 2][i])).into()
		});
		let text = AllowedConfigurationPrinter::new().render(&seq.into()).unwrap();
		assert_eq!(text, "list: [\n   1,  # default\n   2   # default\n]\n");
	}

	#[test]
	fn printing_bound_vector_sequence_is_a_logic_error() {
		let mut seq = Sequence::vector("tags", "", |i| Atom::<String>::at_index(i, String::new(), None).into());
		// Simulate what validation does: replace the single exemplar with
		// however many elements the document actually supplied.
		seq.elements = vec![
			Atom::<String>::at_index(0, String::new(), None).into(),
			Atom::<String>::at_index(1, String::new(), None).into(),
		];
		let err = AllowedConfigurationPrinter::new().render(&seq.into()).unwrap_err();
		assert!(matches!(err.kind_of(), Some(ParamErrorKind::Logic { .. })));
	}

	#[test]
	fn print_within_reconstructs_ancestor_chain() {
		let table = Table::build("outer", "", |b| {
			b.push(Table::build("inner", "", |b| {
				b.push(Atom::<i64>::new("x"));
			}));
		});
		let node: ParamNode = table.into();
		let text = print_within(&node, "outer.inner").unwrap().unwrap();
		assert_eq!(text, "outer: {\n   inner: {\n      x: <int>\n   }\n}\n");
	}
}
