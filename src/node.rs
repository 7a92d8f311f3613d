//! The tagged variant every constructed parameter collapses into once it
//! becomes a child of a [`crate::Table`], [`crate::Sequence`] or
//! [`crate::Tuple`], per `spec.md` §3 and the design note in §9 to model
//! parameter nodes as "a tagged variant over {Atom, Table, SeqFixed,
//! SeqVector, Tuple}" rather than as an inheritance hierarchy of trait
//! objects.

use crate::atom::{Atom, AtomDyn, Atomic};
use crate::base::Base;
use crate::kind::ParameterKind;
use crate::sequence::Sequence;
use crate::table::Table;
use crate::tuple::Tuple;

#[derive(Clone, Debug)]
pub enum ParamNode {
	Atom(Box<dyn AtomDyn>),
	Table(Table),
	Sequence(Sequence),
	Tuple(Tuple),
}

impl ParamNode {
	pub(crate) fn base(&self) -> &Base {
		match self {
			Self::Atom(a) => a.base(),
			Self::Table(t) => &t.base,
			Self::Sequence(s) => &s.base,
			Self::Tuple(t) => &t.base,
		}
	}

	pub fn name(&self) -> &str {
		self.base().name()
	}

	pub fn key(&self) -> &str {
		self.base().key()
	}

	pub fn comment(&self) -> &str {
		self.base().comment()
	}

	pub fn has_default(&self) -> bool {
		self.base().has_default()
	}

	pub fn is_optional(&self) -> bool {
		self.base().is_optional()
	}

	pub fn parameter_type(&self) -> ParameterKind {
		self.base().parameter_type()
	}

	/// `true` if this node's key ends in `]`, i.e. it is a sequence/tuple
	/// element rather than a table member or the root
	pub fn is_sequence_element(&self) -> bool {
		self.base().is_sequence_element()
	}

	/// Direct children, in declaration order; empty for atoms
	pub fn children(&self) -> &[ParamNode] {
		match self {
			Self::Atom(_) => &[],
			Self::Table(t) => &t.members,
			Self::Sequence(s) => &s.elements,
			Self::Tuple(t) => &t.elements,
		}
	}

	pub(crate) fn base_mut(&mut self) -> &mut Base {
		match self {
			Self::Atom(a) => a.base_mut(),
			Self::Table(t) => &mut t.base,
			Self::Sequence(s) => &mut s.base,
			Self::Tuple(t) => &mut t.base,
		}
	}

	pub(crate) fn children_mut(&mut self) -> &mut [ParamNode] {
		match self {
			Self::Atom(_) => &mut [],
			Self::Table(t) => &mut t.members,
			Self::Sequence(s) => &mut s.elements,
			Self::Tuple(t) => &mut t.elements,
		}
	}

	/// Rewrite this node's key (and every descendant's) by replacing a
	/// leading `old_prefix` with `new_prefix` — used to re-key a cloned
	/// vector-sequence exemplar onto the index a bound document element
	/// actually occupies
	pub(crate) fn rekey_prefix(&mut self, old_prefix: &str, new_prefix: &str) {
		if let Some(rest) = self.key().strip_prefix(old_prefix) {
			let new_key = format!("{new_prefix}{rest}");
			self.base_mut().key = new_key;
		}
		for child in self.children_mut() {
			child.rekey_prefix(old_prefix, new_prefix);
		}
	}

	/// Attempt to bind an atom's raw document string onto this node
	///
	/// Returns `None` (and does nothing) if this node is not an atom.
	pub(crate) fn bind_atom_raw(&mut self, raw: &str) -> Option<Result<(), String>> {
		match self {
			Self::Atom(a) => Some(a.bind_raw(raw)),
			_ => None,
		}
	}

	/// `true` for a vector (unbounded) sequence, whose single member is an
	/// exemplar rather than a bound element
	pub fn is_vector_sequence(&self) -> bool {
		matches!(self, Self::Sequence(s) if s.is_vector)
	}

	/// The document-atom string form of this node's effective value, if it
	/// is an atom with one (bound or defaulted)
	pub fn stringify(&self) -> Option<String> {
		match self {
			Self::Atom(a) => a.stringify(),
			_ => None,
		}
	}

	/// The placeholder type name shown for an unset atom, e.g. `<int>`
	pub fn type_placeholder(&self) -> Option<&'static str> {
		match self {
			Self::Atom(a) => Some(a.type_placeholder()),
			_ => None,
		}
	}
}

impl<T: Atomic> From<Atom<T>> for ParamNode {
	fn from(atom: Atom<T>) -> Self {
		ParamNode::Atom(Box::new(atom))
	}
}

impl From<Table> for ParamNode {
	fn from(t: Table) -> Self {
		ParamNode::Table(t)
	}
}

impl From<Sequence> for ParamNode {
	fn from(s: Sequence) -> Self {
		ParamNode::Sequence(s)
	}
}

impl From<Tuple> for ParamNode {
	fn from(t: Tuple) -> Self {
		ParamNode::Tuple(t)
	}
}
