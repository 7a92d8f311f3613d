//! Heterogeneous fixed-size sequences, per `spec.md` §3: "Tuple. A fixed,
//! heterogeneous sequence of parameters, one declared type per slot"

use crate::base::Base;
use crate::key::{self, Position};
use crate::kind::ParameterKind;
use crate::node::ParamNode;
use crate::registry::{self, ChildInfo};

#[derive(Clone, Debug)]
pub struct Tuple {
	pub(crate) base: Base,
	pub(crate) elements: Vec<ParamNode>,
}

/// Accumulates a [`Tuple`]'s heterogeneous elements in slot order
///
/// Each element is supplied as a factory taking its own slot index, since
/// the element's key (`<tuple-key>[i]`) is determined by its position, not
/// by a name the caller chooses — mirroring [`crate::Sequence`]'s element
/// construction.
pub struct TupleBuilder {
	elements: Vec<ParamNode>,
}

impl TupleBuilder {
	fn new() -> Self {
		TupleBuilder { elements: Vec::new() }
	}

	pub fn push(&mut self, factory: impl FnOnce(usize) -> ParamNode) -> &mut Self {
		let index = self.elements.len();
		self.elements.push(factory(index));
		self
	}
}

impl Tuple {
	fn build_at(position: Position, comment: impl Into<String>, f: impl FnOnce(&mut TupleBuilder)) -> Self {
		if key::is_empty() {
			registry::clear();
		}
		let name = key::name_of(&position);
		let parent = key::parent_key();
		let (key, elements) = key::with_position(&position, |key| {
			let mut builder = TupleBuilder::new();
			f(&mut builder);
			(key, builder.elements)
		});
		registry::register(
			&parent,
			ChildInfo {
				key: key.clone(),
				kind: ParameterKind::Tuple,
			},
		);
		let has_default = elements.iter().all(ParamNode::has_default);
		Tuple {
			base: Base {
				name,
				key,
				comment: comment.into(),
				has_default,
				is_optional: false,
				kind: ParameterKind::Tuple,
			},
			elements,
		}
	}

	pub fn build(name: impl Into<String>, comment: impl Into<String>, f: impl FnOnce(&mut TupleBuilder)) -> Self {
		Self::build_at(Position::Named(name.into()), comment, f)
	}

	/// Build a tuple that is itself a sequence/tuple element (key `[index]`)
	/// rather than a table member — used for sequences of tuples, per
	/// `spec.md` §8 scenario seed 5 (`Sequence<Tuple<int,float>>`)
	pub fn at_index(index: usize, comment: impl Into<String>, f: impl FnOnce(&mut TupleBuilder)) -> Self {
		Self::build_at(Position::Indexed(index), comment, f)
	}

	/// Mark this tuple as optional — it may be absent from a document
	/// without a validation error even though it has no default, mirroring
	/// [`crate::Atom::optional`] and [`crate::Table::optional`]
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
	pub fn elements(&self) -> &[ParamNode] {
		&self.elements
	}
}
