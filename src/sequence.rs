//! Homogeneous sequences, per `spec.md` §3: "Sequence (fixed, N known)" and
//! "Sequence (vector, unbounded)"

use crate::base::Base;
use crate::error::{ParamError, ParamErrorKind};
use crate::key::{self, Position};
use crate::kind::ParameterKind;
use crate::node::ParamNode;
use crate::registry::{self, ChildInfo};

/// A homogeneous sequence: either a fixed-length sequence of `count` bound
/// elements, or a vector carrying exactly one exemplar element describing
/// the shape every document-supplied element must match
#[derive(Clone, Debug)]
pub struct Sequence {
	pub(crate) base: Base,
	pub(crate) elements: Vec<ParamNode>,
	pub(crate) is_vector: bool,
}

impl Sequence {
	fn build_at(
		position: Position,
		comment: impl Into<String>,
		is_vector: bool,
		count: usize,
		mut factory: impl FnMut(usize) -> ParamNode,
	) -> Self {
		if key::is_empty() {
			registry::clear();
		}
		let name = key::name_of(&position);
		let parent = key::parent_key();
		let (key, elements) = key::with_position(&position, |key| {
			let mut elements = Vec::with_capacity(count);
			for i in 0..count {
				elements.push(factory(i));
			}
			(key, elements)
		});
		registry::register(
			&parent,
			ChildInfo {
				key: key.clone(),
				kind: if is_vector { ParameterKind::SeqVector } else { ParameterKind::SeqFixed },
			},
		);
		// Per spec.md §3: has_default propagates upward from every descendant,
		// vector sequences included — a vector built with no default ends up
		// with a single non-defaulted exemplar and is therefore not
		// has_default, which is what lets the printer tell "no default, show
		// one exemplar + ellipsis" apart from "built with N default elements"
		// (spec.md §8 scenario seeds 5-6).
		let has_default = elements.iter().all(ParamNode::has_default);
		Sequence {
			base: Base {
				name,
				key,
				comment: comment.into(),
				has_default,
				is_optional: false,
				kind: if is_vector { ParameterKind::SeqVector } else { ParameterKind::SeqFixed },
			},
			elements,
			is_vector,
		}
	}

	/// A sequence of exactly `count` elements, each built by `factory(i)`
	/// for `i` in `0..count`
	pub fn fixed(
		name: impl Into<String>,
		comment: impl Into<String>,
		count: usize,
		factory: impl FnMut(usize) -> ParamNode,
	) -> Self {
		Self::build_at(Position::Named(name.into()), comment, false, count, factory)
	}

	/// Like [`Sequence::fixed`], but this sequence is itself a sequence/tuple
	/// element (key `[index]`) rather than a table member — used for nested
	/// sequences-of-sequences, per `spec.md` §8 scenario seed 6
	pub fn fixed_at_index(
		index: usize,
		comment: impl Into<String>,
		count: usize,
		factory: impl FnMut(usize) -> ParamNode,
	) -> Self {
		Self::build_at(Position::Indexed(index), comment, false, count, factory)
	}

	/// A sequence of unbounded length, carrying one non-defaulted exemplar
	/// element (always built at index `0`) describing every document-
	/// supplied element's shape; printed as the exemplar followed by `...`
	pub fn vector(name: impl Into<String>, comment: impl Into<String>, factory: impl FnOnce(usize) -> ParamNode) -> Self {
		let mut factory = Some(factory);
		Self::build_at(Position::Named(name.into()), comment, true, 1, move |i| {
			(factory.take().expect("vector sequence exemplar built exactly once"))(i)
		})
	}

	/// Like [`Sequence::vector`], but this sequence is itself a sequence/tuple
	/// element rather than a table member
	pub fn vector_at_index(index: usize, comment: impl Into<String>, factory: impl FnOnce(usize) -> ParamNode) -> Self {
		let mut factory = Some(factory);
		Self::build_at(Position::Indexed(index), comment, true, 1, move |i| {
			(factory.take().expect("vector sequence exemplar built exactly once"))(i)
		})
	}

	/// A vector sequence pre-populated with `count` defaulted elements, one
	/// per default value a caller has already baked into `factory(i)` — e.g.
	/// `Atom::with_default(i, ..)` — used when a vector parameter is given an
	/// explicit list of defaults at schema-build time rather than a single
	/// shape-only exemplar (spec.md §8 scenario seeds 5-6)
	pub fn vector_with_defaults(
		name: impl Into<String>,
		comment: impl Into<String>,
		count: usize,
		factory: impl FnMut(usize) -> ParamNode,
	) -> Self {
		Self::build_at(Position::Named(name.into()), comment, true, count, factory)
	}

	/// Like [`Sequence::vector_with_defaults`], but this sequence is itself a
	/// sequence/tuple element rather than a table member, per `spec.md` §8
	/// scenario seed 6 (`Sequence<Sequence<int>,2>`, where each outer element
	/// is itself a defaulted vector sequence)
	pub fn vector_with_defaults_at_index(
		index: usize,
		comment: impl Into<String>,
		count: usize,
		factory: impl FnMut(usize) -> ParamNode,
	) -> Self {
		Self::build_at(Position::Indexed(index), comment, true, count, factory)
	}

	/// Mark this sequence as optional — it may be absent from a document
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
	pub fn is_vector(&self) -> bool {
		self.is_vector
	}

	/// The one exemplar element of a vector sequence
	pub fn exemplar(&self) -> Result<&ParamNode, ParamError> {
		if !self.is_vector {
			return Err(ParamError::kind(ParamErrorKind::Logic {
				key: self.base.key.clone(),
				message: "exemplar() called on a fixed sequence".into(),
			}));
		}
		self.elements.first().ok_or_else(|| {
			ParamError::kind(ParamErrorKind::Logic {
				key: self.base.key.clone(),
				message: "vector sequence built with no exemplar".into(),
			})
		})
	}

	pub fn elements(&self) -> &[ParamNode] {
		&self.elements
	}
}
