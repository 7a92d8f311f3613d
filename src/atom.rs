//! Leaf parameters, per `spec.md` §3 ("Atom. A leaf parameter holding one
//! scalar of a fixed built-in type")

use std::fmt;

use crate::base::Base;
use crate::error::{ParamError, ParamErrorKind};
use crate::key::{self, Position};
use crate::kind::ParameterKind;
use crate::registry::{self, ChildInfo};

/// A scalar type an [`Atom`] can hold
///
/// Closed over the built-in set `bool`/`i64`/`f64`/`String`, mirroring
/// `serde_avro_fast`'s closed `RegularType` primitive set rather than
/// opening this up to arbitrary user types — see `DESIGN.md`.
pub trait Atomic: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
	/// Parse a document atom's raw string form into this type
	fn coerce(raw: &str) -> Result<Self, String>;

	/// Render this value back into document atom form
	fn stringify(&self) -> String;

	/// The type name shown in place of a value in allowed-configuration
	/// output, e.g. `<int>`
	fn type_placeholder() -> &'static str;
}

impl Atomic for bool {
	fn coerce(raw: &str) -> Result<Self, String> {
		raw.parse().map_err(|_| format!("`{raw}` is not a bool"))
	}
	fn stringify(&self) -> String {
		self.to_string()
	}
	fn type_placeholder() -> &'static str {
		"bool"
	}
}

impl Atomic for i64 {
	fn coerce(raw: &str) -> Result<Self, String> {
		raw.parse().map_err(|_| format!("`{raw}` is not an integer"))
	}
	fn stringify(&self) -> String {
		self.to_string()
	}
	fn type_placeholder() -> &'static str {
		"int"
	}
}

impl Atomic for f64 {
	fn coerce(raw: &str) -> Result<Self, String> {
		raw.parse().map_err(|_| format!("`{raw}` is not a floating-point number"))
	}
	fn stringify(&self) -> String {
		self.to_string()
	}
	fn type_placeholder() -> &'static str {
		"double"
	}
}

impl Atomic for String {
	fn coerce(raw: &str) -> Result<Self, String> {
		Ok(raw.to_owned())
	}
	fn stringify(&self) -> String {
		self.clone()
	}
	fn type_placeholder() -> &'static str {
		"string"
	}
}

/// A leaf parameter holding one scalar `T`
#[derive(Clone, Debug)]
pub struct Atom<T: Atomic> {
	pub(crate) base: Base,
	pub(crate) default: Option<T>,
	pub(crate) value: Option<T>,
}

impl<T: Atomic> Atom<T> {
	fn build(position: Position, comment: String, default: Option<T>) -> Self {
		if key::is_empty() {
			registry::clear();
		}
		let parent = key::parent_key();
		let name = key::name_of(&position);
		let key = key::with_position(&position, |key| key);
		registry::register(
			&parent,
			ChildInfo {
				key: key.clone(),
				kind: ParameterKind::Atom,
			},
		);
		Atom {
			base: Base {
				name,
				key,
				comment,
				has_default: default.is_some(),
				is_optional: false,
				kind: ParameterKind::Atom,
			},
			default,
			value: None,
		}
	}

	pub fn new(name: impl Into<String>) -> Self {
		Self::build(Position::Named(name.into()), String::new(), None)
	}

	pub fn with_comment(name: impl Into<String>, comment: impl Into<String>) -> Self {
		Self::build(Position::Named(name.into()), comment.into(), None)
	}

	pub fn with_default(name: impl Into<String>, default: T) -> Self {
		Self::build(Position::Named(name.into()), String::new(), Some(default))
	}

	pub fn with_comment_and_default(name: impl Into<String>, comment: impl Into<String>, default: T) -> Self {
		Self::build(Position::Named(name.into()), comment.into(), Some(default))
	}

	/// Build an atom at a positional (bracketed) slot instead of a named one
	///
	/// Used to supply the per-index factory a [`crate::Sequence`] or
	/// [`crate::Tuple`] element list is built from — see `spec.md` §4.3/§4.4,
	/// where a sequence/tuple child's key is always `[i]` rather than a
	/// dotted name.
	pub fn at_index(index: usize, comment: impl Into<String>, default: Option<T>) -> Self {
		Self::build(Position::Indexed(index), comment.into(), default)
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

	/// The effective value: the bound value if one was supplied, else the
	/// default, else [`ParamErrorKind::Unset`]
	pub fn get(&self) -> Result<&T, ParamError> {
		self.value
			.as_ref()
			.or(self.default.as_ref())
			.ok_or_else(|| ParamError::kind(ParamErrorKind::Unset { key: self.base.key.clone() }))
	}

	pub(crate) fn bind_raw(&mut self, raw: &str) -> Result<(), String> {
		self.value = Some(T::coerce(raw)?);
		Ok(())
	}
}

/// The object-safe façade [`crate::ParamNode`] stores atoms behind, so that
/// a table's member list can hold atoms of different `T` side by side
pub(crate) trait AtomDyn: fmt::Debug {
	fn base(&self) -> &Base;
	fn base_mut(&mut self) -> &mut Base;
	fn stringify(&self) -> Option<String>;
	fn bind_raw(&mut self, raw: &str) -> Result<(), String>;
	fn type_placeholder(&self) -> &'static str;
	fn clone_box(&self) -> Box<dyn AtomDyn>;
}

impl<T: Atomic> AtomDyn for Atom<T> {
	fn base(&self) -> &Base {
		&self.base
	}

	fn base_mut(&mut self) -> &mut Base {
		&mut self.base
	}

	fn stringify(&self) -> Option<String> {
		self.value.as_ref().or(self.default.as_ref()).map(Atomic::stringify)
	}

	fn bind_raw(&mut self, raw: &str) -> Result<(), String> {
		Atom::bind_raw(self, raw)
	}

	fn type_placeholder(&self) -> &'static str {
		T::type_placeholder()
	}

	fn clone_box(&self) -> Box<dyn AtomDyn> {
		Box::new(self.clone())
	}
}

impl Clone for Box<dyn AtomDyn> {
	fn clone(&self) -> Self {
		self.as_ref().clone_box()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_used_until_bound() {
		let mut atom = Atom::<i64>::with_default("port", 8080);
		assert_eq!(*atom.get().unwrap(), 8080);
		atom.bind_raw("9090").unwrap();
		assert_eq!(*atom.get().unwrap(), 9090);
	}

	#[test]
	fn no_default_and_unbound_is_unset() {
		let atom = Atom::<String>::new("host");
		let err = atom.get().unwrap_err();
		assert_eq!(err.kind_of(), Some(&ParamErrorKind::Unset { key: "host".into() }));
	}

	#[test]
	fn coercion_failure_is_reported() {
		let mut atom = Atom::<i64>::new("port");
		let err = atom.bind_raw("not-a-number").unwrap_err();
		assert!(err.contains("not-a-number"));
	}
}
