use std::borrow::Cow;

/// Any error raised while building, validating or printing a schema
pub struct ParamError {
	inner: Box<ErrorInner>,
}

impl std::error::Error for ParamError {}

enum ErrorInner {
	Kind(ParamErrorKind),
	Msg(Cow<'static, str>),
	InvalidDocument(Vec<ParamError>),
}

/// The taxonomy of errors a [`ParamError`] can carry, excluding the
/// aggregate [`ParamError::InvalidDocument`] case
///
/// Every variant carries the fully-qualified key of the parameter it
/// concerns, per `spec.md` §7 ("every error carries the offending key").
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamErrorKind {
	/// A schema type parameter was given an ecosystem collection type
	/// directly (build-time rejection)
	#[error("`{key}`: schema type parameters may not be a raw ecosystem collection type")]
	NoStdContainers { key: String },
	/// An atom or table was used as a direct type parameter of another
	/// schema node (build-time rejection)
	#[error("`{key}`: atoms and tables may not directly contain other schema types")]
	NoNestedTypes { key: String },
	/// Fixed sequence/tuple length disagreed with the document
	#[error("`{key}`: expected {expected} element(s), found {found}")]
	WrongSize {
		key: String,
		expected: usize,
		found: usize,
	},
	/// A required parameter was absent from the document
	#[error("`{key}`: missing required parameter")]
	MissingRequired { key: String },
	/// A document key had no schema counterpart, and was not ignored
	#[error("`{key}`: unknown parameter")]
	Extra { key: String },
	/// The document's value shape disagreed with the schema's shape
	#[error("`{key}`: expected a {expected}")]
	WrongKind { key: String, expected: &'static str },
	/// An atom's value did not convert to its declared type
	#[error("`{key}`: {message}")]
	Coercion { key: String, message: String },
	/// An atom was read before it was defaulted or bound
	#[error("`{key}`: read with no default and no bound value")]
	Unset { key: String },
	/// An internal invariant was violated (e.g. printing a vector sequence
	/// with other than one exemplar)
	#[error("`{key}`: internal invariant violated: {message}")]
	Logic { key: String, message: String },
	/// A downcast that must always succeed did not
	#[error("`{key}`: downcast during traversal unexpectedly failed")]
	CantHappen { key: String },
}

impl ParamErrorKind {
	/// The key of the parameter this error concerns
	pub fn key(&self) -> &str {
		match self {
			Self::NoStdContainers { key }
			| Self::NoNestedTypes { key }
			| Self::WrongSize { key, .. }
			| Self::MissingRequired { key }
			| Self::Extra { key }
			| Self::WrongKind { key, .. }
			| Self::Coercion { key, .. }
			| Self::Unset { key }
			| Self::Logic { key, .. }
			| Self::CantHappen { key } => key,
		}
	}
}

impl ParamError {
	pub(crate) fn kind(kind: ParamErrorKind) -> Self {
		Self {
			inner: Box::new(ErrorInner::Kind(kind)),
		}
	}

	/// If you need a dynamic string use [`ParamError::custom`] instead
	pub(crate) fn new(s: &'static str) -> Self {
		Self {
			inner: Box::new(ErrorInner::Msg(Cow::Borrowed(s))),
		}
	}

	pub(crate) fn custom(s: impl std::fmt::Display) -> Self {
		Self {
			inner: Box::new(ErrorInner::Msg(Cow::Owned(s.to_string()))),
		}
	}

	/// Build the aggregate error a validation pass raises when it has
	/// collected one or more deviations
	pub fn invalid_document(errors: Vec<ParamError>) -> Self {
		Self {
			inner: Box::new(ErrorInner::InvalidDocument(errors)),
		}
	}

	/// The individual deviations, if this is an aggregate
	/// [`invalid_document`](Self::invalid_document) error
	pub fn deviations(&self) -> Option<&[ParamError]> {
		match *self.inner {
			ErrorInner::InvalidDocument(ref v) => Some(v),
			_ => None,
		}
	}

	/// The structured [`ParamErrorKind`] this error carries, if it isn't an
	/// aggregate or a free-form message
	pub fn kind_of(&self) -> Option<&ParamErrorKind> {
		match *self.inner {
			ErrorInner::Kind(ref k) => Some(k),
			_ => None,
		}
	}
}

impl std::fmt::Debug for ParamError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match *self.inner {
			ErrorInner::Kind(ref k) => std::fmt::Debug::fmt(k, f),
			ErrorInner::Msg(ref s) => std::fmt::Debug::fmt(&**s, f),
			ErrorInner::InvalidDocument(ref errs) => f.debug_tuple("InvalidDocument").field(errs).finish(),
		}
	}
}

impl std::fmt::Display for ParamError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match *self.inner {
			ErrorInner::Kind(ref k) => std::fmt::Display::fmt(k, f),
			ErrorInner::Msg(ref s) => std::fmt::Display::fmt(&**s, f),
			ErrorInner::InvalidDocument(ref errs) => {
				writeln!(f, "document is not a valid instance of the schema:")?;
				for e in errs {
					writeln!(f, "  - {e}")?;
				}
				Ok(())
			}
		}
	}
}
