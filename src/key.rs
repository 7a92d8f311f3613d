//! The scoped, per-build name stack described in `spec.md` §4.6
//!
//! A newly-constructed parameter node consults the stack to compute its own
//! [`Key`], then pushes its own segment for the duration of its own
//! construction so that its children see it. The stack is `thread_local!`
//! (one builder thread per schema-tree construction, per `spec.md` §5) and
//! scoped: every push is undone on every exit path, including unwinding,
//! via a `Drop` guard — the "scoped-acquisition frame" called for in
//! `spec.md` §9.

use std::cell::RefCell;

thread_local! {
	static STACK: RefCell<Vec<Segment>> = const { RefCell::new(Vec::new()) };
}

/// A single entry on the name stack: either a named segment (table member)
/// or a positional segment (sequence/tuple element)
#[derive(Clone, Debug)]
enum Segment {
	Name(String),
	Index(usize),
}

/// Where a node sits relative to its enclosing parent
///
/// Table (and tuple/root) members push a dotted name; sequence and tuple
/// elements push a bracketed index instead, per `spec.md` §3: "sequence-
/// element children push their positional segment `[i]` instead of a
/// dotted suffix".
#[derive(Clone, Debug)]
pub enum Position {
	Named(String),
	Indexed(usize),
}

impl From<Segment> for Position {
	fn from(s: Segment) -> Self {
		match s {
			Segment::Name(n) => Position::Named(n),
			Segment::Index(i) => Position::Indexed(i),
		}
	}
}

/// A node's fully-qualified dotted-plus-bracketed path from the root
///
/// See `spec.md` §3: "A string formed by joining ancestor names with `.`,
/// with sequence-element positions expressed as `[i]` appended to the
/// parent's key (no dot before brackets)."
pub type Key = String;

fn segment_of(position: &Position) -> Segment {
	match position {
		Position::Named(n) => Segment::Name(n.clone()),
		Position::Indexed(i) => Segment::Index(*i),
	}
}

fn push_segment(out: &mut String, seg: &Segment) {
	match seg {
		Segment::Name(n) => {
			if !out.is_empty() {
				out.push('.');
			}
			out.push_str(n);
		}
		Segment::Index(i) => {
			out.push('[');
			out.push_str(&i.to_string());
			out.push(']');
		}
	}
}

fn joined(segments: impl Iterator<Item = Segment>) -> Key {
	let mut out = String::new();
	for seg in segments {
		push_segment(&mut out, &seg);
	}
	out
}

/// The key of whatever construction is currently open (the future parent of
/// a node about to be constructed), without modifying the stack
///
/// Empty string if nothing is under construction (i.e. we are about to
/// construct a root-level node) — the empty-root sentinel `<0>` from
/// `spec.md` §4.6 never needs to be materialized because an empty stack
/// already joins to `""`.
pub fn parent_key() -> Key {
	STACK.with(|stack| joined(stack.borrow().iter().cloned()))
}

/// RAII guard popping exactly the frame it pushed, on every exit path
struct StackGuard;
impl Drop for StackGuard {
	fn drop(&mut self) {
		STACK.with(|stack| {
			stack.borrow_mut().pop();
		});
	}
}

/// Compute the key of a node at `position` given the current stack, push
/// that segment for the duration of `f`, and pop it unconditionally
/// afterwards (including on unwind)
pub fn with_position<R>(position: &Position, f: impl FnOnce(Key) -> R) -> R {
	let seg = segment_of(position);
	let key = joined(STACK.with(|stack| stack.borrow().clone()).into_iter().chain(std::iter::once(seg.clone())));
	STACK.with(|stack| stack.borrow_mut().push(seg));
	let _guard = StackGuard;
	f(key)
}

/// Shorthand for [`with_position`] with a named (dotted) segment
pub fn with_named<R>(name: impl Into<String>, f: impl FnOnce(Key) -> R) -> R {
	with_position(&Position::Named(name.into()), f)
}

/// Shorthand for [`with_position`] with an indexed (bracketed) segment
pub fn with_indexed<R>(index: usize, f: impl FnOnce(Key) -> R) -> R {
	with_position(&Position::Indexed(index), f)
}

/// The local `name` a node at `position` carries — the bare identifier for a
/// table member, or the bracketed form (`[i]`) for a sequence/tuple element,
/// per `spec.md` §3's "Sequence element — any node whose key ends in `]`"
pub fn name_of(position: &Position) -> String {
	match position {
		Position::Named(n) => n.clone(),
		Position::Indexed(i) => format!("[{i}]"),
	}
}

/// `true` if the stack is currently empty (i.e. we are about to construct a
/// root-level node)
pub fn is_empty() -> bool {
	STACK.with(|stack| stack.borrow().is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nested_table_and_sequence_keys() {
		let key = with_named("outer", |outer_key| {
			assert_eq!(outer_key, "outer");
			with_named("inner", |inner_key| {
				assert_eq!(inner_key, "outer.inner");
				with_indexed(2, |elem_key| {
					assert_eq!(elem_key, "outer.inner[2]");
					elem_key
				})
			})
		});
		assert_eq!(key, "outer.inner[2]");
		assert!(is_empty());
	}

	#[test]
	fn stack_unwinds_on_panic() {
		let result = std::panic::catch_unwind(|| {
			with_named("root", |_| {
				panic!("boom");
			})
		});
		assert!(result.is_err());
		assert!(is_empty());
	}

	#[test]
	fn index_child_of_root_has_no_leading_dot() {
		let key = with_indexed(0, |k| k);
		assert_eq!(key, "[0]");
	}

	#[test]
	fn parent_key_reflects_currently_open_frame() {
		with_named("outer", |_| {
			assert_eq!(parent_key(), "outer");
			with_indexed(0, |_| {
				assert_eq!(parent_key(), "outer[0]");
			});
		});
		assert_eq!(parent_key(), "");
	}
}
