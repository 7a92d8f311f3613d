//! The construction-time schema registry described in `spec.md` §4.7
//!
//! A weak (non-owning) mapping from every schema node's key to the ordered
//! list of its direct children, populated as each child's constructor
//! completes. This mirrors `original_source`'s `ParameterSchemaRegistry`,
//! keyed here by the already-unique fully-qualified [`Key`](crate::key::Key)
//! rather than by raw pointer identity (see `DESIGN.md`).
//!
//! Like [`crate::key`], this is `thread_local!` scaffolding: useful only
//! while a schema tree is under construction. Once a [`Table`](crate::Table)
//! is finished, traversal walks the owned `Vec` of children it collected,
//! not the registry.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::key::Key;
use crate::kind::ParameterKind;

/// What the registry remembers about a single registered child
#[derive(Clone, Debug)]
pub struct ChildInfo {
	pub key: Key,
	pub kind: ParameterKind,
}

thread_local! {
	static CHILDREN: RefCell<HashMap<Key, Vec<ChildInfo>>> = RefCell::new(HashMap::new());
}

/// Record that `child` was constructed as a direct child of `parent_key`
///
/// Called once, right as a child parameter's constructor finishes (and
/// therefore knows its own final key and kind).
pub fn register(parent_key: &str, child: ChildInfo) {
	CHILDREN.with(|map| {
		map.borrow_mut()
			.entry(parent_key.to_owned())
			.or_default()
			.push(child);
	});
}

/// The ordered list of direct children registered against `key`, if any
pub fn children_of(key: &str) -> Vec<ChildInfo> {
	CHILDREN.with(|map| map.borrow().get(key).cloned().unwrap_or_default())
}

/// Depth-first, declaration-order key listing rooted at `root_key`
///
/// Per `spec.md` §4.7 / §8: the first entry is `root_key` itself, and the
/// remaining entries are the keys of a depth-first, declaration-order
/// traversal of its registered descendants.
pub fn parameter_keys(root_key: &str) -> Vec<Key> {
	fn walk(key: &str, out: &mut Vec<Key>) {
		for child in children_of(key) {
			out.push(child.key.clone());
			walk(&child.key, out);
		}
	}
	let mut out = vec![root_key.to_owned()];
	walk(root_key, &mut out);
	out
}

/// Wipe the registry
///
/// Called between independently-built schemas in the same process, per
/// `spec.md` §5 and §4.7 — otherwise the registry accumulates across builds
/// and `parameter_keys` output grows unboundedly.
pub fn clear() {
	CHILDREN.with(|map| map.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parameter_keys_is_depth_first_declaration_order() {
		clear();
		register("root", ChildInfo { key: "root.a".into(), kind: ParameterKind::Atom });
		register("root", ChildInfo { key: "root.b".into(), kind: ParameterKind::Table });
		register("root.b", ChildInfo { key: "root.b[0]".into(), kind: ParameterKind::Atom });
		register("root.b", ChildInfo { key: "root.b[1]".into(), kind: ParameterKind::Atom });

		assert_eq!(
			parameter_keys("root"),
			vec!["root", "root.a", "root.b", "root.b[0]", "root.b[1]"]
		);
		clear();
	}

	#[test]
	fn clear_empties_the_map() {
		clear();
		register("root", ChildInfo { key: "root.a".into(), kind: ParameterKind::Atom });
		clear();
		assert_eq!(parameter_keys("root"), vec!["root"]);
	}
}
