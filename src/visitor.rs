//! The double-dispatch traversal described in `spec.md` §4.8, grounded on
//! `original_source`'s `ParameterWalker.h`
//!
//! A [`ParameterVisitor`] gets a callback for every node kind plus a
//! before/after pair that brackets all of them, mirroring
//! `do_before_action`/`do_enter_table`/`do_exit_table`/`do_enter_sequence`/
//! `do_exit_sequence`/`do_atom`/`do_after_action`. Every method defaults to
//! doing nothing, so a visitor only overrides what it cares about.

use crate::kind::ParameterKind;
use crate::node::ParamNode;

pub trait ParameterVisitor {
	/// Called before any category-specific callback; returning `false` skips
	/// this node's subtree entirely, including [`ParameterVisitor::after_action`]
	fn before_action(&mut self, _node: &ParamNode) -> bool {
		true
	}
	fn enter_table(&mut self, _node: &ParamNode) {}
	fn exit_table(&mut self, _node: &ParamNode) {}
	fn enter_sequence(&mut self, _node: &ParamNode) {}
	fn exit_sequence(&mut self, _node: &ParamNode) {}
	fn atom(&mut self, _node: &ParamNode) {}
	fn after_action(&mut self, _node: &ParamNode) {}
}

/// Walk `node` and its descendants depth-first, in declaration order,
/// dispatching each to `visitor`
pub fn visit(node: &ParamNode, visitor: &mut impl ParameterVisitor) {
	if !visitor.before_action(node) {
		return;
	}
	match node.parameter_type() {
		ParameterKind::Atom => visitor.atom(node),
		ParameterKind::Table => {
			visitor.enter_table(node);
			for child in node.children() {
				visit(child, visitor);
			}
			visitor.exit_table(node);
		}
		ParameterKind::SeqFixed | ParameterKind::SeqVector | ParameterKind::Tuple => {
			visitor.enter_sequence(node);
			for child in node.children() {
				visit(child, visitor);
			}
			visitor.exit_sequence(node);
		}
	}
	visitor.after_action(node);
}
