//! Access chains: prefix matching and accessor extraction.
//!
//! A chain is read along its receiver spine only. For `a.b().c[0]` the
//! spine is `a.b().c[0]`, `a.b().c`, `a.b()`, `a`. Call and index
//! arguments are never part of it, and neither is the called member `a.b`
//! on its own.

use nullfold_syntax::{Node, NodeIndex, SyntaxArena};

/// The next node down the spine.
fn receiver(arena: &SyntaxArena, node: NodeIndex) -> Option<NodeIndex> {
    match arena.get(node)? {
        Node::Invocation { target, .. } => match arena.get(*target)? {
            // `a.b` in `a.b()` names a method, not a value
            Node::MemberAccess {
                target: receiver, ..
            } => Some(*receiver),
            _ => Some(*target),
        },
        Node::MemberAccess { target, .. } | Node::ElementAccess { target, .. } => Some(*target),
        _ => None,
    }
}

/// Find the node on `chain`'s receiver spine that is equivalent to
/// `prefix`, starting from the outermost node.
pub fn chain_starts_with(
    arena: &SyntaxArena,
    chain: NodeIndex,
    prefix: NodeIndex,
) -> Option<NodeIndex> {
    let mut current = chain;
    loop {
        if arena.are_equivalent(current, prefix) {
            return Some(current);
        }
        current = receiver(arena, current)?;
    }
}

/// The accessor that reads from `node`, searched under `root`:
/// the call when `node` is the receiver of a called member, otherwise
/// the member or element access directly on `node`.
pub fn wrapping_accessor(
    arena: &SyntaxArena,
    root: NodeIndex,
    node: NodeIndex,
) -> Option<NodeIndex> {
    let parent = arena.parent_of(root, node)?;
    match arena.get(parent)? {
        Node::MemberAccess { target, .. } if *target == node => {
            let called = arena
                .parent_of(root, parent)
                .filter(|&grandparent| {
                    matches!(
                        arena.get(grandparent),
                        Some(Node::Invocation { target, .. }) if *target == parent
                    )
                });
            Some(called.unwrap_or(parent))
        }
        Node::ElementAccess { target, .. } if *target == node => Some(parent),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/chain_tests.rs"]
mod tests;
