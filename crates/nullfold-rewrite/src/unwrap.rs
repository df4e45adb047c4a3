//! Removal of the `.Value` unwrap on nullable value types.

use nullfold_common::TriviaList;
use nullfold_syntax::{Node, NodeIndex, SyntaxArena};

/// Name of the accessor that unwraps a nullable value type.
pub const VALUE_ACCESSOR: &str = "Value";

/// If `matched` is directly followed by `.Value` in the tree rooted at
/// `root`, replace that member access by `matched` itself and return the
/// new root.
///
/// Trivia on the removed `.` and `Value` tokens is appended to the
/// receiver's trailing trivia.
pub fn strip_value_unwrap(
    arena: &mut SyntaxArena,
    root: NodeIndex,
    matched: NodeIndex,
) -> Option<NodeIndex> {
    let parent = arena.parent_of(root, matched)?;
    let Some(Node::MemberAccess { target, dot, name }) = arena.get(parent) else {
        return None;
    };
    // `@Value` names the same member
    if *target != matched || name.text.trim_start_matches('@') != VALUE_ACCESSOR {
        return None;
    }

    let mut trailing: TriviaList = arena.trailing_trivia(matched).iter().cloned().collect();
    for token in [dot, name] {
        trailing.extend(token.leading.iter().cloned());
        trailing.extend(token.trailing.iter().cloned());
    }

    let receiver = arena.with_trailing_trivia(matched, trailing);
    arena.replace_node(root, parent, receiver)
}

#[cfg(test)]
#[path = "tests/unwrap_tests.rs"]
mod tests;
