//! Conversion of an accessor into its null-conditional form.

use nullfold_common::TriviaList;
use nullfold_syntax::{Node, NodeIndex, SyntaxArena, SyntaxKind, Token};

/// Turn a member access, element access or member call into a
/// `ConditionalAccess` on the same receiver.
///
/// | accessor       | result               |
/// |----------------|----------------------|
/// | `recv.name`    | `recv?.name`         |
/// | `recv[args]`   | `recv?[args]`        |
/// | `recv.m(args)` | `recv?.m(args)`      |
///
/// A conditional access is returned unchanged. Anything else, including a
/// call whose callee is not a member access, yields `None`.
pub fn to_conditional(arena: &mut SyntaxArena, accessor: NodeIndex) -> Option<NodeIndex> {
    match arena.get(accessor)?.clone() {
        Node::ConditionalAccess { .. } => Some(accessor),
        Node::Invocation { target, arguments } => {
            let Node::MemberAccess {
                target: receiver,
                mut dot,
                name,
            } = arena.get(target)?.clone()
            else {
                return None;
            };
            let (receiver, question) = detach_question(arena, receiver, &mut dot.leading);
            let binding = arena.add(Node::MemberBinding { dot, name });
            let call = arena.add(Node::Invocation {
                target: binding,
                arguments,
            });
            Some(arena.add(Node::ConditionalAccess {
                target: receiver,
                question,
                binding: call,
            }))
        }
        Node::ElementAccess {
            target,
            mut arguments,
        } => {
            let (receiver, question) = detach_question(arena, target, &mut arguments.open.leading);
            let binding = arena.add(Node::ElementBinding { arguments });
            Some(arena.add(Node::ConditionalAccess {
                target: receiver,
                question,
                binding,
            }))
        }
        Node::MemberAccess {
            target,
            mut dot,
            name,
        } => {
            let (receiver, question) = detach_question(arena, target, &mut dot.leading);
            let binding = arena.add(Node::MemberBinding { dot, name });
            Some(arena.add(Node::ConditionalAccess {
                target: receiver,
                question,
                binding,
            }))
        }
        _ => None,
    }
}

/// Build the `?` token so that it sits directly before the binding: the
/// trivia between the receiver and the binding moves in front of `?`.
fn detach_question(
    arena: &mut SyntaxArena,
    receiver: NodeIndex,
    binding_leading: &mut TriviaList,
) -> (NodeIndex, Token) {
    let mut question = Token::punct(SyntaxKind::QuestionToken);
    let between: TriviaList = arena
        .trailing_trivia(receiver)
        .iter()
        .cloned()
        .chain(binding_leading.drain(..))
        .collect();
    if between.is_empty() {
        return (receiver, question);
    }
    question.leading = between;
    let receiver = arena.with_trailing_trivia(receiver, TriviaList::new());
    (receiver, question)
}

#[cfg(test)]
#[path = "tests/convert_tests.rs"]
mod tests;
