//! Arena storage for syntax nodes.
//!
//! The arena is append-only. Rewrites never touch an existing node: they
//! add new nodes and copy the path from the root down to the replaced
//! node, so every old root stays valid and untouched subtrees are shared.

use crate::node::{EdgeMut, Element, Node, NodeIndex, NodeKind};
use crate::scanner::Token;
use nullfold_common::trivia::{Trivia, TriviaList, trivia_len};

#[derive(Clone, Debug, Default)]
pub struct SyntaxArena {
    nodes: Vec<Node>,
}

impl SyntaxArena {
    pub fn new() -> SyntaxArena {
        SyntaxArena::default()
    }

    pub fn with_capacity(capacity: usize) -> SyntaxArena {
        SyntaxArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add(&mut self, node: Node) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(node);
        index
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.get(index).map(Node::kind)
    }

    // =========================================================================
    // Tokens and trivia
    // =========================================================================

    // Chains build left spines as deep as the chain is long, so tree walks
    // use explicit stacks rather than recursion.

    pub fn first_token(&self, index: NodeIndex) -> Option<&Token> {
        let mut current = index;
        loop {
            match self.get(current)?.elements().into_iter().next()? {
                Element::Token(token) => return Some(token),
                Element::Node(child) => current = child,
            }
        }
    }

    pub fn last_token(&self, index: NodeIndex) -> Option<&Token> {
        let mut current = index;
        loop {
            match self.get(current)?.elements().into_iter().last()? {
                Element::Token(token) => return Some(token),
                Element::Node(child) => current = child,
            }
        }
    }

    /// All tokens under `index` in source order.
    pub fn tokens(&self, index: NodeIndex) -> Vec<&Token> {
        let mut out = Vec::new();
        let mut stack = vec![Element::Node(index)];
        while let Some(element) = stack.pop() {
            match element {
                Element::Token(token) => out.push(token),
                Element::Node(child) => {
                    if let Some(node) = self.get(child) {
                        stack.extend(node.elements().into_iter().rev());
                    }
                }
            }
        }
        out
    }

    pub fn leading_trivia(&self, index: NodeIndex) -> &[Trivia] {
        self.first_token(index).map_or(&[], |t| t.leading.as_slice())
    }

    pub fn trailing_trivia(&self, index: NodeIndex) -> &[Trivia] {
        self.last_token(index).map_or(&[], |t| t.trailing.as_slice())
    }

    /// A copy of `index` whose first token has `leading` as its leading trivia.
    pub fn with_leading_trivia(&mut self, index: NodeIndex, leading: TriviaList) -> NodeIndex {
        let mut leading = Some(leading);
        self.map_edge_token(index, true, &mut |token| {
            if let Some(list) = leading.take() {
                token.leading = list;
            }
        })
    }

    /// A copy of `index` whose last token has `trailing` as its trailing trivia.
    pub fn with_trailing_trivia(&mut self, index: NodeIndex, trailing: TriviaList) -> NodeIndex {
        let mut trailing = Some(trailing);
        self.map_edge_token(index, false, &mut |token| {
            if let Some(list) = trailing.take() {
                token.trailing = list;
            }
        })
    }

    /// A copy of `index` without leading trivia on its first token or
    /// trailing trivia on its last token.
    pub fn without_outer_trivia(&mut self, index: NodeIndex) -> NodeIndex {
        let stripped = self.with_leading_trivia(index, TriviaList::new());
        self.with_trailing_trivia(stripped, TriviaList::new())
    }

    fn map_edge_token(
        &mut self,
        index: NodeIndex,
        first: bool,
        f: &mut dyn FnMut(&mut Token),
    ) -> NodeIndex {
        // Walk down the edge to the node that owns the edge token
        let mut path = Vec::new();
        let mut current = index;
        let edge_node = loop {
            let Some(node) = self.get(current) else {
                return index;
            };
            let mut node = node.clone();
            let edge = if first {
                node.first_edge_mut()
            } else {
                node.last_edge_mut()
            };
            let child = match edge {
                Some(EdgeMut::Token(token)) => {
                    f(token);
                    None
                }
                Some(EdgeMut::Node(child)) => Some(child),
                None => return index,
            };
            match child {
                Some(child) => {
                    path.push(current);
                    current = child;
                }
                None => break node,
            }
        };

        let mut replacement = self.add(edge_node);
        let mut replaced = current;
        for &ancestor in path.iter().rev() {
            let Some(parent) = self.get(ancestor) else {
                return index;
            };
            let parent = parent.with_child_replaced(replaced, replacement);
            replaced = ancestor;
            replacement = self.add(parent);
        }
        replacement
    }

    // =========================================================================
    // Spans
    // =========================================================================

    /// Source span of the node's text, excluding outer trivia.
    pub fn span(&self, index: NodeIndex) -> Option<(u32, u32)> {
        let first = self.first_token(index)?;
        let last = self.last_token(index)?;
        if first.is_synthetic() || last.is_synthetic() {
            return None;
        }
        Some((first.pos, last.end()))
    }

    /// Source span of the node including its leading and trailing trivia.
    pub fn full_span(&self, index: NodeIndex) -> Option<(u32, u32)> {
        let first = self.first_token(index)?;
        let last = self.last_token(index)?;
        if first.is_synthetic() || last.is_synthetic() {
            return None;
        }
        let start = first.pos - trivia_len(&first.leading) as u32;
        let end = last.end() + trivia_len(&last.trailing) as u32;
        Some((start, end))
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Structural equality ignoring trivia: same node kinds and the same
    /// token texts in the same places.
    pub fn are_equivalent(&self, a: NodeIndex, b: NodeIndex) -> bool {
        let mut stack = vec![(a, b)];
        while let Some((a, b)) = stack.pop() {
            if a == b {
                continue;
            }
            let (Some(left), Some(right)) = (self.get(a), self.get(b)) else {
                return false;
            };
            if left.kind() != right.kind() {
                return false;
            }
            let left = left.elements();
            let right = right.elements();
            if left.len() != right.len() {
                return false;
            }
            for pair in left.iter().zip(right.iter()) {
                match pair {
                    (Element::Token(x), Element::Token(y)) => {
                        if x.kind != y.kind || x.text != y.text {
                            return false;
                        }
                    }
                    (Element::Node(x), Element::Node(y)) => stack.push((*x, *y)),
                    _ => return false,
                }
            }
        }
        true
    }

    /// The immediate parent of `node` in the tree rooted at `root`.
    pub fn parent_of(&self, root: NodeIndex, node: NodeIndex) -> Option<NodeIndex> {
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let children = self.get(current)?.children();
            if children.contains(&node) {
                return Some(current);
            }
            stack.extend(children.into_iter().rev());
        }
        None
    }

    /// Every node under `root` (inclusive) in pre-order.
    pub fn descendants(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let Some(node) = self.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children().into_iter().rev());
        }
        out
    }

    /// Replace `old` by `new` in the tree rooted at `root`.
    ///
    /// Returns the index of the new root, or `None` when `old` is not
    /// part of the tree. Nodes along the root-to-`old` path are copied;
    /// everything else is shared with the old tree.
    pub fn replace_node(
        &mut self,
        root: NodeIndex,
        old: NodeIndex,
        new: NodeIndex,
    ) -> Option<NodeIndex> {
        let path = self.path_to(root, old)?;
        let mut replacement = new;
        let mut replaced = old;
        for &ancestor in path.iter().rev() {
            let node = self.get(ancestor)?.with_child_replaced(replaced, replacement);
            replaced = ancestor;
            replacement = self.add(node);
        }
        Some(replacement)
    }

    /// Ancestors of `target` from `root` down to its parent.
    fn path_to(&self, root: NodeIndex, target: NodeIndex) -> Option<Vec<NodeIndex>> {
        let mut path = Vec::new();
        // (node, number of ancestors above it)
        let mut stack = vec![(root, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            path.truncate(depth);
            if current == target {
                return Some(path);
            }
            let Some(node) = self.get(current) else {
                continue;
            };
            path.push(current);
            stack.extend(node.children().into_iter().rev().map(|child| (child, depth + 1)));
        }
        None
    }
}

#[cfg(test)]
#[path = "tests/arena_tests.rs"]
mod tests;
