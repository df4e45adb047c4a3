//! Syntax node types.
//!
//! Nodes reference their children by [`NodeIndex`] into a
//! [`SyntaxArena`](crate::SyntaxArena) and own the tokens that belong to
//! them directly. A node is never mutated once it has been added to the
//! arena; rewrites add new nodes.

use crate::scanner::Token;
use serde::Serialize;
use smallvec::SmallVec;

/// Index of a node in a `SyntaxArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == NodeIndex::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != NodeIndex::NONE
    }
}

/// `( a, b )` or `[ a, b ]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArgumentList {
    pub open: Token,
    pub arguments: Vec<NodeIndex>,
    /// Separating commas; one fewer than `arguments` unless a trailing comma is present.
    pub separators: Vec<Token>,
    pub close: Token,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElseClause {
    pub else_keyword: Token,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Initializer {
    pub equals: Token,
    pub value: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Node {
    // ========================================================================
    // Expressions
    // ========================================================================
    NullLiteral(Token),
    Identifier(Token),
    /// Numbers, strings, characters, `true`, `false` and `this`.
    Literal(Token),
    MemberAccess {
        target: NodeIndex,
        dot: Token,
        name: Token,
    },
    ElementAccess {
        target: NodeIndex,
        arguments: ArgumentList,
    },
    Invocation {
        target: NodeIndex,
        arguments: ArgumentList,
    },
    /// `target?` followed by a binding chain relative to the checked receiver.
    ConditionalAccess {
        target: NodeIndex,
        question: Token,
        binding: NodeIndex,
    },
    /// `.name` inside a conditional access.
    MemberBinding {
        dot: Token,
        name: Token,
    },
    /// `[args]` inside a conditional access.
    ElementBinding {
        arguments: ArgumentList,
    },
    /// Binary operators, including assignments.
    Binary {
        left: NodeIndex,
        operator: Token,
        right: NodeIndex,
    },
    Prefix {
        operator: Token,
        operand: NodeIndex,
    },
    Parenthesized {
        open: Token,
        expression: NodeIndex,
        close: Token,
    },

    // ========================================================================
    // Statements
    // ========================================================================
    ExpressionStatement {
        expression: NodeIndex,
        semicolon: Token,
    },
    Block {
        open: Token,
        statements: Vec<NodeIndex>,
        close: Token,
    },
    If {
        if_keyword: Token,
        open_paren: Token,
        condition: NodeIndex,
        close_paren: Token,
        then_branch: NodeIndex,
        else_clause: Option<ElseClause>,
    },
    Return {
        keyword: Token,
        expression: Option<NodeIndex>,
        semicolon: Token,
    },
    /// `Type name = value;` and `Type? name;`.
    LocalDeclaration {
        type_name: Token,
        nullable_marker: Option<Token>,
        name: Token,
        initializer: Option<Initializer>,
        semicolon: Token,
    },
    Empty {
        semicolon: Token,
    },
    /// Tokens skipped by error recovery.
    Skipped {
        tokens: Vec<Token>,
    },
    SourceFile {
        statements: Vec<NodeIndex>,
        end_of_file: Token,
    },
}

/// Discriminant of [`Node`], used for logging and quick kind checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    NullLiteral,
    Identifier,
    Literal,
    MemberAccess,
    ElementAccess,
    Invocation,
    ConditionalAccess,
    MemberBinding,
    ElementBinding,
    Binary,
    Prefix,
    Parenthesized,
    ExpressionStatement,
    Block,
    If,
    Return,
    LocalDeclaration,
    Empty,
    Skipped,
    SourceFile,
}

/// One element of a node in source order.
#[derive(Clone, Copy, Debug)]
pub enum Element<'a> {
    Token(&'a Token),
    Node(NodeIndex),
}

/// Mutable access to the first or last element of a node.
pub enum EdgeMut<'a> {
    Token(&'a mut Token),
    Node(NodeIndex),
}

fn push_argument_list<'a>(out: &mut SmallVec<[Element<'a>; 8]>, list: &'a ArgumentList) {
    out.push(Element::Token(&list.open));
    for (i, &argument) in list.arguments.iter().enumerate() {
        out.push(Element::Node(argument));
        if let Some(separator) = list.separators.get(i) {
            out.push(Element::Token(separator));
        }
    }
    out.push(Element::Token(&list.close));
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::NullLiteral(_) => NodeKind::NullLiteral,
            Node::Identifier(_) => NodeKind::Identifier,
            Node::Literal(_) => NodeKind::Literal,
            Node::MemberAccess { .. } => NodeKind::MemberAccess,
            Node::ElementAccess { .. } => NodeKind::ElementAccess,
            Node::Invocation { .. } => NodeKind::Invocation,
            Node::ConditionalAccess { .. } => NodeKind::ConditionalAccess,
            Node::MemberBinding { .. } => NodeKind::MemberBinding,
            Node::ElementBinding { .. } => NodeKind::ElementBinding,
            Node::Binary { .. } => NodeKind::Binary,
            Node::Prefix { .. } => NodeKind::Prefix,
            Node::Parenthesized { .. } => NodeKind::Parenthesized,
            Node::ExpressionStatement { .. } => NodeKind::ExpressionStatement,
            Node::Block { .. } => NodeKind::Block,
            Node::If { .. } => NodeKind::If,
            Node::Return { .. } => NodeKind::Return,
            Node::LocalDeclaration { .. } => NodeKind::LocalDeclaration,
            Node::Empty { .. } => NodeKind::Empty,
            Node::Skipped { .. } => NodeKind::Skipped,
            Node::SourceFile { .. } => NodeKind::SourceFile,
        }
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self.kind(),
            NodeKind::ExpressionStatement
                | NodeKind::Block
                | NodeKind::If
                | NodeKind::Return
                | NodeKind::LocalDeclaration
                | NodeKind::Empty
                | NodeKind::Skipped
        )
    }

    /// Tokens and child nodes in source order.
    pub fn elements(&self) -> SmallVec<[Element<'_>; 8]> {
        let mut out = SmallVec::new();
        match self {
            Node::NullLiteral(token) | Node::Identifier(token) | Node::Literal(token) => {
                out.push(Element::Token(token));
            }
            Node::MemberAccess { target, dot, name } => {
                out.push(Element::Node(*target));
                out.push(Element::Token(dot));
                out.push(Element::Token(name));
            }
            Node::ElementAccess { target, arguments } | Node::Invocation { target, arguments } => {
                out.push(Element::Node(*target));
                push_argument_list(&mut out, arguments);
            }
            Node::ConditionalAccess {
                target,
                question,
                binding,
            } => {
                out.push(Element::Node(*target));
                out.push(Element::Token(question));
                out.push(Element::Node(*binding));
            }
            Node::MemberBinding { dot, name } => {
                out.push(Element::Token(dot));
                out.push(Element::Token(name));
            }
            Node::ElementBinding { arguments } => push_argument_list(&mut out, arguments),
            Node::Binary {
                left,
                operator,
                right,
            } => {
                out.push(Element::Node(*left));
                out.push(Element::Token(operator));
                out.push(Element::Node(*right));
            }
            Node::Prefix { operator, operand } => {
                out.push(Element::Token(operator));
                out.push(Element::Node(*operand));
            }
            Node::Parenthesized {
                open,
                expression,
                close,
            } => {
                out.push(Element::Token(open));
                out.push(Element::Node(*expression));
                out.push(Element::Token(close));
            }
            Node::ExpressionStatement {
                expression,
                semicolon,
            } => {
                out.push(Element::Node(*expression));
                out.push(Element::Token(semicolon));
            }
            Node::Block {
                open,
                statements,
                close,
            } => {
                out.push(Element::Token(open));
                out.extend(statements.iter().map(|&s| Element::Node(s)));
                out.push(Element::Token(close));
            }
            Node::If {
                if_keyword,
                open_paren,
                condition,
                close_paren,
                then_branch,
                else_clause,
            } => {
                out.push(Element::Token(if_keyword));
                out.push(Element::Token(open_paren));
                out.push(Element::Node(*condition));
                out.push(Element::Token(close_paren));
                out.push(Element::Node(*then_branch));
                if let Some(clause) = else_clause {
                    out.push(Element::Token(&clause.else_keyword));
                    out.push(Element::Node(clause.statement));
                }
            }
            Node::Return {
                keyword,
                expression,
                semicolon,
            } => {
                out.push(Element::Token(keyword));
                if let Some(expression) = expression {
                    out.push(Element::Node(*expression));
                }
                out.push(Element::Token(semicolon));
            }
            Node::LocalDeclaration {
                type_name,
                nullable_marker,
                name,
                initializer,
                semicolon,
            } => {
                out.push(Element::Token(type_name));
                if let Some(marker) = nullable_marker {
                    out.push(Element::Token(marker));
                }
                out.push(Element::Token(name));
                if let Some(init) = initializer {
                    out.push(Element::Token(&init.equals));
                    out.push(Element::Node(init.value));
                }
                out.push(Element::Token(semicolon));
            }
            Node::Empty { semicolon } => out.push(Element::Token(semicolon)),
            Node::Skipped { tokens } => out.extend(tokens.iter().map(Element::Token)),
            Node::SourceFile {
                statements,
                end_of_file,
            } => {
                out.extend(statements.iter().map(|&s| Element::Node(s)));
                out.push(Element::Token(end_of_file));
            }
        }
        out
    }

    /// Child nodes in source order.
    pub fn children(&self) -> SmallVec<[NodeIndex; 4]> {
        self.elements()
            .into_iter()
            .filter_map(|element| match element {
                Element::Node(idx) => Some(idx),
                Element::Token(_) => None,
            })
            .collect()
    }

    /// Mutable access to the first element, used to rewrite leading trivia.
    pub fn first_edge_mut(&mut self) -> Option<EdgeMut<'_>> {
        Some(match self {
            Node::NullLiteral(token) | Node::Identifier(token) | Node::Literal(token) => {
                EdgeMut::Token(token)
            }
            Node::MemberAccess { target, .. }
            | Node::ElementAccess { target, .. }
            | Node::Invocation { target, .. }
            | Node::ConditionalAccess { target, .. } => EdgeMut::Node(*target),
            Node::MemberBinding { dot, .. } => EdgeMut::Token(dot),
            Node::ElementBinding { arguments } => EdgeMut::Token(&mut arguments.open),
            Node::Binary { left, .. } => EdgeMut::Node(*left),
            Node::Prefix { operator, .. } => EdgeMut::Token(operator),
            Node::Parenthesized { open, .. } => EdgeMut::Token(open),
            Node::ExpressionStatement { expression, .. } => EdgeMut::Node(*expression),
            Node::Block { open, .. } => EdgeMut::Token(open),
            Node::If { if_keyword, .. } => EdgeMut::Token(if_keyword),
            Node::Return { keyword, .. } => EdgeMut::Token(keyword),
            Node::LocalDeclaration { type_name, .. } => EdgeMut::Token(type_name),
            Node::Empty { semicolon } => EdgeMut::Token(semicolon),
            Node::Skipped { tokens } => EdgeMut::Token(tokens.first_mut()?),
            Node::SourceFile {
                statements,
                end_of_file,
            } => match statements.first() {
                Some(&first) => EdgeMut::Node(first),
                None => EdgeMut::Token(end_of_file),
            },
        })
    }

    /// Mutable access to the last element, used to rewrite trailing trivia.
    pub fn last_edge_mut(&mut self) -> Option<EdgeMut<'_>> {
        Some(match self {
            Node::NullLiteral(token) | Node::Identifier(token) | Node::Literal(token) => {
                EdgeMut::Token(token)
            }
            Node::MemberAccess { name, .. } | Node::MemberBinding { name, .. } => {
                EdgeMut::Token(name)
            }
            Node::ElementAccess { arguments, .. }
            | Node::Invocation { arguments, .. }
            | Node::ElementBinding { arguments } => EdgeMut::Token(&mut arguments.close),
            Node::ConditionalAccess { binding, .. } => EdgeMut::Node(*binding),
            Node::Binary { right, .. } => EdgeMut::Node(*right),
            Node::Prefix { operand, .. } => EdgeMut::Node(*operand),
            Node::Parenthesized { close, .. } => EdgeMut::Token(close),
            Node::ExpressionStatement { semicolon, .. }
            | Node::Return { semicolon, .. }
            | Node::LocalDeclaration { semicolon, .. }
            | Node::Empty { semicolon } => EdgeMut::Token(semicolon),
            Node::Block { close, .. } => EdgeMut::Token(close),
            Node::If {
                then_branch,
                else_clause,
                ..
            } => match else_clause {
                Some(clause) => EdgeMut::Node(clause.statement),
                None => EdgeMut::Node(*then_branch),
            },
            Node::Skipped { tokens } => EdgeMut::Token(tokens.last_mut()?),
            Node::SourceFile { end_of_file, .. } => EdgeMut::Token(end_of_file),
        })
    }

    /// A copy of this node with every reference to `old` pointing at `new`.
    pub fn with_child_replaced(&self, old: NodeIndex, new: NodeIndex) -> Node {
        let swap = |idx: NodeIndex| if idx == old { new } else { idx };
        let swap_list = |list: &ArgumentList| ArgumentList {
            arguments: list.arguments.iter().map(|&a| swap(a)).collect(),
            ..list.clone()
        };

        let mut node = self.clone();
        match &mut node {
            Node::NullLiteral(_)
            | Node::Identifier(_)
            | Node::Literal(_)
            | Node::MemberBinding { .. }
            | Node::Empty { .. }
            | Node::Skipped { .. } => {}
            Node::MemberAccess { target, .. } => *target = swap(*target),
            Node::ElementAccess { target, arguments } | Node::Invocation { target, arguments } => {
                *target = swap(*target);
                *arguments = swap_list(arguments);
            }
            Node::ConditionalAccess {
                target, binding, ..
            } => {
                *target = swap(*target);
                *binding = swap(*binding);
            }
            Node::ElementBinding { arguments } => *arguments = swap_list(arguments),
            Node::Binary { left, right, .. } => {
                *left = swap(*left);
                *right = swap(*right);
            }
            Node::Prefix { operand, .. } => *operand = swap(*operand),
            Node::Parenthesized { expression, .. } => *expression = swap(*expression),
            Node::ExpressionStatement { expression, .. } => *expression = swap(*expression),
            Node::Block { statements, .. } | Node::SourceFile { statements, .. } => {
                for statement in statements.iter_mut() {
                    *statement = swap(*statement);
                }
            }
            Node::If {
                condition,
                then_branch,
                else_clause,
                ..
            } => {
                *condition = swap(*condition);
                *then_branch = swap(*then_branch);
                if let Some(clause) = else_clause {
                    clause.statement = swap(clause.statement);
                }
            }
            Node::Return { expression, .. } => {
                if let Some(expression) = expression {
                    *expression = swap(*expression);
                }
            }
            Node::LocalDeclaration { initializer, .. } => {
                if let Some(init) = initializer {
                    init.value = swap(init.value);
                }
            }
        }
        node
    }
}
