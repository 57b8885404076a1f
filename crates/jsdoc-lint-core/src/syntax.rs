//! Arena-backed syntax tree shared by parsers and rules.
//!
//! Parsers lower their native trees into a [`SyntaxTree`]: a flat arena of
//! [`Node`]s addressed by [`NodeId`], with an explicit parent index built once
//! while lowering. Alongside the nodes the tree keeps the leaf token stream,
//! the comment list, and every decorator node, so rules can reason about
//! source positions without going back to the parser.

use serde::{Deserialize, Serialize};

/// A position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column as a byte offset within the line (0-indexed).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// A half-open range of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start of the range.
    pub start: Position,
    /// End of the range (exclusive).
    pub end: Position,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns true if `other` lies entirely inside this span.
    #[must_use]
    pub fn contains(&self, other: &Span) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Returns true if the span covers no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Index of a node in a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A syntax node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Grammar kind (e.g. `function_declaration`).
    pub kind: &'static str,
    /// Field name under which this node hangs off its parent, if any.
    pub field: Option<&'static str>,
    /// Whether the grammar treats this node as named (as opposed to punctuation).
    pub named: bool,
    /// Source range.
    pub span: Span,
    children: Vec<NodeId>,
}

/// A leaf token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Grammar kind of the leaf (e.g. `identifier`, `(`).
    pub kind: &'static str,
    /// Source range.
    pub span: Span,
}

/// Comment flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
}

/// A source comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Line or block comment.
    pub kind: CommentKind,
    /// Source range, delimiters included.
    pub span: Span,
    /// Raw text, delimiters included.
    pub text: String,
}

impl Comment {
    /// Text between the comment delimiters.
    #[must_use]
    pub fn body(&self) -> &str {
        match self.kind {
            CommentKind::Line => self.text.strip_prefix("//").unwrap_or(&self.text),
            CommentKind::Block => {
                let inner = self.text.strip_prefix("/*").unwrap_or(&self.text);
                inner.strip_suffix("*/").unwrap_or(inner)
            }
        }
    }
}

/// Either a token or a comment, as returned by backward token scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrComment<'a> {
    /// A code token.
    Token(&'a Token),
    /// A comment.
    Comment(&'a Comment),
}

impl TokenOrComment<'_> {
    /// Source range of the token or comment.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Token(t) => t.span,
            Self::Comment(c) => c.span,
        }
    }
}

/// A lowered, immutable syntax tree for one source file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    language: &'static str,
    source: String,
    nodes: Vec<Node>,
    parents: Vec<Option<NodeId>>,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    decorators: Vec<NodeId>,
}

impl SyntaxTree {
    /// Dialect identifier of the parser that produced this tree (e.g. `"javascript"`).
    #[must_use]
    pub fn language(&self) -> &'static str {
        self.language
    }

    /// Full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root node. Trees always have at least one node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Grammar kind of `id`.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &'static str {
        self.nodes[id.0].kind
    }

    /// Source range of `id`.
    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.0].span
    }

    /// Parent of `id`, or `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.0]
    }

    /// All children of `id` in source order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Named children of `id` in source order.
    pub fn named_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.nodes[c.0].named)
    }

    /// First child of `id` stored under `field`.
    #[must_use]
    pub fn child_by_field(&self, id: NodeId, field: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|c| self.nodes[c.0].field == Some(field))
    }

    /// First child of `id` with grammar kind `kind`.
    #[must_use]
    pub fn child_of_kind(&self, id: NodeId, kind: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|c| self.nodes[c.0].kind == kind)
    }

    /// Iterates the strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |p| self.parent(*p))
    }

    /// Iterates `id` and all its descendants in pre-order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// Iterates every node in the tree in pre-order.
    pub fn preorder(&self) -> Descendants<'_> {
        self.descendants(self.root())
    }

    /// Source text covered by `id`.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        self.span_text(self.span(id))
    }

    /// Source text covered by `span`.
    #[must_use]
    pub fn span_text(&self, span: Span) -> &str {
        self.source
            .get(span.start.offset..span.end.offset)
            .unwrap_or("")
    }

    /// Source split into lines (without terminators).
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        self.source.lines().collect()
    }

    /// All leaf tokens in source order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// All comments in source order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// All decorator nodes in source order.
    #[must_use]
    pub fn decorators(&self) -> &[NodeId] {
        &self.decorators
    }

    /// First token starting at or after `offset`.
    #[must_use]
    pub fn token_at_or_after(&self, offset: usize) -> Option<&Token> {
        let idx = self
            .tokens
            .partition_point(|t| t.span.start.offset < offset);
        self.tokens.get(idx)
    }

    /// First token of `id`.
    #[must_use]
    pub fn first_token(&self, id: NodeId) -> Option<&Token> {
        let span = self.span(id);
        self.token_at_or_after(span.start.offset)
            .filter(|t| t.span.start.offset < span.end.offset)
    }

    /// Last code token ending at or before `offset`.
    #[must_use]
    pub fn token_before(&self, offset: usize) -> Option<&Token> {
        let idx = self.tokens.partition_point(|t| t.span.end.offset <= offset);
        idx.checked_sub(1).map(|i| &self.tokens[i])
    }

    /// Last comment ending at or before `offset`.
    #[must_use]
    pub fn comment_before(&self, offset: usize) -> Option<&Comment> {
        let idx = self
            .comments
            .partition_point(|c| c.span.end.offset <= offset);
        idx.checked_sub(1).map(|i| &self.comments[i])
    }

    /// Nearest token or comment ending at or before `offset`.
    #[must_use]
    pub fn token_or_comment_before(&self, offset: usize) -> Option<TokenOrComment<'_>> {
        match (self.token_before(offset), self.comment_before(offset)) {
            (Some(t), Some(c)) if c.span.end.offset > t.span.end.offset => {
                Some(TokenOrComment::Comment(c))
            }
            (Some(t), _) => Some(TokenOrComment::Token(t)),
            (None, Some(c)) => Some(TokenOrComment::Comment(c)),
            (None, None) => None,
        }
    }

    /// Decorator node whose range covers `span`, if any.
    #[must_use]
    pub fn decorator_covering(&self, span: Span) -> Option<NodeId> {
        self.decorators
            .iter()
            .copied()
            .find(|d| self.span(*d).contains(&span))
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Incremental constructor used by parsers while lowering their native trees.
///
/// Nodes must be pushed parent-first; the first node pushed becomes the root.
#[derive(Debug)]
pub struct SyntaxTreeBuilder {
    tree: SyntaxTree,
}

impl SyntaxTreeBuilder {
    /// Starts a tree for `source` produced by the `language` dialect.
    #[must_use]
    pub fn new(language: &'static str, source: impl Into<String>) -> Self {
        Self {
            tree: SyntaxTree {
                language,
                source: source.into(),
                nodes: Vec::new(),
                parents: Vec::new(),
                tokens: Vec::new(),
                comments: Vec::new(),
                decorators: Vec::new(),
            },
        }
    }

    /// Appends a node under `parent` and returns its id.
    pub fn push_node(
        &mut self,
        parent: Option<NodeId>,
        kind: &'static str,
        field: Option<&'static str>,
        named: bool,
        span: Span,
    ) -> NodeId {
        let id = NodeId(self.tree.nodes.len());
        self.tree.nodes.push(Node {
            kind,
            field,
            named,
            span,
            children: Vec::new(),
        });
        self.tree.parents.push(parent);
        if let Some(p) = parent {
            self.tree.nodes[p.0].children.push(id);
        }
        if kind == "decorator" {
            self.tree.decorators.push(id);
        }
        id
    }

    /// Overrides the span of an already-pushed node.
    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.tree.nodes[id.0].span = span;
    }

    /// Returns the span recorded for `id`.
    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.tree.nodes[id.0].span
    }

    /// Appends a leaf token. Tokens must arrive in source order.
    pub fn push_token(&mut self, kind: &'static str, span: Span) {
        self.tree.tokens.push(Token { kind, span });
    }

    /// Appends a comment. Comments must arrive in source order.
    pub fn push_comment(&mut self, kind: CommentKind, span: Span, text: impl Into<String>) {
        self.tree.comments.push(Comment {
            kind,
            span,
            text: text.into(),
        });
    }

    /// Finishes the tree.
    #[must_use]
    pub fn finish(self) -> SyntaxTree {
        self.tree
    }
}
