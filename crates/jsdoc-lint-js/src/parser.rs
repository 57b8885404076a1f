//! JavaScript front-end: tree-sitter parsing lowered into a [`SyntaxTree`].

use std::collections::HashSet;

use jsdoc_lint_core::{
    CommentKind, NodeId, ParseError, Position, SourceParser, Span, SyntaxTree, SyntaxTreeBuilder,
};
use tree_sitter::{Language, Node, Parser, Point};

/// Dialect identifier carried by trees this parser produces.
pub const LANGUAGE_ID: &str = "javascript";

/// Node kinds whose leading decorators are split off their span.
const DECORATED_KINDS: &[&str] = &[
    "class_declaration",
    "class",
    "method_definition",
    "field_definition",
    "export_statement",
];

/// Parses JavaScript (including JSX and decorators) with tree-sitter.
pub struct JavaScriptParser {
    language: Language,
}

impl JavaScriptParser {
    /// Creates a new JavaScript parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
        }
    }

    /// Parses `source` into a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or tree-sitter gives up.
    pub fn parse_source(&self, source: &str) -> Result<SyntaxTree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language {
                language: LANGUAGE_ID,
                message: e.to_string(),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or(ParseError::NoTree {
                language: LANGUAGE_ID,
            })?;

        if tree.root_node().has_error() {
            tracing::debug!("tree-sitter recovered from syntax errors");
        }

        Ok(lower(&tree, source))
    }
}

impl Default for JavaScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for JavaScriptParser {
    fn language_id(&self) -> &'static str {
        LANGUAGE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".js", ".jsx", ".mjs", ".cjs"]
    }

    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
        self.parse_source(source)
    }
}

fn position(point: Point, offset: usize) -> Position {
    Position::new(point.row + 1, point.column, offset)
}

fn span_of(node: &Node<'_>) -> Span {
    Span::new(
        position(node.start_position(), node.start_byte()),
        position(node.end_position(), node.end_byte()),
    )
}

/// Walks the tree-sitter tree once, depth first, copying nodes into the arena.
fn lower(tree: &tree_sitter::Tree, source: &str) -> SyntaxTree {
    let mut builder = SyntaxTreeBuilder::new(LANGUAGE_ID, source);
    let mut cursor = tree.walk();

    let root = cursor.node();
    let root_id = builder.push_node(None, root.kind(), None, true, span_of(&root));

    // Ancestors of the node under the cursor.
    let mut stack: Vec<(NodeId, &'static str)> = vec![(root_id, root.kind())];
    // Decorated nodes still waiting for their first non-decorator child.
    let mut pending: HashSet<NodeId> = HashSet::new();

    if !cursor.goto_first_child() {
        return builder.finish();
    }

    'walk: loop {
        let node = cursor.node();
        let span = span_of(&node);
        let Some(&(parent, parent_kind)) = stack.last() else {
            break;
        };

        if node.kind() == "comment" {
            let text = node.utf8_text(source.as_bytes()).unwrap_or("");
            let kind = if text.starts_with("//") {
                CommentKind::Line
            } else {
                CommentKind::Block
            };
            builder.push_comment(kind, span, text);
        } else {
            let id = builder.push_node(
                Some(parent),
                node.kind(),
                cursor.field_name(),
                node.is_named(),
                span,
            );

            if node.kind() == "decorator" {
                // Only a leading decorator marks its owner.
                if DECORATED_KINDS.contains(&parent_kind)
                    && builder.span(parent).start.offset == span.start.offset
                {
                    pending.insert(parent);
                }
            } else if pending.remove(&parent) {
                let mut parent_span = builder.span(parent);
                parent_span.start = span.start;
                builder.set_span(parent, parent_span);
            }

            if node.child_count() == 0 {
                if !node.is_missing() && !span.is_empty() {
                    builder.push_token(node.kind(), span);
                }
            } else if cursor.goto_first_child() {
                stack.push((id, node.kind()));
                continue 'walk;
            }
        }

        loop {
            if cursor.goto_next_sibling() {
                continue 'walk;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
            stack.pop();
            if stack.is_empty() {
                break 'walk;
            }
        }
    }

    builder.finish()
}
