//! Comment attachment for JavaScript trees.
//!
//! A documentation block belongs to the outermost node that "owns" a
//! declaration: `export function f() {}` is documented before `export`,
//! `const f = () => {}` before `const`. [`JsNodeReducer`] computes that node;
//! [`JsCommentResolver`] then scans backwards from it, stepping over
//! decorators and line comments, to the nearest block comment.

use jsdoc_lint_core::{CommentKind, NodeId, Settings, SyntaxTree, Token, TokenOrComment};

use crate::jsdoc::{is_jsdoc_body, CommentBlock};
use crate::services::{CommentResolver, DecoratorLookup, NodeReducer};

/// Nodes a function or class expression may climb to and stop at.
const ALLOWABLE_COMMENT_NODES: &[&str] = &[
    "assignment_pattern",
    "lexical_declaration",
    "variable_declaration",
    "expression_statement",
    "method_definition",
    "pair",
    "field_definition",
    "export_statement",
    "return_statement",
];

/// Declarations documented before their `export` keyword when exported.
const EXPORTABLE_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "class_declaration",
    "lexical_declaration",
    "variable_declaration",
];

const EXPRESSION_KINDS: &[&str] = &[
    "function_expression",
    "function",
    "generator_function",
    "arrow_function",
    "class",
];

/// Returns true for kinds that introduce a function body.
#[must_use]
pub fn is_function_kind(kind: &str) -> bool {
    matches!(
        kind,
        "function_declaration"
            | "generator_function_declaration"
            | "function_expression"
            | "function"
            | "generator_function"
            | "arrow_function"
    )
}

/// Returns `node`'s parent, looking through parentheses.
#[must_use]
pub fn unparenthesized_parent(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.ancestors(node)
        .find(|p| tree.kind(*p) != "parenthesized_expression")
}

fn has_comment_directly_before(tree: &SyntaxTree, node: NodeId) -> bool {
    matches!(
        tree.token_or_comment_before(tree.span(node).start.offset),
        Some(TokenOrComment::Comment(_))
    )
}

fn is_invocation(tree: &SyntaxTree, parent: NodeId) -> bool {
    match tree.kind(parent) {
        "call_expression" | "new_expression" => true,
        "arguments" => tree.parent(parent).is_some_and(|call| {
            matches!(tree.kind(call), "call_expression" | "new_expression")
        }),
        _ => false,
    }
}

fn export_wrapper(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    tree.parent(node)
        .filter(|p| tree.kind(*p) == "export_statement")
}

/// Reduces declarations to their attachment node.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsNodeReducer;

impl JsNodeReducer {
    fn reduce_expression(tree: &SyntaxTree, node: NodeId) -> NodeId {
        let Some(parent) = unparenthesized_parent(tree, node) else {
            return node;
        };
        if is_invocation(tree, parent) {
            return node;
        }

        let mut current = Some(parent);
        while let Some(candidate) = current {
            let kind = tree.kind(candidate);
            if has_comment_directly_before(tree, candidate)
                || is_function_kind(kind)
                || ALLOWABLE_COMMENT_NODES.contains(&kind)
            {
                break;
            }
            current = tree.parent(candidate);
        }

        match current {
            Some(found) if !matches!(tree.kind(found), "function_declaration" | "program") => {
                export_wrapper(tree, found).unwrap_or(found)
            }
            _ => node,
        }
    }
}

impl NodeReducer for JsNodeReducer {
    fn reduce(&self, tree: &SyntaxTree, node: NodeId) -> NodeId {
        let kind = tree.kind(node);
        if tree.node(node).named && EXPRESSION_KINDS.contains(&kind) {
            Self::reduce_expression(tree, node)
        } else if EXPORTABLE_KINDS.contains(&kind) {
            export_wrapper(tree, node).unwrap_or(node)
        } else {
            node
        }
    }
}

/// Finds decorators preceding a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsDecoratorLookup;

impl DecoratorLookup for JsDecoratorLookup {
    fn decorator_before(&self, tree: &SyntaxTree, token: &Token) -> Option<NodeId> {
        let previous = tree.token_before(token.span.start.offset)?;
        tree.decorator_covering(previous.span)
    }
}

/// Resolves `/** ... */` blocks attached to declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsCommentResolver;

impl CommentResolver for JsCommentResolver {
    fn resolve_attached(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        settings: &Settings,
    ) -> Option<CommentBlock> {
        let reduced = JsNodeReducer.reduce(tree, node);
        let mut start = tree.span(reduced).start;

        let block = loop {
            match tree.token_or_comment_before(start.offset)? {
                TokenOrComment::Token(token) => {
                    let decorator = tree.decorator_covering(token.span)?;
                    start = tree.span(decorator).start;
                }
                TokenOrComment::Comment(comment) if comment.kind == CommentKind::Line => {
                    start = comment.span.start;
                }
                TokenOrComment::Comment(comment) => break comment,
            }
        };

        if !is_jsdoc_body(block.body()) {
            return None;
        }
        let gap = start.line.checked_sub(block.span.end.line)?;
        if gap < settings.min_lines || gap > settings.max_lines {
            tracing::trace!(gap, "block comment too far from declaration");
            return None;
        }

        Some(CommentBlock::from_comment(block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JavaScriptParser;

    fn parse(src: &str) -> SyntaxTree {
        JavaScriptParser::new().parse_source(src).unwrap()
    }

    fn first(tree: &SyntaxTree, kind: &str) -> NodeId {
        tree.preorder()
            .find(|id| tree.kind(*id) == kind)
            .unwrap_or_else(|| panic!("no {kind} node"))
    }

    fn attached(src: &str, kind: &str) -> Option<CommentBlock> {
        let tree = parse(src);
        let node = first(&tree, kind);
        JsCommentResolver.resolve_attached(&tree, node, &Settings::default())
    }

    #[test]
    fn export_wrapper_is_the_attachment_node() {
        let tree = parse("export function f() {}\n");
        let func = first(&tree, "function_declaration");
        let reduced = JsNodeReducer.reduce(&tree, func);
        assert_eq!(tree.kind(reduced), "export_statement");
    }

    #[test]
    fn arrow_in_const_reduces_to_declaration() {
        let tree = parse("const f = () => {};\n");
        let arrow = first(&tree, "arrow_function");
        assert_eq!(tree.kind(JsNodeReducer.reduce(&tree, arrow)), "lexical_declaration");

        let tree = parse("export const f = () => {};\n");
        let arrow = first(&tree, "arrow_function");
        assert_eq!(tree.kind(JsNodeReducer.reduce(&tree, arrow)), "export_statement");
    }

    #[test]
    fn keyword_leaf_is_not_reduced() {
        let tree = parse("const d = class {};
");
        let keyword = tree
            .preorder()
            .find(|id| tree.kind(*id) == "class" && !tree.node(*id).named)
            .unwrap();
        assert_eq!(JsNodeReducer.reduce(&tree, keyword), keyword);
    }

    #[test]
    fn anonymous_default_export_reduces_to_export() {
        let tree = parse("export default function () {}
");
        let func = first(&tree, "function_expression");
        assert_eq!(tree.kind(JsNodeReducer.reduce(&tree, func)), "export_statement");
    }

    #[test]
    fn iife_stays_put() {
        let tree = parse("(function () {})();\n");
        let func = first(&tree, "function_expression");
        assert_eq!(JsNodeReducer.reduce(&tree, func), func);
    }

    #[test]
    fn callback_stays_put() {
        let tree = parse("list.map(function (x) { return x; });\n");
        let func = first(&tree, "function_expression");
        assert_eq!(JsNodeReducer.reduce(&tree, func), func);
    }

    #[test]
    fn object_property_reduces_to_pair() {
        let tree = parse("const o = {\n  a: function () {},\n};\n");
        let func = first(&tree, "function_expression");
        assert_eq!(tree.kind(JsNodeReducer.reduce(&tree, func)), "pair");
    }

    #[test]
    fn finds_adjacent_block() {
        let block = attached("/** Adds. */\nfunction add() {}\n", "function_declaration").unwrap();
        assert_eq!(block.block.description, "Adds.");
    }

    #[test]
    fn plain_block_comment_is_not_documentation() {
        assert!(attached("/* Adds. */\nfunction add() {}\n", "function_declaration").is_none());
    }

    #[test]
    fn blank_line_detaches_the_block() {
        assert!(attached("/** Adds. */\n\nfunction add() {}\n", "function_declaration").is_none());
    }

    #[test]
    fn wider_max_lines_reattaches() {
        let tree = parse("/** Adds. */\n\nfunction add() {}\n");
        let func = first(&tree, "function_declaration");
        let settings = Settings {
            min_lines: 0,
            max_lines: 2,
        };
        assert!(JsCommentResolver
            .resolve_attached(&tree, func, &settings)
            .is_some());
    }

    #[test]
    fn line_comments_are_skipped() {
        let block = attached(
            "/** Adds. */\n// eslint-disable-next-line\nfunction add() {}\n",
            "function_declaration",
        );
        assert!(block.is_some());
    }

    #[test]
    fn decorators_are_skipped() {
        let block = attached("/** Widget. */\n@deco1\n@deco2()\nclass C {}\n", "class_declaration");
        assert!(block.is_some());
    }

    #[test]
    fn code_in_between_blocks_attachment() {
        assert!(attached("/** Adds. */\nlet x;\nfunction add() {}\n", "function_declaration").is_none());
    }

    #[test]
    fn block_before_export_attaches_to_inner_declaration() {
        assert!(attached("/** Adds. */\nexport function add() {}\n", "function_declaration").is_some());
    }

    #[test]
    fn decorator_before_finds_previous_decorator() {
        let tree = parse("@a\n@b\nclass C {}\n");
        let class = first(&tree, "class_declaration");
        let token = tree.first_token(class).unwrap();
        let b = JsDecoratorLookup.decorator_before(&tree, token).unwrap();
        assert_eq!(tree.text(b), "@b");
        let b_token = tree.first_token(b).unwrap();
        let a = JsDecoratorLookup.decorator_before(&tree, b_token).unwrap();
        assert_eq!(tree.text(a), "@a");
        let a_token = tree.first_token(a).unwrap();
        assert!(JsDecoratorLookup.decorator_before(&tree, a_token).is_none());
    }
}
