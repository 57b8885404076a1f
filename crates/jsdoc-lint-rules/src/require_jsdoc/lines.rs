//! Effective line counting for the `min_line_count` exemption.

use jsdoc_lint_core::{Comment, NodeId, SyntaxTree};

use super::classify::is_immediately_invoked;

/// Which lines [`count_effective_lines`] ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCountOptions {
    /// Skip lines holding nothing but a comment.
    pub skip_comments: bool,
    /// Skip lines holding nothing but whitespace.
    pub skip_blank_lines: bool,
}

impl Default for LineCountOptions {
    fn default() -> Self {
        Self {
            skip_comments: true,
            skip_blank_lines: true,
        }
    }
}

/// Returns true if `comment` covers `line` (1-based `line_number`) on its own.
///
/// The comment must start on an earlier line or be the first thing on this
/// one, and end on a later line or be the last thing on this one.
#[must_use]
pub fn is_full_line_comment(line: &str, line_number: usize, comment: &Comment) -> bool {
    let start = comment.span.start;
    let end = comment.span.end;

    let first_on_line = start.line == line_number
        && line
            .get(..start.column)
            .is_some_and(|before| before.trim().is_empty());
    let last_on_line = end.line == line_number
        && line
            .get(end.column..)
            .is_some_and(|after| after.trim().is_empty());

    (start.line < line_number || first_on_line) && (end.line > line_number || last_on_line)
}

/// Counts the lines `node` spans, minus comment-only and blank lines.
///
/// `lines` is the whole file split into lines. Returns `None` for an
/// immediately-invoked function, which the `min_line_count` exemption never
/// applies to.
#[must_use]
pub fn count_effective_lines(
    tree: &SyntaxTree,
    node: NodeId,
    lines: &[&str],
    options: LineCountOptions,
) -> Option<usize> {
    if is_immediately_invoked(tree, node) {
        return None;
    }

    let span = tree.span(node);
    let comments: Vec<&Comment> = tree
        .comments()
        .iter()
        .filter(|c| c.span.end.line >= span.start.line && c.span.start.line <= span.end.line)
        .collect();

    let count = (span.start.line..=span.end.line)
        .filter(|&number| {
            let text = lines.get(number - 1).copied().unwrap_or("");
            if options.skip_comments
                && comments.iter().any(|c| {
                    (c.span.start.line..=c.span.end.line).contains(&number)
                        && is_full_line_comment(text, number, c)
                })
            {
                return false;
            }
            !(options.skip_blank_lines && text.trim().is_empty())
        })
        .count();

    Some(count)
}
