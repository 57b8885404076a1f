//! Minimal JSDoc block parsing.
//!
//! Only the shape needed to tell a documentation block apart from a plain
//! comment is recovered: the free-text description and the list of tags.

use jsdoc_lint_core::{Comment, Span};
use serde::Serialize;

/// One `@tag` line (plus continuation lines) of a JSDoc block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsdocTag {
    /// Tag name without the `@` (e.g. `param`).
    pub tag: String,
    /// Everything after the tag name, continuation lines joined by `\n`.
    pub description: String,
}

/// Parsed body of a `/** ... */` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JsdocBlock {
    /// Free text before the first tag.
    pub description: String,
    /// Tags in source order.
    pub tags: Vec<JsdocTag>,
}

/// A documentation block attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    /// Range of the comment, delimiters included.
    pub span: Span,
    /// Raw comment text.
    pub raw_text: String,
    /// Parsed content.
    pub block: JsdocBlock,
}

impl CommentBlock {
    /// Builds a block from a raw comment.
    #[must_use]
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            span: comment.span,
            raw_text: comment.text.clone(),
            block: parse(&comment.text),
        }
    }
}

/// Returns true if the comment body opens a JSDoc block: `*` then whitespace.
#[must_use]
pub fn is_jsdoc_body(body: &str) -> bool {
    body.strip_prefix('*')
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

/// Parses the raw text of a block comment.
#[must_use]
pub fn parse(raw: &str) -> JsdocBlock {
    let inner = raw.strip_prefix("/**").unwrap_or(raw);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    let mut block = JsdocBlock::default();
    let mut description: Vec<&str> = Vec::new();

    for line in inner.lines() {
        let line = clean_line(line);
        if let Some(rest) = line.strip_prefix('@') {
            let (tag, text) = rest
                .split_once(char::is_whitespace)
                .unwrap_or((rest, ""));
            block.tags.push(JsdocTag {
                tag: tag.to_string(),
                description: text.trim().to_string(),
            });
        } else if let Some(last) = block.tags.last_mut() {
            if !line.is_empty() {
                if !last.description.is_empty() {
                    last.description.push('\n');
                }
                last.description.push_str(line);
            }
        } else {
            description.push(line);
        }
    }

    block.description = description.join("\n").trim().to_string();
    block
}

fn clean_line(line: &str) -> &str {
    let line = line.trim();
    let line = line.strip_prefix('*').unwrap_or(line);
    line.trim()
}
