//! Synthesis of the JSDoc skeleton inserted by `--fix`.

use jsdoc_lint_core::{NodeId, Position, Settings, SyntaxTree};
use jsdoc_lint_js::LanguageServices;

use super::locate::{leading_node, reduce_to_attachment_node};

/// A pure text insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Where the text goes; existing text at this position moves right.
    pub position: Position,
    /// Inserted text.
    pub text: String,
}

/// Line breaks between the inserted block and the declaration.
#[must_use]
pub fn newline_count(settings: &Settings) -> usize {
    if settings.min_lines == 0 && settings.max_lines >= 1 {
        1
    } else {
        settings.min_lines
    }
}

/// Leading whitespace of the line before `position`, plus one space.
fn indent_at(lines: &[&str], position: Position) -> Option<String> {
    let line = lines.get(position.line.checked_sub(1)?).copied()?;
    let prefix = line.get(..position.column)?;
    let mut indent: String = prefix
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    indent.push(' ');
    Some(indent)
}

/// Skeleton text for a block placed at indentation `indent`.
#[must_use]
pub fn skeleton(indent: &str, inline: bool, newlines: usize) -> String {
    let mut text = if inline {
        String::from("/** ")
    } else {
        format!("/**\n{indent}*\n{indent}")
    };
    text.push_str("*/");
    text.push_str(&"\n".repeat(newlines));
    // The indent carries one extra space for the ` *` gutter.
    text.push_str(&indent[..indent.len().saturating_sub(1)]);
    text
}

/// Builds the insertion documenting `node`.
///
/// `lines` are the source lines of `tree`. Returns `None` when no insertion
/// point can be found.
#[must_use]
pub fn synthesize(
    services: &LanguageServices,
    tree: &SyntaxTree,
    lines: &[&str],
    node: NodeId,
    settings: &Settings,
    inline: bool,
) -> Option<Insertion> {
    let base = reduce_to_attachment_node(services, tree, node);
    let leading = leading_node(services, tree, base)?;
    let position = tree.first_token(leading)?.span.start;
    let indent = indent_at(lines, position)?;

    Some(Insertion {
        position,
        text: skeleton(&indent, inline, newline_count(settings)),
    })
}
