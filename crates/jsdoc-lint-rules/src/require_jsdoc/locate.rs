//! Documentation lookup through the language services.

use jsdoc_lint_core::{NodeId, Settings, SyntaxTree};
use jsdoc_lint_js::{CommentBlock, LanguageServices};

/// Block attached to `node`, if any.
#[must_use]
pub fn find_attached(
    services: &LanguageServices,
    tree: &SyntaxTree,
    node: NodeId,
    settings: &Settings,
) -> Option<CommentBlock> {
    services.comments.resolve_attached(tree, node, settings)
}

/// Node before which documentation for `node` is written.
#[must_use]
pub fn reduce_to_attachment_node(
    services: &LanguageServices,
    tree: &SyntaxTree,
    node: NodeId,
) -> NodeId {
    services.reducer.reduce(tree, node)
}

/// First decorator of the chain directly preceding `node`, or `node` itself.
///
/// Returns `None` when `node` has no tokens to anchor on.
#[must_use]
pub fn leading_node(services: &LanguageServices, tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    let mut leading = node;
    let mut token = tree.first_token(node)?;
    while let Some(decorator) = services.decorators.decorator_before(tree, token) {
        leading = decorator;
        token = tree.first_token(decorator)?;
    }
    Some(leading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsdoc_lint_js::JavaScriptParser;

    fn first(tree: &SyntaxTree, kind: &str) -> NodeId {
        tree.preorder()
            .find(|id| tree.kind(*id) == kind)
            .unwrap()
    }

    #[test]
    fn attached_block_is_found_whatever_its_content() {
        let services = LanguageServices::javascript();
        let tree = JavaScriptParser::new()
            .parse_source("/** x */\nfunction f() {}\n")
            .unwrap();
        let func = first(&tree, "function_declaration");
        let block = find_attached(&services, &tree, func, &Settings::default()).unwrap();
        assert!(block.block.tags.is_empty());
        assert_eq!(block.raw_text, "/** x */");
    }

    #[test]
    fn leading_node_walks_the_decorator_chain() {
        let services = LanguageServices::javascript();
        let tree = JavaScriptParser::new()
            .parse_source("@deco1\n@deco2\nclass C {}\n")
            .unwrap();
        let class = first(&tree, "class_declaration");
        let base = reduce_to_attachment_node(&services, &tree, class);
        let leading = leading_node(&services, &tree, base).unwrap();
        assert_eq!(tree.text(leading), "@deco1");
    }
}
