//! Export visibility for JavaScript declarations.

use jsdoc_lint_core::{NodeId, SyntaxTree};

use crate::services::{ExportIndex, ExportOptions, ExportResolver};

/// Resolves ESM, CommonJS and `window` exports.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsExportResolver;

impl ExportResolver for JsExportResolver {
    fn index(&self, tree: &SyntaxTree, options: &ExportOptions) -> ExportIndex {
        if options.ancestors_only {
            return ExportIndex::default();
        }
        let mut names = Vec::new();
        for id in tree.preorder() {
            exported_names(tree, id, options, &mut names);
        }
        ExportIndex::new(names)
    }

    fn is_exported_in(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        options: &ExportOptions,
        index: &ExportIndex,
    ) -> bool {
        if exported_by_ancestor(tree, node, options) {
            return true;
        }
        if options.ancestors_only || index.is_empty() {
            return false;
        }
        declared_names(tree, node)
            .into_iter()
            .any(|name| index.contains(name))
    }
}

/// `node` and its ancestors up to the enclosing function body.
fn scope_chain(tree: &SyntaxTree, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::once(node)
        .chain(tree.ancestors(node))
        .take_while(|id| tree.kind(*id) != "statement_block")
}

fn is_module_exports_target(text: &str) -> bool {
    text == "module.exports"
        || text.starts_with("module.exports.")
        || text.starts_with("module.exports[")
        || text.starts_with("exports.")
        || text.starts_with("exports[")
}

fn is_window_target(text: &str) -> bool {
    text.starts_with("window.") || text.starts_with("window[")
}

fn assignment_target_exports(tree: &SyntaxTree, assignment: NodeId, options: &ExportOptions) -> bool {
    let Some(left) = tree.child_by_field(assignment, "left") else {
        return false;
    };
    let text = tree.text(left).trim();
    (options.init_module_exports && is_module_exports_target(text))
        || (options.init_window && is_window_target(text))
}

fn exported_by_ancestor(tree: &SyntaxTree, node: NodeId, options: &ExportOptions) -> bool {
    scope_chain(tree, node).any(|id| match tree.kind(id) {
        "export_statement" => options.esm,
        "assignment_expression" => assignment_target_exports(tree, id, options),
        _ => false,
    })
}

fn identifier_field<'t>(tree: &'t SyntaxTree, node: NodeId, field: &str) -> Option<&'t str> {
    tree.child_by_field(node, field)
        .filter(|c| tree.kind(*c) == "identifier")
        .map(|c| tree.text(c))
}

/// Local names under which `node` (or its enclosing declaration) is bound.
fn declared_names(tree: &SyntaxTree, node: NodeId) -> Vec<&str> {
    let mut names = Vec::new();
    for id in scope_chain(tree, node) {
        match tree.kind(id) {
            "function_declaration"
            | "generator_function_declaration"
            | "class_declaration"
            | "class"
            | "function_expression"
            | "generator_function"
            | "variable_declarator" => names.extend(identifier_field(tree, id, "name")),
            "assignment_expression" => names.extend(identifier_field(tree, id, "left")),
            "lexical_declaration" | "variable_declaration" => names.extend(
                tree.children(id)
                    .iter()
                    .filter(|c| tree.kind(**c) == "variable_declarator")
                    .filter_map(|c| identifier_field(tree, *c, "name")),
            ),
            _ => {}
        }
    }
    names
}

fn is_reexport(tree: &SyntaxTree, specifier: NodeId) -> bool {
    tree.ancestors(specifier)
        .find(|a| tree.kind(*a) == "export_statement")
        .is_some_and(|stmt| tree.child_by_field(stmt, "source").is_some())
}

fn object_members<'t>(tree: &'t SyntaxTree, object: NodeId, out: &mut Vec<&'t str>) {
    for member in tree.named_children(object) {
        match tree.kind(member) {
            "shorthand_property_identifier" => out.push(tree.text(member)),
            "pair" => out.extend(identifier_field(tree, member, "value")),
            _ => {}
        }
    }
}

/// Pushes the local names `id` exports by reference.
fn exported_names<'t>(
    tree: &'t SyntaxTree,
    id: NodeId,
    options: &ExportOptions,
    out: &mut Vec<&'t str>,
) {
    match tree.kind(id) {
        "export_specifier" if options.esm && !is_reexport(tree, id) => {
            out.extend(identifier_field(tree, id, "name"));
        }
        "export_statement" if options.esm => out.extend(identifier_field(tree, id, "value")),
        "assignment_expression" if assignment_target_exports(tree, id, options) => {
            let Some(right) = tree.child_by_field(id, "right") else {
                return;
            };
            match tree.kind(right) {
                "identifier" => out.push(tree.text(right)),
                "object" => object_members(tree, right, out),
                _ => {}
            }
        }
        _ => {}
    }
}
