//! Declaration classification.
//!
//! Maps grammar nodes onto the closed [`DeclarationKind`] set and gathers the
//! per-node [`Facts`] the policy decides on.

use jsdoc_lint_core::{NodeId, SyntaxTree};
use jsdoc_lint_js::is_function_kind;

use super::lines::{count_effective_lines, LineCountOptions};

/// Declarations the rule knows how to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `function f() {}`
    FunctionDeclaration,
    /// `function () {}` in value position, or an object-literal method.
    FunctionExpression,
    /// `() => {}`
    ArrowFunctionExpression,
    /// `class C {}`
    ClassDeclaration,
    /// `class {}` as an expression.
    ClassExpression,
    /// A class method, getter, setter or constructor.
    MethodDefinition,
    /// A node enabled through the custom context at this index.
    Context(usize),
}

impl DeclarationKind {
    /// The six built-in kinds, in option order.
    pub const BUILTIN: [Self; 6] = [
        Self::ArrowFunctionExpression,
        Self::ClassDeclaration,
        Self::ClassExpression,
        Self::FunctionDeclaration,
        Self::FunctionExpression,
        Self::MethodDefinition,
    ];

    /// Option name of a built-in kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::FunctionDeclaration => "FunctionDeclaration",
            Self::FunctionExpression => "FunctionExpression",
            Self::ArrowFunctionExpression => "ArrowFunctionExpression",
            Self::ClassDeclaration => "ClassDeclaration",
            Self::ClassExpression => "ClassExpression",
            Self::MethodDefinition => "MethodDefinition",
            Self::Context(_) => "Context",
        }
    }

    /// Parses a built-in kind from its option name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::BUILTIN.into_iter().find(|k| k.name() == name)
    }

    /// Classifies `node` as a built-in declaration kind.
    ///
    /// Anonymous keyword leaves never classify. An unparenthesized
    /// `export default function () {}` or `export default class {}` is a
    /// declaration, not an expression.
    #[must_use]
    pub fn of(tree: &SyntaxTree, node: NodeId) -> Option<Self> {
        if !tree.node(node).named {
            return None;
        }
        match tree.kind(node) {
            "function_declaration" | "generator_function_declaration" => {
                Some(Self::FunctionDeclaration)
            }
            "function_expression" | "function" | "generator_function" => {
                if is_default_export_value(tree, node) {
                    Some(Self::FunctionDeclaration)
                } else {
                    Some(Self::FunctionExpression)
                }
            }
            "arrow_function" => Some(Self::ArrowFunctionExpression),
            "class_declaration" => Some(Self::ClassDeclaration),
            "class" => {
                if is_default_export_value(tree, node) {
                    Some(Self::ClassDeclaration)
                } else {
                    Some(Self::ClassExpression)
                }
            }
            "method_definition" => match tree.parent(node).map(|p| tree.kind(p)) {
                Some("object") => Some(Self::FunctionExpression),
                _ => Some(Self::MethodDefinition),
            },
            _ => None,
        }
    }

    /// Returns true for kinds that carry a function body.
    #[must_use]
    pub fn is_function(self) -> bool {
        matches!(
            self,
            Self::FunctionDeclaration
                | Self::FunctionExpression
                | Self::ArrowFunctionExpression
                | Self::MethodDefinition
        )
    }
}

/// Role of a declaration inside a class or object literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Not a method.
    Normal,
    /// `get x() {}`
    Getter,
    /// `set x(v) {}`
    Setter,
    /// `constructor() {}` in a class body.
    Constructor,
    /// Any other method.
    Method,
}

/// Everything the policy needs to know about one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facts {
    /// The declaration node.
    pub node: NodeId,
    /// Its kind.
    pub kind: DeclarationKind,
    /// Its role inside a class or object literal.
    pub method_kind: MethodKind,
    /// Whether the empty-function exemption can apply.
    pub is_function_context: bool,
    /// At least one declared parameter.
    pub has_parameters: bool,
    /// A `return` with a value, or an expression-bodied arrow.
    pub has_return_value: bool,
    /// A getter with a same-named setter, or vice versa.
    pub has_accessor_pair: bool,
    /// Effective line count; `None` for immediately-invoked functions.
    pub effective_lines: Option<usize>,
}

impl Facts {
    /// Gathers the facts for `node`. `lines` is the file split into lines.
    #[must_use]
    pub fn gather(tree: &SyntaxTree, node: NodeId, kind: DeclarationKind, lines: &[&str]) -> Self {
        let method_kind = method_kind(tree, node);
        let is_function = kind.is_function() || is_function_kind(tree.kind(node));
        Self {
            node,
            kind,
            method_kind,
            is_function_context: is_function && !matches!(kind, DeclarationKind::Context(_)),
            has_parameters: is_function && has_parameters(tree, node),
            has_return_value: is_function && has_return_value(tree, node),
            has_accessor_pair: matches!(method_kind, MethodKind::Getter | MethodKind::Setter)
                && has_accessor_pair(tree, node),
            effective_lines: count_effective_lines(tree, node, lines, LineCountOptions::default()),
        }
    }
}

/// Outermost node wrapping `node` in nothing but parentheses.
#[must_use]
pub fn value_slot(tree: &SyntaxTree, node: NodeId) -> NodeId {
    let mut slot = node;
    while let Some(p) = tree
        .parent(slot)
        .filter(|p| tree.kind(*p) == "parenthesized_expression")
    {
        slot = p;
    }
    slot
}

/// True iff `node` sits directly, without parentheses, after `export default`.
#[must_use]
pub fn is_default_export_value(tree: &SyntaxTree, node: NodeId) -> bool {
    tree.parent(node).is_some_and(|p| {
        tree.kind(p) == "export_statement" && tree.child_of_kind(p, "default").is_some()
    })
}

/// True iff `node` is a function expression called right where it is defined.
#[must_use]
pub fn is_immediately_invoked(tree: &SyntaxTree, node: NodeId) -> bool {
    if !tree.node(node).named || !matches!(
        tree.kind(node),
        "function_expression" | "function" | "generator_function" | "arrow_function"
    ) {
        return false;
    }
    let slot = value_slot(tree, node);
    let Some(call) = tree.parent(slot) else {
        return false;
    };
    let callee_field = match tree.kind(call) {
        "call_expression" => "function",
        "new_expression" => "constructor",
        _ => return false,
    };
    tree.child_by_field(call, callee_field) == Some(slot)
}

/// True iff `node` fills a method, getter or setter slot of a class or object.
///
/// The grammar folds the slot and its function into one `method_definition`
/// node, so the node is its own attachment point.
#[must_use]
pub fn is_embedded_value(tree: &SyntaxTree, node: NodeId) -> bool {
    tree.kind(node) == "method_definition"
        && tree
            .parent(node)
            .is_some_and(|p| matches!(tree.kind(p), "class_body" | "object"))
}

/// True iff `node` is a class constructor.
#[must_use]
pub fn is_constructor_like(tree: &SyntaxTree, node: NodeId) -> bool {
    method_kind(tree, node) == MethodKind::Constructor
}

fn accessor_keyword(tree: &SyntaxTree, node: NodeId) -> Option<&'static str> {
    tree.children(node)
        .iter()
        .map(|c| tree.node(*c))
        .find(|c| !c.named && matches!(c.kind, "get" | "set"))
        .map(|c| c.kind)
}

fn method_name(tree: &SyntaxTree, node: NodeId) -> Option<&str> {
    tree.child_by_field(node, "name").map(|n| tree.text(n))
}

/// Role of `node` inside a class body or object literal.
#[must_use]
pub fn method_kind(tree: &SyntaxTree, node: NodeId) -> MethodKind {
    if !is_embedded_value(tree, node) {
        return MethodKind::Normal;
    }
    match accessor_keyword(tree, node) {
        Some("get") => MethodKind::Getter,
        Some("set") => MethodKind::Setter,
        _ => {
            let in_class = tree
                .parent(node)
                .is_some_and(|p| tree.kind(p) == "class_body");
            if in_class && method_name(tree, node) == Some("constructor") {
                MethodKind::Constructor
            } else {
                MethodKind::Method
            }
        }
    }
}

fn has_parameters(tree: &SyntaxTree, node: NodeId) -> bool {
    if tree.child_by_field(node, "parameter").is_some() {
        return true;
    }
    tree.child_by_field(node, "parameters")
        .is_some_and(|params| tree.named_children(params).next().is_some())
}

fn has_return_value(tree: &SyntaxTree, node: NodeId) -> bool {
    let Some(body) = tree.child_by_field(node, "body") else {
        return false;
    };
    if tree.kind(body) != "statement_block" {
        // Expression-bodied arrow.
        return true;
    }

    let mut stack: Vec<NodeId> = tree.children(body).to_vec();
    while let Some(id) = stack.pop() {
        let kind = tree.kind(id);
        if kind == "return_statement" {
            if tree.named_children(id).next().is_some() {
                return true;
            }
            continue;
        }
        if is_function_kind(kind) || matches!(kind, "method_definition" | "class" | "class_declaration") {
            continue;
        }
        stack.extend(tree.children(id).iter().copied());
    }
    false
}

fn has_accessor_pair(tree: &SyntaxTree, node: NodeId) -> bool {
    let Some(owner) = tree.parent(node) else {
        return false;
    };
    let wanted = match accessor_keyword(tree, node) {
        Some("get") => "set",
        Some("set") => "get",
        _ => return false,
    };
    let name = method_name(tree, node);
    tree.named_children(owner)
        .filter(|s| *s != node && tree.kind(*s) == "method_definition")
        .any(|s| accessor_keyword(tree, s) == Some(wanted) && method_name(tree, s) == name)
}
