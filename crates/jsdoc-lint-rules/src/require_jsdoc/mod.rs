//! Rule requiring JSDoc blocks on declarations.
//!
//! # Rationale
//!
//! Public functions and classes without a `/** ... */` block leave readers
//! and documentation generators with nothing to go on.
//!
//! # Checked Declarations
//!
//! - Function declarations (on by default)
//! - Function and arrow expressions bound to a name: variable initializers,
//!   assignments, default exports, object and class property values
//! - Class declarations and expressions
//! - Class methods, getters, setters and constructors
//! - Any further node type listed in `contexts`
//!
//! # Configuration
//!
//! Options live under `[rules.require-jsdoc]`:
//!
//! - `require`: table of per-kind toggles (`FunctionDeclaration = true`, ...)
//! - `contexts`: extra node types, as strings or
//!   `{ context = "...", inline_comment_block = true }`
//! - `public_only`: `true` or `{ ancestors_only, esm, cjs, window }`
//! - `exempt_empty_constructors` (default: true), `exempt_empty_functions`
//!   (default: false)
//! - `min_line_count`: skip declarations this short (default: 0, off)
//! - `enable_fixer` (default: true)
//! - `check_constructors` (default: true), `check_getters` (`true`, `false`
//!   or `"no-setter"`), `check_setters` (`true`, `false` or `"no-getter"`)
//!
//! Attachment distance comes from the shared `[settings]` table.

mod classify;
mod fixer;
mod lines;
mod locate;
mod policy;

use jsdoc_lint_core::{
    Config, FileContext, Location, NodeId, Replacement, Rule, Severity, Suggestion, SyntaxTree,
    Violation,
};
use jsdoc_lint_js::LanguageServices;
use tracing::{debug, trace};

pub use classify::{
    is_constructor_like, is_embedded_value, is_immediately_invoked, method_kind, DeclarationKind,
    Facts, MethodKind,
};
pub use fixer::{newline_count, skeleton, synthesize, Insertion};
pub use lines::{count_effective_lines, is_full_line_comment, LineCountOptions};
pub use locate::{find_attached, leading_node, reduce_to_attachment_node};
pub use policy::{
    in_value_position, is_required, AccessorCheck, ContextEntry, ContextMatcher, Decision,
    Exemption, Policy, RequireToggles,
};

/// Rule code for require-jsdoc.
pub const CODE: &str = "JD001";

/// Rule name for require-jsdoc.
pub const NAME: &str = "require-jsdoc";

/// Message reported for undocumented declarations.
pub const MESSAGE: &str = "Missing JSDoc comment.";

/// Stable identifier of [`MESSAGE`].
pub const MESSAGE_ID: &str = "missingJsDoc";

/// Requires a JSDoc block before declarations.
#[derive(Debug, Clone)]
pub struct RequireJsdoc {
    policy: Policy,
    severity: Severity,
}

impl Default for RequireJsdoc {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireJsdoc {
    /// Creates a new rule with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: Policy::default(),
            severity: Severity::Warning,
        }
    }

    /// Creates the rule from the `[rules.require-jsdoc]` and `[settings]` tables.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new().with_policy(Policy::from_config(config.rule(NAME), config.settings))
    }

    /// Replaces the resolved options.
    #[must_use]
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The resolved options.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    fn declaration_kind(&self, tree: &SyntaxTree, node: NodeId) -> Option<DeclarationKind> {
        DeclarationKind::of(tree, node).or_else(|| {
            self.policy
                .contexts
                .iter()
                .position(|c| c.matcher.matches(tree, node))
                .map(DeclarationKind::Context)
        })
    }

    fn violation(
        &self,
        ctx: &FileContext,
        services: &LanguageServices,
        tree: &SyntaxTree,
        lines: &[&str],
        node: NodeId,
        kind: DeclarationKind,
    ) -> Violation {
        let location = Location::at(ctx.relative_path.clone(), tree.span(node).start);
        let violation = Violation::new(CODE, NAME, self.severity, location, MESSAGE)
            .with_message_id(MESSAGE_ID);

        if !self.policy.enable_fixer {
            return violation;
        }

        let inline = self
            .policy
            .context_for(kind)
            .is_some_and(|c| c.inline_comment_block);
        match synthesize(services, tree, lines, node, &self.policy.settings, inline) {
            Some(insertion) => violation.with_suggestion(Suggestion::with_fix(
                "Insert a JSDoc block",
                Replacement::insert_before(
                    ctx.relative_path.clone(),
                    insertion.position,
                    insertion.text,
                ),
            )),
            None => {
                debug!(
                    "{}: no insertion point at {}:{}",
                    NAME,
                    ctx.relative_path.display(),
                    tree.span(node).start.line
                );
                violation
            }
        }
    }
}

impl Rule for RequireJsdoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires JSDoc blocks on functions, classes and methods"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        let services = match LanguageServices::for_tree(tree) {
            Ok(services) => services,
            Err(e) => {
                debug!("{}: skipping {}: {e}", NAME, ctx.relative_path.display());
                return Vec::new();
            }
        };

        let lines = tree.lines();
        let index = self
            .policy
            .public_only
            .as_ref()
            .map(|options| services.exports.index(tree, options))
            .unwrap_or_default();
        let mut violations = Vec::new();

        for node in tree.preorder() {
            let Some(kind) = self.declaration_kind(tree, node) else {
                continue;
            };
            if !self.policy.applies(tree, node, kind) {
                continue;
            }

            let facts = Facts::gather(tree, node, kind, &lines);
            if let Decision::Exempt(reason) =
                is_required(tree, &facts, &self.policy, services.exports, &index)
            {
                trace!(?reason, line = tree.span(node).start.line, "exempt");
                continue;
            }

            if find_attached(&services, tree, node, &self.policy.settings).is_some() {
                continue;
            }

            violations.push(self.violation(ctx, &services, tree, &lines, node, kind));
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsdoc_lint_core::{apply_fixes, Position, Settings, Span, SyntaxTreeBuilder};
    use jsdoc_lint_js::{ExportOptions, JavaScriptParser};
    use std::path::Path;

    fn check_with(rule: &RequireJsdoc, src: &str) -> Vec<Violation> {
        let tree = JavaScriptParser::new().parse_source(src).unwrap();
        let ctx = FileContext::in_memory(Path::new("test.js"), src);
        rule.check(&ctx, &tree)
    }

    fn check(src: &str) -> Vec<Violation> {
        check_with(&RequireJsdoc::new(), src)
    }

    fn rule_from(toml: &str) -> RequireJsdoc {
        RequireJsdoc::from_config(&Config::parse(toml).unwrap())
    }

    fn fix_all(rule: &RequireJsdoc, src: &str) -> String {
        let violations = check_with(rule, src);
        apply_fixes(src, violations.iter().filter_map(Violation::fix))
            .unwrap()
            .content
    }

    #[test]
    fn reports_undocumented_function() {
        let violations = check("function add(a, b) {\n  return a + b;\n}\n");
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.code, CODE);
        assert_eq!(v.message, "Missing JSDoc comment.");
        assert_eq!(v.message_id.as_deref(), Some("missingJsDoc"));
        assert_eq!((v.location.line, v.location.column, v.location.length), (1, 1, 0));
        insta::assert_snapshot!(v.to_string(), @"test.js:1:1: warning [JD001] Missing JSDoc comment.");
    }

    #[test]
    fn documented_function_passes() {
        assert!(check("/**\n * Adds.\n */\nfunction add(a, b) {}\n").is_empty());
    }

    #[test]
    fn any_attached_block_suppresses() {
        assert!(check("/** x */\nfunction f(a) {}\n").is_empty());
        assert!(check("/** @private */\nfunction f(a) {}\n").is_empty());
    }

    #[test]
    fn plain_comments_do_not_count() {
        assert_eq!(check("/* not jsdoc */\nfunction f(a) {}\n").len(), 1);
        assert_eq!(check("// not jsdoc\nfunction f(a) {}\n").len(), 1);
    }

    #[test]
    fn defaults_ignore_expressions_and_classes() {
        let src = "const a = function () {};\nconst b = () => {};\nclass C {\n  m() {}\n}\n";
        assert!(check(src).is_empty());
    }

    #[test]
    fn require_toggles() {
        let rule = rule_from(
            r"
[rules.require-jsdoc.require]
ArrowFunctionExpression = true
ClassDeclaration = true
ClassExpression = true
FunctionExpression = true
MethodDefinition = true
",
        );
        let src = "const a = function () {};\nconst b = () => {};\nclass C {\n  m() {}\n}\nconst D = class {};\n";
        let lines: Vec<_> = check_with(&rule, src)
            .iter()
            .map(|v| v.location.line)
            .collect();
        assert_eq!(lines, vec![1, 2, 3, 4, 6]);
    }

    #[test]
    fn callbacks_are_never_checked() {
        let rule = rule_from(
            "[rules.require-jsdoc.require]\nArrowFunctionExpression = true\nFunctionExpression = true\n",
        );
        assert!(check_with(&rule, "list.map((x) => x);\nrun(function () {});\n").is_empty());
    }

    #[test]
    fn object_methods_follow_function_expression_toggle() {
        let src = "const o = {\n  m() {},\n};\n";
        let methods = rule_from("[rules.require-jsdoc.require]\nMethodDefinition = true\n");
        assert!(check_with(&methods, src).is_empty());
        let functions = rule_from("[rules.require-jsdoc.require]\nFunctionExpression = true\n");
        assert_eq!(check_with(&functions, src).len(), 1);
    }

    #[test]
    fn contexts_enable_builtin_kinds() {
        let rule = rule_from("[rules.require-jsdoc]\ncontexts = [\"ArrowFunctionExpression\"]\n");
        assert_eq!(check_with(&rule, "const f = () => {};\n").len(), 1);
    }

    #[test]
    fn custom_context_nodes_are_checked() {
        let rule = rule_from(
            "[rules.require-jsdoc]\nrequire = { FunctionDeclaration = false }\ncontexts = [\"VariableDeclaration\"]\n",
        );
        let violations = check_with(&rule, "const x = 1;\n/** Documented. */\nlet y = 2;\nfunction f() {}\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 1);
    }

    #[test]
    fn public_only() {
        let rule = RequireJsdoc::new().with_policy(Policy {
            public_only: Some(ExportOptions::default()),
            ..Policy::default()
        });
        assert!(check_with(&rule, "function f() {}\n").is_empty());
        assert_eq!(check_with(&rule, "export function f() {}\n").len(), 1);
    }

    #[test]
    fn decorator_chain_fix_goes_before_first_decorator() {
        let rule = rule_from("[rules.require-jsdoc.require]\nClassDeclaration = true\n");
        let src = "@deco1\n@deco2\nclass C {}\n";
        let violations = check_with(&rule, src);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 3);
        let fix = violations[0].fix().unwrap();
        assert_eq!(fix.location.offset, 0);
        assert_eq!(fix_all(&rule, src), "/**\n *\n */\n@deco1\n@deco2\nclass C {}\n");
    }

    #[test]
    fn inline_comment_block_context() {
        let rule = rule_from(
            "[rules.require-jsdoc]\ncontexts = [{ context = \"ArrowFunctionExpression\", inline_comment_block = true }]\n",
        );
        let violations = check_with(&rule, "  const f = () => {};\n");
        let fix = violations[0].fix().unwrap();
        assert_eq!(fix.new_text, "/** */\n  ");
        assert!(fix.is_insertion());
    }

    #[test]
    fn fixer_can_be_disabled() {
        let rule = rule_from("[rules.require-jsdoc]\nenable_fixer = false\n");
        let violations = check_with(&rule, "function f() {}\n");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].fix().is_none());
    }

    #[test]
    fn fixing_is_idempotent() {
        let rule = rule_from(
            "[rules.require-jsdoc.require]\nClassDeclaration = true\nMethodDefinition = true\nArrowFunctionExpression = true\n",
        );
        let src = "export class A {\n  run(x) {\n    return x;\n  }\n}\n\nconst f = (a) => a;\n";
        let fixed = fix_all(&rule, src);
        assert!(check_with(&rule, &fixed).is_empty(), "{fixed}");
        assert_eq!(fix_all(&rule, &fixed), fixed);
    }

    #[test]
    fn respects_attachment_settings() {
        let rule = RequireJsdoc::new().with_policy(Policy {
            settings: Settings {
                min_lines: 0,
                max_lines: 2,
            },
            ..Policy::default()
        });
        assert!(check_with(&rule, "/** Doc. */\n\nfunction f() {}\n").is_empty());
        assert_eq!(check("/** Doc. */\n\nfunction f() {}\n").len(), 1);
    }

    #[test]
    fn each_node_is_reported_once() {
        let rule = rule_from(
            "[rules.require-jsdoc.require]\nFunctionExpression = true\nArrowFunctionExpression = true\n",
        );
        let violations = check_with(&rule, "export default function () {}\nconst g = () => () => {};\n");
        let positions: Vec<_> = violations
            .iter()
            .map(|v| (v.location.line, v.location.column))
            .collect();
        assert_eq!(positions, vec![(1, 16), (2, 11)]);
    }

    #[test]
    fn class_expression_toggle_ignores_declarations() {
        let rule = rule_from(
            "[rules.require-jsdoc.require]\nFunctionDeclaration = false\nClassExpression = true\n",
        );
        assert!(check_with(&rule, "class C {}\n").is_empty());

        let violations = check_with(&rule, "const D = class {};\n");
        assert_eq!(violations.len(), 1);
        assert_eq!((violations[0].location.line, violations[0].location.column), (1, 11));
    }

    #[test]
    fn anonymous_default_export_is_a_declaration() {
        let src = "export default function () {\n  return 1;\n}\n";
        let violations = check(src);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 1);
        assert_eq!(
            fix_all(&RequireJsdoc::new(), src),
            format!("/**\n *\n */\n{src}")
        );

        assert_eq!(check("export default function* () {}\n").len(), 1);
        assert_eq!(check("export default function f() {}\n").len(), 1);
        assert!(check("export default (function () {});\n").is_empty());
        assert!(check("export default () => {};\n").is_empty());
    }

    #[test]
    fn anonymous_default_class_is_a_declaration() {
        let rule = rule_from("[rules.require-jsdoc.require]\nClassDeclaration = true\n");
        let violations = check_with(&rule, "export default class {\n}\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.column, 16);

        let rule = rule_from(
            "[rules.require-jsdoc.require]\nFunctionDeclaration = false\nClassExpression = true\n",
        );
        assert!(check_with(&rule, "export default class {\n}\n").is_empty());
    }

    #[test]
    fn exported_only_checks_share_one_index() {
        let rule = rule_from("[rules.require-jsdoc]\npublic_only = true\n");
        let src = "function a() {}\nfunction b() {}\nfunction c() {}\nexport { a, c };\n";
        let lines: Vec<_> = check_with(&rule, src)
            .iter()
            .map(|v| v.location.line)
            .collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn unsupported_dialect_yields_nothing() {
        let mut b = SyntaxTreeBuilder::new("kotlin", "fun f() {}");
        let span = Span::new(Position::new(1, 0, 0), Position::new(1, 10, 10));
        let root = b.push_node(None, "source_file", None, true, span);
        b.push_node(Some(root), "function_declaration", None, true, span);
        let tree = b.finish();
        let ctx = FileContext::in_memory(Path::new("a.kt"), "fun f() {}");
        assert!(RequireJsdoc::new().check(&ctx, &tree).is_empty());
    }
}
