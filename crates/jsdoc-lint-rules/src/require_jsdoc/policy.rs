//! Resolved rule options and the documentation-required decision.

use jsdoc_lint_core::{NodeId, RuleConfig, Settings, SyntaxTree};
use jsdoc_lint_js::{ExportIndex, ExportOptions, ExportResolver};
use tracing::{debug, warn};

use super::classify::{value_slot, DeclarationKind, Facts, MethodKind};

/// Per-kind `require` toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequireToggles {
    /// `ArrowFunctionExpression`
    pub arrow_function_expression: bool,
    /// `ClassDeclaration`
    pub class_declaration: bool,
    /// `ClassExpression`
    pub class_expression: bool,
    /// `FunctionDeclaration`
    pub function_declaration: bool,
    /// `FunctionExpression`
    pub function_expression: bool,
    /// `MethodDefinition`
    pub method_definition: bool,
}

impl Default for RequireToggles {
    fn default() -> Self {
        Self {
            arrow_function_expression: false,
            class_declaration: false,
            class_expression: false,
            function_declaration: true,
            function_expression: false,
            method_definition: false,
        }
    }
}

impl RequireToggles {
    /// Toggle for `kind`; custom contexts have none.
    #[must_use]
    pub fn get(&self, kind: DeclarationKind) -> bool {
        match kind {
            DeclarationKind::ArrowFunctionExpression => self.arrow_function_expression,
            DeclarationKind::ClassDeclaration => self.class_declaration,
            DeclarationKind::ClassExpression => self.class_expression,
            DeclarationKind::FunctionDeclaration => self.function_declaration,
            DeclarationKind::FunctionExpression => self.function_expression,
            DeclarationKind::MethodDefinition => self.method_definition,
            DeclarationKind::Context(_) => false,
        }
    }

    /// Sets the toggle for `kind`.
    pub fn set(&mut self, kind: DeclarationKind, value: bool) {
        let slot = match kind {
            DeclarationKind::ArrowFunctionExpression => &mut self.arrow_function_expression,
            DeclarationKind::ClassDeclaration => &mut self.class_declaration,
            DeclarationKind::ClassExpression => &mut self.class_expression,
            DeclarationKind::FunctionDeclaration => &mut self.function_declaration,
            DeclarationKind::FunctionExpression => &mut self.function_expression,
            DeclarationKind::MethodDefinition => &mut self.method_definition,
            DeclarationKind::Context(_) => return,
        };
        *slot = value;
    }
}

/// How getters (or setters) are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorCheck {
    /// Always checked.
    Always,
    /// Never checked.
    Never,
    /// Checked unless the opposite accessor exists for the same name.
    UnlessPaired,
}

impl AccessorCheck {
    fn exempts(self, has_pair: bool) -> bool {
        match self {
            Self::Always => false,
            Self::Never => true,
            Self::UnlessPaired => has_pair,
        }
    }
}

/// Which nodes a custom context selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextMatcher {
    /// One of the six built-in kinds; handled by the built-in checks.
    Builtin(DeclarationKind),
    /// Any node of these grammar kinds.
    Kinds(Vec<String>),
    /// `export` statements, with or without `default`.
    Export {
        /// Match `export default ...` (true) or named exports (false).
        default: bool,
    },
    /// A selector this rule cannot evaluate.
    Unsupported,
}

impl ContextMatcher {
    /// Resolves a context selector.
    #[must_use]
    pub fn resolve(selector: &str) -> Self {
        if let Some(kind) = DeclarationKind::from_name(selector) {
            return Self::Builtin(kind);
        }
        let kinds: &[&str] = match selector {
            "VariableDeclaration" => &["lexical_declaration", "variable_declaration"],
            "VariableDeclarator" => &["variable_declarator"],
            "PropertyDefinition" | "ClassProperty" => &["field_definition"],
            "Property" => &["pair"],
            "ClassBody" => &["class_body"],
            "ObjectExpression" => &["object"],
            "CallExpression" => &["call_expression"],
            "NewExpression" => &["new_expression"],
            "AssignmentExpression" => &["assignment_expression"],
            "ExpressionStatement" => &["expression_statement"],
            "ReturnStatement" => &["return_statement"],
            "ExportNamedDeclaration" => return Self::Export { default: false },
            "ExportDefaultDeclaration" => return Self::Export { default: true },
            raw if !raw.is_empty()
                && raw.chars().all(|c| c.is_ascii_lowercase() || c == '_') =>
            {
                return Self::Kinds(vec![raw.to_string()]);
            }
            _ => return Self::Unsupported,
        };
        Self::Kinds(kinds.iter().map(|k| (*k).to_string()).collect())
    }

    /// Returns true if `node` is selected by a non-builtin matcher.
    #[must_use]
    pub fn matches(&self, tree: &SyntaxTree, node: NodeId) -> bool {
        match self {
            Self::Builtin(_) | Self::Unsupported => false,
            Self::Kinds(kinds) => kinds.iter().any(|k| k == tree.kind(node)),
            Self::Export { default } => {
                tree.kind(node) == "export_statement"
                    && tree
                        .children(node)
                        .iter()
                        .any(|c| tree.kind(*c) == "default")
                        == *default
            }
        }
    }
}

/// One entry of the `contexts` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    /// Selector as configured.
    pub context: String,
    /// Insert `/** */` instead of the multi-line skeleton.
    pub inline_comment_block: bool,
    /// Resolved selector.
    pub matcher: ContextMatcher,
}

impl ContextEntry {
    /// Creates an entry for `context`.
    #[must_use]
    pub fn new(context: impl Into<String>, inline_comment_block: bool) -> Self {
        let context = context.into();
        let matcher = ContextMatcher::resolve(&context);
        Self {
            context,
            inline_comment_block,
            matcher,
        }
    }
}

/// Fully-resolved options of the `require-jsdoc` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Per-kind toggles.
    pub require: RequireToggles,
    /// Custom contexts.
    pub contexts: Vec<ContextEntry>,
    /// Only exported declarations need documentation.
    pub public_only: Option<ExportOptions>,
    /// Skip constructors without parameters or return value.
    pub exempt_empty_constructors: bool,
    /// Skip functions without parameters or return value.
    pub exempt_empty_functions: bool,
    /// Skip declarations spanning at most this many effective lines (0 disables).
    pub min_line_count: usize,
    /// Attach insertion fixes to findings.
    pub enable_fixer: bool,
    /// Check class constructors.
    pub check_constructors: bool,
    /// Getter checking.
    pub check_getters: AccessorCheck,
    /// Setter checking.
    pub check_setters: AccessorCheck,
    /// Comment attachment settings.
    pub settings: Settings,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            require: RequireToggles::default(),
            contexts: Vec::new(),
            public_only: None,
            exempt_empty_constructors: true,
            exempt_empty_functions: false,
            min_line_count: 0,
            enable_fixer: true,
            check_constructors: true,
            check_getters: AccessorCheck::Always,
            check_setters: AccessorCheck::Always,
            settings: Settings::default(),
        }
    }
}

/// Why a declaration does not need documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exemption {
    /// Constructor, getter or setter switched off.
    SpecialMethod,
    /// No parameters and no return value.
    Empty,
    /// Shorter than `min_line_count`.
    Short,
    /// Not exported while `public_only` is set.
    NotExported,
}

/// Outcome of [`is_required`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Documentation is required.
    Required,
    /// Documentation is not required.
    Exempt(Exemption),
}

fn bool_option(config: &RuleConfig, key: &str, default: bool) -> bool {
    match config.options.get(key) {
        None => default,
        Some(toml::Value::Boolean(b)) => *b,
        Some(other) => {
            warn!(
                "require-jsdoc: `{key}` should be a boolean, got {}; using {default}",
                other.type_str()
            );
            default
        }
    }
}

fn accessor_option(config: &RuleConfig, key: &str, paired_word: &str) -> AccessorCheck {
    match config.options.get(key) {
        None | Some(toml::Value::Boolean(true)) => AccessorCheck::Always,
        Some(toml::Value::Boolean(false)) => AccessorCheck::Never,
        Some(toml::Value::String(s)) if s == paired_word => AccessorCheck::UnlessPaired,
        Some(other) => {
            warn!("require-jsdoc: invalid `{key}` value {other}; checking always");
            AccessorCheck::Always
        }
    }
}

fn require_option(config: &RuleConfig) -> RequireToggles {
    let mut toggles = RequireToggles::default();
    let Some(value) = config.options.get("require") else {
        return toggles;
    };
    let Some(table) = value.as_table() else {
        warn!("require-jsdoc: `require` should be a table; using defaults");
        return toggles;
    };
    for (name, enabled) in table {
        match (DeclarationKind::from_name(name), enabled.as_bool()) {
            (Some(kind), Some(enabled)) => toggles.set(kind, enabled),
            (None, _) => warn!("require-jsdoc: unknown `require` entry `{name}`"),
            (_, None) => warn!("require-jsdoc: `require.{name}` should be a boolean"),
        }
    }
    toggles
}

fn contexts_option(config: &RuleConfig) -> Vec<ContextEntry> {
    let Some(value) = config.options.get("contexts") else {
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        warn!("require-jsdoc: `contexts` should be an array; ignoring");
        return Vec::new();
    };

    let mut contexts = Vec::new();
    for item in items {
        let entry = match item {
            toml::Value::String(context) => ContextEntry::new(context.as_str(), false),
            toml::Value::Table(table) => {
                let Some(context) = table.get("context").and_then(toml::Value::as_str) else {
                    warn!("require-jsdoc: context entry without `context`; ignoring");
                    continue;
                };
                let inline = table
                    .get("inline_comment_block")
                    .and_then(toml::Value::as_bool)
                    .unwrap_or(false);
                ContextEntry::new(context, inline)
            }
            other => {
                warn!("require-jsdoc: invalid context entry {other}; ignoring");
                continue;
            }
        };
        if entry.matcher == ContextMatcher::Unsupported {
            debug!("require-jsdoc: unsupported context selector `{}`", entry.context);
        }
        contexts.push(entry);
    }
    contexts
}

fn public_only_option(config: &RuleConfig) -> Option<ExportOptions> {
    match config.options.get("public_only")? {
        toml::Value::Boolean(true) => Some(ExportOptions::default()),
        toml::Value::Boolean(false) => None,
        toml::Value::Table(table) => {
            let flag = |key: &str, default: bool| {
                table
                    .get(key)
                    .and_then(toml::Value::as_bool)
                    .unwrap_or(default)
            };
            let defaults = ExportOptions::default();
            Some(ExportOptions {
                ancestors_only: flag("ancestors_only", defaults.ancestors_only),
                esm: flag("esm", defaults.esm),
                init_module_exports: flag("cjs", defaults.init_module_exports),
                init_window: flag("window", defaults.init_window),
            })
        }
        other => {
            warn!("require-jsdoc: invalid `public_only` value {other}; ignoring");
            None
        }
    }
}

fn min_line_count_option(config: &RuleConfig) -> usize {
    match config.options.get("min_line_count") {
        None => 0,
        Some(toml::Value::Integer(n)) => usize::try_from(*n).unwrap_or_else(|_| {
            warn!("require-jsdoc: `min_line_count` must not be negative; using 0");
            0
        }),
        Some(other) => {
            warn!("require-jsdoc: invalid `min_line_count` value {other}; using 0");
            0
        }
    }
}

impl Policy {
    /// Resolves the policy from a rule configuration block.
    ///
    /// Missing options take their defaults; options of the wrong shape are
    /// logged and take their defaults as well.
    #[must_use]
    pub fn from_config(config: Option<&RuleConfig>, settings: Settings) -> Self {
        let mut policy = Self {
            settings,
            ..Self::default()
        };
        let Some(config) = config else {
            return policy;
        };

        policy.require = require_option(config);
        policy.contexts = contexts_option(config);
        policy.public_only = public_only_option(config);
        policy.exempt_empty_constructors =
            bool_option(config, "exempt_empty_constructors", policy.exempt_empty_constructors);
        policy.exempt_empty_functions =
            bool_option(config, "exempt_empty_functions", policy.exempt_empty_functions);
        policy.min_line_count = min_line_count_option(config);
        policy.enable_fixer = bool_option(config, "enable_fixer", policy.enable_fixer);
        policy.check_constructors =
            bool_option(config, "check_constructors", policy.check_constructors);
        policy.check_getters = accessor_option(config, "check_getters", "no-setter");
        policy.check_setters = accessor_option(config, "check_setters", "no-getter");
        policy
    }

    /// True iff `kind` is switched on by `require` or named in `contexts`.
    #[must_use]
    pub fn has_option(&self, kind: DeclarationKind) -> bool {
        self.require.get(kind)
            || self
                .contexts
                .iter()
                .any(|c| c.matcher == ContextMatcher::Builtin(kind))
    }

    /// Context entry governing `kind`, if any.
    #[must_use]
    pub fn context_for(&self, kind: DeclarationKind) -> Option<&ContextEntry> {
        match kind {
            DeclarationKind::Context(index) => self.contexts.get(index),
            builtin => self
                .contexts
                .iter()
                .find(|c| c.matcher == ContextMatcher::Builtin(builtin)),
        }
    }

    /// Whether a node of `kind` is checked at all.
    #[must_use]
    pub fn applies(&self, tree: &SyntaxTree, node: NodeId, kind: DeclarationKind) -> bool {
        match kind {
            DeclarationKind::FunctionExpression | DeclarationKind::ArrowFunctionExpression => {
                self.has_option(kind) && in_value_position(tree, node)
            }
            DeclarationKind::Context(_) => true,
            _ => self.has_option(kind),
        }
    }
}

/// True iff a function or arrow expression produces a named value.
#[must_use]
pub fn in_value_position(tree: &SyntaxTree, node: NodeId) -> bool {
    if tree.kind(node) == "method_definition" {
        return true;
    }
    let slot = value_slot(tree, node);
    let Some(parent) = tree.parent(slot) else {
        return false;
    };
    let field = tree.node(slot).field;
    match tree.kind(parent) {
        "variable_declarator" | "pair" | "field_definition" | "export_statement" => {
            field == Some("value")
        }
        "assignment_expression" | "augmented_assignment_expression" => field == Some("right"),
        _ => false,
    }
}

/// Decides whether the declaration described by `facts` needs documentation.
///
/// The first matching exemption wins; otherwise documentation is required.
/// `index` is the export index of `tree`, built once per pass; it is only
/// consulted when `public_only` is set.
#[must_use]
pub fn is_required(
    tree: &SyntaxTree,
    facts: &Facts,
    policy: &Policy,
    exports: &dyn ExportResolver,
    index: &ExportIndex,
) -> Decision {
    let special = match facts.method_kind {
        MethodKind::Constructor => !policy.check_constructors,
        MethodKind::Getter => policy.check_getters.exempts(facts.has_accessor_pair),
        MethodKind::Setter => policy.check_setters.exempts(facts.has_accessor_pair),
        MethodKind::Normal | MethodKind::Method => false,
    };
    if special {
        return Decision::Exempt(Exemption::SpecialMethod);
    }

    let constructor = facts.method_kind == MethodKind::Constructor;
    if ((policy.exempt_empty_functions && facts.is_function_context)
        || (policy.exempt_empty_constructors && constructor))
        && !facts.has_parameters
        && !facts.has_return_value
    {
        return Decision::Exempt(Exemption::Empty);
    }

    if policy.min_line_count > 0
        && facts
            .effective_lines
            .is_some_and(|lines| lines <= policy.min_line_count)
    {
        return Decision::Exempt(Exemption::Short);
    }

    if let Some(options) = &policy.public_only {
        if !exports.is_exported_in(tree, facts.node, options, index) {
            return Decision::Exempt(Exemption::NotExported);
        }
    }

    Decision::Required
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsdoc_lint_core::Config;
    use jsdoc_lint_js::{JavaScriptParser, JsExportResolver};

    fn policy(toml: &str) -> Policy {
        let config = Config::parse(toml).unwrap();
        Policy::from_config(config.rule("require-jsdoc"), config.settings)
    }

    fn export_index(tree: &SyntaxTree, policy: &Policy) -> ExportIndex {
        policy
            .public_only
            .as_ref()
            .map(|options| JsExportResolver.index(tree, options))
            .unwrap_or_default()
    }

    fn decide(src: &str, kind: &str, policy: &Policy) -> Decision {
        let tree = JavaScriptParser::new().parse_source(src).unwrap();
        let node = tree
            .preorder()
            .find(|id| tree.kind(*id) == kind)
            .unwrap();
        let decl = DeclarationKind::of(&tree, node).unwrap();
        let facts = Facts::gather(&tree, node, decl, &tree.lines());
        is_required(&tree, &facts, policy, &JsExportResolver, &export_index(&tree, policy))
    }

    #[test]
    fn defaults() {
        let p = Policy::from_config(None, Settings::default());
        assert!(p.require.function_declaration);
        assert!(!p.require.arrow_function_expression);
        assert!(p.exempt_empty_constructors);
        assert!(!p.exempt_empty_functions);
        assert!(p.enable_fixer);
        assert_eq!(p.public_only, None);
        assert_eq!(p.check_getters, AccessorCheck::Always);
    }

    #[test]
    fn parses_every_option() {
        let p = policy(
            r#"
[settings]
min_lines = 1
max_lines = 2

[rules.require-jsdoc]
require = { ArrowFunctionExpression = true, FunctionDeclaration = false }
contexts = ["VariableDeclaration", { context = "ClassExpression", inline_comment_block = true }]
public_only = { cjs = false, window = true }
exempt_empty_constructors = false
exempt_empty_functions = true
min_line_count = 3
enable_fixer = false
check_constructors = false
check_getters = "no-setter"
check_setters = false
"#,
        );
        assert!(p.require.arrow_function_expression);
        assert!(!p.require.function_declaration);
        assert_eq!(p.contexts.len(), 2);
        assert!(p.has_option(DeclarationKind::ClassExpression));
        assert!(p.context_for(DeclarationKind::ClassExpression).unwrap().inline_comment_block);
        assert_eq!(
            p.contexts[0].matcher,
            ContextMatcher::Kinds(vec!["lexical_declaration".into(), "variable_declaration".into()])
        );
        let exports = p.public_only.unwrap();
        assert!(exports.esm && !exports.init_module_exports && exports.init_window);
        assert!(!p.exempt_empty_constructors);
        assert!(p.exempt_empty_functions);
        assert_eq!(p.min_line_count, 3);
        assert!(!p.enable_fixer);
        assert!(!p.check_constructors);
        assert_eq!(p.check_getters, AccessorCheck::UnlessPaired);
        assert_eq!(p.check_setters, AccessorCheck::Never);
        assert_eq!(p.settings.max_lines, 2);
    }

    #[test]
    fn malformed_options_fall_back() {
        let p = policy(
            r#"
[rules.require-jsdoc]
require = "everything"
contexts = 3
public_only = "yes"
exempt_empty_functions = "no"
min_line_count = -2
check_getters = "sometimes"
"#,
        );
        assert_eq!(p, Policy::default());
    }

    #[test]
    fn context_selectors() {
        assert_eq!(
            ContextMatcher::resolve("FunctionExpression"),
            ContextMatcher::Builtin(DeclarationKind::FunctionExpression)
        );
        assert_eq!(
            ContextMatcher::resolve("ExportDefaultDeclaration"),
            ContextMatcher::Export { default: true }
        );
        assert_eq!(
            ContextMatcher::resolve("lexical_declaration"),
            ContextMatcher::Kinds(vec!["lexical_declaration".into()])
        );
        assert_eq!(
            ContextMatcher::resolve("FunctionDeclaration[async=true]"),
            ContextMatcher::Unsupported
        );
    }

    #[test]
    fn value_positions() {
        let tree = JavaScriptParser::new()
            .parse_source("const a = () => {};\nb = () => {};\nrun(() => {});\nconst o = { c: () => {} };\nconst d = (() => {});\n")
            .unwrap();
        let arrows: Vec<_> = tree
            .preorder()
            .filter(|id| tree.kind(*id) == "arrow_function")
            .map(|id| in_value_position(&tree, id))
            .collect();
        assert_eq!(arrows, vec![true, true, false, true, true]);
    }

    #[test]
    fn empty_function_exemption() {
        let p = Policy {
            exempt_empty_functions: true,
            ..Policy::default()
        };
        assert_eq!(decide("function f() {}", "function_declaration", &p), Decision::Exempt(Exemption::Empty));
        assert_eq!(decide("function f(a) {}", "function_declaration", &p), Decision::Required);
        assert_eq!(decide("function f() { return 1; }", "function_declaration", &p), Decision::Required);
        assert_eq!(decide("class A {}", "class_declaration", &p), Decision::Required);
    }

    #[test]
    fn empty_constructor_exemption() {
        let p = Policy::default();
        let src = "class A {\n  constructor() {}\n}";
        assert_eq!(decide(src, "method_definition", &p), Decision::Exempt(Exemption::Empty));
        let src = "class A {\n  constructor(x) {}\n}";
        assert_eq!(decide(src, "method_definition", &p), Decision::Required);
    }

    #[test]
    fn special_methods() {
        let p = Policy {
            check_constructors: false,
            exempt_empty_constructors: false,
            ..Policy::default()
        };
        let src = "class A {\n  constructor(x) {}\n}";
        assert_eq!(decide(src, "method_definition", &p), Decision::Exempt(Exemption::SpecialMethod));

        let paired = "class A {\n  get x() { return 1; }\n  set x(v) {}\n}";
        let lonely = "class A {\n  get x() { return 1; }\n}";
        let p = Policy {
            check_getters: AccessorCheck::UnlessPaired,
            ..Policy::default()
        };
        assert_eq!(decide(paired, "method_definition", &p), Decision::Exempt(Exemption::SpecialMethod));
        assert_eq!(decide(lonely, "method_definition", &p), Decision::Required);
    }

    #[test]
    fn min_line_count_exemption() {
        let p = Policy {
            min_line_count: 3,
            ..Policy::default()
        };
        let short = "function f() {\n  // note\n\n  return 1;\n}";
        assert_eq!(decide(short, "function_declaration", &p), Decision::Exempt(Exemption::Short));
        let long = "function f() {\n  a();\n  b();\n  return 1;\n}";
        assert_eq!(decide(long, "function_declaration", &p), Decision::Required);
    }

    #[test]
    fn iife_never_takes_the_short_exemption() {
        let p = Policy {
            min_line_count: 100,
            require: RequireToggles {
                function_expression: true,
                ..RequireToggles::default()
            },
            ..Policy::default()
        };
        assert_eq!(decide("(function () {})();", "function_expression", &p), Decision::Required);
    }

    #[test]
    fn public_only_gating() {
        let p = Policy {
            public_only: Some(ExportOptions::default()),
            ..Policy::default()
        };
        assert_eq!(
            decide("function f() {}", "function_declaration", &p),
            Decision::Exempt(Exemption::NotExported)
        );
        assert_eq!(decide("export function f() {}", "function_declaration", &p), Decision::Required);
    }

    #[test]
    fn decision_is_idempotent() {
        let tree = JavaScriptParser::new()
            .parse_source("export function f(a) {\n  return a;\n}\n")
            .unwrap();
        let node = tree
            .preorder()
            .find(|id| tree.kind(*id) == "function_declaration")
            .unwrap();
        let facts = Facts::gather(&tree, node, DeclarationKind::FunctionDeclaration, &tree.lines());
        let p = Policy {
            public_only: Some(ExportOptions::default()),
            min_line_count: 1,
            ..Policy::default()
        };
        let index = export_index(&tree, &p);
        let first = is_required(&tree, &facts, &p, &JsExportResolver, &index);
        let second = is_required(&tree, &facts, &p, &JsExportResolver, &index);
        assert_eq!(first, second);
    }

    #[test]
    fn enabling_empty_exemption_never_unexempts() {
        let sources = [
            ("function f() {}", "function_declaration"),
            ("function f(a) {}", "function_declaration"),
            ("function f() {\n  return 1;\n}", "function_declaration"),
            ("class A {\n  constructor() {}\n}", "method_definition"),
            ("class A {}", "class_declaration"),
            ("function f() {}\nexport { f };", "function_declaration"),
        ];
        let bases = [
            Policy::default(),
            Policy {
                min_line_count: 2,
                ..Policy::default()
            },
            Policy {
                public_only: Some(ExportOptions::default()),
                ..Policy::default()
            },
        ];
        for base in &bases {
            let with = Policy {
                exempt_empty_functions: true,
                ..base.clone()
            };
            for (src, kind) in sources {
                let before = decide(src, kind, base);
                let after = decide(src, kind, &with);
                if matches!(before, Decision::Exempt(_)) {
                    assert!(matches!(after, Decision::Exempt(_)), "{src}");
                }
            }
        }
    }
}
