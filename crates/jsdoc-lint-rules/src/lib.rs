//! # jsdoc-lint-rules
//!
//! Built-in documentation rules for jsdoc-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | JD001 | `require-jsdoc` | Requires JSDoc blocks on functions, classes and methods |
//!
//! ## Usage
//!
//! ```ignore
//! use jsdoc_lint_core::{Analyzer, Config};
//! use jsdoc_lint_js::JavaScriptParser;
//! use jsdoc_lint_rules::RequireJsdoc;
//!
//! let config = Config::from_file("jsdoc-lint.toml".as_ref())?;
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(JavaScriptParser::new())
//!     .rule(RequireJsdoc::from_config(&config))
//!     .config(config)
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod require_jsdoc;

pub use require_jsdoc::{Policy, RequireJsdoc};

use jsdoc_lint_core::{Config, RuleBox};

/// Returns every built-in rule with default options.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(RequireJsdoc::new())]
}

/// Returns every built-in rule configured from `config`.
#[must_use]
pub fn configured_rules(config: &Config) -> Vec<RuleBox> {
    vec![Box::new(RequireJsdoc::from_config(config))]
}

/// Re-export core types for convenience.
pub use jsdoc_lint_core::{Rule, Severity, Violation};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_require_jsdoc() {
        let rules = all_rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name(), "require-jsdoc");
        assert_eq!(rules[0].code(), "JD001");

        let config = Config::parse("[rules.require-jsdoc]\nmin_line_count = 2\n").unwrap();
        assert_eq!(configured_rules(&config)[0].name(), "require-jsdoc");
    }
}
