//! # jsdoc-lint-core
//!
//! Core framework for documentation linting over lowered syntax trees.
//!
//! This crate provides the foundational traits and types for building
//! documentation linters. It includes:
//!
//! - [`SyntaxTree`], an arena syntax tree with an explicit parent index,
//!   leaf tokens, comments and decorators
//! - [`SourceParser`] trait for pluggable language front-ends
//! - [`Rule`] trait for per-file rules
//! - [`Analyzer`] for orchestrating lint execution and writing fixes
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use jsdoc_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(JavaScriptParser::new())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{} violation(s)", result.violations.len());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod fix;
mod rule;
mod types;

pub mod syntax;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, FixReport};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, Settings};
pub use context::{extension_of, FileContext};
pub use fix::{apply_fixes, FixError, FixOutcome};
pub use rule::{ParseError, ParserBox, Rule, RuleBox, SourceParser};
pub use syntax::{
    Comment, CommentKind, Node, NodeId, Position, Span, SyntaxTree, SyntaxTreeBuilder, Token,
    TokenOrComment,
};
pub use types::{
    LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
