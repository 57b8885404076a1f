//! Rule and parser traits.

use crate::context::FileContext;
use crate::syntax::SyntaxTree;
use crate::types::{Severity, Violation};

/// A per-file lint rule over a lowered [`SyntaxTree`].
///
/// # Example
///
/// ```ignore
/// use jsdoc_lint_core::{FileContext, Rule, SyntaxTree, Violation};
///
/// pub struct NoEmptyFile;
///
/// impl Rule for NoEmptyFile {
///     fn name(&self) -> &'static str { "no-empty-file" }
///     fn code(&self) -> &'static str { "JD100" }
///
///     fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
///         if tree.tokens().is_empty() { /* ... */ }
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "require-jsdoc").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "JD001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    ///
    /// Rules must not panic on trees they cannot handle; they return no
    /// violations instead.
    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Errors produced while parsing a source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The parser could not be initialised for its language.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Dialect identifier.
        language: &'static str,
        /// Underlying error message.
        message: String,
    },

    /// The parser produced no tree.
    #[error("failed to parse {language} source")]
    NoTree {
        /// Dialect identifier.
        language: &'static str,
    },
}

/// A source-language parser that lowers text into a [`SyntaxTree`].
///
/// Implement this to teach the analyzer a new dialect.
pub trait SourceParser: Send + Sync {
    /// Dialect identifier (e.g., `"javascript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles, with leading dot (e.g., `&[".js"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` into a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or parsing yields no tree.
    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError>;
}

/// Type alias for boxed parser trait objects.
pub type ParserBox = Box<dyn SourceParser>;
