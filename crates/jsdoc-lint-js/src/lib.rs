//! # jsdoc-lint-js
//!
//! JavaScript support for jsdoc-lint.
//!
//! - [`JavaScriptParser`] parses `.js`, `.jsx`, `.mjs` and `.cjs` files with
//!   tree-sitter and lowers them into a [`jsdoc_lint_core::SyntaxTree`]
//! - [`LanguageServices`] bundles the comment, reduction, decorator and export
//!   services documentation rules consult
//! - [`jsdoc`] parses the body of `/** ... */` blocks
//!
//! ## Example
//!
//! ```ignore
//! use jsdoc_lint_js::{JavaScriptParser, LanguageServices};
//!
//! let tree = JavaScriptParser::new().parse_source("function f() {}")?;
//! let services = LanguageServices::for_tree(&tree)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attach;
mod exports;
mod parser;
mod services;

pub mod jsdoc;

pub use attach::{
    is_function_kind, unparenthesized_parent, JsCommentResolver, JsDecoratorLookup, JsNodeReducer,
};
pub use exports::JsExportResolver;
pub use jsdoc::{CommentBlock, JsdocBlock, JsdocTag};
pub use parser::{JavaScriptParser, LANGUAGE_ID};
pub use services::{
    CommentResolver, DecoratorLookup, ExportIndex, ExportOptions, ExportResolver, LanguageServices,
    NodeReducer, ServiceError,
};
