//! Language services consumed by documentation rules.
//!
//! Rules never inspect comments, exports or decorators directly; they go
//! through these traits so the decision logic stays independent of the
//! grammar that produced the tree.

use jsdoc_lint_core::{NodeId, Settings, SyntaxTree, Token};
use std::collections::HashSet;

use crate::attach::{JsCommentResolver, JsDecoratorLookup, JsNodeReducer};
use crate::exports::JsExportResolver;
use crate::jsdoc::CommentBlock;
use crate::parser::LANGUAGE_ID;

/// Finds the documentation block attached to a declaration.
pub trait CommentResolver: Send + Sync {
    /// Returns the attached block for `node`, if any.
    fn resolve_attached(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        settings: &Settings,
    ) -> Option<CommentBlock>;
}

/// Maps a declaration to the node its documentation attaches to.
pub trait NodeReducer: Send + Sync {
    /// Returns the attachment node for `node` (possibly `node` itself).
    fn reduce(&self, tree: &SyntaxTree, node: NodeId) -> NodeId;
}

/// Looks up decorators directly preceding a token.
pub trait DecoratorLookup: Send + Sync {
    /// Returns the decorator that ends right before `token`, if any.
    fn decorator_before(&self, tree: &SyntaxTree, token: &Token) -> Option<NodeId>;
}

/// Which export forms make a declaration public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Only consider wrapping ancestors, never name references elsewhere.
    pub ancestors_only: bool,
    /// ES module exports.
    pub esm: bool,
    /// CommonJS `module.exports` / `exports` assignments.
    pub init_module_exports: bool,
    /// `window.x = ...` assignments.
    pub init_window: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            ancestors_only: false,
            esm: true,
            init_module_exports: true,
            init_window: false,
        }
    }
}

/// Names a module exports by reference, collected once per tree.
///
/// Covers `export { name }`, `export default name`, and `name` assigned to
/// (or listed in an object assigned to) an enabled export target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportIndex {
    names: HashSet<String>,
}

impl ExportIndex {
    /// Builds an index from exported names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `name` is exported by reference.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns true if nothing is exported by reference.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Decides whether a declaration is reachable from outside its module.
pub trait ExportResolver: Send + Sync {
    /// Collects the names `tree` exports by reference under `options`.
    fn index(&self, tree: &SyntaxTree, options: &ExportOptions) -> ExportIndex;

    /// Returns true if `node` is exported, given the `index` of its tree.
    fn is_exported_in(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        options: &ExportOptions,
        index: &ExportIndex,
    ) -> bool;

    /// Returns true if `node` is exported under `options`.
    ///
    /// Builds a fresh index; use [`ExportResolver::is_exported_in`] when
    /// checking many nodes of one tree.
    fn is_exported(&self, tree: &SyntaxTree, node: NodeId, options: &ExportOptions) -> bool {
        self.is_exported_in(tree, node, options, &self.index(tree, options))
    }
}

/// Errors raised while selecting language services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No services exist for the tree's dialect.
    #[error("no language services for dialect '{language}'")]
    UnsupportedDialect {
        /// Dialect reported by the tree.
        language: String,
    },
}

/// The set of services for one dialect.
#[derive(Clone, Copy)]
pub struct LanguageServices {
    /// Comment attachment.
    pub comments: &'static dyn CommentResolver,
    /// Attachment-node reduction.
    pub reducer: &'static dyn NodeReducer,
    /// Decorator lookup.
    pub decorators: &'static dyn DecoratorLookup,
    /// Export visibility.
    pub exports: &'static dyn ExportResolver,
}

impl LanguageServices {
    /// Services for JavaScript trees.
    #[must_use]
    pub fn javascript() -> Self {
        Self {
            comments: &JsCommentResolver,
            reducer: &JsNodeReducer,
            decorators: &JsDecoratorLookup,
            exports: &JsExportResolver,
        }
    }

    /// Services for the named dialect.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UnsupportedDialect`] for unknown dialects.
    pub fn for_language(language: &str) -> Result<Self, ServiceError> {
        match language {
            LANGUAGE_ID => Ok(Self::javascript()),
            other => Err(ServiceError::UnsupportedDialect {
                language: other.to_string(),
            }),
        }
    }

    /// Services for the dialect `tree` was parsed from.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UnsupportedDialect`] for unknown dialects.
    pub fn for_tree(tree: &SyntaxTree) -> Result<Self, ServiceError> {
        Self::for_language(tree.language())
    }
}

impl std::fmt::Debug for LanguageServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageServices").finish_non_exhaustive()
    }
}
