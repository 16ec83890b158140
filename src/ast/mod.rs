//! # Parse Tree
//!
//! The tree produced by the parsing pipeline, before any semantic pass
//! has run.
//!
//! ```text
//! Lexer → Token Stream → Sectioning → Section Tree → Parser → [PARSE TREE]
//! ```
//!
//! All nodes are generic over an `info: T` slot so that downstream passes
//! (name resolution, type checking) can decorate the same tree with their
//! results. After parsing, `T` is always `()`.
//!
//! Every node carries exactly one `position: Span`; parent ranges always
//! contain the ranges of their children.

pub mod expression;
pub mod statement;
pub mod types;

use statement::Statement;

/// The parsed contents of one source file: an ordered sequence of
/// top-level statements.
///
/// This is the hand-off value to name resolution and type checking. A
/// `FileScope` returned together with a non-empty diagnostic list is
/// best-effort and must not be trusted semantically.
#[derive(Debug, Clone)]
pub struct FileScope<T> {
    pub statements: Vec<Statement<T>>,
}

impl<T> FileScope<T> {
    pub fn new(statements: Vec<Statement<T>>) -> Self {
        Self { statements }
    }
}
