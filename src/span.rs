//! Source ranges and the `Spanned` trait.
//!
//! Every syntactic entity in brackish carries exactly one [`lachs::Span`].
//! Ranges compose by union: `a.merge(&b)` spans from the earlier start to
//! the later end. This module provides the trait that tokens, sections and
//! AST nodes implement so the parser can merge ranges uniformly.

use lachs::Span;

/// Anything that occupies a contiguous source range.
pub trait Spanned {
    /// The source range of this entity.
    fn pos(&self) -> Span;
}

/// Union of the ranges of a slice, left to right.
///
/// Returns `None` for an empty slice; there is no such thing as an empty
/// range.
pub fn span_of<S: Spanned>(items: &[S]) -> Option<Span> {
    let mut iter = items.iter();
    let first = iter.next()?.pos();
    Some(iter.fold(first, |acc, item| acc.merge(&item.pos())))
}
