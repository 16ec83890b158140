//! # Sectioning
//!
//! The bracket-matching pass between lexing and parsing: a flat token
//! stream becomes a tree of *sections*. `(`/`)`, `[`/`]` and `{`/`}`
//! open and close nested sections; every other token passes through as
//! an atom. The bracket tokens themselves are consumed.
//!
//! The output is well-nested no matter how broken the input is: a
//! mismatched closer still closes its frame, a closer with no open frame
//! is reported and skipped, and frames left open at end of input are
//! closed where their contents end. Errors ride alongside the tree
//! rather than replacing it.

use lachs::Span;

use crate::lexer::Token;
use crate::span::Spanned;

use super::error::ParseError;

/// A token or a balanced bracket group over tokens.
#[derive(Debug, Clone)]
pub enum Section {
    Atom(Token),
    Paren {
        children: Vec<Section>,
        position: Span,
    },
    Bracket {
        children: Vec<Section>,
        position: Span,
    },
    Brace {
        children: Vec<Section>,
        position: Span,
    },
}

impl Section {
    pub fn pos(&self) -> Span {
        match self {
            Section::Atom(token) => token.pos(),
            Section::Paren { position, .. }
            | Section::Bracket { position, .. }
            | Section::Brace { position, .. } => position.clone(),
        }
    }
}

impl Spanned for Section {
    fn pos(&self) -> Span {
        Section::pos(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BracketKind {
    Paren,
    Bracket,
    Brace,
}

/// One open bracket and the children gathered so far.
struct Frame {
    kind: BracketKind,
    opener: Span,
    children: Vec<Section>,
}

impl Frame {
    /// Close this frame into a section spanning opener through `end`.
    /// A mismatched closer keeps the opener's kind.
    fn close(self, end: &Span) -> Section {
        let position = self.opener.merge(end);
        match self.kind {
            BracketKind::Paren => Section::Paren {
                children: self.children,
                position,
            },
            BracketKind::Bracket => Section::Bracket {
                children: self.children,
                position,
            },
            BracketKind::Brace => Section::Brace {
                children: self.children,
                position,
            },
        }
    }
}

/// Promote a token stream into a section tree.
///
/// Always returns a tree; bracket faults are reported in the error list
/// and repaired in place so parsing can continue on the result.
pub fn sectionize(tokens: Vec<Token>) -> (Vec<Section>, Vec<ParseError>) {
    let mut errors = Vec::new();
    let mut root: Vec<Section> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for token in tokens {
        let opener = match &token {
            Token::LParen(_) => Some(BracketKind::Paren),
            Token::LBracket(_) => Some(BracketKind::Bracket),
            Token::LBrace(_) => Some(BracketKind::Brace),
            _ => None,
        };
        if let Some(kind) = opener {
            stack.push(Frame {
                kind,
                opener: token.pos(),
                children: Vec::new(),
            });
            continue;
        }

        let closer = match &token {
            Token::RParen(_) => Some(BracketKind::Paren),
            Token::RBracket(_) => Some(BracketKind::Bracket),
            Token::RBrace(_) => Some(BracketKind::Brace),
            _ => None,
        };
        if let Some(kind) = closer {
            match stack.pop() {
                Some(frame) => {
                    if frame.kind != kind {
                        errors.push(ParseError::MismatchedBracket {
                            opener: frame.opener.clone(),
                            closer: token.pos(),
                        });
                    }
                    let section = frame.close(&token.pos());
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(section),
                        None => root.push(section),
                    }
                }
                None => errors.push(ParseError::UnmatchedClosingBracket {
                    closer: token.pos(),
                }),
            }
            continue;
        }

        match stack.last_mut() {
            Some(frame) => frame.children.push(Section::Atom(token)),
            None => root.push(Section::Atom(token)),
        }
    }

    // Frames still open at end of input collapse innermost first, each
    // closed where its gathered contents end.
    while let Some(frame) = stack.pop() {
        errors.push(ParseError::UnclosedBracket {
            opener: frame.opener.clone(),
        });
        let end = frame
            .children
            .last()
            .map(|child| child.pos())
            .unwrap_or_else(|| frame.opener.clone());
        let section = frame.close(&end);
        match stack.last_mut() {
            Some(parent) => parent.children.push(section),
            None => root.push(section),
        }
    }

    (root, errors)
}
