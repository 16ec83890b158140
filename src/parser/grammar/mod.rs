//! Grammar for the brackish language
//!
//! Parsing rules over the section tree, organized by category:
//! - `literal`: atoms (identifiers, numbers, booleans, characters, strings)
//! - `types`: written type annotations
//! - `expression`: the precedence cascade and the primary forms
//! - `statement`: keyword-dispatched statement forms
//!
//! This module owns the statement-group discipline: a file (or a brace
//! body) is split at top-level `;` atoms, each group is parsed
//! independently, and errors from sibling groups accumulate instead of
//! short-circuiting.

mod expression;
mod literal;
mod statement;
mod types;

use lachs::Span;

use crate::ast::statement::Statement;
use crate::ast::FileScope;
use crate::lexer::Token;
use crate::span::span_of;

use super::combinators::{next_if, BoxedParser};
use super::error::ParseError;
use super::section::{sectionize, Section};
use super::state::{ParseState, Parser};

use statement::statement;

pub use expression::expression;

/// Run the whole pipeline on a token stream: sectioning, then parsing.
///
/// The tree is always returned; callers must consult the diagnostic list
/// before trusting it semantically.
pub fn parse(tokens: Vec<Token>) -> (FileScope<()>, Vec<ParseError>) {
    let (sections, mut errors) = sectionize(tokens);
    let (scope, parse_errors) = parse_sections(sections);
    errors.extend(parse_errors);

    // The unbound sentinel is grammar-internal; one escaping this far is
    // a bug, reported instead of leaked.
    let errors = errors
        .into_iter()
        .map(|err| {
            if err.is_unbound() {
                ParseError::internal("unbound parse error escaped the grammar", None)
            } else {
                err
            }
        })
        .collect();

    (scope, errors)
}

/// Parse an already-sectioned top-level file.
pub fn parse_sections(sections: Vec<Section>) -> (FileScope<()>, Vec<ParseError>) {
    let (statements, errors) = parse_statements(sections);
    (FileScope::new(statements), errors)
}

/// Parse a section sequence as a statement list: the top-level file or
/// the body of a brace section.
pub(super) fn parse_statements(sections: Vec<Section>) -> (Vec<Statement<()>>, Vec<ParseError>) {
    let mut statements = Vec::new();
    let mut errors = Vec::new();

    let (groups, trailing) = split_groups(sections);
    for group in groups {
        parse_group(group, &mut statements, &mut errors);
    }
    if let Some(group) = trailing {
        if let Some(span) = span_of(&group) {
            errors.push(ParseError::ExpectedSemicolon { span });
        }
        parse_group(group, &mut statements, &mut errors);
    }

    (statements, errors)
}

/// Split a section sequence at top-level `;` atoms. The `;` is consumed
/// and belongs to no group. A brace section at the start of a group
/// delimits itself, so blocks need no terminator.
///
/// Returns the terminated groups and, separately, a trailing group that
/// was not terminated.
fn split_groups(sections: Vec<Section>) -> (Vec<Vec<Section>>, Option<Vec<Section>>) {
    let mut groups = Vec::new();
    let mut current: Vec<Section> = Vec::new();

    for section in sections {
        match section {
            Section::Atom(Token::Semicolon(_)) => {
                groups.push(std::mem::take(&mut current));
            }
            Section::Brace { .. } if current.is_empty() => {
                groups.push(vec![section]);
            }
            _ => current.push(section),
        }
    }

    let trailing = if current.is_empty() {
        None
    } else {
        Some(current)
    };
    (groups, trailing)
}

/// Parse one statement group, appending the statement (best-effort) and
/// any diagnostics. Empty groups are skipped.
fn parse_group(
    group: Vec<Section>,
    statements: &mut Vec<Statement<()>>,
    errors: &mut Vec<ParseError>,
) {
    let Some(group_span) = span_of(&group) else {
        return;
    };

    let mut state = ParseState::new(group);
    let result = statement().parse(&mut state);
    errors.extend(state.take_errors());

    match result {
        Ok(stmt) => {
            if let Some(span) = state.remaining_span() {
                errors.push(ParseError::TrailingSections { span });
            }
            statements.push(stmt);
        }
        Err(err) if err.is_unbound() => {
            errors.push(ParseError::InvalidExpression { span: group_span });
        }
        Err(err) => errors.push(err),
    }
}

/// Parse an `if` branch: a lone brace section opens a nested scope, any
/// other non-empty slice is a single statement.
fn parse_branch(mut sections: Vec<Section>, errors: &mut Vec<ParseError>) -> Vec<Statement<()>> {
    if sections.is_empty() {
        return Vec::new();
    }
    if sections.len() == 1 {
        if let Some(Section::Brace { .. }) = sections.first() {
            if let Some(Section::Brace { children, .. }) = sections.pop() {
                let (statements, errs) = parse_statements(children);
                errors.extend(errs);
                return statements;
            }
        }
    }

    let mut statements = Vec::new();
    parse_group(sections, &mut statements, errors);
    statements
}

// === Section-level primitives shared by the grammar ===

fn atom_span(pred: fn(&Token) -> bool) -> BoxedParser<Section, Span> {
    next_if(move |section| match section {
        Section::Atom(token) if pred(token) => Some(token.pos()),
        _ => None,
    })
}

fn expect_print() -> BoxedParser<Section, Span> {
    atom_span(|token| matches!(token, Token::Print(_)))
}

fn expect_let() -> BoxedParser<Section, Span> {
    atom_span(|token| matches!(token, Token::Let(_)))
}

fn expect_mut() -> BoxedParser<Section, Span> {
    atom_span(|token| matches!(token, Token::Mut(_)))
}

fn expect_func() -> BoxedParser<Section, Span> {
    atom_span(|token| matches!(token, Token::Func(_)))
}

fn expect_return() -> BoxedParser<Section, Span> {
    atom_span(|token| matches!(token, Token::Return(_)))
}

fn expect_if() -> BoxedParser<Section, Span> {
    atom_span(|token| matches!(token, Token::If(_)))
}

fn expect_then() -> BoxedParser<Section, Span> {
    atom_span(|token| matches!(token, Token::Then(_)))
}

fn expect_else() -> BoxedParser<Section, Span> {
    atom_span(|token| matches!(token, Token::Else(_)))
}

fn expect_equals() -> BoxedParser<Section, Span> {
    atom_span(|token| matches!(token, Token::Equals(_)))
}

fn expect_colon() -> BoxedParser<Section, Span> {
    atom_span(|token| matches!(token, Token::Colon(_)))
}

fn expect_arrow() -> BoxedParser<Section, Span> {
    atom_span(|token| matches!(token, Token::Arrow(_)))
}

fn expect_comma() -> BoxedParser<Section, Span> {
    atom_span(|token| matches!(token, Token::Comma(_)))
}

fn paren_section() -> BoxedParser<Section, (Vec<Section>, Span)> {
    next_if(|section| match section {
        Section::Paren { children, position } => Some((children.clone(), position.clone())),
        _ => None,
    })
}

fn bracket_section() -> BoxedParser<Section, (Vec<Section>, Span)> {
    next_if(|section| match section {
        Section::Bracket { children, position } => Some((children.clone(), position.clone())),
        _ => None,
    })
}

fn brace_section() -> BoxedParser<Section, (Vec<Section>, Span)> {
    next_if(|section| match section {
        Section::Brace { children, position } => Some((children.clone(), position.clone())),
        _ => None,
    })
}
