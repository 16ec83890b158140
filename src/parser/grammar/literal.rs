//! Atom parsers: literals and identifiers

use crate::ast::expression::{
    Boolean, Character, Double, Expression, Ident, Integer, StringLiteral,
};
use crate::lexer::Token;
use crate::parser::combinators::{next_if, BoxedParser};
use crate::parser::section::Section;

/// Parse an identifier atom
pub fn ident() -> BoxedParser<Section, Ident<()>> {
    next_if(|section| match section {
        Section::Atom(Token::Ident(inner)) => Some(Ident {
            value: inner.value.clone(),
            position: inner.position.clone(),
            info: (),
        }),
        _ => None,
    })
}

/// Parse any literal atom or a variable reference.
///
/// A numeric literal that does not fit its value type is rejected
/// non-consumingly, like any other mismatch.
pub fn literal_or_variable() -> BoxedParser<Section, Expression<()>> {
    next_if(|section| {
        let Section::Atom(token) = section else {
            return None;
        };
        match token {
            Token::Integer(inner) => inner.value.parse().ok().map(|value| {
                Expression::Integer(Integer {
                    value,
                    position: inner.position.clone(),
                    info: (),
                })
            }),
            Token::Double(inner) => inner.value.parse().ok().map(|value| {
                Expression::Double(Double {
                    value,
                    position: inner.position.clone(),
                    info: (),
                })
            }),
            Token::True(inner) => Some(Expression::Boolean(Boolean {
                value: true,
                position: inner.position.clone(),
                info: (),
            })),
            Token::False(inner) => Some(Expression::Boolean(Boolean {
                value: false,
                position: inner.position.clone(),
                info: (),
            })),
            Token::Character(inner) => unescape_char(&inner.value).map(|value| {
                Expression::Character(Character {
                    value,
                    position: inner.position.clone(),
                    info: (),
                })
            }),
            Token::StringLiteral(inner) => Some(Expression::String(StringLiteral {
                value: unescape_string(&inner.value),
                position: inner.position.clone(),
                info: (),
            })),
            Token::Ident(inner) => Some(Expression::Ident(Ident {
                value: inner.value.clone(),
                position: inner.position.clone(),
                info: (),
            })),
            _ => None,
        }
    })
}

/// `'a'` or `'\n'`, quotes included, to the character it denotes.
fn unescape_char(raw: &str) -> Option<char> {
    let body = raw.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = body.chars();
    let first = chars.next()?;
    let value = if first == '\\' {
        unescape(chars.next()?)
    } else {
        first
    };
    if chars.next().is_some() {
        return None;
    }
    Some(value)
}

/// Strip the quotes and resolve escape sequences.
fn unescape_string(raw: &str) -> String {
    let body = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw);
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(esc) => value.push(unescape(esc)),
                None => value.push('\\'),
            }
        } else {
            value.push(c);
        }
    }
    value
}

fn unescape(esc: char) -> char {
    match esc {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}
