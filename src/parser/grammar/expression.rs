//! Expression parsers: the precedence cascade over sections
//!
//! Lowest to highest binding: `and`/`or`, `==`/`!=` (non-associative),
//! `<`/`<=`/`>`/`>=` (non-associative), `+`/`-`, `*`/`/`/`%`, prefix
//! `-`/`!`, then the primaries. Each binary level classifies the next
//! section with a pure function and left-folds `(op, rhs)` pairs, so
//! chains stay left-associative without deep recursion.

use lachs::Span;

use crate::ast::expression::{
    BinOpKind, BinaryOp, Expression, FunctionBody, FunctionCall, FunctionLiteral, IfThenElse,
    Parameter, UnaryOp, UnaryOpKind,
};
use crate::lexer::Token;
use crate::parser::combinators::{
    many, optional, run_to_end, unbound_to, BoxedParser,
};
use crate::parser::error::ParseError;
use crate::parser::section::Section;
use crate::parser::state::{ParseResult, ParseState, Parser};

use super::literal::{ident, literal_or_variable};
use super::types::type_annotation;
use super::{
    brace_section, bracket_section, expect_arrow, expect_colon, expect_comma, expect_else,
    expect_if, expect_then, paren_section, parse_statements,
};

/// expression := logical
pub fn expression() -> BoxedParser<Section, Expression<()>> {
    logical()
}

/// logical := equality (("and" | "or") equality)*
fn logical() -> BoxedParser<Section, Expression<()>> {
    binary_level(equality, logical_op)
}

/// equality := comparison [("==" | "!=") comparison]
fn equality() -> BoxedParser<Section, Expression<()>> {
    binary_level_nonassoc(comparison, equality_op)
}

/// comparison := additive [("<" | "<=" | ">" | ">=") additive]
fn comparison() -> BoxedParser<Section, Expression<()>> {
    binary_level_nonassoc(additive, comparison_op)
}

/// additive := multiplicative (("+" | "-") multiplicative)*
fn additive() -> BoxedParser<Section, Expression<()>> {
    binary_level(multiplicative, additive_op)
}

/// multiplicative := unary (("*" | "/" | "%") unary)*
fn multiplicative() -> BoxedParser<Section, Expression<()>> {
    binary_level(unary, multiplicative_op)
}

// Operator recognition: one pure classifier per level. Anything that is
// not a matching atom is rejected, which ends the level's repetition
// without consuming.

fn logical_op(section: &Section) -> Option<BinOpKind> {
    match section {
        Section::Atom(Token::And(_)) => Some(BinOpKind::And),
        Section::Atom(Token::Or(_)) => Some(BinOpKind::Or),
        _ => None,
    }
}

fn equality_op(section: &Section) -> Option<BinOpKind> {
    match section {
        Section::Atom(Token::DoubleEquals(_)) => Some(BinOpKind::Eq),
        Section::Atom(Token::NotEquals(_)) => Some(BinOpKind::NotEq),
        _ => None,
    }
}

fn comparison_op(section: &Section) -> Option<BinOpKind> {
    match section {
        Section::Atom(Token::Less(_)) => Some(BinOpKind::Lt),
        Section::Atom(Token::LessEquals(_)) => Some(BinOpKind::LtEq),
        Section::Atom(Token::Greater(_)) => Some(BinOpKind::Gt),
        Section::Atom(Token::GreaterEquals(_)) => Some(BinOpKind::GtEq),
        _ => None,
    }
}

fn additive_op(section: &Section) -> Option<BinOpKind> {
    match section {
        Section::Atom(Token::Plus(_)) => Some(BinOpKind::Add),
        Section::Atom(Token::Minus(_)) => Some(BinOpKind::Sub),
        _ => None,
    }
}

fn multiplicative_op(section: &Section) -> Option<BinOpKind> {
    match section {
        Section::Atom(Token::Star(_)) => Some(BinOpKind::Mul),
        Section::Atom(Token::Slash(_)) => Some(BinOpKind::Div),
        Section::Atom(Token::Percent(_)) => Some(BinOpKind::Rem),
        _ => None,
    }
}

/// Left-associative binary level: parse the tighter level as `lhs`, then
/// greedily fold `(op, rhs)` pairs. A missing rhs after a consumed
/// operator is a committed failure.
fn binary_level(
    next: fn() -> BoxedParser<Section, Expression<()>>,
    classify: fn(&Section) -> Option<BinOpKind>,
) -> BoxedParser<Section, Expression<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let mut left = next().parse(state)?;
        loop {
            let op = match state.peek() {
                Some(section) => classify(section),
                None => None,
            };
            let Some(op) = op else {
                break;
            };
            state.advance();
            let right = next().parse(state)?;
            let position = left.pos().merge(&right.pos());
            left = Expression::BinaryOp(BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position,
                info: (),
            });
        }
        Ok(left)
    })
}

/// Non-associative binary level: at most one `(op, rhs)` pair. A second
/// operator of the same level is left for the caller to reject.
fn binary_level_nonassoc(
    next: fn() -> BoxedParser<Section, Expression<()>>,
    classify: fn(&Section) -> Option<BinOpKind>,
) -> BoxedParser<Section, Expression<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let left = next().parse(state)?;
        let op = match state.peek() {
            Some(section) => classify(section),
            None => None,
        };
        let Some(op) = op else {
            return Ok(left);
        };
        state.advance();
        let right = next().parse(state)?;
        let position = left.pos().merge(&right.pos());
        Ok(Expression::BinaryOp(BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            position,
            info: (),
        }))
    })
}

/// unary := ("-" | "!")* primary, right-nested so the leftmost operator
/// ends up outermost
fn unary() -> BoxedParser<Section, Expression<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let mut ops: Vec<(UnaryOpKind, Span)> = Vec::new();
        loop {
            let op = match state.peek() {
                Some(Section::Atom(Token::Minus(_))) => Some(UnaryOpKind::Neg),
                Some(Section::Atom(Token::Bang(_))) => Some(UnaryOpKind::Not),
                _ => None,
            };
            let Some(kind) = op else {
                break;
            };
            let Some(section) = state.advance() else {
                break;
            };
            ops.push((kind, section.pos()));
        }

        let operand = primary().parse(state)?;
        let expr = ops.into_iter().rev().fold(operand, |acc, (op, span)| {
            let position = span.merge(&acc.pos());
            Expression::UnaryOp(UnaryOp {
                op,
                operand: Box::new(acc),
                position,
                info: (),
            })
        });
        Ok(expr)
    })
}

/// primary := (literal | variable | "(" expression ")" | function_literal
///          | if_expression) call_suffix*
fn primary() -> BoxedParser<Section, Expression<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let base = literal_or_variable()
            .or(paren_expression())
            .or(function_literal().map(Expression::FunctionLiteral))
            .or(if_expression())
            .parse(state)?;
        call_suffixes(base, state)
    })
}

/// Fold `[args…]` suffixes onto a primary, left to right.
fn call_suffixes(
    mut expr: Expression<()>,
    state: &mut ParseState<Section>,
) -> ParseResult<Expression<()>> {
    while let Some((children, bracket_span)) = optional(bracket_section()).parse(state)? {
        let args = call_arguments(children, &bracket_span, state)?;
        let position = expr.pos().merge(&bracket_span);
        expr = Expression::FunctionCall(FunctionCall {
            func: Box::new(expr),
            args,
            position,
            info: (),
        });
    }
    Ok(expr)
}

/// The contents of a call's `[ … ]`: zero or more comma-separated
/// expressions, consumed to the end of the bracket.
fn call_arguments(
    children: Vec<Section>,
    bracket: &Span,
    outer: &mut ParseState<Section>,
) -> ParseResult<Vec<Expression<()>>> {
    if children.is_empty() {
        return Ok(Vec::new());
    }
    let mut state = ParseState::new(children);
    let result = run_to_end(&argument_list(), &mut state);
    for err in state.take_errors() {
        outer.collect_error(err);
    }
    result.map_err(unbound_to(ParseError::InvalidExpression {
        span: bracket.clone(),
    }))
}

/// call_args := expression ("," expression)*
fn argument_list() -> BoxedParser<Section, Vec<Expression<()>>> {
    (expression() + many(expect_comma() * expression())) >> |(first, rest)| {
        let mut args = vec![first];
        args.extend(rest);
        args
    }
}

/// A parenthesized expression: the paren's children parsed to the end as
/// one expression, returned with its range widened to the parens.
fn paren_expression() -> BoxedParser<Section, Expression<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let (children, paren_span) = paren_section().parse(state)?;
        let mut inner = ParseState::new(children);
        let result = run_to_end(&expression(), &mut inner);
        for err in inner.take_errors() {
            state.collect_error(err);
        }
        let expr = result.map_err(unbound_to(ParseError::ExpectedExpressionInParens {
            span: paren_span.clone(),
        }))?;
        Ok(expr.with_position(paren_span))
    })
}

/// function_literal := "[" [param ("," param)*] "]" ":" type "->" body
///
/// Shared with the `func` statement form, which binds one of these to a
/// name.
pub fn function_literal() -> BoxedParser<Section, FunctionLiteral<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let (children, bracket_span) = bracket_section().parse(state)?;
        let params = parameters(children, &bracket_span, state)?;

        expect_colon()
            .parse(state)
            .map_err(unbound_to(ParseError::MalformedFunctionLiteral {
                span: bracket_span.clone(),
            }))?;

        let ret_span = state
            .remaining_span()
            .unwrap_or_else(|| bracket_span.clone());
        let ret = type_annotation()
            .parse(state)
            .map_err(unbound_to(ParseError::MalformedTypeAnnotation {
                span: ret_span,
            }))?;

        expect_arrow()
            .parse(state)
            .map_err(unbound_to(ParseError::MalformedFunctionLiteral {
                span: bracket_span.merge(&ret.pos()),
            }))?;

        // body: a brace block of statements or a single expression
        if let Some((body_children, body_span)) = optional(brace_section()).parse(state)? {
            let (statements, errors) = parse_statements(body_children);
            for err in errors {
                state.collect_error(err);
            }
            let position = bracket_span.merge(&body_span);
            Ok(FunctionLiteral {
                params,
                ret,
                body: FunctionBody::Block(statements),
                position,
                info: (),
            })
        } else {
            let body_span = state
                .remaining_span()
                .unwrap_or_else(|| bracket_span.clone());
            let body = expression()
                .parse(state)
                .map_err(unbound_to(ParseError::InvalidExpression { span: body_span }))?;
            let position = bracket_span.merge(&body.pos());
            Ok(FunctionLiteral {
                params,
                ret,
                body: FunctionBody::Expression(Box::new(body)),
                position,
                info: (),
            })
        }
    })
}

/// The contents of a literal's parameter brackets.
fn parameters(
    children: Vec<Section>,
    bracket: &Span,
    outer: &mut ParseState<Section>,
) -> ParseResult<Vec<Parameter<()>>> {
    if children.is_empty() {
        return Ok(Vec::new());
    }
    let mut state = ParseState::new(children);
    let result = run_to_end(&parameter_list(), &mut state);
    for err in state.take_errors() {
        outer.collect_error(err);
    }
    result.map_err(unbound_to(ParseError::MalformedFunctionLiteral {
        span: bracket.clone(),
    }))
}

/// param := ident ":" type
fn parameter() -> BoxedParser<Section, Parameter<()>> {
    ((ident() - expect_colon()) + type_annotation()) >> |(name, ty)| {
        let position = name.position.merge(&ty.pos());
        Parameter { name, ty, position }
    }
}

/// params := param ("," param)*
fn parameter_list() -> BoxedParser<Section, Vec<Parameter<()>>> {
    (parameter() + many(expect_comma() * parameter())) >> |(first, rest)| {
        let mut params = vec![first];
        params.extend(rest);
        params
    }
}

/// if_expression := "if" expression "then" expression "else" expression
fn if_expression() -> BoxedParser<Section, Expression<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let keyword = expect_if().parse(state)?;

        let cond_span = state.remaining_span().unwrap_or_else(|| keyword.clone());
        let condition = expression()
            .parse(state)
            .map_err(unbound_to(ParseError::InvalidIfCondition { span: cond_span }))?;

        expect_then()
            .parse(state)
            .map_err(unbound_to(ParseError::ExpectedThen {
                span: keyword.merge(&condition.pos()),
            }))?;

        let then_span = state.remaining_span().unwrap_or_else(|| keyword.clone());
        let then_branch = expression()
            .parse(state)
            .map_err(unbound_to(ParseError::InvalidExpression { span: then_span }))?;

        expect_else()
            .parse(state)
            .map_err(unbound_to(ParseError::ExpectedElse {
                span: keyword.merge(&then_branch.pos()),
            }))?;

        let else_span = state.remaining_span().unwrap_or_else(|| keyword.clone());
        let else_branch = expression()
            .parse(state)
            .map_err(unbound_to(ParseError::InvalidExpression { span: else_span }))?;

        let position = keyword.merge(&else_branch.pos());
        Ok(Expression::IfThenElse(IfThenElse {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            position,
            info: (),
        }))
    })
}
