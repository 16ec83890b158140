//! Statement parsers for the brackish language

use lachs::Span;

use crate::ast::statement::{
    Block, FuncDeclaration, IfStatement, LetDeclaration, MutAssignment, PrintStatement,
    ReturnStatement, Statement,
};
use crate::lexer::Token;
use crate::parser::combinators::{optional, run_to_end, unbound_to, BoxedParser};
use crate::parser::error::ParseError;
use crate::parser::section::Section;
use crate::parser::state::{ParseState, Parser};
use crate::span::span_of;

use super::expression::{expression, function_literal};
use super::literal::ident;
use super::types::type_annotation;
use super::{
    brace_section, expect_colon, expect_equals, expect_func, expect_if, expect_let, expect_mut,
    expect_print, expect_return, expect_then, parse_branch,
};

/// The first section of a group selects the statement form.
pub fn statement() -> BoxedParser<Section, Statement<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let form = match state.peek() {
            Some(Section::Atom(Token::Print(_))) => print_statement(),
            Some(Section::Atom(Token::Let(_))) => let_statement(),
            Some(Section::Atom(Token::Mut(_))) => mut_statement(),
            Some(Section::Atom(Token::Func(_))) => func_statement(),
            Some(Section::Atom(Token::Return(_))) => return_statement(),
            Some(Section::Atom(Token::If(_))) => if_statement(),
            Some(Section::Brace { .. }) => block_statement(),
            Some(_) => expression_statement(),
            None => return Err(ParseError::Unbound),
        };
        form.parse(state)
    })
}

/// The whole group's range, for `…Malformed` diagnostics.
fn group_span(keyword: &Span, state: &ParseState<Section>) -> Span {
    match state.remaining_span() {
        Some(rest) => keyword.merge(&rest),
        None => keyword.clone(),
    }
}

/// print_statement := "print" expression
fn print_statement() -> BoxedParser<Section, Statement<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let keyword = expect_print().parse(state)?;
        let Some(tail) = state.remaining_span() else {
            return Err(ParseError::EmptyPrintExpression { span: keyword });
        };
        let value = run_to_end(&expression(), state)
            .map_err(unbound_to(ParseError::InvalidPrintExpression { span: tail }))?;
        let position = keyword.merge(&value.pos());
        Ok(Statement::Print(PrintStatement {
            value: Box::new(value),
            position,
            info: (),
        }))
    })
}

/// let_statement := "let" ident [":" type] "=" expression
fn let_statement() -> BoxedParser<Section, Statement<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let keyword = expect_let().parse(state)?;
        let malformed = ParseError::MalformedLetDeclaration {
            span: group_span(&keyword, state),
        };

        let name = ident().parse(state).map_err(unbound_to(malformed.clone()))?;
        let annotation = optional(expect_colon().bind(|colon| {
            type_annotation().map_unbound(move || ParseError::MalformedTypeAnnotation {
                span: colon.clone(),
            })
        }))
        .parse(state)?;
        let equals = expect_equals().parse(state).map_err(unbound_to(malformed))?;

        let Some(tail) = state.remaining_span() else {
            return Err(ParseError::EmptyLetExpression {
                span: keyword.merge(&equals),
            });
        };
        let value = run_to_end(&expression(), state)
            .map_err(unbound_to(ParseError::InvalidLetExpression { span: tail }))?;

        let position = keyword.merge(&value.pos());
        Ok(Statement::Let(LetDeclaration {
            name,
            annotation,
            value: Box::new(value),
            position,
            info: (),
        }))
    })
}

/// mut_statement := "mut" ident "=" expression
fn mut_statement() -> BoxedParser<Section, Statement<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let keyword = expect_mut().parse(state)?;
        let malformed = ParseError::MalformedMutAssignment {
            span: group_span(&keyword, state),
        };

        let name = ident().parse(state).map_err(unbound_to(malformed.clone()))?;
        let equals = expect_equals().parse(state).map_err(unbound_to(malformed))?;

        let Some(tail) = state.remaining_span() else {
            return Err(ParseError::EmptyMutExpression {
                span: keyword.merge(&equals),
            });
        };
        let value = run_to_end(&expression(), state)
            .map_err(unbound_to(ParseError::InvalidMutExpression { span: tail }))?;

        let position = keyword.merge(&value.pos());
        Ok(Statement::MutAssign(MutAssignment {
            name,
            value: Box::new(value),
            position,
            info: (),
        }))
    })
}

/// func_statement := "func" ident "=" function_literal
fn func_statement() -> BoxedParser<Section, Statement<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let keyword = expect_func().parse(state)?;
        let malformed = ParseError::MalformedFuncDeclaration {
            span: group_span(&keyword, state),
        };

        let name = ident().parse(state).map_err(unbound_to(malformed.clone()))?;
        expect_equals()
            .parse(state)
            .map_err(unbound_to(malformed.clone()))?;

        let Some(tail) = state.remaining_span() else {
            return Err(malformed);
        };
        let literal = run_to_end(&function_literal(), state)
            .map_err(unbound_to(ParseError::InvalidFuncExpression { span: tail }))?;

        let position = keyword.merge(&literal.position);
        Ok(Statement::FuncDecl(FuncDeclaration {
            name,
            literal,
            position,
            info: (),
        }))
    })
}

/// return_statement := "return" [expression]
fn return_statement() -> BoxedParser<Section, Statement<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let keyword = expect_return().parse(state)?;
        let Some(tail) = state.remaining_span() else {
            return Ok(Statement::Return(ReturnStatement {
                value: None,
                position: keyword,
                info: (),
            }));
        };
        let value = run_to_end(&expression(), state)
            .map_err(unbound_to(ParseError::InvalidReturnExpression { span: tail }))?;
        let position = keyword.merge(&value.pos());
        Ok(Statement::Return(ReturnStatement {
            value: Some(Box::new(value)),
            position,
            info: (),
        }))
    })
}

/// if_statement := "if" expression "then" branch ["else" branch]
///
/// The branches take the rest of the group, split at its first top-level
/// `else`; each branch is a brace block or a single statement.
fn if_statement() -> BoxedParser<Section, Statement<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let keyword = expect_if().parse(state)?;

        let cond_span = state.remaining_span().unwrap_or_else(|| keyword.clone());
        let condition = expression()
            .parse(state)
            .map_err(unbound_to(ParseError::InvalidIfCondition { span: cond_span }))?;

        let then_kw = expect_then()
            .parse(state)
            .map_err(unbound_to(ParseError::ExpectedThen {
                span: keyword.merge(&condition.pos()),
            }))?;

        let (then_sections, else_sections) = split_at_else(state.take_rest());
        let mut branch_errors = Vec::new();
        let then_branch = parse_branch(then_sections, &mut branch_errors);
        let else_branch = else_sections.map(|sections| parse_branch(sections, &mut branch_errors));
        for err in branch_errors {
            state.collect_error(err);
        }

        let mut position = keyword.merge(&then_kw);
        if let Some(span) = span_of(&then_branch) {
            position = position.merge(&span);
        }
        if let Some(branch) = &else_branch {
            if let Some(span) = span_of(branch) {
                position = position.merge(&span);
            }
        }

        Ok(Statement::If(IfStatement {
            condition: Box::new(condition),
            then_branch,
            else_branch,
            position,
            info: (),
        }))
    })
}

/// Split branch sections at the first top-level `else` atom; elses inside
/// nested sections stay put.
fn split_at_else(sections: Vec<Section>) -> (Vec<Section>, Option<Vec<Section>>) {
    let mut iter = sections.into_iter();
    let mut then_sections = Vec::new();
    while let Some(section) = iter.next() {
        if matches!(&section, Section::Atom(Token::Else(_))) {
            return (then_sections, Some(iter.collect()));
        }
        then_sections.push(section);
    }
    (then_sections, None)
}

/// block_statement := "{" statement* "}"
fn block_statement() -> BoxedParser<Section, Statement<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let (children, position) = brace_section().parse(state)?;
        let (statements, errors) = super::parse_statements(children);
        for err in errors {
            state.collect_error(err);
        }
        Ok(Statement::Block(Block {
            statements,
            position,
            info: (),
        }))
    })
}

/// A bare expression evaluated for effect.
fn expression_statement() -> BoxedParser<Section, Statement<()>> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let Some(entry) = state.remaining_span() else {
            return Err(ParseError::Unbound);
        };
        let expr = expression()
            .parse(state)
            .map_err(unbound_to(ParseError::InvalidExpression { span: entry }))?;
        Ok(Statement::Expression(expr))
    })
}
