//! Type annotation parsers

use crate::ast::types::{FunctionType, NamedType, TypeAnnotation};
use crate::lexer::Token;
use crate::parser::combinators::{many, next_if, run_to_end, unbound_to, BoxedParser};
use crate::parser::error::ParseError;
use crate::parser::section::Section;
use crate::parser::state::{ParseState, Parser};

use super::{bracket_section, expect_colon, expect_comma};

/// type := NAME | "[" [type ("," type)*] "]" ":" type
pub fn type_annotation() -> BoxedParser<Section, TypeAnnotation> {
    named_type().or(function_type())
}

fn named_type() -> BoxedParser<Section, TypeAnnotation> {
    next_if(|section| match section {
        Section::Atom(Token::Ident(inner)) => Some(TypeAnnotation::Named(NamedType {
            name: inner.value.clone(),
            position: inner.position.clone(),
        })),
        _ => None,
    })
}

fn function_type() -> BoxedParser<Section, TypeAnnotation> {
    BoxedParser::new(move |state: &mut ParseState<Section>| {
        let (children, bracket_span) = bracket_section().parse(state)?;

        let params = if children.is_empty() {
            Vec::new()
        } else {
            let mut inner = ParseState::new(children);
            let result = run_to_end(&type_list(), &mut inner);
            for err in inner.take_errors() {
                state.collect_error(err);
            }
            result.map_err(unbound_to(ParseError::MalformedTypeAnnotation {
                span: bracket_span.clone(),
            }))?
        };

        expect_colon()
            .parse(state)
            .map_err(unbound_to(ParseError::MalformedTypeAnnotation {
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

        let position = bracket_span.merge(&ret.pos());
        Ok(TypeAnnotation::Function(FunctionType {
            params,
            ret: Box::new(ret),
            position,
        }))
    })
}

/// type_list := type ("," type)*
fn type_list() -> BoxedParser<Section, Vec<TypeAnnotation>> {
    (type_annotation() + many(expect_comma() * type_annotation())) >> |(first, rest)| {
        let mut types = vec![first];
        types.extend(rest);
        types
    }
}
