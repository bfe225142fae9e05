//! Bracket structure
//!
//! Turns the token stream into nested [`ExpressionList`]s, one per bracket
//! pair. Nothing here knows about precedence; operators are placed in the
//! lists exactly where they appeared.

use super::ast::{CppOperator, Span, MAX_NESTING_DEPTH};
use super::lexer::Token;
use crate::error::{ExpressionFormatError, Result};
use crate::number::Number;
use std::mem;

/// Node of the intermediate tree built before operators are resolved
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Element {
    Variable(String, Span),
    Literal(Number, Span),
    /// Operator whose operands are still its neighbours in the enclosing list
    Operator(CppOperator, Span),
    List(ExpressionList),
    /// Produced by call detection; an argument with several elements stays a
    /// list until it is resolved
    Call {
        name: String,
        arg: Option<Box<Element>>,
        span: Span,
    },
}

impl Element {
    pub(crate) fn span(&self) -> Span {
        match self {
            Element::Variable(_, span)
            | Element::Literal(_, span)
            | Element::Operator(_, span)
            | Element::Call { span, .. } => *span,
            Element::List(list) => list.span,
        }
    }
}

/// Elements between one pair of brackets (or of the whole condition)
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ExpressionList {
    pub(crate) items: Vec<Element>,
    pub(crate) span: Span,
}

impl ExpressionList {
    pub(crate) fn new(start: usize) -> Self {
        Self {
            items: Vec::new(),
            span: Span::new(start, 0),
        }
    }
}

/// Build the bracket structure.
///
/// `source_len` is the condition length in characters; a missing closing
/// bracket is reported there. A root list with a single element is unwrapped.
pub(crate) fn build(tokens: Vec<Token>, source_len: usize) -> Result<Element> {
    let mut current = ExpressionList::new(0);
    let mut parents: Vec<ExpressionList> = Vec::new();

    for token in tokens {
        match token {
            Token::LParen(span) => {
                if parents.len() >= MAX_NESTING_DEPTH {
                    return Err(ExpressionFormatError::structure(
                        format!("Brackets nested deeper than {} levels", MAX_NESTING_DEPTH),
                        span.start,
                    ));
                }
                parents.push(mem::replace(&mut current, ExpressionList::new(span.start)));
            }
            Token::RParen(span) => {
                let Some(parent) = parents.pop() else {
                    return Err(ExpressionFormatError::structure(
                        "Unbalanced brackets (too many closing)",
                        span.start,
                    ));
                };
                let mut finished = mem::replace(&mut current, parent);
                finished.span = Span::new(finished.span.start, span.end() - finished.span.start);
                current.items.push(Element::List(finished));
            }
            Token::Ident(name, span) => current.items.push(Element::Variable(name, span)),
            Token::Literal(value, span) => current.items.push(Element::Literal(value, span)),
            Token::Op(op, span) => current.items.push(Element::Operator(op, span)),
        }
    }

    if !parents.is_empty() {
        return Err(ExpressionFormatError::structure(
            "Unbalanced brackets (missing closing)",
            source_len,
        ));
    }

    current.span = Span::new(0, source_len);
    if current.items.len() == 1 {
        if let Some(only) = current.items.pop() {
            return Ok(only);
        }
    }
    Ok(Element::List(current))
}
