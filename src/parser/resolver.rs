//! Operator precedence resolution
//!
//! Each list is split at its loosest-binding operator and both sides are
//! resolved, so the operator found first ends up at the root of the tree.
//!
//! # Tie-breaks
//!
//! The loosest operator is the rightmost one with the lowest precedence. A
//! binary chain at one precedence level (`A - B - C`) is folded left, giving
//! `(A - B) - C`. A unary operator must be the first element of its list;
//! only `++`/`--` may instead be the last. Stacked prefixes like `!!A` are
//! therefore rejected unless bracketed as `!(!A)`.
//!
//! Nesting is limited to [`MAX_NESTING_DEPTH`] levels.

use super::ast::{CppExpression, CppOperator, Span, MAX_NESTING_DEPTH};
use super::structure::{Element, ExpressionList};
use crate::error::{ExpressionFormatError, Result};
use std::mem;

/// Resolve an element into an expression tree without any lists left.
pub(crate) fn resolve(element: Element) -> Result<CppExpression> {
    resolve_at(element, 0)
}

fn resolve_at(element: Element, depth: usize) -> Result<CppExpression> {
    match element {
        Element::Variable(name, _) => Ok(CppExpression::Variable(name)),
        Element::Literal(value, _) => Ok(CppExpression::NumberLiteral(value)),
        Element::List(list) => resolve_list(list, depth + 1),
        Element::Call { name, arg, .. } => {
            let arg = arg
                .map(|arg| resolve_at(*arg, depth + 1).map(Box::new))
                .transpose()?;
            Ok(CppExpression::FunctionCall { name, arg })
        }
        Element::Operator(op, span) => Err(ExpressionFormatError::resolution(
            format!("Expected operand for operator '{}'", op),
            Some(span.start),
        )),
    }
}

fn too_deep(position: usize) -> ExpressionFormatError {
    ExpressionFormatError::resolution(
        format!("Expression nested deeper than {} levels", MAX_NESTING_DEPTH),
        Some(position),
    )
}

fn resolve_list(list: ExpressionList, depth: usize) -> Result<CppExpression> {
    let ExpressionList { mut items, span } = list;

    if depth > MAX_NESTING_DEPTH {
        return Err(too_deep(span.start));
    }

    if items.len() <= 1 {
        return match items.pop() {
            Some(only) => resolve_at(only, depth),
            None => Err(ExpressionFormatError::resolution(
                "Expected expression",
                Some(span.start),
            )),
        };
    }

    let Some((index, op, op_span)) = loosest_operator(&items) else {
        return Err(ExpressionFormatError::resolution(
            "Couldn't find operator",
            Some(items[1].span().start),
        ));
    };

    if op.is_unary() {
        bind_unary(items, index, op, op_span, span, depth)
    } else {
        fold_chain(items, op.precedence(), span, depth)
    }
}

/// The rightmost operator with the lowest precedence, and its index.
fn loosest_operator(items: &[Element]) -> Option<(usize, CppOperator, Span)> {
    let mut best: Option<(usize, CppOperator, Span)> = None;

    for (index, element) in items.iter().enumerate() {
        let Element::Operator(op, op_span) = element else {
            continue;
        };
        if best.map_or(true, |(_, lowest, _)| op.precedence() <= lowest.precedence()) {
            best = Some((index, *op, *op_span));
        }
    }

    best
}

fn bind_unary(
    mut items: Vec<Element>,
    index: usize,
    op: CppOperator,
    op_span: Span,
    span: Span,
    depth: usize,
) -> Result<CppExpression> {
    let postfix = op.is_postfix_capable() && index == items.len() - 1;
    if index != 0 && !postfix {
        return Err(ExpressionFormatError::resolution(
            "Found elements on wrong side of unary operator",
            Some(op_span.start),
        ));
    }

    items.remove(index);
    let operand = resolve_list(ExpressionList { items, span }, depth + 1)?;
    Ok(CppExpression::unary(op, operand))
}

/// Resolve a list whose loosest operators are binary ones of `precedence`,
/// nesting them to the left.
fn fold_chain(
    items: Vec<Element>,
    precedence: u8,
    span: Span,
    depth: usize,
) -> Result<CppExpression> {
    let operators: Vec<(usize, CppOperator, Span)> = items
        .iter()
        .enumerate()
        .filter_map(|(index, element)| match element {
            Element::Operator(op, op_span) if op.precedence() == precedence => {
                Some((index, *op, *op_span))
            }
            _ => None,
        })
        .collect();

    // rightmost first, the order a recursive split would report them in
    let last = items.len() - 1;
    for (i, (index, _, op_span)) in operators.iter().enumerate().rev() {
        let right_empty = match operators.get(i + 1) {
            Some((next, _, _)) => *next == index + 1,
            None => *index == last,
        };
        if right_empty || *index == 0 {
            return Err(ExpressionFormatError::resolution(
                "Didn't find elements on both sides of binary operator",
                Some(op_span.start),
            ));
        }
    }

    let chain_depth = depth + operators.len();
    if chain_depth > MAX_NESTING_DEPTH {
        return Err(too_deep(operators[0].2.start));
    }

    let mut segments: Vec<Vec<Element>> = Vec::with_capacity(operators.len() + 1);
    let mut current = Vec::new();
    for element in items {
        match element {
            Element::Operator(op, _) if op.precedence() == precedence => {
                segments.push(mem::take(&mut current));
            }
            other => current.push(other),
        }
    }
    segments.push(current);

    let mut segments = segments.into_iter();
    let head = segments.next().unwrap_or_default();
    let mut expression = resolve_list(ExpressionList { items: head, span }, chain_depth)?;

    for (i, ((_, op, _), segment)) in operators.iter().zip(segments).enumerate() {
        let right = resolve_list(ExpressionList { items: segment, span }, chain_depth - i)?;
        expression = CppExpression::binary(expression, *op, right);
    }

    Ok(expression)
}
