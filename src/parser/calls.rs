//! Function-call detection
//!
//! A name directly followed by a bracket group is a call: `IS_ENABLED(A)`,
//! `defined (A)`. `defined` may also take a bare name, as in `defined A`.

use super::ast::DEFINED;
use super::structure::{Element, ExpressionList};

/// Merge calls, innermost lists first.
pub(crate) fn detect_calls(element: Element) -> Element {
    match element {
        Element::List(list) => Element::List(detect_in_list(list)),
        other => other,
    }
}

fn detect_in_list(list: ExpressionList) -> ExpressionList {
    let ExpressionList { items, span } = list;

    // nested lists are rewritten before this level is scanned
    let mut items = items.into_iter().map(detect_calls).peekable();
    let mut merged = Vec::with_capacity(items.len());

    while let Some(element) = items.next() {
        let Element::Variable(name, name_span) = element else {
            merged.push(element);
            continue;
        };

        if let Some(Element::List(args)) = items.next_if(|next| matches!(next, Element::List(_))) {
            let span = name_span.to(args.span);
            merged.push(Element::Call {
                name,
                arg: unpack_arguments(args),
                span,
            });
            continue;
        }

        if name == DEFINED {
            if let Some(arg) = items.next_if(|next| matches!(next, Element::Variable(..))) {
                let span = name_span.to(arg.span());
                merged.push(Element::Call {
                    name,
                    arg: Some(Box::new(arg)),
                    span,
                });
                continue;
            }
        }

        merged.push(Element::Variable(name, name_span));
    }

    ExpressionList {
        items: merged,
        span,
    }
}

/// `f()` has no argument and `f(x)` has `x`. Anything longer stays a list and
/// must resolve to a single expression later.
fn unpack_arguments(mut args: ExpressionList) -> Option<Box<Element>> {
    match args.items.len() {
        0 => None,
        1 => args.items.pop().map(Box::new),
        _ => Some(Box::new(Element::List(args))),
    }
}
