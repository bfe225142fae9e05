//! Preprocessor condition parser
//!
//! This module transforms the text of an `#if`/`#elif` condition into a
//! resolved [`CppExpression`](ast::CppExpression) tree:
//! - [`lexer`]: Tokenization (condition text → tokens)
//! - `structure`: Bracket nesting (tokens → nested lists)
//! - `calls`: Function-call detection (`name(...)`, `defined NAME`)
//! - `resolver`: Operator precedence (nested lists → tree)
//! - [`parse`]: The facade running all of the above
//! - [`ast`]: Operator catalog and tree node definitions
//!
//! # Supported syntax
//!
//! - Identifiers `[A-Za-z0-9_]+`, number literals with `l`/`L`/`u`/`U` suffixes
//! - Operators `&& || ! == != < <= > >= >> << + - * / % & | ^ ~ ++ --`
//! - Brackets, calls with at most one argument, and bare `defined NAME`
//!
//! No macro expansion takes place; names are kept as written.
//!
//! # Parser Implementation
//!
//! Hand-written in several passes over owned trees. Each pass consumes its
//! input and builds a new tree. No external parser generator dependencies.

pub mod ast;
pub(crate) mod calls;
pub mod lexer;
pub mod parse;
pub(crate) mod resolver;
pub(crate) mod structure;

pub use ast::{CppExpression, CppOperator, Span};
pub use lexer::{Lexer, Token};
pub use parse::{parse, Parser};
