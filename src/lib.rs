//! # Introduction
//!
//! cppcond parses the conditions of C preprocessor `#if`/`#elif` directives
//! and turns them into propositional formulas for variability analysis.
//! No macro expansion takes place; the condition is analysed exactly as it is
//! written.
//!
//! ## Parsing pipeline
//!
//! ```text
//! Text → Lexer → Brackets → Calls → Precedence → CppExpression → Interpreter → Formula
//! ```
//!
//! 1. [`parser`]: tokenises the condition, nests it by brackets, detects
//!    function calls and resolves operator precedence into a
//!    [`parser::CppExpression`].
//! 2. [`interpreter`]: translates the expression into a strict
//!    [`formula::Formula`] or a literal-preserving
//!    [`formula::NonBooleanFormula`].
//! 3. [`formula`]: the two formula families and their variable collectors.
//! 4. [`settings`]: interpreter options, loadable from TOML.
//! 5. [`error`]: the single [`ExpressionFormatError`] reported by every stage.
//!
//! ## Example
//!
//! ```
//! use cppcond::formula::Formula;
//! use cppcond::interpreter::BooleanConditionParser;
//! use cppcond::settings::InvalidConditionHandling;
//!
//! let parser = BooleanConditionParser::new(true, false, InvalidConditionHandling::Fail);
//! let formula = parser.parse("defined(CONFIG_A) && !IS_ENABLED(CONFIG_B)").unwrap();
//! assert_eq!(
//!     formula,
//!     Formula::and(
//!         Formula::var("CONFIG_A"),
//!         Formula::not(Formula::or(
//!             Formula::var("CONFIG_B"),
//!             Formula::var("CONFIG_B_MODULE"),
//!         )),
//!     )
//! );
//! ```

pub mod error;
pub mod formula;
pub mod interpreter;
pub mod number;
pub mod parser;
pub mod settings;

pub use error::{ErrorKind, ExpressionFormatError, Result};
