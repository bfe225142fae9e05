//! Condition interpreters
//!
//! This module turns a resolved [`CppExpression`](crate::parser::CppExpression)
//! into a formula:
//! - [`boolean`]: Strict Boolean formulas, with optional fuzzy encoding of
//!   comparisons and a policy for invalid conditions
//! - [`non_boolean`]: Extended formulas keeping literals, macros and operators
//! - [`macros`]: `defined()` and the Linux `IS_*` macros, shared by both
//!
//! Both interpreters are stateless apart from their flags, so one instance
//! can be shared across threads.

pub mod boolean;
pub mod macros;
pub mod non_boolean;

pub use boolean::{BooleanConditionParser, PARSING_ERROR_VARIABLE};
pub use non_boolean::NonBooleanConditionParser;
