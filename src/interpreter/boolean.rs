// Boolean interpretation of preprocessor conditions

use super::macros::expand_known_call;
use crate::error::{ExpressionFormatError, Result};
use crate::formula::Formula;
use crate::parser::ast::{CppExpression, CppOperator};
use crate::parser::parse;
use crate::settings::{InvalidConditionHandling, ParsingSettings};
use tracing::{debug, warn};

/// Variable substituted for conditions that cannot be parsed when
/// [`InvalidConditionHandling::SubstituteErrorVariable`] is configured
pub const PARSING_ERROR_VARIABLE: &str = "PARSING_ERROR";

/// Translates conditions into strict Boolean [`Formula`]s.
///
/// Without fuzzy parsing only `defined()`, the Linux macros (if enabled),
/// number literals and `&&`/`||`/`!` are accepted. With fuzzy parsing a
/// comparison such as `A >= 2` becomes the variable `A_ge_2` and a bare
/// variable `A` becomes `A_ne_0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BooleanConditionParser {
    handle_linux_macros: bool,
    fuzzy_parsing: bool,
    invalid_condition: InvalidConditionHandling,
}

impl BooleanConditionParser {
    pub fn new(
        handle_linux_macros: bool,
        fuzzy_parsing: bool,
        invalid_condition: InvalidConditionHandling,
    ) -> Self {
        Self {
            handle_linux_macros,
            fuzzy_parsing,
            invalid_condition,
        }
    }

    pub fn from_settings(settings: &ParsingSettings) -> Self {
        Self::new(
            settings.handle_linux_macros,
            settings.fuzzy_parsing,
            settings.invalid_condition,
        )
    }

    /// Parse and interpret a condition.
    ///
    /// Any error is handled according to the configured
    /// [`InvalidConditionHandling`].
    pub fn parse(&self, text: &str) -> Result<Formula> {
        let result = parse(text).and_then(|expression| {
            self.interpret(&expression)
                .map_err(|err| err.in_formula(text))
        });

        let err = match result {
            Ok(formula) => {
                debug!(condition = text, formula = %formula, "interpreted condition");
                return Ok(formula);
            }
            Err(err) => err,
        };

        match self.invalid_condition {
            InvalidConditionHandling::Fail => Err(err),
            InvalidConditionHandling::SubstituteTrue => {
                warn!(condition = text, error = %err.message, "invalid condition replaced by true");
                Ok(Formula::True)
            }
            InvalidConditionHandling::SubstituteErrorVariable => {
                warn!(
                    condition = text,
                    error = %err.message,
                    "invalid condition replaced by {}", PARSING_ERROR_VARIABLE
                );
                Ok(Formula::var(PARSING_ERROR_VARIABLE))
            }
        }
    }

    /// Interpret an already parsed condition. Errors are returned as they are.
    pub fn interpret(&self, expression: &CppExpression) -> Result<Formula> {
        match expression {
            CppExpression::Variable(name) => {
                if self.fuzzy_parsing {
                    Ok(Formula::var(format!("{}_ne_0", name)))
                } else {
                    Err(ExpressionFormatError::semantic(format!(
                        "Found variable outside of defined() call: {}",
                        name
                    )))
                }
            }
            CppExpression::NumberLiteral(value) => Ok(truth(value.is_zero())),
            CppExpression::FunctionCall { name, arg } => {
                expand_known_call(name, arg.as_deref(), self.handle_linux_macros)?.ok_or_else(
                    || ExpressionFormatError::semantic(format!("Unsupported function/macro: {}", name)),
                )
            }
            CppExpression::Operator { op, left, right } => {
                self.interpret_operator(*op, left, right.as_deref())
            }
        }
    }

    fn interpret_operator(
        &self,
        op: CppOperator,
        left: &CppExpression,
        right: Option<&CppExpression>,
    ) -> Result<Formula> {
        match (op, right) {
            (CppOperator::BoolAnd, Some(right)) => {
                Ok(Formula::and(self.interpret(left)?, self.interpret(right)?))
            }
            (CppOperator::BoolOr, Some(right)) => {
                Ok(Formula::or(self.interpret(left)?, self.interpret(right)?))
            }
            (CppOperator::BoolNot, None) => Ok(Formula::not(self.interpret(left)?)),
            (CppOperator::IntSubUnary, None) => match left {
                // -2 is true, -0 is false
                CppExpression::NumberLiteral(value) => Ok(truth(value.negate().is_zero())),
                _ => Err(unsupported_operator(op)),
            },
            (op, Some(right)) if op.is_comparison() => self.fuzzy_comparison(op, left, right),
            _ => Err(unsupported_operator(op)),
        }
    }

    /// Encode `variable op value` as a single variable such as `A_eq_2`.
    fn fuzzy_comparison(
        &self,
        op: CppOperator,
        left: &CppExpression,
        right: &CppExpression,
    ) -> Result<Formula> {
        if !self.fuzzy_parsing {
            return Err(ExpressionFormatError::semantic(format!(
                "{} is only supported if fuzzy parsing is enabled",
                op
            )));
        }

        let (variable, op, value) = match (left, right) {
            (CppExpression::Variable(variable), CppExpression::NumberLiteral(value)) => {
                (variable, op, literal_suffix(&value.to_string()))
            }
            // the name always reads "variable op value"
            (CppExpression::NumberLiteral(value), CppExpression::Variable(variable)) => {
                (variable, op.mirrored(), literal_suffix(&value.to_string()))
            }
            (CppExpression::Variable(variable), CppExpression::Variable(other)) => {
                (variable, op, other.clone())
            }
            _ => {
                return Err(ExpressionFormatError::semantic(
                    "Can only fuzzy-parse variables compared with integer literals or other variables",
                ));
            }
        };

        Ok(Formula::var(format!("{}{}{}", variable, infix(op)?, value)))
    }
}

fn truth(is_zero: bool) -> Formula {
    if is_zero {
        Formula::False
    } else {
        Formula::True
    }
}

fn literal_suffix(text: &str) -> String {
    text.replace('.', "_")
}

fn infix(op: CppOperator) -> Result<&'static str> {
    match op {
        CppOperator::CmpEq => Ok("_eq_"),
        CppOperator::CmpNe => Ok("_ne_"),
        CppOperator::CmpLt => Ok("_lt_"),
        CppOperator::CmpLe => Ok("_le_"),
        CppOperator::CmpGt => Ok("_gt_"),
        CppOperator::CmpGe => Ok("_ge_"),
        other => Err(unsupported_operator(other)),
    }
}

fn unsupported_operator(op: CppOperator) -> ExpressionFormatError {
    ExpressionFormatError::semantic(format!("Unsupported operator: {}", op))
}
