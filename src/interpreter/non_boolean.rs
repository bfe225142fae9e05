// Non-Boolean interpretation of preprocessor conditions

use super::macros::expand_known_call;
use crate::error::Result;
use crate::formula::NonBooleanFormula;
use crate::parser::ast::{CppExpression, CppOperator};
use crate::parser::parse;
use crate::settings::ParsingSettings;
use tracing::debug;

/// Translates conditions into [`NonBooleanFormula`]s.
///
/// Variables, literals, unknown macros and arithmetic are kept as written, so
/// `(VAR & 2) > 0` stays a comparison of a bitwise and with a literal. Only
/// `defined()` and, if enabled, the Linux macros are expanded. Errors are
/// always returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NonBooleanConditionParser {
    handle_linux_macros: bool,
}

impl NonBooleanConditionParser {
    pub fn new(handle_linux_macros: bool) -> Self {
        Self {
            handle_linux_macros,
        }
    }

    /// Only `handle_linux_macros` applies; fuzzy parsing and invalid
    /// condition handling are Boolean concerns.
    pub fn from_settings(settings: &ParsingSettings) -> Self {
        Self::new(settings.handle_linux_macros)
    }

    pub fn parse(&self, text: &str) -> Result<NonBooleanFormula> {
        let expression = parse(text)?;
        let formula = self
            .interpret(&expression)
            .map_err(|err| err.in_formula(text))?;
        debug!(condition = text, formula = %formula, "interpreted condition");
        Ok(formula)
    }

    pub fn interpret(&self, expression: &CppExpression) -> Result<NonBooleanFormula> {
        match expression {
            CppExpression::Variable(name) => Ok(NonBooleanFormula::var(name.as_str())),
            CppExpression::NumberLiteral(value) => Ok(NonBooleanFormula::literal(value.to_string())),
            CppExpression::FunctionCall { name, arg } => {
                let arg = arg.as_deref();
                if let Some(formula) = expand_known_call(name, arg, self.handle_linux_macros)? {
                    return Ok(formula.into());
                }
                let arg = arg.map(|arg| self.interpret(arg)).transpose()?;
                Ok(NonBooleanFormula::macro_call(name.as_str(), arg))
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
    ) -> Result<NonBooleanFormula> {
        Ok(match (op, right) {
            (CppOperator::BoolAnd, Some(right)) => {
                NonBooleanFormula::and(self.interpret(left)?, self.interpret(right)?)
            }
            (CppOperator::BoolOr, Some(right)) => {
                NonBooleanFormula::or(self.interpret(left)?, self.interpret(right)?)
            }
            (CppOperator::BoolNot, None) => NonBooleanFormula::not(self.interpret(left)?),
            (CppOperator::IntSubUnary, None) => match left {
                CppExpression::NumberLiteral(value) => NonBooleanFormula::literal(format!("-{}", value)),
                other => NonBooleanFormula::operator(self.interpret(other)?, op, None),
            },
            (op, right) => {
                let right = right.map(|right| self.interpret(right)).transpose()?;
                NonBooleanFormula::operator(self.interpret(left)?, op, right)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse_nb(text: &str) -> NonBooleanFormula {
        NonBooleanConditionParser::new(false).parse(text).unwrap()
    }

    fn var(name: &str) -> NonBooleanFormula {
        NonBooleanFormula::var(name)
    }

    fn lit(text: &str) -> NonBooleanFormula {
        NonBooleanFormula::literal(text)
    }

    #[test]
    fn test_variable_and_literal_kept() {
        assert_eq!(parse_nb("A"), var("A"));
        assert_eq!(parse_nb("2"), lit("2"));
        assert_eq!(parse_nb("-4.2"), lit("-4.2"));
        assert_eq!(parse_nb("-0.0"), lit("-0"));
    }

    #[test]
    fn test_comparison_kept() {
        assert_eq!(
            parse_nb("((VAR & 2) > 0)"),
            NonBooleanFormula::operator(
                NonBooleanFormula::operator(var("VAR"), CppOperator::BinAnd, Some(lit("2"))),
                CppOperator::CmpGt,
                Some(lit("0")),
            )
        );
    }

    #[test]
    fn test_defined_expanded() {
        assert_eq!(
            parse_nb("defined(A) && !defined B"),
            NonBooleanFormula::and(var("A"), NonBooleanFormula::not(var("B")))
        );
    }

    #[test]
    fn test_unknown_macro() {
        assert_eq!(
            parse_nb("MY_MACRO(A)"),
            NonBooleanFormula::macro_call("MY_MACRO", Some(var("A")))
        );
        assert_eq!(parse_nb("F()"), NonBooleanFormula::macro_call("F", None));
        assert_eq!(
            parse_nb("IS_ENABLED(A)"),
            NonBooleanFormula::macro_call("IS_ENABLED", Some(var("A")))
        );
    }

    #[test]
    fn test_linux_macros_enabled() {
        let parser = NonBooleanConditionParser::new(true);
        assert_eq!(
            parser.parse("IS_ENABLED(A)").unwrap(),
            NonBooleanFormula::or(var("A"), var("A_MODULE"))
        );
    }

    #[test]
    fn test_unary_operators_kept() {
        assert_eq!(
            parse_nb("~A"),
            NonBooleanFormula::operator(var("A"), CppOperator::BinInv, None)
        );
        assert_eq!(
            parse_nb("-A"),
            NonBooleanFormula::operator(var("A"), CppOperator::IntSubUnary, None)
        );
    }

    #[test]
    fn test_defined_misuse() {
        let parser = NonBooleanConditionParser::new(false);
        let err = parser.parse("defined()").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
        assert_eq!(err.formula.as_deref(), Some("defined()"));
        assert_eq!(parser.parse("defined(1)").unwrap_err().kind, ErrorKind::Semantic);
    }

    #[test]
    fn test_errors_not_recovered() {
        let parser = NonBooleanConditionParser::from_settings(&ParsingSettings {
            invalid_condition: crate::settings::InvalidConditionHandling::SubstituteTrue,
            ..ParsingSettings::default()
        });
        assert!(parser.parse("defined(A) || ").is_err());
    }
}
