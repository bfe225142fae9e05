// Extended formula family for non-Boolean interpretation

use super::Formula;
use crate::error::ExpressionFormatError;
use crate::parser::ast::CppOperator;
use rustc_hash::FxHashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Number literal kept in its textual form, e.g. `2`, `-4.2`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub text: String,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Call to a macro the interpreter does not expand
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Macro {
    pub name: String,
    pub arg: Option<Box<NonBooleanFormula>>,
}

/// Operator without a Boolean meaning, kept as written.
///
/// Unary operators hold their operand in `left`. Equality and hashing look at
/// the operands only, so `A + B` and `A * B` compare equal.
#[derive(Debug, Clone)]
pub struct NonBooleanOperator {
    pub left: Box<NonBooleanFormula>,
    pub op: CppOperator,
    pub right: Option<Box<NonBooleanFormula>>,
}

impl PartialEq for NonBooleanOperator {
    fn eq(&self, other: &Self) -> bool {
        self.left == other.left && self.right == other.right
    }
}

impl Eq for NonBooleanOperator {}

impl Hash for NonBooleanOperator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.left.hash(state);
        self.right.hash(state);
    }
}

/// [`Formula`] plus the nodes only non-Boolean interpretation produces
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NonBooleanFormula {
    True,
    False,
    Variable(String),
    Conjunction(Box<NonBooleanFormula>, Box<NonBooleanFormula>),
    Disjunction(Box<NonBooleanFormula>, Box<NonBooleanFormula>),
    Negation(Box<NonBooleanFormula>),
    Literal(Literal),
    Macro(Macro),
    Operator(NonBooleanOperator),
}

impl NonBooleanFormula {
    pub fn var(name: impl Into<String>) -> Self {
        NonBooleanFormula::Variable(name.into())
    }

    pub fn literal(text: impl Into<String>) -> Self {
        NonBooleanFormula::Literal(Literal::new(text))
    }

    pub fn macro_call(name: impl Into<String>, arg: Option<NonBooleanFormula>) -> Self {
        NonBooleanFormula::Macro(Macro {
            name: name.into(),
            arg: arg.map(Box::new),
        })
    }

    pub fn operator(
        left: NonBooleanFormula,
        op: CppOperator,
        right: Option<NonBooleanFormula>,
    ) -> Self {
        NonBooleanFormula::Operator(NonBooleanOperator {
            left: Box::new(left),
            op,
            right: right.map(Box::new),
        })
    }

    pub fn and(left: NonBooleanFormula, right: NonBooleanFormula) -> Self {
        NonBooleanFormula::Conjunction(Box::new(left), Box::new(right))
    }

    pub fn or(left: NonBooleanFormula, right: NonBooleanFormula) -> Self {
        NonBooleanFormula::Disjunction(Box::new(left), Box::new(right))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: NonBooleanFormula) -> Self {
        NonBooleanFormula::Negation(Box::new(inner))
    }

    /// Names of all Boolean variables, including those inside macro
    /// arguments and operator operands
    pub fn variables(&self) -> FxHashSet<String> {
        let mut names = FxHashSet::default();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut FxHashSet<String>) {
        match self {
            NonBooleanFormula::True
            | NonBooleanFormula::False
            | NonBooleanFormula::Literal(_) => {}
            NonBooleanFormula::Variable(name) => {
                names.insert(name.clone());
            }
            NonBooleanFormula::Conjunction(left, right)
            | NonBooleanFormula::Disjunction(left, right) => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            NonBooleanFormula::Negation(inner) => inner.collect_variables(names),
            NonBooleanFormula::Macro(Macro { arg, .. }) => {
                if let Some(arg) = arg {
                    arg.collect_variables(names);
                }
            }
            NonBooleanFormula::Operator(NonBooleanOperator { left, right, .. }) => {
                left.collect_variables(names);
                if let Some(right) = right {
                    right.collect_variables(names);
                }
            }
        }
    }

    /// Nodes rendered without surrounding brackets when used as an operand
    fn is_atom(&self) -> bool {
        match self {
            NonBooleanFormula::True
            | NonBooleanFormula::False
            | NonBooleanFormula::Variable(_)
            | NonBooleanFormula::Macro(_) => true,
            NonBooleanFormula::Literal(literal) => !literal.text.starts_with('-'),
            _ => false,
        }
    }
}

impl From<Formula> for NonBooleanFormula {
    fn from(formula: Formula) -> Self {
        match formula {
            Formula::True => NonBooleanFormula::True,
            Formula::False => NonBooleanFormula::False,
            Formula::Variable(name) => NonBooleanFormula::Variable(name),
            Formula::Conjunction(left, right) => {
                NonBooleanFormula::and((*left).into(), (*right).into())
            }
            Formula::Disjunction(left, right) => {
                NonBooleanFormula::or((*left).into(), (*right).into())
            }
            Formula::Negation(inner) => NonBooleanFormula::not((*inner).into()),
        }
    }
}

impl TryFrom<NonBooleanFormula> for Formula {
    type Error = ExpressionFormatError;

    fn try_from(formula: NonBooleanFormula) -> Result<Self, Self::Error> {
        Ok(match formula {
            NonBooleanFormula::True => Formula::True,
            NonBooleanFormula::False => Formula::False,
            NonBooleanFormula::Variable(name) => Formula::Variable(name),
            NonBooleanFormula::Conjunction(left, right) => {
                Formula::and(Formula::try_from(*left)?, Formula::try_from(*right)?)
            }
            NonBooleanFormula::Disjunction(left, right) => {
                Formula::or(Formula::try_from(*left)?, Formula::try_from(*right)?)
            }
            NonBooleanFormula::Negation(inner) => Formula::not(Formula::try_from(*inner)?),
            extended @ (NonBooleanFormula::Literal(_)
            | NonBooleanFormula::Macro(_)
            | NonBooleanFormula::Operator(_)) => {
                return Err(ExpressionFormatError::semantic(format!(
                    "Not a Boolean formula: {}",
                    extended
                )));
            }
        })
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &NonBooleanFormula) -> fmt::Result {
    if operand.is_atom() {
        write!(f, "{}", operand)
    } else {
        write!(f, "({})", operand)
    }
}

// Condition text that parses back into an equal formula
impl fmt::Display for NonBooleanFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonBooleanFormula::True => f.write_str("1"),
            NonBooleanFormula::False => f.write_str("0"),
            NonBooleanFormula::Variable(name) => f.write_str(name),
            NonBooleanFormula::Literal(literal) => f.write_str(&literal.text),
            NonBooleanFormula::Conjunction(left, right) => {
                write_operand(f, left)?;
                f.write_str(" && ")?;
                write_operand(f, right)
            }
            NonBooleanFormula::Disjunction(left, right) => {
                write_operand(f, left)?;
                f.write_str(" || ")?;
                write_operand(f, right)
            }
            NonBooleanFormula::Negation(inner) => {
                f.write_str("!")?;
                write_operand(f, inner)
            }
            NonBooleanFormula::Macro(Macro { name, arg: Some(arg) }) => {
                write!(f, "{}({})", name, arg)
            }
            NonBooleanFormula::Macro(Macro { name, arg: None }) => write!(f, "{}()", name),
            NonBooleanFormula::Operator(NonBooleanOperator {
                left,
                op,
                right: Some(right),
            }) => {
                write_operand(f, left)?;
                write!(f, " {} ", op)?;
                write_operand(f, right)
            }
            NonBooleanFormula::Operator(NonBooleanOperator {
                left,
                op,
                right: None,
            }) => {
                write!(f, "{}", op)?;
                write_operand(f, left)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> NonBooleanFormula {
        NonBooleanFormula::var(name)
    }

    #[test]
    fn test_operator_equality_ignores_kind() {
        let add = NonBooleanFormula::operator(var("A"), CppOperator::IntAdd, Some(var("B")));
        let mul = NonBooleanFormula::operator(var("A"), CppOperator::IntMul, Some(var("B")));
        let other = NonBooleanFormula::operator(var("A"), CppOperator::IntAdd, Some(var("C")));

        assert_eq!(add, mul);
        assert_ne!(add, other);

        let mut set = std::collections::HashSet::new();
        set.insert(add);
        assert!(set.contains(&mul));
    }

    #[test]
    fn test_macro_equality_without_argument() {
        let a = NonBooleanFormula::macro_call("FOO", None);
        let b = NonBooleanFormula::macro_call("FOO", None);
        let c = NonBooleanFormula::macro_call("FOO", Some(var("X")));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, NonBooleanFormula::macro_call("BAR", None));
    }

    #[test]
    fn test_display_brackets_compound_operands() {
        let formula = NonBooleanFormula::and(
            NonBooleanFormula::operator(
                NonBooleanFormula::operator(var("VAR"), CppOperator::BinAnd, Some(NonBooleanFormula::literal("2"))),
                CppOperator::CmpGt,
                Some(NonBooleanFormula::literal("0")),
            ),
            NonBooleanFormula::not(NonBooleanFormula::macro_call("FOO", Some(var("X")))),
        );
        assert_eq!(formula.to_string(), "((VAR & 2) > 0) && !FOO(X)");
    }

    #[test]
    fn test_display_negative_literal_and_unary() {
        let formula = NonBooleanFormula::operator(
            NonBooleanFormula::operator(var("A"), CppOperator::BinInv, None),
            CppOperator::IntSub,
            Some(NonBooleanFormula::literal("-4.2")),
        );
        assert_eq!(formula.to_string(), "(~A) - (-4.2)");
    }

    #[test]
    fn test_variables_reach_into_extended_nodes() {
        let formula = NonBooleanFormula::or(
            NonBooleanFormula::macro_call("FOO", Some(var("X"))),
            NonBooleanFormula::operator(var("Y"), CppOperator::CmpLt, Some(NonBooleanFormula::literal("3"))),
        );
        let names = formula.variables();
        assert_eq!(names.len(), 2);
        assert!(names.contains("X"));
        assert!(names.contains("Y"));
    }

    #[test]
    fn test_strict_round_trip() {
        let strict = Formula::or(Formula::var("A"), Formula::not(Formula::True));
        let extended = NonBooleanFormula::from(strict.clone());
        assert_eq!(Formula::try_from(extended).unwrap(), strict);
    }

    #[test]
    fn test_extended_node_rejected_by_strict_family() {
        let extended = NonBooleanFormula::and(var("A"), NonBooleanFormula::literal("2"));
        let err = Formula::try_from(extended).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Semantic);
        assert!(err.message.contains('2'));
    }
}
