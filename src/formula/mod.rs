//! Propositional formulas produced by the interpreters
//!
//! [`Formula`] is the strict Boolean family consumed by logic tooling.
//! [`NonBooleanFormula`] extends it with literals, macros and raw operators;
//! the extension converts back into a strict formula only when it contains
//! none of those.

mod non_boolean;

pub use non_boolean::{Literal, Macro, NonBooleanFormula, NonBooleanOperator};

use rustc_hash::FxHashSet;
use std::fmt;

/// Boolean formula over string-named variables.
///
/// Two variables denote the same proposition iff their names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    True,
    False,
    Variable(String),
    Conjunction(Box<Formula>, Box<Formula>),
    Disjunction(Box<Formula>, Box<Formula>),
    Negation(Box<Formula>),
}

impl Formula {
    pub fn var(name: impl Into<String>) -> Self {
        Formula::Variable(name.into())
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Formula::Conjunction(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Formula::Disjunction(Box::new(left), Box::new(right))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Formula) -> Self {
        Formula::Negation(Box::new(inner))
    }

    /// Names of all variables in the formula
    pub fn variables(&self) -> FxHashSet<String> {
        let mut names = FxHashSet::default();
        self.collect_variables(&mut names);
        names
    }

    pub(crate) fn collect_variables(&self, names: &mut FxHashSet<String>) {
        match self {
            Formula::True | Formula::False => {}
            Formula::Variable(name) => {
                names.insert(name.clone());
            }
            Formula::Conjunction(left, right) | Formula::Disjunction(left, right) => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Formula::Negation(inner) => inner.collect_variables(names),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Formula::Disjunction(..) => 1,
            Formula::Conjunction(..) => 2,
            Formula::Negation(_) => 3,
            _ => 4,
        }
    }
}

/// Writes `operand`, bracketed when it binds looser than `min`.
fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Formula, min: u8) -> fmt::Result {
    if operand.precedence() < min {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

// C-like syntax with as few brackets as the grouping allows
impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let own = self.precedence();
        match self {
            Formula::True => f.write_str("1"),
            Formula::False => f.write_str("0"),
            Formula::Variable(name) => f.write_str(name),
            Formula::Conjunction(left, right) | Formula::Disjunction(left, right) => {
                let symbol = if own == 1 { "||" } else { "&&" };
                write_operand(f, left, own)?;
                write!(f, " {} ", symbol)?;
                write_operand(f, right, own + 1)
            }
            Formula::Negation(inner) => {
                f.write_str("!")?;
                write_operand(f, inner, own + 1)
            }
        }
    }
}
