// AST definitions for preprocessor conditions

use crate::number::Number;
use std::fmt;

/// Name of the preprocessor built-in that may be written without brackets
pub const DEFINED: &str = "defined";

/// Deepest nesting of brackets, calls and operators accepted in a condition
pub const MAX_NESTING_DEPTH: usize = 256;

/// Character range in the condition text, counted in `char`s
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Smallest span containing both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        let start = self.start.min(other.start);
        Span::new(start, self.end().max(other.end()) - start)
    }
}

/// Operators understood in `#if` conditions.
///
/// `+` and `-` come in a binary and a unary flavour; the lexer decides which
/// one from the token on their left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CppOperator {
    // Logical
    BoolAnd, // &&
    BoolOr,  // ||
    BoolNot, // !

    // Arithmetic
    IntAdd,      // a + b
    IntAddUnary, // +a
    IntSub,      // a - b
    IntSubUnary, // -a
    IntMul,      // *
    IntDiv,      // /
    IntMod,      // %
    IntInc,      // ++
    IntDec,      // --

    // Comparison
    CmpEq, // ==
    CmpNe, // !=
    CmpLt, // <
    CmpLe, // <=
    CmpGt, // >
    CmpGe, // >=

    // Bitwise
    BinAnd, // &
    BinOr,  // |
    BinXor, // ^
    BinInv, // ~
    BinShl, // <<
    BinShr, // >>
}

impl CppOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            CppOperator::BoolAnd => "&&",
            CppOperator::BoolOr => "||",
            CppOperator::BoolNot => "!",
            CppOperator::IntAdd | CppOperator::IntAddUnary => "+",
            CppOperator::IntSub | CppOperator::IntSubUnary => "-",
            CppOperator::IntMul => "*",
            CppOperator::IntDiv => "/",
            CppOperator::IntMod => "%",
            CppOperator::IntInc => "++",
            CppOperator::IntDec => "--",
            CppOperator::CmpEq => "==",
            CppOperator::CmpNe => "!=",
            CppOperator::CmpLt => "<",
            CppOperator::CmpLe => "<=",
            CppOperator::CmpGt => ">",
            CppOperator::CmpGe => ">=",
            CppOperator::BinAnd => "&",
            CppOperator::BinOr => "|",
            CppOperator::BinXor => "^",
            CppOperator::BinInv => "~",
            CppOperator::BinShl => "<<",
            CppOperator::BinShr => ">>",
        }
    }

    /// Binding strength following C; lower binds looser and is split first.
    pub fn precedence(self) -> u8 {
        match self {
            CppOperator::BoolOr => 1,
            CppOperator::BoolAnd => 2,
            CppOperator::BinOr => 3,
            CppOperator::BinXor => 4,
            CppOperator::BinAnd => 5,
            CppOperator::CmpEq | CppOperator::CmpNe => 6,
            CppOperator::CmpLt | CppOperator::CmpLe | CppOperator::CmpGt | CppOperator::CmpGe => 7,
            CppOperator::BinShl | CppOperator::BinShr => 8,
            CppOperator::IntAdd | CppOperator::IntSub => 9,
            CppOperator::IntMul | CppOperator::IntDiv | CppOperator::IntMod => 10,
            CppOperator::BoolNot
            | CppOperator::BinInv
            | CppOperator::IntAddUnary
            | CppOperator::IntSubUnary
            | CppOperator::IntInc
            | CppOperator::IntDec => 11,
        }
    }

    pub fn is_unary(self) -> bool {
        self.precedence() == 11
    }

    /// Only `++` and `--` may also follow their operand.
    pub fn is_postfix_capable(self) -> bool {
        matches!(self, CppOperator::IntInc | CppOperator::IntDec)
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            CppOperator::CmpEq
                | CppOperator::CmpNe
                | CppOperator::CmpLt
                | CppOperator::CmpLe
                | CppOperator::CmpGt
                | CppOperator::CmpGe
        )
    }

    /// The relation that holds when both operands swap sides (`2 < A` is `A > 2`).
    pub fn mirrored(self) -> CppOperator {
        match self {
            CppOperator::CmpLt => CppOperator::CmpGt,
            CppOperator::CmpLe => CppOperator::CmpGe,
            CppOperator::CmpGt => CppOperator::CmpLt,
            CppOperator::CmpGe => CppOperator::CmpLe,
            other => other,
        }
    }
}

impl fmt::Display for CppOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A fully resolved condition.
///
/// Unary operators keep their operand in `left` and have no `right`. A call
/// has at most one argument; several arguments are rejected while resolving.
#[derive(Debug, Clone, PartialEq)]
pub enum CppExpression {
    Variable(String),
    NumberLiteral(Number),
    Operator {
        op: CppOperator,
        left: Box<CppExpression>,
        right: Option<Box<CppExpression>>,
    },
    FunctionCall {
        name: String,
        arg: Option<Box<CppExpression>>,
    },
}

impl CppExpression {
    pub fn var(name: impl Into<String>) -> Self {
        CppExpression::Variable(name.into())
    }

    pub fn unary(op: CppOperator, operand: CppExpression) -> Self {
        CppExpression::Operator {
            op,
            left: Box::new(operand),
            right: None,
        }
    }

    pub fn binary(left: CppExpression, op: CppOperator, right: CppExpression) -> Self {
        CppExpression::Operator {
            op,
            left: Box::new(left),
            right: Some(Box::new(right)),
        }
    }

    pub fn call(name: impl Into<String>, arg: Option<CppExpression>) -> Self {
        CppExpression::FunctionCall {
            name: name.into(),
            arg: arg.map(Box::new),
        }
    }
}

// Fully parenthesized, for diagnostics
impl fmt::Display for CppExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CppExpression::Variable(name) => f.write_str(name),
            CppExpression::NumberLiteral(value) => write!(f, "{}", value),
            CppExpression::Operator {
                op,
                left,
                right: Some(right),
            } => write!(f, "({} {} {})", left, op, right),
            CppExpression::Operator {
                op,
                left,
                right: None,
            } => write!(f, "({}{})", op, left),
            CppExpression::FunctionCall { name, arg: Some(arg) } => write!(f, "{}({})", name, arg),
            CppExpression::FunctionCall { name, arg: None } => write!(f, "{}()", name),
        }
    }
}
