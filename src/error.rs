//! Error type shared by every stage of condition parsing
//!
//! Lexing, bracket structure, operator resolution and the two interpreters all
//! fail with the same [`ExpressionFormatError`]. The [`ErrorKind`] records which
//! stage gave up; the rendered message points at the offending character when
//! the stage knew where it was.

use std::fmt;
use thiserror::Error;

/// Prefix of the line that echoes the condition text; the caret line below it
/// is indented by the same width.
const FORMULA_PREFIX: &str = "In formula: ";

/// The stage that rejected a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad character or unparsable number literal
    Lex,
    /// Unbalanced brackets
    Structure,
    /// Missing operand, misplaced operator, or a group that is not one expression
    Resolution,
    /// Valid syntax the interpreter cannot express (unknown macro, misuse of `defined`, ...)
    Semantic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "lex error"),
            ErrorKind::Structure => write!(f, "structure error"),
            ErrorKind::Resolution => write!(f, "resolution error"),
            ErrorKind::Semantic => write!(f, "semantic error"),
        }
    }
}

/// A condition that is not a well-formed preprocessor expression.
///
/// `position` is a character offset into `formula`. When both are known the
/// display output ends with a caret line under that character:
///
/// ```text
/// Invalid character in expression: '$'
/// In formula: A && $B
///                  ^
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", render_context(.formula, .position))]
pub struct ExpressionFormatError {
    pub kind: ErrorKind,
    pub message: String,
    pub formula: Option<String>,
    pub position: Option<usize>,
}

impl ExpressionFormatError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            kind,
            message: message.into(),
            formula: None,
            position,
        }
    }

    pub fn lex(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Lex, message, Some(position))
    }

    pub fn structure(message: impl Into<String>, position: usize) -> Self {
        Self::new(ErrorKind::Structure, message, Some(position))
    }

    pub fn resolution(message: impl Into<String>, position: Option<usize>) -> Self {
        Self::new(ErrorKind::Resolution, message, position)
    }

    pub fn semantic(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Semantic, message, None)
    }

    /// Attach the condition text, keeping any text that is already attached.
    pub fn in_formula(mut self, formula: &str) -> Self {
        if self.formula.is_none() {
            self.formula = Some(formula.to_string());
        }
        self
    }

    /// The caret line exactly as it appears in the display output.
    pub fn marker_line(&self) -> Option<String> {
        self.formula.as_ref()?;
        let position = self.position?;
        Some(format!("{}^", " ".repeat(FORMULA_PREFIX.len() + position)))
    }
}

fn render_context(formula: &Option<String>, position: &Option<usize>) -> String {
    let Some(formula) = formula else {
        return String::new();
    };

    let mut out = format!("\n{FORMULA_PREFIX}{formula}");
    if let Some(position) = position {
        out.push('\n');
        out.push_str(&" ".repeat(FORMULA_PREFIX.len() + position));
        out.push('^');
    }
    out
}

pub type Result<T> = std::result::Result<T, ExpressionFormatError>;
