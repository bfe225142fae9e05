//! Parser facade
//!
//! Runs the pipeline stages in order and attaches the condition text to
//! whatever error comes out of them:
//!
//! ```text
//! text → Lexer → structure::build → calls::detect_calls → resolver::resolve
//! ```
//!
//! Lexing happens eagerly in [`Parser::new`], so a condition with a bad
//! character never produces a `Parser` at all.

use crate::error::Result;
use crate::parser::ast::CppExpression;
use crate::parser::lexer::{Lexer, Token};
use crate::parser::{calls, resolver, structure};
use tracing::{debug, trace};

/// Parser for a single preprocessor condition
pub struct Parser {
    source: String,
    tokens: Vec<Token>,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize().map_err(|err| err.in_formula(source))?;
        trace!(tokens = tokens.len(), "lexed condition");

        Ok(Self {
            source: source.to_string(),
            tokens,
        })
    }

    /// The condition text this parser was created for
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Build the resolved expression tree. The lexed tokens are kept, so
    /// every call gives the same result.
    pub fn parse(&self) -> Result<CppExpression> {
        let tokens = self.tokens.clone();
        let source_len = self.source.chars().count();

        let root = structure::build(tokens, source_len)
            .map_err(|err| err.in_formula(&self.source))?;
        let root = calls::detect_calls(root);
        trace!(root = ?root.span(), "detected calls");

        let expression =
            resolver::resolve(root).map_err(|err| err.in_formula(&self.source))?;
        debug!(condition = %self.source, parsed = %expression, "parsed condition");
        Ok(expression)
    }
}

/// Parse a condition into its resolved expression tree.
pub fn parse(source: &str) -> Result<CppExpression> {
    Parser::new(source)?.parse()
}
