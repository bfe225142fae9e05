//! Lexer (tokenizer) for preprocessor conditions
//!
//! Converts the text after `#if`/`#elif` into a flat [`Token`] stream.
//! Identifiers that start with a digit are number literals; they are converted
//! here so later stages only ever see finished values.

use super::ast::{CppOperator, Span};
use crate::error::{ExpressionFormatError, Result};
use crate::number::{convert_to_number, Number};
use std::fmt;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`Span`] so that errors further down the pipeline
/// can still point at the source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen(Span),
    RParen(Span),
    Ident(String, Span),
    Literal(Number, Span),
    Op(CppOperator, Span),
}

impl Token {
    /// Returns the source span where this token appears.
    pub fn span(&self) -> Span {
        match self {
            Token::LParen(span)
            | Token::RParen(span)
            | Token::Ident(_, span)
            | Token::Literal(_, span)
            | Token::Op(_, span) => *span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::Ident(name, _) => write!(f, "identifier '{}'", name),
            Token::Literal(value, _) => write!(f, "literal {}", value),
            Token::Op(op, _) => write!(f, "operator '{}'", op),
        }
    }
}

/// Lexer for a single condition
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given condition text.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens: Vec<Token> = Vec::new();

        loop {
            self.skip_whitespace();

            let Some(ch) = self.peek() else {
                break;
            };
            let start = self.position;

            let token = match ch {
                '(' => {
                    self.advance();
                    Token::LParen(Span::new(start, 1))
                }
                ')' => {
                    self.advance();
                    Token::RParen(Span::new(start, 1))
                }
                c if is_identifier_char(c) => self.identifier_or_literal()?,
                _ => match self.operator(tokens.last()) {
                    Some(op) => {
                        let len = op.symbol().len();
                        self.position += len;
                        Token::Op(op, Span::new(start, len))
                    }
                    None => {
                        return Err(ExpressionFormatError::lex(
                            format!("Invalid character in expression: '{}'", ch),
                            start,
                        ));
                    }
                },
            };

            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Match the operator at the current position, two-character operators first.
    ///
    /// `previous` decides between binary and unary `+`/`-`: they are unary at
    /// the start, after another operator, and after an opening bracket.
    fn operator(&self, previous: Option<&Token>) -> Option<CppOperator> {
        let first = self.peek()?;

        let double = match (first, self.peek_ahead(1)) {
            ('&', Some('&')) => Some(CppOperator::BoolAnd),
            ('|', Some('|')) => Some(CppOperator::BoolOr),
            ('+', Some('+')) => Some(CppOperator::IntInc),
            ('-', Some('-')) => Some(CppOperator::IntDec),
            ('=', Some('=')) => Some(CppOperator::CmpEq),
            ('!', Some('=')) => Some(CppOperator::CmpNe),
            ('<', Some('=')) => Some(CppOperator::CmpLe),
            ('>', Some('=')) => Some(CppOperator::CmpGe),
            ('>', Some('>')) => Some(CppOperator::BinShr),
            ('<', Some('<')) => Some(CppOperator::BinShl),
            _ => None,
        };
        if double.is_some() {
            return double;
        }

        let unary = matches!(previous, None | Some(Token::Op(..)) | Some(Token::LParen(_)));
        match first {
            '!' => Some(CppOperator::BoolNot),
            '+' if unary => Some(CppOperator::IntAddUnary),
            '+' => Some(CppOperator::IntAdd),
            '-' if unary => Some(CppOperator::IntSubUnary),
            '-' => Some(CppOperator::IntSub),
            '*' => Some(CppOperator::IntMul),
            '/' => Some(CppOperator::IntDiv),
            '%' => Some(CppOperator::IntMod),
            '<' => Some(CppOperator::CmpLt),
            '>' => Some(CppOperator::CmpGt),
            '&' => Some(CppOperator::BinAnd),
            '|' => Some(CppOperator::BinOr),
            '^' => Some(CppOperator::BinXor),
            '~' => Some(CppOperator::BinInv),
            _ => None,
        }
    }

    /// Parse identifier, or number literal if it starts with a digit
    fn identifier_or_literal(&mut self) -> Result<Token> {
        let start = self.position;
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if is_identifier_char(ch) {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let span = Span::new(start, self.position - start);

        if ident.starts_with(|c: char| c.is_ascii_digit()) {
            let mut literal = ident.to_lowercase();
            while literal.ends_with('l') {
                literal.pop();
            }
            if literal.ends_with('u') {
                literal.pop();
            }

            return convert_to_number(&literal)
                .map(|value| Token::Literal(value, span))
                .ok_or_else(|| {
                    ExpressionFormatError::lex(format!("Cannot parse literal {}", ident), start)
                });
        }

        // '.' is only legal as the decimal point of a number
        if let Some(dot) = ident.chars().position(|c| c == '.') {
            return Err(ExpressionFormatError::lex(
                "Identifier contains invalid character: '.'",
                start + dot,
            ));
        }

        Ok(Token::Ident(ident, span))
    }

    /// Skip whitespace
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn lex(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().unwrap()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = lex("defined(A) && B");

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "defined"));
        assert!(matches!(tokens[1], Token::LParen(_)));
        assert!(matches!(tokens[2], Token::Ident(ref s, _) if s == "A"));
        assert!(matches!(tokens[3], Token::RParen(_)));
        assert!(matches!(tokens[4], Token::Op(CppOperator::BoolAnd, _)));
        assert!(matches!(tokens[5], Token::Ident(ref s, _) if s == "B"));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_operators() {
        let tokens = lex("&& || ++ -- == != <= >= >> << ! * / % < > & | ^ ~");
        let ops: Vec<CppOperator> = tokens
            .iter()
            .map(|t| match t {
                Token::Op(op, _) => *op,
                other => panic!("Expected operator, found {}", other),
            })
            .collect();

        assert_eq!(
            ops,
            vec![
                CppOperator::BoolAnd,
                CppOperator::BoolOr,
                CppOperator::IntInc,
                CppOperator::IntDec,
                CppOperator::CmpEq,
                CppOperator::CmpNe,
                CppOperator::CmpLe,
                CppOperator::CmpGe,
                CppOperator::BinShr,
                CppOperator::BinShl,
                CppOperator::BoolNot,
                CppOperator::IntMul,
                CppOperator::IntDiv,
                CppOperator::IntMod,
                CppOperator::CmpLt,
                CppOperator::CmpGt,
                CppOperator::BinAnd,
                CppOperator::BinOr,
                CppOperator::BinXor,
                CppOperator::BinInv,
            ]
        );
    }

    #[test]
    fn test_unary_and_binary_minus() {
        let tokens = lex("-A - (-B) * -1");

        assert!(matches!(tokens[0], Token::Op(CppOperator::IntSubUnary, _)));
        assert!(matches!(tokens[2], Token::Op(CppOperator::IntSub, _)));
        assert!(matches!(tokens[4], Token::Op(CppOperator::IntSubUnary, _)));
        assert!(matches!(tokens[7], Token::Op(CppOperator::IntMul, _)));
        assert!(matches!(tokens[8], Token::Op(CppOperator::IntSubUnary, _)));
    }

    #[test]
    fn test_plus_after_closing_bracket_is_binary() {
        let tokens = lex("(A) + B");
        assert!(matches!(tokens[3], Token::Op(CppOperator::IntAdd, _)));
    }

    #[test]
    fn test_literal_suffixes() {
        let tokens = lex("10UL 3l 7u 2.5 0x10");

        assert!(matches!(tokens[0], Token::Literal(Number::Integer(10), _)));
        assert!(matches!(tokens[1], Token::Literal(Number::Integer(3), _)));
        assert!(matches!(tokens[2], Token::Literal(Number::Integer(7), _)));
        assert!(matches!(tokens[3], Token::Literal(Number::Float(v), _) if v == 2.5));
        assert!(matches!(tokens[4], Token::Literal(Number::Integer(16), _)));
        assert_eq!(tokens[0].span(), Span::new(0, 4));
    }

    #[test]
    fn test_bad_literal() {
        let err = Lexer::new("A == 12abc").tokenize().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
        assert_eq!(err.position, Some(5));
        assert!(err.message.contains("12abc"));
    }

    #[test]
    fn test_dot_in_identifier() {
        let err = Lexer::new("A.B").tokenize().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
        assert_eq!(err.position, Some(1));
    }

    #[test]
    fn test_invalid_character() {
        let err = Lexer::new("A, B").tokenize().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
        assert_eq!(err.position, Some(1));
        assert!(err.message.contains("','"));
    }

    #[test]
    fn test_whitespace_only() {
        assert!(lex(" \t\n").is_empty());
    }
}
