//! Parser Types and Constants
//!
//! Error types and token classification shared by the parser.

use thiserror::Error;
use crate::parser::lexer::TokenType;

/// Check if a token type is a control operator. A control operator must
/// always be followed by an operand, never by another control operator.
pub fn is_control_operator(t: TokenType) -> bool {
    matches!(
        t,
        TokenType::Amp
            | TokenType::AndAnd
            | TokenType::Pipe
            | TokenType::OrOr
            | TokenType::Semicolon
    )
}

/// Check if a token type is a redirection token
pub fn is_redirection_token(t: TokenType) -> bool {
    matches!(
        t,
        TokenType::Less
            | TokenType::DLess
            | TokenType::DLessDash
            | TokenType::LessAnd
            | TokenType::LessGreat
            | TokenType::Great
            | TokenType::DGreat
            | TokenType::GreatAnd
            | TokenType::Clobber
    )
}

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// An operator followed directly by another operator
    #[error("unexpected `{found}` after `{operator}`")]
    MalformedOperatorSequence { operator: String, found: String },

    /// The line ended while an operand was still expected
    #[error("unexpected end of input after `{operator}`")]
    UnexpectedEof { operator: String },

    /// A redirection operator without a target word
    #[error("missing redirection target after `{operator}`")]
    UnterminatedRedirection { operator: String },

    #[error("syntax error near unexpected token `{found}`")]
    UnexpectedToken { found: String },

    /// Recognized syntax the parser does not build trees for
    #[error("{construct} is not supported")]
    Unsupported { construct: String },
}

/// A parse failure, positioned at the offending token.
///
/// Line and column are 1-based. `source_line` is the text of the line the
/// error points into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at {line}:{column}: {kind}\n  {source_line}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
    pub source_line: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: usize, column: usize, source_line: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            column,
            source_line: source_line.into(),
        }
    }
}

/// Text of the 1-based `line` of `input`. Line breaks are `\n`, `\r\n` or a
/// lone `\r`, counted the same way the lexer counts them.
pub fn source_line(input: &str, line: usize) -> &str {
    let mut rest = input;
    for _ in 1..line {
        match rest.find(['\n', '\r']) {
            Some(idx) => {
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
            }
            None => return "",
        }
    }
    match rest.find(['\n', '\r']) {
        Some(idx) => &rest[..idx],
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_line() {
        let input = "first\nsecond\r\nthird\rfourth";
        assert_eq!(source_line(input, 1), "first");
        assert_eq!(source_line(input, 2), "second");
        assert_eq!(source_line(input, 3), "third");
        assert_eq!(source_line(input, 4), "fourth");
        assert_eq!(source_line(input, 5), "");
        assert_eq!(source_line("", 1), "");
    }

    #[test]
    fn test_operator_classes() {
        assert!(is_control_operator(TokenType::Semicolon));
        assert!(!is_control_operator(TokenType::Great));
        assert!(is_redirection_token(TokenType::Clobber));
        assert!(!is_redirection_token(TokenType::IoNumber));
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::new(
            ParseErrorKind::MalformedOperatorSequence {
                operator: "&".to_string(),
                found: "|".to_string(),
            },
            1,
            23,
            "cat dependecies.txt & | grep pandas",
        );
        assert_eq!(
            err.to_string(),
            "parse error at 1:23: unexpected `|` after `&`\n  cat dependecies.txt & | grep pandas"
        );
    }
}
