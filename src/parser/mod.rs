//! Parser module for shell command lines
//!
//! This module contains the lexer and the recursive-descent parser.

pub mod types;
pub mod lexer;
pub mod parser;

// Re-exports
pub use types::{ParseError, ParseErrorKind};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{parse, tokenize, Parser};
