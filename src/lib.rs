//! arosh - the command-language front end of a small interactive shell
//!
//! This library turns one line of shell input into a syntax tree describing
//! what was written: commands, their parameters and redirections, and the
//! `;` `&` `&&` `||` `|` operators joining them. Nothing is expanded or
//! executed.
//!
//! ```
//! let program = arosh::parse("cat file | grep struct & echo sup").unwrap();
//! assert_eq!(
//!     program.to_string(),
//!     "(sequence & (pipe (simpleCommand cat [file]) (simpleCommand grep [struct])) \
//!      (simpleCommand echo [sup]))"
//! );
//! ```

pub mod ast;
pub mod parser;

pub use ast::types::*;
pub use parser::{parse, tokenize, Lexer, ParseError, ParseErrorKind, Parser, Token, TokenType};
