//! Abstract Syntax Tree (AST) Types for Shell Command Lines
//!
//! Architecture:
//!   Input → Lexer → Parser → AST → rendered text

pub mod types;
