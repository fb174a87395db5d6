//! Recursive Descent Parser for Shell Command Lines
//!
//! The parser pulls tokens from the lexer one at a time, keeping exactly one
//! token of lookahead, and folds them into an AST.
//!
//! Grammar, loosest binding first:
//!   program       ::= sequence* EOF
//!   sequence      ::= conditional ((';' | '&') conditional?)*
//!   conditional   ::= pipe (('&&' | '||') pipe)*
//!   pipe          ::= command ('|' command)*
//!   command       ::= simple_command | function_def | compound_command
//!   simple_cmd    ::= WORD (WORD | redirection)*
//!   redirection   ::= [IO_NUMBER] redirection_op WORD
//!
//! Every binary level is a left fold. After an operator the next token must
//! not be another control operator.

use crate::ast::types::{
    ConditionalOperator, Node, ProgramNode, RedirectionNode, RedirectionOperator,
    SeparatorOperator, AST,
};
use crate::parser::lexer::{Lexer, Token, TokenType};
use crate::parser::types::{
    is_control_operator, is_redirection_token, source_line, ParseError, ParseErrorKind,
};

/// Parse function for one precedence level
type LevelFn<'a> = fn(&mut Parser<'a>) -> Result<Option<Node>, ParseError>;

/// Parser over a single line of input. Consumed by [`Parser::parse`].
pub struct Parser<'a> {
    input: &'a str,
    lexer: Lexer,
    current: Token,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            input,
            lexer,
            current,
        }
    }

    /// Parse the whole line. The first error aborts the parse; there is no
    /// partial tree.
    pub fn parse(mut self) -> Result<ProgramNode, ParseError> {
        tracing::debug!(input = self.input, "parsing line");
        let result = self.parse_program();
        if let Err(ref e) = result {
            tracing::debug!(line = e.line, column = e.column, "parse failed: {}", e.kind);
        }
        result
    }

    // ===========================================================================
    // HELPER METHODS
    // ===========================================================================

    fn check(&self, types: &[TokenType]) -> bool {
        types.contains(&self.current.token_type)
    }

    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        tracing::trace!(token = %next, line = next.line, column = next.column, "next token");
        std::mem::replace(&mut self.current, next)
    }

    fn error(&self, kind: ParseErrorKind, at: &Token) -> ParseError {
        ParseError::new(kind, at.line, at.column, source_line(self.input, at.line))
    }

    /// Fails if the token after `operator` is another control operator.
    fn reject_operator(&self, operator: &Token) -> Result<(), ParseError> {
        if is_control_operator(self.current.token_type) {
            return Err(self.error(
                ParseErrorKind::MalformedOperatorSequence {
                    operator: operator.value.clone(),
                    found: self.current.value.clone(),
                },
                &self.current,
            ));
        }
        Ok(())
    }

    /// Parse the right operand of `operator`, which must be present.
    fn require_operand(&mut self, operator: &Token, level: LevelFn<'a>) -> Result<Node, ParseError> {
        match level(self)? {
            Some(node) => Ok(node),
            None => Err(self.error(
                ParseErrorKind::UnexpectedEof {
                    operator: operator.value.clone(),
                },
                &self.current,
            )),
        }
    }

    // ===========================================================================
    // PROGRAM
    // ===========================================================================

    fn parse_program(&mut self) -> Result<ProgramNode, ParseError> {
        let mut nodes = Vec::new();

        while !self.check(&[TokenType::Eof]) {
            let Some(node) = self.parse_sequence()? else {
                break;
            };
            nodes.push(node);
        }

        Ok(AST::program(nodes))
    }

    // ===========================================================================
    // PRECEDENCE LEVELS
    // ===========================================================================

    fn parse_sequence(&mut self) -> Result<Option<Node>, ParseError> {
        let Some(mut lhs) = self.parse_conditional()? else {
            return Ok(None);
        };

        while self.check(&[TokenType::Semicolon, TokenType::Amp]) {
            let op = self.advance();
            self.reject_operator(&op)?;

            let separator = if op.token_type == TokenType::Semicolon {
                SeparatorOperator::Semi
            } else {
                SeparatorOperator::Amp
            };
            // `tmux &` is complete: a separator may end the line
            let rhs = self.parse_conditional()?;
            lhs = AST::sequence(separator, lhs, rhs);
        }

        Ok(Some(lhs))
    }

    fn parse_conditional(&mut self) -> Result<Option<Node>, ParseError> {
        let Some(mut lhs) = self.parse_pipe()? else {
            return Ok(None);
        };

        while self.check(&[TokenType::AndAnd, TokenType::OrOr]) {
            let op = self.advance();
            self.reject_operator(&op)?;

            let operator = if op.token_type == TokenType::AndAnd {
                ConditionalOperator::And
            } else {
                ConditionalOperator::Or
            };
            let rhs = self.require_operand(&op, Self::parse_pipe)?;
            lhs = AST::conditional(operator, lhs, rhs);
        }

        Ok(Some(lhs))
    }

    fn parse_pipe(&mut self) -> Result<Option<Node>, ParseError> {
        let Some(mut lhs) = self.parse_command()? else {
            return Ok(None);
        };

        while self.check(&[TokenType::Pipe]) {
            let op = self.advance();
            self.reject_operator(&op)?;

            let rhs = self.require_operand(&op, Self::parse_command)?;
            lhs = AST::pipe(lhs, rhs);
        }

        Ok(Some(lhs))
    }

    // ===========================================================================
    // COMMAND PARSING
    // ===========================================================================

    /// Returns `None` only at end of input.
    fn parse_command(&mut self) -> Result<Option<Node>, ParseError> {
        match self.current.token_type {
            TokenType::Eof => Ok(None),
            TokenType::Function => self.parse_function_def(),
            TokenType::Word => self.parse_simple_command().map(Some),
            _ => self.parse_compound_command(),
        }
    }

    fn parse_function_def(&mut self) -> Result<Option<Node>, ParseError> {
        Err(self.error(
            ParseErrorKind::Unsupported {
                construct: "function definition".to_string(),
            },
            &self.current,
        ))
    }

    /// Brace groups and control structures are recognized by their opening
    /// token only.
    fn parse_compound_command(&mut self) -> Result<Option<Node>, ParseError> {
        let token = &self.current;
        let kind = if token.token_type.is_reserved_word() {
            ParseErrorKind::Unsupported {
                construct: format!("`{}` compound command", token.value),
            }
        } else {
            ParseErrorKind::UnexpectedToken {
                found: token.value.clone(),
            }
        };
        Err(self.error(kind, token))
    }

    fn parse_simple_command(&mut self) -> Result<Node, ParseError> {
        let name = self.advance().value;
        let mut params = Vec::new();
        let mut redirections = Vec::new();

        loop {
            let t = self.current.token_type;
            // Reserved words only matter in command position
            if t == TokenType::Word || t.is_reserved_word() {
                params.push(self.advance().value);
            } else if t == TokenType::IoNumber || is_redirection_token(t) {
                redirections.push(self.parse_redirection()?);
            } else {
                break;
            }
        }

        Ok(AST::simple_command(name, params, redirections))
    }

    fn parse_redirection(&mut self) -> Result<RedirectionNode, ParseError> {
        let io_number = if self.check(&[TokenType::IoNumber]) {
            self.advance().value.parse::<u32>().ok()
        } else {
            None
        };

        let Some(operator) = redirection_operator(self.current.token_type) else {
            return Err(self.error(
                ParseErrorKind::UnexpectedToken {
                    found: self.current.value.clone(),
                },
                &self.current,
            ));
        };
        let op = self.advance();

        if self.current.token_type != TokenType::Word && !self.current.token_type.is_reserved_word() {
            return Err(self.error(
                ParseErrorKind::UnterminatedRedirection { operator: op.value },
                &self.current,
            ));
        }
        let file = self.advance().value;

        Ok(AST::redirection(io_number, operator, file))
    }
}

fn redirection_operator(t: TokenType) -> Option<RedirectionOperator> {
    let operator = match t {
        TokenType::Less => RedirectionOperator::Less,
        TokenType::DLess => RedirectionOperator::DLess,
        TokenType::DLessDash => RedirectionOperator::DLessDash,
        TokenType::LessAnd => RedirectionOperator::LessAnd,
        TokenType::LessGreat => RedirectionOperator::LessGreat,
        TokenType::Great => RedirectionOperator::Great,
        TokenType::DGreat => RedirectionOperator::DGreat,
        TokenType::GreatAnd => RedirectionOperator::GreatAnd,
        TokenType::Clobber => RedirectionOperator::Clobber,
        _ => return None,
    };
    Some(operator)
}

/// Convenience function to parse one line
pub fn parse(input: &str) -> Result<ProgramNode, ParseError> {
    Parser::new(input).parse()
}

/// Convenience function to tokenize one line
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}
