//! Lexer for Shell Command Lines
//!
//! The lexer turns a line of input into tokens, one at a time, for the parser
//! to pull. It handles:
//! - Control operators (`&`, `&&`, `|`, `||`, `;`)
//! - Redirection operators, including the three-character `<<-`
//! - IO numbers (a single digit directly in front of `<` or `>`)
//! - Words and reserved words
//!
//! The lexer never fails. A character no rule claims starts a word.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Token types for the shell lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    // End of input
    Eof,

    // Control operators
    Amp,       // &
    AndAnd,    // &&
    Pipe,      // |
    OrOr,      // ||
    Semicolon, // ;

    // Redirections
    Less,      // <
    DLess,     // <<
    DLessDash, // <<-
    LessAnd,   // <&
    LessGreat, // <>
    Great,     // >
    DGreat,    // >>
    GreatAnd,  // >&
    Clobber,   // >|

    // Reserved words
    If,
    Then,
    Else,
    Elif,
    Fi,
    Do,
    Done,
    Case,
    Esac,
    While,
    Until,
    For,
    In,
    Function,

    Word,
    IoNumber,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Amp => "&",
            Self::AndAnd => "&&",
            Self::Pipe => "|",
            Self::OrOr => "||",
            Self::Semicolon => ";",
            Self::Less => "<",
            Self::DLess => "<<",
            Self::DLessDash => "<<-",
            Self::LessAnd => "<&",
            Self::LessGreat => "<>",
            Self::Great => ">",
            Self::DGreat => ">>",
            Self::GreatAnd => ">&",
            Self::Clobber => ">|",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::Elif => "elif",
            Self::Fi => "fi",
            Self::Do => "do",
            Self::Done => "done",
            Self::Case => "case",
            Self::Esac => "esac",
            Self::While => "while",
            Self::Until => "until",
            Self::For => "for",
            Self::In => "in",
            Self::Function => "function",
            Self::Word => "WORD",
            Self::IoNumber => "IO_NUMBER",
        }
    }

    pub fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            Self::If
                | Self::Then
                | Self::Else
                | Self::Elif
                | Self::Fi
                | Self::Do
                | Self::Done
                | Self::Case
                | Self::Esac
                | Self::While
                | Self::Until
                | Self::For
                | Self::In
                | Self::Function
        )
    }
}

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    /// 1-based position of the first character
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(token_type: TokenType, value: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            token_type,
            value: value.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_type {
            TokenType::Word | TokenType::IoNumber => {
                write!(f, "{} {}", self.token_type.as_str(), self.value)
            }
            _ => write!(f, "{}", self.token_type.as_str()),
        }
    }
}

lazy_static::lazy_static! {
    /// Reserved words of the command language
    static ref RESERVED_WORDS: HashMap<&'static str, TokenType> = {
        let mut m = HashMap::new();
        m.insert("if", TokenType::If);
        m.insert("then", TokenType::Then);
        m.insert("else", TokenType::Else);
        m.insert("elif", TokenType::Elif);
        m.insert("fi", TokenType::Fi);
        m.insert("do", TokenType::Do);
        m.insert("done", TokenType::Done);
        m.insert("case", TokenType::Case);
        m.insert("esac", TokenType::Esac);
        m.insert("while", TokenType::While);
        m.insert("until", TokenType::Until);
        m.insert("for", TokenType::For);
        m.insert("in", TokenType::In);
        m.insert("function", TokenType::Function);
        m
    };
}

/// Look up the token type of a reserved word
pub fn lookup_reserved_word(word: &str) -> Option<TokenType> {
    RESERVED_WORDS.get(word).copied()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_redirection_char(c: char) -> bool {
    c == '<' || c == '>'
}

/// Lexer over a single buffered line. Used once, front to back.
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The trailing EOF is not included.
    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    /// Produce the next token. Once the input is exhausted every call
    /// returns an EOF token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;

        let c0 = match self.current() {
            Some(c) => c,
            None => return Token::new(TokenType::Eof, "", line, column),
        };
        let c1 = self.peek(1);

        let token_type = match c0 {
            '&' if c1 == Some('&') => TokenType::AndAnd,
            '&' => TokenType::Amp,
            '|' if c1 == Some('|') => TokenType::OrOr,
            '|' => TokenType::Pipe,
            ';' => TokenType::Semicolon,
            '>' => match c1 {
                Some('>') => TokenType::DGreat,
                Some('&') => TokenType::GreatAnd,
                Some('|') => TokenType::Clobber,
                _ => TokenType::Great,
            },
            '<' => match c1 {
                Some('<') if self.peek(2) == Some('-') => TokenType::DLessDash,
                Some('<') => TokenType::DLess,
                Some('&') => TokenType::LessAnd,
                Some('>') => TokenType::LessGreat,
                _ => TokenType::Less,
            },
            c if c.is_ascii_digit() => return self.read_number(line, column),
            _ => return self.read_word(line, column),
        };

        let value = token_type.as_str();
        for _ in value.chars() {
            self.advance();
        }
        Token::new(token_type, value, line, column)
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.current();
        if self.pos < self.input.len() {
            self.pos += 1;
            self.column += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current() {
            match c {
                // \r\n counts as a single line break
                '\r' if self.peek(1) == Some('\n') => {
                    self.pos += 1;
                }
                '\n' | '\r' => {
                    self.pos += 1;
                    self.line += 1;
                    self.column = 1;
                }
                c if c.is_whitespace() => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    /// A digit touching `<` or `>` is a file descriptor. Anything else is
    /// the whole digit run as a plain word, so `123>` is not an IO number.
    fn read_number(&mut self, line: usize, column: usize) -> Token {
        if self.peek(1).is_some_and(is_redirection_char) {
            let digit = self.advance().map(String::from).unwrap_or_default();
            return Token::new(TokenType::IoNumber, digit, line, column);
        }

        let mut value = String::new();
        while let Some(c) = self.current().filter(char::is_ascii_digit) {
            value.push(c);
            self.advance();
        }
        Token::new(TokenType::Word, value, line, column)
    }

    fn read_word(&mut self, line: usize, column: usize) -> Token {
        let mut value = String::new();
        if let Some(first) = self.advance() {
            value.push(first);
        }
        while let Some(c) = self.current().filter(|c| is_word_char(*c)) {
            value.push(c);
            self.advance();
        }

        let token_type = lookup_reserved_word(&value).unwrap_or(TokenType::Word);
        Token::new(token_type, value, line, column)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.token_type != TokenType::Eof).then_some(token)
    }
}
