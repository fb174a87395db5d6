//! Abstract Syntax Tree (AST) Types for Shell Command Lines
//!
//! The tree records what was written on the line: which commands, joined by
//! which operators, with which redirections. It carries no execution
//! behaviour. Each node renders to a canonical parenthesized form through
//! `Display`, used to echo the parsed structure back to the user.

use serde::Serialize;
use std::fmt;

// =============================================================================
// PROGRAM
// =============================================================================

/// Root node: everything parsed from one line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProgramNode {
    pub nodes: Vec<Node>,
}

impl fmt::Display for ProgramNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

// =============================================================================
// NODES
// =============================================================================

/// Union of all command-position nodes.
///
/// Binary variants are always built by a left fold, so a chain of operators
/// at one precedence level leans left: `a & b & c` is
/// `Sequence(Sequence(a, b), c)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    /// `lhs ; rhs` or `lhs & rhs`. A trailing separator leaves `rhs` empty.
    Sequence {
        separator: SeparatorOperator,
        lhs: Box<Node>,
        rhs: Option<Box<Node>>,
    },
    /// `lhs && rhs` or `lhs || rhs`
    Conditional {
        operator: ConditionalOperator,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    /// `lhs | rhs`
    Pipe { lhs: Box<Node>, rhs: Box<Node> },
    SimpleCommand(SimpleCommandNode),
    /// Not produced by the parser yet.
    Subshell(SubshellNode),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence {
                separator,
                lhs,
                rhs: Some(rhs),
            } => write!(f, "(sequence {} {} {})", separator, lhs, rhs),
            Self::Sequence {
                separator,
                lhs,
                rhs: None,
            } => write!(f, "(sequence {} {})", separator, lhs),
            Self::Conditional { operator, lhs, rhs } => {
                write!(f, "(conditional {} {} {})", operator, lhs, rhs)
            }
            Self::Pipe { lhs, rhs } => write!(f, "(pipe {} {})", lhs, rhs),
            Self::SimpleCommand(command) => write!(f, "{}", command),
            Self::Subshell(subshell) => write!(f, "{}", subshell),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeparatorOperator {
    #[serde(rename = ";")]
    Semi, // ;
    #[serde(rename = "&")]
    Amp, // &
}

impl fmt::Display for SeparatorOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Semi => write!(f, ";"),
            Self::Amp => write!(f, "&"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConditionalOperator {
    #[serde(rename = "&&")]
    And, // &&
    #[serde(rename = "||")]
    Or, // ||
}

impl fmt::Display for ConditionalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Simple command: name params... with optional redirections
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleCommandNode {
    pub name: String,
    /// Parameters in source order
    pub params: Vec<String>,
    /// Redirections in source order
    pub redirections: Vec<RedirectionNode>,
}

impl fmt::Display for SimpleCommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(simpleCommand {} [{}]", self.name, self.params.join(" "))?;
        for redirection in &self.redirections {
            write!(f, " {}", redirection)?;
        }
        write!(f, ")")
    }
}

/// Subshell: ( ... )
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SubshellNode {
    pub nodes: Vec<Node>,
}

impl fmt::Display for SubshellNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(subshell")?;
        for node in &self.nodes {
            write!(f, " {}", node)?;
        }
        write!(f, ")")
    }
}

// =============================================================================
// REDIRECTIONS
// =============================================================================

/// `[n]op file`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectionNode {
    /// File descriptor written in front of the operator, if any
    pub io_number: Option<u32>,
    pub operator: RedirectionOperator,
    pub file: String,
}

impl fmt::Display for RedirectionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.io_number {
            Some(fd) => write!(f, "(redirection {} {} {})", fd, self.operator, self.file),
            None => write!(f, "(redirection {} {})", self.operator, self.file),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RedirectionOperator {
    #[serde(rename = "<")]
    Less, // <
    #[serde(rename = "<<")]
    DLess, // <<
    #[serde(rename = "<<-")]
    DLessDash, // <<-
    #[serde(rename = "<&")]
    LessAnd, // <&
    #[serde(rename = "<>")]
    LessGreat, // <>
    #[serde(rename = ">")]
    Great, // >
    #[serde(rename = ">>")]
    DGreat, // >>
    #[serde(rename = ">&")]
    GreatAnd, // >&
    #[serde(rename = ">|")]
    Clobber, // >|
}

impl fmt::Display for RedirectionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Less => write!(f, "<"),
            Self::DLess => write!(f, "<<"),
            Self::DLessDash => write!(f, "<<-"),
            Self::LessAnd => write!(f, "<&"),
            Self::LessGreat => write!(f, "<>"),
            Self::Great => write!(f, ">"),
            Self::DGreat => write!(f, ">>"),
            Self::GreatAnd => write!(f, ">&"),
            Self::Clobber => write!(f, ">|"),
        }
    }
}

// =============================================================================
// FACTORY
// =============================================================================

/// Node constructors, shared by the parser and by tests building expected trees
pub struct AST;

impl AST {
    pub fn program(nodes: Vec<Node>) -> ProgramNode {
        ProgramNode { nodes }
    }

    pub fn sequence(separator: SeparatorOperator, lhs: Node, rhs: Option<Node>) -> Node {
        Node::Sequence {
            separator,
            lhs: Box::new(lhs),
            rhs: rhs.map(Box::new),
        }
    }

    pub fn conditional(operator: ConditionalOperator, lhs: Node, rhs: Node) -> Node {
        Node::Conditional {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn pipe(lhs: Node, rhs: Node) -> Node {
        Node::Pipe {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn simple_command(
        name: impl Into<String>,
        params: Vec<String>,
        redirections: Vec<RedirectionNode>,
    ) -> Node {
        Node::SimpleCommand(SimpleCommandNode {
            name: name.into(),
            params,
            redirections,
        })
    }

    /// Shorthand for a redirection-free command from whitespace-separated words
    pub fn command(words: &str) -> Node {
        let mut words = words.split_whitespace().map(String::from);
        let name = words.next().unwrap_or_default();
        Self::simple_command(name, words.collect(), vec![])
    }

    pub fn redirection(
        io_number: Option<u32>,
        operator: RedirectionOperator,
        file: impl Into<String>,
    ) -> RedirectionNode {
        RedirectionNode {
            io_number,
            operator,
            file: file.into(),
        }
    }

    pub fn subshell(nodes: Vec<Node>) -> Node {
        Node::Subshell(SubshellNode { nodes })
    }
}
