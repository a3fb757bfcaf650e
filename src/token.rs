// SPDX-License-Identifier: Unlicense

/// Token classification.
///
/// The order matters: every kind at or after [`TokenKind::Skip`] is a skip
/// token and never reaches the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Invalid,
    Number,
    BinaryOperator,
    EndOfInput,
    /// Returned on every request after `EndOfInput` was produced.
    Done,
    Skip,
    Space,
    Comment,
}

impl TokenKind {
    pub fn is_skip(self) -> bool {
        self >= TokenKind::Skip
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BinaryOperator {
    #[default]
    Invalid,
    Add,
    Subtract,
    Multiply,
    Divide,
    Greater,
    Less,
}

impl BinaryOperator {
    pub fn from_byte(c: u8) -> Self {
        match c {
            b'+' => BinaryOperator::Add,
            b'-' => BinaryOperator::Subtract,
            b'*' => BinaryOperator::Multiply,
            b'/' => BinaryOperator::Divide,
            b'>' => BinaryOperator::Greater,
            b'<' => BinaryOperator::Less,
            _ => BinaryOperator::Invalid,
        }
    }

    /// Binding strength; higher binds tighter. `Invalid` has none.
    pub fn precedence(self) -> u32 {
        match self {
            BinaryOperator::Greater | BinaryOperator::Less => 1,
            BinaryOperator::Add | BinaryOperator::Subtract => 2,
            BinaryOperator::Multiply | BinaryOperator::Divide => 3,
            BinaryOperator::Invalid => 0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Greater => ">",
            BinaryOperator::Less => "<",
            BinaryOperator::Invalid => "?",
        }
    }
}

/// A span into the source buffer plus its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub offset: usize,
    pub length: usize,
    pub kind: TokenKind,
    /// Only meaningful when `kind` is [`TokenKind::BinaryOperator`].
    pub operator: BinaryOperator,
}

impl Token {
    pub fn new(offset: usize, length: usize, kind: TokenKind) -> Self {
        Self {
            offset,
            length,
            kind,
            operator: BinaryOperator::Invalid,
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}
