// SPDX-License-Identifier: Unlicense
use crate::ast::{self, Node, NodeKind};
use crate::lexer::Stream;
use crate::token::{Token, TokenKind};
use thiserror::Error;
use tracing::{debug, trace};

const INITIAL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected a number at offset {offset}, found {found:?}")]
    ExpectedOperand { offset: usize, found: TokenKind },

    #[error("expected end of input at offset {offset}, found {found:?}")]
    ExpectedEndOfInput { offset: usize, found: TokenKind },

    #[error("malformed character at offset {offset}")]
    MalformedCharacter { offset: usize },

    #[error("expression nested deeper than {limit} levels at offset {offset}")]
    NestingTooDeep { offset: usize, limit: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match *self {
            ParseError::ExpectedOperand { offset, .. }
            | ParseError::ExpectedEndOfInput { offset, .. }
            | ParseError::MalformedCharacter { offset }
            | ParseError::NestingTooDeep { offset, .. } => offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of nested `parse_expression` calls.
    ///
    /// A nested call only happens when an operator binds tighter than the
    /// one before it, so this bounds precedence levels climbed at once, not
    /// tree depth. Chains at a single level fold in a loop and never count.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// Result of a top-level parse. On failure `root` is the null ref and the
/// arena may hold unreachable partial nodes.
pub struct Parse {
    pub arena: ast::Arena,
    pub root: ast::Id,
    pub error: Option<ParseError>,
}

impl Parse {
    pub fn ok(&self) -> bool {
        !ast::is_null(self.root)
    }

    pub fn node(&self, id: ast::Id) -> Option<&Node> {
        self.arena.get(id)
    }

    pub fn into_result(self) -> Result<(ast::Arena, ast::Id), ParseError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok((self.arena, self.root)),
        }
    }
}

pub struct Parser<'a> {
    arena: ast::Arena,
    stream: Stream<'a>,
    lookahead: Option<Token>,
    root: ast::Id,
    config: ParserConfig,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(stream: Stream<'a>, config: ParserConfig) -> Self {
        let mut arena = ast::Arena::with_capacity(INITIAL_CAPACITY);
        let root = arena.alloc(Node::default());
        Self {
            arena,
            stream,
            lookahead: None,
            root,
            config,
            depth: 0,
        }
    }

    /// Peeks the next non-skip token, fetching it on first use.
    pub fn current_token(&mut self) -> Token {
        match self.lookahead {
            Some(token) => token,
            None => {
                let token = self.stream.next_non_skip_token();
                self.lookahead = Some(token);
                token
            }
        }
    }

    pub fn consume_current_token(&mut self) {
        let consumed = self.lookahead.take();
        assert!(consumed.is_some(), "consumed a token that was never peeked");
    }

    pub fn allocate_node(&mut self, kind: NodeKind) -> ast::Id {
        let id = self.arena.alloc(Node { kind });
        trace!(index = id.index(), "allocated node");
        id
    }

    fn operand_error(token: Token) -> ParseError {
        match token.kind {
            TokenKind::Invalid => ParseError::MalformedCharacter {
                offset: token.offset,
            },
            found => ParseError::ExpectedOperand {
                offset: token.offset,
                found,
            },
        }
    }

    /// Parses a number literal. The token is left in place when it is not one.
    pub fn parse_leaf(&mut self) -> Option<ast::Id> {
        let token = self.current_token();
        if token.kind != TokenKind::Number {
            return None;
        }
        self.consume_current_token();
        Some(self.allocate_node(NodeKind::Leaf(token)))
    }

    pub fn parse_expression(&mut self, min_precedence: u32) -> Result<ast::Id, ParseError> {
        if self.depth >= self.config.max_depth {
            let offset = self.current_token().offset;
            debug!(offset, limit = self.config.max_depth, "nesting too deep");
            return Err(ParseError::NestingTooDeep {
                offset,
                limit: self.config.max_depth,
            });
        }

        let Some(mut left) = self.parse_leaf() else {
            let err = Self::operand_error(self.current_token());
            debug!(offset = err.offset(), "{}", err);
            return Err(err);
        };

        self.depth += 1;
        let folded = loop {
            match self.parse_increasing_precedence(left, min_precedence) {
                Ok(node) if node == left => break Ok(left),
                Ok(node) => left = node,
                Err(e) => break Err(e),
            }
        };
        self.depth -= 1;
        folded
    }

    /// Folds one operator into `left` if it binds tighter than
    /// `min_precedence`; returns `left` itself when there is nothing to fold.
    pub fn parse_increasing_precedence(
        &mut self,
        left: ast::Id,
        min_precedence: u32,
    ) -> Result<ast::Id, ParseError> {
        let token = self.current_token();
        if token.kind != TokenKind::BinaryOperator {
            return Ok(left);
        }

        let next_precedence = token.operator.precedence();
        if next_precedence <= min_precedence {
            return Ok(left);
        }

        self.consume_current_token();
        // the right operand's own errors were already reported below
        let right = self.parse_expression(next_precedence)?;

        Ok(self.allocate_node(NodeKind::BinaryOperator { token, left, right }))
    }

    fn run(&mut self) -> Result<ast::Id, ParseError> {
        let root = self.parse_expression(0)?;
        let token = self.current_token();
        let err = match token.kind {
            TokenKind::EndOfInput => return Ok(root),
            TokenKind::Invalid => ParseError::MalformedCharacter {
                offset: token.offset,
            },
            found => ParseError::ExpectedEndOfInput {
                offset: token.offset,
                found,
            },
        };
        debug!(offset = token.offset, "{}", err);
        Err(err)
    }

    pub fn finish(mut self) -> Parse {
        let error = match self.run() {
            Ok(root) => {
                self.root = root;
                None
            }
            Err(e) => Some(e),
        };
        Parse {
            arena: self.arena,
            root: self.root,
            error,
        }
    }
}

pub fn parse(buffer: &[u8]) -> Parse {
    parse_with_config(buffer, &ParserConfig::default())
}

pub fn parse_with_config(buffer: &[u8], config: &ParserConfig) -> Parse {
    Parser::new(Stream::new(buffer), *config).finish()
}
