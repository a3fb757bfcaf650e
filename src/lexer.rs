// SPDX-License-Identifier: Unlicense
use crate::token::{BinaryOperator, Token, TokenKind};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Active,
    /// `EndOfInput` has been produced, `Done` has not.
    EndOfInput,
    Exhausted,
}

/// A cursor over a borrowed source buffer. The cursor only moves forward.
#[derive(Debug, Clone)]
pub struct Stream<'a> {
    buffer: &'a [u8],
    offset: usize,
    length: usize,
    done: bool,
    exhausted: bool,
}

fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_operator(c: u8) -> bool {
    matches!(c, b'+' | b'-' | b'*' | b'/' | b'>' | b'<')
}

impl<'a> Stream<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            length: buffer.len(),
            done: false,
            exhausted: false,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn state(&self) -> StreamState {
        match (self.done, self.exhausted) {
            (false, _) => StreamState::Active,
            (true, false) => StreamState::EndOfInput,
            (true, true) => StreamState::Exhausted,
        }
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    /// The source text a token spans.
    pub fn text(&self, token: &Token) -> &'a [u8] {
        &self.buffer[token.offset..token.end()]
    }

    fn scan_while(&self, from: usize, pred: impl Fn(u8) -> bool) -> usize {
        let mut it = from;
        while it < self.length && pred(self.buffer[it]) {
            it += 1;
        }
        it
    }

    /// Classifies the input at the cursor and moves past it. Whitespace and
    /// comments come back as skip tokens.
    pub fn next_raw_token(&mut self) -> Token {
        if self.done {
            self.exhausted = true;
            return Token::new(self.offset, 0, TokenKind::Done);
        }

        let begin = self.offset;
        if begin == self.length {
            self.done = true;
            return Token::new(begin, 0, TokenKind::EndOfInput);
        }

        let c = self.buffer[begin];
        let mut token = if is_space(c) {
            let end = self.scan_while(begin + 1, is_space);
            Token::new(begin, end - begin, TokenKind::Space)
        } else if c == b'#' {
            let end = self.scan_while(begin + 1, |c| c != b'\n');
            Token::new(begin, end - begin, TokenKind::Comment)
        } else if c.is_ascii_digit() {
            let end = self.scan_while(begin + 1, |c| c.is_ascii_digit());
            Token::new(begin, end - begin, TokenKind::Number)
        } else if is_operator(c) {
            Token::new(begin, 1, TokenKind::BinaryOperator)
        } else {
            // unknown input: swallow the rest so the caller sees one bad token
            Token::new(begin, self.length - begin, TokenKind::Invalid)
        };
        if token.kind == TokenKind::BinaryOperator {
            token.operator = BinaryOperator::from_byte(c);
        }

        self.offset += token.length;
        token
    }

    /// Next token the parser cares about, dropping whitespace and comments.
    pub fn next_non_skip_token(&mut self) -> Token {
        loop {
            let token = self.next_raw_token();
            if !token.kind.is_skip() {
                trace!(kind = ?token.kind, offset = token.offset, "token");
                return token;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_kinds(src: &str) -> Vec<TokenKind> {
        let mut stream = Stream::new(src.as_bytes());
        let mut kinds = vec![];
        loop {
            let token = stream.next_raw_token();
            kinds.push(token.kind);
            if token.kind == TokenKind::EndOfInput {
                return kinds;
            }
        }
    }

    #[test]
    fn lexer_should_classify_raw_tokens() {
        use TokenKind::*;
        assert_eq!(
            raw_kinds("12 +\t3 # note\n*4"),
            vec![
                Number,
                Space,
                BinaryOperator,
                Space,
                Number,
                Space,
                Comment,
                Space,
                BinaryOperator,
                Number,
                EndOfInput
            ]
        );
    }

    #[test]
    fn lexer_should_take_maximal_digit_run() {
        let mut stream = Stream::new(b"007123+");
        let token = stream.next_raw_token();
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(stream.text(&token), b"007123");
        assert_eq!(stream.offset(), 6);
    }

    #[test]
    fn lexer_should_map_operators() {
        let mut stream = Stream::new(b"+-*/><");
        let expected = [
            BinaryOperator::Add,
            BinaryOperator::Subtract,
            BinaryOperator::Multiply,
            BinaryOperator::Divide,
            BinaryOperator::Greater,
            BinaryOperator::Less,
        ];
        for op in expected {
            let token = stream.next_raw_token();
            assert_eq!(token.kind, TokenKind::BinaryOperator);
            assert_eq!(token.operator, op);
            assert_eq!(token.length, 1);
        }
    }

    #[test]
    fn comment_should_stop_before_newline() {
        let mut stream = Stream::new(b"# hi\n1");
        let token = stream.next_raw_token();
        assert_eq!(token.kind, TokenKind::Comment);
        assert_eq!(stream.text(&token), b"# hi");
        assert_eq!(stream.next_raw_token().kind, TokenKind::Space);
    }

    #[test]
    fn comment_should_run_to_end_of_buffer() {
        let mut stream = Stream::new(b"1 # trailing");
        assert_eq!(stream.next_non_skip_token().kind, TokenKind::Number);
        assert_eq!(stream.next_non_skip_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn invalid_character_should_consume_rest_of_buffer() {
        let mut stream = Stream::new(b"1 x + 2");
        stream.next_non_skip_token();
        let token = stream.next_non_skip_token();
        assert_eq!(token.kind, TokenKind::Invalid);
        assert_eq!(token.offset, 2);
        assert_eq!(stream.text(&token), b"x + 2");
        assert_eq!(stream.next_non_skip_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn end_of_stream_should_be_idempotent() {
        let mut stream = Stream::new(b"7");
        stream.next_raw_token();
        assert_eq!(stream.state(), StreamState::Active);

        let eoi = stream.next_raw_token();
        assert_eq!(eoi.kind, TokenKind::EndOfInput);
        assert_eq!(eoi.length, 0);
        assert_eq!(stream.state(), StreamState::EndOfInput);

        for _ in 0..3 {
            let token = stream.next_raw_token();
            assert_eq!(token.kind, TokenKind::Done);
            assert_eq!(stream.offset(), 1);
            assert_eq!(stream.state(), StreamState::Exhausted);
        }
    }

    #[test]
    fn non_skip_token_should_never_surface_skip_kinds() {
        let mut stream = Stream::new(b"  # a\n  # b\n\t5");
        let token = stream.next_non_skip_token();
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(stream.text(&token), b"5");
    }

    #[test]
    fn empty_buffer_should_end_immediately() {
        let mut stream = Stream::new(b"");
        assert_eq!(stream.next_non_skip_token().kind, TokenKind::EndOfInput);
        assert!(stream.is_done());
        assert_eq!(stream.next_non_skip_token().kind, TokenKind::Done);
    }
}
