//! Pull-based token stream with one-token lookahead
//!
//! The stream keeps exactly four pieces of state besides the sticky error:
//! the byte position, the current token, the previous token and a refill
//! flag. A [`Checkpoint`] copies those four, so speculative scanning costs
//! nothing to undo.

use logos::Logos;
use sqlport_ast::Span;

use crate::{LexError, RawToken, Token, TokenKind};

/// Saved stream state for speculative scanning
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint<'a> {
    pos: usize,
    current: Token<'a>,
    previous: Token<'a>,
    refill: bool,
}

pub struct TokenStream<'a> {
    source: &'a str,
    pos: usize,
    current: Token<'a>,
    previous: Token<'a>,
    refill: bool,
    error: Option<LexError>,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            current: Token::eof(0),
            previous: Token::eof(0),
            refill: true,
            error: None,
        }
    }

    /// Look at the current token without consuming it.
    ///
    /// Once a lexical error has been seen, every call returns it again.
    pub fn peek(&mut self) -> Result<Token<'a>, LexError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.refill {
            match self.lex() {
                Ok(token) => {
                    self.previous = self.current;
                    self.current = token;
                    self.refill = false;
                }
                Err(err) => {
                    self.error = Some(err.clone());
                    return Err(err);
                }
            }
        }
        Ok(self.current)
    }

    /// Mark the current token consumed
    pub fn pop(&mut self) {
        self.refill = true;
    }

    /// Push the current token back: the previous token becomes current
    /// again and the pushed-back token is lexed anew by the next `peek`.
    pub fn rewind_one(&mut self) {
        self.pos = self.current.span.start;
        self.current = self.previous;
        self.refill = true;
    }

    pub fn checkpoint(&self) -> Checkpoint<'a> {
        Checkpoint {
            pos: self.pos,
            current: self.current,
            previous: self.previous,
            refill: self.refill,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint<'a>) {
        self.pos = checkpoint.pos;
        self.current = checkpoint.current;
        self.previous = checkpoint.previous;
        self.refill = checkpoint.refill;
    }

    /// Byte position just past the last lexed token
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn slice(&self, span: Span) -> &'a str {
        &self.source[span.start..span.end]
    }

    fn lex(&mut self) -> Result<Token<'a>, LexError> {
        let rest = &self.source[self.pos..];
        let mut lexer = RawToken::lexer(rest);

        let Some(result) = lexer.next() else {
            self.pos = self.source.len();
            return Ok(Token::eof(self.pos));
        };

        let span = Span::new(self.pos + lexer.span().start, self.pos + lexer.span().end);
        match result {
            Ok(raw) => {
                self.pos = span.end;
                Ok(Token {
                    kind: TokenKind::from_raw(raw, lexer.slice()),
                    span,
                })
            }
            // Every byte outside whitespace starts a symbol, a word or a
            // quote, so a failed match is always an unclosed quote.
            Err(()) => Err(LexError::UnterminatedLiteral { offset: span.start }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words<'a>(stream: &mut TokenStream<'a>) -> Vec<TokenKind<'a>> {
        let mut out = Vec::new();
        loop {
            let token = stream.peek().unwrap();
            if token.is_eof() {
                break;
            }
            out.push(token.kind);
            stream.pop();
        }
        out
    }

    #[test]
    fn test_peek_is_idempotent() {
        let mut stream = TokenStream::new("select * from t1");
        let first = stream.peek().unwrap();
        let second = stream.peek().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.kind, TokenKind::Word("select"));
        assert_eq!(first.span, Span::new(0, 6));
    }

    #[test]
    fn test_symbols_split_words() {
        let mut stream = TokenStream::new("t1(name,age)>=x.y");
        assert_eq!(
            words(&mut stream),
            vec![
                TokenKind::Word("t1"),
                TokenKind::Symbol('('),
                TokenKind::Word("name"),
                TokenKind::Symbol(','),
                TokenKind::Word("age"),
                TokenKind::Symbol(')'),
                TokenKind::Symbol('>'),
                TokenKind::Symbol('='),
                TokenKind::Word("x"),
                TokenKind::Symbol('.'),
                TokenKind::Word("y"),
            ]
        );
    }

    #[test]
    fn test_quoted_literals() {
        let mut stream = TokenStream::new("values('xyz', \"a b\")");
        let kinds = words(&mut stream);
        assert_eq!(kinds[2], TokenKind::Quoted("xyz"));
        assert_eq!(kinds[4], TokenKind::Quoted("a b"));
    }

    #[test]
    fn test_quote_inside_word_does_not_open_literal() {
        let mut stream = TokenStream::new("o'brien x");
        assert_eq!(
            words(&mut stream),
            vec![TokenKind::Word("o'brien"), TokenKind::Word("x")]
        );
    }

    #[test]
    fn test_eof_repeats() {
        let mut stream = TokenStream::new("  a \n\t");
        stream.peek().unwrap();
        stream.pop();
        for _ in 0..3 {
            let token = stream.peek().unwrap();
            assert!(token.is_eof());
            stream.pop();
        }
        assert_eq!(stream.offset(), 6);
    }

    #[test]
    fn test_unterminated_literal_is_sticky() {
        let mut stream = TokenStream::new("x='abc");
        stream.peek().unwrap();
        stream.pop();
        stream.peek().unwrap();
        stream.pop();

        let err = stream.peek().unwrap_err();
        assert_eq!(err, LexError::UnterminatedLiteral { offset: 2 });
        stream.pop();
        assert_eq!(stream.peek().unwrap_err(), err);
        assert_eq!(stream.peek().unwrap_err(), err);
    }

    #[test]
    fn test_rewind_one_relexes_current() {
        let mut stream = TokenStream::new("from t1 insert into");
        stream.peek().unwrap();
        stream.pop();
        stream.peek().unwrap();
        stream.pop();
        let boundary = stream.peek().unwrap();
        assert!(boundary.is_keyword("insert"));

        stream.rewind_one();
        assert_eq!(stream.offset(), boundary.span.start);

        let again = stream.peek().unwrap();
        assert_eq!(again, boundary);
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut stream = TokenStream::new("insert into t1 values (1)");
        stream.peek().unwrap();
        let saved = stream.checkpoint();

        for _ in 0..4 {
            stream.pop();
            stream.peek().unwrap();
        }
        assert!(stream.peek().unwrap().is_symbol('('));

        stream.restore(saved);
        assert!(stream.peek().unwrap().is_keyword("INSERT"));
    }

    #[test]
    fn test_keywords_only_match_words() {
        let mut stream = TokenStream::new("'select' Select");
        let quoted = stream.peek().unwrap();
        assert!(!quoted.is_keyword("select"));
        assert!(!quoted.is_boundary());
        stream.pop();
        let word = stream.peek().unwrap();
        assert!(word.is_keyword("select"));
        assert!(word.is_boundary());
    }

    #[test]
    fn test_empty_literal_is_not_eof() {
        let mut stream = TokenStream::new("''");
        let token = stream.peek().unwrap();
        assert_eq!(token.kind, TokenKind::Quoted(""));
        assert!(!token.is_eof());
    }
}
