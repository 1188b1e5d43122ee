//! sqlport Lexer - tokenization of batch scripts
//!
//! The token set is deliberately tiny:
//! - eight one-byte symbols: `> < = * , ( ) .`
//! - quoted literals in `'...'` or `"..."`, no escape sequences
//! - words, i.e. everything else up to whitespace or a symbol
//!
//! Keywords are not a token kind. A keyword is a [`TokenKind::Word`] that
//! compares equal to an entry of [`keywords`], ignoring ASCII case.

mod error;
pub mod keywords;
mod stream;
mod token;

pub use error::*;
pub use stream::*;
pub use token::*;

/// Tokenize a whole source string, ending with an EOF token
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut stream = TokenStream::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = stream.peek()?;
        tokens.push(token);
        if token.is_eof() {
            return Ok(tokens);
        }
        stream.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_tokens() {
        let tokens = tokenize("select * from t1").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Word("select"));
        assert_eq!(tokens[1].kind, TokenKind::Symbol('*'));
        assert_eq!(tokens[2].kind, TokenKind::Word("from"));
        assert_eq!(tokens[3].kind, TokenKind::Word("t1"));
        assert!(tokens[4].is_eof());
    }

    #[test]
    fn test_sigil_stays_in_word() {
        let tokens = tokenize("set @date=dateadd(dd, 1, @date)").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Word("@date"));
        assert_eq!(tokens[2].kind, TokenKind::Symbol('='));
        assert_eq!(tokens[3].kind, TokenKind::Word("dateadd"));
    }

    #[test]
    fn test_unterminated_literal() {
        let err = tokenize("select * from t1 where x='abc").unwrap_err();
        assert_eq!(err, LexError::UnterminatedLiteral { offset: 25 });
        assert_eq!(err.code(), "E-LEX-001");
    }

    #[test]
    fn test_spans_cover_source() {
        let source = "declare @i int";
        let tokens = tokenize(source).unwrap();
        let texts: Vec<_> = tokens[..3]
            .iter()
            .map(|t| &source[t.span.start..t.span.end])
            .collect();
        assert_eq!(texts, vec!["declare", "@i", "int"]);
    }
}
