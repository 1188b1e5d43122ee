//! Recursive descent parser implementation
//!
//! Statements are recognized by speculative lookahead: a classifier saves a
//! [`Checkpoint`](sqlport_lexer::Checkpoint) of the token stream, scans
//! forward for the keyword that tells two productions apart, and restores the
//! checkpoint whatever it finds. Only then does the matching production
//! re-scan from the statement start and build its node.
//!
//! Query, DML and DDL statements are kept as opaque source fragments. The
//! only structure tracked inside them is parenthesis depth, so that a
//! statement boundary is never accepted inside an open sub-select.

use sqlport_ast::*;
use sqlport_lexer::keywords as kw;
use sqlport_lexer::{Checkpoint, Token, TokenStream};
use tracing::{debug, trace, warn};

use crate::{Error, ParseError, ParseOptions, Recovery};

type PResult<T> = Result<T, Error>;

/// Where a statement list lives; blocks close on `END` and do not know `WHILE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Document,
    Block,
}

/// Statements and scope collected by one statement loop
#[derive(Default)]
struct Scoped {
    statements: Vec<Statement>,
    scope: Scope,
    end: usize,
}

pub struct Parser<'a> {
    tokens: TokenStream<'a>,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, options: ParseOptions) -> Self {
        Self {
            tokens: TokenStream::new(source),
            options,
        }
    }

    // === Utilities ===

    fn peek(&mut self) -> PResult<Token<'a>> {
        Ok(self.tokens.peek()?)
    }

    fn bump(&mut self) {
        self.tokens.pop();
    }

    fn at_keyword(&mut self, keyword: &str) -> PResult<bool> {
        Ok(self.peek()?.is_keyword(keyword))
    }

    fn at_symbol(&mut self, symbol: char) -> PResult<bool> {
        Ok(self.peek()?.is_symbol(symbol))
    }

    /// Consume `keyword` if it is next
    fn eat_keyword(&mut self, keyword: &str) -> PResult<bool> {
        let found = self.at_keyword(keyword)?;
        if found {
            self.bump();
        }
        Ok(found)
    }

    fn expect_keyword(&mut self, keyword: &str) -> PResult<Token<'a>> {
        let token = self.peek()?;
        if token.is_keyword(keyword) {
            self.bump();
            Ok(token)
        } else {
            Err(ParseError::unexpected(keyword.to_uppercase(), &token).into())
        }
    }

    fn expect_symbol(&mut self, symbol: char) -> PResult<Token<'a>> {
        let token = self.peek()?;
        if token.is_symbol(symbol) {
            self.bump();
            Ok(token)
        } else {
            Err(ParseError::unexpected(format!("'{}'", symbol), &token).into())
        }
    }

    /// A bare word that is not a boundary keyword
    fn expect_name(&mut self, what: &str) -> PResult<Token<'a>> {
        let token = self.peek()?;
        if token.word().is_some() && !token.is_boundary() {
            self.bump();
            Ok(token)
        } else {
            Err(ParseError::unexpected(what, &token).into())
        }
    }

    /// Consume tokens up to (not including) `keyword`; a boundary or the
    /// end of input first is an error.
    fn skip_until(&mut self, keyword: &str) -> PResult<()> {
        loop {
            let token = self.peek()?;
            if token.is_keyword(keyword) {
                return Ok(());
            }
            if token.ends_scan() {
                return Err(ParseError::unexpected(keyword.to_uppercase(), &token).into());
            }
            self.bump();
        }
    }

    /// Consume the rest of a group whose `(` was just consumed, through the
    /// matching `)`. Returns the end offset of that `)`.
    fn skip_group(&mut self) -> PResult<usize> {
        let mut depth = 1usize;
        loop {
            let token = self.peek()?;
            if token.ends_scan() {
                return Err(ParseError::unexpected("')'", &token).into());
            }
            self.bump();
            if token.is_symbol('(') {
                depth += 1;
            } else if token.is_symbol(')') {
                depth -= 1;
                if depth == 0 {
                    return Ok(token.span.end);
                }
            }
        }
    }

    /// Leave the current token for the next statement. Returns where the
    /// finished statement ends.
    fn push_back(&mut self) -> usize {
        self.tokens.rewind_one();
        self.tokens.offset()
    }

    /// Source text of a finished statement, trailing whitespace trimmed
    fn fragment(&self, start: usize, end: usize) -> (String, Span) {
        let text = self.tokens.slice(Span::new(start, end)).trim_end();
        (text.to_string(), Span::new(start, start + text.len()))
    }

    // === Lookahead ===

    /// Run `scan` and rewind the stream whatever it found
    fn lookahead(&mut self, scan: impl FnOnce(&mut Self) -> PResult<bool>) -> PResult<bool> {
        let checkpoint = self.tokens.checkpoint();
        let result = scan(self);
        self.tokens.restore(checkpoint);
        result
    }

    /// Scan forward for `keyword`, giving up at any other boundary
    fn scan_finds(&mut self, keyword: &str) -> PResult<bool> {
        loop {
            let token = self.peek()?;
            if token.is_keyword(keyword) {
                return Ok(true);
            }
            if token.ends_scan() {
                return Ok(false);
            }
            self.bump();
        }
    }

    fn is_insert_followed_by(&mut self, keyword: &str) -> PResult<bool> {
        let matched = self.lookahead(|p| {
            Ok(p.eat_keyword(kw::INSERT)? && p.eat_keyword(kw::INTO)? && p.scan_finds(keyword)?)
        })?;
        trace!(production = "insert", discriminator = keyword, matched, "lookahead");
        Ok(matched)
    }

    fn is_select_followed_by(&mut self, keyword: &str) -> PResult<bool> {
        let matched =
            self.lookahead(|p| Ok(p.eat_keyword(kw::SELECT)? && p.scan_finds(keyword)?))?;
        trace!(production = "select", discriminator = keyword, matched, "lookahead");
        Ok(matched)
    }

    // === Document ===

    pub fn parse_document(&mut self) -> PResult<Document> {
        let scoped = self.parse_scope(Level::Document)?;
        Ok(Document {
            statements: scoped.statements,
            scope: scoped.scope,
        })
    }

    fn parse_scope(&mut self, level: Level) -> PResult<Scoped> {
        let mut scoped = Scoped::default();

        loop {
            let token = self.peek()?;
            if level == Level::Block && token.is_keyword(kw::END) {
                self.bump();
                scoped.end = token.span.end;
                return Ok(scoped);
            }

            let checkpoint = self.tokens.checkpoint();
            match self.parse_statement(level, &mut scoped.scope) {
                Ok(Some(statement)) => {
                    debug!(
                        kind = statement.kind.describe(),
                        start = statement.span.start,
                        end = statement.span.end,
                        "parsed statement"
                    );
                    scoped.statements.push(statement);
                }
                Ok(None) if token.is_eof() => {
                    // Unterminated blocks end with the input.
                    scoped.end = token.span.end;
                    return Ok(scoped);
                }
                Ok(None) => {
                    debug!(
                        token = %token.describe(),
                        offset = token.span.start,
                        "skipping unrecognized token"
                    );
                    self.bump();
                }
                Err(err) => self.recover(err, checkpoint)?,
            }
        }
    }

    fn recover(&mut self, err: Error, checkpoint: Checkpoint<'a>) -> PResult<()> {
        if self.options.recovery == Recovery::Strict || err.is_lexical() {
            return Err(err);
        }
        warn!(code = err.code(), offset = err.offset(), "skipping malformed statement: {}", err);
        self.tokens.restore(checkpoint);
        self.bump();
        Ok(())
    }

    // === Statements ===

    fn parse_statement(&mut self, level: Level, scope: &mut Scope) -> PResult<Option<Statement>> {
        if self.is_insert_followed_by(kw::VALUES)? {
            return self.parse_insert_values().map(Some);
        }
        if self.is_insert_followed_by(kw::SELECT)? {
            return self.parse_insert_select().map(Some);
        }
        if self.is_select_followed_by(kw::INTO)? {
            return self.parse_select_into().map(Some);
        }
        if self.is_select_followed_by(kw::FROM)? {
            return self.parse_select().map(Some);
        }

        let token = self.peek()?;
        let statement = if token.is_keyword(kw::UPDATE) {
            self.parse_opaque(true, |text| StatementKind::DataManipulation { text })?
        } else if token.is_keyword(kw::DELETE) {
            self.parse_opaque(false, |text| StatementKind::DataManipulation { text })?
        } else if [kw::CREATE, kw::ALTER, kw::DROP, kw::TRUNCATE]
            .iter()
            .any(|k| token.is_keyword(k))
        {
            self.parse_opaque(false, |text| StatementKind::DataDefinition { text })?
        } else if token.is_keyword(kw::DECLARE) {
            self.parse_declare(scope)?
        } else if token.is_keyword(kw::SET) {
            self.parse_set(scope)?
        } else if level == Level::Document && token.is_keyword(kw::WHILE) {
            self.parse_while()?
        } else if token.is_keyword(kw::BEGIN) {
            let block = self.parse_block()?;
            let span = block.span;
            Statement::new(StatementKind::Block(block), span)
        } else {
            return Ok(None);
        };
        Ok(Some(statement))
    }

    /// `INSERT INTO ... VALUES (...)[, (...)]`
    fn parse_insert_values(&mut self) -> PResult<Statement> {
        let start = self.expect_keyword(kw::INSERT)?.span.start;
        self.expect_keyword(kw::INTO)?;
        self.skip_until(kw::VALUES)?;
        self.expect_keyword(kw::VALUES)?;

        self.expect_symbol('(')?;
        let mut end = self.skip_group()?;
        // Further rows of a multi-row VALUES list
        while self.at_symbol(',')? {
            self.bump();
            self.expect_symbol('(')?;
            end = self.skip_group()?;
        }

        let (text, span) = self.fragment(start, end);
        Ok(Statement::new(StatementKind::DataManipulation { text }, span))
    }

    /// `INSERT INTO ... SELECT ... FROM ...`
    fn parse_insert_select(&mut self) -> PResult<Statement> {
        let start = self.expect_keyword(kw::INSERT)?.span.start;
        self.expect_keyword(kw::INTO)?;
        self.skip_until(kw::SELECT)?;
        let end = self.parse_nested_select()?;

        let (text, span) = self.fragment(start, end);
        Ok(Statement::new(StatementKind::DataManipulation { text }, span))
    }

    /// `SELECT ... INTO ... FROM ...`
    fn parse_select_into(&mut self) -> PResult<Statement> {
        let start = self.expect_keyword(kw::SELECT)?.span.start;
        self.skip_until(kw::INTO)?;
        self.expect_keyword(kw::INTO)?;
        self.skip_until(kw::FROM)?;
        self.expect_keyword(kw::FROM)?;
        let end = self.parse_from()?;

        let (text, span) = self.fragment(start, end);
        Ok(Statement::new(StatementKind::DataQuery { text }, span))
    }

    /// `SELECT ... FROM ...`
    fn parse_select(&mut self) -> PResult<Statement> {
        let start = self.peek()?.span.start;
        let end = self.parse_nested_select()?;

        let (text, span) = self.fragment(start, end);
        Ok(Statement::new(StatementKind::DataQuery { text }, span))
    }

    /// `UPDATE`, `DELETE` and DDL: the keyword, then everything up to the
    /// next statement boundary outside parentheses.
    fn parse_opaque(
        &mut self,
        allow_set: bool,
        kind: impl FnOnce(String) -> StatementKind,
    ) -> PResult<Statement> {
        let start = self.peek()?.span.start;
        self.bump();
        let end = self.scan_clause(allow_set)?;

        let (text, span) = self.fragment(start, end);
        Ok(Statement::new(kind(text), span))
    }

    /// Consume an opaque clause and return where it ends.
    ///
    /// Stops at a boundary keyword outside parentheses, at the end of
    /// input, or at a `)` that closes nothing. Inside parentheses only
    /// `BEGIN`, `END` and the end of input stop the scan, and they are
    /// errors there. With `allow_set`, the first `SET` at depth zero is
    /// part of the clause (`UPDATE t SET ...`).
    fn scan_clause(&mut self, mut allow_set: bool) -> PResult<usize> {
        let mut depth = 0usize;
        loop {
            let token = self.peek()?;

            if token.is_symbol('(') {
                depth += 1;
            } else if token.is_symbol(')') {
                if depth == 0 {
                    return Ok(self.push_back());
                }
                depth -= 1;
            } else if token.is_eof() || token.is_keyword(kw::BEGIN) || token.is_keyword(kw::END) {
                if depth > 0 {
                    return Err(ParseError::unexpected("')'", &token).into());
                }
                return Ok(self.push_back());
            } else if allow_set && depth == 0 && token.is_keyword(kw::SET) {
                allow_set = false;
            } else if depth == 0 && token.is_boundary() {
                return Ok(self.push_back());
            }

            self.bump();
        }
    }

    /// `DECLARE @a int, @b varchar(10) ...`
    fn parse_declare(&mut self, scope: &mut Scope) -> PResult<Statement> {
        let start = self.expect_keyword(kw::DECLARE)?.span.start;
        let mut variables = Vec::new();
        let mut end;

        loop {
            let name = self.expect_name("variable name")?;
            let ty = self.expect_name("type name")?;
            let mut ty_span = ty.span;
            if self.at_symbol('(')? {
                self.bump();
                ty_span.end = self.skip_group()?;
            }
            end = ty_span.end;

            variables.push(Variable::new(
                self.tokens.slice(name.span),
                self.tokens.slice(ty_span),
            ));

            let next = self.peek()?;
            if next.is_symbol(',') {
                self.bump();
            } else if next.ends_scan() {
                self.push_back();
                break;
            }
        }

        scope.declare_all(variables.iter().cloned());
        Ok(Statement::new(
            StatementKind::Declare { variables },
            Span::new(start, end),
        ))
    }

    /// `SET @a = <value>`; `@a` must be declared at this level
    fn parse_set(&mut self, scope: &Scope) -> PResult<Statement> {
        let start = self.expect_keyword(kw::SET)?.span.start;
        let name = self.expect_name("variable name")?;
        self.expect_symbol('=')?;

        let first = self.peek()?;
        let value_start = first.span.start;
        let end = self.scan_clause(false)?;
        let value = self.tokens.slice(Span::new(value_start, end.max(value_start))).trim();
        if value.is_empty() {
            return Err(ParseError::unexpected("assignment value", &first).into());
        }
        let next = self.peek()?;
        if next.is_symbol(')') {
            return Err(ParseError::unexpected("end of assignment", &next).into());
        }

        let offset = name.span.start;
        let name = self.tokens.slice(name.span);
        scope.resolve(name, offset)?;

        let (_, span) = self.fragment(start, end);
        Ok(Statement::new(
            StatementKind::Assign {
                name: name.to_string(),
                value: value.to_string(),
            },
            span,
        ))
    }

    /// `WHILE <condition> BEGIN ... END`
    fn parse_while(&mut self) -> PResult<Statement> {
        let keyword = self.expect_keyword(kw::WHILE)?;

        // Keywords inside the condition do not end it; only BEGIN does.
        let begin = loop {
            let token = self.peek()?;
            if token.is_keyword(kw::BEGIN) {
                break token;
            }
            if token.is_eof() {
                return Err(ParseError::unexpected("BEGIN", &token).into());
            }
            self.bump();
        };
        let condition = self
            .tokens
            .slice(Span::new(keyword.span.end, begin.span.start))
            .to_string();

        let body = self.parse_block()?;
        let span = keyword.span.merge(body.span);
        Ok(Statement::new(StatementKind::While { condition, body }, span))
    }

    /// `BEGIN ... END`; a missing `END` closes the block at end of input
    fn parse_block(&mut self) -> PResult<Block> {
        let begin = self.expect_keyword(kw::BEGIN)?;
        let scoped = self.parse_scope(Level::Block)?;
        Ok(Block {
            statements: scoped.statements,
            scope: scoped.scope,
            span: Span::new(begin.span.start, scoped.end),
        })
    }

    // === Nested selects ===

    /// `SELECT ... FROM`, leaving the stream just after `FROM`
    fn parse_select_head(&mut self) -> PResult<()> {
        self.expect_keyword(kw::SELECT)?;
        self.skip_until(kw::FROM)?;
        self.expect_keyword(kw::FROM)?;
        Ok(())
    }

    /// `SELECT ... FROM ...` inside a statement; returns where it ends
    fn parse_nested_select(&mut self) -> PResult<usize> {
        self.parse_select_head()?;
        self.parse_from()
    }

    /// Everything after a `FROM`, up to the end of the statement.
    ///
    /// Sub-selects, sibling groups and union arms are scanned in one loop;
    /// only `depth` grows with nesting.
    fn parse_from(&mut self) -> PResult<usize> {
        let mut depth = 0usize;
        self.open_groups(&mut depth)?;

        loop {
            let token = self.peek()?;

            if token.is_symbol(')') {
                if depth == 0 {
                    return Ok(self.push_back());
                }
                depth -= 1;
            } else if token.is_symbol('(') {
                self.open_groups(&mut depth)?;
                continue;
            } else if token.is_keyword(kw::UNION) {
                self.bump();
                self.eat_keyword(kw::ALL)?;
                if !self.at_symbol('(')? {
                    self.parse_select_head()?;
                }
                self.open_groups(&mut depth)?;
                continue;
            } else if token.is_keyword(kw::JOIN) {
                self.bump();
                self.open_groups(&mut depth)?;
                continue;
            } else if token.ends_scan() {
                if depth > 0 {
                    return Err(ParseError::unexpected("')'", &token).into());
                }
                return Ok(self.push_back());
            }

            self.bump();
        }
    }

    /// Consume a run of `(` and `( SELECT ... FROM` openers, counting each
    /// one in `depth`. A `(` not followed by `SELECT` is a plain grouping
    /// like `in (1, 2)`.
    fn open_groups(&mut self, depth: &mut usize) -> PResult<()> {
        while self.at_symbol('(')? {
            self.bump();
            *depth += 1;
            if !self.at_keyword(kw::SELECT)? {
                break;
            }
            self.parse_select_head()?;
        }
        Ok(())
    }
}
