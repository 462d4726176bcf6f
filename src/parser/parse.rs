//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, cursor helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent validator with one token of lookahead
//! and no backtracking:
//! - This module: Parser struct, cursor helpers, and `program`
//! - `statements`: declarations, assignments, `if`, `while`, `return`, blocks
//! - `expressions`: `expression`, `term` and `factor`
//!
//! No syntax tree is built. Every production either advances the cursor past
//! the tokens it accepts or returns the first [`SyntaxError`] it hits.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared cursor.

use crate::parser::lexer::{LexError, Lexer, SourceLocation, Token, TokenKind};
use thiserror::Error;

/// Deepest statement or parenthesis nesting the parser will descend into.
pub const MAX_NESTING_DEPTH: usize = 512;

/// A token did not fit the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.expected, .found))]
pub struct SyntaxError {
    /// Kind required at an explicit expect point, `None` when no single
    /// kind was required (statement dispatch, `factor`).
    pub expected: Option<TokenKind>,
    /// The token under the cursor when the mismatch was detected.
    pub found: Token,
}

impl SyntaxError {
    pub fn location(&self) -> SourceLocation {
        self.found.location
    }
}

fn describe(expected: &Option<TokenKind>, found: &Token) -> String {
    match expected {
        Some(expected) => format!(
            "Syntax error at {}: expected {} but found {}",
            found.location, expected, found
        ),
        None => format!("Syntax error at {}: unexpected token {}", found.location, found),
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("Syntax error at {location}: nesting deeper than {limit} levels")]
    TooDeep {
        limit: usize,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location(),
            ParseError::Syntax(err) => err.location(),
            ParseError::TooDeep { location, .. } => *location,
        }
    }
}

/// Recursive descent validator for tinyc
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
}

impl Parser {
    /// Create a parser over an already tokenized program.
    ///
    /// A missing trailing end-of-input token is supplied so the cursor
    /// always has somewhere to stop.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let location = tokens
                .last()
                .map(|t| t.location)
                .unwrap_or(SourceLocation::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }

        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Lex `source` and create a parser over the result.
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self::new(tokens))
    }

    /// Validate the entire program: `statement* EOF`.
    ///
    /// On success the cursor rests on the end-of-input token.
    pub fn parse_program(&mut self) -> Result<(), ParseError> {
        let mut statements = 0usize;

        while !self.is_at_end() {
            self.parse_statement()?;
            statements += 1;
        }

        tracing::debug!(statements, "program accepted");
        Ok(())
    }

    /// Index of the token under the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The token stream being validated.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if its kind is any of `kinds`.
    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|&kind| self.match_token(kind))
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    /// The single primitive behind every terminal check in the grammar.
    pub(crate) fn expect_token(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(Some(kind)))
        }
    }

    /// Run `parse` one nesting level deeper, failing once
    /// [`MAX_NESTING_DEPTH`] levels are open.
    pub(crate) fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<(), ParseError>,
    ) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            let location = self.peek().location;
            tracing::debug!(at = %location, "nesting limit reached");
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING_DEPTH,
                location,
            });
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Build a syntax error at the current token.
    pub(crate) fn error(&self, expected: Option<TokenKind>) -> ParseError {
        let found = self.peek().clone();
        tracing::debug!(?expected, found = %found, at = %found.location, "syntax error");
        SyntaxError { expected, found }.into()
    }
}
