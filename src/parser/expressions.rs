//! Expression parsing implementation
//!
//! This module handles the three expression productions:
//!
//! ```text
//! expression ::= term (('+'|'-') term)* ( ('>'|'<') expression )?
//! term       ::= factor (('*'|'/') factor)*
//! factor     ::= NUM | ID | '(' expression ')'
//! ```
//!
//! # Precedence
//!
//! `*` and `/` bind tighter than `+` and `-`. Relational operators are not a
//! separate level: at most one `>` or `<` may follow the additive chain of an
//! expression, and its right-hand side is a whole `expression` again. Chains
//! such as `a > b > c` are therefore accepted.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    ///
    /// The relational tail `(('>'|'<') expression)?` unrolls into a loop over
    /// additive chains, which accepts the same token sequences.
    pub(crate) fn parse_expression(&mut self) -> Result<(), ParseError> {
        self.parse_additive()?;

        while self.match_any(&[TokenKind::Gt, TokenKind::Lt]) {
            self.parse_additive()?;
        }

        Ok(())
    }

    /// Parse additive chain (+ -)
    fn parse_additive(&mut self) -> Result<(), ParseError> {
        self.parse_term()?;

        while self.match_any(&[TokenKind::Plus, TokenKind::Minus]) {
            self.parse_term()?;
        }

        Ok(())
    }

    /// Parse multiplicative chain (* /)
    fn parse_term(&mut self) -> Result<(), ParseError> {
        self.parse_factor()?;

        while self.match_any(&[TokenKind::Star, TokenKind::Slash]) {
            self.parse_factor()?;
        }

        Ok(())
    }

    /// Parse primary: number, identifier, or parenthesized expression
    fn parse_factor(&mut self) -> Result<(), ParseError> {
        if self.match_any(&[TokenKind::Number, TokenKind::Ident]) {
            return Ok(());
        }

        if self.check(TokenKind::LParen) {
            return self.nested(|parser| {
                parser.expect_token(TokenKind::LParen)?;
                parser.parse_expression()?;
                parser.expect_token(TokenKind::RParen)
            });
        }

        Err(self.error(None))
    }
}
