//! Statement parsing implementation
//!
//! This module handles parsing of all tinyc statement types:
//!
//! - Variable declarations: `int x;` and `int x = 42;`
//! - Assignments: `x = y + 1;`
//! - Control flow: `if` / `else`, `while`
//! - Jump statements: `return`
//! - Compound statements: `{ ... }`
//!
//! # Grammar
//!
//! ```text
//! statement   ::= declaration | assignment | if_stmt | while_stmt
//!               | return_stmt | block
//! declaration ::= 'int' ID ('=' expression)? ';'
//! assignment  ::= ID '=' expression ';'
//! if_stmt     ::= 'if' '(' expression ')' statement ('else' statement)?
//! while_stmt  ::= 'while' '(' expression ')' statement
//! return_stmt ::= 'return' expression ';'
//! block       ::= '{' statement* '}'
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a statement, dispatching on its leading token
    pub(crate) fn parse_statement(&mut self) -> Result<(), ParseError> {
        tracing::trace!(at = %self.peek().location, token = %self.peek(), "statement");

        // Blocks, `if` and `while` bodies all nest through here.
        self.nested(|parser| match parser.peek().kind {
            TokenKind::Int => parser.parse_declaration(),
            TokenKind::Ident => parser.parse_assignment(),
            TokenKind::If => parser.parse_if_statement(),
            TokenKind::While => parser.parse_while_statement(),
            TokenKind::Return => parser.parse_return_statement(),
            TokenKind::LBrace => parser.parse_block(),
            _ => Err(parser.error(None)),
        })
    }

    /// Parse a block: `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LBrace)?;

        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            self.parse_statement()?;
        }

        self.expect_token(TokenKind::RBrace)
    }

    /// Parse variable declaration with optional initializer
    fn parse_declaration(&mut self) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Int)?;
        self.expect_token(TokenKind::Ident)?;

        if self.match_token(TokenKind::Assign) {
            self.parse_expression()?;
        }

        self.expect_token(TokenKind::Semicolon)
    }

    /// Parse assignment statement
    fn parse_assignment(&mut self) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Ident)?;
        self.expect_token(TokenKind::Assign)?;
        self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon)
    }

    /// Parse if statement
    ///
    /// The optional `else` is consumed right after this `if`'s own body, so
    /// it binds to the innermost unmatched `if`.
    fn parse_if_statement(&mut self) -> Result<(), ParseError> {
        self.expect_token(TokenKind::If)?;
        self.parse_condition()?;
        self.parse_statement()?;

        if self.match_token(TokenKind::Else) {
            self.parse_statement()?;
        }

        Ok(())
    }

    /// Parse while loop
    fn parse_while_statement(&mut self) -> Result<(), ParseError> {
        self.expect_token(TokenKind::While)?;
        self.parse_condition()?;
        self.parse_statement()
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<(), ParseError> {
        self.expect_token(TokenKind::Return)?;
        self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon)
    }

    /// Parenthesized condition shared by `if` and `while`
    fn parse_condition(&mut self) -> Result<(), ParseError> {
        self.expect_token(TokenKind::LParen)?;
        self.parse_expression()?;
        self.expect_token(TokenKind::RParen)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{ParseError, Parser, SyntaxError, MAX_NESTING_DEPTH};

    fn parse(source: &str) -> Result<(), ParseError> {
        Parser::from_source(source)?.parse_program()
    }

    /// Expected kind and found kind of a failing parse.
    fn failure(source: &str) -> (Option<TokenKind>, TokenKind) {
        match parse(source) {
            Err(ParseError::Syntax(SyntaxError { expected, found })) => (expected, found.kind),
            other => panic!("Expected syntax error for {source:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_declarations() {
        assert!(parse("int x;").is_ok());
        assert!(parse("int x = 5;").is_ok());
        assert!(parse("int x = (a + 1) * b;").is_ok());
    }

    #[test]
    fn test_declaration_errors() {
        assert_eq!(failure("int x = 5"), (Some(TokenKind::Semicolon), TokenKind::Eof));
        assert_eq!(failure("int = 5;"), (Some(TokenKind::Ident), TokenKind::Assign));
        assert_eq!(failure("int x = ;"), (None, TokenKind::Semicolon));
        assert_eq!(failure("int 5;"), (Some(TokenKind::Ident), TokenKind::Number));
    }

    #[test]
    fn test_assignment() {
        assert!(parse("a = b + c;").is_ok());
        assert_eq!(failure("a b;"), (Some(TokenKind::Assign), TokenKind::Ident));
        assert_eq!(failure("a = 1 2;"), (Some(TokenKind::Semicolon), TokenKind::Number));
    }

    #[test]
    fn test_assignment_is_not_an_expression() {
        assert_eq!(failure("a = b = c;"), (Some(TokenKind::Semicolon), TokenKind::Assign));
        assert_eq!(failure("a == b;"), (None, TokenKind::Assign));
    }

    #[test]
    fn test_if_without_else() {
        assert!(parse("if (a) b = 1;").is_ok());
        assert!(parse("if (a > 1) { }").is_ok());
    }

    #[test]
    fn test_if_else() {
        assert!(parse("if (a < b) { return a; } else { return b; }").is_ok());
        assert!(parse("if (a) if (b) c = 1; else c = 2;").is_ok());
        assert!(parse("if (a) { } else if (b) { } else { }").is_ok());
    }

    #[test]
    fn test_if_errors() {
        assert_eq!(failure("if a > b { }"), (Some(TokenKind::LParen), TokenKind::Ident));
        assert_eq!(failure("if (a { }"), (Some(TokenKind::RParen), TokenKind::LBrace));
        assert_eq!(failure("if (a)"), (None, TokenKind::Eof));
        assert_eq!(failure("if (a) { } else"), (None, TokenKind::Eof));
        assert_eq!(failure("if () { }"), (None, TokenKind::RParen));
    }

    #[test]
    fn test_dangling_else() {
        assert_eq!(failure("else { }"), (None, TokenKind::Else));
        assert_eq!(failure("if (a) { } else { } else { }"), (None, TokenKind::Else));
    }

    #[test]
    fn test_while() {
        assert!(parse("while (a < b) { }").is_ok());
        assert!(parse("while (a) a = a - 1;").is_ok());
        assert!(parse("while (a) while (b) { }").is_ok());
        assert_eq!(failure("while (a) ;"), (None, TokenKind::Semicolon));
    }

    #[test]
    fn test_return() {
        assert!(parse("return 0;").is_ok());
        assert!(parse("return (a + b) / 2;").is_ok());
        assert_eq!(failure("return;"), (None, TokenKind::Semicolon));
        assert_eq!(failure("return a"), (Some(TokenKind::Semicolon), TokenKind::Eof));
    }

    #[test]
    fn test_blocks() {
        assert!(parse("{ }").is_ok());
        assert!(parse("{ { { } } { } }").is_ok());
        assert!(parse("{ int a; { a = 1; } }").is_ok());
    }

    #[test]
    fn test_block_errors() {
        assert_eq!(failure("{"), (Some(TokenKind::RBrace), TokenKind::Eof));
        assert_eq!(failure("{ int a; "), (Some(TokenKind::RBrace), TokenKind::Eof));
        assert_eq!(failure("}"), (None, TokenKind::RBrace));
        assert_eq!(failure("{ } }"), (None, TokenKind::RBrace));
    }

    #[test]
    fn test_statement_dispatch_rejects_other_leaders() {
        for source in ["5;", "(a);", "+ a;", "; ", "= 1;", ") ", "* 2;"] {
            let (expected, _) = failure(source);
            assert_eq!(expected, None, "{source:?}");
        }
    }

    #[test]
    fn test_deep_unbraced_nesting_is_reported() {
        let ifs = "if (a) ".repeat(20_000);
        let whiles = "while (a) ".repeat(20_000);

        for source in [format!("{ifs}a = 1;"), format!("{whiles}a = 1;")] {
            assert!(matches!(
                parse(&source),
                Err(ParseError::TooDeep { limit: MAX_NESTING_DEPTH, .. })
            ));
        }
    }

    #[test]
    fn test_deep_blocks_are_reported() {
        let source = format!("{}{}", "{".repeat(20_000), "}".repeat(20_000));
        let err = parse(&source).unwrap_err();

        assert!(matches!(err, ParseError::TooDeep { .. }));
        assert_eq!(err.location().column, MAX_NESTING_DEPTH + 1);
    }

    #[test]
    fn test_long_flat_programs_are_not_limited() {
        let source = "{ a = 1; } ".repeat(10_000);
        assert!(parse(&source).is_ok());

        let chain = format!("if (a) {{ }}{}", " else if (a) { }".repeat(MAX_NESTING_DEPTH / 2));
        assert!(parse(&chain).is_ok());
    }

    #[test]
    fn test_first_error_only() {
        let err = parse("int x = 5 int y = ; else").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error at line 1, column 11: expected ';' but found 'int'"
        );
    }
}
