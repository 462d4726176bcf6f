//! # Introduction
//!
//! tinyc checks whether a program written in a tiny C-like language is
//! lexically and syntactically well-formed. It builds no syntax tree and
//! evaluates nothing: the answer is either `Ok(())` or the first error found.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Ok / first error
//! ```
//!
//! 1. [`parser::lexer`] — classifies characters into [`Token`]s, ending with
//!    a single end-of-input token.
//! 2. [`parser::parse`] — walks the tokens with one forward cursor and
//!    validates them against the grammar.
//!
//! ```
//! assert!(tinyc::check("int x = 1; while (x < 10) { x = x + 1; }").is_ok());
//! assert!(tinyc::check("int x = 1").is_err());
//! ```

pub mod parser;

pub use parser::lexer::{tokenize, LexError, SourceLocation, Token, TokenKind};
pub use parser::parse::{ParseError, Parser, SyntaxError};

use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Program checked when no input is given.
pub const SAMPLE_PROGRAM: &str = include_str!("../demos/sample.tc");

/// Lex and validate `source`, returning the first error encountered.
pub fn check(source: &str) -> Result<(), ParseError> {
    Parser::from_source(source)?.parse_program()
}

/// Read program text from `path`, from stdin for `-`, or fall back to
/// [`SAMPLE_PROGRAM`] when no path is given.
pub fn load_source(path: Option<&Path>) -> io::Result<String> {
    match path {
        None => Ok(SAMPLE_PROGRAM.to_string()),
        Some(path) if path == Path::new("-") => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
        Some(path) => fs::read_to_string(path),
    }
}
