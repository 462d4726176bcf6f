//! tinyc source code validator
//!
//! This module checks tinyc source text for lexical and syntactic
//! well-formedness:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: The [`parse::Parser`] cursor, error types and `program`
//! - `statements` / `expressions`: the grammar productions
//!
//! # Language
//!
//! ```text
//! program     ::= statement* EOF
//! statement   ::= declaration | assignment | if_stmt | while_stmt
//!               | return_stmt | block
//! expression  ::= term (('+'|'-') term)* ( ('>'|'<') expression )?
//! term        ::= factor (('*'|'/') factor)*
//! factor      ::= NUM | ID | '(' expression ')'
//! ```
//!
//! Only `int` variables exist. There are no functions, arrays, strings,
//! comments or multi-character operators.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one token of lookahead. Nothing is
//! built: a production either accepts its tokens or returns the first error.

pub mod lexer;
pub mod parse;

mod expressions;
mod statements;
