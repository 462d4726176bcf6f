//! Lexer (tokenizer) for tinyc source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Every symbol is a single character: `==` is two [`TokenKind::Assign`] tokens,
//! and there are no comments, strings or floating point literals.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The closed set of token categories produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Int,
    If,
    Else,
    Return,
    While,

    // Identifiers and literals
    Ident,
    Number,

    // Operators
    Assign,   // =
    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /
    Gt,       // >
    Lt,       // <

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;

    // End of input
    Eof,
}

impl TokenKind {
    /// Canonical source text for fixed-spelling kinds.
    ///
    /// Returns `None` for identifiers, numbers and end of input, whose text
    /// is not fixed by the kind.
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            TokenKind::Int => Some("int"),
            TokenKind::If => Some("if"),
            TokenKind::Else => Some("else"),
            TokenKind::Return => Some("return"),
            TokenKind::While => Some("while"),
            TokenKind::Assign => Some("="),
            TokenKind::Plus => Some("+"),
            TokenKind::Minus => Some("-"),
            TokenKind::Star => Some("*"),
            TokenKind::Slash => Some("/"),
            TokenKind::Gt => Some(">"),
            TokenKind::Lt => Some("<"),
            TokenKind::LParen => Some("("),
            TokenKind::RParen => Some(")"),
            TokenKind::LBrace => Some("{"),
            TokenKind::RBrace => Some("}"),
            TokenKind::Semicolon => Some(";"),
            TokenKind::Ident | TokenKind::Number | TokenKind::Eof => None,
        }
    }

    /// Kind of a single-character symbol, if `ch` is one.
    fn from_symbol(ch: char) -> Option<TokenKind> {
        let kind = match ch {
            '=' => TokenKind::Assign,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            '>' => TokenKind::Gt,
            '<' => TokenKind::Lt,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.symbol()) {
            (_, Some(sym)) => write!(f, "'{}'", sym),
            (TokenKind::Ident, None) => write!(f, "identifier"),
            (TokenKind::Number, None) => write!(f, "number"),
            _ => write!(f, "end of input"),
        }
    }
}

/// Reserved words, matched case-sensitively against every identifier-shaped lexeme.
static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    [
        TokenKind::Int,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::Return,
        TokenKind::While,
    ]
    .into_iter()
    .filter_map(|kind| kind.symbol().map(|word| (word, kind)))
    .collect()
});

/// A classified lexeme.
///
/// `text` is the exact substring the token was recognized from. The
/// end-of-input token carries an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier '{}'", self.text),
            TokenKind::Number => write!(f, "number {}", self.text),
            kind => write!(f, "{}", kind),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Lexer error at {location}: unexpected character '{character}'")]
    UnexpectedCharacter {
        character: char,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnexpectedCharacter { location, .. } => *location,
        }
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Lexer for tinyc source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input, stopping at the first unexpected character.
    ///
    /// On success the returned sequence always ends with exactly one
    /// [`TokenKind::Eof`] token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            let Some(ch) = self.peek() else {
                tokens.push(Token::new(TokenKind::Eof, "", self.current_location()));
                break;
            };

            let token = self.next_token(ch)?;
            tracing::trace!(kind = ?token.kind, text = %token.text, at = %token.location, "token");
            tokens.push(token);
        }

        tracing::debug!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    /// Lex the token starting at `ch`, the character under the cursor
    fn next_token(&mut self, ch: char) -> Result<Token, LexError> {
        let loc = self.current_location();

        if ch.is_ascii_digit() {
            let digits = self.consume_while(|c| c.is_ascii_digit());
            return Ok(Token::new(TokenKind::Number, digits, loc));
        }

        if ch.is_ascii_alphabetic() {
            let word = self.consume_while(|c| c.is_ascii_alphanumeric());
            let kind = KEYWORDS
                .get(word.as_str())
                .copied()
                .unwrap_or(TokenKind::Ident);
            return Ok(Token::new(kind, word, loc));
        }

        match TokenKind::from_symbol(ch) {
            Some(kind) => {
                self.advance();
                Ok(Token::new(kind, ch, loc))
            }
            None => {
                tracing::debug!(character = ?ch, at = %loc, "unexpected character");
                Err(LexError::UnexpectedCharacter {
                    character: ch,
                    location: loc,
                })
            }
        }
    }

    /// Consume the maximal run of characters satisfying `pred`.
    fn consume_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut lexeme = String::new();

        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            lexeme.push(ch);
            self.advance();
        }

        lexeme
    }

    /// Skip whitespace
    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
