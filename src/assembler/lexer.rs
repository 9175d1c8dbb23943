//! Lexical analysis for 8080 assembly source
//!
//! This module provides the first phase of assembly: converting one source line
//! into a stream of typed tokens. The lexer separates character-level concerns
//! (where does a word end? where does a comment start?) from syntactic analysis
//! (is this a valid instruction?).
//!
//! # Architecture
//!
//! 1. **Tokenization** ([`tokenize_line`]): Converts a line into a [`Token`] vector
//! 2. **Consumption** ([`TokenStream`]): Parser navigates tokens with lookahead
//!
//! Numbers are hexadecimal by default (`0A`, `ff`), so a bare word cannot be
//! classified as a number or a name until the parser knows which argument kind
//! it expects. The lexer therefore emits every run of name characters as a
//! single [`TokenType::Word`] and leaves classification to the parser.
//!
//! # Examples
//!
//! ```
//! use lib8080::assembler::lexer::{tokenize_line, TokenType};
//!
//! let tokens = tokenize_line("loop: mvi a, 0A ; load ten", 0).unwrap();
//!
//! // Tokens: loop, :, mvi, a, ",", 0A, comment
//! assert_eq!(tokens.len(), 7);
//! assert_eq!(tokens[0].token_type, TokenType::Word("loop".to_string()));
//! assert_eq!(tokens[1].token_type, TokenType::Colon);
//! assert_eq!(tokens[2].column, 6);
//! assert_eq!(tokens[6].token_type, TokenType::Comment(" load ten".to_string()));
//! ```

use thiserror::Error;

/// Classification of lexical tokens in 8080 assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenType {
    /// Mnemonic, register, label or number, as written
    Word(String),
    /// Colon `:` - label definition suffix
    Colon,
    /// Comma `,` - operand separator
    Comma,
    /// Comment text after semicolon (excluding `;` itself)
    Comment(String),
}

/// A single lexical token with type, value, and source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token classification and text
    pub token_type: TokenType,

    /// Source line index (0-indexed)
    pub line: usize,

    /// Column offset within line (0-indexed)
    pub column: usize,

    /// Character span (for error highlighting)
    pub length: usize,
}

/// Characters the lexer cannot place in any token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerError {
    #[error("unexpected character '{ch}' at column {column}")]
    UnexpectedCharacter { ch: char, line: usize, column: usize },
}

impl LexerError {
    pub fn column(&self) -> usize {
        match self {
            LexerError::UnexpectedCharacter { column, .. } => *column,
        }
    }
}

/// Characters that may appear inside a word. `$` and `%` allow the
/// `$0A` / `%1010` number prefixes.
fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '$' | '%')
}

/// Lexer state for converting one source line into tokens
pub struct Lexer<'a> {
    /// Reference to the line text (lifetime-bound)
    source: &'a str,

    /// Iterator over (byte_offset, char) pairs
    chars: std::str::CharIndices<'a>,

    /// Current character being examined
    current: Option<(usize, char)>,

    /// Line index reported in tokens and errors
    line: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given line of source text
    pub fn new(source: &'a str, line: usize) -> Self {
        let mut chars = source.char_indices();
        let current = chars.next();
        Lexer {
            source,
            chars,
            current,
            line,
        }
    }

    fn advance(&mut self) {
        self.current = self.chars.next();
    }

    fn peek(&self) -> Option<char> {
        self.current.map(|(_, ch)| ch)
    }

    /// Current column offset (0-indexed)
    fn column(&self) -> usize {
        match self.current {
            Some((pos, _)) => pos,
            None => self.source.len(),
        }
    }

    fn token(&self, token_type: TokenType, column: usize, length: usize) -> Token {
        Token {
            token_type,
            line: self.line,
            column,
            length,
        }
    }

    /// Scan a word: [A-Za-z0-9_$%]+
    fn scan_word(&mut self, start_col: usize) -> Token {
        while let Some(ch) = self.peek() {
            if !is_word_char(ch) {
                break;
            }
            self.advance();
        }
        let end = self.column();
        let word = &self.source[start_col..end];
        self.token(TokenType::Word(word.to_string()), start_col, end - start_col)
    }

    /// Scan a comment: ;.* until end of line
    fn scan_comment(&mut self, start_col: usize) -> Token {
        // skip the ;
        let text = &self.source[start_col + 1..];
        while self.peek().is_some() {
            self.advance();
        }
        self.token(
            TokenType::Comment(text.to_string()),
            start_col,
            text.len() + 1,
        )
    }

    /// Get the next token from the line
    fn next_token(&mut self) -> Result<Option<Token>, LexerError> {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }

        let Some(ch) = self.peek() else {
            return Ok(None);
        };
        let start_col = self.column();

        match ch {
            ';' => Ok(Some(self.scan_comment(start_col))),
            ':' => {
                self.advance();
                Ok(Some(self.token(TokenType::Colon, start_col, 1)))
            }
            ',' => {
                self.advance();
                Ok(Some(self.token(TokenType::Comma, start_col, 1)))
            }
            ch if is_word_char(ch) => Ok(Some(self.scan_word(start_col))),
            _ => Err(LexerError::UnexpectedCharacter {
                ch,
                line: self.line,
                column: start_col,
            }),
        }
    }
}

/// Tokenize one line of assembly source
///
/// Whitespace separates tokens and is not emitted. The first unexpected
/// character aborts the line.
///
/// # Examples
/// ```
/// use lib8080::assembler::lexer::tokenize_line;
///
/// assert_eq!(tokenize_line("mov a, b", 0).unwrap().len(), 4);
/// assert!(tokenize_line("mvi a, #5", 3).is_err());
/// ```
pub fn tokenize_line(source: &str, line: usize) -> Result<Vec<Token>, LexerError> {
    let mut lexer = Lexer::new(source, line);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }

    Ok(tokens)
}

/// Token stream with lookahead capability for parser consumption
pub struct TokenStream {
    tokens: Vec<Token>,

    /// Current read position (index into tokens vec)
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream {
            tokens,
            position: 0,
        }
    }

    /// Peek at the current token without consuming it
    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Peek ahead n tokens without consuming them. `peek_n(0)` is `peek()`.
    #[must_use]
    pub fn peek_n(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Consume and return the current token, advancing the stream
    pub fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(source: &str) -> Vec<TokenType> {
        tokenize_line(source, 0)
            .unwrap()
            .into_iter()
            .map(|token| token.token_type)
            .collect()
    }

    #[test]
    fn test_words_and_punctuation() {
        assert_eq!(
            types("mov a,b"),
            vec![
                TokenType::Word("mov".to_string()),
                TokenType::Word("a".to_string()),
                TokenType::Comma,
                TokenType::Word("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_number_prefixes_stay_in_word() {
        assert_eq!(
            types("$0A %1010 0x0A 0Ah"),
            vec![
                TokenType::Word("$0A".to_string()),
                TokenType::Word("%1010".to_string()),
                TokenType::Word("0x0A".to_string()),
                TokenType::Word("0Ah".to_string()),
            ]
        );
    }

    #[test]
    fn test_comment_only_line() {
        assert_eq!(
            types("   ; nothing here"),
            vec![TokenType::Comment(" nothing here".to_string())]
        );
        assert!(types("").is_empty());
        assert!(types(" \t ").is_empty());
    }

    #[test]
    fn test_columns() {
        let tokens = tokenize_line("  hlt", 4).unwrap();
        assert_eq!(tokens[0].line, 4);
        assert_eq!(tokens[0].column, 2);
        assert_eq!(tokens[0].length, 3);
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            tokenize_line("mvi a, #05", 2),
            Err(LexerError::UnexpectedCharacter {
                ch: '#',
                line: 2,
                column: 7
            })
        );
    }

    #[test]
    fn test_token_stream() {
        let mut stream = TokenStream::new(tokenize_line("jmp loop", 0).unwrap());
        assert_eq!(stream.peek_n(1).unwrap().column, 4);
        assert_eq!(
            stream.consume().unwrap().token_type,
            TokenType::Word("jmp".to_string())
        );
        assert!(stream.peek().is_some());
        stream.consume();
        assert!(stream.peek().is_none());
        assert!(stream.consume().is_none());
    }
}
