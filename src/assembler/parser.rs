//! Assembly source parser
//!
//! Turns the tokens of one line into an [`AssemblyLine`]:
//!
//! ```text
//! [label:] [mnemonic [operand [[,] operand]...]] [; comment]
//! ```
//!
//! Operands may be separated by commas or by whitespace alone. Operands are
//! kept as text because their meaning (register, number, label) depends on
//! the mnemonic.

use crate::assembler::lexer::{Token, TokenStream, TokenType};
use crate::assembler::{AssemblerError, ErrorKind};

/// A word of source text with its starting column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub text: String,
    pub column: usize,
}

impl Spanned {
    fn from_token(text: String, token: &Token) -> Self {
        Spanned {
            text,
            column: token.column,
        }
    }

    /// Column just past the end of the text
    pub fn end(&self) -> usize {
        self.column + self.text.len()
    }
}

/// A parsed line of assembly source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyLine {
    /// Line index in the source (0-indexed)
    pub line_number: usize,

    /// Optional label definition (e.g., "loop" from "loop:")
    pub label: Option<Spanned>,

    /// Optional mnemonic (e.g., "mvi")
    pub mnemonic: Option<Spanned>,

    /// Operand words, in order
    pub operands: Vec<Spanned>,

    /// Optional comment text (after semicolon)
    pub comment: Option<String>,
}

impl AssemblyLine {
    /// Character span (start, end) of the instruction part of the line
    pub fn instruction_span(&self) -> Option<(usize, usize)> {
        let mnemonic = self.mnemonic.as_ref()?;
        let end = self.operands.last().map_or(mnemonic.end(), Spanned::end);
        Some((mnemonic.column, end))
    }
}

/// Parse the tokens of one line
pub fn parse_line(tokens: Vec<Token>, line_number: usize) -> Result<AssemblyLine, AssemblerError> {
    let mut stream = TokenStream::new(tokens);
    let mut line = AssemblyLine {
        line_number,
        label: None,
        mnemonic: None,
        operands: Vec::new(),
        comment: None,
    };

    // Label definition: Word followed by Colon
    if let (Some(first), Some(second)) = (stream.peek(), stream.peek_n(1)) {
        if let (TokenType::Word(name), TokenType::Colon) = (&first.token_type, &second.token_type)
        {
            line.label = Some(Spanned::from_token(name.clone(), first));
            stream.consume();
            stream.consume();
        }
    }

    // separator seen since the last operand
    let mut pending_comma: Option<usize> = None;

    while let Some(token) = stream.consume() {
        match token.token_type {
            TokenType::Word(ref text) if line.mnemonic.is_none() => {
                line.mnemonic = Some(Spanned::from_token(text.clone(), &token));
            }
            TokenType::Word(ref text) => {
                line.operands.push(Spanned::from_token(text.clone(), &token));
                pending_comma = None;
            }
            TokenType::Comma => {
                if line.operands.is_empty() || pending_comma.is_some() {
                    return Err(AssemblerError::new(
                        ErrorKind::Syntax,
                        token.column,
                        "unexpected ','",
                    ));
                }
                pending_comma = Some(token.column);
            }
            TokenType::Colon => {
                return Err(AssemblerError::new(
                    ErrorKind::Syntax,
                    token.column,
                    "':' may only follow a label at the start of a line",
                ));
            }
            TokenType::Comment(text) => {
                line.comment = Some(text);
            }
        }
    }

    if let Some(column) = pending_comma {
        return Err(AssemblerError::new(
            ErrorKind::Syntax,
            column,
            "expected an operand after ','",
        ));
    }

    Ok(line)
}

/// Parse a number literal.
///
/// Numbers are hexadecimal unless marked otherwise:
/// - `0A`, `ff` - hexadecimal
/// - `0x0A`, `$0A`, `0Ah` - hexadecimal
/// - `%1010` - binary
pub fn parse_number(s: &str) -> Result<u16, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("empty number string".to_string());
    }

    let (digits, radix) = if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
    {
        (rest, 16)
    } else if let Some(rest) = s.strip_prefix('$') {
        (rest, 16)
    } else if let Some(rest) = s.strip_prefix('%') {
        (rest, 2)
    } else if let Some(rest) = s.strip_suffix('h').or_else(|| s.strip_suffix('H')) {
        (rest, 16)
    } else {
        (s, 16)
    };

    // from_str_radix accepts a leading '+'
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
        return Err(format!("'{}' is not a valid number", s));
    }

    u16::from_str_radix(digits, radix).map_err(|_| format!("'{}' does not fit in 16 bits", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::lexer::tokenize_line;

    fn parse(source: &str) -> Result<AssemblyLine, AssemblerError> {
        parse_line(tokenize_line(source, 0).unwrap(), 0)
    }

    #[test]
    fn test_parse_number_hex_default() {
        assert_eq!(parse_number("05").unwrap(), 5);
        assert_eq!(parse_number("0A").unwrap(), 10);
        assert_eq!(parse_number("ff").unwrap(), 255);
        assert_eq!(parse_number("0800").unwrap(), 0x800);
    }

    #[test]
    fn test_parse_number_prefixes() {
        assert_eq!(parse_number("0x1F").unwrap(), 0x1F);
        assert_eq!(parse_number("$42").unwrap(), 0x42);
        assert_eq!(parse_number("42h").unwrap(), 0x42);
        assert_eq!(parse_number("%00000011").unwrap(), 3);
    }

    #[test]
    fn test_parse_number_invalid() {
        assert!(parse_number("").is_err());
        assert!(parse_number("$XY").is_err());
        assert!(parse_number("%202").is_err());
        assert!(parse_number("r1").is_err());
        assert!(parse_number("+5").is_err());
        assert!(parse_number("10000").is_err());
    }

    #[test]
    fn test_parse_full_line() {
        let line = parse("start: mov a, m ; copy").unwrap();
        assert_eq!(line.label.unwrap().text, "start");
        assert_eq!(line.mnemonic.as_ref().unwrap().text, "mov");
        let operands: Vec<&str> = line.operands.iter().map(|op| op.text.as_str()).collect();
        assert_eq!(operands, ["a", "m"]);
        assert_eq!(line.comment.as_deref(), Some(" copy"));
    }

    #[test]
    fn test_whitespace_separated_operands() {
        let line = parse("mvi b 03").unwrap();
        assert_eq!(line.operands.len(), 2);
        assert_eq!(line.instruction_span(), Some((0, 8)));
    }

    #[test]
    fn test_label_only() {
        let line = parse("done:").unwrap();
        assert_eq!(line.label.as_ref().unwrap().text, "done");
        assert!(line.mnemonic.is_none());
        assert!(line.instruction_span().is_none());
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(parse("mov , a").unwrap_err().kind, ErrorKind::Syntax);
        assert_eq!(parse("mov a,, b").unwrap_err().kind, ErrorKind::Syntax);
        assert_eq!(parse("mov a,").unwrap_err().kind, ErrorKind::Syntax);
        assert_eq!(parse("a: b: hlt").unwrap_err().kind, ErrorKind::Syntax);
    }
}
