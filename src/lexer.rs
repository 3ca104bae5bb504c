//! Streaming tokenizer for message-catalog input.
//!
//! Produces the primitive structural tokens the recursive-descent parser in
//! [`crate::catalog`] consumes. String escapes are decoded here; number
//! literals are kept as raw text so the serializer can reproduce them
//! verbatim.

use std::str::Chars;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    ObjectOpen,
    ObjectClose,
    ArrayOpen,
    ArrayClose,
    Comma,
    Colon,
    String(String),
    /// The literal lexical text of the number, untouched.
    Number(String),
    Bool(bool),
    Null,
    Eof,
}

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    /// Current line, for error messages.
    pub fn line(&self) -> usize {
        self.line
    }

    fn bump(&mut self) -> Option<char> {
        let curr = self.peek;
        if curr == Some('\n') {
            self.line += 1;
        }
        self.peek = self.input.next();
        curr
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek, Some(' ' | '\t' | '\r' | '\n')) {
            self.bump();
        }
    }

    /// Returns the next token, or `Token::Eof` at end of input.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_whitespace();

        let c = match self.peek {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        match c {
            '{' => {
                self.bump();
                Ok(Token::ObjectOpen)
            }
            '}' => {
                self.bump();
                Ok(Token::ObjectClose)
            }
            '[' => {
                self.bump();
                Ok(Token::ArrayOpen)
            }
            ']' => {
                self.bump();
                Ok(Token::ArrayClose)
            }
            ',' => {
                self.bump();
                Ok(Token::Comma)
            }
            ':' => {
                self.bump();
                Ok(Token::Colon)
            }
            '"' => self.lex_string(),
            '-' | '0'..='9' => self.lex_number(),
            't' | 'f' | 'n' => self.lex_keyword(),
            other => Err(Error::malformed(format!(
                "unexpected character {:?} at line {}",
                other, self.line
            ))),
        }
    }

    fn lex_string(&mut self) -> Result<Token, Error> {
        self.bump(); // opening quote
        let mut out = String::new();
        loop {
            let c = self.bump().ok_or_else(|| {
                Error::malformed(format!("unterminated string at line {}", self.line))
            })?;
            match c {
                '"' => return Ok(Token::String(out)),
                '\\' => out.push(self.lex_escape()?),
                c if (c as u32) < 0x20 => {
                    return Err(Error::malformed(format!(
                        "unescaped control character in string at line {}",
                        self.line
                    )));
                }
                c => out.push(c),
            }
        }
    }

    fn lex_escape(&mut self) -> Result<char, Error> {
        let c = self.bump().ok_or_else(|| {
            Error::malformed(format!("unterminated escape at line {}", self.line))
        })?;
        match c {
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            '/' => Ok('/'),
            'b' => Ok('\u{0008}'),
            'f' => Ok('\u{000C}'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'u' => self.lex_unicode_escape(),
            other => Err(Error::malformed(format!(
                "invalid escape sequence '\\{}' at line {}",
                other, self.line
            ))),
        }
    }

    fn lex_unicode_escape(&mut self) -> Result<char, Error> {
        let first = self.lex_hex4()?;
        // Surrogate pairs arrive as two consecutive \uXXXX escapes.
        if (0xD800..=0xDBFF).contains(&first) {
            if self.bump() != Some('\\') || self.bump() != Some('u') {
                return Err(Error::malformed(format!(
                    "unpaired surrogate escape at line {}",
                    self.line
                )));
            }
            let second = self.lex_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&second) {
                return Err(Error::malformed(format!(
                    "invalid low surrogate at line {}",
                    self.line
                )));
            }
            let code = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
            char::from_u32(code).ok_or_else(|| {
                Error::malformed(format!("invalid surrogate pair at line {}", self.line))
            })
        } else {
            char::from_u32(first).ok_or_else(|| {
                Error::malformed(format!(
                    "invalid unicode escape \\u{:04X} at line {}",
                    first, self.line
                ))
            })
        }
    }

    fn lex_hex4(&mut self) -> Result<u32, Error> {
        let mut value = 0u32;
        for _ in 0..4 {
            let c = self.bump().ok_or_else(|| {
                Error::malformed(format!("truncated unicode escape at line {}", self.line))
            })?;
            let digit = c.to_digit(16).ok_or_else(|| {
                Error::malformed(format!(
                    "invalid hex digit {:?} in unicode escape at line {}",
                    c, self.line
                ))
            })?;
            value = value * 16 + digit;
        }
        Ok(value)
    }

    fn lex_number(&mut self) -> Result<Token, Error> {
        let mut literal = String::new();
        if self.peek == Some('-') {
            literal.push('-');
            self.bump();
        }
        if !self.read_digits(&mut literal) {
            return Err(Error::malformed(format!(
                "invalid number literal at line {}",
                self.line
            )));
        }
        if self.peek == Some('.') {
            literal.push('.');
            self.bump();
            if !self.read_digits(&mut literal) {
                return Err(Error::malformed(format!(
                    "missing digits after decimal point at line {}",
                    self.line
                )));
            }
        }
        if matches!(self.peek, Some('e' | 'E')) {
            literal.push(self.bump().unwrap_or('e'));
            if matches!(self.peek, Some('+' | '-')) {
                literal.push(self.bump().unwrap_or('+'));
            }
            if !self.read_digits(&mut literal) {
                return Err(Error::malformed(format!(
                    "missing exponent digits at line {}",
                    self.line
                )));
            }
        }
        Ok(Token::Number(literal))
    }

    fn read_digits(&mut self, out: &mut String) -> bool {
        let mut any = false;
        while let Some(c @ '0'..='9') = self.peek {
            out.push(c);
            self.bump();
            any = true;
        }
        any
    }

    fn lex_keyword(&mut self) -> Result<Token, Error> {
        let mut word = String::new();
        while let Some(c) = self.peek {
            if c.is_ascii_alphabetic() {
                word.push(c);
                self.bump();
            } else {
                break;
            }
        }
        match word.as_str() {
            "true" => Ok(Token::Bool(true)),
            "false" => Ok(Token::Bool(false)),
            "null" => Ok(Token::Null),
            other => Err(Error::malformed(format!(
                "unexpected keyword {:?} at line {}",
                other, self.line
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            let done = token == Token::Eof;
            out.push(token);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn test_structural_tokens() {
        assert_eq!(
            tokens("{ } [ ] , :"),
            vec![
                Token::ObjectOpen,
                Token::ObjectClose,
                Token::ArrayOpen,
                Token::ArrayClose,
                Token::Comma,
                Token::Colon,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_string_with_escapes() {
        assert_eq!(
            tokens(r#""a\"b\\c\nd""#),
            vec![Token::String("a\"b\\c\nd".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_unicode_escape() {
        assert_eq!(
            tokens(r#""é""#),
            vec![Token::String("é".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_surrogate_pair_escape() {
        assert_eq!(
            tokens(r#""😀""#),
            vec![Token::String("😀".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_unpaired_surrogate_is_rejected() {
        let mut lexer = Lexer::new(r#""\ud83d""#);
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_number_literals_kept_verbatim() {
        assert_eq!(
            tokens("[1, -2.50, 3e10, 1.0E-2]"),
            vec![
                Token::ArrayOpen,
                Token::Number("1".to_string()),
                Token::Comma,
                Token::Number("-2.50".to_string()),
                Token::Comma,
                Token::Number("3e10".to_string()),
                Token::Comma,
                Token::Number("1.0E-2".to_string()),
                Token::ArrayClose,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            tokens("[true, false, null]"),
            vec![
                Token::ArrayOpen,
                Token::Bool(true),
                Token::Comma,
                Token::Bool(false),
                Token::Comma,
                Token::Null,
                Token::ArrayClose,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("\"abc");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn test_line_tracking_in_error() {
        let mut lexer = Lexer::new("\n\n  @");
        let err = lexer.next_token().unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_invalid_keyword() {
        let mut lexer = Lexer::new("nul");
        assert!(lexer.next_token().is_err());
    }
}
