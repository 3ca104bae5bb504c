//! Parsing and serialization for message-catalog files.
//!
//! The parser is a hand-written recursive descent over [`crate::lexer`]
//! tokens, built so that serializing a parsed document reproduces key order
//! and numeric literals exactly. `serde_json` deliberately plays no part
//! here: its maps do not make the ordering guarantee this format needs.

use crate::{
    error::Error,
    lexer::{Lexer, Token},
    traits::Parser,
    types::{Document, Node},
};

/// Parses a complete catalog document.
///
/// The root value must be followed immediately by end of input; anything
/// after it is a [`Error::MalformedDocument`].
pub fn parse(input: &str) -> Result<Document, Error> {
    let mut lexer = Lexer::new(input);
    let first = lexer.next_token()?;
    let root = parse_value(first, &mut lexer)?;
    match lexer.next_token()? {
        Token::Eof => Ok(Document::new(root)),
        other => Err(Error::malformed(format!(
            "trailing {:?} after document root at line {}",
            other,
            lexer.line()
        ))),
    }
}

fn parse_value(token: Token, lexer: &mut Lexer) -> Result<Node, Error> {
    match token {
        Token::ObjectOpen => parse_object(lexer),
        Token::ArrayOpen => parse_array(lexer),
        Token::String(s) => Ok(Node::String(s)),
        Token::Number(literal) => Ok(Node::Number(literal)),
        Token::Bool(b) => Ok(Node::Bool(b)),
        Token::Null => Ok(Node::Null),
        other => Err(Error::malformed(format!(
            "expected a value, got {:?} at line {}",
            other,
            lexer.line()
        ))),
    }
}

fn parse_object(lexer: &mut Lexer) -> Result<Node, Error> {
    let mut pairs: Vec<(String, Node)> = Vec::new();

    let mut token = lexer.next_token()?;
    if token == Token::ObjectClose {
        return Ok(Node::Object(pairs));
    }

    loop {
        let key = match token {
            Token::String(key) => key,
            other => {
                return Err(Error::malformed(format!(
                    "object key must be a string, got {:?} at line {}",
                    other,
                    lexer.line()
                )));
            }
        };
        // Duplicate keys are rejected outright rather than silently keeping
        // the last value; the entry order would no longer be trustworthy.
        if pairs.iter().any(|(existing, _)| existing == &key) {
            return Err(Error::malformed(format!(
                "duplicate object key {:?} at line {}",
                key,
                lexer.line()
            )));
        }

        match lexer.next_token()? {
            Token::Colon => {}
            other => {
                return Err(Error::malformed(format!(
                    "expected ':' after key {:?}, got {:?} at line {}",
                    key,
                    other,
                    lexer.line()
                )));
            }
        }

        let value_token = lexer.next_token()?;
        let value = parse_value(value_token, lexer)?;
        pairs.push((key, value));

        match lexer.next_token()? {
            Token::Comma => token = lexer.next_token()?,
            Token::ObjectClose => return Ok(Node::Object(pairs)),
            other => {
                return Err(Error::malformed(format!(
                    "expected ',' or '}}' in object, got {:?} at line {}",
                    other,
                    lexer.line()
                )));
            }
        }
    }
}

fn parse_array(lexer: &mut Lexer) -> Result<Node, Error> {
    let mut items = Vec::new();

    let mut token = lexer.next_token()?;
    if token == Token::ArrayClose {
        return Ok(Node::Array(items));
    }

    loop {
        items.push(parse_value(token, lexer)?);
        match lexer.next_token()? {
            Token::Comma => token = lexer.next_token()?,
            Token::ArrayClose => return Ok(Node::Array(items)),
            other => {
                return Err(Error::malformed(format!(
                    "expected ',' or ']' in array, got {:?} at line {}",
                    other,
                    lexer.line()
                )));
            }
        }
    }
}

/// Serializes a document compactly.
///
/// Re-parsing the output yields a structurally identical document: same key
/// order, same numeric literal text, same string content.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    write_node(&doc.root, &mut out, None, 0);
    out
}

/// Serializes a document with two-space indentation, the layout the output
/// message files use. Purely presentational: order and content match
/// [`serialize`].
pub fn serialize_pretty(doc: &Document) -> String {
    let mut out = String::new();
    write_node(&doc.root, &mut out, Some("  "), 0);
    out
}

fn write_node(node: &Node, out: &mut String, indent: Option<&str>, depth: usize) {
    match node {
        Node::Object(pairs) => {
            if pairs.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (i, (key, value)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_break(out, indent, depth + 1);
                write_string(key, out);
                out.push(':');
                if indent.is_some() {
                    out.push(' ');
                }
                write_node(value, out, indent, depth + 1);
            }
            write_break(out, indent, depth);
            out.push('}');
        }
        Node::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_break(out, indent, depth + 1);
                write_node(item, out, indent, depth + 1);
            }
            write_break(out, indent, depth);
            out.push(']');
        }
        Node::String(s) => write_string(s, out),
        Node::Number(literal) => out.push_str(literal),
        Node::Bool(true) => out.push_str("true"),
        Node::Bool(false) => out.push_str("false"),
        Node::Null => out.push_str("null"),
    }
}

fn write_break(out: &mut String, indent: Option<&str>, depth: usize) {
    if let Some(unit) = indent {
        out.push('\n');
        for _ in 0..depth {
            out.push_str(unit);
        }
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl Parser for Document {
    /// Parse a catalog from any reader. The input must be UTF-8.
    fn from_reader<R: std::io::BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        parse(&content)
    }

    /// Write the pretty-printed catalog, the layout output files use.
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        writer
            .write_all(serialize_pretty(self).as_bytes())
            .map_err(Error::Io)
    }
}
