//! Lexer (tokenizer) for search-box queries.
//!
//! Tokens are separated by whitespace, except inside double quotes. Each token
//! is classified as either free text or a `key:value` pair; whether the key
//! is actually a known filter is decided later by the parser.

use std::iter::Peekable;
use std::str::Chars;

use super::descriptor::{is_key_char, is_key_start};

/// A token in a search-box query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    /// Free text, exactly as typed (quotes included).
    Text(String),

    /// A `key:value` token.
    Pair {
        /// The key before the colon.
        key: String,
        /// The value with quotes removed and escapes resolved.
        value: String,
        /// The value exactly as typed.
        raw_value: String,
        /// Whether a quote was opened but never closed.
        unterminated: bool,
    },
}

/// A token with its byte span in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: QueryToken,
    /// Byte offset where the token starts.
    pub start: usize,
    /// Byte offset just past the token's end.
    pub end: usize,
}

/// Lexer for tokenizing search-box queries.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<Chars<'a>>,
    /// Current byte position in the input string.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Consumes and returns the next character, updating position.
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.peek() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Advances over one token, treating quoted spans as opaque.
    ///
    /// Returns whether a quote was left open at the end of input.
    fn read_token(&mut self) -> bool {
        let mut in_quote = false;
        while let Some(&c) = self.peek() {
            if in_quote {
                self.next_char();
                match c {
                    '\\' => {
                        self.next_char();
                    }
                    '"' => in_quote = false,
                    _ => {}
                }
            } else if c.is_whitespace() {
                break;
            } else {
                self.next_char();
                if c == '"' {
                    in_quote = true;
                }
            }
        }
        in_quote
    }

    /// Returns the next token with its span, or None if at end of input.
    pub fn next_token(&mut self) -> Option<PositionedToken> {
        self.skip_whitespace();
        self.peek()?;

        let start = self.position;
        let unterminated = self.read_token();
        let end = self.position;
        let raw = &self.input[start..end];

        Some(PositionedToken {
            token: classify(raw, unterminated),
            start,
            end,
        })
    }

    /// Collects all tokens with their spans.
    pub fn tokenize(mut self) -> Vec<PositionedToken> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

/// Splits `raw` into a pair if it has the `key:value` shape.
fn classify(raw: &str, unterminated: bool) -> QueryToken {
    let key_len = key_prefix_len(raw);
    if key_len > 0 {
        if let Some(raw_value) = raw[key_len..].strip_prefix(':') {
            if !raw_value.is_empty() {
                return QueryToken::Pair {
                    key: raw[..key_len].to_string(),
                    value: unquote(raw_value),
                    raw_value: raw_value.to_string(),
                    unterminated,
                };
            }
        }
    }
    QueryToken::Text(raw.to_string())
}

/// Byte length of the key at the start of `raw`, or 0 if there is none.
fn key_prefix_len(raw: &str) -> usize {
    let mut chars = raw.char_indices();
    match chars.next() {
        Some((_, c)) if is_key_start(c) => {}
        _ => return 0,
    }
    chars
        .find(|&(_, c)| !is_key_char(c))
        .map_or(raw.len(), |(i, _)| i)
}

/// Removes double quotes and resolves `\` escapes inside quoted spans.
///
/// Quoted and unquoted pieces concatenate, so `"United Kingdom"` and
/// `United" "Kingdom` both yield `United Kingdom`.
pub(crate) fn unquote(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut in_quote = false;
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => in_quote = !in_quote,
            '\\' if in_quote => {
                if let Some(escaped) = chars.next() {
                    result.push(escaped);
                }
            }
            _ => result.push(c),
        }
    }
    result
}

/// Quotes `value` so that the lexer reads it back as a single value.
///
/// Values that need no quoting are returned unchanged.
pub(crate) fn quote_if_needed(value: &str) -> String {
    let needs_quotes =
        value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\');
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
