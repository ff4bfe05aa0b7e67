//! Minimal C tokenizer for header scanning.
//!
//! Produces identifiers, numbers and single-character punctuation with their line numbers.
//! Comments, string/char literals and preprocessor lines (including `\` continuations) are
//! dropped: declarations are matched on the remaining token stream only.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident,
    Number,
    Ellipsis,
    Punct(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// 1-based line of the first character
    pub line: usize,
}

impl<'a> Token<'a> {
    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == text
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }
}

pub(crate) fn tokenize(src: &str) -> Vec<Token<'_>> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut line = 1;
    let mut line_start = true;

    while pos < bytes.len() {
        let c = bytes[pos];
        match c {
            b'\n' => {
                line += 1;
                line_start = true;
                pos += 1;
            }
            _ if c.is_ascii_whitespace() => pos += 1,
            b'#' if line_start => {
                // Preprocessor directive up to an unescaped end of line
                while pos < bytes.len() && bytes[pos] != b'\n' {
                    if bytes[pos] == b'\\' && bytes.get(pos + 1) == Some(&b'\n') {
                        line += 1;
                        pos += 1;
                    }
                    pos += 1;
                }
            }
            b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                while pos < bytes.len() && bytes[pos] != b'\n' {
                    pos += 1;
                }
            }
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                pos += 2;
                while pos < bytes.len() && !(bytes[pos] == b'*' && bytes.get(pos + 1) == Some(&b'/')) {
                    if bytes[pos] == b'\n' {
                        line += 1;
                    }
                    pos += 1;
                }
                pos = (pos + 2).min(bytes.len());
            }
            b'"' | b'\'' => {
                pos += 1;
                while pos < bytes.len() && bytes[pos] != c && bytes[pos] != b'\n' {
                    if bytes[pos] == b'\\' {
                        pos += 1;
                    }
                    pos += 1;
                }
                pos = (pos + 1).min(bytes.len());
                line_start = false;
            }
            _ => {
                line_start = false;
                let start = pos;
                let kind = if c.is_ascii_alphabetic() || c == b'_' {
                    while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                        pos += 1;
                    }
                    TokenKind::Ident
                } else if c.is_ascii_digit() {
                    while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'.') {
                        pos += 1;
                    }
                    TokenKind::Number
                } else if src[pos..].starts_with("...") {
                    pos += 3;
                    TokenKind::Ellipsis
                } else {
                    // Step over a whole UTF-8 character
                    let ch = src[pos..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                    pos += ch.len_utf8().max(1);
                    TokenKind::Punct(ch)
                };
                tokens.push(Token {
                    kind,
                    text: &src[start..pos],
                    line,
                });
            }
        }
    }
    tokens
}
