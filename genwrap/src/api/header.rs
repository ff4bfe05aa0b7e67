//! Header scanning.
//!
//! Two declaration shapes are recognized on the token stream of a header:
//!
//! ```c
//! typedef enum [tag] { PN_A [= ...], PN_B, ... } pn_<name>_t;
//! PN_EXTERN <return type> pn_<api>_<fn>(pn_<api>_t *<self>[, <args>])
//! ```
//!
//! Anything else, including near misses such as variadic functions, function pointer
//! arguments or functions taking another module's handle, is ignored.

use std::{fs, path::Path};

use itertools::Itertools;
use tracing::trace;

use crate::{
    api::{
        config::GeneratorConfig,
        record::{EnumDecl, FunctionDecl, SourceLocation},
    },
    utils::lexer::{tokenize, Token, TokenKind},
    GenError, Result,
};

/// Contents of one `<module>.h` file
#[derive(Debug, Clone)]
pub struct Header {
    module: String,
    text: String,
}

impl Header {
    pub fn new(module: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            text: text.into(),
        }
    }

    /// Read `<include_dir>/<module>.h`
    pub fn read<P: AsRef<Path>>(include_dir: P, module: &str) -> Result<Self> {
        let path = include_dir.as_ref().join(format!("{module}.h"));
        let text = fs::read_to_string(&path).map_err(|source| GenError::ReadHeader { path, source })?;
        Ok(Self::new(module, text))
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn file_name(&self) -> String {
        format!("{}.h", self.module)
    }

    /// All enum typedefs in declaration order
    pub fn enums(&self, config: &GeneratorConfig) -> Vec<EnumDecl> {
        let tokens = tokenize(&self.text);
        let mut cursor = Cursor::new(&tokens);
        let mut enums = Vec::new();
        while !cursor.at_end() {
            let start = cursor.pos;
            match cursor.enum_decl(config.prefix(), config.const_prefix()) {
                Some((name, values)) => {
                    trace!(header = %self.module, enum_name = %name, "found enum");
                    enums.push(EnumDecl {
                        name,
                        values,
                        location: self.location(&tokens[start]),
                    });
                }
                None => cursor.pos = start + 1,
            }
        }
        enums
    }

    /// All functions of `api` in declaration order
    pub fn functions(&self, api: &str, config: &GeneratorConfig) -> Vec<FunctionDecl> {
        let tokens = tokenize(&self.text);
        let mut cursor = Cursor::new(&tokens);
        let mut functions = Vec::new();
        while !cursor.at_end() {
            let start = cursor.pos;
            match cursor.function_decl(config.linkage(), config.prefix(), api) {
                Some((return_type_raw, c_name, arg_list_raw)) => {
                    trace!(header = %self.module, api, function = %c_name, "found function");
                    functions.push(FunctionDecl {
                        api: api.to_string(),
                        c_name,
                        return_type_raw,
                        arg_list_raw,
                        location: self.location(&tokens[start]),
                    });
                }
                None => cursor.pos = start + 1,
            }
        }
        functions
    }

    fn location(&self, token: &Token) -> SourceLocation {
        SourceLocation {
            file: self.file_name(),
            line: token.line,
        }
    }
}

/// Lowercase words joined by `_`, starting with a letter
fn is_lower_snake(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_lowercase())
        && s.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

fn is_enumerator(s: &str, const_prefix: &str) -> bool {
    s.starts_with(const_prefix)
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// `<prefix><name>_t` to `<name>`
fn typedef_name<'a>(ident: &'a str, prefix: &str) -> Option<&'a str> {
    ident
        .strip_prefix(prefix)?
        .strip_suffix("_t")
        .filter(|name| is_lower_snake(name))
}

/// Recursive-descent matcher over a token slice. Every rule either consumes a complete
/// declaration or returns `None`; callers reset the position on failure.
struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos + offset)
    }

    fn bump(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn ident(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        (token.kind == TokenKind::Ident).then(|| {
            self.pos += 1;
            token.text
        })
    }

    fn keyword(&mut self, text: &str) -> Option<()> {
        self.peek()?.is_ident(text).then(|| self.pos += 1)
    }

    fn punct(&mut self, c: char) -> Option<()> {
        self.peek()?.is_punct(c).then(|| self.pos += 1)
    }

    /// `typedef enum [tag] { ... } <prefix><name>_t ;`
    fn enum_decl(&mut self, prefix: &str, const_prefix: &str) -> Option<(String, Vec<String>)> {
        self.keyword("typedef")?;
        self.keyword("enum")?;
        if self.peek()?.kind == TokenKind::Ident {
            self.pos += 1;
        }
        self.punct('{')?;
        let values = self.enum_body(const_prefix)?;
        let name = typedef_name(self.ident()?, prefix)?;
        self.punct(';')?;
        Some((name.to_string(), values))
    }

    /// Enumerator names up to and including the closing brace. Initializers are skipped.
    fn enum_body(&mut self, const_prefix: &str) -> Option<Vec<String>> {
        let mut values = Vec::new();
        let mut expect_name = true;
        loop {
            let token = self.bump()?;
            match token.kind {
                TokenKind::Punct('}') => return Some(values),
                TokenKind::Punct('{') | TokenKind::Punct(';') => return None,
                TokenKind::Punct(',') => expect_name = true,
                TokenKind::Ident if expect_name => {
                    if is_enumerator(token.text, const_prefix) {
                        values.push(token.text.to_string());
                    }
                    expect_name = false;
                }
                _ => expect_name = false,
            }
        }
    }

    /// `<linkage> <return type> <prefix><api>_<fn> ( <prefix><api>_t * <self> [, <args>] )`
    ///
    /// Returns the return type, the function part of the name and the argument list.
    fn function_decl(
        &mut self,
        linkage: &str,
        prefix: &str,
        api: &str,
    ) -> Option<(String, String, String)> {
        self.keyword(linkage)?;
        let return_type = self.return_type()?;
        let c_name = self
            .ident()?
            .strip_prefix(prefix)?
            .strip_prefix(api)?
            .strip_prefix('_')
            .filter(|name| is_lower_snake(name))?
            .to_string();
        self.punct('(')?;
        let self_type = format!("{prefix}{api}_t");
        self.keyword(&self_type)?;
        self.punct('*')?;
        self.ident()?;
        let args = if self.punct(')').is_some() {
            String::new()
        } else {
            self.punct(',')?;
            self.argument_list()?
        };
        Some((return_type, c_name, args))
    }

    /// Lowercase words with at most one trailing `*`, stopping before the function name
    fn return_type(&mut self) -> Option<String> {
        let mut words = Vec::new();
        let mut pointer = false;
        loop {
            let token = self.peek()?;
            let is_name = self.peek_at(1).is_some_and(|t| t.is_punct('('));
            match token.kind {
                TokenKind::Ident if is_name => break,
                TokenKind::Ident if !pointer => {
                    let valid = token
                        .text
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
                    if !valid {
                        return None;
                    }
                    words.push(token.text);
                }
                TokenKind::Punct('*') if !pointer && !words.is_empty() => pointer = true,
                _ => return None,
            }
            self.pos += 1;
        }
        if words.is_empty() {
            return None;
        }
        let mut return_type = words.join(" ");
        if pointer {
            return_type.push_str(" *");
        }
        Some(return_type)
    }

    /// Argument tokens up to and including `)`, re-joined with single spaces
    fn argument_list(&mut self) -> Option<String> {
        let mut parts = Vec::new();
        loop {
            let token = self.bump()?;
            match token.kind {
                TokenKind::Punct(')') => break,
                TokenKind::Punct('(') | TokenKind::Punct(';') | TokenKind::Punct('{') => {
                    return None
                }
                TokenKind::Ellipsis => return None,
                _ => parts.push(token.text),
            }
        }
        if parts.is_empty() {
            return None;
        }
        Some(parts.into_iter().join(" "))
    }
}
