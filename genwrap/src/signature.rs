//! Splitting of raw C argument lists into named, mapped arguments.

use std::{collections::HashSet, sync::OnceLock};

use proc_macro2::{Span, TokenStream};
use regex::Regex;

use crate::{
    api::config::CodePaths,
    naming::escape_keyword,
    type_map::{TypeMapper, TypeMapping},
    GenError, Result,
};

/// One parameter of a wrapped function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Parameter name, escaped if it collides with a Rust keyword
    pub name: String,
    pub mapping: TypeMapping,
    /// Local holding the converted value for staged types, distinct from every parameter
    pub staged: Option<String>,
}

impl Argument {
    pub fn ident(&self) -> syn::Ident {
        syn::Ident::new(&self.name, Span::call_site())
    }

    pub fn staged_ident(&self) -> syn::Ident {
        syn::Ident::new(self.staged.as_deref().unwrap_or(&self.name), Span::call_site())
    }

    pub fn prologue(&self, paths: &CodePaths) -> Option<TokenStream> {
        self.mapping.prologue(&self.ident(), &self.staged_ident(), paths)
    }

    pub fn to_native(&self) -> TokenStream {
        self.mapping.to_native(&self.ident(), &self.staged_ident())
    }
}

/// `<type ending in space or *><name>`
fn type_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*[ *])([^ *]+)$").unwrap())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split on commas outside of any bracket pair
fn split_top_level(arg_list: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in arg_list.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(&arg_list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&arg_list[start..]);
    items
}

/// Split a raw argument list into arguments in declaration order.
///
/// The last bare word of each item is the name, everything before it is the type.
/// An empty list yields no arguments; an item without a separable name is an error.
/// Staged arguments get a `<name>_c` local, extended with `_` until no parameter or other
/// local has that name.
pub fn split_args(arg_list: &str, mapper: &TypeMapper) -> Result<Vec<Argument>> {
    let arg_list = arg_list.trim();
    if arg_list.is_empty() {
        return Ok(Vec::new());
    }
    let mut args = split_top_level(arg_list)
        .into_iter()
        .map(|item| {
            let item = item.trim();
            let malformed = || GenError::MalformedArgument {
                item: item.to_string(),
            };
            let captures = type_name_regex().captures(item).ok_or_else(malformed)?;
            let c_type = captures[1].trim();
            let name = captures[2].trim();
            if c_type.is_empty() || !is_identifier(name) {
                return Err(malformed());
            }
            Ok(Argument {
                name: escape_keyword(name),
                mapping: mapper.map_argument(c_type)?,
                staged: None,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut taken: HashSet<String> = args.iter().map(|arg| arg.name.clone()).collect();
    for arg in args.iter_mut().filter(|arg| arg.mapping.is_staged()) {
        let mut staged = format!("{}_c", arg.name);
        while !taken.insert(staged.clone()) {
            staged.push('_');
        }
        arg.staged = Some(staged);
    }
    Ok(args)
}
