//! Mapping of raw C type strings to host (Rust) types and the conversions between them.
//!
//! [`TypeMapper::map`] is a pure function of the raw type text: the same string always yields
//! the same [`TypeMapping`]. Types outside the supported vocabulary are a hard error, the
//! generator never guesses at an unknown ABI shape.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use tracing::warn;

use crate::{
    api::config::{CodePaths, GeneratorConfig},
    naming::to_pascal_case,
    GenError, Result,
};

/// Unit of a duration-bearing native integer type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Seconds,
    Millis,
}

/// Category of a recognized C type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostType {
    /// `void`, only valid as a return type
    Void,
    /// Integer converted with a plain `as` cast; holds the host primitive name
    Number(&'static str),
    Bool,
    /// `char *` / `const char *`
    Str,
    Duration(DurationUnit),
    /// Error handle pointer, only valid as a return type
    Error,
    /// `void *`, passed through untouched
    RawPointer,
    /// Handle type wrapped in a struct holding the native pointer in field `pn`
    Wrapper(String),
    /// Native enum wrapped in a transparent newtype
    Enum(String),
    /// Anything else. Never leaves [`TypeMapper::map`].
    Unsupported,
}

/// Mapping of one C type to its host representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    /// Normalized C type text, e.g. `const char *`
    pub c_type: String,
    pub host: HostType,
}

impl TypeMapping {
    pub fn is_void(&self) -> bool {
        self.host == HostType::Void
    }

    /// Host type in return position, `None` for `void`
    pub fn host_type(&self, paths: &CodePaths) -> Option<TokenStream> {
        let support = &paths.support;
        let ty = match &self.host {
            HostType::Void | HostType::Unsupported => return None,
            HostType::Number(name) => {
                let ident = format_ident!("{}", name);
                quote! { #ident }
            }
            HostType::Bool => quote! { bool },
            HostType::Str => quote! { ::std::string::String },
            HostType::Duration(_) => quote! { ::std::time::Duration },
            HostType::Error => quote! { ::std::option::Option<#support::Error> },
            HostType::RawPointer => quote! { *mut ::std::os::raw::c_void },
            HostType::Wrapper(name) | HostType::Enum(name) => {
                let ident = format_ident!("{}", name);
                quote! { #ident }
            }
        };
        Some(ty)
    }

    /// Host type in parameter position. Strings are borrowed.
    pub fn param_type(&self, paths: &CodePaths) -> TokenStream {
        match &self.host {
            HostType::Str => quote! { &str },
            _ => self.host_type(paths).unwrap_or_else(|| quote! { () }),
        }
    }

    /// Convert a native value expression to the host type
    pub fn to_host(&self, value: TokenStream, paths: &CodePaths) -> TokenStream {
        let support = &paths.support;
        match &self.host {
            HostType::Void | HostType::Bool | HostType::RawPointer | HostType::Unsupported => value,
            HostType::Number(name) => {
                let ident = format_ident!("{}", name);
                quote! { #value as #ident }
            }
            HostType::Str => quote! { #support::from_c_str(#value) },
            HostType::Duration(DurationUnit::Seconds) => {
                quote! { ::std::time::Duration::from_secs(#value as u64) }
            }
            HostType::Duration(DurationUnit::Millis) => {
                quote! { ::std::time::Duration::from_millis(#value as u64) }
            }
            HostType::Error => quote! { #support::pn_error(#value) },
            HostType::Wrapper(name) => {
                let ident = format_ident!("{}", name);
                quote! { #ident { pn: #value } }
            }
            HostType::Enum(name) => {
                let ident = format_ident!("{}", name);
                quote! { #ident(#value) }
            }
        }
    }

    /// Whether the argument is copied into a local before the call
    pub fn is_staged(&self) -> bool {
        self.host == HostType::Str
    }

    /// Convert the host parameter `arg` to the value passed to the native call.
    ///
    /// `staged` names the local bound by [`prologue`](Self::prologue) for staged types.
    pub fn to_native(&self, arg: &syn::Ident, staged: &syn::Ident) -> TokenStream {
        match &self.host {
            HostType::Number(_) => quote! { #arg as _ },
            HostType::Str => quote! { #staged.as_ptr() as _ },
            HostType::Duration(DurationUnit::Seconds) => quote! { #arg.as_secs() as _ },
            HostType::Duration(DurationUnit::Millis) => quote! { #arg.as_millis() as _ },
            HostType::Wrapper(_) => quote! { #arg.pn },
            HostType::Enum(_) => quote! { #arg.0 },
            HostType::Void
            | HostType::Bool
            | HostType::Error
            | HostType::RawPointer
            | HostType::Unsupported => quote! { #arg },
        }
    }

    /// Statements staging `arg` in the local `staged` before the native call, if the type
    /// needs any.
    ///
    /// A string is copied into an owned, NUL-terminated buffer bound to a local, so the buffer
    /// is released when the method returns on any path, including unwinding.
    pub fn prologue(
        &self,
        arg: &syn::Ident,
        staged: &syn::Ident,
        paths: &CodePaths,
    ) -> Option<TokenStream> {
        match &self.host {
            HostType::Str => {
                let support = &paths.support;
                Some(quote! { let #staged = #support::to_cstring(#arg); })
            }
            _ => None,
        }
    }
}

/// Maps C type strings using the prefix and enum names of a [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct TypeMapper {
    prefix: String,
    error_type: String,
    durations: Vec<(String, DurationUnit)>,
    not_struct: HashSet<String>,
}

impl TypeMapper {
    pub fn new(config: &GeneratorConfig) -> Self {
        let prefix = config.prefix().to_string();
        Self {
            error_type: format!("{prefix}error_t *"),
            durations: vec![
                (format!("{prefix}seconds_t"), DurationUnit::Seconds),
                (format!("{prefix}millis_t"), DurationUnit::Millis),
            ],
            not_struct: config.enum_types().iter().cloned().collect(),
            prefix,
        }
    }

    /// Classify a C type. Unknown types come back as [`HostType::Unsupported`].
    pub fn classify(&self, c_type: &str) -> HostType {
        match c_type {
            "void" => HostType::Void,
            "size_t" => HostType::Number("usize"),
            "ssize_t" => HostType::Number("isize"),
            "int" => HostType::Number("i32"),
            "bool" => HostType::Bool,
            "uint64_t" => HostType::Number("u64"),
            // Host widths of uint32_t and uint16_t are crossed. Keep until checked against the native ABI.
            "uint32_t" => {
                warn!(c_type, host = "u16", "32-bit native integer mapped to a 16-bit host type");
                HostType::Number("u16")
            }
            "uint16_t" => {
                warn!(c_type, host = "u32", "16-bit native integer mapped to a 32-bit host type");
                HostType::Number("u32")
            }
            "char *" | "const char *" => HostType::Str,
            "void *" => HostType::RawPointer,
            _ if c_type == self.error_type => HostType::Error,
            _ => {
                if let Some((_, unit)) = self.durations.iter().find(|(name, _)| name == c_type) {
                    return HostType::Duration(*unit);
                }
                self.classify_prefixed(c_type)
            }
        }
    }

    /// `[const] <prefix><name>_t [*]`
    fn classify_prefixed(&self, c_type: &str) -> HostType {
        let unqualified = c_type.strip_prefix("const ").unwrap_or(c_type);
        let base = unqualified.strip_suffix(" *").unwrap_or(unqualified);
        let name = base
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_suffix("_t"));
        match name {
            Some(name)
                if !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase() || c == '_') =>
            {
                let host_name = to_pascal_case(name);
                if self.not_struct.contains(&host_name) {
                    HostType::Enum(host_name)
                } else {
                    HostType::Wrapper(host_name)
                }
            }
            _ => HostType::Unsupported,
        }
    }

    /// Map a raw C type string
    pub fn map(&self, raw: &str) -> Result<TypeMapping> {
        let c_type = normalize(raw);
        match self.classify(&c_type) {
            HostType::Unsupported => Err(GenError::UnknownType { ctype: c_type }),
            host => Ok(TypeMapping { c_type, host }),
        }
    }

    /// Map a raw C type string used as a parameter type
    pub fn map_argument(&self, raw: &str) -> Result<TypeMapping> {
        let mapping = self.map(raw)?;
        match mapping.host {
            HostType::Void | HostType::Error => Err(GenError::UnsupportedArgument {
                ctype: mapping.c_type,
            }),
            _ => Ok(mapping),
        }
    }
}

/// Collapse whitespace and write pointers as `T *` / `T **`
fn normalize(raw: &str) -> String {
    let spaced = raw.replace('*', " * ");
    let mut out = String::with_capacity(raw.len());
    let mut prev_star = false;
    for token in spaced.split_whitespace() {
        let star = token == "*";
        if !(out.is_empty() || (star && prev_star)) {
            out.push(' ');
        }
        out.push_str(token);
        prev_star = star;
    }
    out
}
