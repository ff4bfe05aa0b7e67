/// Location of a declaration inside a header file, used in diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Header file name, e.g. `link.h`
    pub file: String,
    /// The line number where the declaration starts (1-based)
    pub line: usize,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A `typedef enum { ... } <prefix><name>_t;` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    /// Enum name without the API prefix and the `_t` suffix, e.g. `snd_settle_mode`
    pub name: String,
    /// Enumerator names in declaration order, which is the native ordinal order
    pub values: Vec<String>,
    pub location: SourceLocation,
}

/// A function declaration taking the API's handle as its first parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    /// API module the function belongs to, e.g. `link`
    pub api: String,
    /// Function part of the native name, e.g. `get_drain` for `pn_link_get_drain`
    pub c_name: String,
    /// Return type as written in the header
    pub return_type_raw: String,
    /// Parameters after the handle parameter as written in the header, possibly empty
    pub arg_list_raw: String,
    pub location: SourceLocation,
}

impl FunctionDecl {
    /// Full native symbol, e.g. `pn_link_get_drain`
    pub fn native_name(&self, prefix: &str) -> String {
        format!("{prefix}{}_{}", self.api, self.c_name)
    }
}
