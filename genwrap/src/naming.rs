//! Naming rules: case conversion of native identifiers and the rule list deciding whether a
//! native function is wrapped and under which name.
//!
//! Rules are evaluated top to bottom and the first matching rule wins. [`Builder`] always
//! orders them skip rules first, then explicit renames, then the default rule, so a skipped
//! function stays skipped even when a rename for it exists.

use regex::Regex;
use roxygen::roxygen;

/// Convert `snake_case` (or `SCREAMING_CASE`) to `PascalCase`.
///
/// Each word gets an uppercase first letter and a lowercase remainder; empty words produced by
/// repeated underscores are dropped.
pub fn to_pascal_case(snake: &str) -> String {
    let mut result = String::with_capacity(snake.len());
    for word in snake.split('_').filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(&chars.as_str().to_lowercase());
        }
    }
    result
}

/// Strip `prefix` (if present) and convert the remainder to `PascalCase`.
pub fn to_pascal_case_trim(s: &str, prefix: &str) -> String {
    to_pascal_case(s.strip_prefix(prefix).unwrap_or(s))
}

/// Convert `PascalCase` back to `snake_case`, e.g. `IsDrain` to `is_drain`.
pub fn to_snake_case(pascal: &str) -> String {
    let mut result = String::with_capacity(pascal.len() + 4);
    for (i, c) in pascal.chars().enumerate() {
        if c.is_uppercase() {
            if i != 0 {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Append an underscore to identifiers that collide with a Rust keyword.
pub fn escape_keyword(name: &str) -> String {
    if RUST_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Outcome of the naming rules for one native function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Naming {
    /// The function must not be wrapped
    Skip,
    /// The function is wrapped by a method with this (PascalCase) name
    Wrap(String),
}

/// A single naming rule.
#[derive(Debug, Clone)]
pub enum NamingRule {
    /// Skip every function whose name (without the API prefix) matches
    Skip(Regex),
    /// Use `wrapper` for exactly `(api, native)`
    Rename {
        api: String,
        native: String,
        wrapper: String,
    },
    /// Strip the prefix if present and PascalCase the rest. Always matches.
    StripPrefix(String),
}

impl NamingRule {
    fn apply(&self, api: &str, native: &str) -> Option<Naming> {
        match self {
            NamingRule::Skip(re) => re.is_match(native).then_some(Naming::Skip),
            NamingRule::Rename {
                api: rule_api,
                native: rule_native,
                wrapper,
            } => (rule_api == api && rule_native == native).then(|| Naming::Wrap(wrapper.clone())),
            NamingRule::StripPrefix(prefix) => {
                Some(Naming::Wrap(to_pascal_case_trim(native, prefix)))
            }
        }
    }
}

/// Builder for [`NamingRules`]
///
/// # Example
///
/// ```
/// use genwrap::naming::{Builder, Naming};
///
/// let rules = Builder::new()
///     .skip(r"^free$")
///     .rename("link", "get_drain", "IsDrain")
///     .build();
/// assert_eq!(rules.wrapper_function_name("link", "get_drain"), Naming::Wrap("IsDrain".into()));
/// assert_eq!(rules.wrapper_function_name("link", "free"), Naming::Skip);
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    skips: Vec<Regex>,
    renames: Vec<NamingRule>,
    default_prefix: String,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            skips: Vec::new(),
            renames: Vec::new(),
            default_prefix: "get_".to_string(),
        }
    }

    /// Add a skip rule
    ///
    /// # Panics
    ///
    /// Panics if the pattern is not a valid regular expression.
    #[roxygen]
    pub fn skip<S: AsRef<str>>(
        mut self,
        /// Regular expression matched against the function name without the API prefix
        pattern: S,
    ) -> Self {
        let re = Regex::new(pattern.as_ref())
            .unwrap_or_else(|e| panic!("invalid skip pattern {:?}: {e}", pattern.as_ref()));
        self.skips.push(re);
        self
    }

    /// Add an explicit rename that bypasses the default rule
    #[roxygen]
    pub fn rename<S: Into<String>>(
        mut self,
        /// API module, e.g. `link`
        api: S,
        /// Function name without the API prefix, e.g. `get_drain`
        native: S,
        /// Wrapper name in PascalCase, e.g. `IsDrain`
        wrapper: S,
    ) -> Self {
        self.renames.push(NamingRule::Rename {
            api: api.into(),
            native: native.into(),
            wrapper: wrapper.into(),
        });
        self
    }

    /// Prefix stripped by the default rule, `get_` unless changed
    pub fn default_strip_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.default_prefix = prefix.into();
        self
    }

    pub fn build(self) -> NamingRules {
        let mut rules: Vec<NamingRule> = self.skips.into_iter().map(NamingRule::Skip).collect();
        rules.extend(self.renames);
        rules.push(NamingRule::StripPrefix(self.default_prefix));
        NamingRules { rules }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered naming rules.
#[derive(Debug, Clone)]
pub struct NamingRules {
    rules: Vec<NamingRule>,
}

impl NamingRules {
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Rules for the qpid-proton C API.
    ///
    /// Class, context and attachment functions expose internals of the C object model and
    /// are never wrapped, neither are the raw `send`/`recv` calls or transport plumbing.
    pub fn proton() -> Self {
        Builder::new()
            .skip("attach|context|class|collect|^recv$|^send$|transport")
            .rename("link", "get_drain", "IsDrain")
            .build()
    }

    pub fn rules(&self) -> &[NamingRule] {
        &self.rules
    }

    /// Decide whether `native` of `api` is wrapped, and under which name.
    pub fn wrapper_function_name(&self, api: &str, native: &str) -> Naming {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(api, native))
            .unwrap_or_else(|| Naming::Wrap(to_pascal_case(native)))
    }
}

impl Default for NamingRules {
    fn default() -> Self {
        Self::proton()
    }
}
