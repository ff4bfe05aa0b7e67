use std::path::{Path, PathBuf};

use regex::Regex;
use roxygen::roxygen;

use crate::{naming::NamingRules, RustEdition};

/// Default name of the generated file
pub const DEFAULT_OUTPUT: &str = "wrappers_gen.rs";

const APACHE_LICENSE: &str = "\
/*
Licensed to the Apache Software Foundation (ASF) under one
or more contributor license agreements.  See the NOTICE file
distributed with this work for additional information
regarding copyright ownership.  The ASF licenses this file
to you under the Apache License, Version 2.0 (the
\"License\"); you may not use this file except in compliance
with the License.  You may obtain a copy of the License at

  http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing,
software distributed under the License is distributed on an
\"AS IS\" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
KIND, either express or implied.  See the License for the
specific language governing permissions and limitations
under the License.
*/
";

/// Paths referenced by the generated code
#[derive(Debug, Clone)]
pub struct CodePaths {
    /// Raw FFI bindings, e.g. `proton_sys`
    pub sys: syn::Path,
    /// Module providing `to_cstring`, `from_c_str`, `pn_error` and `Error`
    pub support: syn::Path,
}

impl Default for CodePaths {
    fn default() -> Self {
        Self {
            sys: syn::parse_quote! { proton_sys },
            support: syn::parse_quote! { crate::internal },
        }
    }
}

/// Builder for [`GeneratorConfig`]
///
/// Starts from the qpid-proton preset; every setter replaces one part of it.
///
/// # Example
///
/// ```
/// let config = genwrap::config::Builder::new("/usr/include/proton")
///     .apis(["link", "session"])
///     .sys_path("my_sys")
///     .output("src/wrappers_gen.rs")
///     .build();
/// assert_eq!(config.apis(), ["link", "session"]);
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    include_dir: PathBuf,
    output: PathBuf,
    prefix: String,
    const_prefix: String,
    linkage: String,
    apis: Vec<String>,
    shared_headers: Vec<String>,
    event_header: String,
    event_enum: String,
    event_exclude: Regex,
    enum_types: Vec<String>,
    naming: NamingRules,
    paths: CodePaths,
    license: String,
    formatter: Option<String>,
    edition: RustEdition,
}

impl Builder {
    /// Create a builder with the qpid-proton preset
    #[roxygen]
    pub fn new<P: AsRef<Path>>(
        /// Directory holding `<module>.h` for every module
        include_dir: P,
    ) -> Self {
        Self {
            include_dir: include_dir.as_ref().to_path_buf(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            prefix: "pn_".to_string(),
            const_prefix: "PN_".to_string(),
            linkage: "PN_EXTERN".to_string(),
            apis: [
                "session",
                "link",
                "delivery",
                "disposition",
                "condition",
                "terminus",
                "connection",
            ]
            .map(String::from)
            .to_vec(),
            shared_headers: vec!["types".to_string()],
            event_header: "event".to_string(),
            event_enum: "event_type".to_string(),
            event_exclude: Regex::new("EVENT_NONE|REACTOR|SELECTABLE|TIMER")
                .expect("valid event exclusion pattern"),
            enum_types: [
                "EventType",
                "SndSettleMode",
                "RcvSettleMode",
                "TerminusType",
                "State",
                "Durability",
                "ExpiryPolicy",
                "DistributionMode",
            ]
            .map(String::from)
            .to_vec(),
            naming: NamingRules::proton(),
            paths: CodePaths::default(),
            license: APACHE_LICENSE.to_string(),
            formatter: Some("rustfmt".to_string()),
            edition: RustEdition::default(),
        }
    }

    /// Set the generated file path
    pub fn output<P: AsRef<Path>>(mut self, output: P) -> Self {
        self.output = output.as_ref().to_path_buf();
        self
    }

    /// Set the API prefixes
    #[roxygen]
    pub fn prefix<S: Into<String>>(
        mut self,
        /// Prefix of type and function names, e.g. `pn_`
        prefix: S,
        /// Prefix of enumerator names, e.g. `PN_`
        const_prefix: S,
    ) -> Self {
        self.prefix = prefix.into();
        self.const_prefix = const_prefix.into();
        self
    }

    /// Set the macro that marks exported functions, e.g. `PN_EXTERN`
    pub fn linkage<S: Into<String>>(mut self, linkage: S) -> Self {
        self.linkage = linkage.into();
        self
    }

    /// Set the ordered list of API modules to wrap
    pub fn apis<I, S>(mut self, apis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apis = apis.into_iter().map(Into::into).collect();
        self
    }

    /// Set the headers whose enums are emitted before the event kinds
    pub fn shared_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shared_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Set where the event kinds come from
    ///
    /// # Panics
    ///
    /// Panics if `exclude` is not a valid regular expression.
    #[roxygen]
    pub fn event_kinds<S: Into<String>>(
        mut self,
        /// Header module declaring the event enum, e.g. `event`
        header: S,
        /// Enum name without prefix and `_t`, e.g. `event_type`
        enum_name: S,
        /// Regular expression of enumerators that are internal and not surfaced
        exclude: &str,
    ) -> Self {
        self.event_header = header.into();
        self.event_enum = enum_name.into();
        self.event_exclude = Regex::new(exclude)
            .unwrap_or_else(|e| panic!("invalid event exclusion pattern {exclude:?}: {e}"));
        self
    }

    /// Add a PascalCase type name that is a native enum rather than a handle struct
    pub fn enum_type<S: Into<String>>(mut self, name: S) -> Self {
        self.enum_types.push(name.into());
        self
    }

    pub fn naming(mut self, naming: NamingRules) -> Self {
        self.naming = naming;
        self
    }

    /// Set the path of the raw FFI crate used by the generated code
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid Rust path.
    pub fn sys_path<S: AsRef<str>>(mut self, path: S) -> Self {
        self.paths.sys = syn::parse_str(path.as_ref())
            .unwrap_or_else(|e| panic!("invalid sys path {:?}: {e}", path.as_ref()));
        self
    }

    /// Set the path of the support module used by the generated code
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid Rust path.
    pub fn support_path<S: AsRef<str>>(mut self, path: S) -> Self {
        self.paths.support = syn::parse_str(path.as_ref())
            .unwrap_or_else(|e| panic!("invalid support path {:?}: {e}", path.as_ref()));
        self
    }

    /// Set the license comment written at the top of the generated file
    pub fn license<S: Into<String>>(mut self, license: S) -> Self {
        self.license = license.into();
        self
    }

    /// Set the external formatter program, `None` to leave the file as printed
    pub fn formatter<S: Into<String>>(mut self, program: Option<S>) -> Self {
        self.formatter = program.map(Into::into);
        self
    }

    /// Set the edition passed to `rustfmt`
    pub fn edition(mut self, edition: RustEdition) -> Self {
        self.edition = edition;
        self
    }

    pub fn build(self) -> GeneratorConfig {
        GeneratorConfig { builder: self }
    }
}

/// Immutable configuration of one generation run.
///
/// Built once and passed by reference to the header parser, the type mapper and the emitter.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    builder: Builder,
}

impl GeneratorConfig {
    pub fn builder<P: AsRef<Path>>(include_dir: P) -> Builder {
        Builder::new(include_dir)
    }

    /// The qpid-proton preset
    pub fn proton<P: AsRef<Path>>(include_dir: P) -> Self {
        Builder::new(include_dir).build()
    }

    pub fn include_dir(&self) -> &Path {
        &self.builder.include_dir
    }

    pub fn output(&self) -> &Path {
        &self.builder.output
    }

    pub fn prefix(&self) -> &str {
        &self.builder.prefix
    }

    pub fn const_prefix(&self) -> &str {
        &self.builder.const_prefix
    }

    pub fn linkage(&self) -> &str {
        &self.builder.linkage
    }

    pub fn apis(&self) -> &[String] {
        &self.builder.apis
    }

    pub fn shared_headers(&self) -> &[String] {
        &self.builder.shared_headers
    }

    pub fn event_header(&self) -> &str {
        &self.builder.event_header
    }

    pub fn event_enum(&self) -> &str {
        &self.builder.event_enum
    }

    /// Whether an event enumerator is internal and must not be surfaced
    pub fn is_excluded_event(&self, value: &str) -> bool {
        self.builder.event_exclude.is_match(value)
    }

    pub fn enum_types(&self) -> &[String] {
        &self.builder.enum_types
    }

    pub fn naming(&self) -> &NamingRules {
        &self.builder.naming
    }

    pub fn paths(&self) -> &CodePaths {
        &self.builder.paths
    }

    pub fn license(&self) -> &str {
        &self.builder.license
    }

    pub fn formatter(&self) -> Option<&str> {
        self.builder.formatter.as_deref()
    }

    pub fn edition(&self) -> RustEdition {
        self.builder.edition
    }
}
