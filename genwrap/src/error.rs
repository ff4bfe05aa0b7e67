//! Generation errors.
//!
//! Every error is fatal: the generator runs once per build and must stop rather than emit
//! bindings it is not sure about.

use std::path::PathBuf;

use crate::api::record::SourceLocation;

pub type Result<T, E = GenError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("unknown C type {ctype:?}")]
    UnknownType { ctype: String },

    #[error("C type {ctype:?} cannot be used as a parameter type")]
    UnsupportedArgument { ctype: String },

    #[error("can't split argument type/name {item:?}")]
    MalformedArgument { item: String },

    #[error("{location}: in {function}: {source}")]
    InFunction {
        function: String,
        location: SourceLocation,
        #[source]
        source: Box<GenError>,
    },

    #[error("enum {name}_t not found in {header}.h")]
    MissingEnum { header: String, name: String },

    #[error("{location}: enumerator {enumerator} gives no usable constant name (got {name:?})")]
    InvalidEnumerator {
        enumerator: String,
        name: String,
        location: SourceLocation,
    },

    #[error("{location}: enumerators {first} and {second} both map to constant {type_name}::{constant}")]
    DuplicateConstant {
        type_name: String,
        constant: String,
        first: String,
        second: String,
        location: SourceLocation,
    },

    #[error("{api}: functions {first} and {second} both map to wrapper method {method}")]
    DuplicateMethod {
        api: String,
        method: String,
        first: String,
        second: String,
    },

    #[error("failed to read header {}: {source}", .path.display())]
    ReadHeader {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown Rust edition {edition:?}, expected 2021 or 2024")]
    UnknownEdition { edition: String },

    #[error("failed to run formatter {program}: {source}")]
    FormatterSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formatter {program} failed on {}: {status}", .path.display())]
    FormatterFailed {
        program: String,
        path: PathBuf,
        status: std::process::ExitStatus,
    },
}

impl GenError {
    /// Attach the declaration that was being processed when the error occurred.
    pub(crate) fn in_function(self, function: impl Into<String>, location: &SourceLocation) -> Self {
        GenError::InFunction {
            function: function.into(),
            location: location.clone(),
            source: Box::new(self),
        }
    }
}
