use std::{
    path::Path,
    process::{Command, Stdio},
};

use tracing::info;

use crate::{api::config::GeneratorConfig, GenError, Result, RustEdition};

/// External formatter run on the written file.
///
/// The program's output goes straight to the caller's stdout and stderr. A non-zero exit is
/// an error; the formatted (or partially formatted) file is left in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    program: String,
    args: Vec<String>,
}

impl Formatter {
    /// Run `program <path>`
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// `rustfmt --edition <edition>`
    pub fn rustfmt(edition: RustEdition) -> Self {
        Self::new("rustfmt").arg("--edition").arg(edition.as_str())
    }

    /// The formatter configured for a run, if any.
    ///
    /// A program named `rustfmt` gets the configured edition.
    pub fn from_config(config: &GeneratorConfig) -> Option<Self> {
        let program = config.formatter()?;
        let is_rustfmt = Path::new(program)
            .file_stem()
            .is_some_and(|stem| stem == "rustfmt");
        Some(if is_rustfmt {
            Self::new(program)
                .arg("--edition")
                .arg(config.edition().as_str())
        } else {
            Self::new(program)
        })
    }

    /// Add an argument placed before the file path
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        info!(program = %self.program, path = %path.display(), "formatting");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| GenError::FormatterSpawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(GenError::FormatterFailed {
                program: self.program.clone(),
                path: path.to_path_buf(),
                status,
            });
        }
        Ok(())
    }
}
