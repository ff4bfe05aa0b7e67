use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{GenError, Result};

/// Notice written under the license of every generated file
pub const GENERATED_NOTICE: &str = "\
//
// NOTE: This file was generated by genwrap, do not edit it by hand.
//
";

/// Collector of generated items.
///
/// `Destination` accumulates `syn::Item`s in emission order and writes them as one source file,
/// printed with `prettyplease` under a license comment and the "generated" notice.
///
/// # Example
///
/// ```
/// use genwrap::Destination;
///
/// let items: Vec<syn::Item> = vec![syn::parse_quote! { pub struct Link; }];
/// let destination: Destination = items.into_iter().collect();
/// let source = destination.with_license("/* license */\n").to_source();
/// assert!(source.starts_with("/* license */"));
/// assert!(source.contains("pub struct Link;"));
/// ```
#[derive(Debug, Clone)]
pub struct Destination {
    license: String,
    file: syn::File,
}

impl Default for Destination {
    fn default() -> Self {
        std::iter::empty().collect()
    }
}

impl FromIterator<syn::Item> for Destination {
    fn from_iter<T: IntoIterator<Item = syn::Item>>(iter: T) -> Self {
        Self {
            license: String::new(),
            file: syn::File {
                shebang: None,
                attrs: vec![],
                items: iter.into_iter().collect(),
            },
        }
    }
}

impl Extend<syn::Item> for Destination {
    fn extend<T: IntoIterator<Item = syn::Item>>(&mut self, iter: T) {
        self.file.items.extend(iter);
    }
}

impl Destination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the license comment placed above the generated notice
    pub fn with_license<S: Into<String>>(mut self, license: S) -> Self {
        self.license = license.into();
        self
    }

    pub fn items(&self) -> &[syn::Item] {
        &self.file.items
    }

    /// The complete file content: license, notice, then the printed items
    pub fn to_source(&self) -> String {
        let mut source = self.license.clone();
        if !source.is_empty() && !source.ends_with('\n') {
            source.push('\n');
        }
        source.push_str(GENERATED_NOTICE);
        source.push('\n');
        source.push_str(&prettyplease::unparse(&self.file));
        source
    }

    /// Write the file and return its path.
    ///
    /// Relative paths are relative to the current directory. An existing file is replaced.
    pub fn write<P: AsRef<Path>>(&self, filename: P) -> Result<PathBuf> {
        let file_path = filename.as_ref().to_path_buf();
        fs::write(&file_path, self.to_source()).map_err(|source| GenError::WriteOutput {
            path: file_path.clone(),
            source,
        })?;
        Ok(file_path)
    }
}
