use std::{fmt, str::FromStr};

use crate::GenError;

/// Edition handed to `rustfmt --edition` when the generated file is formatted.
///
/// Parses from the bare year (`"2021"`, `"2024"`), the form `rustfmt` and Cargo manifests use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RustEdition {
    Edition2021,
    Edition2024,
}

impl RustEdition {
    const ALL: [RustEdition; 2] = [RustEdition::Edition2021, RustEdition::Edition2024];

    pub fn as_str(&self) -> &'static str {
        match self {
            RustEdition::Edition2021 => "2021",
            RustEdition::Edition2024 => "2024",
        }
    }

    /// Newest edition understood by the toolchain that built the generator
    pub fn latest_supported() -> Self {
        if_rust_version::if_rust_version! { >= 1.85 {
            RustEdition::Edition2024
        } else {
            RustEdition::Edition2021
        }}
    }
}

impl fmt::Display for RustEdition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RustEdition {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let year = s.trim();
        Self::ALL
            .into_iter()
            .find(|edition| edition.as_str() == year)
            .ok_or_else(|| GenError::UnknownEdition {
                edition: s.to_string(),
            })
    }
}

impl Default for RustEdition {
    fn default() -> Self {
        Self::latest_supported()
    }
}
