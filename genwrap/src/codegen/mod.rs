//! Emission of host-language items for parsed declarations.
//!
//! The emitter only builds `syn` items; writing, formatting and ordering of the blocks are
//! done by [`Generator`](crate::Generator).

use crate::{
    api::{
        config::GeneratorConfig,
        record::{EnumDecl, FunctionDecl},
    },
    type_map::TypeMapper,
    Result,
};

pub(crate) mod enums;
pub(crate) mod wrappers;
#[cfg(test)]
pub(crate) mod tests;

pub use enums::EventKind;

/// Builds the items of every block of the generated file
#[derive(Debug, Clone)]
pub struct Emitter<'a> {
    config: &'a GeneratorConfig,
    mapper: TypeMapper,
}

impl<'a> Emitter<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            mapper: TypeMapper::new(config),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.config
    }

    pub fn mapper(&self) -> &TypeMapper {
        &self.mapper
    }

    /// Newtype over the native enum with one associated constant per enumerator.
    ///
    /// Fails on an enumerator without a usable constant name and on two enumerators mapping
    /// to the same constant.
    pub fn enum_block(&self, decl: &EnumDecl) -> Result<Vec<syn::Item>> {
        enums::enum_block(decl, self.config)
    }

    /// Surfaced event kinds of the event enum, excluded enumerators removed
    pub fn event_kinds(&self, decl: &EnumDecl) -> Vec<EventKind> {
        enums::event_kinds(decl, self.config)
    }

    /// Event type newtype with `E`-prefixed constants for the surfaced event kinds
    pub fn event_kind_block(&self, decl: &EnumDecl) -> Result<Vec<syn::Item>> {
        enums::event_kind_block(decl, self.config)
    }

    /// Wrapper struct of `api` and its methods, one per wrapped function.
    ///
    /// Fails on the first function whose return or argument types can't be mapped, and on
    /// two functions mapping to the same method.
    pub fn wrapper_block(&self, api: &str, functions: &[FunctionDecl]) -> Result<Vec<syn::Item>> {
        wrappers::wrapper_block(api, functions, self.config, &self.mapper)
    }
}
