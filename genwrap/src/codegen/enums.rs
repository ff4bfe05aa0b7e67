use std::collections::HashMap;

use proc_macro2::Span;
use quote::{format_ident, quote};
use tracing::debug;

use crate::{
    api::{config::GeneratorConfig, record::EnumDecl},
    naming::{escape_keyword, to_pascal_case, to_pascal_case_trim},
    GenError, Result,
};

/// One surfaced kind of the event enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventKind {
    /// Enumerator name, e.g. `PN_CONNECTION_INIT`
    pub native_constant: String,
    /// Prefix-stripped PascalCase name, e.g. `ConnectionInit`
    pub wrapper_name: String,
}

/// One associated constant of an emitted enum newtype
struct Constant {
    name: syn::Ident,
    native: syn::Ident,
    display: String,
}

pub(crate) fn enum_block(decl: &EnumDecl, config: &GeneratorConfig) -> Result<Vec<syn::Item>> {
    let type_name = to_pascal_case(&decl.name);
    let entries = decl.values.iter().map(|value| {
        let display = to_pascal_case_trim(value, config.const_prefix());
        (value.clone(), escape_keyword(&display), display)
    });
    let constants = constants(decl, &type_name, entries)?;
    debug!(enum_name = %decl.name, values = constants.len(), "emitting enum");
    Ok(newtype_enum(decl, config, &type_name, &constants, "unknown"))
}

pub(crate) fn event_kinds(decl: &EnumDecl, config: &GeneratorConfig) -> Vec<EventKind> {
    decl.values
        .iter()
        .filter(|value| {
            let excluded = config.is_excluded_event(value);
            if excluded {
                debug!(event = %value, "event kind excluded");
            }
            !excluded
        })
        .map(|value| EventKind {
            native_constant: value.clone(),
            wrapper_name: to_pascal_case_trim(value, config.const_prefix()),
        })
        .collect()
}

pub(crate) fn event_kind_block(
    decl: &EnumDecl,
    config: &GeneratorConfig,
) -> Result<Vec<syn::Item>> {
    let type_name = to_pascal_case(&decl.name);
    let entries = event_kinds(decl, config).into_iter().map(|kind| {
        let name = format!("E{}", kind.wrapper_name);
        (kind.native_constant, name, kind.wrapper_name)
    });
    let constants = constants(decl, &type_name, entries)?;
    debug!(enum_name = %decl.name, kinds = constants.len(), "emitting event kinds");
    Ok(newtype_enum(decl, config, &type_name, &constants, "Unknown"))
}

/// Build constants from `(enumerator, constant name, display name)` entries.
///
/// The display name must start with a letter. Two enumerators may not share a constant.
fn constants(
    decl: &EnumDecl,
    type_name: &str,
    entries: impl IntoIterator<Item = (String, String, String)>,
) -> Result<Vec<Constant>> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut constants = Vec::new();
    for (native, name, display) in entries {
        if !display.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(GenError::InvalidEnumerator {
                enumerator: native,
                name: display,
                location: decl.location.clone(),
            });
        }
        if let Some(first) = seen.insert(name.clone(), native.clone()) {
            return Err(GenError::DuplicateConstant {
                type_name: type_name.to_string(),
                constant: name,
                first,
                second: native,
                location: decl.location.clone(),
            });
        }
        constants.push(Constant {
            name: ident(&name),
            native: ident(&native),
            display,
        });
    }
    Ok(constants)
}

fn ident(name: &str) -> syn::Ident {
    syn::Ident::new(name, Span::call_site())
}

/// Transparent newtype over `<prefix><name>_t`, its constants, `as_str` and `Display`
fn newtype_enum(
    decl: &EnumDecl,
    config: &GeneratorConfig,
    type_name: &str,
    constants: &[Constant],
    fallback: &str,
) -> Vec<syn::Item> {
    let sys = &config.paths().sys;
    let ty = ident(type_name);
    let native_ty = format_ident!("{}{}_t", config.prefix(), decl.name);
    let doc = format!(" Values of `{native_ty}`, declared at {}.", decl.location);

    let consts = constants.iter().map(|Constant { name, native, .. }| {
        quote! { pub const #name: #ty = #ty(#sys::#native); }
    });
    let arms = constants.iter().map(|Constant { native, display, .. }| {
        quote! { #sys::#native => #display, }
    });

    let file: syn::File = syn::parse_quote! {
        #[doc = #doc]
        #[repr(transparent)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct #ty(pub #sys::#native_ty);

        #[allow(non_upper_case_globals)]
        impl #ty {
            #(#consts)*

            /// Name of the value, without the native prefix
            pub fn as_str(&self) -> &'static str {
                match self.0 {
                    #(#arms)*
                    _ => #fallback,
                }
            }
        }

        impl ::std::fmt::Display for #ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
    file.items
}
