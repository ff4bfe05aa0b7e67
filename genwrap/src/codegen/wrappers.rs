use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use tracing::debug;

use crate::{
    api::{config::GeneratorConfig, record::FunctionDecl},
    naming::{escape_keyword, to_pascal_case, to_snake_case, Naming},
    signature::split_args,
    type_map::TypeMapper,
    GenError, Result,
};

/// Methods every wrapper struct has besides the wrapped functions
const BUILTIN_METHODS: [&str; 3] = ["from_raw", "as_ptr", "is_nil"];

pub(crate) fn wrapper_block(
    api: &str,
    functions: &[FunctionDecl],
    config: &GeneratorConfig,
    mapper: &TypeMapper,
) -> Result<Vec<syn::Item>> {
    let sys = &config.paths().sys;
    let ty = format_ident!("{}", to_pascal_case(api));
    let native_ty = format_ident!("{}{}_t", config.prefix(), api);
    let struct_doc = format!(" Wrapper for declarations in {api}.h");
    let handle_doc = format!(" Wrap a `{native_ty}` handle.");

    let mut seen: HashMap<String, String> = BUILTIN_METHODS
        .iter()
        .map(|name| (name.to_string(), format!("{ty}::{name}")))
        .collect();
    let mut methods = Vec::new();
    for function in functions {
        let native_name = function.native_name(config.prefix());
        let wrapper = match config.naming().wrapper_function_name(api, &function.c_name) {
            Naming::Skip => {
                debug!(api, function = %native_name, "skipped");
                continue;
            }
            Naming::Wrap(wrapper) => wrapper,
        };
        let method = escape_keyword(&to_snake_case(&wrapper));
        if let Some(first) = seen.insert(method.clone(), native_name.clone()) {
            return Err(GenError::DuplicateMethod {
                api: api.to_string(),
                method,
                first,
                second: native_name,
            });
        }
        let tokens = method_tokens(function, &method, config, mapper)
            .map_err(|e| e.in_function(&native_name, &function.location))?;
        debug!(api, function = %native_name, %method, "wrapped");
        methods.push(tokens);
    }

    let file: syn::File = syn::parse_quote! {
        #[doc = #struct_doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct #ty {
            pn: *mut #sys::#native_ty,
        }

        impl #ty {
            #[doc = #handle_doc]
            ///
            /// # Safety
            ///
            /// `pn` must be null or a handle that stays valid while the wrapper is used.
            pub unsafe fn from_raw(pn: *mut #sys::#native_ty) -> Self {
                Self { pn }
            }

            pub fn as_ptr(&self) -> *mut #sys::#native_ty {
                self.pn
            }

            /// True if the wrapper holds no handle
            pub fn is_nil(&self) -> bool {
                self.pn.is_null()
            }

            #(#methods)*
        }
    };
    Ok(file.items)
}

/// `pub fn <method>(&self, <args>) [-> <host>] { <prologues> unsafe { <call> } }`
fn method_tokens(
    function: &FunctionDecl,
    method: &str,
    config: &GeneratorConfig,
    mapper: &TypeMapper,
) -> Result<TokenStream> {
    let paths = config.paths();
    let sys = &paths.sys;
    let ret = mapper.map(&function.return_type_raw)?;
    let args = split_args(&function.arg_list_raw, mapper)?;

    let method = format_ident!("{}", method);
    let native = format_ident!("{}", function.native_name(config.prefix()));
    let doc = format!(" Calls `{native}`.");

    let params = args.iter().map(|arg| {
        let name = arg.ident();
        let ty = arg.mapping.param_type(paths);
        quote! { #name: #ty }
    });
    let prologues = args.iter().filter_map(|arg| arg.prologue(paths));
    let natives = args.iter().map(|arg| arg.to_native());
    let call = quote! { #sys::#native(self.pn #(, #natives)*) };

    let tokens = match ret.host_type(paths) {
        None => quote! {
            #[doc = #doc]
            pub fn #method(&self #(, #params)*) {
                #(#prologues)*
                unsafe { #call; }
            }
        },
        Some(host) => {
            let body = ret.to_host(call, paths);
            quote! {
                #[doc = #doc]
                pub fn #method(&self #(, #params)*) -> #host {
                    #(#prologues)*
                    unsafe { #body }
                }
            }
        }
    };
    Ok(tokens)
}
