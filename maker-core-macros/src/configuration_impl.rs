use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::attribute_helpers::{find_attr, string_arg};

/// Configuration derive macro implementation
///
/// The root configuration only carries markers; it is never registered as a bean.
pub(crate) fn derive_configuration_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // #[component_scan] without a path scans the declaring module
    let scan_path = match find_attr(&input.attrs, "component_scan").map(string_arg) {
        Some(Ok(Some(path))) => Some(quote! { #path.to_string() }),
        Some(Ok(None)) => Some(quote! { ::std::module_path!().to_string() }),
        Some(Err(err)) => return TokenStream::from(err.to_compile_error()),
        None => None,
    };

    let annotations = match scan_path {
        Some(path) => quote! {
            ::std::vec![::maker_core::Annotation::ComponentScan(#path)]
        },
        None => quote! { ::std::vec::Vec::new() },
    };

    let expanded = quote! {
        impl #impl_generics ::maker_core::Annotated for #name #ty_generics #where_clause {
            fn type_name(&self) -> &str {
                ::std::any::type_name::<Self>()
            }

            fn annotations(&self) -> ::std::vec::Vec<::maker_core::Annotation> {
                #annotations
            }
        }
    };

    TokenStream::from(expanded)
}
