use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;
use crate::path::fp::OptionFP;

/// Generate implementation codes for `TypePath`
///
/// Without `#[reflect(type_path = "...")]` the path is
/// `concat!(module_path!(), "::", Ident)`, so it is a literal and the
/// functions can be inlined.
pub(crate) fn impl_trait_type_path(info: &ReflectStruct) -> TokenStream {
    let fm_reflect_path = info.fm_reflect_path();
    let trait_type_path_ = crate::path::type_path_(fm_reflect_path);

    let real_ident = info.type_ident();
    let ident_str = real_ident.to_string();

    let (type_path, type_name, module_path) = match &info.attrs().custom_path {
        Some(path) => {
            let segments = path
                .segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect::<Vec<_>>();
            let full = segments.join("::");
            let module = segments[..segments.len() - 1].join("::");
            let name = segments[segments.len() - 1].clone();
            (quote!(#full), quote!(#name), quote!(#module))
        }
        None => (
            quote!(::core::concat!(::core::module_path!(), "::", #ident_str)),
            quote!(#ident_str),
            quote!(::core::module_path!()),
        ),
    };

    quote! {
        impl #trait_type_path_ for #real_ident {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> #OptionFP<&'static str> {
                #OptionFP::Some(#module_path)
            }
        }
    }
}
