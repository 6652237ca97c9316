use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Generate implementation code for `Typed`
///
/// For `type_info_tokens`, see [`ReflectStruct::to_info_tokens`].
pub(crate) fn impl_trait_typed(info: &ReflectStruct, type_info_tokens: TokenStream) -> TokenStream {
    let fm_reflect_path = info.fm_reflect_path();
    let trait_typed_ = crate::path::typed_(fm_reflect_path);
    let type_info_ = crate::path::type_info_(fm_reflect_path);
    let info_cell = crate::path::non_generic_type_info_cell_(fm_reflect_path);

    let real_ident = info.type_ident();

    quote! {
        impl #trait_typed_ for #real_ident {
            fn type_info() -> &'static #type_info_ {
                static CELL: #info_cell = #info_cell::new();
                CELL.get_or_init(|| {
                    #type_info_tokens
                })
            }
        }
    }
}
