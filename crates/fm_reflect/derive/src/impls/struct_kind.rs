use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::{FieldAccessors, ReflectStruct};
use crate::path::fp::OptionFP;

/// Implement full reflect for struct type.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let switches = &info.attrs().impl_switchs;

    // trait: TypePath
    let type_path_trait_tokens = switches
        .impl_type_path
        .then(|| impl_trait_type_path(info));

    // trait: Typed
    let typed_trait_tokens = switches
        .impl_typed
        .then(|| impl_trait_typed(info, info.to_info_tokens()));

    // trait: Struct
    let struct_trait_tokens = impl_trait_struct(info);

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(info);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens
    }
}

/// Generate `Struct` trait implementation tokens.
///
/// Readonly fields have no arm in `field_mut` and `field_at_mut`.
fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let fm_reflect_path = info.fm_reflect_path();
    let struct_ = crate::path::struct_(fm_reflect_path);
    let reflect_ = crate::path::reflect_(fm_reflect_path);
    let struct_field_iter_ = crate::path::struct_field_iter_(fm_reflect_path);
    let option_ = OptionFP.to_token_stream();

    let FieldAccessors {
        field_names,
        fields_ref,
        field_indices,
        mutable_names,
        fields_mut,
        mutable_indices,
        field_count,
    } = FieldAccessors::new(info);

    let real_ident = info.type_ident();

    quote! {
        impl #struct_ for #real_ident {
            fn field(&self, name: &str) -> #option_<&dyn #reflect_> {
                match name {
                    #(#field_names => #option_::Some(#fields_ref),)*
                    _ => #option_::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> #option_<&mut dyn #reflect_> {
                match name {
                    #(#mutable_names => #option_::Some(#fields_mut),)*
                    _ => #option_::None,
                }
            }

            fn field_at(&self, index: usize) -> #option_<&dyn #reflect_> {
                match index {
                    #(#field_indices => #option_::Some(#fields_ref),)*
                    _ => #option_::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #option_<&mut dyn #reflect_> {
                match index {
                    #(#mutable_indices => #option_::Some(#fields_mut),)*
                    _ => #option_::None,
                }
            }

            fn name_at(&self, index: usize) -> #option_<&str> {
                match index {
                    #(#field_indices => #option_::Some(#field_names),)*
                    _ => #option_::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }

            #[inline]
            fn iter_fields(&self) -> #struct_field_iter_<'_> {
                #struct_field_iter_::new(self)
            }
        }
    }
}
