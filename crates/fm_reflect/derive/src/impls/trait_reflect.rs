use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::ReflectStruct;
use crate::path::fp::{BoxFP, CloneFP, DebugFP, DefaultFP, FmtResultFP, FormatterFP};
use crate::path::fp::{OptionFP, PartialEqFP, ResultFP};

/// Generate implementation code for `Reflect` trait.
pub(crate) fn impl_trait_reflect(info: &ReflectStruct) -> TokenStream {
    let fm_reflect_path = info.fm_reflect_path();

    let reflect_ = crate::path::reflect_(fm_reflect_path);
    let reflect_kind_ = crate::path::reflect_kind_(fm_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(fm_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(fm_reflect_path);

    let reflect_clone_tokens = get_struct_clone_impl(info);
    let reflect_partial_eq_tokens = get_struct_partial_eq_impl(info);
    let reflect_debug_tokens = get_struct_debug_impl(info);

    let real_ident = info.type_ident();

    quote! {
        impl #reflect_ for #real_ident {
            fn set(&mut self, value: #BoxFP<dyn #reflect_>) -> #ResultFP<(), #BoxFP<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                #ResultFP::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::Struct
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::Struct(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::Struct(self)
            }

            #reflect_clone_tokens

            #reflect_partial_eq_tokens

            #reflect_debug_tokens
        }
    }
}

fn get_struct_clone_impl(info: &ReflectStruct) -> TokenStream {
    let fm_reflect_path = info.fm_reflect_path();
    let reflect_ = crate::path::reflect_(fm_reflect_path);
    let reflect_clone_error_ = crate::path::reflect_clone_error_(fm_reflect_path);
    let type_path_ = crate::path::type_path_(fm_reflect_path);
    let struct_clone_field_ = crate::path::struct_clone_field_(fm_reflect_path);

    if let Some(span) = info.attrs().avail_traits.clone {
        return quote_spanned! { span =>
            #[inline]
            fn reflect_clone(&self) -> #ResultFP<#BoxFP<dyn #reflect_>, #reflect_clone_error_> {
                #ResultFP::Ok(#BoxFP::new(<Self as #CloneFP>::clone(self)))
            }
        };
    }

    let mut tokens = TokenStream::new();

    for field in info.fields() {
        let field_ty = &field.data.ty;
        let member = field.member();

        if field.attrs.skip {
            tokens.extend(quote! {
                #member: <#field_ty as #DefaultFP>::default(),
            });
        } else {
            let name = field.name();
            tokens.extend(quote! {
                #member: #struct_clone_field_::<#field_ty>(
                    <Self as #type_path_>::type_path(),
                    #name,
                    &self.#member,
                )?,
            });
        }
    }

    quote! {
        fn reflect_clone(&self) -> #ResultFP<#BoxFP<dyn #reflect_>, #reflect_clone_error_> {
            #ResultFP::Ok(#BoxFP::new(Self {
                #tokens
            }))
        }
    }
}

fn get_struct_partial_eq_impl(info: &ReflectStruct) -> TokenStream {
    let fm_reflect_path = info.fm_reflect_path();
    let reflect_ = crate::path::reflect_(fm_reflect_path);
    let struct_partial_eq_ = crate::path::struct_partial_eq_(fm_reflect_path);

    if let Some(span) = info.attrs().avail_traits.partial_eq {
        quote_spanned! { span =>
            fn reflect_partial_eq(&self, other: &dyn #reflect_) -> #OptionFP<bool> {
                match other.downcast_ref::<Self>() {
                    #OptionFP::Some(other) => #OptionFP::Some(<Self as #PartialEqFP>::eq(self, other)),
                    #OptionFP::None => #OptionFP::Some(false),
                }
            }
        }
    } else {
        quote! {
            #[inline]
            fn reflect_partial_eq(&self, other: &dyn #reflect_) -> #OptionFP<bool> {
                #struct_partial_eq_(self, other)
            }
        }
    }
}

fn get_struct_debug_impl(info: &ReflectStruct) -> TokenStream {
    let fm_reflect_path = info.fm_reflect_path();
    let struct_debug_ = crate::path::struct_debug_(fm_reflect_path);

    if let Some(span) = info.attrs().avail_traits.debug {
        quote_spanned! { span =>
            #[inline]
            fn reflect_debug(&self, f: &mut #FormatterFP<'_>) -> #FmtResultFP {
                <Self as #DebugFP>::fmt(self, f)
            }
        }
    } else {
        quote! {
            #[inline]
            fn reflect_debug(&self, f: &mut #FormatterFP<'_>) -> #FmtResultFP {
                #struct_debug_(self, f)
            }
        }
    }
}
