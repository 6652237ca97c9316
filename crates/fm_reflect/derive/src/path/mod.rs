//! This independent module is used to provide the required path.
//! So as to minimize changes when the `fm_reflect` structure is modified.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `fm_reflect` crate.
///
/// 1. For crates that depend on `fm_reflect`, `::fm_reflect` is returned.
/// 2. For crates that depend on `fieldmap`, `::fieldmap::reflect` is returned.
/// 3. For other situations, `::fm_reflect` is returned, but this may be incorrect.
///
/// This reads the builder's `Cargo.toml`, so the path is obtained once per
/// derive and passed around.
pub(crate) fn fm_reflect() -> syn::Path {
    fm_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("fm_reflect"))
}

// -----------------------------------------------------------------------------
// Modules

pub(crate) mod fp;

// -----------------------------------------------------------------------------
// Reflection paths

macro_rules! define_paths {
    ($($name:ident => $($seg:ident)::+;)*) => {
        $(
            #[inline(always)]
            pub(crate) fn $name(fm_reflect_path: &syn::Path) -> TokenStream {
                quote! { #fm_reflect_path::$($seg)::+ }
            }
        )*
    };
}

define_paths! {
    reflect_ => Reflect;
    type_path_ => info::TypePath;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    struct_info_ => info::StructInfo;
    named_field_ => info::NamedField;
    reflect_kind_ => info::ReflectKind;
    non_generic_type_info_cell_ => impls::NonGenericTypeInfoCell;
    struct_partial_eq_ => impls::struct_partial_eq;
    struct_debug_ => impls::struct_debug;
    struct_clone_field_ => impls::struct_clone_field;
    struct_ => ops::Struct;
    struct_field_iter_ => ops::StructFieldIter;
    reflect_ref_ => ops::ReflectRef;
    reflect_mut_ => ops::ReflectMut;
    reflect_clone_error_ => ops::ReflectCloneError;
}
