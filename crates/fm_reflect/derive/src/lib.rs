//! Derive macro for `fm_reflect`.
//!
//! See [`Reflect`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Full Reflection Derive
///
/// Implements `TypePath`, `Typed`, `Struct` and `Reflect` for a struct with
/// named fields. The generated `Typed` impl stores a static `StructInfo`
/// holding one `NamedField` descriptor per reflected field, in declaration
/// order.
///
/// Tuple structs, unit structs, enums, unions and generic types are rejected
/// with a compile error.
///
/// ## Container Attributes
///
/// ```rust, ignore
/// #[derive(Reflect, Default, Clone, PartialEq, Debug)]
/// #[reflect(type_path = "my_crate::Foo")]       // custom type path
/// #[reflect(default)]                           // register `Default::default`
/// #[reflect(clone, partial_eq, debug)]          // use the std traits
/// struct Foo { /* ... */ }
/// ```
///
/// - `type_path = "..."`: overrides the `module_path!()`-based type path.
/// - `default`: registers `Default::default` as the default constructor.
///   Needed to auto-vivify `Option<Foo>` fields and to build `Vec<Foo>`
///   elements from nothing.
/// - `clone`: `reflect_clone` uses [`Clone`] instead of cloning field by
///   field.
/// - `partial_eq`: `reflect_partial_eq` uses [`PartialEq`]; other types
///   compare unequal.
/// - `debug`: `reflect_debug` uses [`Debug`](core::fmt::Debug).
/// - `TypePath = false`, `Typed = false`: skip generating that trait, so it
///   can be implemented by hand.
///
/// ## Field Attributes
///
/// - `#[reflect(skip)]`: the field is invisible to reflection. Field-wise
///   `reflect_clone` fills it with `Default::default()`.
/// - `#[reflect(readonly)]`: the field can be read but `field_mut` and
///   `field_at_mut` return `None` for it.
///
/// ## Example
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Person {
///     name: String,
///     age: Option<i32>,
///     #[reflect(readonly)]
///     id: u64,
///     #[reflect(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_full_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectStruct::from_ast(&ast) {
        Ok(info) => impls::impl_struct(&info).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
