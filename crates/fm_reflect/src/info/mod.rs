//! Compile-time type information.
//!
//! - [`TypePath`] / [`DynamicTypePath`]: stable type names.
//! - [`Typed`] / [`DynamicTyped`]: access to the static [`TypeInfo`].
//! - [`TypeInfo`]: one of [`StructInfo`], [`ListInfo`], [`OptionalInfo`],
//!   [`OpaqueInfo`].
//! - [`NamedField`]: the descriptor of one struct field.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod list_info;
mod opaque_info;
mod optional_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::NamedField;
pub use list_info::ListInfo;
pub use opaque_info::OpaqueInfo;
pub use optional_info::OptionalInfo;
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, ReflectKindError, Type, TypeInfo};
pub use type_path::{DynamicTypePath, TypePath};
pub use typed::{DynamicTyped, Typed};

pub(crate) use type_info::impl_type_fn;
