//! Provide interfaces and dynamic types for data operation.
//!
//! ## Menu
//!
//! ### Interface
//!
//! The following are the subtraits of [`Reflect`], each providing data
//! access methods for one kind of type.
//!
//! - [`Struct`]: For struct with named fields (e.g. `A { .. }`).
//! - [`List`]: For list-like (e.g. `Vec<i32>`).
//! - [`Optional`]: For a nullable holder (e.g. `Option<i32>`).
//!
//! ### Dynamic Type
//!
//! - [`DynamicStruct`]: representing struct data, similar to an ordered
//!   `Map<String, Box<dyn Reflect>>`. This is the "mapping" form of a record.
//!
//! Dynamic types are special in that their `TypeInfo` is [`OpaqueInfo`],
//! but other APIs behave like the represented type, such as [`reflect_kind`] and [`reflect_ref`].
//!
//! [`Reflect`]: crate::Reflect
//! [`OpaqueInfo`]: crate::info::OpaqueInfo
//! [`reflect_kind`]: crate::Reflect::reflect_kind
//! [`reflect_ref`]: crate::Reflect::reflect_ref

// -----------------------------------------------------------------------------
// Modules

mod clone_error;
mod kind;
mod list_ops;
mod optional_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use clone_error::ReflectCloneError;

pub use kind::{ReflectMut, ReflectRef};

pub use list_ops::{List, ListItemIter};
pub use optional_ops::Optional;
pub use struct_ops::{DynamicStruct, Struct, StructFieldIter};
