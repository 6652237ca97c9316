//! Serialization support for the reflection system.
//!
//! [`ReflectSerializer`] serializes any reflected value through `serde`,
//! even when the value's concrete type does not implement `Serialize`:
//!
//! - structs become structs (or maps, for a [`DynamicStruct`]),
//! - lists become sequences,
//! - optionals become `Some`/`None`,
//! - opaque values use their own `Serialize` impl, reached through
//!   [`Reflect::as_serialize`].
//!
//! Deserialization is not provided.
//!
//! [`DynamicStruct`]: crate::ops::DynamicStruct
//! [`Reflect::as_serialize`]: crate::Reflect::as_serialize

// -----------------------------------------------------------------------------
// Modules

mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use ser::ReflectSerializer;
