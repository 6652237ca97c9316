//! Descriptor-based reflection for plain Rust structs.
//!
//! Every reflected type carries a static [`TypeInfo`](info::TypeInfo) table
//! generated by [`derive::Reflect`]. Values are accessed through the
//! [`Reflect`] trait and its kind-specific subtraits:
//!
//! - [`Struct`](ops::Struct): named fields, looked up by name or index.
//! - [`List`](ops::List): homogeneous sequences (`Vec<T>`).
//! - [`Optional`](ops::Optional): a nullable holder (`Option<T>`).
//! - everything else is `Opaque` (numbers, `bool`, `char`, strings).
//!
//! [`DynamicStruct`](ops::DynamicStruct) is a name-keyed mapping of boxed
//! values that behaves like a struct.
//!
//! # Example
//!
//! ```
//! use fm_reflect::{Reflect, derive::Reflect, ops::Struct};
//!
//! #[derive(Reflect)]
//! struct Person {
//!     name: String,
//!     age: Option<i32>,
//! }
//!
//! let person = Person { name: "a".to_string(), age: Some(5) };
//! let fields: &dyn Struct = &person;
//!
//! assert_eq!(fields.field_len(), 2);
//! assert_eq!(fields.name_at(1), Some("age"));
//! assert_eq!(fields.field_as::<String>("name").map(String::as_str), Some("a"));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::fm_reflect` paths; this alias lets the crate
// derive its own test types.
extern crate self as fm_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod impls;
pub mod info;
pub mod ops;
pub mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use fm_reflect_derive as derive;
pub use reflection::Reflect;
