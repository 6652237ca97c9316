//! Name-keyed copies, searches and conversions over reflected values.
//!
//! Values are anything implementing [`Reflect`](fm_reflect::Reflect),
//! usually a struct with `#[derive(Reflect)]`, a `Vec` of them, or a
//! [`DynamicStruct`](fm_reflect::ops::DynamicStruct) mapping. `Option`
//! layers around a value are looked through: on read paths a `None` is an
//! error, on write paths it is replaced by a default value first (see
//! [`introspect`]).
//!
//! - [`map`]: copies a record into a record, or a collection into a
//!   collection, matching fields by name.
//! - [`find_struct`], [`position_struct`]: search a collection by field values.
//! - [`index_of`]: search a collection by value.
//! - [`record_to_mapping`], [`mapping_to_record`]: convert between records
//!   and mappings.
//!
//! The building blocks are [`FieldMatcher`] and [`CollectionMapper`], and
//! [`Mapper`] bundles everything with a [`MergePolicy`].
//!
//! # Example
//!
//! ```
//! use fm_reflect::derive::Reflect;
//!
//! #[derive(Reflect)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! #[derive(Reflect, Default)]
//! struct Contact {
//!     name: String,
//!     age: Option<i32>,
//! }
//!
//! let mut contact = Contact::default();
//! fm_mapper::map(&Person { name: "a".into(), age: 5 }, &mut contact).unwrap();
//!
//! assert_eq!(contact.name, "a");
//! assert_eq!(contact.age, Some(5));
//! ```

// -----------------------------------------------------------------------------
// Extern crates

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod convert;
mod error;
mod mapper;
mod matcher;
mod search;

pub mod introspect;

// -----------------------------------------------------------------------------
// Exports

pub use collection::CollectionMapper;
pub use convert::{mapping_to_record, record_to_mapping};
pub use error::MapError;
pub use introspect::Shape;
pub use mapper::Mapper;
pub use matcher::{CopyReport, FieldMatcher, MergePolicy};
pub use search::{Connector, find_struct, index_of, position_struct};

use fm_reflect::Reflect;

/// Copies `source` into `dest` with the lenient policy.
///
/// See [`Mapper::map`].
#[inline]
pub fn map(source: &dyn Reflect, dest: &mut dyn Reflect) -> Result<(), MapError> {
    Mapper::new().map(source, dest)
}
