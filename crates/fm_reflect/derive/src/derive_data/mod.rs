//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod reflect_struct;

// -----------------------------------------------------------------------------
// Internal API

use attributes::{FieldAttributes, TypeAttributes};

pub(crate) use reflect_struct::{FieldAccessors, ReflectStruct};
