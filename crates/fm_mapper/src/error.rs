use alloc::borrow::Cow;

use fm_reflect::ops::ReflectCloneError;
use thiserror::Error;

use crate::introspect::Shape;

// -----------------------------------------------------------------------------
// Error

/// Errors returned by the mapping operations.
///
/// Field-level shape mismatches are not errors under
/// [`MergePolicy::Lenient`](crate::MergePolicy::Lenient); those fields are
/// skipped instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MapError {
    /// A `None` was found where a value is required.
    #[error("invalid value: `{type_path}` holds no value")]
    InvalidValue { type_path: &'static str },

    /// The resolved value is not of the expected shape.
    #[error("kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: Shape, found: Shape },

    /// The resolved value is neither a record nor a collection.
    #[error("unsupported kind: `{type_path}` is neither a record nor a collection")]
    UnsupportedKind { type_path: &'static str },

    /// The records of a collection do not share one layout.
    #[error("mixed collection: element {index} does not share the layout of the first element")]
    MixedCollection { index: usize },

    /// A required argument is empty or malformed.
    #[error("invalid params: {0}")]
    InvalidParams(Cow<'static, str>),

    /// The connector string names more than one connector.
    #[error("only one connector can be passed, got `{0}`")]
    OneConnector(String),

    /// The destination cannot be written.
    #[error("immutable target: `{target}` cannot be written")]
    ImmutableTarget { target: Cow<'static, str> },

    /// A `None` must be filled but its payload type has no default constructor.
    #[error("cannot allocate `{type_path}`: no default constructor registered")]
    MissingDefault { type_path: &'static str },

    /// Under [`MergePolicy::Strict`](crate::MergePolicy::Strict), a field exists
    /// on both sides with incompatible types.
    #[error("field `{field}` mismatch: cannot copy `{from_type}` into `{to_type}`")]
    FieldMismatch {
        field: String,
        from_type: &'static str,
        to_type: &'static str,
    },

    #[error(transparent)]
    Clone(#[from] ReflectCloneError),
}

impl MapError {
    #[inline]
    pub(crate) fn invalid_params(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidParams(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::MapError;
    use crate::introspect::Shape;

    #[test]
    fn messages() {
        let err = MapError::KindMismatch {
            expected: Shape::Record,
            found: Shape::Collection,
        };
        assert_eq!(err.to_string(), "kind mismatch: expected record, found collection");

        let err = MapError::invalid_params("criteria is empty");
        assert_eq!(err.to_string(), "invalid params: criteria is empty");

        let err = MapError::OneConnector("AND OR".into());
        assert_eq!(err.to_string(), "only one connector can be passed, got `AND OR`");
    }
}
