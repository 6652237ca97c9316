//! Copying same-named fields between two records.

use alloc::borrow::Cow;

use fm_reflect::Reflect;
use fm_reflect::ops::{ReflectMut, ReflectRef, Struct};

use crate::MapError;
use crate::introspect::Shape;

// -----------------------------------------------------------------------------
// MergePolicy

/// How [`FieldMatcher`] treats a field it cannot copy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergePolicy {
    /// Best effort: incompatible and readonly destination fields are skipped.
    #[default]
    Lenient,
    /// Incompatible fields fail with [`MapError::FieldMismatch`] and readonly
    /// destination fields with [`MapError::ImmutableTarget`].
    Strict,
}

// -----------------------------------------------------------------------------
// CopyReport

/// What [`FieldMatcher::copy_fields_report`] did with each source field.
///
/// Source fields without a destination counterpart appear in no list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyReport {
    /// Fields written into the destination.
    pub copied: Vec<String>,
    /// `Option` source fields holding `None`, left untouched in the destination.
    pub unset: Vec<String>,
    /// Fields present on both sides but not copied.
    pub skipped: Vec<String>,
}

// -----------------------------------------------------------------------------
// FieldMatcher

/// Copies every source field into the destination field of the same name.
///
/// For a field `name` present on both sides, with source type `S` and
/// destination type `D`:
///
/// | `S`         | `D`         | effect                                      |
/// |-------------|-------------|---------------------------------------------|
/// | `K`         | `K`         | the value is cloned into the destination    |
/// | `Option<K>` | `K`         | `Some(v)` writes `v`, `None` leaves it as is |
/// | `K`         | `Option<K>` | the destination becomes `Some(value)`       |
/// | other       | other       | skipped, see [`MergePolicy`]                |
///
/// Fields whose value is itself a record (possibly behind `Option`) are not
/// copied: nested records are unsupported and always skipped.
///
/// Destination fields without a source counterpart keep their value. Every
/// field is checked and every value cloned before the first write, so a
/// failure leaves the destination untouched.
///
/// # Examples
///
/// ```
/// use fm_mapper::FieldMatcher;
/// use fm_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// struct User {
///     name: String,
///     age: i32,
/// }
///
/// #[derive(Reflect)]
/// struct UserPatch {
///     name: String,
///     age: Option<i32>,
///     email: Option<String>,
/// }
///
/// let user = User { name: "a".into(), age: 5 };
/// let mut patch = UserPatch { name: String::new(), age: None, email: None };
///
/// FieldMatcher::default().copy_fields(&user, &mut patch).unwrap();
///
/// assert_eq!(patch.name, "a");
/// assert_eq!(patch.age, Some(5));
/// assert_eq!(patch.email, None);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldMatcher {
    policy: MergePolicy,
}

/// The planned effect on a single destination field.
enum Action {
    /// `set` the value on the destination field.
    Write(Box<dyn Reflect>),
    /// Put the value into the destination `Option`.
    Wrap(Box<dyn Reflect>),
    /// The source `Option` is `None`.
    Unset,
    Skip,
}

impl FieldMatcher {
    /// Creates a matcher with the given policy.
    #[inline]
    pub const fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }

    #[inline]
    pub const fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Copies the fields of `source` into `dest` and returns `dest`.
    ///
    /// # Errors
    ///
    /// - [`MapError::Clone`] if a source value cannot be cloned.
    /// - Under [`MergePolicy::Strict`], [`MapError::FieldMismatch`] and
    ///   [`MapError::ImmutableTarget`].
    pub fn copy_fields<'d>(
        &self,
        source: &dyn Struct,
        dest: &'d mut dyn Struct,
    ) -> Result<&'d mut dyn Struct, MapError> {
        self.copy_fields_report(source, &mut *dest)?;
        Ok(dest)
    }

    /// Same as [`copy_fields`](Self::copy_fields), but reports what happened
    /// to each field.
    pub fn copy_fields_report(
        &self,
        source: &dyn Struct,
        dest: &mut dyn Struct,
    ) -> Result<CopyReport, MapError> {
        let mut report = CopyReport::default();
        let mut actions: Vec<(&str, Action)> = Vec::with_capacity(source.field_len());

        for (index, src_field) in source.iter_fields().enumerate() {
            let Some(name) = source.name_at(index) else {
                continue;
            };
            let Some(dst_field) = dest.field(name) else {
                continue;
            };
            let mut action = self.plan(name, src_field, dst_field)?;

            if matches!(action, Action::Write(_) | Action::Wrap(_))
                && dest.field_mut(name).is_none()
            {
                if self.policy == MergePolicy::Strict {
                    return Err(MapError::ImmutableTarget {
                        target: Cow::Owned(format!("{}::{name}", dest.reflect_type_path())),
                    });
                }
                log::debug!("`{name}` is readonly in `{}`, skipped", dest.reflect_type_path());
                action = Action::Skip;
            }
            actions.push((name, action));
        }

        for (name, action) in actions {
            let (value, wrap) = match action {
                Action::Skip => {
                    report.skipped.push(name.to_owned());
                    continue;
                }
                Action::Unset => {
                    log::trace!("`{name}` is unset in the source, left as is");
                    report.unset.push(name.to_owned());
                    continue;
                }
                Action::Write(value) => (value, false),
                Action::Wrap(value) => (value, true),
            };

            let Some(field) = dest.field_mut(name) else {
                continue;
            };
            let to_type = field.reflect_type_path();
            let rejected = |value: Box<dyn Reflect>| MapError::FieldMismatch {
                field: name.to_owned(),
                from_type: value.reflect_type_path(),
                to_type,
            };

            if wrap {
                let ReflectMut::Optional(optional) = field.reflect_mut() else {
                    return Err(rejected(value));
                };
                optional.replace(value).map_err(rejected)?;
            } else {
                field.set(value).map_err(rejected)?;
            }

            log::trace!("`{name}` copied");
            report.copied.push(name.to_owned());
        }

        Ok(report)
    }

    /// Decides what to do with a field, cloning the value to write.
    fn plan(&self, name: &str, src: &dyn Reflect, dst: &dyn Reflect) -> Result<Action, MapError> {
        if is_record(src) {
            log::debug!("`{name}` holds a nested record, which is unsupported, skipped");
            return Ok(Action::Skip);
        }

        let dst_id = dst.ty_id();

        if src.ty_id() == dst_id {
            return Ok(Action::Write(src.reflect_clone()?));
        }

        if let ReflectRef::Optional(optional) = src.reflect_ref()
            && optional.inner_ty_id() == dst_id
        {
            return Ok(match optional.value() {
                Some(value) => Action::Write(value.reflect_clone()?),
                None => Action::Unset,
            });
        }

        if let ReflectRef::Optional(optional) = dst.reflect_ref()
            && optional.inner_ty_id() == src.ty_id()
        {
            return Ok(Action::Wrap(src.reflect_clone()?));
        }

        if self.policy == MergePolicy::Strict {
            return Err(mismatch(name, src, dst));
        }
        log::debug!(
            "`{name}` skipped: `{}` does not fit `{}`",
            src.reflect_type_path(),
            dst.reflect_type_path(),
        );
        Ok(Action::Skip)
    }
}

fn mismatch(name: &str, from: &dyn Reflect, to: &dyn Reflect) -> MapError {
    MapError::FieldMismatch {
        field: name.to_owned(),
        from_type: from.reflect_type_path(),
        to_type: to.reflect_type_path(),
    }
}

/// Whether `value` is a record, or an `Option` type whose payload is one.
fn is_record(value: &dyn Reflect) -> bool {
    Shape::of(value) == Shape::Record || Shape::of_type(value.reflect_type_info()) == Shape::Record
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use fm_reflect::derive::Reflect;
    use fm_reflect::ops::DynamicStruct;

    use super::*;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Inner {
        v: i32,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Source {
        name: String,
        age: i32,
        score: Option<u32>,
        nick: Option<String>,
        flag: bool,
        inner: Inner,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Dest {
        name: String,
        age: Option<i32>,
        score: u32,
        nick: String,
        flag: u8,
        inner: Inner,
        extra: i64,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Locked {
        #[reflect(readonly)]
        name: String,
        age: i32,
    }

    fn source() -> Source {
        Source {
            name: "a".into(),
            age: 5,
            score: Some(7),
            nick: None,
            flag: true,
            inner: Inner { v: 1 },
        }
    }

    #[test]
    fn adapts_options_both_ways() {
        let mut dest = Dest {
            nick: "kept".into(),
            extra: 9,
            ..Default::default()
        };
        let report = FieldMatcher::default()
            .copy_fields_report(&source(), &mut dest)
            .unwrap();

        assert_eq!(dest.name, "a");
        assert_eq!(dest.age, Some(5));
        assert_eq!(dest.score, 7);
        assert_eq!(dest.nick, "kept");
        assert_eq!(dest.flag, 0);
        assert_eq!(dest.inner, Inner { v: 0 });
        assert_eq!(dest.extra, 9);

        assert_eq!(report.copied, ["name", "age", "score"]);
        assert_eq!(report.unset, ["nick"]);
        assert_eq!(report.skipped, ["flag", "inner"]);
    }

    #[test]
    fn strict_policy_rejects_mismatch() {
        let mut dest = Dest::default();
        let err = FieldMatcher::new(MergePolicy::Strict)
            .copy_fields(&source(), &mut dest)
            .err()
            .unwrap();

        assert!(matches!(err, MapError::FieldMismatch { ref field, .. } if field == "flag"));
        // Nothing is written when planning fails.
        assert_eq!(dest, Dest::default());
    }

    #[test]
    fn readonly_fields() {
        let mut locked = Locked::default();
        let report = FieldMatcher::default()
            .copy_fields_report(&source(), &mut locked)
            .unwrap();
        assert_eq!(locked.name, "");
        assert_eq!(locked.age, 5);
        assert_eq!(report.skipped, ["name"]);

        let err = FieldMatcher::new(MergePolicy::Strict)
            .copy_fields(&source(), &mut Locked::default())
            .err()
            .unwrap();
        assert!(matches!(err, MapError::ImmutableTarget { .. }));
    }

    #[test]
    fn dynamic_struct_on_both_sides() {
        let mut mapping = DynamicStruct::new();
        mapping.extend("age", 3_i32);
        mapping.extend("name", String::from("m"));
        mapping.extend("unknown", 1_u8);

        let mut dest = Dest::default();
        FieldMatcher::default().copy_fields(&mapping, &mut dest).unwrap();
        assert_eq!(dest.age, Some(3));
        assert_eq!(dest.name, "m");

        let mut target = DynamicStruct::new();
        target.extend("score", 0_u32);
        target.extend("age", Option::<i32>::None);
        FieldMatcher::default().copy_fields(&source(), &mut target).unwrap();

        let target: &dyn Struct = &target;
        assert_eq!(target.field_as::<u32>("score"), Some(&7));
        assert_eq!(target.field_as::<Option<i32>>("age"), Some(&Some(5)));
    }

    #[test]
    fn record_detection() {
        assert!(is_record(&Inner::default()));
        assert!(is_record(&Option::<Inner>::None));
        assert!(is_record(&DynamicStruct::new()));
        assert!(is_record(&Option::<DynamicStruct>::None));
        assert!(!is_record(&Some(1_i32)));
        assert!(!is_record(&vec![Inner::default()]));
    }
}
