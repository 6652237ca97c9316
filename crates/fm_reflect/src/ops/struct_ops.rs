use alloc::borrow::Cow;
use core::fmt;
use core::ops::{Deref, DerefMut};

use fm_utils::hash::{FixedHashState, HashMap};

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::ops::ReflectCloneError;
use crate::reflection::impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// Dynamic Struct

/// A dynamic container representing a struct, i.e. a name-keyed mapping.
///
/// `DynamicStruct` holds an insertion-ordered list of `(name, value)` pairs,
/// where every value is a boxed [`Reflect`]. Names are unique; inserting an
/// existing name overwrites the value in place.
///
/// # Type Information
///
/// Dynamic types are special in that their `TypeInfo` is [`OpaqueInfo`],
/// but other APIs behave like the represented type, such as [`reflect_kind`] and [`reflect_ref`].
///
/// A `DynamicStruct` can optionally represent a specific struct type through its
/// [`represented_type_info`].
///
/// # Examples
///
/// ## Creating and extending a dynamic struct
///
/// ```
/// use fm_reflect::ops::{DynamicStruct, Struct};
///
/// let mut dynamic = DynamicStruct::new();
/// dynamic.extend("field_1", 1_i32);
/// dynamic.extend("field_2", "hello");
/// dynamic.extend("field_3", true);
///
/// assert_eq!(dynamic.field_len(), 3);
/// assert_eq!(dynamic.name_at(1), Some("field_2"));
/// ```
///
/// ## Mirroring a static struct
///
/// ```
/// use fm_reflect::{Reflect, derive::Reflect, ops::Struct};
///
/// #[derive(Reflect)]
/// struct Foo {
///     field_a: i32,
///     field_b: bool,
/// }
///
/// let foo = Foo { field_a: 10, field_b: true };
/// let dynamic = foo.to_dynamic_struct().unwrap();
///
/// assert_eq!(dynamic.name_at(0), Some("field_a"));
/// assert_eq!(dynamic.field("field_b").unwrap().downcast_ref::<bool>(), Some(&true));
/// assert_eq!(foo.reflect_partial_eq(&dynamic), Some(true));
/// ```
///
/// [`reflect_kind`]: Reflect::reflect_kind
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`represented_type_info`]: Reflect::represented_type_info
#[derive(Default)]
pub struct DynamicStruct {
    info: Option<&'static TypeInfo>,
    fields: Vec<Box<dyn Reflect>>,
    field_names: Vec<Cow<'static, str>>,
    field_indices: HashMap<Cow<'static, str>, usize>,
}

impl TypePath for DynamicStruct {
    #[inline]
    fn type_path() -> &'static str {
        "fm_reflect::ops::DynamicStruct"
    }

    #[inline]
    fn type_name() -> &'static str {
        "DynamicStruct"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "DynamicStruct"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("fm_reflect::ops")
    }
}

impl Typed for DynamicStruct {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>().with_default::<Self>()))
    }
}

impl DynamicStruct {
    /// Creates an empty `DynamicStruct`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            info: None,
            fields: Vec::new(),
            field_names: Vec::new(),
            field_indices: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Creates a new empty `DynamicStruct` with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            info: None,
            fields: Vec::with_capacity(capacity),
            field_names: Vec::with_capacity(capacity),
            field_indices: HashMap::with_capacity_and_hasher(capacity, FixedHashState),
        }
    }

    /// Sets the [`TypeInfo`] that this dynamic struct represents.
    ///
    /// Non-struct infos are ignored and clear the represented type.
    #[inline]
    pub fn set_type_info(&mut self, info: Option<&'static TypeInfo>) {
        self.info = info.filter(|info| info.is_struct());
    }

    /// Appends a boxed [`Reflect`] value to the end of the struct as a field.
    ///
    /// If the field name already exists, this will overwrite it in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_reflect::ops::{Struct, DynamicStruct};
    ///
    /// let mut dynamic = DynamicStruct::new();
    /// dynamic.extend_boxed("field_a", Box::new(1_i32));
    /// dynamic.extend_boxed("field_b", Box::new("hello"));
    /// dynamic.extend_boxed("field_a", Box::new(2_i32));
    ///
    /// assert_eq!(dynamic.field_len(), 2);
    /// assert_eq!(dynamic.index_of("field_a"), Some(0));
    /// ```
    pub fn extend_boxed(&mut self, name: impl Into<Cow<'static, str>>, value: Box<dyn Reflect>) {
        let name: Cow<'static, str> = name.into();
        if let Some(index) = self.field_indices.get(&name) {
            self.fields[*index] = value;
        } else {
            self.fields.push(value);
            self.field_indices
                .insert(name.clone(), self.fields.len() - 1);
            self.field_names.push(name);
        }
    }

    /// Appends a value to the end of the struct as a field.
    ///
    /// If the field name already exists, this will overwrite it.
    #[inline]
    pub fn extend<T: Reflect>(&mut self, name: impl Into<Cow<'static, str>>, value: T) {
        self.extend_boxed(name, Box::new(value));
    }

    /// Removes the field with the given name, returning its value.
    ///
    /// The relative order of the remaining fields is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_reflect::ops::{Struct, DynamicStruct};
    ///
    /// let mut dynamic = DynamicStruct::new();
    /// dynamic.extend("a", 1_u8);
    /// dynamic.extend("b", 2_u8);
    /// dynamic.extend("c", 3_u8);
    ///
    /// let removed = dynamic.remove("a").unwrap();
    /// assert_eq!(removed.downcast_ref::<u8>(), Some(&1));
    /// assert_eq!(dynamic.index_of("c"), Some(1));
    /// assert!(dynamic.remove("a").is_none());
    /// ```
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Reflect>> {
        let index = self.field_indices.remove(name)?;
        self.field_names.remove(index);
        for (i, name) in self.field_names.iter().enumerate().skip(index) {
            if let Some(slot) = self.field_indices.get_mut(name) {
                *slot = i;
            }
        }
        Some(self.fields.remove(index))
    }

    /// Gets the index of the field with the given name.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    /// Returns `true` if the mapping has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field names in insertion order.
    #[inline]
    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.field_names.iter().map(AsRef::as_ref)
    }

    /// Returns an iterator over `(name, value)` pairs in insertion order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &dyn Reflect)> {
        self.field_names
            .iter()
            .map(AsRef::as_ref)
            .zip(self.fields.iter().map(Deref::deref))
    }
}

impl Reflect for DynamicStruct {
    impl_reflect_cast_fn!(Struct);

    #[inline]
    fn is_dynamic(&self) -> bool {
        true
    }

    #[inline]
    fn represented_type_info(&self) -> Option<&'static TypeInfo> {
        self.info
    }

    #[inline]
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        Ok(Box::new(<Self as Struct>::to_dynamic_struct(self)?))
    }

    #[inline]
    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        crate::impls::struct_partial_eq(self, other)
    }

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynamicStruct(")?;
        crate::impls::struct_debug(self, f)?;
        write!(f, ")")
    }
}

impl fmt::Debug for DynamicStruct {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

impl<N: Into<Cow<'static, str>>> FromIterator<(N, Box<dyn Reflect>)> for DynamicStruct {
    fn from_iter<T: IntoIterator<Item = (N, Box<dyn Reflect>)>>(fields: T) -> Self {
        let mut dynamic_struct = DynamicStruct::new();
        for (name, value) in fields {
            dynamic_struct.extend_boxed(name, value);
        }
        dynamic_struct
    }
}

impl IntoIterator for DynamicStruct {
    type Item = (Cow<'static, str>, Box<dyn Reflect>);
    type IntoIter = core::iter::Zip<
        alloc::vec::IntoIter<Cow<'static, str>>,
        alloc::vec::IntoIter<Box<dyn Reflect>>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.field_names.into_iter().zip(self.fields)
    }
}

impl<'a> IntoIterator for &'a DynamicStruct {
    type Item = &'a dyn Reflect;
    type IntoIter = StructFieldIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_fields()
    }
}

// -----------------------------------------------------------------------------
// Struct trait

/// A trait for type-erased struct operations via reflection.
///
/// When using [`#[derive(Reflect)]`](crate::derive::Reflect) on a struct with
/// named fields, this trait will be automatically implemented.
///
/// Fields marked `#[reflect(readonly)]` are visible through [`field`] and
/// [`field_at`], but [`field_mut`] and [`field_at_mut`] return `None` for them.
///
/// # Examples
///
/// ```
/// use fm_reflect::{derive::Reflect, ops::Struct};
///
/// #[derive(Reflect)]
/// struct Foo {
///     a: i32,
///     b: bool,
/// }
///
/// let ts = Foo { a: 10_i32, b: true };
/// let ts_ref: &dyn Struct = &ts;
///
/// assert_eq!(ts_ref.field_len(), 2);
/// assert_eq!(ts_ref.field_as::<i32>("a"), Some(&10));
/// assert_eq!(ts_ref.field_at_as::<bool>(1), Some(&true));
/// ```
///
/// [`field`]: Struct::field
/// [`field_at`]: Struct::field_at
/// [`field_mut`]: Struct::field_mut
/// [`field_at_mut`]: Struct::field_at_mut
pub trait Struct: Reflect {
    /// Returns a reference to the value of the field named `name` as a
    /// `&dyn Reflect`.
    ///
    /// Returns `None` if the field does not exist.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the value of the field named `name`
    /// as a `&mut dyn Reflect`.
    ///
    /// Returns `None` if the field does not exist or is readonly.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fm_reflect::{derive::Reflect, ops::Struct};
    /// #[derive(Reflect)]
    /// struct Foo {
    ///     a: i32,
    ///     #[reflect(readonly)]
    ///     b: bool,
    /// }
    ///
    /// let mut ts = Foo { a: 1, b: true };
    ///
    /// if let Some(field) = ts.field_mut("a") {
    ///     *field.downcast_mut::<i32>().unwrap() = 42;
    /// }
    ///
    /// assert_eq!(ts.a, 42);
    /// assert!(ts.field("b").is_some());
    /// assert!(ts.field_mut("b").is_none());
    /// ```
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns a reference to the value of the field with index `index` as a
    /// `&dyn Reflect`.
    ///
    /// Returns `None` if `index` is out of bounds.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the value of the field with index `index`
    /// as a `&mut dyn Reflect`.
    ///
    /// Returns `None` if `index` is out of bounds or the field is readonly.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the name of the field with index `index`.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns the number of fields in the struct.
    fn field_len(&self) -> usize;

    /// Returns an iterator over the values of the struct's fields.
    ///
    /// The iterator yields references to each field in order,
    /// from index 0 to `field_len() - 1`.
    fn iter_fields(&self) -> StructFieldIter<'_>;

    /// Creates a new [`DynamicStruct`] from this struct.
    ///
    /// Every field value is copied with [`Reflect::reflect_clone`], so the
    /// mapping holds values of the same concrete types as the struct.
    ///
    /// # Examples
    ///
    /// ```
    /// use fm_reflect::{derive::Reflect, ops::Struct};
    ///
    /// #[derive(Reflect)]
    /// struct Foo {
    ///     a: i32,
    ///     b: Option<String>,
    /// }
    ///
    /// let foo = Foo { a: 7, b: None };
    /// let mapping = foo.to_dynamic_struct().unwrap();
    ///
    /// assert_eq!(mapping.index_of("b"), Some(1));
    /// assert_eq!(mapping.field("a").unwrap().downcast_ref::<i32>(), Some(&7));
    /// ```
    fn to_dynamic_struct(&self) -> Result<DynamicStruct, ReflectCloneError> {
        let mut dynamic_struct = DynamicStruct::with_capacity(self.field_len());
        dynamic_struct.set_type_info(self.represented_type_info());
        for (i, val) in self.iter_fields().enumerate() {
            let Some(name) = self.name_at(i) else {
                break;
            };
            dynamic_struct.extend_boxed(name.to_owned(), val.reflect_clone()?);
        }
        Ok(dynamic_struct)
    }
}

impl Struct for DynamicStruct {
    #[inline]
    fn field(&self, name: &str) -> Option<&dyn Reflect> {
        self.field_indices
            .get(name)
            .map(|index| &*self.fields[*index])
    }

    #[inline]
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect> {
        self.field_indices
            .get(name)
            .map(|index| &mut *self.fields[*index])
    }

    #[inline]
    fn field_at(&self, index: usize) -> Option<&dyn Reflect> {
        self.fields.get(index).map(Deref::deref)
    }

    #[inline]
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.fields.get_mut(index).map(DerefMut::deref_mut)
    }

    #[inline]
    fn name_at(&self, index: usize) -> Option<&str> {
        self.field_names.get(index).map(AsRef::as_ref)
    }

    #[inline]
    fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    fn iter_fields(&self) -> StructFieldIter<'_> {
        StructFieldIter::new(self)
    }

    fn to_dynamic_struct(&self) -> Result<DynamicStruct, ReflectCloneError> {
        let fields = self
            .fields
            .iter()
            .map(|val| val.reflect_clone())
            .collect::<Result<_, _>>()?;

        Ok(DynamicStruct {
            info: self.info,
            fields,
            field_names: self.field_names.clone(),
            field_indices: self.field_indices.clone(),
        })
    }
}

impl dyn Struct {
    /// Returns a typed reference to the field at the given field name.
    ///
    /// Returns `None` if the field does not exist or cannot be downcast to `T`.
    #[inline]
    pub fn field_as<T: Reflect>(&self, name: &str) -> Option<&T> {
        self.field(name).and_then(<dyn Reflect>::downcast_ref)
    }

    /// Returns a typed mutable reference to the field at the given field name.
    ///
    /// Returns `None` if the field does not exist, is readonly or cannot be
    /// downcast to `T`.
    #[inline]
    pub fn field_mut_as<T: Reflect>(&mut self, name: &str) -> Option<&mut T> {
        self.field_mut(name).and_then(<dyn Reflect>::downcast_mut)
    }

    /// Returns a typed reference to the field at the given index.
    ///
    /// Returns `None` if the index is out of bounds or the field cannot be
    /// downcast to `T`.
    #[inline]
    pub fn field_at_as<T: Reflect>(&self, index: usize) -> Option<&T> {
        self.field_at(index).and_then(<dyn Reflect>::downcast_ref)
    }
}

// -----------------------------------------------------------------------------
// Struct Field Iterator

/// An iterator over the field values of a struct.
///
/// # Examples
///
/// ```
/// use fm_reflect::{derive::Reflect, ops::{Struct, StructFieldIter}};
///
/// #[derive(Reflect)]
/// struct Foo {
///     a: i32,
///     b: bool,
/// }
///
/// let ts = Foo { a: 1, b: true };
/// let mut iter = StructFieldIter::new(&ts);
///
/// assert_eq!(iter.len(), 2);
/// assert_eq!(iter.next().and_then(|v| v.downcast_ref::<i32>()), Some(&1));
/// ```
pub struct StructFieldIter<'a> {
    struct_val: &'a dyn Struct,
    index: usize,
}

impl<'a> StructFieldIter<'a> {
    /// Creates a new iterator for the given struct.
    #[inline(always)]
    pub const fn new(value: &'a dyn Struct) -> Self {
        StructFieldIter {
            struct_val: value,
            index: 0,
        }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.struct_val.field_at(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.struct_val.field_len() - self.index;
        (size, Some(size))
    }
}

impl ExactSizeIterator for StructFieldIter<'_> {}

#[cfg(test)]
mod tests {
    use super::DynamicStruct;
    use crate::Reflect;
    use crate::derive::Reflect;
    use crate::info::{DynamicTyped, ReflectKind, TypePath, Typed};
    use crate::ops::Struct;

    #[derive(Reflect, Default)]
    #[reflect(default, type_path = "demo::Account")]
    struct Account {
        #[reflect(readonly)]
        id: u64,
        name: String,
        #[reflect(skip)]
        cache: Vec<u8>,
    }

    #[derive(Reflect, Clone, PartialEq, Debug)]
    #[reflect(clone, partial_eq, debug)]
    struct Flagged {
        a: i32,
    }

    #[test]
    fn dynamic_struct_is_a_struct() {
        let mut dynamic = DynamicStruct::new();
        dynamic.extend("name", String::from("a"));
        dynamic.extend("age", 5_i32);

        assert!(dynamic.is_dynamic());
        assert_eq!(dynamic.reflect_kind(), ReflectKind::Struct);
        assert!(dynamic.reflect_type_info().is_opaque());
        assert!(dynamic.represented_type_info().is_none());
    }

    #[test]
    fn remove_reindexes() {
        let mut dynamic: DynamicStruct = [
            ("a", 1_u8.into_boxed_reflect()),
            ("b", 2_u8.into_boxed_reflect()),
            ("c", 3_u8.into_boxed_reflect()),
        ]
        .into_iter()
        .collect();

        assert!(dynamic.remove("b").is_some());
        assert_eq!(dynamic.field_names().collect::<Vec<_>>(), ["a", "c"]);
        assert_eq!(dynamic.index_of("c"), Some(1));
        assert_eq!(dynamic.field_at(1).unwrap().downcast_ref::<u8>(), Some(&3));
        assert_eq!(dynamic.field("c").unwrap().downcast_ref::<u8>(), Some(&3));
    }

    #[test]
    fn clone_and_compare() {
        let mut dynamic = DynamicStruct::new();
        dynamic.extend("x", 1.5_f32);
        dynamic.extend("y", Some(2_u64));

        let cloned = dynamic.reflect_clone().unwrap();
        assert!(cloned.is::<DynamicStruct>());
        assert_eq!(dynamic.reflect_partial_eq(&*cloned), Some(true));

        let mut other = DynamicStruct::new();
        other.extend("x", 1.5_f32);
        other.extend("y", None::<u64>);
        assert_eq!(dynamic.reflect_partial_eq(&other), Some(false));
    }

    #[test]
    fn into_iter_yields_pairs() {
        let mut dynamic = DynamicStruct::new();
        dynamic.extend("k", 'v');

        let pairs: Vec<_> = dynamic.into_iter().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "k");
        assert_eq!(pairs[0].1.downcast_ref::<char>(), Some(&'v'));
    }

    #[test]
    fn derived_field_table() {
        assert_eq!(Account::type_path(), "demo::Account");
        assert_eq!(Account::type_name(), "Account");
        assert_eq!(Account::module_path(), Some("demo"));

        let info = Account::type_info().as_struct().unwrap();
        assert_eq!(info.field_names(), ["id", "name"]);
        assert!(info.field("id").unwrap().is_readonly());
        assert!(info.field("cache").is_none());
        assert!(info.ty().has_default());

        let mut account = Account {
            id: 7,
            name: "a".into(),
            cache: vec![1],
        };
        assert_eq!(account.field_len(), 2);
        assert_eq!(account.name_at(1), Some("name"));
        assert!(account.field("id").is_some());
        assert!(account.field_mut("id").is_none());
        assert!(account.field_at_mut(0).is_none());
        assert!(account.field_mut("cache").is_none());

        let cloned = account.reflect_clone().unwrap().take::<Account>().unwrap();
        assert_eq!((cloned.id, cloned.name.as_str()), (7, "a"));
        assert!(cloned.cache.is_empty());
    }

    #[test]
    fn derived_writes_skip_readonly() {
        let mut account = Account::default();
        for index in 0..account.field_len() {
            if let Some(field) = account.field_at_mut(index) {
                field.set(Box::new(String::from("b"))).unwrap();
            }
        }
        assert_eq!((account.id, account.name.as_str()), (0, "b"));

        let dynamic = account.to_dynamic_struct().unwrap();
        assert_eq!(account.reflect_partial_eq(&dynamic), Some(true));
        assert_eq!(dynamic.reflect_partial_eq(&account), Some(true));
    }

    #[test]
    fn derived_std_trait_flags() {
        let x = Flagged { a: 1 };
        let cloned = x.reflect_clone().unwrap();
        assert_eq!(cloned.reflect_partial_eq(&x), Some(true));
        assert_eq!(x.reflect_partial_eq(&Flagged { a: 2 }), Some(false));
        assert_eq!(format!("{:?}", &x as &dyn Reflect), "Flagged { a: 1 }");

        let mut y = Flagged { a: 0 };
        y.set(cloned).unwrap();
        assert_eq!(y, x);
    }
}
