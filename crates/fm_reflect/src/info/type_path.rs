// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect) for structs
/// and by this crate for the supported std types.
///
/// # Examples
///
/// ```
/// use fm_reflect::info::TypePath;
///
/// assert_eq!(<Vec<i32>>::type_path(), "alloc::vec::Vec<i32>");
/// assert_eq!(<Option<String>>::type_name(), "Option<String>");
/// assert_eq!(<Option<String>>::type_ident(), "Option");
/// ```
pub trait TypePath: 'static {
    /// Returns the fully qualified path of the type, e.g. `alloc::vec::Vec<i32>`.
    fn type_path() -> &'static str;

    /// Returns the short name of the type, e.g. `Vec<i32>`.
    fn type_name() -> &'static str;

    /// Returns the name of the type without generics, e.g. `Vec`.
    fn type_ident() -> &'static str {
        Self::type_name()
    }

    /// Returns the module path, if there is one.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Dynamic dispatch for [`TypePath`].
///
/// Automatically implemented for every [`TypePath`] type.
pub trait DynamicTypePath {
    /// See [`TypePath::type_path`].
    fn reflect_type_path(&self) -> &'static str;

    /// See [`TypePath::type_name`].
    fn reflect_type_name(&self) -> &'static str;

    /// See [`TypePath::type_ident`].
    fn reflect_type_ident(&self) -> &'static str;

    /// See [`TypePath::module_path`].
    fn reflect_module_path(&self) -> Option<&'static str>;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        Self::type_name()
    }

    #[inline]
    fn reflect_type_ident(&self) -> &'static str {
        Self::type_ident()
    }

    #[inline]
    fn reflect_module_path(&self) -> Option<&'static str> {
        Self::module_path()
    }
}
