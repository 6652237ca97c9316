use proc_macro2::Span;

/// A struct used to control whether a trait needs to be implemented.
#[derive(Debug)]
pub(crate) struct TraitImplSwitches {
    /// Default is `true`, use `#[reflect(TypePath = false)]`  to disable it.
    /// Then Users can(must) impl it in a more customized way.
    pub(crate) impl_type_path: bool,
    /// Default is `true`, use `#[reflect(Typed = false)]`  to disable it.
    /// Then Users can(must) impl it in a more customized way.
    pub(crate) impl_typed: bool,
}

impl Default for TraitImplSwitches {
    #[inline]
    fn default() -> Self {
        Self {
            impl_type_path: true,
            impl_typed: true,
        }
    }
}

/// A struct used to record whether the specified trait is available.
///
/// The span points at the attribute, for error reporting.
#[derive(Default, Debug)]
pub(crate) struct TraitAvailableFlags {
    pub default: Option<Span>,
    pub clone: Option<Span>,
    pub partial_eq: Option<Span>,
    pub debug: Option<Span>,
}
