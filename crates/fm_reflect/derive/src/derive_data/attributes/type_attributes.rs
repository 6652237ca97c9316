use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitBool, LitStr, Path};

use super::{TraitAvailableFlags, TraitImplSwitches};
use crate::REFLECT_ATTRIBUTE_NAME;

/// Container attributes, collected from every `#[reflect(...)]` on the type.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `#[reflect(type_path = "a::b::Name")]`
    pub custom_path: Option<Path>,
    pub impl_switchs: TraitImplSwitches,
    pub avail_traits: TraitAvailableFlags,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }

        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let span = meta.path.get_ident().map(syn::Ident::span);

        if meta.path.is_ident("type_path") {
            if self.custom_path.is_some() {
                return Err(meta.error("duplicate `type_path` attribute"));
            }
            let lit: LitStr = meta.value()?.parse()?;
            let path = syn::parse_str::<Path>(&lit.value())
                .map_err(|_| syn::Error::new(lit.span(), "expected a `::` separated type path"))?;
            if path.leading_colon.is_some() || path.segments.len() < 2 {
                return Err(syn::Error::new(
                    lit.span(),
                    "type path must contain a module, e.g. `my_crate::Foo`",
                ));
            }
            self.custom_path = Some(path);
        } else if meta.path.is_ident("default") {
            self.avail_traits.default = span;
        } else if meta.path.is_ident("clone") {
            self.avail_traits.clone = span;
        } else if meta.path.is_ident("partial_eq") {
            self.avail_traits.partial_eq = span;
        } else if meta.path.is_ident("debug") {
            self.avail_traits.debug = span;
        } else if meta.path.is_ident("TypePath") {
            self.impl_switchs.impl_type_path = meta.value()?.parse::<LitBool>()?.value;
        } else if meta.path.is_ident("Typed") {
            self.impl_switchs.impl_typed = meta.value()?.parse::<LitBool>()?.value;
        } else {
            return Err(meta.error(
                "unsupported reflect attribute, expected one of: \
                 `type_path`, `default`, `clone`, `partial_eq`, `debug`, `TypePath`, `Typed`",
            ));
        }

        Ok(())
    }
}
