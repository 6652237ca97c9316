use syn::Attribute;
use syn::meta::ParseNestedMeta;

use crate::REFLECT_ATTRIBUTE_NAME;

/// Field attributes, collected from every `#[reflect(...)]` on the field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `#[reflect(skip)]`: not visible to reflection at all.
    pub skip: bool,
    /// `#[reflect(readonly)]`: visible, but never handed out mutably.
    pub readonly: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }

        if this.skip && this.readonly {
            return Err(syn::Error::new_spanned(
                &attrs[0],
                "`skip` and `readonly` cannot be used together",
            ));
        }

        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("skip") {
            self.skip = true;
        } else if meta.path.is_ident("readonly") {
            self.readonly = true;
        } else {
            return Err(meta.error("unsupported field attribute, expected `skip` or `readonly`"));
        }
        Ok(())
    }
}
