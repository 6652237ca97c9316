use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, Member};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// Define

/// Parsed data of a `#[derive(Reflect)]` struct.
pub(crate) struct ReflectStruct<'a> {
    type_ident: &'a Ident,
    attrs: TypeAttributes,
    fields: Vec<StructField<'a>>,
    fm_reflect_path: syn::Path,
}

/// Represents a field on a struct.
pub(crate) struct StructField<'a> {
    /// The raw field.
    pub data: &'a Field,
    /// The reflection-based attributes on the field.
    pub attrs: FieldAttributes,
    /// The index of this field within the reflected fields.
    ///
    /// `None` for skipped fields.
    pub reflection_index: Option<usize>,
}

// -----------------------------------------------------------------------------
// Parse

impl<'a> ReflectStruct<'a> {
    pub fn from_ast(input: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "tuple structs are not supported, reflected fields must be named",
                    ));
                }
                Fields::Unit => {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "unit structs are not supported, reflected fields must be named",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "enums are not supported, only structs with named fields",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "unions are not supported, only structs with named fields",
                ));
            }
        };

        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "generic types are not supported by `#[derive(Reflect)]`",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let mut index = 0usize;
        let mut fields = Vec::with_capacity(named.named.len());
        for data in &named.named {
            let attrs = FieldAttributes::parse_attrs(&data.attrs)?;
            let reflection_index = if attrs.skip {
                None
            } else {
                index += 1;
                Some(index - 1)
            };
            fields.push(StructField {
                data,
                attrs,
                reflection_index,
            });
        }

        Ok(Self {
            type_ident: &input.ident,
            attrs,
            fields,
            fm_reflect_path: crate::path::fm_reflect(),
        })
    }
}

// -----------------------------------------------------------------------------
// Accessors

impl<'a> ReflectStruct<'a> {
    #[inline]
    pub fn type_ident(&self) -> &Ident {
        self.type_ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn fm_reflect_path(&self) -> &syn::Path {
        &self.fm_reflect_path
    }

    /// All fields, including skipped ones.
    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// Get an iterator of fields which are exposed to the reflection API.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| !field.attrs.skip)
    }

    /// Generates a `TokenStream` for `TypeInfo::Struct` construction.
    pub fn to_info_tokens(&self) -> TokenStream {
        let fm_reflect_path = &self.fm_reflect_path;
        let type_info_ = crate::path::type_info_(fm_reflect_path);
        let struct_info_ = crate::path::struct_info_(fm_reflect_path);
        let named_field_ = crate::path::named_field_(fm_reflect_path);

        let fields = self.active_fields().map(|field| {
            let name = field.name();
            let ty = &field.data.ty;
            let readonly = field
                .attrs
                .readonly
                .then(|| quote!(.with_readonly()));
            quote! {
                #named_field_::new::<#ty>(#name) #readonly
            }
        });

        let with_default = self
            .attrs
            .avail_traits
            .default
            .map(|_| quote!(.with_default::<Self>()));

        quote! {
            #type_info_::Struct(
                #struct_info_::new::<Self>(&[
                    #(#fields,)*
                ]) #with_default
            )
        }
    }
}

impl StructField<'_> {
    /// The field name as a string literal.
    pub fn name(&self) -> String {
        self.data
            .ident
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// The member used to access the field, `self.#member`.
    pub fn member(&self) -> Member {
        match &self.data.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(0.into()),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldAccessors

/// Tokens accessing the reflected fields, in reflection order.
pub(crate) struct FieldAccessors {
    /// The field names, as string literals.
    pub field_names: Vec<String>,
    /// `&self.field`
    pub fields_ref: Vec<TokenStream>,
    /// The indices of the reflected fields.
    pub field_indices: Vec<usize>,
    /// Names of the fields that may be borrowed mutably.
    pub mutable_names: Vec<String>,
    /// `&mut self.field`, for writable fields only.
    pub fields_mut: Vec<TokenStream>,
    /// Indices of writable fields.
    pub mutable_indices: Vec<usize>,
    /// The number of reflected fields.
    pub field_count: usize,
}

impl FieldAccessors {
    pub fn new(info: &ReflectStruct) -> Self {
        let mut this = Self {
            field_names: Vec::new(),
            fields_ref: Vec::new(),
            field_indices: Vec::new(),
            mutable_names: Vec::new(),
            fields_mut: Vec::new(),
            mutable_indices: Vec::new(),
            field_count: 0,
        };

        for field in info.active_fields() {
            let Some(index) = field.reflection_index else {
                continue;
            };
            let member = field.member();
            let name = field.name();

            this.field_names.push(name.clone());
            this.fields_ref.push(quote!(&self.#member));
            this.field_indices.push(index);

            if !field.attrs.readonly {
                this.mutable_names.push(name);
                this.fields_mut.push(quote!(&mut self.#member));
                this.mutable_indices.push(index);
            }
        }
        this.field_count = this.field_indices.len();

        this
    }
}
