use syn::spanned::Spanned;

#[derive(Debug)]
pub(crate) struct RecordDef {
    /// Struct identifier
    pub(crate) ident: syn::Ident,

    pub(crate) generics: syn::Generics,

    /// Declared fields, in source order
    pub(crate) fields: Vec<FieldDef>,
}

#[derive(Debug)]
pub(crate) struct FieldDef {
    pub(crate) ident: syn::Ident,

    /// Directives keyed by tag, in attribute order
    pub(crate) tags: Vec<(String, syn::LitStr)>,

    /// True if the field is `pub`
    pub(crate) visible: bool,
}

impl RecordDef {
    pub(crate) fn from_ast(input: &syn::DeriveInput) -> syn::Result<Self> {
        let syn::Data::Struct(data) = &input.data else {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs",
            ));
        };

        let fields = match &data.fields {
            syn::Fields::Named(named) => named
                .named
                .iter()
                .map(FieldDef::from_ast)
                .collect::<syn::Result<Vec<_>>>()?,
            syn::Fields::Unit => vec![],
            syn::Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new(
                    unnamed.span(),
                    "Record can only be derived for structs with named fields",
                ));
            }
        };

        Ok(RecordDef {
            ident: input.ident.clone(),
            generics: input.generics.clone(),
            fields,
        })
    }
}

impl FieldDef {
    fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let mut tags: Vec<(String, syn::LitStr)> = vec![];

        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("bsonmap")) {
            attr.parse_nested_meta(|meta| {
                let Some(key) = meta.path.get_ident().map(ToString::to_string) else {
                    return Err(meta.error("expected a tag key, e.g. `bson = \"name,omitempty\"`"));
                };

                if tags.iter().any(|(existing, _)| *existing == key) {
                    return Err(meta.error(format!("duplicate directive for tag `{key}`")));
                }

                let directive: syn::LitStr = meta.value()?.parse()?;
                tags.push((key, directive));

                Ok(())
            })?;
        }

        Ok(FieldDef {
            ident: ident.clone(),
            tags,
            visible: matches!(field.vis, syn::Visibility::Public(_)),
        })
    }
}
