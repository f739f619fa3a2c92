use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

use crate::record::RecordDef;

pub(crate) fn record(def: &RecordDef) -> TokenStream {
    let bsonmap = quote!(__bsonmap);
    let ident = &def.ident;

    let mut generics = def.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(#bsonmap::FieldValue));
        param.bounds.push(syn::parse_quote!(#bsonmap::Serialize));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let field_metas = def.fields.iter().map(|field| {
        let name = field.ident.unraw().to_string();
        let tags = field.tags.iter().map(|(key, directive)| quote!((#key, #directive)));
        let visible = field.visible;

        quote! {
            #bsonmap::FieldMeta {
                name: #name,
                tags: &[#(#tags),*],
                visible: #visible,
            }
        }
    });

    let visible = def
        .fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.visible)
        .collect::<Vec<_>>();

    let value_arms = visible.iter().map(|(index, field)| {
        let field_ident = &field.ident;
        quote!(#index => Some(&self.#field_ident),)
    });

    let zero_checks = visible.iter().map(|(_, field)| {
        let field_ident = &field.ident;
        quote!(&& #bsonmap::FieldValue::is_zero(&self.#field_ident))
    });

    quote! {
        const _: () = {
            use ::bsonmap::__private as #bsonmap;

            impl #impl_generics #bsonmap::Record for #ident #ty_generics #where_clause {
                fn record_fields(&self) -> &'static [#bsonmap::FieldMeta] {
                    const FIELDS: &[#bsonmap::FieldMeta] = &[#(#field_metas),*];
                    FIELDS
                }

                fn field_value(&self, index: usize) -> Option<&dyn #bsonmap::FieldValue> {
                    match index {
                        #(#value_arms)*
                        _ => None,
                    }
                }
            }

            impl #impl_generics #bsonmap::FieldValue for #ident #ty_generics #where_clause {
                fn kind() -> #bsonmap::Kind {
                    #bsonmap::Kind::Record
                }

                fn shape(&self) -> #bsonmap::Shape<'_> {
                    #bsonmap::Shape::Record(self)
                }

                fn is_zero(&self) -> bool {
                    true #(#zero_checks)*
                }

                fn to_bson(&self) -> #bsonmap::MapperResult<#bsonmap::Bson> {
                    #bsonmap::raw_bson(self)
                }
            }
        };
    }
}
