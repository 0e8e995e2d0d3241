use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, Result as SynResult};

struct FieldDef {
    name: String,
    ignored: bool,
}

fn parse_field(field: &syn::Field) -> SynResult<FieldDef> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "Shape fields must be named"))?;
    let mut name = ident.to_string();
    if let Some(raw) = name.strip_prefix("r#") {
        name = raw.to_string();
    }
    let mut ignored = false;

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("shape")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("ignore") {
                ignored = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                name = lit.value();
                Ok(())
            } else {
                Err(meta.error("unsupported shape attribute, expected `ignore` or `rename`"))
            }
        })?;
    }

    Ok(FieldDef { name, ignored })
}

/// Derives `modelselect::catalog::Shape` for a struct with named fields.
///
/// `#[shape(ignore)]` marks a field the client never sends, and
/// `#[shape(rename = "...")]` overrides the payload key.
#[proc_macro_derive(Shape, attributes(shape))]
pub fn derive_shape(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(&input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> SynResult<proc_macro2::TokenStream> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Shape can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Shape can only be derived for structs",
            ))
        }
    };

    let fields = named.iter().map(parse_field).collect::<SynResult<Vec<_>>>()?;
    let entries = fields.iter().map(|f| {
        let name = &f.name;
        if f.ignored {
            quote! { ::modelselect::catalog::FieldMeta::client_ignored(#name), }
        } else {
            quote! { ::modelselect::catalog::FieldMeta::new(#name), }
        }
    });

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::modelselect::catalog::Shape for #ident #ty_generics #where_clause {
            fn shape_fields() -> ::std::vec::Vec<::modelselect::catalog::FieldMeta> {
                ::std::vec![ #(#entries)* ]
            }
        }
    })
}
