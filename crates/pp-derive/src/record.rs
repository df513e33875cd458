//! Record derive macro implementation

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

/// Types whose fields never map to a column.
const AUTO_SKIPPED: &[&str] = &[
    "Mutex",
    "RwLock",
    "Cell",
    "RefCell",
    "OnceCell",
    "OnceLock",
    "PhantomData",
    "PhantomPinned",
];

#[derive(Default)]
struct StructAttrs {
    rename_all: Option<String>,
}

impl syn::parse::Parse for StructAttrs {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = StructAttrs::default();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            let _: syn::Token![=] = input.parse()?;
            let value: syn::LitStr = input.parse()?;
            match ident.to_string().as_str() {
                "rename_all" => attrs.rename_all = Some(value.value()),
                other => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        format!("unknown pp attribute `{other}`"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attrs)
    }
}

#[derive(Default)]
struct FieldAttrs {
    column: Option<String>,
    skip: bool,
    skip_insert: bool,
    skip_update: bool,
    default_if_empty: bool,
    flatten: bool,
}

impl FieldAttrs {
    /// Parse `#[db(...)]` entries: `column = "x"` and `skip`.
    fn parse_db(&mut self, input: syn::parse::ParseStream) -> Result<()> {
        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            match ident.to_string().as_str() {
                "skip" => self.skip = true,
                "column" => {
                    let _: syn::Token![=] = input.parse()?;
                    let value: syn::LitStr = input.parse()?;
                    self.column = Some(value.value());
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        format!("unknown db attribute `{other}`"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Parse `#[pp(...)]` flags.
    fn parse_pp(&mut self, input: syn::parse::ParseStream) -> Result<()> {
        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            match ident.to_string().as_str() {
                "skip_insert" => self.skip_insert = true,
                "skip_update" => self.skip_update = true,
                "default_if_empty" => self.default_if_empty = true,
                "flatten" => self.flatten = true,
                other => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        format!("unknown pp attribute `{other}`"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }
        Ok(())
    }
}

fn get_struct_attrs(input: &DeriveInput) -> Result<StructAttrs> {
    let mut attrs = StructAttrs::default();
    for attr in &input.attrs {
        if attr.path().is_ident("pp") {
            let parsed: StructAttrs = attr.parse_args()?;
            if parsed.rename_all.is_some() {
                attrs.rename_all = parsed.rename_all;
            }
        }
    }
    Ok(attrs)
}

fn get_field_attrs(field: &syn::Field) -> Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();
    for attr in &field.attrs {
        if attr.path().is_ident("db") {
            attr.parse_args_with(|input: syn::parse::ParseStream| attrs.parse_db(input))?;
        } else if attr.path().is_ident("pp") {
            attr.parse_args_with(|input: syn::parse::ParseStream| attrs.parse_pp(input))?;
        }
    }
    Ok(attrs)
}

fn rename(field: &str, rule: &str) -> Option<String> {
    let renamed = match rule {
        "snake_case" => field.to_snake_case(),
        "camelCase" => field.to_lower_camel_case(),
        "PascalCase" => field.to_upper_camel_case(),
        "SCREAMING_SNAKE_CASE" => field.to_shouty_snake_case(),
        "kebab-case" => field.to_kebab_case(),
        "lowercase" => field.to_lowercase(),
        "UPPERCASE" => field.to_uppercase(),
        _ => return None,
    };
    Some(renamed)
}

/// `true` for synchronization primitives, cells and markers.
fn is_auto_skipped(ty: &syn::Type) -> bool {
    let syn::Type::Path(type_path) = ty else {
        return false;
    };
    let Some(seg) = type_path.path.segments.last() else {
        return false;
    };
    let ident = seg.ident.to_string();
    ident.starts_with("Atomic") || AUTO_SKIPPED.contains(&ident.as_str())
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let struct_attrs = get_struct_attrs(&input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut describe = Vec::new();
    let mut values = Vec::new();

    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = get_field_attrs(field)?;
        if attrs.skip || is_auto_skipped(&field.ty) {
            continue;
        }

        let ty = &field.ty;
        if attrs.flatten {
            describe.push(quote! {
                fields.flatten::<#ty>();
            });
            values.push(quote! {
                row.flatten(&self.#field_ident);
            });
            continue;
        }

        let field_name = field_ident.to_string();
        let column = match (&attrs.column, &struct_attrs.rename_all) {
            (Some(column), _) => Some(column.clone()),
            (None, Some(rule)) => Some(rename(&field_name, rule).ok_or_else(|| {
                syn::Error::new_spanned(
                    &input.ident,
                    format!("unsupported rename_all rule `{rule}`"),
                )
            })?),
            (None, None) => None,
        };
        let column = match column {
            Some(column) => quote! { ::core::option::Option::Some(#column) },
            None => quote! { ::core::option::Option::None },
        };

        let mut flags = quote! { ::pp::reflect::FieldFlags::new() };
        if attrs.skip_insert {
            flags = quote! { #flags.skip_insert() };
        }
        if attrs.skip_update {
            flags = quote! { #flags.skip_update() };
        }
        if attrs.default_if_empty {
            flags = quote! { #flags.default_if_empty() };
        }

        describe.push(quote! {
            fields.field(#field_name, #column, #flags);
        });
        values.push(quote! {
            row.value(&self.#field_ident);
        });
    }

    Ok(quote! {
        impl #impl_generics ::pp::DbStruct for #name #ty_generics #where_clause {
            fn describe(fields: &mut ::pp::reflect::FieldSet) {
                #(#describe)*
            }

            fn values(&self, row: &mut ::pp::reflect::RowWriter) {
                #(#values)*
            }
        }

        impl #impl_generics ::pp::IntoRows for #name #ty_generics #where_clause {
            fn into_rows(self) -> ::std::vec::Vec<::pp::reflect::RowInput> {
                ::std::vec![::pp::reflect::RowInput::for_insert(&self)]
            }
        }

        impl #impl_generics ::pp::IntoRows for &#name #ty_generics #where_clause {
            fn into_rows(self) -> ::std::vec::Vec<::pp::reflect::RowInput> {
                ::std::vec![::pp::reflect::RowInput::for_insert(self)]
            }
        }

        impl #impl_generics ::pp::IntoUpdate for #name #ty_generics #where_clause {
            fn into_update(self) -> ::pp::reflect::UpdateSource {
                ::pp::reflect::UpdateSource::Row(::pp::reflect::RowInput::for_update(&self))
            }
        }

        impl #impl_generics ::pp::IntoUpdate for &#name #ty_generics #where_clause {
            fn into_update(self) -> ::pp::reflect::UpdateSource {
                ::pp::reflect::UpdateSource::Row(::pp::reflect::RowInput::for_update(self))
            }
        }
    })
}
