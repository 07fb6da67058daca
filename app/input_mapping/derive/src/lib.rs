extern crate proc_macro;

use itertools::multiunzip;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Expr, ExprLit, Fields, Ident, Lit, Type, Variant};

/// Derives `InputMappingT` for an enum of screen inputs.
///
/// Unit variants are bound via `#[key = 'x']` or `#[key = "KeyCode::Up"]`,
/// defaulting to the lowercased first letter of the variant name. An optional
/// `#[description = "..."]` is surfaced in the help overlay. Single-field
/// tuple variants delegate to the inner type's mapping.
#[proc_macro_derive(InputMapping, attributes(key, description))]
pub fn derive_mapping(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let Data::Enum(data) = input.data else {
        panic!("InputMapping may only be derived for enums");
    };

    let name = input.ident;

    let mut bindings = vec![];
    let mut nested = vec![];

    for variant in data.variants {
        match VariantInfo::from_variant(variant) {
            VariantInfo::Binding(binding) => bindings.push(binding),
            VariantInfo::Nested { ident, ty } => nested.push((ident, ty)),
        }
    }

    let (entries, arms): (Vec<TokenStream>, Vec<TokenStream>) = multiunzip(
        bindings
            .iter()
            .map(|binding| (binding.generate_entry(), binding.generate_match_arm())),
    );

    let merges: Vec<TokenStream> = nested
        .iter()
        .map(|(_, ty)| {
            quote! {
                let mapping = mapping
                    .merge(<#ty as ::input_mapping_common::InputMappingT>::get_mapping());
            }
        })
        .collect();

    let delegations: Vec<TokenStream> = nested
        .iter()
        .map(|(ident, ty)| {
            quote! {
                if let Some(inner) =
                    <#ty as ::input_mapping_common::InputMappingT>::map_event(event.clone())
                {
                    return Some(Self::#ident(inner));
                }
            }
        })
        .collect();

    let expanded = quote! {
        const _: () = {
            use ::ratatui::crossterm::event::{Event, KeyCode, KeyEventKind};

            impl ::input_mapping_common::InputMappingT for #name {
                fn get_mapping() -> ::input_mapping_common::InputMapping {
                    let mapping = ::input_mapping_common::InputMapping {
                        mapping: vec![#(#entries),*],
                    };

                    #(#merges)*

                    mapping
                }

                fn map_event(event: Event) -> Option<Self> {
                    let code = match &event {
                        Event::Key(key) if key.kind == KeyEventKind::Press => key.code,
                        _ => return None,
                    };

                    match code {
                        #(#arms)*
                        _ => {}
                    }

                    #(#delegations)*

                    None
                }
            }
        };
    };

    proc_macro::TokenStream::from(expanded)
}

enum VariantInfo {
    Binding(BindingInfo),
    Nested { ident: Ident, ty: Type },
}

struct BindingInfo {
    ident: Ident,
    key: KeySpec,
    description: String,
}

enum KeySpec {
    Char(char),
    /// A path into `KeyCode`, e.g. `KeyCode::Enter`.
    Code(syn::Path),
}

impl VariantInfo {
    fn from_variant(variant: Variant) -> Self {
        let mut key = None;
        let mut description = None;

        for attr in &variant.attrs {
            let syn::Meta::NameValue(name_value) = &attr.meta else {
                continue;
            };

            let Expr::Lit(ExprLit { lit, .. }) = &name_value.value else {
                continue;
            };

            if name_value.path.is_ident("key") {
                key = Some(match lit {
                    Lit::Char(ch) => KeySpec::Char(ch.value()),
                    Lit::Str(path) => KeySpec::Code(
                        syn::parse_str(&path.value()).expect("Expected a path to a `KeyCode`"),
                    ),
                    _ => panic!("`key` should be a char or a string literal"),
                });
            } else if name_value.path.is_ident("description") {
                let Lit::Str(str) = lit else {
                    panic!("`description` should be a string literal");
                };
                description = Some(str.value());
            }
        }

        if key.is_none() {
            if let Fields::Unnamed(fields) = &variant.fields {
                if fields.unnamed.len() == 1 {
                    return Self::Nested {
                        ty: fields.unnamed[0].ty.clone(),
                        ident: variant.ident,
                    };
                }
            }
        }

        let key = key.unwrap_or_else(|| {
            let first_letter = variant
                .ident
                .to_string()
                .chars()
                .next()
                .expect("Expected non-empty variant name")
                .to_ascii_lowercase();

            KeySpec::Char(first_letter)
        });

        Self::Binding(BindingInfo {
            ident: variant.ident,
            key,
            description: description.unwrap_or_default(),
        })
    }
}

impl BindingInfo {
    fn key_tokens(&self) -> TokenStream {
        match &self.key {
            KeySpec::Char(ch) => quote! { KeyCode::Char(#ch) },
            KeySpec::Code(path) => quote! { #path },
        }
    }

    fn generate_entry(&self) -> TokenStream {
        let key = self.key_tokens();
        let description = &self.description;

        quote! {
            ::input_mapping_common::MappingEntry {
                key: #key,
                description: #description.to_string(),
            }
        }
    }

    fn generate_match_arm(&self) -> TokenStream {
        let key = self.key_tokens();
        let ident = &self.ident;

        quote! { #key => return Some(Self::#ident), }
    }
}
