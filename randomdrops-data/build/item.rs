use std::collections::HashMap;

use heck::ToShoutySnakeCase;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use serde::Deserialize;
use syn::LitInt;

use crate::ident;

#[derive(Deserialize)]
pub struct Item {
    pub id: u16,
}

pub(crate) fn build() -> TokenStream {
    println!("cargo:rerun-if-changed=../assets/items.json");

    let json: HashMap<String, Item> =
        serde_json::from_str(include_str!("../../assets/items.json"))
            .expect("Failed to parse items.json");

    let mut items: Vec<_> = json.iter().collect();
    items.sort_by_key(|(_, item)| item.id);

    let mut consts = TokenStream::new();
    let mut all = TokenStream::new();
    let mut from_id_arms = TokenStream::new();
    let mut from_name_arms = TokenStream::new();

    for (name, item) in items {
        let const_ident = ident(name.to_shouty_snake_case());
        let id_lit = LitInt::new(&item.id.to_string(), Span::call_site());

        consts.extend(quote! {
            pub const #const_ident: Item = Item {
                id: #id_lit,
                registry_key: #name,
            };
        });
        all.extend(quote! { Self::#const_ident, });
        from_id_arms.extend(quote! { #id_lit => Some(Self::#const_ident), });
        from_name_arms.extend(quote! { #name => Some(Self::#const_ident), });
    }

    quote! {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct Item {
            pub id: u16,
            pub registry_key: &'static str,
        }

        impl Item {
            #consts

            /// Every registered item, ordered by raw id.
            pub const ALL: &'static [Item] = &[#all];

            pub const fn from_id(id: u16) -> Option<Self> {
                match id {
                    #from_id_arms
                    _ => None
                }
            }

            pub fn from_registry_key(name: &str) -> Option<Self> {
                match name.strip_prefix("minecraft:").unwrap_or(name) {
                    #from_name_arms
                    _ => None
                }
            }
        }
    }
}
