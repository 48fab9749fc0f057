use std::collections::HashMap;

use heck::{ToPascalCase, ToShoutySnakeCase};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use serde::Deserialize;
use syn::LitInt;

use crate::ident;

#[derive(Deserialize)]
pub struct EntityType {
    pub id: u16,
    pub category: String,
    pub summonable: bool,
}

pub(crate) fn build() -> TokenStream {
    println!("cargo:rerun-if-changed=../assets/entities.json");

    let json: HashMap<String, EntityType> =
        serde_json::from_str(include_str!("../../assets/entities.json"))
            .expect("Failed to parse entities.json");

    let mut entities: Vec<_> = json.iter().collect();
    entities.sort_by_key(|(_, entity)| entity.id);

    let mut consts = TokenStream::new();
    let mut all = TokenStream::new();
    let mut from_id_arms = TokenStream::new();
    let mut from_name_arms = TokenStream::new();

    for (name, entity) in entities {
        let const_ident = ident(name.to_shouty_snake_case());
        let id_lit = LitInt::new(&entity.id.to_string(), Span::call_site());
        let category = ident(entity.category.to_pascal_case());
        let summonable = entity.summonable;

        consts.extend(quote! {
            pub const #const_ident: EntityType = EntityType {
                id: #id_lit,
                resource_name: #name,
                category: MobCategory::#category,
                summonable: #summonable,
            };
        });
        all.extend(quote! { Self::#const_ident, });
        from_id_arms.extend(quote! { #id_lit => Some(Self::#const_ident), });
        from_name_arms.extend(quote! { #name => Some(Self::#const_ident), });
    }

    quote! {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct EntityType {
            pub id: u16,
            pub resource_name: &'static str,
            pub category: MobCategory,
            pub summonable: bool,
        }

        impl EntityType {
            #consts

            /// Every registered entity type, ordered by raw id.
            pub const ALL: &'static [EntityType] = &[#all];

            pub const fn from_raw(id: u16) -> Option<Self> {
                match id {
                    #from_id_arms
                    _ => None
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name.strip_prefix("minecraft:").unwrap_or(name) {
                    #from_name_arms
                    _ => None
                }
            }
        }
    }
}
