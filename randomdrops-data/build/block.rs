use std::collections::HashMap;

use heck::ToShoutySnakeCase;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use serde::Deserialize;
use syn::LitInt;

use crate::ident;

#[derive(Deserialize)]
pub struct Block {
    pub id: u16,
    /// Item dropped when the block is broken normally.
    pub item: Option<String>,
}

pub(crate) fn build() -> TokenStream {
    println!("cargo:rerun-if-changed=../assets/blocks.json");

    let json: HashMap<String, Block> =
        serde_json::from_str(include_str!("../../assets/blocks.json"))
            .expect("Failed to parse blocks.json");

    let mut blocks: Vec<_> = json.iter().collect();
    blocks.sort_by_key(|(_, block)| block.id);

    let mut consts = TokenStream::new();
    let mut all = TokenStream::new();
    let mut from_id_arms = TokenStream::new();
    let mut from_name_arms = TokenStream::new();

    for (name, block) in blocks {
        let const_ident = ident(name.to_shouty_snake_case());
        let id_lit = LitInt::new(&block.id.to_string(), Span::call_site());
        let item = match &block.item {
            Some(item) => {
                let item_ident = ident(item.to_shouty_snake_case());
                quote! { Some(Item::#item_ident) }
            }
            None => quote! { None },
        };

        consts.extend(quote! {
            pub const #const_ident: Block = Block {
                id: #id_lit,
                name: #name,
                item: #item,
            };
        });
        all.extend(quote! { Self::#const_ident, });
        from_id_arms.extend(quote! { #id_lit => Some(Self::#const_ident), });
        from_name_arms.extend(quote! { #name => Some(Self::#const_ident), });
    }

    quote! {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct Block {
            pub id: u16,
            pub name: &'static str,
            pub item: Option<Item>,
        }

        impl Block {
            #consts

            /// Every registered block, ordered by raw id.
            pub const ALL: &'static [Block] = &[#all];

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

            pub const fn is_air(&self) -> bool {
                self.id == Self::AIR.id
            }
        }
    }
}
