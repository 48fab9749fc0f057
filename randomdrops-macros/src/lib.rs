use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Nothing, Parser};
use syn::{Field, Fields, ItemStruct, parse_macro_input};

/// Implements `crate::plugin::Event` for a struct, naming the event after the struct.
#[proc_macro_derive(Event)]
pub fn event(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    let name = &input.ident;

    quote! {
        impl crate::plugin::Event for #name {
            fn get_name_static() -> &'static str {
                stringify!(#name)
            }

            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    }
    .into()
}

/// Adds a `cancelled` field to an event struct and implements `crate::plugin::Cancellable`.
#[proc_macro_attribute]
pub fn cancellable(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_struct = parse_macro_input!(input as ItemStruct);
    let name = item_struct.ident.clone();
    let _ = parse_macro_input!(args as Nothing);

    if let Fields::Named(ref mut fields) = item_struct.fields {
        match Field::parse_named.parse2(quote! {
            /// A boolean indicating cancel state of the event.
            pub cancelled: bool
        }) {
            Ok(field) => fields.named.push(field),
            Err(err) => return err.to_compile_error().into(),
        }
    }

    quote! {
        #item_struct

        impl crate::plugin::Cancellable for #name {
            fn cancelled(&self) -> bool {
                self.cancelled
            }

            fn set_cancelled(&mut self, cancelled: bool) {
                self.cancelled = cancelled;
            }
        }
    }
    .into()
}
