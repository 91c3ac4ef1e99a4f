use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

pub fn derive_searchable(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    name,
                    "Searchable derive only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Searchable derive only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let searchable: Vec<_> = fields
        .iter()
        .filter(|field| field.attrs.iter().any(|attr| attr.path().is_ident("search")))
        .filter_map(|field| field.ident.clone())
        .collect();

    let names: Vec<String> = searchable.iter().map(|ident| ident.to_string()).collect();

    let expanded = quote! {
        impl noc_toolkit::Searchable for #name {
            const FIELDS: &'static [&'static str] = &[#(#names),*];

            fn field(&self, name: &str) -> Option<&str> {
                match name {
                    #(#names => Some(::core::convert::AsRef::<str>::as_ref(&self.#searchable)),)*
                    _ => None,
                }
            }
        }
    };

    TokenStream::from(expanded)
}
