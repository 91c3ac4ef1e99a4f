mod record;
mod searchable;

use proc_macro::TokenStream;

/// Derive macro for implementing the `Record` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(key = "noc-circuits")]
/// struct Circuit {
///     #[record(id)]
///     pub id: String,
///     pub client: String,
/// }
/// ```
///
/// - `#[record(key = "...")]` sets the namespaced storage key.
///   If omitted, defaults to `noc-` + kebab-case struct name + "s".
/// - `#[record(id)]` marks the field used as the unique identifier.
///   If omitted, defaults to a field named `id`. The field must be a `String`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}

/// Derive macro for implementing the `Searchable` trait.
///
/// Every field tagged `#[search]` becomes a named text field the search
/// index can match against. Tagged fields must implement `AsRef<str>`.
///
/// ```ignore
/// #[derive(Searchable)]
/// struct Command {
///     pub id: String,
///     #[search]
///     pub command: String,
///     #[search]
///     pub device: String,
/// }
/// ```
#[proc_macro_derive(Searchable, attributes(search))]
pub fn derive_searchable(input: TokenStream) -> TokenStream {
    searchable::derive_searchable(input)
}
