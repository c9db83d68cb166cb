use proc_macro::TokenStream;

mod from_row;
mod rename;

/// Derive `FromRow` for a struct with named fields.
///
/// Container attribute: `#[row(rename_all = "PascalCase")]`.
/// Field attribute: `#[column(name = "...", order = N, skip)]`.
#[proc_macro_derive(FromRow, attributes(row, column))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    from_row::derive_from_row(input.into()).into()
}
