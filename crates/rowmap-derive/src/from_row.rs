use crate::rename::RenameRule;
use darling::{Error as DarlingError, FromDeriveInput, FromField, ast::Data, util::Ignored};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Generics, Ident, Type};

/// Ordinal sentinel, mirrored from `rowmap_core::model::UNSET_ORDER`.
const UNSET_ORDER: i32 = -1;

///
/// RowInput
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(row), supports(struct_named))]
struct RowInput {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, ColumnField>,

    #[darling(default)]
    rename_all: Option<RenameRule>,
}

///
/// ColumnField
///

#[derive(Debug, FromField)]
#[darling(attributes(column))]
struct ColumnField {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    name: Option<String>,

    #[darling(default)]
    order: Option<i32>,

    #[darling(default)]
    skip: bool,
}

impl ColumnField {
    fn column_name(&self, ident: &Ident, rule: Option<RenameRule>) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }

        let field = ident_name(ident);
        rule.map_or_else(|| field.clone(), |rule| rule.apply(&field))
    }

    fn validate(&self) -> Result<(), DarlingError> {
        match self.order {
            Some(order) if order < UNSET_ORDER => Err(DarlingError::custom(format!(
                "column order must be >= {UNSET_ORDER}, got {order}"
            ))
            .with_span(&self.ty)),
            _ => Ok(()),
        }
    }

    fn model_expr(&self, ident: &Ident, rule: Option<RenameRule>) -> TokenStream {
        let ty = &self.ty;
        let field_name = ident_name(ident);
        let column = self.column_name(ident, rule);
        let order = self.order.unwrap_or(UNSET_ORDER);

        quote! {
            ::rowmap::model::FieldModel::<Self>::of::<#ty>(
                #field_name,
                |row: &mut Self, value: ::rowmap::value::Value| {
                    row.#ident = <#ty as ::rowmap::traits::FieldValue>::from_value(value)?;
                    ::core::result::Result::Ok(())
                },
                |row: &mut Self| {
                    row.#ident = <#ty as ::rowmap::traits::FieldValue>::null();
                },
            )
            .with_column(#column)
            .with_order(#order)
        }
    }
}

// derive_from_row
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.write_errors(),
    }
}

fn expand(input: &DeriveInput) -> Result<TokenStream, DarlingError> {
    let row = RowInput::from_derive_input(input)?;

    let Data::Struct(fields) = &row.data else {
        return Err(DarlingError::unsupported_shape("enum").with_span(&row.ident));
    };

    let mut errors = DarlingError::accumulator();
    let mut models = Vec::new();

    for field in fields.iter().filter(|f| !f.skip) {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        if errors.handle(field.validate()).is_some() {
            models.push(field.model_expr(ident, row.rename_all));
        }
    }

    errors.finish()?;

    let ident = &row.ident;
    let target = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = row.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::rowmap::traits::FromRow for #ident #ty_generics #where_clause {
            fn row_model() -> ::rowmap::model::RowModel<Self> {
                ::rowmap::model::RowModel::<Self>::builder(#target)
                    #( .field(#models) )*
                    .build()
            }
        }
    })
}

// Field name as written, without a raw-identifier prefix.
fn ident_name(ident: &Ident) -> String {
    let name = ident.to_string();

    name.strip_prefix("r#").map_or(name.clone(), str::to_string)
}

///
/// TESTS
///
