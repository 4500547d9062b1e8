//! Copy method generation.
//!
//! `copy(pojo)` seeds a builder from an existing instance by calling every
//! accumulator with the value read through the property's getter. Borrowed
//! getter results are turned into owned values with `ToOwned`, public
//! fields are cloned.

use pojobuilder_define::GetterAccess;
use proc_macro2::TokenStream;
use quote::quote;

use super::{StorageField, target_ident};
use crate::model::BuilderModel;
use crate::naming::{accumulator_name, to_ident};

/// Generates the `copy()` method, or nothing when copy support is off.
///
/// ## Generated Code
///
/// ```ignore
/// pub fn copy(self, pojo: &Address) -> Self {
///     self.with_street(::std::borrow::ToOwned::to_owned(pojo.street()))
///         .with_city(::std::clone::Clone::clone(&pojo.city))
/// }
/// ```
pub fn generate_copy_method(model: &BuilderModel, fields: &[StorageField<'_>]) -> TokenStream {
    if !model.has_copy_support() {
        return TokenStream::new();
    }

    let target = target_ident(model);
    let pojo = if fields.is_empty() {
        quote!(_pojo)
    } else {
        quote!(pojo)
    };

    // Every property has a getter once the model passed validation
    let calls = fields.iter().filter_map(|field| {
        let read = match field.property.getter.as_ref()? {
            GetterAccess::Field => {
                let name = to_ident(&field.property.name);
                quote!(::std::clone::Clone::clone(&pojo.#name))
            }
            GetterAccess::Method { name } => {
                let name = to_ident(name);
                quote!(pojo.#name())
            }
            GetterAccess::BorrowingMethod { name } => {
                let name = to_ident(name);
                quote!(::std::borrow::ToOwned::to_owned(pojo.#name()))
            }
        };
        let method = to_ident(&accumulator_name(&field.property.name));
        Some(quote!(.#method(#read)))
    });

    let doc = format!(
        " Copies every property of the given [`{}`] into this builder.",
        model.target_name
    );

    quote! {
        #[doc = #doc]
        ///
        /// All properties are marked as set, so `build()` reproduces `pojo`
        /// unless values are overridden afterwards.
        pub fn copy(self, #pojo: &#target) -> Self {
            self #(#calls)*
        }
    }
}
