//! Accumulator method generation.
//!
//! Accumulators take the builder by value and hand it back, so calls chain
//! and the return type is always the builder itself.

use proc_macro2::TokenStream;
use quote::quote;

use super::StorageField;
use crate::naming::{accumulator_name, to_ident};

/// Generates one `with_<property>` method per storage field.
///
/// ## Generated Code
///
/// ```ignore
/// pub fn with_street(mut self, value: ::std::string::String) -> Self {
///     self.value__street__std__string__String = value;
///     self.is_set__street__std__string__String = true;
///     self
/// }
/// ```
pub fn generate_accumulators(fields: &[StorageField<'_>]) -> TokenStream {
    let methods = fields.iter().map(|field| {
        let method = to_ident(&accumulator_name(&field.property.name));
        let value = &field.value;
        let is_set = &field.is_set;
        let ty = &field.ty;
        let doc = format!(" Sets the `{}` property.", field.property.name);

        quote! {
            #[doc = #doc]
            pub fn #method(mut self, value: #ty) -> Self {
                self.#value = value;
                self.#is_set = true;
                self
            }
        }
    });

    quote! {
        #(#methods)*
    }
}
