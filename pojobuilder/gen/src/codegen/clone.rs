//! Builder clone generation.
//!
//! `but()` duplicates every value slot with `Clone::clone` and copies every
//! flag. The duplication is shallow: an `Rc` or `Arc` held in a slot still
//! points at the same allocation afterwards.

use proc_macro2::TokenStream;
use quote::quote;

use super::{StorageField, builder_ident};
use crate::model::BuilderModel;

/// Generates the `but()` method.
pub fn generate_but_method(fields: &[StorageField<'_>]) -> TokenStream {
    let copies = fields.iter().map(|field| {
        let value = &field.value;
        let is_set = &field.is_set;
        quote! {
            #value: ::std::clone::Clone::clone(&self.#value),
            #is_set: self.#is_set,
        }
    });

    quote! {
        /// Returns a new builder holding the same values and flags.
        ///
        /// Use it to derive variations from a template builder; changing the
        /// returned builder leaves this one untouched.
        pub fn but(&self) -> Self {
            Self {
                #(#copies)*
            }
        }
    }
}

/// Generates the `Clone` impl delegating to `but()`.
pub fn generate_clone_impl(model: &BuilderModel) -> TokenStream {
    let builder = builder_ident(model);
    quote! {
        impl ::std::clone::Clone for #builder {
            /// Same as `but()`.
            fn clone(&self) -> Self {
                self.but()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{format_generated_code, storage_fields, validate_generated_code};
    use crate::test_utils::{make_address, model_for};

    #[test]
    fn but_clones_slots_and_copies_flags() {
        let model = model_for(&make_address());
        let fields = storage_fields(&model).unwrap();
        let but = generate_but_method(&fields);
        let code = format_generated_code(&quote! { impl AddressBuilder { #but } }).unwrap();

        assert!(code.contains("pub fn but(&self) -> Self"));
        let compact: String = code.split_whitespace().collect();
        assert!(compact.contains(
            "value__street__std__string__String:::std::clone::Clone::clone(&self.value__street__std__string__String"
        ));
        assert!(compact.contains("is_set__street__std__string__String:self.is_set__street__std__string__String"));
    }

    #[test]
    fn clone_impl_delegates_to_but() {
        let model = model_for(&make_address());
        let tokens = generate_clone_impl(&model);
        assert!(validate_generated_code(&tokens).is_ok());

        let code = format_generated_code(&tokens).unwrap();
        assert!(code.contains("impl ::std::clone::Clone for AddressBuilder"));
        assert!(code.contains("self.but()"));
    }
}
