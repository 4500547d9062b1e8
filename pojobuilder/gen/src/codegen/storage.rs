//! Builder struct generation.
//!
//! Every property gets two storage fields: a value slot holding the last
//! value passed to its accumulator, and an `is_set` flag. Field names come
//! from [`crate::naming::storage_identifiers`], so two properties with the
//! same name but different types never share a slot.

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use super::builder_ident;
use crate::errors::GeneratorError;
use crate::model::{BuilderModel, PropertyDescriptor};
use crate::naming::{storage_identifiers, to_ident};

/// Storage of one property, ready for code generation.
#[derive(Debug, Clone)]
pub struct StorageField<'a> {
    /// The property this storage belongs to.
    pub property: &'a PropertyDescriptor,
    /// Value slot identifier.
    pub value: Ident,
    /// `is_set` flag identifier.
    pub is_set: Ident,
    /// Parsed property type.
    pub ty: syn::Type,
}

/// Computes the storage fields of a model, in property order.
///
/// ## Errors
///
/// Returns [`GeneratorError::CodeGenError`] if a property type does not
/// parse.
pub fn storage_fields(model: &BuilderModel) -> Result<Vec<StorageField<'_>>, GeneratorError> {
    model
        .properties
        .iter()
        .map(|property| {
            let ids = storage_identifiers(&property.name, &property.declared_type);
            let ty = syn::parse_str::<syn::Type>(property.declared_type.as_str()).map_err(|e| {
                GeneratorError::CodeGenError(format!(
                    "{}.{}: invalid type '{}': {}",
                    model.target_name, property.name, property.declared_type, e
                ))
            })?;
            Ok(StorageField {
                property,
                value: to_ident(&ids.value),
                is_set: to_ident(&ids.is_set),
                ty,
            })
        })
        .collect()
}

/// Generates the builder struct declaration.
///
/// ## Generated Code
///
/// ```ignore
/// #[allow(non_snake_case)]
/// pub struct AddressBuilder {
///     value__street__std__string__String: ::std::string::String,
///     is_set__street__std__string__String: bool,
/// }
/// ```
pub fn generate_builder_struct(model: &BuilderModel, fields: &[StorageField<'_>]) -> TokenStream {
    let builder = builder_ident(model);
    let doc = format!(" Fluent builder for [`{}`] values.", model.target_name);

    let declarations = fields.iter().map(|field| {
        let value = &field.value;
        let is_set = &field.is_set;
        let ty = &field.ty;
        let value_doc = format!(" Value of the `{}` property.", field.property.name);
        let is_set_doc = format!(" Whether `{}` was set.", field.property.name);
        quote! {
            #[doc = #value_doc]
            #value: #ty,
            #[doc = #is_set_doc]
            #is_set: bool,
        }
    });

    quote! {
        #[doc = #doc]
        ///
        /// Each `with_*` call stores a value and marks it as set. [`Self::build`]
        /// creates a new instance from the stored values and can be called any
        /// number of times, so a builder also works as a template.
        #[allow(non_snake_case)]
        pub struct #builder {
            #(#declarations)*
        }
    }
}

/// Generates `new()`, which starts every slot at `Default::default()` and
/// every flag at `false`.
pub fn generate_new_method(model: &BuilderModel) -> TokenStream {
    let doc = format!(
        " Creates a new [`{}`] with every property unset.",
        model.builder_name
    );
    let initializers = model.properties.iter().map(|property| {
        let ids = storage_identifiers(&property.name, &property.declared_type);
        let value = to_ident(&ids.value);
        let is_set = to_ident(&ids.is_set);
        quote! {
            #value: ::std::default::Default::default(),
            #is_set: false,
        }
    });

    quote! {
        #[doc = #doc]
        pub fn new() -> Self {
            Self {
                #(#initializers)*
            }
        }
    }
}

/// Generates the `Default` impl delegating to `new()`.
pub fn generate_default_impl(model: &BuilderModel) -> TokenStream {
    let builder = builder_ident(model);
    quote! {
        impl ::std::default::Default for #builder {
            /// Same as `new()`.
            fn default() -> Self {
                Self::new()
            }
        }
    }
}
