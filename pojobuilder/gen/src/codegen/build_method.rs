//! Terminal `build()` method generation.
//!
//! The method body depends on the bound [`ConstructionStrategy`]:
//!
//! - `ConstructorArgs` calls the designated constructor with every slot, set
//!   or not, in parameter order.
//! - `DefaultThenSetters` creates a default instance and applies the setter
//!   of each property whose flag is set, in property order.
//!
//! `Err` values of fallible constructors and setters are wrapped into
//! `ConstructionFailure` (see [`super::failure`]).

use pojobuilder_define::{DefaultConstruction, SetterAccess};
use proc_macro2::TokenStream;
use quote::quote;

use super::{StorageField, target_ident};
use crate::model::{BuilderModel, ConstructionStrategy};
use crate::naming::to_ident;

/// Generates the `build()` method.
///
/// ## Generated Code
///
/// For a setter-based target:
///
/// ```ignore
/// pub fn build(&self) -> ::std::result::Result<Address, ConstructionFailure> {
///     let mut result = <Address as ::std::default::Default>::default();
///     if self.is_set__street__std__string__String {
///         result.set_street(::std::clone::Clone::clone(&self.value__street__std__string__String));
///     }
///     Ok(result)
/// }
/// ```
pub fn generate_build_method(model: &BuilderModel, fields: &[StorageField<'_>]) -> TokenStream {
    let target = target_ident(model);
    let target_name = model.target_name.as_str();
    let wrap = quote! {
        .map_err(|cause| ConstructionFailure::wrap(#target_name, cause))?
    };

    let (body, strategy_doc) = match &model.strategy {
        ConstructionStrategy::ConstructorArgs {
            constructor,
            parameters,
        } => {
            let function = to_ident(&constructor.name);
            let args = parameters
                .iter()
                .filter_map(|name| fields.iter().find(|f| &f.property.name == name))
                .map(|field| {
                    let value = &field.value;
                    quote!(::std::clone::Clone::clone(&self.#value))
                });
            let call = quote!(#target::#function(#(#args),*));
            let call = if constructor.fallible {
                quote!(#call #wrap)
            } else {
                call
            };

            let doc = vec![
                format!(
                    " Every property is passed to `{}::{}`, including properties that",
                    model.target_name, constructor.name
                ),
                " were never set, which pass `Default::default()`.".to_string(),
            ];
            (
                quote! {
                    let result = #call;
                    Ok(result)
                },
                doc,
            )
        }
        ConstructionStrategy::DefaultThenSetters { default, .. } => {
            let init = match default {
                DefaultConstruction::DefaultTrait => {
                    quote!(<#target as ::std::default::Default>::default())
                }
                DefaultConstruction::NoArgConstructor { name, fallible } => {
                    let function = to_ident(name);
                    if *fallible {
                        quote!(#target::#function() #wrap)
                    } else {
                        quote!(#target::#function())
                    }
                }
            };

            let applies = fields.iter().filter_map(|field| {
                let value = &field.value;
                let is_set = &field.is_set;
                let stored = quote!(::std::clone::Clone::clone(&self.#value));
                let apply = match field.property.setter.as_ref()? {
                    SetterAccess::Field => {
                        let name = to_ident(&field.property.name);
                        quote!(result.#name = #stored;)
                    }
                    SetterAccess::Method { name, fallible } => {
                        let setter = to_ident(name);
                        if *fallible {
                            quote!(result.#setter(#stored) #wrap;)
                        } else {
                            quote!(result.#setter(#stored);)
                        }
                    }
                };
                Some(quote! {
                    if self.#is_set {
                        #apply
                    }
                })
            });

            let doc = vec![
                format!(
                    " Starts from a default [`{}`] and applies every property that was",
                    model.target_name
                ),
                " set. Properties never set keep their default value.".to_string(),
            ];
            (
                quote! {
                    let mut result = #init;
                    #(#applies)*
                    Ok(result)
                },
                doc,
            )
        }
    };

    let summary = format!(
        " Creates a new [`{}`] from the values stored in this builder.",
        model.target_name
    );

    quote! {
        #[doc = #summary]
        ///
        #(#[doc = #strategy_doc])*
        ///
        /// # Errors
        ///
        /// Returns [`ConstructionFailure`] when the target type rejects a value.
        /// The original error is available through `source()`.
        pub fn build(&self) -> ::std::result::Result<#target, ConstructionFailure> {
            #body
        }
    }
}
