//! Code generation modules for pojobuilder.
//!
//! This module contains generators that produce Rust source code from
//! [`BuilderModel`]s. Each submodule handles one part of the generated
//! builder.
//!
//! ## Submodules
//!
//! - [`storage`] - The builder struct, `new()` and the `Default` impl
//! - [`accumulators`] - One `with_*` method per property
//! - [`clone`] - The shallow `but()` clone and the `Clone` impl
//! - [`copy`] - The optional `copy()` method
//! - [`build_method`] - The terminal `build()` method
//! - [`failure`] - The shared `ConstructionFailure` runtime error
//! - [`unit_docs`] - Documentation of a generated builder unit
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod accumulators;
pub mod build_method;
pub mod clone;
pub mod copy;
pub mod failure;
pub mod storage;
pub mod unit_docs;

pub use accumulators::generate_accumulators;
pub use build_method::generate_build_method;
pub use clone::{generate_but_method, generate_clone_impl};
pub use copy::generate_copy_method;
pub use failure::generate_failure_type;
pub use storage::{
    StorageField, generate_builder_struct, generate_default_impl, generate_new_method,
    storage_fields,
};
pub use unit_docs::UnitDocBuilder;

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::errors::GeneratorError;
use crate::model::BuilderModel;
use crate::naming::to_ident;

/// Generates the builder struct and all of its impls for one model.
///
/// ## Errors
///
/// Returns [`GeneratorError::CodeGenError`] if a property type cannot be
/// parsed. Validated models never trigger this.
pub fn generate_builder(model: &BuilderModel) -> Result<TokenStream, GeneratorError> {
    let fields = storage_fields(model)?;
    let builder = builder_ident(model);

    let builder_struct = generate_builder_struct(model, &fields);
    let new_method = generate_new_method(model);
    let accumulators = generate_accumulators(&fields);
    let but_method = generate_but_method(&fields);
    let copy_method = generate_copy_method(model, &fields);
    let build_method = generate_build_method(model, &fields);
    let clone_impl = generate_clone_impl(model);
    let default_impl = generate_default_impl(model);

    Ok(quote! {
        #builder_struct

        impl #builder {
            #new_method

            #accumulators

            #but_method

            #copy_method

            #build_method
        }

        #clone_impl

        #default_impl
    })
}

/// Identifier of the generated builder type.
pub(crate) fn builder_ident(model: &BuilderModel) -> Ident {
    to_ident(&model.builder_name)
}

/// Identifier the target type is referred to by inside a builder unit.
pub(crate) fn target_ident(model: &BuilderModel) -> Ident {
    to_ident(&model.target_name)
}

/// Validates that generated code is syntactically correct Rust.
///
/// ## Errors
///
/// Returns an error string if the code fails to parse.
pub fn validate_generated_code(tokens: &TokenStream) -> Result<(), String> {
    syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(())
}

/// Formats generated code using prettyplease.
///
/// ## Errors
///
/// Returns an error string if the code fails to parse.
pub fn format_generated_code(tokens: &TokenStream) -> Result<String, String> {
    let file = syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(prettyplease::unparse(&file))
}
