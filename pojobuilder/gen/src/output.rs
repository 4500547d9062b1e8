//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: assembling the
//! generated pieces into complete Rust files, validating the output,
//! formatting it, and writing it to disk atomically.
//!
//! ## Output Structure
//!
//! The `modules` layout produces one file per unit:
//! ```text
//! src/builders/
//! ├── mod.rs              # Module declarations and re-exports
//! ├── shared.rs           # ConstructionFailure
//! ├── address_builder.rs  # One file per builder
//! └── person_builder.rs
//! ```
//!
//! The `bundle` layout produces a single `builders.rs` holding the same
//! units as inline modules. It has no inner attributes, so it can be pulled
//! in with `include!(concat!(env!("OUT_DIR"), "/builders.rs"))`.
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::fs;
use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;
use quote::quote;
use tracing::debug;

use crate::codegen::{UnitDocBuilder, generate_builder, generate_failure_type};
use crate::config::Layout;
use crate::errors::GeneratorError;
use crate::model::BuilderModel;
use crate::naming::{builder_module_name, to_ident};

/// File name of the bundle layout.
pub const BUNDLE_FILE: &str = "builders.rs";

/// One formatted output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    /// File name relative to the output directory.
    pub file_name: String,
    /// Formatted source, including the auto-generated notice.
    pub content: String,
}

/// Assembles the shared module (`shared.rs`).
pub fn assemble_shared_module() -> TokenStream {
    let failure_type = generate_failure_type();

    quote! {
        //! Types shared by all generated builders.

        #failure_type
    }
}

/// Imports and items of a builder unit, without documentation.
fn builder_unit_body(model: &BuilderModel) -> Result<TokenStream, GeneratorError> {
    let target_path = if model.target_type.as_str().contains("::") {
        model.target_type.to_string()
    } else {
        format!("crate::{}", model.target_type)
    };
    let target_path: syn::Path = syn::parse_str(&target_path).map_err(|e| {
        GeneratorError::CodeGenError(format!("invalid target path '{}': {}", target_path, e))
    })?;
    let builder = generate_builder(model)?;

    Ok(quote! {
        use super::shared::ConstructionFailure;
        use #target_path;

        #builder
    })
}

/// Assembles one builder unit (e.g., `address_builder.rs`).
///
/// ## Errors
///
/// Returns [`GeneratorError::CodeGenError`] if the target path or a
/// property type cannot be parsed.
pub fn assemble_builder_unit(model: &BuilderModel) -> Result<TokenStream, GeneratorError> {
    let docs = UnitDocBuilder::new(model).inner();
    let body = builder_unit_body(model)?;

    Ok(quote! {
        #docs

        #body
    })
}

/// Module declarations and re-exports shared by `mod.rs` and the bundle.
fn reexports(models: &[BuilderModel]) -> TokenStream {
    let exports = models.iter().map(|model| {
        let module = to_ident(&builder_module_name(&model.builder_name));
        let builder = to_ident(&model.builder_name);
        quote! { pub use #module::#builder; }
    });

    quote! {
        pub use shared::ConstructionFailure;
        #(#exports)*
    }
}

/// Assembles the `mod.rs` of the modules layout.
pub fn assemble_mod_rs(models: &[BuilderModel]) -> TokenStream {
    let module_decls = models.iter().map(|model| {
        let module = to_ident(&builder_module_name(&model.builder_name));
        quote! { pub mod #module; }
    });
    let reexports = reexports(models);

    quote! {
        //! Generated builders.
        //!
        //! Every builder is re-exported here together with
        //! `ConstructionFailure`, the error their `build()` methods return.

        pub mod shared;

        #(#module_decls)*

        #reexports
    }
}

/// Assembles the single file of the bundle layout.
///
/// ## Errors
///
/// Returns [`GeneratorError::CodeGenError`] if any unit fails to assemble.
pub fn assemble_bundle(models: &[BuilderModel]) -> Result<TokenStream, GeneratorError> {
    let failure_type = generate_failure_type();

    let mut modules = Vec::with_capacity(models.len());
    for model in models {
        let module = to_ident(&builder_module_name(&model.builder_name));
        let docs = UnitDocBuilder::new(model).outer();
        let body = builder_unit_body(model)?;
        modules.push(quote! {
            #docs
            pub mod #module {
                #body
            }
        });
    }
    let reexports = reexports(models);

    Ok(quote! {
        /// Types shared by all generated builders.
        pub mod shared {
            #failure_type
        }

        #(#modules)*

        #reexports
    })
}

/// Validates that generated code is syntactically correct Rust.
///
/// Parses the token stream as a complete Rust file using `syn`.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease.
///
/// Converts a parsed syn::File back to a nicely formatted string,
/// prepending an auto-generated notice as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!(
        "// This code was automatically generated by pojobuilder-gen. Do not edit manually.\n\n{}",
        formatted
    )
}

fn render(file_name: impl Into<String>, tokens: &TokenStream) -> Result<RenderedUnit, GeneratorError> {
    let file = validate_code(tokens)?;
    Ok(RenderedUnit {
        file_name: file_name.into(),
        content: format_code(&file),
    })
}

/// Renders every output file for the given models, in a deterministic
/// order.
///
/// ## Errors
///
/// Returns [`GeneratorError::CodeGenError`] if any unit is invalid Rust.
pub fn render_units(
    models: &[BuilderModel],
    layout: Layout,
) -> Result<Vec<RenderedUnit>, GeneratorError> {
    match layout {
        Layout::Bundle => Ok(vec![render(BUNDLE_FILE, &assemble_bundle(models)?)?]),
        Layout::Modules => {
            let mut units = vec![
                render("mod.rs", &assemble_mod_rs(models))?,
                render("shared.rs", &assemble_shared_module())?,
            ];
            for model in models {
                let file_name = format!("{}.rs", builder_module_name(&model.builder_name));
                units.push(render(file_name, &assemble_builder_unit(model)?)?);
            }
            Ok(units)
        }
    }
}

/// Writes rendered units into `output_dir`, returning the written paths.
///
/// ## Errors
///
/// Returns [`GeneratorError::WriteError`] if any file cannot be written.
pub fn write_units(units: &[RenderedUnit], output_dir: &Path) -> Result<Vec<PathBuf>, GeneratorError> {
    units
        .iter()
        .map(|unit| {
            let path = output_dir.join(&unit.file_name);
            write_atomic(&path, &unit.content)?;
            debug!(path = %path.display(), bytes = unit.content.len(), "wrote unit");
            Ok(path)
        })
        .collect()
}

/// Writes content to a file atomically using temp file + rename.
///
/// This pattern ensures that:
/// - The file is never left in a partially-written state
/// - Other processes see either the old or new content, never a mix
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if parent directories cannot be
/// created, the temp file cannot be written, or the rename fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_address, make_person, model_for};
    use tempfile::TempDir;

    fn models() -> Vec<BuilderModel> {
        let mut address = make_address();
        address.options.copy_method = true;
        vec![model_for(&address), model_for(&make_person())]
    }

    // === assembly tests ===

    #[test]
    fn builder_unit_is_valid_and_documented() {
        let model = model_for(&make_address());
        let tokens = assemble_builder_unit(&model).unwrap();
        let code = format_code(&validate_code(&tokens).unwrap());

        assert!(code.starts_with("// This code was automatically generated"));
        assert!(code.contains("//! Generated builder for"));
        assert!(code.contains("use super::shared::ConstructionFailure;"));
        assert!(code.contains("use crate::model::Address;"));
        assert!(code.contains("pub struct AddressBuilder"));
    }

    #[test]
    fn target_without_module_is_imported_from_crate_root() {
        let mut model = model_for(&make_address());
        model.target_type = pojobuilder_define::TypeRef::new("Address");
        let tokens = assemble_builder_unit(&model).unwrap();
        let code = format_code(&validate_code(&tokens).unwrap());

        assert!(code.contains("use crate::Address;"));
    }

    #[test]
    fn mod_rs_declares_and_reexports_every_builder() {
        let code = format_code(&validate_code(&assemble_mod_rs(&models())).unwrap());

        assert!(code.contains("pub mod shared;"));
        assert!(code.contains("pub mod address_builder;"));
        assert!(code.contains("pub mod person_builder;"));
        assert!(code.contains("pub use shared::ConstructionFailure;"));
        assert!(code.contains("pub use address_builder::AddressBuilder;"));
        assert!(code.contains("pub use person_builder::PersonBuilder;"));
    }

    #[test]
    fn shared_module_holds_the_failure_type() {
        let code = format_code(&validate_code(&assemble_shared_module()).unwrap());
        assert!(code.contains("pub struct ConstructionFailure"));
    }

    #[test]
    fn bundle_has_no_inner_attributes() {
        let tokens = assemble_bundle(&models()).unwrap();
        let file = validate_code(&tokens).unwrap();
        assert!(file.attrs.is_empty());

        let code = format_code(&file);
        assert!(!code.contains("//!"));
        assert!(!code.contains("#!["));
        assert!(code.contains("pub mod shared {"));
        assert!(code.contains("pub mod address_builder {"));
        assert!(code.contains("/// Generated builder for"));
        assert!(code.contains("pub use person_builder::PersonBuilder;"));
    }

    #[test]
    fn validate_code_rejects_invalid_code() {
        let invalid = quote! { pub struct { };  };
        let err = validate_code(&invalid).unwrap_err();
        assert!(matches!(err, GeneratorError::CodeGenError(_)));
    }

    // === render tests ===

    #[test]
    fn modules_layout_renders_every_unit_in_order() {
        let units = render_units(&models(), Layout::Modules).unwrap();
        let names: Vec<_> = units.iter().map(|u| u.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["mod.rs", "shared.rs", "address_builder.rs", "person_builder.rs"]
        );
    }

    #[test]
    fn bundle_layout_renders_one_file() {
        let units = render_units(&models(), Layout::Bundle).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].file_name, BUNDLE_FILE);
    }

    #[test]
    fn rendering_is_byte_identical_across_runs() {
        let first = render_units(&models(), Layout::Modules).unwrap();
        let second = render_units(&models(), Layout::Modules).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_model_list_still_renders_shared_types() {
        let units = render_units(&[], Layout::Bundle).unwrap();
        assert!(units[0].content.contains("pub struct ConstructionFailure"));
    }

    // === write tests ===

    #[test]
    fn write_atomic_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.rs");

        write_atomic(&file_path, "// Test content").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "// Test content");
    }

    #[test]
    fn write_atomic_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested/deep/test.rs");

        write_atomic(&file_path, "// Nested content").unwrap();
        assert!(file_path.exists());
    }

    #[test]
    fn write_atomic_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("existing.rs");
        fs::write(&file_path, "// Old content").unwrap();

        write_atomic(&file_path, "// New content").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "// New content");
    }

    #[test]
    fn write_atomic_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("clean.rs");

        write_atomic(&file_path, "// Content").unwrap();
        assert!(!file_path.with_extension("tmp").exists());
    }

    #[test]
    fn write_units_returns_written_paths() {
        let temp_dir = TempDir::new().unwrap();
        let units = render_units(&models(), Layout::Modules).unwrap();

        let paths = write_units(&units, temp_dir.path()).unwrap();
        assert_eq!(paths.len(), 4);
        let written = fs::read_to_string(temp_dir.path().join("address_builder.rs")).unwrap();
        assert_eq!(written, units[2].content);
    }
}
