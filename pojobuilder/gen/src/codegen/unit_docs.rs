//! Documentation for generated builder units.
//!
//! This module provides the [`UnitDocBuilder`] struct for generating the
//! module-level documentation of a builder unit. The documentation includes
//! an introduction, how `build()` creates the target, the list of
//! generated methods, and a usage example.

use pojobuilder_define::DefaultConstruction;
use proc_macro2::TokenStream;
use quote::quote;

use crate::model::{BuilderModel, ConstructionStrategy};
use crate::naming::accumulator_name;

/// Builds the documentation of one generated builder unit.
///
/// The same text is emitted as inner attributes (`#![doc = ...]`) when the
/// unit is its own file, and as outer attributes (`#[doc = ...]`) on the
/// inline module when all units are bundled into one file.
///
/// ## Examples
///
/// ```ignore
/// use pojobuilder_gen::codegen::UnitDocBuilder;
///
/// let model: BuilderModel = /* ... */;
/// let doc_tokens = UnitDocBuilder::new(&model).inner();
/// ```
pub struct UnitDocBuilder<'a> {
    model: &'a BuilderModel,
}

impl<'a> UnitDocBuilder<'a> {
    /// Creates a new documentation builder for the given model.
    pub fn new(model: &'a BuilderModel) -> Self {
        Self { model }
    }

    /// Documentation as inner attributes, for a unit in its own file.
    pub fn inner(&self) -> TokenStream {
        let lines = self.lines();
        quote! {
            #(#![doc = #lines])*
        }
    }

    /// Documentation as outer attributes, for an inline module.
    pub fn outer(&self) -> TokenStream {
        let lines = self.lines();
        quote! {
            #(#[doc = #lines])*
        }
    }

    /// All documentation lines, sections separated by empty lines.
    pub fn lines(&self) -> Vec<String> {
        let sections = [
            self.intro_paragraph(),
            self.construction_section(),
            self.methods_section(),
            self.example_section(),
        ];

        let mut lines = Vec::new();
        for (i, section) in sections.into_iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            lines.extend(section);
        }
        lines
    }

    fn intro_paragraph(&self) -> Vec<String> {
        vec![format!(
            " Generated builder for [`{}`](`{}`).",
            self.model.target_name, self.model.target_type
        )]
    }

    /// Explains how `build()` obtains the instance.
    fn construction_section(&self) -> Vec<String> {
        let mut lines = vec![" ## Construction".to_string(), String::new()];
        match &self.model.strategy {
            ConstructionStrategy::ConstructorArgs { constructor, .. } => {
                lines.push(format!(
                    " `build()` calls `{}::{}` with every property, set or not.",
                    self.model.target_name, constructor.name
                ));
            }
            ConstructionStrategy::DefaultThenSetters { default, .. } => {
                let start = match default {
                    DefaultConstruction::DefaultTrait => "`Default::default()`".to_string(),
                    DefaultConstruction::NoArgConstructor { name, .. } => {
                        format!("`{}::{}()`", self.model.target_name, name)
                    }
                };
                lines.push(format!(
                    " `build()` starts from {} and applies the properties that were set.",
                    start
                ));
            }
        }
        lines
    }

    /// Lists the generated methods.
    fn methods_section(&self) -> Vec<String> {
        let mut lines = vec![" ## Methods".to_string(), String::new()];
        for property in &self.model.properties {
            lines.push(format!(
                " - `{}({})`",
                accumulator_name(&property.name),
                property.declared_type
            ));
        }
        lines.push(" - `but()`".to_string());
        if self.model.has_copy_support() {
            lines.push(format!(" - `copy(&{})`", self.model.target_name));
        }
        lines.push(" - `build()`".to_string());
        lines
    }

    /// Usage example, marked `ignore` because property values are unknown.
    fn example_section(&self) -> Vec<String> {
        let mut lines = vec![
            " ## Example".to_string(),
            String::new(),
            " ```ignore".to_string(),
            format!(" let value = {}::new()", self.model.builder_name),
        ];
        for property in &self.model.properties {
            lines.push(format!(
                "     .{}(/* ... */)",
                accumulator_name(&property.name)
            ));
        }
        lines.push("     .build()?;".to_string());
        lines.push(" ```".to_string());
        lines
    }
}
