//! Pojobuilder code generator library.
//!
//! This crate generates fluent builders for plain Rust structs. For each
//! configured target type it produces a `<Target>Builder` with:
//!
//! - one `with_*` accumulator per property, chaining by value
//! - `but()`, a shallow clone for deriving variations from a template
//! - an optional `copy(&target)` that seeds the builder from an instance
//! - `build()`, which calls the designated constructor, or default-constructs
//!   the target and applies the setters of the properties that were set
//!
//! Failures of fallible constructors and setters surface as the generated
//! `ConstructionFailure` error.
//!
//! ## Modules
//!
//! - [`config`] - `pojobuilder.toml` loading
//! - [`scan`] - Target type discovery in Rust sources
//! - [`extract`], [`resolve`], [`validation`] - Builder model derivation
//! - [`codegen`] - Code generation for individual builder parts
//! - [`output`] - Final assembly, validation, and file writing
//! - [`generate`] - The pipeline tying the stages together
//! - [`build_script`] - `build.rs` integration
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use pojobuilder_gen::config::GeneratorConfig;
//! use pojobuilder_gen::generate::generate_from_config;
//!
//! let config = GeneratorConfig::load(Path::new("pojobuilder.toml")).unwrap();
//! let report = generate_from_config(&config, true).unwrap();
//! for diagnostic in &report.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```
//!
//! ## Generated Code Structure
//!
//! For a target `Address { street: String }` that derives `Default`:
//!
//! ```text
//! pub struct AddressBuilder {
//!     value__street__std__string__String: ::std::string::String,
//!     is_set__street__std__string__String: bool,
//! }
//!
//! impl AddressBuilder {
//!     pub fn new() -> Self;
//!     pub fn with_street(mut self, value: ::std::string::String) -> Self;
//!     pub fn but(&self) -> Self;
//!     pub fn build(&self) -> Result<Address, ConstructionFailure>;
//! }
//! ```

pub mod build_script;
pub mod codegen;
pub mod config;
pub mod errors;
pub mod extract;
pub mod generate;
pub mod model;
pub mod naming;
pub mod output;
pub mod resolve;
pub mod scan;
pub mod validation;

#[cfg(test)]
mod test_utils;
