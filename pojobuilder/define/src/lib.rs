//! pojobuilder Definition Library
//!
//! This crate provides the descriptor types that describe a target type to
//! the `pojobuilder-gen` code generator. A descriptor captures everything
//! the generator needs to know about a struct: its fields, the
//! constructors and accessors it exposes, how a default instance is
//! obtained, and the options controlling the generated builder.
//!
//! ## Core Types
//!
//! - [`TargetType`] - A complete target type definition
//! - [`FieldDef`] - A named field with its declared type
//! - [`ConstructorDef`] / [`ParamDef`] - Associated functions producing the type
//! - [`GetterDef`] / [`GetterAccess`] - Ways to read a property
//! - [`SetterDef`] / [`SetterAccess`] - Ways to write a property
//! - [`DefaultConstruction`] - How a default instance is obtained
//! - [`BuilderOptions`] - Designated constructor, copy method, builder name
//! - [`TypeRef`] - Canonical fully-qualified type text
//!
//! ## Examples
//!
//! Describe a struct built through a two-argument constructor:
//!
//! ```
//! use pojobuilder_define::prelude::*;
//!
//! let string = TypeRef::new("::std::string::String");
//! let person = TargetType {
//!     name: "Person".to_string(),
//!     module_path: "crate::model".to_string(),
//!     fields: vec![
//!         FieldDef::new("firstname", string.clone()),
//!         FieldDef::new("surname", string.clone()),
//!     ],
//!     constructors: vec![ConstructorDef {
//!         name: "new".to_string(),
//!         params: vec![
//!             ParamDef::new("firstname", string.clone()),
//!             ParamDef::new("surname", string),
//!         ],
//!         fallible: false,
//!     }],
//!     getters: vec![],
//!     setters: vec![],
//!     default_construction: None,
//!     options: BuilderOptions {
//!         constructor: Some("new".to_string()),
//!         ..BuilderOptions::default()
//!     },
//! };
//!
//! assert_eq!(person.builder_name(), "PersonBuilder");
//! ```
//!
//! Descriptors are usually produced by the source scanner in
//! `pojobuilder-gen`, but they are plain serde types and can be written as
//! JSON by any host.

pub mod accessors;
pub mod prelude;
pub mod target;
pub mod types;

// Re-export main types at crate root
pub use accessors::{GetterAccess, GetterDef, SetterAccess, SetterDef};
pub use target::{
    BuilderOptions, ConstructorDef, DefaultConstruction, FieldDef, ParamDef, TargetType,
};
pub use types::TypeRef;
