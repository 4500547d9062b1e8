//! Target type descriptors.
//!
//! A [`TargetType`] describes one struct a builder is generated for: its
//! fields, the constructors and accessors it exposes, and the options that
//! control generation. Descriptors are produced by the source scanner in
//! `pojobuilder-gen`, or deserialized from a JSON descriptor file.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::accessors::{GetterDef, SetterDef};
use crate::types::TypeRef;

/// A complete target type definition.
///
/// ## Examples
///
/// ```
/// use pojobuilder_define::{
///     BuilderOptions, DefaultConstruction, FieldDef, GetterDef, SetterDef, TargetType, TypeRef,
/// };
///
/// let string = TypeRef::new("::std::string::String");
/// let target = TargetType {
///     name: "Address".to_string(),
///     module_path: "crate::model".to_string(),
///     fields: vec![FieldDef::new("street", string.clone())],
///     constructors: vec![],
///     getters: vec![GetterDef::field("street", string.clone())],
///     setters: vec![SetterDef::field("street", string)],
///     default_construction: Some(DefaultConstruction::DefaultTrait),
///     options: BuilderOptions::default(),
/// };
///
/// assert_eq!(target.qualified_name().as_str(), "crate::model::Address");
/// assert_eq!(target.builder_name(), "AddressBuilder");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetType {
    /// Type name, without module path (e.g., "Address").
    pub name: String,
    /// Module the type lives in, as seen from the generated code's crate
    /// (e.g., "crate::model").
    pub module_path: String,
    /// Named fields in declaration order.
    pub fields: Vec<FieldDef>,
    /// Public associated functions returning the type.
    #[serde(default)]
    pub constructors: Vec<ConstructorDef>,
    /// Read accessors, one entry per property that can be read.
    #[serde(default)]
    pub getters: Vec<GetterDef>,
    /// Write accessors, one entry per property that can be written.
    #[serde(default)]
    pub setters: Vec<SetterDef>,
    /// How to obtain a default instance, if the type supports it.
    #[serde(default)]
    pub default_construction: Option<DefaultConstruction>,
    /// Generation options.
    #[serde(default)]
    pub options: BuilderOptions,
}

impl TargetType {
    /// Returns the fully-qualified type reference (`module_path::name`).
    pub fn qualified_name(&self) -> TypeRef {
        if self.module_path.is_empty() {
            TypeRef::new(&self.name)
        } else {
            TypeRef::new(format!("{}::{}", self.module_path, self.name))
        }
    }

    /// Returns the builder type name: the configured override, or the
    /// target name followed by `Builder`.
    pub fn builder_name(&self) -> String {
        self.options
            .builder_name
            .clone()
            .unwrap_or_else(|| format!("{}Builder", self.name))
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a constructor by name.
    pub fn constructor(&self, name: &str) -> Option<&ConstructorDef> {
        self.constructors.iter().find(|c| c.name == name)
    }
}

/// A named field of the target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name (raw identifiers without the `r#` prefix).
    pub name: String,
    /// Declared type.
    pub ty: TypeRef,
}

impl FieldDef {
    /// Creates a field definition.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A public associated function that produces the target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDef {
    /// Function name (e.g., "new").
    pub name: String,
    /// Parameters in declaration order.
    pub params: Vec<ParamDef>,
    /// `true` when the function returns `Result<Self, E>`.
    #[serde(default)]
    pub fallible: bool,
}

/// A constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDef {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub ty: TypeRef,
}

impl ParamDef {
    /// Creates a parameter definition.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// How a default instance of the target type is obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefaultConstruction {
    /// `Default::default()` through a derive or a manual impl.
    #[strum(to_string = "Default::default()")]
    DefaultTrait,
    /// A public associated function without parameters, usually `new`.
    #[strum(to_string = "no-argument constructor")]
    NoArgConstructor {
        /// Function name.
        name: String,
        /// `true` when the function returns `Result<Self, E>`.
        #[serde(default)]
        fallible: bool,
    },
}

/// Options that control what is generated for a target type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderOptions {
    /// Constructor designated for the builder's `build()` method.
    ///
    /// When set, the builder passes every property to this constructor.
    /// When unset, the builder default-constructs the target and applies
    /// setters.
    #[serde(default)]
    pub constructor: Option<String>,
    /// Generate a `copy()` method that seeds the builder from an instance.
    #[serde(default)]
    pub copy_method: bool,
    /// Overrides the builder type name.
    #[serde(default)]
    pub builder_name: Option<String>,
}
