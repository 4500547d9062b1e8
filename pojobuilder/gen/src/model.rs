//! Builder model types.
//!
//! A [`BuilderModel`] is derived once per target type and is the sole input
//! to code generation. It is immutable after derivation.

use pojobuilder_define::{DefaultConstruction, GetterAccess, SetterAccess, TypeRef};
use strum::Display;

/// One property of the target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Property name (matches the field name).
    pub name: String,
    /// Fully-qualified declared type.
    pub declared_type: TypeRef,
    /// Position in the model's property order.
    pub ordinal: usize,
    /// How the property is read from an instance, if it can be.
    pub getter: Option<GetterAccess>,
    /// How the property is written on an instance, if it can be.
    pub setter: Option<SetterAccess>,
}

/// A call to an associated function of the target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Function name.
    pub name: String,
    /// `true` when the function returns `Result<Self, E>`.
    pub fallible: bool,
}

/// How `build()` materializes the target type.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConstructionStrategy {
    /// Pass every property to the designated constructor, in parameter
    /// order, whether or not it was set.
    ConstructorArgs {
        constructor: Invocation,
        /// Property names in constructor-parameter order.
        parameters: Vec<String>,
    },
    /// Default-construct the target, then apply the setter of every
    /// property that was set.
    DefaultThenSetters {
        default: DefaultConstruction,
        /// Property names in declared order.
        properties: Vec<String>,
    },
}

/// Everything the synthesizer needs to emit one builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderModel {
    /// Fully-qualified target type.
    pub target_type: TypeRef,
    /// Target type name without module path.
    pub target_name: String,
    /// Name of the generated builder type.
    pub builder_name: String,
    /// Properties in model order.
    pub properties: Vec<PropertyDescriptor>,
    /// Construction strategy bound to the target.
    pub strategy: ConstructionStrategy,
    /// Type `copy()` reads from; `None` when copy support is disabled.
    pub copy_source: Option<TypeRef>,
}

impl BuilderModel {
    /// Returns `true` when a `copy()` method is generated.
    pub fn has_copy_support(&self) -> bool {
        self.copy_source.is_some()
    }
}
