//! Error types for the pojobuilder generator.
//!
//! Two layers of errors exist:
//!
//! - [`ModelError`] - a target type cannot be turned into a builder model.
//!   These are diagnostics: they block generation for that one target and
//!   are reported, while other targets keep generating.
//! - [`GeneratorError`] - the run itself failed (bad configuration,
//!   unreadable source, invalid generated code, failed write).

use thiserror::Error;

/// Errors that can occur during a generation run.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to read or parse the configuration file
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to read an input file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a Rust source file
    #[error("Failed to parse '{path}': {source}")]
    ParseError {
        path: String,
        #[source]
        source: syn::Error,
    },

    /// Failed to parse a descriptor file
    #[error("Failed to parse descriptor file '{path}': {source}")]
    DescriptorError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The source file does not describe the target in a supported way
    #[error("Cannot scan target '{target}': {reason}")]
    ScanError { target: String, reason: String },

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// One or more targets were rejected (used by build scripts, which
    /// cannot continue with a partial set of builders)
    #[error("{} target(s) rejected:\n{}", .0.len(), format_diagnostics(.0))]
    Rejected(Vec<ModelError>),
}

fn format_diagnostics(errors: &[ModelError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Why a designated constructor does not line up with the target's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
    /// A parameter has no field with the same name.
    UnmatchedParameter,
    /// A parameter matches a field by name but not by type.
    TypeMismatch { parameter: String, field: String },
    /// A field is not covered by any parameter.
    UncoveredProperty,
}

impl std::fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MismatchKind::UnmatchedParameter => write!(f, "parameter has no matching property"),
            MismatchKind::TypeMismatch { parameter, field } => write!(
                f,
                "parameter type '{}' does not match property type '{}'",
                parameter, field
            ),
            MismatchKind::UncoveredProperty => {
                write!(f, "property is not covered by the constructor")
            }
        }
    }
}

/// Reasons a target type cannot be turned into a builder model.
///
/// Every variant names the target type, and where applicable the property
/// or constructor parameter at fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Neither a designated constructor nor any property with both a getter
    /// and a setter exists.
    #[error(
        "{target}: no usable construction path (designate a constructor or expose getter/setter pairs)"
    )]
    NoUsableConstructionPath { target: String },

    /// The designated constructor does not exist on the target.
    #[error("{target}: designated constructor '{constructor}' not found")]
    UnknownConstructor { target: String, constructor: String },

    /// The designated constructor's parameters do not biject onto the
    /// target's properties.
    #[error("{target}: constructor '{constructor}' does not match '{name}': {kind}")]
    ConstructorPropertyMismatch {
        target: String,
        constructor: String,
        /// Parameter or property at fault.
        name: String,
        kind: MismatchKind,
    },

    /// The setter strategy was selected but no default instance can be
    /// created.
    #[error("{target}: setter-based construction requires Default or a no-argument `new`")]
    NoDefaultConstructor { target: String },

    /// A property or field name appears more than once.
    #[error("{target}: duplicate property '{property}'")]
    DuplicatePropertyName { target: String, property: String },

    /// Two targets would produce builders with the same type or module name.
    #[error("{target}: builder '{builder}' collides with the builder of '{other}'")]
    DuplicateBuilderName {
        target: String,
        builder: String,
        other: String,
    },

    /// Two properties encode to the same storage identifier.
    #[error("{target}: properties '{first}' and '{second}' share storage identifier '{identifier}'")]
    StorageIdentifierCollision {
        target: String,
        first: String,
        second: String,
        identifier: String,
    },

    /// A type, builder or property name is not a usable identifier.
    #[error("{target}: '{name}' is not a valid identifier")]
    InvalidIdentifier { target: String, name: String },

    /// A property type does not parse as a Rust type.
    #[error("{target}: property '{property}' has unparseable type '{ty}'")]
    InvalidPropertyType {
        target: String,
        property: String,
        ty: String,
    },

    /// Copy support requested but a property cannot be read.
    #[error("{target}: copy method requested but property '{property}' has no getter")]
    MissingCopyAccessor { target: String, property: String },
}

impl ModelError {
    /// Returns the name of the target type the error belongs to.
    pub fn target(&self) -> &str {
        match self {
            ModelError::NoUsableConstructionPath { target }
            | ModelError::UnknownConstructor { target, .. }
            | ModelError::ConstructorPropertyMismatch { target, .. }
            | ModelError::NoDefaultConstructor { target }
            | ModelError::DuplicatePropertyName { target, .. }
            | ModelError::DuplicateBuilderName { target, .. }
            | ModelError::StorageIdentifierCollision { target, .. }
            | ModelError::InvalidIdentifier { target, .. }
            | ModelError::InvalidPropertyType { target, .. }
            | ModelError::MissingCopyAccessor { target, .. } => target,
        }
    }

    /// Returns the property or constructor parameter at fault, if any.
    pub fn subject(&self) -> Option<&str> {
        match self {
            ModelError::ConstructorPropertyMismatch { name, .. } => Some(name),
            ModelError::DuplicatePropertyName { property, .. }
            | ModelError::InvalidPropertyType { property, .. }
            | ModelError::MissingCopyAccessor { property, .. } => Some(property),
            ModelError::InvalidIdentifier { name, .. } => Some(name),
            ModelError::StorageIdentifierCollision { second, .. } => Some(second),
            ModelError::UnknownConstructor { constructor, .. } => Some(constructor),
            _ => None,
        }
    }
}
