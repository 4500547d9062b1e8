//! Model validation.
//!
//! Diagnostics run before synthesis. Every check maps a violation to one
//! [`ModelError`] variant; a violation blocks generation for the offending
//! target type only.
//!
//! ## Validation Checks
//!
//! - **Name uniqueness**: fields and properties must not repeat
//! - **Constructor correspondence**: designated constructor parameters must
//!   biject onto the target's fields, by name and type
//! - **Default construction**: the setter strategy needs a default instance
//! - **Syntax**: names must be identifiers and types must parse
//! - **Storage identifiers**: encoded identifiers must not collide
//! - **Copy accessors**: a copy method needs a getter for every property
//! - **Builder names**: builder type and module names must be unique
//!   across all targets of one run

use std::collections::{BTreeMap, HashSet};

use pojobuilder_define::{
    ConstructorDef, DefaultConstruction, GetterAccess, SetterAccess, TargetType,
};

use crate::errors::{MismatchKind, ModelError};
use crate::model::{BuilderModel, ConstructionStrategy, PropertyDescriptor};
use crate::naming::{
    builder_module_name, is_valid_field_name, is_valid_identifier, storage_identifiers,
};

/// Checks that no field name appears twice in the descriptor.
pub fn check_unique_fields(target: &TargetType) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    for field in &target.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(ModelError::DuplicatePropertyName {
                target: target.name.clone(),
                property: field.name.clone(),
            });
        }
    }
    Ok(())
}

/// Checks that no property name appears twice.
pub fn check_unique_properties(
    target_name: &str,
    properties: &[PropertyDescriptor],
) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    for property in properties {
        if !seen.insert(property.name.as_str()) {
            return Err(ModelError::DuplicatePropertyName {
                target: target_name.to_string(),
                property: property.name.clone(),
            });
        }
    }
    Ok(())
}

/// Checks that the designated constructor's parameters biject onto the
/// target's fields.
///
/// Every parameter must name a field of the same type, and every field must
/// be covered by a parameter.
///
/// ## Errors
///
/// Returns [`ModelError::ConstructorPropertyMismatch`] naming the first
/// parameter (or uncovered property) at fault.
pub fn check_constructor_correspondence(
    target: &TargetType,
    constructor: &ConstructorDef,
) -> Result<(), ModelError> {
    let mismatch = |name: &str, kind: MismatchKind| ModelError::ConstructorPropertyMismatch {
        target: target.name.clone(),
        constructor: constructor.name.clone(),
        name: name.to_string(),
        kind,
    };

    for param in &constructor.params {
        let Some(field) = target.field(&param.name) else {
            return Err(mismatch(&param.name, MismatchKind::UnmatchedParameter));
        };
        if field.ty != param.ty {
            return Err(mismatch(
                &param.name,
                MismatchKind::TypeMismatch {
                    parameter: param.ty.to_string(),
                    field: field.ty.to_string(),
                },
            ));
        }
    }

    if let Some(uncovered) = target
        .fields
        .iter()
        .find(|f| !constructor.params.iter().any(|p| p.name == f.name))
    {
        return Err(mismatch(&uncovered.name, MismatchKind::UncoveredProperty));
    }

    Ok(())
}

/// Checks that a default instance of the target can be created.
///
/// ## Errors
///
/// Returns [`ModelError::NoDefaultConstructor`] when the target neither
/// implements `Default` nor exposes a no-argument constructor.
pub fn check_default_constructor(target: &TargetType) -> Result<&DefaultConstruction, ModelError> {
    target
        .default_construction
        .as_ref()
        .ok_or_else(|| ModelError::NoDefaultConstructor {
            target: target.name.clone(),
        })
}

/// Checks that no two properties share a storage identifier.
pub fn check_storage_identifiers(model: &BuilderModel) -> Result<(), ModelError> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for property in &model.properties {
        let ids = storage_identifiers(&property.name, &property.declared_type);
        if !is_valid_identifier(&ids.value) {
            return Err(ModelError::InvalidIdentifier {
                target: model.target_name.clone(),
                name: ids.value,
            });
        }
        if let Some(first) = seen.insert(ids.value.clone(), &property.name) {
            return Err(ModelError::StorageIdentifierCollision {
                target: model.target_name.clone(),
                first: first.to_string(),
                second: property.name.clone(),
                identifier: ids.value,
            });
        }
    }
    Ok(())
}

/// Checks that every property can be read when a copy method is requested.
pub fn check_copy_accessors(model: &BuilderModel) -> Result<(), ModelError> {
    if !model.has_copy_support() {
        return Ok(());
    }
    match model.properties.iter().find(|p| p.getter.is_none()) {
        Some(property) => Err(ModelError::MissingCopyAccessor {
            target: model.target_name.clone(),
            property: property.name.clone(),
        }),
        None => Ok(()),
    }
}

/// Checks that the names and types in the model can be emitted as Rust.
///
/// Every name the synthesizer turns into an identifier passes through here,
/// including accessor and constructor names and the builder module name.
pub fn check_syntax(model: &BuilderModel) -> Result<(), ModelError> {
    let invalid = |name: &str| ModelError::InvalidIdentifier {
        target: model.target_name.clone(),
        name: name.to_string(),
    };
    let check_name = |name: &str| {
        if is_valid_field_name(name) {
            Ok(())
        } else {
            Err(invalid(name))
        }
    };

    for name in [&model.target_name, &model.builder_name] {
        if !is_valid_identifier(name) {
            return Err(invalid(name));
        }
    }
    // `Super` would become `mod super`
    check_name(&builder_module_name(&model.builder_name))?;

    for property in &model.properties {
        check_name(&property.name)?;
        if syn::parse_str::<syn::Type>(property.declared_type.as_str()).is_err() {
            return Err(ModelError::InvalidPropertyType {
                target: model.target_name.clone(),
                property: property.name.clone(),
                ty: property.declared_type.to_string(),
            });
        }
        match &property.getter {
            Some(GetterAccess::Method { name } | GetterAccess::BorrowingMethod { name }) => {
                check_name(name)?
            }
            Some(GetterAccess::Field) | None => {}
        }
        if let Some(SetterAccess::Method { name, .. }) = &property.setter {
            check_name(name)?;
        }
    }

    match &model.strategy {
        ConstructionStrategy::ConstructorArgs { constructor, .. } => check_name(&constructor.name)?,
        ConstructionStrategy::DefaultThenSetters {
            default: DefaultConstruction::NoArgConstructor { name, .. },
            ..
        } => check_name(name)?,
        ConstructionStrategy::DefaultThenSetters { .. } => {}
    }

    if syn::parse_str::<syn::Path>(model.target_type.as_str()).is_err() {
        return Err(invalid(model.target_type.as_str()));
    }
    Ok(())
}

/// Runs the per-model checks that need a complete [`BuilderModel`].
pub fn validate_model(model: &BuilderModel) -> Result<(), ModelError> {
    check_syntax(model)?;
    check_unique_properties(&model.target_name, &model.properties)?;
    check_storage_identifiers(model)?;
    check_copy_accessors(model)?;
    Ok(())
}

/// Finds builders whose type name or module name collides with another
/// builder of the same run.
///
/// Returns one error per colliding model, in input order. Every participant
/// of a collision is reported, so the outcome does not depend on the order
/// in which targets were configured.
pub fn check_builder_names(models: &[BuilderModel]) -> Vec<(usize, ModelError)> {
    let mut errors = Vec::new();

    for (index, model) in models.iter().enumerate() {
        let module = builder_module_name(&model.builder_name);
        let other = models.iter().enumerate().find(|(other_index, other)| {
            *other_index != index
                && (other.builder_name == model.builder_name
                    || builder_module_name(&other.builder_name) == module)
        });

        if let Some((_, other)) = other {
            errors.push((
                index,
                ModelError::DuplicateBuilderName {
                    target: model.target_name.clone(),
                    builder: model.builder_name.clone(),
                    other: other.target_name.clone(),
                },
            ));
        }
    }

    errors
}
