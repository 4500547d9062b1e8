//! Construction strategy resolution.
//!
//! Binds a target type to exactly one [`ConstructionStrategy`]:
//!
//! - a designated constructor whose parameters match the target's fields
//!   yields [`ConstructionStrategy::ConstructorArgs`], in parameter order;
//! - otherwise the setter-exposed properties yield
//!   [`ConstructionStrategy::DefaultThenSetters`], which also requires a
//!   default instance.
//!
//! The two never mix. A constructor has no notion of an unset argument, so
//! `build()` passes every slot; a setter can be skipped, leaving the
//! target's own default in place.

use pojobuilder_define::TargetType;
use tracing::debug;

use crate::errors::ModelError;
use crate::extract::{ExtractedProperties, PropertySource};
use crate::model::{ConstructionStrategy, Invocation, PropertyDescriptor};
use crate::validation::{check_constructor_correspondence, check_default_constructor};

/// Properties and the strategy bound to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Properties in model order.
    pub properties: Vec<PropertyDescriptor>,
    /// The bound strategy.
    pub strategy: ConstructionStrategy,
}

/// Selects the construction strategy for extracted properties.
///
/// ## Errors
///
/// - [`ModelError::ConstructorPropertyMismatch`] if the designated
///   constructor does not line up with the target's fields.
/// - [`ModelError::NoDefaultConstructor`] if the setter strategy is
///   selected and no default instance can be created.
pub fn resolve_strategy(
    target: &TargetType,
    extracted: ExtractedProperties<'_>,
) -> Result<Resolution, ModelError> {
    let strategy = match extracted.source {
        PropertySource::Constructor(constructor) => {
            check_constructor_correspondence(target, constructor)?;
            ConstructionStrategy::ConstructorArgs {
                constructor: Invocation {
                    name: constructor.name.clone(),
                    fallible: constructor.fallible,
                },
                parameters: extracted
                    .properties
                    .iter()
                    .map(|p| p.name.clone())
                    .collect(),
            }
        }
        PropertySource::Accessors => {
            let default = check_default_constructor(target)?;
            ConstructionStrategy::DefaultThenSetters {
                default: default.clone(),
                properties: extracted
                    .properties
                    .iter()
                    .map(|p| p.name.clone())
                    .collect(),
            }
        }
    };

    debug!(
        target_type = %target.name,
        strategy = %strategy,
        properties = extracted.properties.len(),
        "resolved construction strategy"
    );

    Ok(Resolution {
        properties: extracted.properties,
        strategy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MismatchKind;
    use crate::extract::extract_properties;
    use crate::test_utils::{make_address, make_person, string_type};
    use pojobuilder_define::{DefaultConstruction, FieldDef, ParamDef};

    #[test]
    fn designated_constructor_binds_constructor_args() {
        let target = make_person();
        let extracted = extract_properties(&target).unwrap();
        let resolution = resolve_strategy(&target, extracted).unwrap();

        assert_eq!(
            resolution.strategy,
            ConstructionStrategy::ConstructorArgs {
                constructor: Invocation {
                    name: "new".to_string(),
                    fallible: false,
                },
                parameters: vec!["firstname".to_string(), "surname".to_string()],
            }
        );
    }

    #[test]
    fn parameter_order_wins_over_field_order() {
        let mut target = make_person();
        target.constructors[0].params.reverse();

        let extracted = extract_properties(&target).unwrap();
        let resolution = resolve_strategy(&target, extracted).unwrap();

        let ConstructionStrategy::ConstructorArgs { parameters, .. } = &resolution.strategy else {
            panic!("expected constructor strategy");
        };
        assert_eq!(parameters, &["surname".to_string(), "firstname".to_string()]);
        assert_eq!(resolution.properties[0].name, "surname");
    }

    #[test]
    fn setters_bind_default_then_setters() {
        let target = make_address();
        let extracted = extract_properties(&target).unwrap();
        let resolution = resolve_strategy(&target, extracted).unwrap();

        assert_eq!(
            resolution.strategy,
            ConstructionStrategy::DefaultThenSetters {
                default: DefaultConstruction::DefaultTrait,
                properties: vec![
                    "street".to_string(),
                    "city".to_string(),
                    "post_code".to_string()
                ],
            }
        );
    }

    #[test]
    fn setters_without_default_are_rejected() {
        let mut target = make_address();
        target.default_construction = None;

        let extracted = extract_properties(&target).unwrap();
        let err = resolve_strategy(&target, extracted).unwrap_err();
        assert!(matches!(err, ModelError::NoDefaultConstructor { .. }));
    }

    #[test]
    fn constructor_with_unknown_parameter_is_rejected() {
        let mut target = make_person();
        target.fields.pop();
        target.constructors[0].params[1] = ParamDef::new("lastname", string_type());
        target.fields.push(FieldDef::new("surname", string_type()));

        let extracted = extract_properties(&target).unwrap();
        let err = resolve_strategy(&target, extracted).unwrap_err();
        assert!(matches!(
            err,
            ModelError::ConstructorPropertyMismatch {
                kind: MismatchKind::UnmatchedParameter,
                ..
            }
        ));
    }

    #[test]
    fn fallible_constructor_is_recorded() {
        let mut target = make_person();
        target.constructors[0].fallible = true;

        let extracted = extract_properties(&target).unwrap();
        let resolution = resolve_strategy(&target, extracted).unwrap();
        assert!(matches!(
            resolution.strategy,
            ConstructionStrategy::ConstructorArgs {
                constructor: Invocation { fallible: true, .. },
                ..
            }
        ));
    }
}
