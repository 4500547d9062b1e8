//! Property model extraction.
//!
//! Turns a [`TargetType`] descriptor into an ordered list of
//! [`PropertyDescriptor`]s. The list comes from one of two places:
//!
//! 1. the parameters of the designated constructor, in declaration order;
//! 2. otherwise, the fields exposing both a getter and a setter, in field
//!    declaration order.
//!
//! Extraction only reads the descriptor. Whether the constructor actually
//! lines up with the fields is decided by [`crate::resolve`].

use pojobuilder_define::{
    ConstructorDef, FieldDef, GetterAccess, GetterDef, SetterAccess, SetterDef, TargetType,
};
use tracing::trace;

use crate::errors::ModelError;
use crate::model::PropertyDescriptor;

/// Where the extracted properties came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySource<'a> {
    /// Parameters of the designated constructor.
    Constructor(&'a ConstructorDef),
    /// Fields with both a getter and a setter.
    Accessors,
}

/// The result of property extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedProperties<'a> {
    /// Where the properties came from.
    pub source: PropertySource<'a>,
    /// Properties in extraction order (ordinals are `0..len`).
    pub properties: Vec<PropertyDescriptor>,
}

/// Extracts the ordered property list of a target type.
///
/// ## Errors
///
/// - [`ModelError::UnknownConstructor`] if a constructor is designated but
///   the target has no associated function of that name.
/// - [`ModelError::NoUsableConstructionPath`] if no constructor is
///   designated and no field has both a getter and a setter.
pub fn extract_properties(target: &TargetType) -> Result<ExtractedProperties<'_>, ModelError> {
    if let Some(name) = &target.options.constructor {
        let constructor =
            target
                .constructor(name)
                .ok_or_else(|| ModelError::UnknownConstructor {
                    target: target.name.clone(),
                    constructor: name.clone(),
                })?;

        let properties = constructor
            .params
            .iter()
            .enumerate()
            .map(|(ordinal, param)| {
                let field = target.field(&param.name);
                PropertyDescriptor {
                    name: param.name.clone(),
                    declared_type: param.ty.clone(),
                    ordinal,
                    getter: field.and_then(|f| find_getter(target, f)),
                    setter: field.and_then(|f| find_setter(target, f)),
                }
            })
            .collect();

        return Ok(ExtractedProperties {
            source: PropertySource::Constructor(constructor),
            properties,
        });
    }

    let properties: Vec<PropertyDescriptor> = target
        .fields
        .iter()
        .filter_map(|field| {
            let getter = find_getter(target, field);
            let setter = find_setter(target, field);
            if getter.is_none() || setter.is_none() {
                trace!(target_type = %target.name, field = %field.name, "field is not setter-exposed");
                return None;
            }
            Some((field, getter, setter))
        })
        .enumerate()
        .map(|(ordinal, (field, getter, setter))| PropertyDescriptor {
            name: field.name.clone(),
            declared_type: field.ty.clone(),
            ordinal,
            getter,
            setter,
        })
        .collect();

    if properties.is_empty() {
        return Err(ModelError::NoUsableConstructionPath {
            target: target.name.clone(),
        });
    }

    Ok(ExtractedProperties {
        source: PropertySource::Accessors,
        properties,
    })
}

/// Finds a getter for `field` whose result can be turned into the field
/// type. Methods win over public field reads.
fn find_getter(target: &TargetType, field: &FieldDef) -> Option<GetterAccess> {
    let matching: Vec<&GetterDef> = target
        .getters
        .iter()
        .filter(|g| g.property == field.name && getter_yields(g, field))
        .collect();

    matching
        .iter()
        .find(|g| g.access != GetterAccess::Field)
        .or_else(|| matching.first())
        .map(|g| g.access.clone())
}

fn getter_yields(getter: &GetterDef, field: &FieldDef) -> bool {
    match getter.access {
        GetterAccess::Field | GetterAccess::Method { .. } => getter.returns == field.ty,
        GetterAccess::BorrowingMethod { .. } => field.ty.is_owned_form_of(&getter.returns),
    }
}

/// Finds a setter for `field` accepting exactly the field type. Methods
/// win over public field assignment.
fn find_setter(target: &TargetType, field: &FieldDef) -> Option<SetterAccess> {
    let matching: Vec<&SetterDef> = target
        .setters
        .iter()
        .filter(|s| s.property == field.name && s.accepts == field.ty)
        .collect();

    matching
        .iter()
        .find(|s| s.access != SetterAccess::Field)
        .or_else(|| matching.first())
        .map(|s| s.access.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_address, make_person, string_type};
    use pojobuilder_define::TypeRef;

    #[test]
    fn setter_exposed_fields_in_declaration_order() {
        let target = make_address();
        let extracted = extract_properties(&target).unwrap();

        assert_eq!(extracted.source, PropertySource::Accessors);
        let names: Vec<_> = extracted.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["street", "city", "post_code"]);
        let ordinals: Vec<_> = extracted.properties.iter().map(|p| p.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn fields_without_setter_are_skipped() {
        let mut target = make_address();
        target.setters.retain(|s| s.property != "city");

        let extracted = extract_properties(&target).unwrap();
        let names: Vec<_> = extracted.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["street", "post_code"]);
        assert_eq!(extracted.properties[1].ordinal, 1);
    }

    #[test]
    fn fields_without_getter_are_skipped() {
        let mut target = make_address();
        target.getters.retain(|g| g.property != "street");

        let extracted = extract_properties(&target).unwrap();
        assert!(extracted.properties.iter().all(|p| p.name != "street"));
    }

    #[test]
    fn constructor_parameters_define_order() {
        let mut target = make_person();
        // Parameter order differs from field order
        target.constructors[0].params.reverse();

        let extracted = extract_properties(&target).unwrap();
        assert!(matches!(extracted.source, PropertySource::Constructor(c) if c.name == "new"));
        let names: Vec<_> = extracted.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["surname", "firstname"]);
    }

    #[test]
    fn unknown_constructor_is_reported() {
        let mut target = make_person();
        target.options.constructor = Some("from_parts".to_string());

        let err = extract_properties(&target).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownConstructor {
                target: "Person".to_string(),
                constructor: "from_parts".to_string(),
            }
        );
    }

    #[test]
    fn no_construction_path_without_setters() {
        let mut target = make_address();
        target.setters.clear();

        let err = extract_properties(&target).unwrap_err();
        assert_eq!(
            err,
            ModelError::NoUsableConstructionPath {
                target: "Address".to_string()
            }
        );
    }

    #[test]
    fn method_accessors_win_over_field_access() {
        let mut target = make_address();
        target
            .getters
            .push(GetterDef::method("street", "street", TypeRef::new("&str")));
        target.setters.push(SetterDef::method(
            "street",
            "set_street",
            string_type(),
            true,
        ));

        let extracted = extract_properties(&target).unwrap();
        let street = &extracted.properties[0];
        assert_eq!(
            street.getter,
            Some(GetterAccess::BorrowingMethod {
                name: "street".to_string()
            })
        );
        assert_eq!(
            street.setter,
            Some(SetterAccess::Method {
                name: "set_street".to_string(),
                fallible: true
            })
        );
    }

    #[test]
    fn incompatible_accessor_types_are_ignored() {
        let mut target = make_address();
        target.getters = vec![GetterDef::method("street", "street", TypeRef::new("usize"))];
        target.setters = vec![SetterDef::method("street", "set_street", TypeRef::new("&str"), false)];

        let err = extract_properties(&target).unwrap_err();
        assert!(matches!(err, ModelError::NoUsableConstructionPath { .. }));
    }
}
