//! Shared test utilities for pojobuilder-gen tests.
//!
//! This module provides common helper functions for creating target type
//! fixtures across the codebase.

use pojobuilder_define::{
    BuilderOptions, ConstructorDef, DefaultConstruction, FieldDef, GetterDef, ParamDef, SetterDef,
    TargetType, TypeRef,
};

use crate::model::BuilderModel;

/// Returns the qualified `String` type.
pub fn string_type() -> TypeRef {
    TypeRef::new("::std::string::String")
}

/// Creates a setter-strategy target: `Address { pub street, pub city, pub post_code }`
/// deriving `Default`.
pub fn make_address() -> TargetType {
    let fields = ["street", "city", "post_code"];
    TargetType {
        name: "Address".to_string(),
        module_path: "crate::model".to_string(),
        fields: fields
            .iter()
            .map(|name| FieldDef::new(*name, string_type()))
            .collect(),
        constructors: vec![],
        getters: fields
            .iter()
            .map(|name| GetterDef::field(*name, string_type()))
            .collect(),
        setters: fields
            .iter()
            .map(|name| SetterDef::field(*name, string_type()))
            .collect(),
        default_construction: Some(DefaultConstruction::DefaultTrait),
        options: BuilderOptions::default(),
    }
}

/// Creates a constructor-strategy target: `Person::new(firstname, surname)`
/// with borrowing getters and no setters.
pub fn make_person() -> TargetType {
    let fields = ["firstname", "surname"];
    TargetType {
        name: "Person".to_string(),
        module_path: "crate::model".to_string(),
        fields: fields
            .iter()
            .map(|name| FieldDef::new(*name, string_type()))
            .collect(),
        constructors: vec![ConstructorDef {
            name: "new".to_string(),
            params: fields
                .iter()
                .map(|name| ParamDef::new(*name, string_type()))
                .collect(),
            fallible: false,
        }],
        getters: fields
            .iter()
            .map(|name| GetterDef::method(*name, *name, TypeRef::new("&str")))
            .collect(),
        setters: vec![],
        default_construction: None,
        options: BuilderOptions {
            constructor: Some("new".to_string()),
            ..BuilderOptions::default()
        },
    }
}

/// Derives a model, panicking on diagnostics.
pub fn model_for(target: &TargetType) -> BuilderModel {
    crate::generate::derive_model(target).expect("fixture should derive a model")
}
