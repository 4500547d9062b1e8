//! Property accessors.
//!
//! Getters and setters are recorded per property. A public field counts as
//! both; methods are recorded with their name so generated code can call
//! them.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::types::TypeRef;

/// A way to read a property from an instance of the target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetterDef {
    /// Property (field) name this getter reads.
    pub property: String,
    /// How the value is read.
    pub access: GetterAccess,
    /// Type of the expression the access yields.
    pub returns: TypeRef,
}

impl GetterDef {
    /// A public field read.
    pub fn field(property: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            property: property.into(),
            access: GetterAccess::Field,
            returns: ty,
        }
    }

    /// A `&self` method returning `returns`.
    ///
    /// References are recorded as [`GetterAccess::BorrowingMethod`].
    pub fn method(property: impl Into<String>, name: impl Into<String>, returns: TypeRef) -> Self {
        let name = name.into();
        let access = if returns.is_reference() {
            GetterAccess::BorrowingMethod { name }
        } else {
            GetterAccess::Method { name }
        };
        Self {
            property: property.into(),
            access,
            returns,
        }
    }
}

/// How a getter reads its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GetterAccess {
    /// Read a public field directly.
    Field,
    /// Call a method returning the value by value.
    Method {
        /// Method name.
        name: String,
    },
    /// Call a method returning a reference.
    BorrowingMethod {
        /// Method name.
        name: String,
    },
}

/// A way to write a property on an instance of the target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetterDef {
    /// Property (field) name this setter writes.
    pub property: String,
    /// How the value is written.
    pub access: SetterAccess,
    /// Type the setter accepts.
    pub accepts: TypeRef,
}

impl SetterDef {
    /// A public field assignment.
    pub fn field(property: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            property: property.into(),
            access: SetterAccess::Field,
            accepts: ty,
        }
    }

    /// A `&mut self` method taking one argument.
    pub fn method(
        property: impl Into<String>,
        name: impl Into<String>,
        accepts: TypeRef,
        fallible: bool,
    ) -> Self {
        Self {
            property: property.into(),
            access: SetterAccess::Method {
                name: name.into(),
                fallible,
            },
            accepts,
        }
    }

    /// Returns `true` for setter methods returning `Result`.
    pub fn is_fallible(&self) -> bool {
        matches!(self.access, SetterAccess::Method { fallible: true, .. })
    }
}

/// How a setter writes its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SetterAccess {
    /// Assign a public field directly.
    Field,
    /// Call a `&mut self` method.
    Method {
        /// Method name.
        name: String,
        /// `true` when the method returns `Result`.
        #[serde(default)]
        fallible: bool,
    },
}
