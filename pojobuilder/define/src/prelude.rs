//! Convenient re-exports for working with pojobuilder descriptors.
//!
//! ## Examples
//!
//! ```
//! use pojobuilder_define::prelude::*;
//!
//! let field = FieldDef::new("city", TypeRef::new("::std::string::String"));
//! let setter = SetterDef::field("city", field.ty.clone());
//! assert!(!setter.is_fallible());
//! ```

pub use crate::accessors::{GetterAccess, GetterDef, SetterAccess, SetterDef};
pub use crate::target::{
    BuilderOptions, ConstructorDef, DefaultConstruction, FieldDef, ParamDef, TargetType,
};
pub use crate::types::TypeRef;
