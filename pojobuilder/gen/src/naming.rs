//! Identifier encoding for generated builders.
//!
//! Builder storage fields are keyed by the property name combined with an
//! encoding of the property's fully-qualified type. Rust identifiers only
//! allow `[A-Za-z0-9_]`, so the double underscore `__` is the reserved
//! delimiter:
//!
//! - type paths: `::std::string::String` -> `std__string__String`
//! - value slots: `value__<name>__<encoded type>`
//! - flags: `is_set__<name>__<encoded type>`
//!
//! The encoding is deterministic but not strictly injective (`Vec<u8>` and
//! `Vec<(u8)>` share an encoding). Collisions inside one builder are
//! rejected by [`crate::validation::check_storage_identifiers`].
//!
//! ## Examples
//!
//! ```
//! use pojobuilder_define::TypeRef;
//! use pojobuilder_gen::naming::{encode_type, storage_identifiers};
//!
//! let ty = TypeRef::new("::std::vec::Vec<::std::string::String>");
//! assert_eq!(encode_type(&ty), "std__vec__Vec_std__string__String");
//!
//! let ids = storage_identifiers("tags", &ty);
//! assert_eq!(ids.value, "value__tags__std__vec__Vec_std__string__String");
//! assert_eq!(ids.is_set, "is_set__tags__std__vec__Vec_std__string__String");
//! ```

use pojobuilder_define::TypeRef;
use proc_macro2::{Ident, Span};

/// Reserved delimiter between identifier parts.
pub const DELIMITER: &str = "__";

/// Prefix of value slot identifiers.
const VALUE_PREFIX: &str = "value";
/// Prefix of `is_set` flag identifiers.
const IS_SET_PREFIX: &str = "is_set";
/// Prefix of accumulator method names.
const ACCUMULATOR_PREFIX: &str = "with_";

/// The pair of storage identifiers for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageIdents {
    /// Identifier of the value slot.
    pub value: String,
    /// Identifier of the `is_set` flag.
    pub is_set: String,
}

/// Encodes a fully-qualified type as an identifier fragment.
///
/// Path separators become [`DELIMITER`]; any other run of punctuation
/// becomes a single `_`. Leading and trailing punctuation is dropped.
pub fn encode_type(ty: &TypeRef) -> String {
    let mut encoded = String::new();
    let mut separator = String::new();

    for c in ty.as_str().chars() {
        if c.is_alphanumeric() || c == '_' {
            if !separator.is_empty() {
                if !encoded.is_empty() {
                    encoded.push_str(if separator == "::" { DELIMITER } else { "_" });
                }
                separator.clear();
            }
            encoded.push(c);
        } else if !c.is_whitespace() || separator.is_empty() {
            separator.push(c);
        }
    }

    if encoded.is_empty() {
        // `()` and similar punctuation-only types
        encoded.push_str("unit");
    }
    encoded
}

/// Returns the storage identifiers for a property.
pub fn storage_identifiers(name: &str, ty: &TypeRef) -> StorageIdents {
    let encoded = encode_type(ty);
    StorageIdents {
        value: format!("{VALUE_PREFIX}{DELIMITER}{name}{DELIMITER}{encoded}"),
        is_set: format!("{IS_SET_PREFIX}{DELIMITER}{name}{DELIMITER}{encoded}"),
    }
}

/// Returns the accumulator method name for a property (`with_<name>`).
pub fn accumulator_name(property: &str) -> String {
    format!("{ACCUMULATOR_PREFIX}{property}")
}

/// Returns the module name a builder is emitted into.
///
/// ## Examples
///
/// ```
/// use pojobuilder_gen::naming::builder_module_name;
///
/// assert_eq!(builder_module_name("AddressBuilder"), "address_builder");
/// assert_eq!(builder_module_name("HTTPRequestBuilder"), "http_request_builder");
/// assert_eq!(builder_module_name("Pojo2Builder"), "pojo2_builder");
/// ```
pub fn builder_module_name(builder_name: &str) -> String {
    to_snake_case(builder_name)
}

/// Converts a CamelCase name into snake_case.
pub fn to_snake_case(name: &str) -> String {
    split_camel_case(name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Creates an identifier, falling back to a raw identifier for keywords
/// (`type` -> `r#type`).
///
/// `name` must have passed [`is_valid_field_name`]; model validation
/// guarantees this for every name that reaches code generation.
pub fn to_ident(name: &str) -> Ident {
    if is_valid_identifier(name) {
        Ident::new(name, Span::call_site())
    } else {
        Ident::new_raw(name, Span::call_site())
    }
}

/// Returns `true` when `name` is usable as a (non-raw) Rust identifier.
///
/// Names are kept in unraw form, so `r#type` is rejected here.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.starts_with("r#") && syn::parse_str::<Ident>(name).is_ok()
}

/// Returns `true` when `name` can name a field, possibly as a raw
/// identifier (`type` is accepted, `self` is not).
pub fn is_valid_field_name(name: &str) -> bool {
    is_valid_identifier(name) || syn::parse_str::<Ident>(&format!("r#{name}")).is_ok()
}

/// Splits a CamelCase string into individual words.
///
/// Handles various CamelCase patterns:
/// - "AddressBuilder" -> ["Address", "Builder"]
/// - "HTTPClient" -> ["HTTP", "Client"]
/// - "Pojo2Builder" -> ["Pojo2", "Builder"]
/// - "address" -> ["address"]
fn split_camel_case(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut word_start = 0;
    let chars: Vec<(usize, char)> = s.char_indices().collect();

    for i in 1..chars.len() {
        let (idx, current) = chars[i];
        let prev = chars[i - 1].1;

        // Split before uppercase that follows lowercase or a digit: "pojo2Builder" -> "pojo2", "Builder"
        // Split before uppercase followed by lowercase when preceded by uppercase: "HTTPClient" -> "HTTP", "Client"
        let is_new_word = current.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (i + 1 < chars.len() && chars[i + 1].1.is_lowercase() && prev.is_uppercase()));

        if is_new_word {
            if idx > word_start {
                words.push(&s[word_start..idx]);
            }
            word_start = idx;
        }
    }

    // Add the final word
    if word_start < s.len() {
        words.push(&s[word_start..]);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    // === split_camel_case tests ===

    #[test]
    fn split_camel_case_multi_word() {
        assert_eq!(split_camel_case("AddressBuilder"), vec!["Address", "Builder"]);
    }

    #[test]
    fn split_camel_case_acronym_at_start() {
        assert_eq!(split_camel_case("HTTPClient"), vec!["HTTP", "Client"]);
    }

    #[test]
    fn split_camel_case_with_acronym() {
        assert_eq!(split_camel_case("PostalURL"), vec!["Postal", "URL"]);
    }

    #[test]
    fn split_camel_case_after_digit() {
        assert_eq!(split_camel_case("Pojo2Builder"), vec!["Pojo2", "Builder"]);
    }

    #[test]
    fn split_camel_case_lowercase() {
        assert_eq!(split_camel_case("address"), vec!["address"]);
    }

    #[test]
    fn split_camel_case_empty() {
        assert_eq!(split_camel_case(""), Vec::<&str>::new());
    }

    // === type encoding tests ===

    #[test]
    fn encode_simple_paths() {
        assert_eq!(encode_type(&TypeRef::new("u32")), "u32");
        assert_eq!(
            encode_type(&TypeRef::new("::std::string::String")),
            "std__string__String"
        );
        assert_eq!(
            encode_type(&TypeRef::new("crate::model::Address")),
            "crate__model__Address"
        );
    }

    #[test]
    fn encode_generic_and_compound_types() {
        assert_eq!(
            encode_type(&TypeRef::new("::std::option::Option<u8>")),
            "std__option__Option_u8"
        );
        assert_eq!(
            encode_type(&TypeRef::new(
                "::std::collections::HashMap<::std::string::String, u64>"
            )),
            "std__collections__HashMap_std__string__String_u64"
        );
        assert_eq!(encode_type(&TypeRef::new("[u8; 4]")), "u8_4");
        assert_eq!(encode_type(&TypeRef::new("(u8, bool)")), "u8_bool");
        assert_eq!(encode_type(&TypeRef::new("()")), "unit");
    }

    #[test]
    fn namespace_distinct_types_encode_differently() {
        let a = storage_identifiers("id", &TypeRef::new("crate::billing::Id"));
        let b = storage_identifiers("id", &TypeRef::new("crate::shipping::Id"));
        assert_ne!(a.value, b.value);
        assert_ne!(a.is_set, b.is_set);
    }

    #[test]
    fn storage_identifiers_share_encoding() {
        let ids = storage_identifiers("street", &TypeRef::new("::std::string::String"));
        assert_eq!(ids.value, "value__street__std__string__String");
        assert_eq!(ids.is_set, "is_set__street__std__string__String");
    }

    #[test]
    fn accumulator_names() {
        assert_eq!(accumulator_name("street"), "with_street");
        assert_eq!(accumulator_name("post_code"), "with_post_code");
    }

    #[test]
    fn snake_case_conversion() {
        assert_eq!(to_snake_case("PostalAddressBuilder"), "postal_address_builder");
        assert_eq!(to_snake_case("Builder"), "builder");
    }

    #[test]
    fn keywords_become_raw_identifiers() {
        assert_eq!(to_ident("street").to_string(), "street");
        assert_eq!(to_ident("type").to_string(), "r#type");
        assert!(is_valid_identifier("AddressBuilder"));
        assert!(!is_valid_identifier("Address Builder"));
        assert!(!is_valid_identifier("match"));
        assert!(is_valid_field_name("match"));
        assert!(!is_valid_field_name("post code"));
        assert!(!is_valid_field_name("r#type"));
        assert!(!is_valid_field_name("super"));
        assert!(!is_valid_field_name("set city"));
    }
}
