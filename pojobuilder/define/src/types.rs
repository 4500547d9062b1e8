//! Canonical type references.
//!
//! A [`TypeRef`] is the canonical text of a fully-qualified Rust type as
//! produced by the source scanner (or written by hand in a descriptor file).
//! Whitespace only survives between two identifier-like tokens, so
//! `:: std :: string :: String` and `::std::string::String` are the same
//! reference.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path of `String` after qualification.
const STRING: &str = "::std::string::String";
/// Path prefix of `Vec<T>` after qualification.
const VEC_PREFIX: &str = "::std::vec::Vec<";

/// Owned types and the borrowed form a getter may hand out for them.
const OWNED_BORROWED_PAIRS: &[(&str, &str)] = &[
    (STRING, "str"),
    ("::std::path::PathBuf", "::std::path::Path"),
    ("::std::ffi::OsString", "::std::ffi::OsStr"),
    ("::std::ffi::CString", "::std::ffi::CStr"),
];

/// A fully-qualified Rust type in canonical text form.
///
/// ## Examples
///
/// ```
/// use pojobuilder_define::TypeRef;
///
/// let ty = TypeRef::new(":: std :: string :: String");
/// assert_eq!(ty.as_str(), "::std::string::String");
/// assert_eq!(ty, TypeRef::new("::std::string::String"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeRef(String);

impl TypeRef {
    /// Creates a type reference, normalizing whitespace.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(canonicalize(text.as_ref()))
    }

    /// Returns the canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for `&T` and `&mut T` types.
    pub fn is_reference(&self) -> bool {
        self.0.starts_with('&')
    }

    /// Returns the referenced type of a shared reference (`&'a T` -> `T`).
    ///
    /// Mutable references and non-references yield `None`.
    pub fn referent(&self) -> Option<TypeRef> {
        let rest = self.0.strip_prefix('&')?;
        // `&'a T`, `&'a::path::T` and `&'_ T` all carry a lifetime token
        let rest = match rest.strip_prefix('\'') {
            Some(lifetime) => lifetime
                .trim_start_matches(|c: char| c.is_alphanumeric() || c == '_')
                .trim_start(),
            None => rest,
        };
        if rest.starts_with("mut ") {
            return None;
        }
        Some(TypeRef(rest.to_string()))
    }

    /// Returns `true` when a getter returning `returned` can be turned into
    /// a value of this type through `ToOwned`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use pojobuilder_define::TypeRef;
    ///
    /// let owned = TypeRef::new("::std::string::String");
    /// assert!(owned.is_owned_form_of(&TypeRef::new("&str")));
    /// assert!(owned.is_owned_form_of(&TypeRef::new("&::std::string::String")));
    /// assert!(!owned.is_owned_form_of(&TypeRef::new("::std::string::String")));
    /// ```
    pub fn is_owned_form_of(&self, returned: &TypeRef) -> bool {
        let Some(borrowed) = returned.referent() else {
            return false;
        };
        if &borrowed == self {
            return true;
        }
        if OWNED_BORROWED_PAIRS
            .iter()
            .any(|(owned, borrowed_form)| self.0 == *owned && borrowed.0 == *borrowed_form)
        {
            return true;
        }
        // `&[T]` for `Vec<T>`
        match (
            self.0.strip_prefix(VEC_PREFIX).and_then(|s| s.strip_suffix('>')),
            borrowed.0.strip_prefix('[').and_then(|s| s.strip_suffix(']')),
        ) {
            (Some(element), Some(slice_element)) => element == slice_element,
            _ => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TypeRef {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for TypeRef {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        ty.0
    }
}

/// Collapses whitespace so that a space only remains between two
/// identifier-like characters (`dyn Trait`, `&'a str`).
fn canonicalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space
            && out.chars().last().is_some_and(is_word_char)
            && is_word_char(c)
        {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}
