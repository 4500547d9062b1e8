//! Type path qualification.
//!
//! Generated builders live in their own module, so every type they mention
//! must be spelled with an absolute path. [`TypeQualifier`] rewrites the
//! types found in a source file:
//!
//! - names brought in by `use` become the imported path (`crate::...`
//!   stays, `self::`/`super::` are resolved against the file's module,
//!   external crates get a leading `::`);
//! - types declared in the same file become `<module>::Name`;
//! - `String`, `Vec`, `Option`, `Box` and `Result` become their `::std`
//!   paths;
//! - `Self` becomes the target type's path;
//! - everything else (primitives, glob-imported names) is left alone.

use std::collections::{HashMap, HashSet};

use pojobuilder_define::TypeRef;
use quote::ToTokens;
use syn::visit_mut::{self, VisitMut};
use syn::{Item, UseTree};

/// Prelude types that are not primitives.
const PRELUDE: &[(&str, &str)] = &[
    ("String", "::std::string::String"),
    ("Vec", "::std::vec::Vec"),
    ("Option", "::std::option::Option"),
    ("Box", "::std::boxed::Box"),
    ("Result", "::std::result::Result"),
];

/// Resolves type names of one source file to absolute paths.
#[derive(Debug, Clone)]
pub struct TypeQualifier {
    /// Local name -> absolute path, from `use` declarations.
    imports: HashMap<String, String>,
    /// Types declared at the top level of the file.
    local_types: HashSet<String>,
    /// Modules declared at the top level of the file.
    local_modules: HashSet<String>,
    /// Module path of the file (e.g., `crate::model`).
    module: String,
    /// Path `Self` stands for.
    self_path: String,
}

impl TypeQualifier {
    /// Collects the imports and declarations of `file`.
    pub fn new(file: &syn::File, module: &str, target: &str) -> Self {
        let mut qualifier = Self {
            imports: HashMap::new(),
            local_types: HashSet::new(),
            local_modules: HashSet::new(),
            module: module.to_string(),
            self_path: format!("{module}::{target}"),
        };

        for item in &file.items {
            match item {
                Item::Struct(s) => {
                    qualifier.local_types.insert(s.ident.to_string());
                }
                Item::Enum(e) => {
                    qualifier.local_types.insert(e.ident.to_string());
                }
                Item::Type(t) => {
                    qualifier.local_types.insert(t.ident.to_string());
                }
                Item::Union(u) => {
                    qualifier.local_types.insert(u.ident.to_string());
                }
                Item::Trait(t) => {
                    qualifier.local_types.insert(t.ident.to_string());
                }
                Item::Mod(m) => {
                    qualifier.local_modules.insert(m.ident.to_string());
                }
                _ => {}
            }
        }

        let uses: Vec<&syn::ItemUse> = file
            .items
            .iter()
            .filter_map(|item| match item {
                Item::Use(u) => Some(u),
                _ => None,
            })
            .collect();
        for item in uses {
            let root = if item.leading_colon.is_some() {
                vec![String::new()]
            } else {
                vec![]
            };
            qualifier.collect_use(&item.tree, root);
        }

        qualifier
    }

    /// Records the names a `use` tree brings into scope.
    fn collect_use(&mut self, tree: &UseTree, prefix: Vec<String>) {
        match tree {
            UseTree::Path(path) => {
                let mut prefix = prefix;
                prefix.push(path.ident.to_string());
                self.collect_use(&path.tree, prefix);
            }
            UseTree::Name(name) => {
                let ident = name.ident.to_string();
                if ident == "self" {
                    if let Some(last) = prefix.last().cloned() {
                        self.record_import(last, &prefix);
                    }
                } else {
                    let mut full = prefix;
                    full.push(ident.clone());
                    self.record_import(ident, &full);
                }
            }
            UseTree::Rename(rename) => {
                let mut full = prefix;
                if rename.ident != "self" {
                    full.push(rename.ident.to_string());
                }
                self.record_import(rename.rename.to_string(), &full);
            }
            UseTree::Group(group) => {
                for item in &group.items {
                    self.collect_use(item, prefix.clone());
                }
            }
            // Glob imports cannot be resolved without the target crate
            UseTree::Glob(_) => {}
        }
    }

    fn record_import(&mut self, local: String, segments: &[String]) {
        if let Some(path) = self.absolute(segments) {
            self.imports.insert(local, path);
        }
    }

    /// Turns the segments of a `use` path into an absolute path.
    fn absolute(&self, segments: &[String]) -> Option<String> {
        let (first, rest) = segments.split_first()?;
        let rest = rest.join("::");
        let join = |base: &str| {
            if rest.is_empty() {
                base.to_string()
            } else {
                format!("{base}::{rest}")
            }
        };

        match first.as_str() {
            // `use ::serde::Serialize`
            "" => Some(format!("::{rest}")),
            "crate" => Some(join("crate")),
            "self" => Some(join(&self.module)),
            "super" => {
                let supers = segments.iter().take_while(|s| *s == "super").count();
                let base = self.ancestor(supers)?;
                let rest = segments[supers..].join("::");
                Some(if rest.is_empty() { base } else { format!("{base}::{rest}") })
            }
            local if self.local_modules.contains(local) => {
                Some(format!("{}::{}", self.module, segments.join("::")))
            }
            external => Some(join(&format!("::{external}"))),
        }
    }

    /// The module `levels` steps above the file's module.
    fn ancestor(&self, levels: usize) -> Option<String> {
        let segments: Vec<&str> = self.module.split("::").collect();
        if levels >= segments.len() {
            return None;
        }
        Some(segments[..segments.len() - levels].join("::"))
    }

    /// Returns the absolute path a single leading name resolves to.
    fn resolve_leading(&self, name: &str, is_whole_path: bool) -> Option<String> {
        if let Some(path) = self.imports.get(name) {
            return Some(path.clone());
        }
        if is_whole_path && self.local_types.contains(name) {
            return Some(format!("{}::{}", self.module, name));
        }
        if self.local_modules.contains(name) {
            return Some(format!("{}::{}", self.module, name));
        }
        PRELUDE
            .iter()
            .find(|(short, _)| *short == name)
            .map(|(_, path)| path.to_string())
    }

    /// Qualifies a type and returns its canonical text.
    pub fn qualify(&self, ty: &syn::Type) -> TypeRef {
        let mut ty = ty.clone();
        Qualify { resolver: self }.visit_type_mut(&mut ty);
        TypeRef::new(ty.to_token_stream().to_string())
    }
}

/// Rewrites paths in place.
struct Qualify<'a> {
    resolver: &'a TypeQualifier,
}

impl Qualify<'_> {
    /// Returns the absolute prefix for `path` and how many leading
    /// segments it replaces.
    fn replacement(&self, path: &syn::Path) -> Option<(String, usize)> {
        if path.leading_colon.is_some() {
            return None;
        }
        let first = path.segments.first()?;
        let name = first.ident.to_string();
        let whole = path.segments.len() == 1;

        match name.as_str() {
            "crate" => None,
            "Self" if whole => Some((self.resolver.self_path.clone(), 1)),
            "Self" => None,
            "self" => Some((self.resolver.module.clone(), 1)),
            "super" => {
                let supers = path
                    .segments
                    .iter()
                    .take_while(|s| s.ident == "super")
                    .count();
                let base = self.resolver.ancestor(supers)?;
                Some((base, supers))
            }
            _ => {
                let resolved = self.resolver.resolve_leading(&name, whole)?;
                Some((resolved, 1))
            }
        }
    }
}

impl VisitMut for Qualify<'_> {
    fn visit_type_path_mut(&mut self, node: &mut syn::TypePath) {
        // `<T as Trait>::Assoc` is left as written
        if node.qself.is_some() {
            return;
        }
        visit_mut::visit_type_path_mut(self, node);
    }

    fn visit_path_mut(&mut self, node: &mut syn::Path) {
        visit_mut::visit_path_mut(self, node);

        let Some((prefix, replaced)) = self.replacement(node) else {
            return;
        };
        let Ok(prefix_path) = syn::parse_str::<syn::Path>(&prefix) else {
            return;
        };

        let mut segments = prefix_path.segments;
        // The last replaced segment hands its generic arguments over
        // (`Arc<T>` -> `::std::sync::Arc<T>`)
        if let (Some(last), Some(original)) = (
            segments.last_mut(),
            replaced.checked_sub(1).and_then(|i| node.segments.iter().nth(i)),
        ) {
            last.arguments = original.arguments.clone();
        }
        for segment in node.segments.iter().skip(replaced) {
            segments.push(segment.clone());
        }

        node.leading_colon = prefix_path.leading_colon;
        node.segments = segments;
    }
}
