//! Source scanning.
//!
//! Builds [`TargetType`] descriptors from Rust source files. A file is
//! parsed with `syn` once per run, however many targets it declares. The
//! scanner only looks at top-level items:
//!
//! - the struct itself (named fields, no generics);
//! - inherent `impl` blocks of the struct, for constructors, getters and
//!   setters;
//! - `#[derive(Default)]` or an `impl Default` for the struct.
//!
//! Public fields count as both getter and setter. Methods are recognized by
//! shape:
//!
//! | Kind        | Shape                                              |
//! |-------------|----------------------------------------------------|
//! | constructor | `pub fn name(..) -> Self` or `-> Result<Self, E>`  |
//! | getter      | `pub fn x(&self) -> T`, also `get_x` and `is_x`    |
//! | setter      | `pub fn set_x(&mut self, value: T)`, any return    |

mod imports;

pub use imports::TypeQualifier;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use pojobuilder_define::{
    BuilderOptions, ConstructorDef, DefaultConstruction, FieldDef, GetterDef, ParamDef, SetterDef,
    TargetType,
};
use syn::{Fields, FnArg, ImplItem, Item, ItemImpl, ItemStruct, ReturnType, Type, Visibility};
use tracing::{debug, trace};

use crate::config::TargetConfig;
use crate::errors::GeneratorError;

/// Getter name prefixes, tried after the bare property name.
const GETTER_PREFIXES: &[&str] = &["get_", "is_"];
/// Setter name prefix.
const SETTER_PREFIX: &str = "set_";

/// Scans targets out of source files, caching parsed files.
#[derive(Debug, Default)]
pub struct SourceScanner {
    files: HashMap<PathBuf, syn::File>,
}

impl SourceScanner {
    /// Creates a scanner with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct files parsed so far.
    pub fn parsed_files(&self) -> usize {
        self.files.len()
    }

    /// Scans the target described by `config`.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ReadError`] or [`GeneratorError::ParseError`]
    /// if the source cannot be loaded, and [`GeneratorError::ScanError`] if
    /// the struct is missing or has an unsupported shape.
    pub fn scan(&mut self, config: &TargetConfig) -> Result<TargetType, GeneratorError> {
        let file = self.load(&config.source)?;
        scan_file(file, config)
    }

    fn load(&mut self, path: &Path) -> Result<&syn::File, GeneratorError> {
        match self.files.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let content = fs::read_to_string(path).map_err(|e| GeneratorError::ReadError {
                    path: path.display().to_string(),
                    source: e,
                })?;
                let file = syn::parse_file(&content).map_err(|e| GeneratorError::ParseError {
                    path: path.display().to_string(),
                    source: e,
                })?;
                debug!(path = %path.display(), items = file.items.len(), "parsed source file");
                Ok(entry.insert(file))
            }
        }
    }
}

/// Scans a target out of source text.
///
/// ## Errors
///
/// Returns [`GeneratorError::ParseError`] for invalid Rust and
/// [`GeneratorError::ScanError`] for a missing or unsupported struct.
pub fn scan_source(source: &str, config: &TargetConfig) -> Result<TargetType, GeneratorError> {
    let file = syn::parse_file(source).map_err(|e| GeneratorError::ParseError {
        path: config.source.display().to_string(),
        source: e,
    })?;
    scan_file(&file, config)
}

/// Scans a target out of a parsed file.
///
/// ## Errors
///
/// Returns [`GeneratorError::ScanError`] for a missing or unsupported
/// struct.
pub fn scan_file(file: &syn::File, config: &TargetConfig) -> Result<TargetType, GeneratorError> {
    let scan_error = |reason: String| GeneratorError::ScanError {
        target: config.name.clone(),
        reason,
    };

    let item = find_struct(file, &config.name).ok_or_else(|| {
        scan_error(format!(
            "no struct named '{}' in {}",
            config.name,
            config.source.display()
        ))
    })?;
    if !item.generics.params.is_empty() {
        return Err(scan_error("generic structs are not supported".to_string()));
    }
    let Fields::Named(named) = &item.fields else {
        return Err(scan_error(
            "tuple and unit structs are not supported".to_string(),
        ));
    };

    let qualifier = TypeQualifier::new(file, &config.module, &config.name);
    let mut target = TargetType {
        name: config.name.clone(),
        module_path: config.module.clone(),
        fields: Vec::new(),
        constructors: Vec::new(),
        getters: Vec::new(),
        setters: Vec::new(),
        default_construction: None,
        options: BuilderOptions {
            constructor: config.constructor.clone(),
            copy_method: config.copy_method,
            builder_name: config.builder_name.clone(),
        },
    };

    for field in &named.named {
        let Some(ident) = &field.ident else { continue };
        let name = syn::ext::IdentExt::unraw(ident).to_string();
        let ty = qualifier.qualify(&field.ty);
        if is_accessible(&field.vis) {
            target.getters.push(GetterDef::field(&name, ty.clone()));
            target.setters.push(SetterDef::field(&name, ty.clone()));
        }
        target.fields.push(FieldDef::new(name, ty));
    }

    for block in inherent_impls(file, &config.name) {
        scan_impl(block, &config.name, &qualifier, &mut target);
    }

    target.default_construction = default_construction(file, item, &target);

    debug!(
        target_type = %target.name,
        fields = target.fields.len(),
        constructors = target.constructors.len(),
        getters = target.getters.len(),
        setters = target.setters.len(),
        "scanned target"
    );
    Ok(target)
}

fn find_struct<'a>(file: &'a syn::File, name: &str) -> Option<&'a ItemStruct> {
    file.items.iter().find_map(|item| match item {
        Item::Struct(s) if s.ident == name => Some(s),
        _ => None,
    })
}

/// `pub` and `pub(crate)` items are reachable from generated code.
fn is_accessible(vis: &Visibility) -> bool {
    match vis {
        Visibility::Public(_) => true,
        Visibility::Restricted(r) => r.in_token.is_none() && r.path.is_ident("crate"),
        Visibility::Inherited => false,
    }
}

/// Returns `true` when `ty` names the struct (`Self` or its name).
fn is_self_type(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(p) if p.qself.is_none() => {
            p.path.segments.len() == 1
                && p.path.segments[0].arguments.is_empty()
                && (p.path.segments[0].ident == "Self" || p.path.segments[0].ident == name)
        }
        _ => false,
    }
}

/// Returns the `Ok` type when `ty` is `Result<T, ..>`.
fn result_ok_type(ty: &Type) -> Option<&Type> {
    let Type::Path(p) = ty else { return None };
    let last = p.path.segments.last()?;
    if last.ident != "Result" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(t) => Some(t),
        _ => None,
    })
}

fn inherent_impls<'a>(file: &'a syn::File, name: &'a str) -> impl Iterator<Item = &'a ItemImpl> {
    file.items.iter().filter_map(move |item| match item {
        Item::Impl(block)
            if block.trait_.is_none()
                && block.generics.params.is_empty()
                && is_self_type(&block.self_ty, name) =>
        {
            Some(block)
        }
        _ => None,
    })
}

fn scan_impl(block: &ItemImpl, name: &str, qualifier: &TypeQualifier, target: &mut TargetType) {
    for item in &block.items {
        let ImplItem::Fn(method) = item else { continue };
        if !is_accessible(&method.vis) || !method.sig.generics.params.is_empty() {
            continue;
        }
        let method_name = syn::ext::IdentExt::unraw(&method.sig.ident).to_string();
        let output = match &method.sig.output {
            ReturnType::Default => None,
            ReturnType::Type(_, ty) => Some(ty.as_ref()),
        };

        let receiver = method.sig.receiver();
        let typed: Vec<&syn::PatType> = method
            .sig
            .inputs
            .iter()
            .filter_map(|arg| match arg {
                FnArg::Typed(t) => Some(t),
                FnArg::Receiver(_) => None,
            })
            .collect();

        match receiver {
            None => {
                if let Some(constructor) = constructor_def(&method_name, output, &typed, name, qualifier) {
                    trace!(target_type = %name, constructor = %constructor.name, "found constructor");
                    target.constructors.push(constructor);
                }
            }
            Some(r) if r.reference.is_some() && r.mutability.is_none() => {
                if let (Some(ty), true) = (output, typed.is_empty())
                    && let Some(property) = getter_property(&method_name, target)
                {
                    trace!(target_type = %name, getter = %method_name, "found getter");
                    let returns = qualifier.qualify(ty);
                    target.getters.push(GetterDef::method(property, &method_name, returns));
                }
            }
            Some(r) if r.reference.is_some() => {
                if let ([value], Some(property)) = (typed.as_slice(), setter_property(&method_name, target)) {
                    trace!(target_type = %name, setter = %method_name, "found setter");
                    let fallible = output.is_some_and(|ty| result_ok_type(ty).is_some());
                    let accepts = qualifier.qualify(&value.ty);
                    target
                        .setters
                        .push(SetterDef::method(property, &method_name, accepts, fallible));
                }
            }
            // `self` by value consumes the instance; not an accessor
            Some(_) => {}
        }
    }
}

fn constructor_def(
    method_name: &str,
    output: Option<&Type>,
    params: &[&syn::PatType],
    name: &str,
    qualifier: &TypeQualifier,
) -> Option<ConstructorDef> {
    let output = output?;
    let fallible = if is_self_type(output, name) {
        false
    } else if result_ok_type(output).is_some_and(|ok| is_self_type(ok, name)) {
        true
    } else {
        return None;
    };

    let params = params
        .iter()
        .map(|param| {
            let syn::Pat::Ident(pat) = param.pat.as_ref() else {
                return None;
            };
            let param_name = syn::ext::IdentExt::unraw(&pat.ident).to_string();
            Some(ParamDef::new(param_name, qualifier.qualify(&param.ty)))
        })
        .collect::<Option<Vec<_>>>()?;

    Some(ConstructorDef {
        name: method_name.to_string(),
        params,
        fallible,
    })
}

/// Property read by a `&self` method, if its name matches a field.
fn getter_property(method_name: &str, target: &TargetType) -> Option<String> {
    std::iter::once(method_name)
        .chain(
            GETTER_PREFIXES
                .iter()
                .filter_map(|prefix| method_name.strip_prefix(prefix)),
        )
        .find(|candidate| target.field(candidate).is_some())
        .map(str::to_string)
}

/// Property written by a `&mut self` method, if its name matches a field.
fn setter_property(method_name: &str, target: &TargetType) -> Option<String> {
    method_name
        .strip_prefix(SETTER_PREFIX)
        .filter(|candidate| target.field(candidate).is_some())
        .map(str::to_string)
}

/// Determines how a default instance is obtained.
fn default_construction(
    file: &syn::File,
    item: &ItemStruct,
    target: &TargetType,
) -> Option<DefaultConstruction> {
    if derives_default(item) || implements_default(file, &target.name) {
        return Some(DefaultConstruction::DefaultTrait);
    }
    target
        .constructors
        .iter()
        .find(|c| c.name == "new" && c.params.is_empty())
        .map(|c| DefaultConstruction::NoArgConstructor {
            name: c.name.clone(),
            fallible: c.fallible,
        })
}

fn derives_default(item: &ItemStruct) -> bool {
    let mut found = false;
    for attr in item.attrs.iter().filter(|a| a.path().is_ident("derive")) {
        // Malformed derive lists are left for rustc to report
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.segments.last().is_some_and(|s| s.ident == "Default") {
                found = true;
            }
            Ok(())
        });
    }
    found
}

fn implements_default(file: &syn::File, name: &str) -> bool {
    file.items.iter().any(|item| match item {
        Item::Impl(block) => {
            block.generics.params.is_empty()
                && is_self_type(&block.self_ty, name)
                && block
                    .trait_
                    .as_ref()
                    .and_then(|(_, path, _)| path.segments.last())
                    .is_some_and(|s| s.ident == "Default")
        }
        _ => false,
    })
}
