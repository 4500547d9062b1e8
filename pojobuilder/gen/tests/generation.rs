//! End-to-end generation from source files and descriptor files.

use std::fs;
use std::path::Path;

use pojobuilder_define::TargetType;
use pojobuilder_gen::config::{GeneratorConfig, Layout};
use pojobuilder_gen::errors::{MismatchKind, ModelError};
use pojobuilder_gen::generate::{generate_from_config, generate_targets};
use tempfile::TempDir;

const MODEL: &str = r#"
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Address {
    street: String,
    city: String,
    post_code: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            street: String::new(),
            city: String::new(),
            post_code: String::new(),
        }
    }
}

impl Address {
    pub fn street(&self) -> &str { &self.street }
    pub fn set_street(&mut self, street: String) { self.street = street; }
    pub fn city(&self) -> &str { &self.city }
    pub fn set_city(&mut self, city: String) { self.city = city; }
    pub fn post_code(&self) -> &str { &self.post_code }
    pub fn set_post_code(&mut self, post_code: String) { self.post_code = post_code; }
}

pub struct Person {
    firstname: String,
    surname: String,
}

impl Person {
    pub fn new(firstname: String, surname: String) -> Self {
        Self { firstname, surname }
    }
}

pub struct Nickname {
    firstname: String,
    surname: String,
}

impl Nickname {
    pub fn new(firstname: String, nickname: String) -> Self {
        Self { firstname, surname: nickname }
    }
}

#[derive(Default)]
pub struct Labels {
    pub values: HashMap<String, Vec<String>>,
}
"#;

const CONFIG: &str = r#"
[output]
dir = "generated"

[[target]]
name = "Address"
source = "model.rs"
module = "crate::model"
copy_method = true

[[target]]
name = "Person"
source = "model.rs"
module = "crate::model"
constructor = "new"

[[target]]
name = "Nickname"
source = "model.rs"
module = "crate::model"
constructor = "new"

[[target]]
name = "Labels"
source = "model.rs"
module = "crate::model"
"#;

fn project(config: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("model.rs"), MODEL).unwrap();
    fs::write(temp_dir.path().join("pojobuilder.toml"), config).unwrap();
    temp_dir
}

fn load(dir: &Path) -> GeneratorConfig {
    GeneratorConfig::load(&dir.join("pojobuilder.toml")).unwrap()
}

fn read(dir: &Path, file: &str) -> String {
    fs::read_to_string(dir.join("generated").join(file)).unwrap()
}

fn compact(code: &str) -> String {
    code.split_whitespace().collect()
}

#[test]
fn modules_layout_writes_one_file_per_builder() {
    let project = project(CONFIG);
    let report = generate_from_config(&load(project.path()), false).unwrap();

    assert_eq!(
        report.builder_names(),
        vec!["AddressBuilder", "PersonBuilder", "LabelsBuilder"]
    );
    let names: Vec<String> = report
        .files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "mod.rs",
            "shared.rs",
            "address_builder.rs",
            "person_builder.rs",
            "labels_builder.rs"
        ]
    );

    let mod_rs = read(project.path(), "mod.rs");
    assert!(mod_rs.starts_with("// This code was automatically generated by pojobuilder-gen"));
    assert!(mod_rs.contains("pub mod address_builder;"));
    assert!(mod_rs.contains("pub use address_builder::AddressBuilder;"));
    assert!(!mod_rs.contains("nickname"));

    let shared = read(project.path(), "shared.rs");
    assert!(shared.contains("pub struct ConstructionFailure"));
}

#[test]
fn constructor_mismatch_blocks_only_that_target() {
    let project = project(CONFIG);
    let report = generate_from_config(&load(project.path()), false).unwrap();

    assert_eq!(
        report.diagnostics,
        vec![ModelError::ConstructorPropertyMismatch {
            target: "Nickname".to_string(),
            constructor: "new".to_string(),
            name: "nickname".to_string(),
            kind: MismatchKind::UnmatchedParameter,
        }]
    );
    assert!(!report.is_clean());
    assert!(!project.path().join("generated/nickname_builder.rs").exists());
}

#[test]
fn setter_builder_uses_scanned_accessors() {
    let project = project(CONFIG);
    generate_from_config(&load(project.path()), false).unwrap();

    let code = compact(&read(project.path(), "address_builder.rs"));
    assert!(code.contains("usesuper::shared::ConstructionFailure;"));
    assert!(code.contains("usecrate::model::Address;"));
    assert!(code.contains("letmutresult=<Addressas::std::default::Default>::default();"));
    assert!(code.contains("result.set_city(::std::clone::Clone::clone(&self.value__city__std__string__String)"));
    assert!(code.contains("pubfncopy(self,pojo:&Address)->Self"));
    assert!(code.contains(".with_street(::std::borrow::ToOwned::to_owned(pojo.street())"));
}

#[test]
fn constructor_builder_passes_every_slot() {
    let project = project(CONFIG);
    generate_from_config(&load(project.path()), false).unwrap();

    let code = compact(&read(project.path(), "person_builder.rs"));
    assert!(code.contains(
        "Person::new(::std::clone::Clone::clone(&self.value__firstname__std__string__String),::std::clone::Clone::clone(&self.value__surname__std__string__String)"
    ));
    assert!(!code.contains("pubfncopy("));
}

#[test]
fn imported_types_are_qualified() {
    let project = project(CONFIG);
    generate_from_config(&load(project.path()), false).unwrap();

    let code = compact(&read(project.path(), "labels_builder.rs"));
    // Long generic types are wrapped with trailing commas
    let unwrapped = code.replace(',', "");
    assert!(unwrapped.contains(
        "::std::collections::HashMap<::std::string::String::std::vec::Vec<::std::string::String>>"
    ));
    assert!(unwrapped.contains(
        "pubfnwith_values(mutselfvalue:::std::collections::HashMap<"
    ));
    assert!(!code.contains("HashMap<String"));
    assert!(code.contains("result.values="));
}

#[test]
fn output_is_deterministic() {
    let project = project(CONFIG);
    let config = load(project.path());

    generate_from_config(&config, false).unwrap();
    let first = read(project.path(), "address_builder.rs");
    generate_from_config(&config, false).unwrap();
    let second = read(project.path(), "address_builder.rs");

    assert_eq!(first, second);
}

#[test]
fn bundle_layout_writes_a_single_includable_file() {
    let project = project(CONFIG);
    let mut config = load(project.path());
    config.output.layout = Layout::Bundle;

    let report = generate_from_config(&config, false).unwrap();
    assert_eq!(report.files.len(), 1);

    let bundle = read(project.path(), "builders.rs");
    assert!(bundle.contains("pub mod shared {"));
    assert!(bundle.contains("pub mod person_builder {"));
    assert!(bundle.contains("pub use person_builder::PersonBuilder;"));
    assert!(!bundle.contains("//!"));
    assert!(!bundle.contains("#!["));
}

#[test]
fn dry_run_writes_nothing() {
    let project = project(CONFIG);
    let report = generate_from_config(&load(project.path()), true).unwrap();

    assert_eq!(report.models.len(), 3);
    assert!(report.files.is_empty());
    assert!(!project.path().join("generated").exists());
}

#[test]
fn missing_struct_aborts_the_run() {
    let project = project(
        r#"
[[target]]
name = "Ghost"
source = "model.rs"
module = "crate::model"
"#,
    );

    let err = generate_from_config(&load(project.path()), false).unwrap_err();
    assert!(err.to_string().contains("Ghost"));
}

#[test]
fn descriptors_generate_without_scanning() {
    let json = r#"[
        {
            "name": "Point",
            "module_path": "crate::geometry",
            "fields": [
                { "name": "x", "ty": "i64" },
                { "name": "y", "ty": "i64" }
            ],
            "getters": [
                { "property": "x", "access": { "kind": "field" }, "returns": "i64" },
                { "property": "y", "access": { "kind": "field" }, "returns": "i64" }
            ],
            "setters": [
                { "property": "x", "access": { "kind": "field" }, "accepts": "i64" },
                { "property": "y", "access": { "kind": "field" }, "accepts": "i64" }
            ],
            "default_construction": { "kind": "default_trait" },
            "options": { "copy_method": true }
        }
    ]"#;
    let targets: Vec<TargetType> = serde_json::from_str(json).unwrap();
    let output = TempDir::new().unwrap();

    let report = generate_targets(&targets, output.path(), Layout::Modules, false).unwrap();
    assert!(report.is_clean());

    let code = compact(&fs::read_to_string(output.path().join("point_builder.rs")).unwrap());
    assert!(code.contains("usecrate::geometry::Point;"));
    assert!(code.contains("pubfnwith_x(mutself,value:i64)->Self"));
    assert!(code.contains(".with_y(::std::clone::Clone::clone(&pojo.y)"));
}
