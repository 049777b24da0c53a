#![allow(non_snake_case)]

use super::*;
use crate::InputArgs;
use moshigen_core::model::Field;
use moshigen_core::round::{GeneratedUnit, PhaseTiming};
use moshigen_core::{
    ConsistencyWarning, GenerateError, PrimitiveKind, TargetType, TypeDescriptor, TypeExpr,
};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[class]]
name = "com.example.Point"

[[class.constructor]]
params = [
    { name = "x", type = "int" },
    { name = "label", type = "String", nullable = true, json = "point_label" },
]
"#;

const SOURCE: &str = r#"
#[generate_moshi]
pub struct Point {
    pub x: i32,
    pub point_label: Option<String>,
}
"#;

fn manifest_args(path: PathBuf) -> CommonArgs {
    CommonArgs {
        input: InputArgs {
            model: Some(path),
            source: None,
        },
        package: None,
        config: None,
    }
}

fn source_args(path: PathBuf, package: &str) -> CommonArgs {
    CommonArgs {
        input: InputArgs {
            model: None,
            source: Some(path),
        },
        package: Some(package.to_string()),
        config: None,
    }
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// load tests

#[test]
fn load___manifest___translates_classes() {
    let dir = TempDir::new().unwrap();
    let args = manifest_args(write(&dir, "moshigen.toml", MANIFEST));

    let model = load(&args).unwrap();

    assert_eq!(model.targets.len(), 1);
    assert_eq!(model.targets[0].qualified_name, "com.example.Point");
    assert_eq!(model.config, GeneratorConfig::default());
}

#[test]
fn load___invalid_manifest___names_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "moshigen.toml", "[[factory]]\ntypes = []\n");
    let args = manifest_args(path);

    let err = load(&args).unwrap_err();

    assert!(format!("{err:#}").contains("Invalid manifest"));
}

#[test]
fn load___source___scans_with_package() {
    let dir = TempDir::new().unwrap();
    let args = source_args(write(&dir, "model.rs", SOURCE), "com.example");

    let model = load(&args).unwrap();

    let point = &model.targets[0];
    assert_eq!(point.qualified_name, "com.example.Point");
    let params = &point.constructors[0].parameters;
    assert_eq!(params[1].name, "pointLabel");
    assert_eq!(params[1].annotations, vec!["org.jetbrains.annotations.Nullable"]);
}

#[test]
fn load___source_with_config___uses_configured_marker() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "config.json",
        r#"{ "indent": "  ", "nullable_annotations": ["com.acme.Maybe"] }"#,
    );
    let mut args = source_args(write(&dir, "model.rs", SOURCE), "com.example");
    args.config = Some(config);

    let model = load(&args).unwrap();

    assert_eq!(model.config.indent, "  ");
    assert_eq!(
        model.targets[0].constructors[0].parameters[1].annotations,
        vec!["com.acme.Maybe"]
    );
}

#[test]
fn load___bad_config___reports_path() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "config.json", "{ not json");
    let mut args = source_args(write(&dir, "model.rs", SOURCE), "com.example");
    args.config = Some(config);

    let err = load(&args).unwrap_err();

    assert!(format!("{err:#}").contains("Failed to parse config"));
}

// run tests

#[test]
fn run___writes_adapter_into_package_directory() {
    let dir = TempDir::new().unwrap();
    let args = manifest_args(write(&dir, "moshigen.toml", MANIFEST));
    let output = dir.path().join("out");

    run(&args, Some(output.clone()), false, false).unwrap();

    let adapter = output.join("com/example/PointAdapter.java");
    let source = fs::read_to_string(adapter).unwrap();
    assert!(source.contains("public class PointAdapter extends JsonAdapter<com.example.Point>"));
    assert!(source.contains("case \"point_label\":"));
}

#[test]
fn run___failing_type___returns_error_but_writes_others() {
    let dir = TempDir::new().unwrap();
    let manifest = format!(
        "{MANIFEST}\n[[class]]\nname = \"com.example.Empty\"\n\n[[class.constructor]]\nparams = []\n"
    );
    let args = manifest_args(write(&dir, "moshigen.toml", &manifest));
    let output = dir.path().join("out");

    let err = run(&args, Some(output.clone()), false, false).unwrap_err();

    assert!(err.to_string().contains("1 type(s) failed to generate"));
    assert!(output.join("com/example/PointAdapter.java").exists());
    assert!(!output.join("com/example/EmptyAdapter.java").exists());
}

#[test]
fn run___dry_run___writes_nothing() {
    let dir = TempDir::new().unwrap();
    let args = manifest_args(write(&dir, "moshigen.toml", MANIFEST));

    run(&args, None, true, true).unwrap();

    assert!(!dir.path().join("com").exists());
}

#[test]
fn check___clean_model___succeeds() {
    let dir = TempDir::new().unwrap();
    let args = manifest_args(write(&dir, "moshigen.toml", MANIFEST));

    assert!(check(&args).is_ok());
}

#[test]
fn inspect___failing_type___still_succeeds() {
    let dir = TempDir::new().unwrap();
    let manifest = "[[class]]\nname = \"com.example.Empty\"\n";
    let args = manifest_args(write(&dir, "moshigen.toml", manifest));

    assert!(inspect(&args).is_ok());
}

// Report formatting tests

#[test]
fn summarize___lists_units_failures_and_warnings() {
    let report = RoundReport {
        generated: vec![GeneratedUnit {
            name: "com.example.PointAdapter".into(),
            origin: "com.example.Point".into(),
        }],
        failures: vec![GenerateError::EmptyConstructor {
            type_name: "com.example.Empty".into(),
        }],
        warnings: vec![ConsistencyWarning::NotRegistered {
            type_name: "com.example.Point".into(),
        }],
        ..RoundReport::default()
    };

    let summary = summarize(&report);

    assert!(summary.starts_with("Generated 1 unit(s):\n  com.example.PointAdapter\n"));
    assert!(summary.contains("error: class com.example.Empty must have a non-empty constructor"));
    assert!(
        summary.contains("warning: Class 'com.example.Point' is not registered in any factory")
    );
}

#[test]
fn summarize___timings___use_performance_prefix() {
    let report = RoundReport {
        timings: vec![PhaseTiming {
            phase: "factories",
            elapsed: Duration::from_micros(1500),
        }],
        ..RoundReport::default()
    };

    assert_eq!(summarize(&report), "Generated 0 unit(s):\n==PERFORMANCE== factories: 1.500ms\n");
}

#[test]
fn describe_strategy___narrowed_primitive___names_cast() {
    let strategy = DecodeStrategy::Primitive {
        kind: PrimitiveKind::Short,
        method: moshigen_core::strategy::ReaderMethod::NextInt,
        narrow_to: Some(PrimitiveKind::Short),
    };

    assert_eq!(describe_strategy(&strategy), "reader.nextInt() as short");
}

#[test]
fn describe_strategy___delegated___shows_type_expression() {
    let ty = TypeDescriptor::parse("java.util.List<String>").unwrap();
    let strategy = DecodeStrategy::Delegated {
        expr: TypeExpr::build(&ty),
        ty,
    };

    assert_eq!(
        describe_strategy(&strategy),
        "moshi.adapter(Types.newParameterizedType(java.util.List.class, String.class))"
    );
}

#[test]
fn describe_plan___one_line_per_field() {
    let target = TargetType::new("com.example.Point");
    let fields = vec![
        Field {
            name: "x".into(),
            json_name: "x".into(),
            ty: TypeDescriptor::Primitive(PrimitiveKind::Int),
            nullable: false,
        },
        Field {
            name: "label".into(),
            json_name: "point_label".into(),
            ty: TypeDescriptor::String,
            nullable: true,
        },
    ];
    let plan = DecodePlan::build(&target.qualified_name, fields).unwrap();

    assert_eq!(
        describe_plan(&plan),
        "com.example.Point\n  int x <- \"x\": reader.nextInt()\n  String label <- \"point_label\": reader.nextString() (nullable)\n"
    );
}
