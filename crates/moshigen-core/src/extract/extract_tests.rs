#![allow(non_snake_case)]

use super::*;
use crate::model::{Constructor, Parameter, PrimitiveKind, TypeDescriptor, Visibility};

fn int() -> TypeDescriptor {
    TypeDescriptor::Primitive(PrimitiveKind::Int)
}

fn point() -> TargetType {
    TargetType::new("com.example.Point")
        .in_package("com.example")
        .with_constructor(Constructor::new(vec![
            Parameter::new("x", int()),
            Parameter::new("y", int()),
        ]))
}

#[test]
fn extract_fields___single_constructor___returns_parameters_in_order() {
    let fields = extract_fields(&point(), &GeneratorConfig::default()).unwrap();

    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert!(fields.iter().all(|f| !f.nullable));
    assert!(fields.iter().all(|f| f.json_name == f.name));
}

#[test]
fn extract_fields___no_constructor___returns_missing_constructor() {
    let target = TargetType::new("com.example.Empty").in_package("com.example");

    let err = extract_fields(&target, &GeneratorConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        GenerateError::MissingConstructor { ref type_name } if type_name == "com.example.Empty"
    ));
}

#[test]
fn extract_fields___two_constructors___returns_multiple_constructors() {
    let target = point().with_constructor(Constructor::new(vec![Parameter::new("x", int())]));

    let err = extract_fields(&target, &GeneratorConfig::default()).unwrap_err();

    assert!(matches!(err, GenerateError::MultipleConstructors { count: 2, .. }));
}

#[test]
fn extract_fields___zero_parameters___returns_empty_constructor() {
    let target = TargetType::new("com.example.Unit")
        .in_package("com.example")
        .with_constructor(Constructor::default());

    let err = extract_fields(&target, &GeneratorConfig::default()).unwrap_err();

    assert!(matches!(err, GenerateError::EmptyConstructor { .. }));
}

#[test]
fn extract_fields___nullable_annotation___marks_field_nullable() {
    let target = TargetType::new("com.example.User")
        .in_package("com.example")
        .with_constructor(Constructor::new(vec![
            Parameter::new("name", TypeDescriptor::String),
            Parameter::new("email", TypeDescriptor::String)
                .annotated("org.jetbrains.annotations.Nullable"),
            Parameter::new("age", TypeDescriptor::Boxed(PrimitiveKind::Int))
                .annotated("org.jetbrains.annotations.NotNull"),
        ]));

    let fields = extract_fields(&target, &GeneratorConfig::default()).unwrap();

    assert!(!fields[0].nullable);
    assert!(fields[1].nullable);
    assert!(!fields[2].nullable);
}

#[test]
fn extract_fields___custom_marker___follows_config() {
    let config = GeneratorConfig {
        nullable_annotations: vec!["com.acme.Maybe".into()],
        ..GeneratorConfig::default()
    };
    let target = TargetType::new("com.example.User")
        .in_package("com.example")
        .with_constructor(Constructor::new(vec![
            Parameter::new("a", TypeDescriptor::String).annotated("com.acme.Maybe"),
            Parameter::new("b", TypeDescriptor::String)
                .annotated("org.jetbrains.annotations.Nullable"),
        ]));

    let fields = extract_fields(&target, &config).unwrap();

    assert!(fields[0].nullable);
    assert!(!fields[1].nullable);
}

#[test]
fn extract_fields___json_override___keeps_parameter_name() {
    let target = TargetType::new("com.example.User")
        .in_package("com.example")
        .with_constructor(Constructor::new(vec![
            Parameter::new("displayName", TypeDescriptor::String).json("display_name"),
        ]));

    let fields = extract_fields(&target, &GeneratorConfig::default()).unwrap();

    assert_eq!(fields[0].name, "displayName");
    assert_eq!(fields[0].json_name, "display_name");
}

#[test]
fn check_visibility___public_concrete___passes() {
    assert!(check_visibility(&point()).is_ok());
}

#[test]
fn check_visibility___not_public___returns_invalid_visibility() {
    let target = point().with_visibility(Visibility {
        public: false,
        is_abstract: false,
    });

    let err = check_visibility(&target).unwrap_err();

    assert!(matches!(
        err,
        GenerateError::InvalidVisibility {
            violation: VisibilityViolation::NotPublic,
            ..
        }
    ));
}

#[test]
fn check_visibility___abstract___returns_invalid_visibility() {
    let target = point().with_visibility(Visibility {
        public: true,
        is_abstract: true,
    });

    let err = check_visibility(&target).unwrap_err();

    assert!(matches!(
        err,
        GenerateError::InvalidVisibility {
            violation: VisibilityViolation::Abstract,
            ..
        }
    ));
}

#[test]
fn resolve_namespace___missing___returns_namespace_resolution() {
    let target = TargetType::new("Orphan");

    let err = resolve_namespace(&target).unwrap_err();

    assert!(matches!(
        err,
        GenerateError::NamespaceResolution { ref type_name } if type_name == "Orphan"
    ));
}

#[test]
fn resolve_namespace___present___returns_package() {
    assert_eq!(resolve_namespace(&point()).unwrap(), "com.example");
}
