#![allow(non_snake_case)]

use super::*;
use crate::java::TypeSpec;
use crate::model::{Constructor, GenerateFlags, Parameter, PrimitiveKind, TypeDescriptor};
use crate::sink::MemorySink;

fn target(name: &str, ty: TypeDescriptor) -> TargetType {
    TargetType::new(format!("com.example.{name}"))
        .in_package("com.example")
        .with_constructor(Constructor::new(vec![Parameter::new("value", ty)]))
}

fn int_target(name: &str) -> TargetType {
    target(name, TypeDescriptor::Primitive(PrimitiveKind::Int))
}

fn registration(types: &[&str]) -> FactoryRegistration {
    FactoryRegistration {
        declared_in: Some("com.example".into()),
        ..FactoryRegistration::new(types.iter().map(|t| t.to_string()).collect())
    }
}

fn round() -> GenerationRound {
    GenerationRound::new(GeneratorConfig::default())
}

/// Fails every persist for units whose simple name matches
struct FailingSink {
    inner: MemorySink,
    fail_on: &'static str,
}

impl CodeSink for FailingSink {
    fn persist(&mut self, package: &str, type_spec: TypeSpec) -> GenerateResult<()> {
        if type_spec.name == self.fail_on {
            return Err(GenerateError::Persistence {
                unit: format!("{package}.{}", type_spec.name),
                source: std::io::Error::other("disk full"),
            });
        }
        self.inner.persist(package, type_spec)
    }

    fn discard(&mut self, package: &str, type_name: &str) {
        self.inner.discard(package, type_name);
    }
}

#[test]
fn GenerationRound___run___generates_adapters_and_factories() {
    let targets = vec![int_target("Point"), int_target("User")];
    let regs = vec![registration(&["com.example.Point", "com.example.User"])];
    let mut sink = MemorySink::new("\t");

    let report = round().run(&targets, &regs, &mut sink);

    assert!(report.is_success());
    assert_eq!(report.adapter_count(), 2);
    assert_eq!(
        sink.qualified_names(),
        vec![
            "com.example.PointAdapter",
            "com.example.UserAdapter",
            "com.example.MoshiFactory",
        ]
    );
    assert_eq!(report.generated[0].origin, "com.example.Point");
    assert_eq!(report.generated[2].origin, "com.example.MoshiFactory");
    assert!(report.warnings.is_empty());
    assert!(report.timings.is_empty());
}

#[test]
fn GenerationRound___run___failing_type_is_isolated() {
    let targets = vec![
        int_target("Point"),
        target("Packet", TypeDescriptor::Primitive(PrimitiveKind::Byte)),
        int_target("User"),
    ];
    let mut sink = MemorySink::new("\t");

    let report = round().run(&targets, &[], &mut sink);

    assert!(!report.is_success());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].type_name(), "com.example.Packet");
    assert_eq!(report.failures[0].field(), Some("value"));
    assert_eq!(
        sink.qualified_names(),
        vec!["com.example.PointAdapter", "com.example.UserAdapter"]
    );
}

#[test]
fn GenerationRound___run___failed_type_persists_nothing() {
    let flags = GenerateFlags {
        generate_factory: true,
        ..GenerateFlags::default()
    };
    let targets = vec![
        target("Packet", TypeDescriptor::Primitive(PrimitiveKind::Char)).with_flags(flags),
    ];
    let mut sink = MemorySink::new("\t");

    let report = round().run(&targets, &[], &mut sink);

    assert_eq!(report.failures.len(), 1);
    assert!(sink.files().is_empty());
    assert!(report.generated.is_empty());
}

#[test]
fn GenerationRound___run___persistence_error_recorded() {
    let targets = vec![int_target("Point"), int_target("User")];
    let mut sink = FailingSink {
        inner: MemorySink::new("\t"),
        fail_on: "PointAdapter",
    };

    let report = round().run(&targets, &[], &mut sink);

    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0], GenerateError::Persistence { .. }));
    assert_eq!(sink.inner.qualified_names(), vec!["com.example.UserAdapter"]);
}

#[test]
fn GenerationRound___run___factory_write_failure_rolls_back_adapter() {
    let flags = GenerateFlags {
        generate_factory: true,
        ..GenerateFlags::default()
    };
    let targets = vec![int_target("Point").with_flags(flags), int_target("User")];
    let mut sink = FailingSink {
        inner: MemorySink::new("\t"),
        fail_on: "PointAdapterFactory",
    };

    let report = round().run(&targets, &[], &mut sink);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].type_name(), "com.example.PointAdapterFactory");
    assert_eq!(sink.inner.qualified_names(), vec!["com.example.UserAdapter"]);
    assert_eq!(
        report.generated,
        vec![GeneratedUnit {
            name: "com.example.UserAdapter".into(),
            origin: "com.example.User".into(),
        }]
    );
}

#[test]
fn GenerationRound___run___consistency_warnings_only_for_generated() {
    let targets = vec![
        int_target("Point"),
        int_target("Orphan"),
        target("Broken", TypeDescriptor::Primitive(PrimitiveKind::Byte)),
    ];
    let regs = vec![
        registration(&["com.example.Point"]),
        registration(&["com.example.Point"]),
    ];
    let mut sink = MemorySink::new("\t");

    let report = round().run(&targets, &regs, &mut sink);

    let messages: Vec<_> = report.warnings.iter().map(|w| w.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "Class 'com.example.Point' is registered in multiple factories",
            "Class 'com.example.Orphan' is not registered in any factory",
        ]
    );
}

#[test]
fn GenerationRound___run___unresolvable_factory_package_is_a_failure() {
    let targets = vec![int_target("Point")];
    let regs = vec![FactoryRegistration::new(vec!["com.example.Point".into()])];
    let mut sink = MemorySink::new("\t");

    let report = round().run(&targets, &regs, &mut sink);

    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0],
        GenerateError::NamespaceResolution { .. }
    ));
    assert_eq!(sink.qualified_names(), vec!["com.example.PointAdapter"]);
}

#[test]
fn GenerationRound___trace_performance___records_phases() {
    let targets = vec![int_target("Point")];
    let mut sink = MemorySink::new("\t");

    let report = round()
        .trace_performance(true)
        .run(&targets, &[], &mut sink);

    let phases: Vec<_> = report.timings.iter().map(|t| t.phase).collect();
    assert_eq!(phases, vec!["data classes", "factories", "round"]);
}
